//! Passes 1 and 2: struct names, types, signatures and globals.

use smol_str::SmolStr;
use tracing::trace;

use crate::base::AnalysisError;
use crate::parser::{
    ArrayRankSpecifier, AstNode, Attribute, ConstantBuffer, Expr, Function, Item, LiteralKind,
    Semantic, StructType, SyntaxKind, TemplateArgument, TemplateArgumentList, Type,
    TypedefStatement, VariableDeclaration, VariableDeclarationStatement, extract_doc_comment,
};
use crate::syntax::{NodePtr, SyntaxTree};

use super::super::bound::BoundKind;
use super::super::diagnostics::codes;
use super::super::symbols::{
    FunctionSymbol, ObjectKind, ParameterInfo, Shape, SymbolId, SymbolKind, TypeKind,
    TypeSymbol, VariableKind, VariableSymbol,
};
use super::super::table::{ScopeKind, SymbolTable};
use super::{Binder, Pending, parse_integer};

/// Where a variable declaration statement appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum VariableSite {
    Global,
    Local,
    Field,
    ConstantBuffer,
}

impl Binder<'_> {
    // ------------------------------------------------------------------------
    // Pass 1
    // ------------------------------------------------------------------------

    pub(super) fn declare_struct_names(&mut self, tree: &SyntaxTree) -> Result<(), AnalysisError> {
        let Some(file) = tree.source_file() else {
            return Ok(());
        };
        for item in file.items() {
            self.check_cancelled()?;
            let ty = match &item {
                Item::TypeDeclaration(decl) => decl.struct_type().map(Type::Struct),
                Item::Variables(vars) => vars.declaration().and_then(|d| d.ty()),
                Item::Typedef(typedef) => typedef.ty(),
                Item::Function(_) | Item::ConstantBuffer(_) => None,
            };
            match ty {
                Some(Type::Struct(st)) if st.name().is_some() => {
                    self.struct_symbol(&st);
                }
                _ => {}
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Pass 2
    // ------------------------------------------------------------------------

    pub(super) fn declare_globals(&mut self, tree: &SyntaxTree) -> Result<(), AnalysisError> {
        let Some(file) = tree.source_file() else {
            return Ok(());
        };
        for item in file.items() {
            self.check_cancelled()?;
            self.declare_item(&item, None);
        }
        Ok(())
    }

    /// Declare a top-level item or struct member; returns the new members.
    fn declare_item(&mut self, item: &Item, container: Option<SymbolId>) -> Vec<SymbolId> {
        let in_struct = container.is_some();
        match item {
            Item::Variables(vars) => {
                let site = if in_struct {
                    VariableSite::Field
                } else {
                    VariableSite::Global
                };
                self.declare_variables(vars, site, container)
            }
            Item::Function(function) => self.declare_function(function, container).into_iter().collect(),
            Item::TypeDeclaration(decl) => {
                if let Some(st) = decl.struct_type() {
                    self.resolve_type(&Type::Struct(st));
                }
                Vec::new()
            }
            Item::ConstantBuffer(buffer) => {
                self.declare_constant_buffer(buffer);
                Vec::new()
            }
            Item::Typedef(typedef) => {
                self.declare_typedef(typedef);
                Vec::new()
            }
        }
    }

    /// Symbol for a named or anonymous struct definition, declared on first use.
    fn struct_symbol(&mut self, st: &StructType) -> SymbolId {
        let key = (self.file, NodePtr::new(st.syntax()));
        if let Some(&id) = self.structs.get(&key) {
            return id;
        }
        let name = st.name();
        let text = name
            .as_ref()
            .and_then(|n| n.text())
            .unwrap_or_else(|| SmolStr::new_static("<anonymous struct>"));
        let decl = name.as_ref().map(|n| self.decl_site(st.syntax(), n));
        let documentation = st.syntax().parent().and_then(|p| extract_doc_comment(&p));
        let id = self.table.add_symbol(
            text,
            SymbolKind::Type(TypeSymbol::new(TypeKind::Struct)),
            decl,
            None,
            documentation,
        );
        self.structs.insert(key, id);
        if let Some(name) = name {
            self.declare(&name, id, None, |_, _| true);
        }
        trace!(struct_id = %id, "declared struct");
        id
    }

    /// Bind the fields and methods of a struct definition, once.
    fn complete_struct(&mut self, id: SymbolId, st: &StructType) {
        if !self.completed_structs.insert(id) {
            return;
        }
        if let Some(base_ref) = st.base() {
            let base = base_ref
                .text()
                .and_then(|name| self.table.lookup_type(self.scope, &name));
            match base {
                Some(base) => {
                    if let Some(ty) = self.table.type_symbol_mut(id) {
                        ty.base = Some(base);
                    }
                }
                None => self.diagnostics.undefined_reference(
                    self.file,
                    base_ref.syntax().text_range(),
                    base_ref.text().as_deref().unwrap_or_default(),
                ),
            }
            self.bound.insert(
                self.file,
                base_ref.syntax(),
                BoundKind::Reference {
                    symbol: base,
                    candidates: Vec::new(),
                },
            );
        }
        let Some(fields) = st.field_list() else {
            return;
        };
        self.push_scope(ScopeKind::Struct, fields.syntax().text_range(), Some(id));
        let mut members = Vec::new();
        for member in fields.members() {
            members.extend(self.declare_item(&member, Some(id)));
        }
        self.pop_scope();
        if let Some(ty) = self.table.type_symbol_mut(id) {
            ty.members = members;
        }
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    /// The type `ty` denotes. Unknown types are reported and become `error`.
    pub(super) fn resolve_type(&mut self, ty: &Type) -> SymbolId {
        let intrinsics = self.table.intrinsics();
        let id = match ty {
            Type::Predefined(predefined) => {
                let name = predefined.name().unwrap_or_default();
                match intrinsics.type_by_name(&name) {
                    Some(id) => id,
                    None => self.invalid_type(ty, &name),
                }
            }
            Type::VectorTemplate(vector) => match vector.arguments() {
                None => intrinsics.type_by_name("vector").unwrap_or(intrinsics.error()),
                Some(args) => self.resolve_numeric_template(ty, &args, false),
            },
            Type::MatrixTemplate(matrix) => match matrix.arguments() {
                None => intrinsics.type_by_name("matrix").unwrap_or(intrinsics.error()),
                Some(args) => self.resolve_numeric_template(ty, &args, true),
            },
            Type::Object(object) => {
                let name = object.name().unwrap_or_default();
                match ObjectKind::from_name(&name) {
                    Some(kind) => self.resolve_object(kind, object.arguments()),
                    None => self.invalid_type(ty, &name),
                }
            }
            Type::Named(named) => match named.name_ref() {
                Some(name_ref) => {
                    let name = name_ref.text().unwrap_or_default();
                    let offset = name_ref.syntax().text_range().start();
                    let symbol = self
                        .table
                        .lookup_type(self.scope, &name)
                        .or_else(|| intrinsics.type_by_name(&name));
                    let (id, reference) = match symbol {
                        Some(id) => (id, Some(id)),
                        None => match self.macro_symbol(&name, offset) {
                            Some(m) => (intrinsics.unknown(), Some(m)),
                            None => (self.invalid_type(ty, &name), None),
                        },
                    };
                    self.bound.insert(
                        self.file,
                        name_ref.syntax(),
                        BoundKind::Reference {
                            symbol: reference,
                            candidates: Vec::new(),
                        },
                    );
                    id
                }
                None => intrinsics.error(),
            },
            Type::Struct(st) => match st.reference() {
                Some(name_ref) => {
                    let name = name_ref.text().unwrap_or_default();
                    let symbol = self.table.lookup_type(self.scope, &name);
                    self.bound.insert(
                        self.file,
                        name_ref.syntax(),
                        BoundKind::Reference {
                            symbol,
                            candidates: Vec::new(),
                        },
                    );
                    symbol.unwrap_or_else(|| self.invalid_type(ty, &name))
                }
                None => {
                    let id = self.struct_symbol(st);
                    self.complete_struct(id, st);
                    id
                }
            },
        };
        self.bound
            .insert(self.file, ty.syntax(), BoundKind::TypeRef { ty: id });
        id
    }

    fn invalid_type(&mut self, ty: &Type, name: &str) -> SymbolId {
        self.diagnostics.error(
            self.file,
            ty.syntax().text_range(),
            codes::INVALID_TYPE,
            format!("unknown type '{}'", name),
        );
        self.table.error_type()
    }

    /// `vector<float, 3>` and `matrix<half, 2, 4>`.
    fn resolve_numeric_template(&mut self, ty: &Type, args: &TemplateArgumentList, is_matrix: bool) -> SymbolId {
        let mut scalar = None;
        let mut dims = Vec::new();
        for arg in args.arguments() {
            match arg {
                TemplateArgument::Type(element) => {
                    let element = self.resolve_type(&element);
                    scalar = self.table.type_kind(element).scalar_type();
                }
                TemplateArgument::Literal(literal) => {
                    let value = literal.token().and_then(|t| parse_integer(t.text()));
                    dims.push(value.filter(|n| (1..=4).contains(n)).map(|n| n as u8));
                }
            }
        }
        let shape = match (is_matrix, dims.as_slice()) {
            (false, [Some(n)]) => Some(Shape::Vector(*n)),
            (true, [Some(r), Some(c)]) => Some(Shape::Matrix(*r, *c)),
            _ => None,
        };
        match (scalar, shape) {
            (Some(scalar), Some(shape)) => self.table.numeric(scalar, shape),
            _ => {
                let text = ty.syntax().text().to_string();
                self.invalid_type(ty, text.trim())
            }
        }
    }

    fn resolve_object(&mut self, kind: ObjectKind, args: Option<TemplateArgumentList>) -> SymbolId {
        let element = args.and_then(|args| {
            args.arguments().find_map(|arg| match arg {
                TemplateArgument::Type(ty) => Some(ty),
                TemplateArgument::Literal(_) => None,
            })
        });
        match element {
            Some(element) if kind.has_element() => {
                let element = self.resolve_type(&element);
                self.table.object_of(kind, Some(element))
            }
            _ => self.table.intrinsics().object(kind),
        }
    }

    /// Wrap `ty` in one array type per rank, outermost first.
    pub(super) fn with_array_ranks(
        &mut self,
        mut ty: SymbolId,
        ranks: impl Iterator<Item = ArrayRankSpecifier>,
    ) -> SymbolId {
        let ranks: Vec<_> = ranks.collect();
        for rank in ranks.iter().rev() {
            let size = rank.size().and_then(|size| {
                self.bind_expr(&size);
                self.constant_value(&size)
            });
            ty = self.table.array_of(ty, size);
        }
        ty
    }

    /// Integer value of a constant expression such as an array size.
    pub(super) fn constant_value(&self, expr: &Expr) -> Option<u32> {
        match expr {
            Expr::Literal(literal) if literal.kind() == Some(LiteralKind::Int) => {
                parse_integer(literal.token()?.text())
            }
            Expr::Paren(paren) => self.constant_value(&paren.expr()?),
            Expr::Identifier(ident) => {
                let name_ref = ident.name_ref()?;
                self.macro_value(&name_ref.text()?, name_ref.syntax().text_range().start())
            }
            Expr::Binary(binary) => {
                let (lhs, rhs) = (self.constant_value(&binary.lhs()?)?, self.constant_value(&binary.rhs()?)?);
                match binary.op_kind()? {
                    SyntaxKind::PLUS => lhs.checked_add(rhs),
                    SyntaxKind::MINUS => lhs.checked_sub(rhs),
                    SyntaxKind::STAR => lhs.checked_mul(rhs),
                    SyntaxKind::SLASH => lhs.checked_div(rhs),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    /// Declare every declarator of `vars` in the current scope.
    pub(super) fn declare_variables(
        &mut self,
        vars: &VariableDeclarationStatement,
        site: VariableSite,
        container: Option<SymbolId>,
    ) -> Vec<SymbolId> {
        for attribute in vars.attributes() {
            self.bind_attribute(&attribute);
        }
        match vars.declaration() {
            Some(decl) => self.declare_declaration(&decl, site, container, extract_doc_comment(vars.syntax())),
            None => Vec::new(),
        }
    }

    /// Declare the declarators of a declaration, which may also sit in a
    /// `for` header.
    pub(super) fn declare_declaration(
        &mut self,
        decl: &VariableDeclaration,
        site: VariableSite,
        container: Option<SymbolId>,
        documentation: Option<String>,
    ) -> Vec<SymbolId> {
        let base = match decl.ty() {
            Some(ty) => self.resolve_type(&ty),
            None => self.table.error_type(),
        };
        let kind = match site {
            VariableSite::Global => VariableKind::Global,
            VariableSite::Local => VariableKind::Local,
            VariableSite::Field => VariableKind::Field,
            VariableSite::ConstantBuffer => VariableKind::ConstantBufferField,
        };

        let mut ids = Vec::new();
        for declarator in decl.declarators() {
            let Some(name) = declarator.name() else {
                continue;
            };
            let ty = self.with_array_ranks(base, declarator.array_ranks());
            let semantic = declarator.semantic().and_then(|s| self.bind_semantic(&s));
            let variable = VariableSymbol {
                kind,
                ty,
                is_const: decl.is_const(),
                is_static: decl.is_static(),
                semantic,
            };
            let value = declarator.initializer().and_then(|init| init.value());
            if let (VariableSite::Local, Some(value)) = (site, &value) {
                self.bind_initializer(value, ty);
            }
            let id = self.table.add_symbol(
                name.text().unwrap_or_default(),
                SymbolKind::Variable(variable),
                Some(self.decl_site(declarator.syntax(), &name)),
                container,
                documentation.clone(),
            );
            let visible_from = (site == VariableSite::Local).then(|| declarator.syntax().text_range().end());
            self.declare(&name, id, visible_from, |table, existing| !table.get(existing).is_invocable());
            if let (VariableSite::Global, Some(value)) = (site, value) {
                self.pending.push(Pending::Initializer {
                    unit: self.unit,
                    value,
                    ty,
                });
            }
            ids.push(id);
        }
        ids
    }

    pub(super) fn declare_typedef(&mut self, typedef: &TypedefStatement) {
        let base = match typedef.ty() {
            Some(ty) => self.resolve_type(&ty),
            None => self.table.error_type(),
        };
        let documentation = extract_doc_comment(typedef.syntax());
        for declarator in typedef.declarators() {
            let Some(name) = declarator.name() else {
                continue;
            };
            let target = self.with_array_ranks(base, declarator.array_ranks());
            let id = self.table.add_symbol(
                name.text().unwrap_or_default(),
                SymbolKind::Type(TypeSymbol::new(TypeKind::Alias(target))),
                Some(self.decl_site(declarator.syntax(), &name)),
                None,
                documentation.clone(),
            );
            self.declare(&name, id, None, |_, _| true);
        }
    }

    fn declare_constant_buffer(&mut self, buffer: &ConstantBuffer) {
        let name = buffer.name();
        let text = name
            .as_ref()
            .and_then(|n| n.text())
            .unwrap_or_else(|| SmolStr::new_static("<cbuffer>"));
        let decl = name.as_ref().map(|n| self.decl_site(buffer.syntax(), n));
        let id = self.table.add_symbol(
            text,
            SymbolKind::Type(TypeSymbol::new(TypeKind::ConstantBuffer)),
            decl,
            None,
            extract_doc_comment(buffer.syntax()),
        );
        if let Some(name) = &name {
            self.declare(name, id, None, |_, _| true);
        }
        // Fields live in the enclosing scope
        let mut members = Vec::new();
        for vars in buffer.declarations() {
            members.extend(self.declare_variables(&vars, VariableSite::ConstantBuffer, Some(id)));
        }
        if let Some(ty) = self.table.type_symbol_mut(id) {
            ty.members = members;
        }
    }

    /// Declare a function signature. A definition following a matching
    /// prototype completes the prototype's symbol.
    fn declare_function(&mut self, function: &Function, container: Option<SymbolId>) -> Option<SymbolId> {
        let name = function.name()?;
        let text = name.text()?;
        for attribute in function.attributes() {
            self.bind_attribute(&attribute);
        }
        let return_type = match function.return_type() {
            Some(ty) => self.resolve_type(&ty),
            None => self.table.error_type(),
        };
        let semantic = function.semantic().and_then(|s| self.bind_semantic(&s));

        let mut parameters = Vec::new();
        let mut parameter_names = Vec::new();
        for parameter in function.parameters() {
            let base = match parameter.ty() {
                Some(ty) => self.resolve_type(&ty),
                None => self.table.error_type(),
            };
            let declarator = parameter.declarator();
            let ty = match &declarator {
                Some(d) => self.with_array_ranks(base, d.array_ranks()),
                None => base,
            };
            if let Some(semantic) = declarator.as_ref().and_then(|d| d.semantic()) {
                self.bind_semantic(&semantic);
            }
            let default = parameter.default_value();
            if let Some(default) = &default {
                self.bind_initializer(default, ty);
            }
            parameters.push(ParameterInfo {
                name: parameter
                    .name()
                    .and_then(|n| n.text())
                    .unwrap_or_default(),
                ty,
                direction: parameter.direction(),
                has_default: default.is_some(),
            });
            parameter_names.push((parameter.name(), declarator));
        }

        let has_body = function.is_definition();
        let prototype = self
            .table
            .declared_in(self.scope, &text)
            .iter()
            .copied()
            .find(|&existing| same_signature(&self.table, existing, &parameters));
        let site = self.decl_site(function.syntax(), &name);
        let documentation = extract_doc_comment(function.syntax());

        let id = match prototype {
            Some(existing) if !(has_body && self.table.get(existing).as_function().is_some_and(|f| f.has_body)) => {
                let symbol = self.table.symbol_mut(existing).filter(|_| has_body);
                if let Some(symbol) = symbol {
                    symbol.decl = Some(site);
                    if documentation.is_some() {
                        symbol.documentation = documentation;
                    }
                    if let SymbolKind::Function(f) = &mut symbol.kind {
                        f.has_body = true;
                        f.parameters = parameters;
                    }
                }
                self.bound
                    .insert(self.file, name.syntax(), BoundKind::Declaration { symbol: existing });
                existing
            }
            _ => {
                let signature = parameters.clone();
                let kind = SymbolKind::Function(FunctionSymbol {
                    return_type,
                    parameters,
                    is_intrinsic: false,
                    is_numeric_constructor: false,
                    has_body,
                    semantic,
                });
                let id = self
                    .table
                    .add_symbol(text, kind, Some(site), container, documentation);
                // Overloads may share a name; identical signatures may not.
                // A variable of the same name makes later uses ambiguous.
                self.declare(&name, id, None, |table, existing| same_signature(table, existing, &signature));
                id
            }
        };

        let mut ids = Vec::new();
        for (info, (name, declarator)) in self.function_parameters(id).into_iter().zip(parameter_names) {
            let (Some(name), Some(declarator)) = (name, declarator) else {
                continue;
            };
            let variable = VariableSymbol {
                kind: VariableKind::Parameter(info.direction),
                ty: info.ty,
                is_const: false,
                is_static: false,
                semantic: declarator.semantic().and_then(|s| s.text()),
            };
            let param = self.table.add_symbol(
                info.name.clone(),
                SymbolKind::Variable(variable),
                Some(self.decl_site(declarator.syntax(), &name)),
                Some(id),
                None,
            );
            self.bound
                .insert(self.file, name.syntax(), BoundKind::Declaration { symbol: param });
            ids.push(param);
        }
        self.parameters
            .insert((self.file, NodePtr::new(function.syntax())), ids);

        if has_body {
            self.pending.push(Pending::Body {
                unit: self.unit,
                function: function.clone(),
                symbol: id,
                scope: self.scope,
            });
        }
        Some(id)
    }

    fn function_parameters(&self, id: SymbolId) -> Vec<ParameterInfo> {
        self.table
            .get(id)
            .as_function()
            .map(|f| f.parameters.clone())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Attributes and semantics
    // ------------------------------------------------------------------------

    pub(super) fn bind_attribute(&mut self, attribute: &Attribute) {
        let name_ref = attribute.name_ref();
        let symbol = name_ref
            .as_ref()
            .and_then(|n| n.text())
            .and_then(|name| self.table.intrinsics().attribute(&name));
        self.bound
            .insert(self.file, attribute.syntax(), BoundKind::Attribute { symbol });
        if let Some(name_ref) = name_ref {
            self.bound.insert(
                self.file,
                name_ref.syntax(),
                BoundKind::Reference {
                    symbol,
                    candidates: Vec::new(),
                },
            );
        }
        for argument in attribute.arguments() {
            self.bind_expr(&argument);
        }
    }

    /// Bind a `: SEMANTIC` annotation; returns its text.
    pub(super) fn bind_semantic(&mut self, semantic: &Semantic) -> Option<SmolStr> {
        let text = semantic.text()?;
        let symbol = self.table.semantic(&text);
        self.bound
            .insert(self.file, semantic.syntax(), BoundKind::Semantic { symbol });
        Some(text)
    }
}

/// Whether `existing` is a function taking exactly `parameters`' types.
fn same_signature(table: &SymbolTable, existing: SymbolId, parameters: &[ParameterInfo]) -> bool {
    let Some(function) = table.get(existing).as_function() else {
        return false;
    };
    function.parameters.len() == parameters.len()
        && function
            .parameters
            .iter()
            .zip(parameters)
            .all(|(a, b)| table.resolve_alias(a.ty) == table.resolve_alias(b.ty))
}
