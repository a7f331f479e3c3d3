//! Pass 3: function bodies, statements and initializers.

use crate::base::TextRange;
use crate::parser::{AstNode, Attribute, Block, Expr, Function, ReturnStatement, Stmt, Type};
use crate::syntax::NodePtr;

use super::super::bound::{BoundExpr, BoundKind};
use super::super::diagnostics::codes;
use super::super::symbols::{SymbolId, TypeKind};
use super::super::table::ScopeKind;
use super::Binder;
use super::declarations::VariableSite;

impl Binder<'_> {
    pub(super) fn bind_function_body(&mut self, function: &Function, symbol: SymbolId) {
        let range = function.syntax().text_range();
        let start = function
            .parameter_list()
            .map(|list| list.syntax().text_range().start())
            .unwrap_or(range.start());
        self.push_scope(ScopeKind::Function, TextRange::new(start, range.end()), Some(symbol));
        self.function = Some(symbol);

        let key = (self.file, NodePtr::new(function.syntax()));
        let parameters = self.parameters.get(&key).cloned().unwrap_or_default();
        for parameter in parameters {
            let name = self.table.get(parameter).name().to_string();
            self.table.declare(self.scope, &name, parameter, None);
        }
        if let Some(body) = function.body() {
            self.bind_block(&body);
        }

        self.function = None;
        self.pop_scope();
    }

    /// Bind an initializer and check that it converts to `ty`.
    pub(super) fn bind_initializer(&mut self, value: &Expr, ty: SymbolId) {
        match value {
            Expr::ArrayInitializer(init) => {
                let element = match self.table.type_kind(ty) {
                    TypeKind::Array { element, .. } => Some(*element),
                    _ => None,
                };
                for item in init.elements() {
                    match element {
                        Some(element) => self.bind_initializer(&item, element),
                        None => {
                            self.bind_expr(&item);
                        }
                    }
                }
                self.bound
                    .insert(self.file, value.syntax(), BoundKind::Expr(BoundExpr::new(ty)));
            }
            _ => {
                let bound = self.bind_expr(value);
                self.check_conversion(value, bound.ty, ty, codes::TYPE_MISMATCH);
            }
        }
    }

    fn bind_block(&mut self, block: &Block) {
        self.push_scope(ScopeKind::Block, block.syntax().text_range(), None);
        for stmt in block.statements() {
            self.bind_stmt(&stmt);
        }
        self.pop_scope();
    }

    fn bind_stmt(&mut self, stmt: &Stmt) {
        if !matches!(stmt, Stmt::Variables(_)) {
            for attribute in stmt.syntax().children().filter_map(Attribute::cast) {
                self.bind_attribute(&attribute);
            }
        }
        match stmt {
            Stmt::Block(block) => self.bind_block(block),
            Stmt::Expression(statement) => {
                if let Some(expr) = statement.expr() {
                    self.bind_expr(&expr);
                }
            }
            Stmt::Empty(_) | Stmt::Discard(_) => {}
            Stmt::If(statement) => {
                if let Some(condition) = statement.condition() {
                    self.bind_condition(&condition);
                }
                if let Some(then_branch) = statement.then_branch() {
                    self.bind_stmt(&then_branch);
                }
                if let Some(else_branch) = statement.else_clause().and_then(|e| e.statement()) {
                    self.bind_stmt(&else_branch);
                }
            }
            Stmt::For(statement) => {
                self.push_scope(ScopeKind::Block, statement.syntax().text_range(), None);
                if let Some(decl) = statement.declaration() {
                    self.declare_declaration(&decl, VariableSite::Local, None, None);
                }
                if let Some(init) = statement.initializer() {
                    self.bind_expr(&init);
                }
                if let Some(condition) = statement.condition() {
                    self.bind_condition(&condition);
                }
                if let Some(increment) = statement.increment() {
                    self.bind_expr(&increment);
                }
                self.bind_loop_body(statement.body());
                self.pop_scope();
            }
            Stmt::While(statement) => {
                if let Some(condition) = statement.condition() {
                    self.bind_condition(&condition);
                }
                self.bind_loop_body(statement.body());
            }
            Stmt::Do(statement) => {
                self.bind_loop_body(statement.body());
                if let Some(condition) = statement.condition() {
                    self.bind_condition(&condition);
                }
            }
            Stmt::Switch(statement) => {
                if let Some(expr) = statement.expr() {
                    self.bind_expr(&expr);
                }
                self.push_scope(ScopeKind::Block, statement.syntax().text_range(), None);
                self.switch_depth += 1;
                for section in statement.sections() {
                    for label in section.case_labels() {
                        if let Some(value) = label.value() {
                            self.bind_expr(&value);
                        }
                    }
                    for stmt in section.statements() {
                        self.bind_stmt(&stmt);
                    }
                }
                self.switch_depth -= 1;
                self.pop_scope();
            }
            Stmt::Break(_) => {
                if self.loop_depth == 0 && self.switch_depth == 0 {
                    self.misplaced_jump(stmt, "break");
                }
            }
            Stmt::Continue(_) => {
                if self.loop_depth == 0 {
                    self.misplaced_jump(stmt, "continue");
                }
            }
            Stmt::Return(statement) => self.bind_return(statement),
            Stmt::Variables(vars) => {
                self.declare_variables(vars, VariableSite::Local, None);
            }
            Stmt::TypeDeclaration(decl) => {
                if let Some(st) = decl.struct_type() {
                    self.resolve_type(&Type::Struct(st));
                }
            }
            Stmt::Typedef(typedef) => self.declare_typedef(typedef),
        }
        self.bound.insert(self.file, stmt.syntax(), BoundKind::Stmt);
    }

    fn bind_loop_body(&mut self, body: Option<Stmt>) {
        let Some(body) = body else {
            return;
        };
        self.loop_depth += 1;
        self.bind_stmt(&body);
        self.loop_depth -= 1;
    }

    fn misplaced_jump(&mut self, stmt: &Stmt, keyword: &str) {
        let enclosing = if keyword == "break" {
            "loop or switch"
        } else {
            "loop"
        };
        self.diagnostics.error(
            self.file,
            stmt.syntax().text_range(),
            codes::MISPLACED_JUMP,
            format!("'{}' outside of a {}", keyword, enclosing),
        );
    }

    /// Conditions must be scalars.
    fn bind_condition(&mut self, condition: &Expr) {
        let bound = self.bind_expr(condition);
        let kind = self.table.type_kind(bound.ty);
        if kind.is_error_or_unknown() || kind.component_count() == Some(1) {
            return;
        }
        let found = self.table.type_name(bound.ty);
        self.diagnostics.error(
            self.file,
            condition.syntax().text_range(),
            codes::INVALID_CONDITION,
            format!("condition must be a scalar, found '{}'", found),
        );
    }

    fn bind_return(&mut self, statement: &ReturnStatement) {
        let value = statement.expr();
        let bound = value.as_ref().map(|v| self.bind_expr(v));
        let Some(function) = self.function else {
            return;
        };
        let return_type = self
            .table
            .get(function)
            .as_function()
            .map(|f| f.return_type)
            .unwrap_or(self.table.error_type());
        let is_void = self.table.type_kind(return_type) == &TypeKind::Void;
        let range = statement.syntax().text_range();
        match (value, bound) {
            (Some(_), Some(_)) if is_void => self.diagnostics.error(
                self.file,
                range,
                codes::RETURN_MISMATCH,
                "a void function cannot return a value",
            ),
            (Some(value), Some(bound)) => {
                self.check_conversion(&value, bound.ty, return_type, codes::RETURN_MISMATCH);
            }
            _ if !is_void && !self.table.type_kind(return_type).is_error_or_unknown() => {
                let expected = self.table.type_name(return_type);
                self.diagnostics.error(
                    self.file,
                    range,
                    codes::RETURN_MISMATCH,
                    format!("function must return a value of type '{}'", expected),
                );
            }
            _ => {}
        }
    }
}
