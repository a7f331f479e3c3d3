//! The semantic model: read-only queries over a bound compilation.

use std::sync::Arc;

use tracing::debug;

use crate::base::{AnalysisError, CancellationToken, FileId, TextSize};
use crate::parser::{AstNode, Expr, SyntaxKind, SyntaxNode};
use crate::syntax::navigation::{token_at, token_before_word};
use crate::syntax::{MacroDefinition, SyntaxTree, predicates};

use super::bound::{BoundKind, BoundNode};
use super::compilation::{Compilation, IncludeResolver, failed_compilation};
use super::diagnostics::Diagnostic;
use super::grouping::{SymbolGroup, group_symbols};
use super::symbols::{Symbol, SymbolId};
use super::table::SymbolTable;

/// Bind `tree` and everything it includes. Never fails; problems are
/// diagnostics.
pub fn bind(tree: Arc<SyntaxTree>, resolver: &dyn IncludeResolver) -> SemanticModel {
    let compilation = Compilation::build(tree.clone(), resolver, None)
        .unwrap_or_else(|err| failed_compilation(tree, &err));
    SemanticModel::new(Arc::new(compilation))
}

/// Like [`bind`], giving up with [`AnalysisError::Cancelled`] once `cancel`
/// fires.
pub fn bind_cancellable(
    tree: Arc<SyntaxTree>,
    resolver: &dyn IncludeResolver,
    cancel: &CancellationToken,
) -> Result<SemanticModel, AnalysisError> {
    let compilation = Compilation::build(tree, resolver, Some(cancel))?;
    Ok(SemanticModel::new(Arc::new(compilation)))
}

/// Semantic queries over one root file.
///
/// Cheap to clone; every clone shares the same compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticModel {
    compilation: Arc<Compilation>,
}

impl SemanticModel {
    pub fn new(compilation: Arc<Compilation>) -> Self {
        debug!(
            file = %compilation.file_id(),
            diagnostics = compilation.semantic_diagnostics().len(),
            "semantic model ready"
        );
        Self { compilation }
    }

    pub fn compilation(&self) -> &Arc<Compilation> {
        &self.compilation
    }

    pub fn syntax_tree(&self) -> &SyntaxTree {
        self.compilation.root()
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        self.compilation.table()
    }

    pub fn file_id(&self) -> FileId {
        self.compilation.file_id()
    }

    fn root(&self) -> SyntaxNode {
        self.syntax_tree().root()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        self.symbol_table().get(id)
    }

    // ------------------------------------------------------------------------
    // Symbols
    // ------------------------------------------------------------------------

    /// Every symbol visible at `offset`, innermost scope first. Locals
    /// declared after `offset` and names hidden by a nearer scope are left
    /// out.
    pub fn lookup_symbols(&self, offset: TextSize) -> Vec<&Symbol> {
        let table = self.symbol_table();
        let scope = table.scope_at(self.file_id(), offset);
        table
            .visible_symbols(scope, offset)
            .into_iter()
            .map(|id| table.get(id))
            .collect()
    }

    /// [`lookup_symbols`](Self::lookup_symbols), one entry per name.
    pub fn lookup_symbol_groups(&self, offset: TextSize) -> Vec<SymbolGroup> {
        let table = self.symbol_table();
        let scope = table.scope_at(self.file_id(), offset);
        group_symbols(table, &table.visible_symbols(scope, offset))
    }

    /// Macros defined at `offset`.
    pub fn visible_macros(&self, offset: TextSize) -> impl Iterator<Item = &MacroDefinition> {
        self.compilation.macros().visible_at(offset)
    }

    /// The bound node for `node`; a `NAME_REF` without one of its own
    /// answers for its parent.
    fn bound_node(&self, node: &SyntaxNode) -> Option<&BoundNode> {
        let bound = self.compilation.bound();
        let file = self.file_id();
        bound.node(file, node).or_else(|| {
            if node.kind() == SyntaxKind::NAME_REF {
                node.parent().and_then(|parent| bound.node(file, &parent))
            } else {
                None
            }
        })
    }

    /// The symbol `node` refers to: a variable, function, type, attribute,
    /// semantic or macro. `None` when nothing (or nothing unique) was found.
    pub fn get_symbol(&self, node: &SyntaxNode) -> Option<&Symbol> {
        let bound = self.bound_node(node)?;
        match &bound.kind {
            BoundKind::Declaration { .. } | BoundKind::Stmt => None,
            _ => bound.symbol().map(|id| self.symbol(id)),
        }
    }

    /// Every symbol `node` might refer to: the overload set of an unresolved
    /// call, or the candidates of an ambiguous name.
    pub fn get_candidate_symbols(&self, node: &SyntaxNode) -> Vec<&Symbol> {
        self.bound_node(node)
            .map(|bound| bound.candidates())
            .unwrap_or_default()
            .into_iter()
            .map(|id| self.symbol(id))
            .collect()
    }

    /// The symbol declared by `node`: a `NAME`, or a declaration owning one.
    pub fn get_declared_symbol(&self, node: &SyntaxNode) -> Option<&Symbol> {
        let bound = self.compilation.bound();
        let file = self.file_id();
        let name = if node.kind() == SyntaxKind::NAME {
            Some(node.clone())
        } else {
            node.children().find(|child| child.kind() == SyntaxKind::NAME)
        }?;
        match &bound.node(file, &name)?.kind {
            BoundKind::Declaration { symbol } => Some(self.symbol(*symbol)),
            _ => None,
        }
    }

    /// Type of the expression `node`; `unknown` for anything else.
    ///
    /// A `NAME_REF` answers with the type of the expression it names.
    pub fn get_expression_type(&self, node: &SyntaxNode) -> &Symbol {
        let table = self.symbol_table();
        let ty = self
            .bound_type(node)
            .or_else(|| {
                let parent = node.parent().filter(|_| node.kind() == SyntaxKind::NAME_REF)?;
                self.bound_type(&parent)
            })
            .unwrap_or(table.unknown_type());
        table.get(ty)
    }

    fn bound_type(&self, node: &SyntaxNode) -> Option<SymbolId> {
        match &self.compilation.bound().node(self.file_id(), node)?.kind {
            BoundKind::Expr(expr) => Some(expr.ty),
            BoundKind::TypeRef { ty } => Some(*ty),
            _ => None,
        }
    }

    /// Where `symbol` was declared, as a node of its file's tree.
    pub fn declaration_node(&self, symbol: &Symbol) -> Option<(FileId, SyntaxNode)> {
        let decl = symbol.decl()?;
        let tree = self.compilation.tree(decl.file)?;
        let range = decl.node.text_range();
        if !tree.root().text_range().contains_range(range) {
            return None;
        }
        let node = match tree.root().covering_element(range) {
            rowan::NodeOrToken::Node(node) => node,
            rowan::NodeOrToken::Token(token) => token.parent()?,
        };
        let node = node
            .ancestors()
            .find(|n| n.text_range() == range && n.kind() == decl.node.kind())?;
        Some((decl.file, node))
    }

    // ------------------------------------------------------------------------
    // Editor helpers
    // ------------------------------------------------------------------------

    /// Type of the receiver when the caret follows `receiver.`.
    pub fn member_access_at(&self, offset: TextSize) -> Option<&Symbol> {
        let root = self.root();
        let dot = token_before_word(&root, offset).filter(|t| t.kind() == SyntaxKind::DOT)?;
        let access = dot.parent_ancestors().find(|n| {
            matches!(
                n.kind(),
                SyntaxKind::FIELD_ACCESS_EXPR | SyntaxKind::METHOD_INVOCATION_EXPR
            )
        })?;
        let receiver = access.children().find_map(Expr::cast)?;
        let ty = self.get_expression_type(receiver.syntax());
        let kind = ty.as_type().map(|t| &t.kind);
        if kind.is_some_and(|k| k.is_error_or_unknown()) {
            return None;
        }
        Some(ty)
    }

    /// The `#define` whose name is at `offset`, or the macro an identifier
    /// at `offset` expands.
    pub fn macro_definition_at(&self, offset: TextSize) -> Option<&MacroDefinition> {
        let macros = self.compilation.macros();
        if let Some(def) = macros.definition_at(offset) {
            return Some(def);
        }
        let token = token_at(&self.root(), offset).filter(|t| t.kind() == SyntaxKind::IDENT)?;
        macros.lookup(token.text(), offset)
    }

    // ------------------------------------------------------------------------
    // Position predicates
    // ------------------------------------------------------------------------

    pub fn in_comment(&self, offset: TextSize) -> bool {
        predicates::in_comment(&self.root(), offset)
    }

    pub fn in_literal(&self, offset: TextSize) -> bool {
        predicates::in_literal(&self.root(), offset)
    }

    pub fn possibly_in_macro(&self, offset: TextSize) -> bool {
        predicates::possibly_in_macro(&self.root(), offset)
    }

    pub fn definitely_in_macro(&self, offset: TextSize) -> bool {
        predicates::definitely_in_macro(&self.root(), offset)
    }

    pub fn possibly_in_type_name(&self, offset: TextSize) -> bool {
        predicates::possibly_in_type_name(&self.root(), offset)
    }

    pub fn definitely_in_type_name(&self, offset: TextSize) -> bool {
        predicates::definitely_in_type_name(&self.root(), offset)
    }

    pub fn definitely_in_variable_declarator_qualifier(&self, offset: TextSize) -> bool {
        predicates::definitely_in_variable_declarator_qualifier(&self.root(), offset)
    }

    pub fn possibly_in_user_given_name(&self, offset: TextSize) -> bool {
        predicates::possibly_in_user_given_name(&self.root(), offset)
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    /// Syntax and semantic diagnostics of the root file, by position.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let file = self.file_id();
        let mut diagnostics: Vec<Diagnostic> = self
            .syntax_tree()
            .diagnostics()
            .iter()
            .map(|error| Diagnostic::from((file, error)))
            .collect();
        diagnostics.extend(self.compilation.semantic_diagnostics().iter().cloned());
        diagnostics.sort_by_key(|d| (d.range.start(), d.range.end()));
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::NoIncludes;
    use crate::parser::NameRef;
    use crate::syntax::parse;

    fn model(text: &str) -> SemanticModel {
        bind(Arc::new(parse(text, FileId::default())), &NoIncludes)
    }

    fn offset_of(text: &str, needle: &str) -> TextSize {
        TextSize::from(text.find(needle).unwrap() as u32)
    }

    #[test]
    fn test_name_ref_delegates_to_parent() {
        let text = "float g; float f() { return g; }";
        let model = model(text);
        let name_ref = model
            .syntax_tree()
            .root()
            .descendants()
            .filter_map(NameRef::cast)
            .last()
            .unwrap();
        let symbol = model.get_symbol(name_ref.syntax()).unwrap();
        assert_eq!(symbol.name(), "g");
        assert_eq!(model.get_expression_type(name_ref.syntax()).name(), "float");
    }

    #[test]
    fn test_member_access_at() {
        let text = "struct S { float a; }; void f() { S s; s. }";
        let model = model(text);
        let offset = offset_of(text, "s. }") + TextSize::from(2);
        assert_eq!(model.member_access_at(offset).map(Symbol::name), Some("S"));
    }

    #[test]
    fn test_unbound_node_has_unknown_type() {
        let model = model("float x;");
        let root = model.syntax_tree().root();
        assert_eq!(model.get_expression_type(&root).name(), "<unknown>");
    }
}
