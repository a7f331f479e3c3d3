//! The bound tree: semantic counterparts of syntax nodes.
//!
//! Nodes live in an arena and are looked up by the syntax node they were
//! bound from. Included files share the arena, keyed by their [`FileId`].

use rustc_hash::FxHashMap;

use crate::base::FileId;
use crate::parser::SyntaxNode;
use crate::syntax::NodePtr;

use super::symbols::SymbolId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundNodeId(u32);

/// A bound expression. `ty` is always set, to the unknown or error type
/// when nothing better is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundExpr {
    pub ty: SymbolId,
    pub symbol: Option<SymbolId>,
    /// Every symbol the name could refer to, when there was a choice.
    pub candidates: Vec<SymbolId>,
    pub is_lvalue: bool,
}

impl BoundExpr {
    pub fn new(ty: SymbolId) -> Self {
        Self {
            ty,
            symbol: None,
            candidates: Vec::new(),
            is_lvalue: false,
        }
    }

    pub fn with_symbol(mut self, symbol: Option<SymbolId>) -> Self {
        self.symbol = symbol;
        self
    }

    pub fn with_candidates(mut self, candidates: Vec<SymbolId>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn lvalue(mut self) -> Self {
        self.is_lvalue = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundKind {
    Expr(BoundExpr),
    /// A statement that was checked. Statements carry no symbol.
    Stmt,
    /// The `NAME` of a declaration.
    Declaration { symbol: SymbolId },
    /// A type as written in source.
    TypeRef { ty: SymbolId },
    /// A `NAME_REF` outside an expression: a field name, a called function,
    /// a named type.
    Reference {
        symbol: Option<SymbolId>,
        candidates: Vec<SymbolId>,
    },
    Attribute { symbol: Option<SymbolId> },
    Semantic { symbol: SymbolId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundNode {
    pub file: FileId,
    pub syntax: NodePtr,
    pub kind: BoundKind,
}

impl BoundNode {
    /// The symbol this node names or refers to.
    pub fn symbol(&self) -> Option<SymbolId> {
        match &self.kind {
            BoundKind::Expr(expr) => expr.symbol,
            BoundKind::Declaration { symbol } | BoundKind::Semantic { symbol } => Some(*symbol),
            BoundKind::TypeRef { ty } => Some(*ty),
            BoundKind::Reference { symbol, .. } | BoundKind::Attribute { symbol } => *symbol,
            BoundKind::Stmt => None,
        }
    }

    /// All candidates for an ambiguous reference; the bound symbol otherwise.
    pub fn candidates(&self) -> Vec<SymbolId> {
        match &self.kind {
            BoundKind::Expr(BoundExpr { candidates, .. }) | BoundKind::Reference { candidates, .. }
                if !candidates.is_empty() =>
            {
                candidates.clone()
            }
            _ => self.symbol().into_iter().collect(),
        }
    }

    pub fn as_expr(&self) -> Option<&BoundExpr> {
        match &self.kind {
            BoundKind::Expr(expr) => Some(expr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundTree {
    nodes: Vec<BoundNode>,
    by_syntax: FxHashMap<(FileId, NodePtr), BoundNodeId>,
}

impl BoundTree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: BoundNodeId) -> Option<&BoundNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundNode> {
        self.nodes.iter()
    }

    /// The bound counterpart of `node` in `file`.
    pub fn node(&self, file: FileId, node: &SyntaxNode) -> Option<&BoundNode> {
        let id = self.by_syntax.get(&(file, NodePtr::new(node)))?;
        self.get(*id)
    }

    /// Record a binding. Binding the same syntax again replaces it.
    pub(crate) fn insert(&mut self, file: FileId, node: &SyntaxNode, kind: BoundKind) -> BoundNodeId {
        let syntax = NodePtr::new(node);
        if let Some(&id) = self.by_syntax.get(&(file, syntax.clone())) {
            self.nodes[id.0 as usize].kind = kind;
            return id;
        }
        let id = BoundNodeId(self.nodes.len() as u32);
        self.nodes.push(BoundNode {
            file,
            syntax: syntax.clone(),
            kind,
        });
        self.by_syntax.insert((file, syntax), id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{AstNode, SourceFile};
    use crate::syntax::parse;

    #[test]
    fn test_insert_replaces_existing_binding() {
        let tree = parse("int x;", FileId::default());
        let root = tree.root();
        let node = SourceFile::cast(root.clone()).unwrap().syntax().clone();

        let mut bound = BoundTree::default();
        let first = bound.insert(FileId::default(), &node, BoundKind::Stmt);
        let symbol = SymbolId::new(7);
        let second = bound.insert(FileId::default(), &node, BoundKind::Declaration { symbol });
        assert_eq!(first, second);
        assert_eq!(bound.len(), 1);
        assert_eq!(bound.node(FileId::default(), &node).unwrap().symbol(), Some(symbol));
        assert!(bound.node(FileId::new(1), &node).is_none());
    }
}
