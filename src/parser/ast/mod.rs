//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Accessors never fail on malformed trees; missing pieces come back as `None`.

use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

// ============================================================================
// Helper utilities
// ============================================================================

/// Check if a syntax node has a direct child token of the specified kind.
#[inline]
fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}

/// First direct child token of the given kind.
#[inline]
fn find_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// First non-trivia direct child token.
#[inline]
fn first_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| !t.kind().is_trivia())
}

/// The identifier (or keyword used as one) inside a NAME / NAME_REF.
#[inline]
fn find_name_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == SyntaxKind::IDENT || t.kind().is_keyword())
}

/// Macro to generate boolean property methods that check for a specific token kind.
macro_rules! has_token_method {
    ($name:ident, $kind:ident) => {
        #[doc = concat!("Check if this node has the `", stringify!($kind), "` token.")]
        pub fn $name(&self) -> bool {
            has_token(&self.0, SyntaxKind::$kind)
        }
    };
    ($name:ident, $kind:ident, $example:literal) => {
        #[doc = concat!("Check if this node has the `", stringify!($kind), "` token (e.g., `", $example, "`).")]
        pub fn $name(&self) -> bool {
            has_token(&self.0, SyntaxKind::$kind)
        }
    };
}

/// Macro to generate a method that finds the first child of a specific AST type.
macro_rules! first_child_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get the first `", stringify!($type), "` child of this node.")]
        pub fn $name(&self) -> Option<$type> {
            self.0.children().find_map($type::cast)
        }
    };
}

/// Macro to generate a method that returns an iterator over children of a specific AST type.
macro_rules! children_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get all `", stringify!($type), "` children of this node.")]
        pub fn $name(&self) -> impl Iterator<Item = $type> + '_ {
            self.0.children().filter_map($type::cast)
        }
    };
}

/// Macro to generate a method returning the nth child of a specific AST type.
macro_rules! nth_child_method {
    ($name:ident, $type:ident, $n:literal) => {
        #[doc = concat!("Get child `", stringify!($type), "` number ", stringify!($n), ".")]
        pub fn $name(&self) -> Option<$type> {
            self.0.children().filter_map($type::cast).nth($n)
        }
    };
}

/// Macro to generate a method that maps token kinds to enum variants.
macro_rules! token_to_enum_method {
    ($name:ident, $enum_type:ident, [$($token:ident => $variant:ident),+ $(,)?]) => {
        pub fn $name(&self) -> Option<$enum_type> {
            for token in self.0.children_with_tokens().filter_map(|e| e.into_token()) {
                match token.kind() {
                    $(SyntaxKind::$token => return Some($enum_type::$variant),)+
                    _ => {}
                }
            }
            None
        }
    };
}

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    /// Find all descendant nodes of a specific AST type
    fn descendants<T: AstNode>(&self) -> impl Iterator<Item = T> {
        self.syntax().descendants().filter_map(T::cast)
    }

    /// Comment immediately preceding this node, used as its documentation.
    fn doc_comment(&self) -> Option<String> {
        extract_doc_comment(self.syntax())
    }
}

/// Extract a doc comment from the trivia preceding a node.
///
/// Accepts one block comment or a run of consecutive line comments, separated
/// from the node only by whitespace and at most one line break each. Trivia
/// owned by an enclosing node (the first item of a file or block) is searched
/// through the first token instead.
pub fn extract_doc_comment(node: &SyntaxNode) -> Option<String> {
    let first = node.first_token()?;
    let mut comments = Vec::new();
    let mut current = first.prev_token();
    let mut newlines = 0;

    while let Some(token) = current {
        match token.kind() {
            SyntaxKind::WHITESPACE => {}
            SyntaxKind::NEWLINE => {
                newlines += 1;
                // A blank line ends the comment run
                if newlines > 1 {
                    break;
                }
            }
            SyntaxKind::BLOCK_COMMENT | SyntaxKind::LINE_COMMENT if !starts_line(&token) => break,
            SyntaxKind::BLOCK_COMMENT => {
                let content = token
                    .text()
                    .strip_prefix("/*")
                    .and_then(|s| s.strip_suffix("*/"))
                    .map(clean_doc_comment)
                    .unwrap_or_default();
                if !content.is_empty() {
                    comments.push(content);
                }
                break;
            }
            SyntaxKind::LINE_COMMENT => {
                let text = token.text();
                let content = text.trim_start_matches('/').trim();
                if !content.is_empty() {
                    comments.push(content.to_string());
                }
                newlines = 0;
            }
            _ => break,
        }
        current = token.prev_token();
    }

    if comments.is_empty() {
        return None;
    }

    // Collected bottom-up
    comments.reverse();
    Some(comments.join("\n"))
}

/// Only whitespace between the start of the line and `token`.
fn starts_line(token: &SyntaxToken) -> bool {
    let mut current = token.prev_token();
    while let Some(t) = current {
        match t.kind() {
            SyntaxKind::WHITESPACE => current = t.prev_token(),
            SyntaxKind::NEWLINE => return true,
            _ => return false,
        }
    }
    true
}

/// Remove leading asterisks and blank lines from a block comment body.
fn clean_doc_comment(s: &str) -> String {
    s.lines()
        .map(|line| {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix('*') {
                rest.trim_start().to_string()
            } else {
                trimmed.to_string()
            }
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $($kind:ident)|+) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

/// Enum over several node types, one variant per kind set.
macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident($type:ident)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant($type),)+
        }

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                $($type::can_cast(kind))||+
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                $(
                    if $type::can_cast(node.kind()) {
                        return Some(Self::$variant($type(node)));
                    }
                )+
                None
            }

            fn syntax(&self) -> &SyntaxNode {
                match self {
                    $(Self::$variant(it) => &it.0,)+
                }
            }
        }
    };
}

// ============================================================================
// Names
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        find_name_token(&self.0)
    }

    pub fn text(&self) -> Option<SmolStr> {
        self.ident_token().map(|t| SmolStr::new(t.text()))
    }
}

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn ident_token(&self) -> Option<SyntaxToken> {
        find_name_token(&self.0)
    }

    pub fn text(&self) -> Option<SmolStr> {
        self.ident_token().map(|t| SmolStr::new(t.text()))
    }
}

// Submodules, declared after macros so macro_rules! are in scope
mod declarations;
mod directives;
mod expressions;
mod statements;
mod types;

// Re-export all public types so external code sees a flat namespace
pub use self::declarations::*;
pub use self::directives::*;
pub use self::expressions::*;
pub use self::statements::*;
pub use self::types::*;

#[cfg(test)]
mod tests;
