//! Syntax layer: parsed files and the queries that need nothing but a tree.
//!
//! - [`SyntaxTree`] - an immutable parsed file with its diagnostics
//! - [`navigation`] - tokens and nodes by offset
//! - [`predicates`] - caret-context checks used to gate editor features
//! - [`MacroTable`] - `#define` association

use std::sync::Arc;

use tracing::debug;

use crate::base::{AnalysisError, CancellationToken, FileId};
use crate::parser::{self, HlslLanguage, ParseOptions};

pub mod macros;
pub mod navigation;
pub mod predicates;
mod tree;

pub use macros::{MacroDefinition, MacroSource, MacroTable};
pub use tree::{IncludeRef, SyntaxTree};

/// Non-owning pointer to a node, resolvable against the tree it came from.
pub type NodePtr = rowan::ast::SyntaxNodePtr<HlslLanguage>;

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};

/// Parse `text` as the contents of `file_id`. Never fails.
pub fn parse(text: &str, file_id: FileId) -> SyntaxTree {
    parse_with_options(text, file_id, &ParseOptions::default())
}

/// Parse with predefined macros.
pub fn parse_with_options(text: &str, file_id: FileId, options: &ParseOptions) -> SyntaxTree {
    debug!(%file_id, len = text.len(), "parsing file");
    let parse = parser::parse_with_options(text, options);
    SyntaxTree::new(Arc::from(text), file_id, options.clone(), parse)
}

/// Parse, giving up with [`AnalysisError::Cancelled`] once `cancel` fires.
pub fn parse_cancellable(
    text: &str,
    file_id: FileId,
    options: &ParseOptions,
    cancel: &CancellationToken,
) -> Result<SyntaxTree, AnalysisError> {
    debug!(%file_id, len = text.len(), "parsing file (cancellable)");
    let parse = parser::parse_cancellable(text, options, cancel)?;
    Ok(SyntaxTree::new(Arc::from(text), file_id, options.clone(), parse))
}
