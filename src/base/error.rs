//! Internal faults raised by the analyzer.
//!
//! User-facing problems in source text are diagnostics, never errors. The
//! variants here describe conditions where an analysis run could not produce
//! a result at all.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A cooperative cancellation request was observed.
    #[error("analysis was cancelled")]
    Cancelled,

    /// A syntax tree violated a structural invariant.
    #[error("invalid syntax tree: {0}")]
    InvalidTree(String),

    /// An include could not be loaded from disk.
    #[error("failed to read include '{path}': {message}")]
    Include { path: String, message: String },
}

impl AnalysisError {
    pub fn invalid_tree(message: impl Into<String>) -> Self {
        Self::InvalidTree(message.into())
    }

    pub fn include(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Include {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
