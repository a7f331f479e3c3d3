//! Foundation types for the HLSL toolchain.
//!
//! This module provides fundamental types used throughout the analyzer:
//! - [`FileId`] - Opaque file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Position`], [`Span`] - Line/column positions for editor features
//! - [`FileSpan`] - A range tagged with its file and root-file origin
//! - [`CancellationToken`], [`AnalysisError`] - Cooperative cancellation and internal faults
//!
//! This module has NO dependencies on other hlsl modules.

mod cancel;
mod error;
mod file_id;
mod position;
mod span;

pub use cancel::{CancellationToken, check_cancelled};
pub use error::AnalysisError;
pub use file_id::FileId;
pub use position::{Position, Span};
pub use span::{FileSpan, LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
