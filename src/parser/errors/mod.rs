//! Parser error handling module
//!
//! Lexer, preprocessor and parser all report through these types:
//! - Categorized error codes for filtering and documentation
//! - Context-aware messages and recovery sets
//! - Hints and related spans (e.g., "opened here" for unclosed braces)

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{RelatedInfo, Severity, SyntaxError};
