//! Rowan-based lossless parser for HLSL
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! Every byte of the input, including comments, directives and inactive
//! `#if` regions, ends up in the tree, and the AST layer provides typed
//! accessors on top.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Preprocessor → directive tokens, conditionals folded into DISABLED_TEXT
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod conditional;
pub mod errors;
pub mod grammar;
mod lexer;
pub mod preprocessor;
mod syntax_kind;
pub mod trivia;

pub use ast::*;
pub use grammar::MAX_NESTING_DEPTH;
pub use errors::{ErrorCode, ParseContext, RelatedInfo, Severity, SyntaxError};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, parse, parse_cancellable, parse_with_options};
pub use preprocessor::{Defines, ParseOptions};
pub use syntax_kind::{
    HlslLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};
pub use trivia::{Trivia, TriviaKind, TriviaLex, TriviaToken, lex_with_trivia};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
