//! Parser tests
//!
//! - Lossless round-trips over valid and broken input
//! - Error recovery
//! - Conditional compilation and directives

pub mod tests_lossless;
pub mod tests_preprocessor;
