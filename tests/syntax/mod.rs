//! Syntax layer tests
//!
//! - Caret-context predicates over whole shaders
//! - Macro visibility and `#undef`

pub mod tests_caret_context;
pub mod tests_macros;
