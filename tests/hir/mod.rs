//! HIR layer tests
//!
//! Tests for binding and the semantic model:
//! - Scopes and symbol lookup
//! - Overload grouping and call resolution
//! - Expression typing
//! - Semantic diagnostics
//! - Include resolution
//! - The zero-diagnostic shader corpus

pub mod tests_binding;
pub mod tests_corpus;
pub mod tests_diagnostics;
pub mod tests_includes;
pub mod tests_overloads;
pub mod tests_scopes;
pub mod tests_types;
