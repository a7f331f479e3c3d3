//! # hlsl-base
//!
//! Core library for HLSL parsing, binding and semantic queries.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → AnalysisHost document cache, quick info
//!   ↓
//! hir       → Symbols, intrinsics, binder, SemanticModel, salsa queries
//!   ↓
//! syntax    → SyntaxTree, navigation, position predicates, macro table
//!   ↓
//! parser    → Logos lexer, preprocessor conditionals, recursive-descent parser
//!   ↓
//! base      → Primitives (FileId, TextRange, LineIndex, cancellation)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax → hir → ide)
// ============================================================================

/// Foundation types: FileId, TextRange, LineIndex, cancellation
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Syntax: immutable trees, navigation, macro table
pub mod syntax;

/// High-level IR: symbol table, binder, semantic model
pub mod hir;

/// IDE features: document cache, quick info
pub mod ide;

// Re-export foundation types
pub use base::{AnalysisError, CancellationToken, FileId, LineCol, LineIndex, Position, Span, TextRange, TextSize};
