//! High-level IR (HIR): symbols, binding and the semantic model.
//!
//! ## Key Types
//!
//! - [`SymbolTable`]: every symbol of a compilation, its scopes, and the
//!   intrinsic arena it starts from
//! - [`Compilation`]: a root file with its includes, bound together
//! - [`SemanticModel`]: read-only queries over a compilation
//! - [`RootDatabase`]: salsa database memoizing parse and bind per document
//!
//! ## Layers
//!
//! ```text
//! SyntaxTree (+ includes)     ← syntax
//!     │
//!     ▼
//! binder                      ← declare, then bind bodies
//!     │
//!     ▼
//! SymbolTable + BoundTree     ← symbols, scopes, typed expressions
//!     │
//!     ▼
//! SemanticModel               ← lookup, types, diagnostics
//! ```

mod binder;
pub mod bound;
mod compilation;
pub mod conversions;
mod db;
pub mod diagnostics;
mod grouping;
pub mod intrinsics;
mod markup;
mod model;
pub mod symbols;
mod table;

pub use bound::{BoundExpr, BoundKind, BoundNode, BoundTree};
pub use compilation::{
    Compilation, FIRST_INCLUDE_FILE_ID, FsIncludeResolver, InMemoryIncludes, IncludeResolver, IncludedFile,
    MAX_INCLUDE_DEPTH, NoIncludes,
};
pub use db::{FileText, RootDatabase, Workspace, compile_file, parse_file};
pub use diagnostics::{Diagnostic, DiagnosticCollector, RelatedInfo, Severity, codes};
pub use grouping::{SymbolGroup, group_symbols};
pub use markup::symbol_markup;
pub use model::{SemanticModel, bind, bind_cancellable};
pub use symbols::{
    AttributeSymbol, DeclSite, FunctionSymbol, MacroSymbol, ObjectKind, ParameterInfo, ScalarType, SemanticSymbol,
    Shape, Symbol, SymbolId, SymbolKind, TypeKind, TypeSymbol, VariableKind, VariableSymbol,
};
pub use table::{Scope, ScopeId, ScopeKind, SymbolTable};
