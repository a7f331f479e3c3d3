//! Helpers for building semantic models from source text.

use std::sync::Arc;

use hlsl::base::{FileId, TextSize};
use hlsl::hir::{Diagnostic, NoIncludes, SemanticModel, Severity, bind};
use hlsl::syntax::{SyntaxTree, parse};

/// Parses `source` as file 0.
pub fn tree_from(source: &str) -> Arc<SyntaxTree> {
    Arc::new(parse(source, FileId::default()))
}

/// Parses and binds `source` with no include resolution.
pub fn model_from(source: &str) -> SemanticModel {
    bind(tree_from(source), &NoIncludes)
}

/// Offset of the first occurrence of `needle`.
pub fn offset_of(source: &str, needle: &str) -> TextSize {
    let index = source
        .find(needle)
        .unwrap_or_else(|| panic!("'{}' not found in source", needle));
    TextSize::from(index as u32)
}

/// Offset just past the first occurrence of `needle`.
pub fn offset_after(source: &str, needle: &str) -> TextSize {
    offset_of(source, needle) + TextSize::of(needle)
}

pub fn errors(model: &SemanticModel) -> Vec<Diagnostic> {
    model
        .diagnostics()
        .into_iter()
        .filter(|d| d.severity == Severity::Error)
        .collect()
}

pub fn codes(model: &SemanticModel) -> Vec<String> {
    model.diagnostics().into_iter().map(|d| d.code).collect()
}

pub fn assert_no_diagnostics(model: &SemanticModel) {
    let diagnostics = model.diagnostics();
    assert!(
        diagnostics.is_empty(),
        "expected no diagnostics, got: {:#?}",
        diagnostics
    );
}

/// Asserts that some diagnostic carries `code`.
pub fn assert_has_code(model: &SemanticModel, code: &str) {
    let diagnostics = model.diagnostics();
    assert!(
        diagnostics.iter().any(|d| d.code == code),
        "expected a {} diagnostic, got: {:#?}",
        code,
        diagnostics
    );
}
