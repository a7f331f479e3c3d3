//! Binding as a whole: determinism, cancellation, declared symbols.

use std::sync::Arc;

use crate::helpers::model_helpers::*;
use crate::helpers::source_fixtures::{OVERLOADS, PIXEL_SHADER, VERTEX_SHADER};
use hlsl::base::{AnalysisError, CancellationToken, FileId};
use hlsl::hir::{NoIncludes, SymbolKind, bind, bind_cancellable};
use hlsl::parser::{AstNode, Function, ParseOptions};
use hlsl::syntax::{parse, parse_cancellable};

#[test]
fn test_rebinding_is_deterministic() {
    for source in [VERTEX_SHADER, PIXEL_SHADER, OVERLOADS] {
        let tree = tree_from(source);
        let first = bind(tree.clone(), &NoIncludes);
        let second = bind(tree, &NoIncludes);

        assert_eq!(first.symbol_table(), second.symbol_table());
        assert_eq!(first.diagnostics(), second.diagnostics());
        assert_eq!(first, second);
    }
}

#[test]
fn test_cancelled_bind_returns_error() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = bind_cancellable(tree_from(VERTEX_SHADER), &NoIncludes, &cancel);
    assert!(matches!(result, Err(AnalysisError::Cancelled)));
}

#[test]
fn test_cancelled_parse_returns_error() {
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = parse_cancellable(VERTEX_SHADER, FileId::default(), &ParseOptions::default(), &cancel);
    assert!(matches!(result, Err(AnalysisError::Cancelled)));
}

#[test]
fn test_uncancelled_bind_matches_bind() {
    let cancel = CancellationToken::new();
    let tree = tree_from(PIXEL_SHADER);
    let model = bind_cancellable(tree.clone(), &NoIncludes, &cancel).unwrap();
    assert_eq!(model, bind(tree, &NoIncludes));
}

#[test]
fn test_model_is_shareable_across_threads() {
    let model = model_from(VERTEX_SHADER);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let model = model.clone();
            std::thread::spawn(move || model.diagnostics().len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 0);
    }
}

#[test]
fn test_declared_symbol_of_function() {
    let model = model_from(PIXEL_SHADER);
    let function = model
        .syntax_tree()
        .root()
        .descendants()
        .find_map(Function::cast)
        .expect("function");

    let symbol = model.get_declared_symbol(function.syntax()).expect("declared");
    assert_eq!(symbol.name(), "PSMain");
    let SymbolKind::Function(f) = symbol.kind() else {
        panic!("expected a function");
    };
    assert_eq!(f.parameters.len(), 2);
    assert_eq!(f.semantic.as_deref(), Some("SV_Target"));

    let (file, node) = model.declaration_node(symbol).expect("declaration node");
    assert_eq!(file, model.file_id());
    assert_eq!(node.text_range(), function.syntax().text_range());
}

#[test]
fn test_documentation_from_leading_comment() {
    let source = "/// Scales a value.\nfloat scale(float x) { return x * 2; }";
    let model = model_from(source);
    let symbol = model
        .lookup_symbols(offset_of(source, "return"))
        .into_iter()
        .find(|s| s.name() == "scale")
        .expect("scale");
    assert_eq!(symbol.documentation(), Some("Scales a value."));
}

#[test]
fn test_bind_never_fails_on_garbage() {
    for source in ["", "}}}", "float4 (", "struct { ;", "#if\n#else\n", "void f() { for (;;) { x = } }"] {
        let model = bind(Arc::new(parse(source, FileId::default())), &NoIncludes);
        assert_eq!(model.syntax_tree().text(), source);
    }
}

#[test]
fn test_bind_deeply_nested_input() {
    let sources = [
        format!("float x = {}1{};", "(".repeat(10_000), ")".repeat(10_000)),
        format!("void f() {{ float y = 0; {} y = 1; }}", "if (y < 1) ".repeat(10_000)),
        format!("float x = 1{};", " + 1".repeat(10_000)),
    ];
    for source in &sources {
        let model = model_from(source);
        assert_eq!(model.syntax_tree().text(), source.as_str());
        assert!(model.diagnostics().iter().any(|d| d.code == "E0903"));
    }
}

#[test]
fn test_nesting_below_the_limit_binds_cleanly() {
    let depth = 100;
    let source = format!("float x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let model = model_from(&source);
    assert_no_diagnostics(&model);
}
