//! Scope and lookup tests.

use crate::helpers::model_helpers::*;
use hlsl::hir::{Symbol, SymbolKind, VariableKind};

fn variable_type<'a>(model: &'a hlsl::hir::SemanticModel, symbol: &Symbol) -> &'a str {
    match symbol.kind() {
        SymbolKind::Variable(variable) => model.symbol(variable.ty).name(),
        other => panic!("expected a variable, got {:?}", other),
    }
}

#[test]
fn test_block_local_shadows_global() {
    let source = "float x;\nvoid f() { { int x; int y = 0; } }";
    let model = model_from(source);

    let symbols = model.lookup_symbols(offset_of(source, "int y"));
    let x = symbols.iter().find(|s| s.name() == "x").expect("x visible");
    assert_eq!(variable_type(&model, x), "int");
    assert_eq!(symbols.iter().filter(|s| s.name() == "x").count(), 1);
}

#[test]
fn test_global_visible_outside_block() {
    let source = "float x;\nvoid f() { { int x; } int after = 0; }";
    let model = model_from(source);

    let symbols = model.lookup_symbols(offset_of(source, "int after"));
    let x = symbols.iter().find(|s| s.name() == "x").expect("x visible");
    assert_eq!(variable_type(&model, x), "float");
}

#[test]
fn test_locals_declared_later_are_not_visible() {
    let source = "void f() { int early = 0; float late = 1; }";
    let model = model_from(source);

    let symbols = model.lookup_symbols(offset_of(source, "float late"));
    assert!(symbols.iter().any(|s| s.name() == "early"));
    assert!(!symbols.iter().any(|s| s.name() == "late"));
}

#[test]
fn test_parameters_visible_in_body() {
    let source = "float f(float a, int b) { return a; }";
    let model = model_from(source);

    let symbols = model.lookup_symbols(offset_of(source, "return"));
    let a = symbols.iter().find(|s| s.name() == "a").expect("a visible");
    assert!(matches!(
        a.kind(),
        SymbolKind::Variable(v) if matches!(v.kind, VariableKind::Parameter(_))
    ));
    assert!(symbols.iter().any(|s| s.name() == "b"));
}

#[test]
fn test_innermost_scope_first() {
    let source = "float g;\nvoid f(float p) { float l = 0; return; }";
    let model = model_from(source);

    let symbols = model.lookup_symbols(offset_of(source, "return"));
    let position = |name: &str| symbols.iter().position(|s| s.name() == name).unwrap();
    assert!(position("l") < position("p"));
    assert!(position("p") < position("g"));
}

#[test]
fn test_intrinsics_are_visible() {
    let source = "void f() { return; }";
    let model = model_from(source);

    let symbols = model.lookup_symbols(offset_of(source, "return"));
    assert!(symbols.iter().any(|s| s.name() == "saturate"));
    assert!(symbols.iter().any(|s| s.name() == "float4"));
}

#[test]
fn test_for_loop_variable_scoped_to_loop() {
    let source = "void f() { for (int i = 0; i < 4; i++) { int body = i; } int after = 0; }";
    let model = model_from(source);

    assert!(model.lookup_symbols(offset_of(source, "int body")).iter().any(|s| s.name() == "i"));
    assert!(!model.lookup_symbols(offset_of(source, "int after")).iter().any(|s| s.name() == "i"));
    assert_no_diagnostics(&model);
}

#[test]
fn test_struct_fields_are_not_global() {
    let source = "struct S { float field; };\nvoid f() { return; }";
    let model = model_from(source);

    let symbols = model.lookup_symbols(offset_of(source, "return"));
    assert!(symbols.iter().any(|s| s.name() == "S"));
    assert!(!symbols.iter().any(|s| s.name() == "field"));
}

#[test]
fn test_cbuffer_fields_are_global() {
    let source = "cbuffer Globals { float4 Tint; };\nfloat4 f() { return Tint; }";
    let model = model_from(source);

    let symbols = model.lookup_symbols(offset_of(source, "return"));
    assert!(symbols.iter().any(|s| s.name() == "Tint"));
    assert_no_diagnostics(&model);
}
