//! Overload grouping and call resolution.

use rstest::rstest;

use crate::helpers::model_helpers::*;
use crate::helpers::source_fixtures::OVERLOADS;
use hlsl::hir::{SymbolGroup, SymbolKind, codes, group_symbols};
use hlsl::parser::{AstNode, FunctionInvocationExpr, NameRef};

fn call_at(model: &hlsl::hir::SemanticModel, offset: hlsl::TextSize) -> FunctionInvocationExpr {
    model
        .syntax_tree()
        .root()
        .descendants()
        .filter_map(FunctionInvocationExpr::cast)
        .filter(|call| call.syntax().text_range().contains(offset))
        .last()
        .expect("call at offset")
}

#[test]
fn test_three_overloads_group_into_one_entry() {
    let model = model_from(OVERLOADS);
    let table = model.symbol_table();

    let foos: Vec<_> = model
        .lookup_symbols(offset_of(OVERLOADS, "float a"))
        .into_iter()
        .filter(|s| s.name() == "foo")
        .map(|s| s.id())
        .collect();
    assert_eq!(foos.len(), 3);

    let groups = group_symbols(table, &foos);
    assert_eq!(groups.len(), 1);
    assert!(matches!(&groups[0], SymbolGroup::Overloads { additional, .. } if additional.len() == 2));
    assert!(groups[0].description(table).contains("(+ 2 more overloads)"));
}

#[rstest]
#[case("foo(1.0f)", "float foo(float x)")]
#[case("foo(1, 2)", "int foo(int x, int y)")]
#[case("foo(float3(1, 2, 3))", "float3 foo(float3 v)")]
fn test_call_resolves_single_overload(#[case] call: &str, #[case] expected: &str) {
    let model = model_from(OVERLOADS);
    let call = call_at(&model, offset_of(OVERLOADS, call));

    let symbol = model.get_symbol(call.syntax()).expect("resolved overload");
    assert_eq!(hlsl::hir::symbol_markup(model.symbol_table(), symbol), expected);
    assert_no_diagnostics(&model);
}

#[test]
fn test_literal_argument_prefers_closest_overload() {
    let source = "float f(float x) { return x; }\nint f(int x) { return x; }\nvoid main() { int r = f(1); }";
    let model = model_from(source);
    let call = call_at(&model, offset_of(source, "f(1)"));

    let symbol = model.get_symbol(call.syntax()).expect("resolved overload");
    let function = symbol.as_function().expect("function");
    assert_eq!(model.symbol(function.return_type).name(), "int");
    assert_no_diagnostics(&model);
}

#[test]
fn test_no_matching_overload() {
    let source = "struct S { float a; };\nfloat f(float x) { return x; }\nvoid main() { S s; f(s); }";
    let model = model_from(source);
    assert_has_code(&model, codes::NO_MATCHING_OVERLOAD);
}

#[test]
fn test_ambiguous_call_lists_candidates() {
    let source = "void f(int a, uint b) {}\nvoid f(uint a, int b) {}\nvoid main() { uint u = 1; int i = 1; f(u, u); }";
    let model = model_from(source);

    let diagnostic = model
        .diagnostics()
        .into_iter()
        .find(|d| d.code == codes::AMBIGUOUS_REFERENCE)
        .expect("ambiguous call");
    assert_eq!(diagnostic.related.len(), 2);

    let call = call_at(&model, offset_of(source, "f(u, u)"));
    assert!(model.get_symbol(call.syntax()).is_none());
    assert_eq!(model.get_candidate_symbols(call.syntax()).len(), 2);
}

#[test]
fn test_overload_set_outside_call_is_unresolved() {
    let source = "float scale(float x) { return x; }\nint scale(int x) { return x; }\nvoid main() { scale; }";
    let model = model_from(source);
    let name_ref = model
        .syntax_tree()
        .root()
        .descendants()
        .filter_map(NameRef::cast)
        .last()
        .expect("name");

    assert_eq!(name_ref.syntax().text().to_string(), "scale");
    assert!(model.get_symbol(name_ref.syntax()).is_none());
    let candidates = model.get_candidate_symbols(name_ref.syntax());
    assert_eq!(candidates.len(), 2);
    assert!(candidates.iter().all(|s| s.name() == "scale"));
    assert_no_diagnostics(&model);
}

#[test]
fn test_intrinsic_call_types() {
    let source = "float3 n;\nfloat f() { return dot(normalize(n), float3(0, 1, 0)); }";
    let model = model_from(source);
    let call = call_at(&model, offset_of(source, "dot("));

    assert_eq!(model.get_expression_type(call.syntax()).name(), "float");
    let symbol = model.get_symbol(call.syntax()).expect("intrinsic");
    assert!(matches!(symbol.kind(), SymbolKind::Function(f) if f.is_intrinsic));
    assert_no_diagnostics(&model);
}

#[test]
fn test_method_call_resolves_against_object_type() {
    let source = "Texture2D<float4> tex;\nSamplerState samp;\nfloat4 f(float2 uv) { return tex.Sample(samp, uv); }";
    let model = model_from(source);
    assert_no_diagnostics(&model);

    let call = model
        .syntax_tree()
        .root()
        .descendants()
        .find(|n| n.kind() == hlsl::parser::SyntaxKind::METHOD_INVOCATION_EXPR)
        .expect("method call");
    assert_eq!(model.get_expression_type(&call).name(), "float4");
    let symbol = model.get_symbol(&call).expect("Sample");
    assert_eq!(symbol.name(), "Sample");
}
