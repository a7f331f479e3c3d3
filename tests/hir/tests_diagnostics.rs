//! Semantic diagnostics.

use rstest::rstest;

use crate::helpers::model_helpers::*;
use hlsl::hir::{Severity, codes};

// =============================================================================
// AMBIGUOUS AND UNDEFINED NAMES
// =============================================================================

#[test]
fn test_variable_and_function_sharing_a_name_is_ambiguous() {
    let source = "float4 clip;\nfloat4 f() { return clip; }";
    let model = model_from(source);

    let diagnostic = model
        .diagnostics()
        .into_iter()
        .find(|d| d.code == codes::AMBIGUOUS_REFERENCE)
        .expect("ambiguous reference");
    assert_eq!(diagnostic.range.start(), offset_of(source, "clip; }"));
    assert!(diagnostic.related.len() >= 2);
    assert!(diagnostic.related.iter().any(|r| r.message.contains("float4 clip")));
    assert!(diagnostic.related.iter().any(|r| r.message.contains("clip(")));
}

#[test]
fn test_call_of_shared_name_picks_function() {
    let source = "float4 clip;\nvoid f() { clip(1.0); }";
    let model = model_from(source);
    assert_no_diagnostics(&model);
}

#[test]
fn test_undefined_reference() {
    let source = "float f() { return missing; }";
    let model = model_from(source);

    let errors = errors(&model);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, codes::UNDEFINED_REFERENCE);
    assert!(errors[0].message.contains("missing"));
}

#[test]
fn test_duplicate_definition() {
    let source = "float x;\nint x;";
    let model = model_from(source);
    assert_has_code(&model, codes::DUPLICATE_DEFINITION);
}

#[test]
fn test_redeclared_function_prototype_is_not_duplicate() {
    let source = "float f(float x);\nfloat f(float x) { return x; }\nfloat g() { return f(1.0); }";
    let model = model_from(source);
    assert_no_diagnostics(&model);
}

// =============================================================================
// TYPING ERRORS
// =============================================================================

#[rstest]
#[case::struct_to_float("struct S { float a; };\nvoid f() { S s; float x = s; }", codes::TYPE_MISMATCH)]
#[case::bad_swizzle("void f() { float2 v = 0; float x = v.z; }", codes::INVALID_MEMBER)]
#[case::missing_field("struct S { float a; };\nvoid f() { S s; float x = s.b; }", codes::INVALID_MEMBER)]
#[case::component_count("void f() { float4 v = float4(1, 2, 3); }", codes::COMPONENT_COUNT)]
#[case::assign_to_literal("void f() { 1 = 2; }", codes::NOT_ASSIGNABLE)]
#[case::assign_to_const("void f() { const float c = 1; c = 2; }", codes::NOT_ASSIGNABLE)]
#[case::break_outside_loop("void f() { break; }", codes::MISPLACED_JUMP)]
#[case::return_value_from_void("void f() { return 1; }", codes::RETURN_MISMATCH)]
#[case::missing_return_value("float f() { return; }", codes::RETURN_MISMATCH)]
#[case::call_variable("float x;\nvoid f() { x(1); }", codes::NOT_INVOCABLE)]
#[case::index_scalar("void f() { float x = 0; float y = x[0]; }", codes::NOT_INDEXABLE)]
#[case::struct_condition("struct S { float a; };\nvoid f() { S s; if (s) { } }", codes::INVALID_CONDITION)]
fn test_semantic_error(#[case] source: &str, #[case] code: &str) {
    let model = model_from(source);
    assert_has_code(&model, code);
}

#[test]
fn test_implicit_truncation_is_a_warning() {
    let source = "void f() { float4 v = 0; float3 t = v; }";
    let model = model_from(source);

    let diagnostics = model.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, codes::IMPLICIT_TRUNCATION);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
}

#[test]
fn test_errors_do_not_cascade() {
    let source = "float f() { float x = missing + 1; return x * missing2.y; }";
    let model = model_from(source);

    let codes: Vec<String> = codes(&model);
    assert_eq!(
        codes,
        vec![codes::UNDEFINED_REFERENCE.to_string(), codes::UNDEFINED_REFERENCE.to_string()]
    );
}

// =============================================================================
// SYNTAX + SEMANTIC MERGE
// =============================================================================

#[test]
fn test_syntax_and_semantic_diagnostics_are_merged_in_order() {
    let source = "float f() { return missing; }\nfloat g() { return 1 }";
    let model = model_from(source);

    let diagnostics = model.diagnostics();
    assert!(diagnostics.len() >= 2);
    assert_eq!(diagnostics[0].code, codes::UNDEFINED_REFERENCE);
    assert!(diagnostics[1].code.starts_with("E0"));
    assert!(
        diagnostics
            .windows(2)
            .all(|pair| pair[0].range.start() <= pair[1].range.start())
    );
}

#[test]
fn test_valid_code_has_no_diagnostics() {
    let source = r#"
        static const float PI = 3.14159;
        float area(float r) { return PI * r * r; }
        float4 main(float4 pos : SV_Position) : SV_Target
        {
            float a = area(2.0);
            float3 c = float3(a, a, a);
            c.xy = c.yx;
            [unroll] for (int i = 0; i < 2; ++i) { c *= 0.5; }
            return float4(c, 1);
        }
    "#;
    let model = model_from(source);
    assert_no_diagnostics(&model);
}
