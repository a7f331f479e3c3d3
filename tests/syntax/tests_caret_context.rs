//! Caret-context predicates, asked through the semantic model.

use rstest::rstest;

use hlsl::TextSize;

use crate::helpers::model_helpers::model_from;

const SHADER: &str = r#"
// Samples the albedo
Texture2D<float4> Albedo : register(t0);
static const float Gamma = 2.2;
#define USE_GAMMA 1

struct PSInput
{
    float4 position : SV_Position;
    float2 uv : TEXCOORD0;
};

float4 PSMain(PSInput input) : SV_Target
{
    float4 color = 0;
    return color;
}
"#;

/// Offset in `SHADER` of `needle`, moved `delta` bytes.
fn caret(needle: &str, delta: u32) -> TextSize {
    let index = SHADER.find(needle).unwrap_or_else(|| panic!("'{}' not found", needle));
    TextSize::from(index as u32 + delta)
}

#[rstest]
#[case::comment("Samples", 3, true)]
#[case::code("Texture2D", 3, false)]
fn test_in_comment(#[case] needle: &str, #[case] delta: u32, #[case] expected: bool) {
    let model = model_from(SHADER);
    assert_eq!(model.in_comment(caret(needle, delta)), expected);
}

#[rstest]
#[case::float("2.2", 1, true)]
#[case::name("Gamma", 1, false)]
fn test_in_literal(#[case] needle: &str, #[case] delta: u32, #[case] expected: bool) {
    let model = model_from(SHADER);
    assert_eq!(model.in_literal(caret(needle, delta)), expected);
}

#[test]
fn test_macro_context() {
    let model = model_from(SHADER);
    assert!(model.definitely_in_macro(caret("USE_GAMMA", 2)));
    assert!(model.possibly_in_macro(caret("USE_GAMMA", 2)));
    assert!(!model.definitely_in_macro(caret("Gamma =", 2)));
    assert!(!model.possibly_in_macro(caret("color = 0", 2)));
}

#[test]
fn test_semantic_qualifier_context() {
    let model = model_from(SHADER);
    assert!(model.definitely_in_variable_declarator_qualifier(caret("SV_Position", 3)));
    assert!(model.definitely_in_variable_declarator_qualifier(caret("t0", 1)));
    assert!(model.definitely_in_variable_declarator_qualifier(caret("SV_Target", 2)));
    assert!(!model.definitely_in_variable_declarator_qualifier(caret("color;", 2)));
}

#[test]
fn test_type_name_context() {
    let model = model_from(SHADER);
    assert!(model.definitely_in_type_name(caret("float4>", 2)));
    assert!(model.possibly_in_type_name(caret("float4>", 2)));
    assert!(!model.definitely_in_type_name(caret("color;", 2)));
}

#[test]
fn test_user_given_name_context() {
    let model = model_from(SHADER);
    assert!(model.possibly_in_user_given_name(caret("PSInput\n", 7)));
    assert!(model.possibly_in_user_given_name(caret("Gamma", 5)));
    assert!(!model.possibly_in_user_given_name(caret("color;", 5)));
}
