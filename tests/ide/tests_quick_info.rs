//! Hover over realistic shaders.

use rstest::rstest;

use hlsl::ide::{AnalysisHost, quick_info};

use crate::helpers::model_helpers::*;
use crate::helpers::source_fixtures::{MACROS, OVERLOADS, PIXEL_SHADER, VERTEX_SHADER};

fn markup_at(source: &str, needle: &str) -> Option<String> {
    let model = model_from(source);
    quick_info(&model, offset_of(source, needle)).map(|info| info.markup)
}

#[rstest]
#[case::struct_type(VERTEX_SHADER, "VSInput input", "struct VSInput")]
#[case::parameter(VERTEX_SHADER, "input.uv", "(parameter) VSInput input")]
#[case::local(VERTEX_SHADER, "output.uv", "(local variable) PSInput output")]
#[case::entry_point(PIXEL_SHADER, "PSMain", "float4 PSMain(float4 position, float2 uv) : SV_Target")]
#[case::function_like_macro(MACROS, "SQUARE(v)", "#define SQUARE(x) ((x) * (x))")]
#[case::object_macro(MACROS, "SCALE;", "#define SCALE 2.0")]
fn test_hover_markup(#[case] source: &str, #[case] needle: &str, #[case] expected: &str) {
    assert_eq!(markup_at(source, needle).as_deref(), Some(expected));
}

#[test]
fn test_hover_constant_buffer_variable() {
    let markup = markup_at(VERTEX_SHADER, "WorldViewProj);").expect("quick info");
    assert!(markup.starts_with("(constant buffer variable) float4x4"), "{}", markup);
    assert!(markup.ends_with("WorldViewProj"), "{}", markup);
}

#[test]
fn test_hover_method_shows_object_signature() {
    let markup = markup_at(PIXEL_SHADER, "Sample(").expect("quick info");
    assert!(markup.starts_with("float4 "), "{}", markup);
    assert!(markup.contains(".Sample(SamplerState"), "{}", markup);
}

#[test]
fn test_hover_intrinsic_has_documentation() {
    let source = "float f(float3 a, float3 b) { return dot(a, b); }";
    let model = model_from(source);
    let info = quick_info(&model, offset_of(source, "dot")).expect("quick info");
    assert_eq!(info.markup, "float dot(float3 x, float3 y)");
    assert!(info.documentation.is_some());
    assert_eq!(info.symbols.len(), 1);
}

#[test]
fn test_hover_range_covers_name() {
    let model = model_from(OVERLOADS);
    let offset = offset_of(OVERLOADS, "foo(1, 2)");
    let info = quick_info(&model, offset).expect("quick info");
    assert_eq!(info.range.start(), offset);
    assert_eq!(u32::from(info.range.len()), 3);
    assert_eq!(info.markup, "int foo(int x, int y)");
}

#[test]
fn test_hover_through_host() {
    let mut host = AnalysisHost::new();
    host.set_file_content("ps.hlsl", PIXEL_SHADER);
    let info = host
        .analysis()
        .quick_info("ps.hlsl", offset_of(PIXEL_SHADER, "color;"))
        .expect("quick info");
    assert_eq!(info.markup, "(local variable) float4 color");
}

#[test]
fn test_no_hover_in_comment() {
    let source = "// float x\nfloat y;";
    assert_eq!(markup_at(source, "x\n"), None);
}
