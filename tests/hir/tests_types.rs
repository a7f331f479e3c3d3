//! Expression typing: swizzles, constructors, promotion, member access.

use rstest::rstest;

use crate::helpers::model_helpers::*;
use hlsl::hir::{SymbolKind, TypeKind};
use hlsl::parser::{AstNode, EqualsValueClause, Expr};

/// Type of the initializer of the first declarator named `name`.
fn initializer_type(source: &str, name: &str) -> String {
    let model = model_from(source);
    let declarator = model
        .syntax_tree()
        .root()
        .descendants()
        .filter(|n| n.kind() == hlsl::parser::SyntaxKind::VARIABLE_DECLARATOR)
        .find(|n| {
            n.children()
                .any(|c| c.kind() == hlsl::parser::SyntaxKind::NAME && c.text() == name)
        })
        .expect("declarator");
    let value = declarator
        .children()
        .find_map(EqualsValueClause::cast)
        .and_then(|clause| clause.syntax().children().find_map(Expr::cast))
        .expect("initializer");
    model.get_expression_type(value.syntax()).name().to_string()
}

#[rstest]
#[case::swizzle_two("float4 v; float2 r = v.xy;", "float2")]
#[case::swizzle_rgba("float4 v; float3 r = v.rgb;", "float3")]
#[case::swizzle_scalar("float4 v; float r = v.w;", "float")]
#[case::swizzle_of_scalar("float s; float3 r = s.xxx;", "float3")]
#[case::matrix_member("float4x4 m; float r = m._m00;", "float")]
#[case::matrix_row("float4x4 m; float4 r = m[0];", "float4")]
#[case::vector_element("float3 v; float r = v[1];", "float")]
#[case::array_element("float a[4]; float r = a[2];", "float")]
#[case::constructor("float4 r = float4(1, 2, 3, 4);", "float4")]
#[case::constructor_mixed("float2 xy; float4 r = float4(xy, 0, 1);", "float4")]
#[case::int_promotes("int i; float f; float r = i * f;", "float")]
#[case::vector_scalar("float3 v; float3 r = v * 2;", "float3")]
#[case::uint_literal("uint r = 1u;", "uint")]
#[case::half_literal("half r = 1.0h;", "half")]
#[case::comparison("float a; float b; bool r = a < b;", "bool")]
#[case::vector_comparison("float3 a; float3 b; bool3 r = a < b;", "bool3")]
#[case::conditional("float a; int b; bool c; float r = c ? a : b;", "float")]
#[case::cast("float f; int r = (int)f;", "int")]
fn test_expression_type(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(initializer_type(source, "r"), expected);
    assert!(errors(&model_from(source)).is_empty());
}

#[test]
fn test_struct_field_access() {
    let source = "struct Light { float3 color; float intensity; };\nLight light;\nfloat3 r = light.color * light.intensity;";
    assert_eq!(initializer_type(source, "r"), "float3");
    assert_no_diagnostics(&model_from(source));
}

#[test]
fn test_inherited_struct_field() {
    let source = "struct Base { float a; };\nstruct Derived : Base { float b; };\nDerived d;\nfloat r = d.a + d.b;";
    assert_eq!(initializer_type(source, "r"), "float");
    assert_no_diagnostics(&model_from(source));
}

#[test]
fn test_typedef_resolves_to_target() {
    let source = "typedef float3 Color;\nColor c;\nfloat r = c.r;";
    assert_eq!(initializer_type(source, "r"), "float");
    assert_no_diagnostics(&model_from(source));
}

#[test]
fn test_object_element_type() {
    let source = "StructuredBuffer<float4> buffer;\nfloat4 r = buffer[0];";
    assert_eq!(initializer_type(source, "r"), "float4");
    assert_no_diagnostics(&model_from(source));
}

#[test]
fn test_rw_texture_element_is_assignable() {
    let source = "RWTexture2D<float4> output;\n[numthreads(8, 8, 1)]\nvoid main(uint3 id : SV_DispatchThreadID) { output[id.xy] = float4(1, 0, 0, 1); }";
    assert_no_diagnostics(&model_from(source));
}

#[test]
fn test_read_only_texture_element_is_not_assignable() {
    let source = "Texture2D<float4> input;\nvoid main(uint2 id) { input[id] = 0; }";
    assert_has_code(&model_from(source), hlsl::hir::codes::NOT_ASSIGNABLE);
}

#[test]
fn test_unbound_node_is_unknown() {
    let source = "float x;";
    let model = model_from(source);
    let root = model.syntax_tree().root();
    let ty = model.get_expression_type(&root);
    assert_eq!(ty.name(), "<unknown>");
    assert!(matches!(ty.kind(), SymbolKind::Type(t) if t.kind == TypeKind::Unknown));
}

#[test]
fn test_name_ref_has_type_of_its_expression() {
    let source = "struct Light { float3 color; };\nLight light;\nfloat3 r = light.color;";
    let model = model_from(source);
    let types: Vec<(String, String)> = model
        .syntax_tree()
        .root()
        .descendants()
        .filter(|n| n.kind() == hlsl::parser::SyntaxKind::NAME_REF)
        .filter(|n| n.text_range().start() >= offset_of(source, "light.color"))
        .map(|n| (n.text().to_string(), model.get_expression_type(&n).name().to_string()))
        .collect();
    assert_eq!(
        types,
        vec![
            ("light".to_string(), "Light".to_string()),
            ("color".to_string(), "float3".to_string()),
        ]
    );
}
