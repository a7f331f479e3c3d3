use super::*;
use crate::parser::parse;

fn source_file(text: &str) -> SourceFile {
    let parsed = parse(text);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    SourceFile::cast(parsed.syntax()).unwrap()
}

#[test]
fn test_ast_global_variable() {
    let root = source_file("static const float4 tint : COLOR = float4(1, 0, 0, 1), other;");
    let items: Vec<_> = root.items().collect();
    assert_eq!(items.len(), 1);

    let Item::Variables(statement) = &items[0] else {
        panic!("expected variables");
    };
    let declaration = statement.declaration().unwrap();
    assert!(declaration.is_static());
    assert!(declaration.is_const());
    assert_eq!(declaration.modifiers(), vec![SyntaxKind::STATIC_KW, SyntaxKind::CONST_KW]);

    let Some(Type::Predefined(ty)) = declaration.ty() else {
        panic!("expected predefined type");
    };
    assert_eq!(ty.name().as_deref(), Some("float4"));

    let declarators: Vec<_> = declaration.declarators().collect();
    assert_eq!(declarators.len(), 2);
    assert_eq!(declarators[0].name().unwrap().text().as_deref(), Some("tint"));
    assert_eq!(declarators[0].semantic().unwrap().text().as_deref(), Some("COLOR"));
    assert!(matches!(
        declarators[0].initializer().unwrap().value(),
        Some(Expr::NumericConstructor(_))
    ));
    assert!(declarators[1].initializer().is_none());
}

#[test]
fn test_ast_function() {
    let root = source_file(
        "[numthreads(8, 1, 1)]\nvoid main(in uint3 id : SV_DispatchThreadID, inout float acc, out float r) { r = acc; }",
    );
    let Some(Item::Function(function)) = root.items().next() else {
        panic!("expected function");
    };
    assert!(function.is_definition());
    assert_eq!(function.name().unwrap().text().as_deref(), Some("main"));
    assert_eq!(function.attributes().count(), 1);

    let directions: Vec<_> = function.parameters().map(|p| p.direction()).collect();
    assert_eq!(
        directions,
        vec![ParameterDirection::In, ParameterDirection::InOut, ParameterDirection::Out]
    );
    assert_eq!(function.body().unwrap().statements().count(), 1);
}

#[test]
fn test_ast_struct_and_members() {
    let root = source_file("struct Light : Base { float3 dir; float3 Shade(float3 n) { return n; } };");
    let Some(Item::TypeDeclaration(decl)) = root.items().next() else {
        panic!("expected struct");
    };
    let strukt = decl.struct_type().unwrap();
    assert_eq!(strukt.name().unwrap().text().as_deref(), Some("Light"));
    assert_eq!(strukt.base().unwrap().text().as_deref(), Some("Base"));
    assert!(strukt.reference().is_none());

    let members: Vec<_> = strukt.field_list().unwrap().members().collect();
    assert!(matches!(members[0], Item::Variables(_)));
    assert!(matches!(members[1], Item::Function(_)));
}

#[test]
fn test_ast_expressions() {
    let root = source_file("float x = a.b[2] + -c * tex.Sample(s, uv).r;");
    let expr = root
        .descendants::<EqualsValueClause>()
        .next()
        .and_then(|c| c.value())
        .unwrap();
    let Expr::Binary(binary) = expr else {
        panic!("expected binary");
    };
    assert_eq!(binary.op_kind(), Some(SyntaxKind::PLUS));
    assert!(matches!(binary.lhs(), Some(Expr::ElementAccess(_))));
    let Some(Expr::Binary(product)) = binary.rhs() else {
        panic!("expected product");
    };
    assert!(matches!(product.lhs(), Some(Expr::PrefixUnary(_))));
    assert!(matches!(product.rhs(), Some(Expr::FieldAccess(_))));
}

#[test]
fn test_ast_for_sections() {
    let root = source_file("void f() { int i; for (i = 0; i < 4; i++) {} }");
    let for_stmt = root.descendants::<ForStatement>().next().unwrap();
    assert!(for_stmt.declaration().is_none());
    assert!(matches!(for_stmt.initializer(), Some(Expr::Assignment(_))));
    assert!(matches!(for_stmt.condition(), Some(Expr::Binary(_))));
    assert!(matches!(for_stmt.increment(), Some(Expr::PostfixUnary(_))));
    assert!(matches!(for_stmt.body(), Some(Stmt::Block(_))));
}

#[test]
fn test_ast_define_directive() {
    let root = source_file("#define MUL(a, b) ((a) * \\\n (b))\n#include <lib.hlsli>\nfloat x;");
    let directives: Vec<_> = root.descendants::<Directive>().collect();
    let Directive::Define(define) = &directives[0] else {
        panic!("expected define");
    };
    assert_eq!(define.name().unwrap().text().as_deref(), Some("MUL"));
    assert_eq!(define.parameters(), Some(vec!["a".into(), "b".into()]));
    assert_eq!(define.body_text(), "((a) *   (b))");

    let Directive::Include(include) = &directives[1] else {
        panic!("expected include");
    };
    assert_eq!(include.path(), Some(("lib.hlsli".to_string(), true)));
}

#[test]
fn test_doc_comment() {
    let root = source_file("float a; // trailing\n// Light direction\n// in world space\nfloat3 dir;");
    let items: Vec<_> = root.items().collect();
    assert_eq!(items[0].doc_comment(), None);
    assert_eq!(
        items[1].doc_comment().as_deref(),
        Some("Light direction\nin world space")
    );
}
