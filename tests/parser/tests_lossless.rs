//! The tree always reproduces its input, whatever the input is.

use rstest::rstest;

use hlsl::base::FileId;
use hlsl::parser::{ErrorCode, SyntaxKind, parse};
use hlsl::syntax;

use crate::helpers::source_fixtures::{MACROS, OVERLOADS, PIXEL_SHADER, VERTEX_SHADER};

#[rstest]
#[case::vertex(VERTEX_SHADER)]
#[case::pixel(PIXEL_SHADER)]
#[case::overloads(OVERLOADS)]
#[case::macros(MACROS)]
#[case::empty("")]
#[case::whitespace_only("  \n\t\r\n")]
#[case::comments_only("// a\n/* b */\n/// c")]
#[case::crlf("float x;\r\nfloat y;\r\n")]
#[case::unterminated_comment("float x; /* never closed")]
#[case::unterminated_string("#include \"open")]
#[case::stray_braces("}}} float {{{")]
#[case::missing_semicolon("float4 main() { return 1 }")]
#[case::half_expression("void f() { float x = 1 + ; }")]
#[case::bad_characters("float @ x $ = ` 1;")]
#[case::unbalanced_conditional("#if 1\nfloat x;\n")]
#[case::orphan_endif("#endif\nfloat x;")]
#[case::unicode("// héllo wörld\nfloat x; // ∑")]
fn test_round_trip(#[case] source: &str) {
    let parse = parse(source);
    assert_eq!(parse.syntax().to_string(), source);

    let tree = syntax::parse(source, FileId::default());
    assert_eq!(tree.root().to_string(), source);
    assert!(tree.validate().is_ok());
}

#[test]
fn test_valid_shaders_parse_cleanly() {
    for source in [VERTEX_SHADER, PIXEL_SHADER, OVERLOADS, MACROS] {
        let parse = parse(source);
        assert!(parse.ok(), "{:#?}", parse.errors);
    }
}

#[test]
fn test_error_ranges_lie_within_input() {
    let source = "struct S { float a float b; };\nvoid f( { x = ; }\n#bogus\n";
    let tree = syntax::parse(source, FileId::default());
    assert!(tree.has_errors());
    for error in tree.diagnostics() {
        assert!(error.range.end() <= tree.len(), "{:?}", error);
    }
}

#[test]
fn test_recovery_keeps_following_declarations() {
    let source = "float broken = ;\nfloat4 main() : SV_Target { return 0; }";
    let tree = syntax::parse(source, FileId::default());
    assert!(tree.has_errors());
    assert!(
        tree.root()
            .descendants()
            .any(|n| n.kind() == SyntaxKind::FUNCTION_DEFINITION)
    );
}

#[test]
fn test_lexical_error_codes() {
    let tree = syntax::parse("float x; /* open", FileId::default());
    assert!(tree.diagnostics().iter().any(|e| e.code == ErrorCode::E0103));
}

#[test]
fn test_moderate_nesting_is_accepted() {
    let depth = 64;
    let source = format!("float x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let tree = syntax::parse(&source, FileId::default());
    assert_eq!(tree.root().to_string(), source);
    assert!(!tree.has_errors());
}

fn assert_too_deep(source: &str) {
    let tree = syntax::parse(source, FileId::default());
    assert_eq!(tree.root().to_string(), source);
    assert!(tree.validate().is_ok());
    assert!(tree.diagnostics().iter().any(|e| e.code == ErrorCode::E0903));
}

#[rstest]
#[case::parentheses(format!("float x = {}1{};", "(".repeat(10_000), ")".repeat(10_000)))]
#[case::unclosed_parentheses(format!("float x = {}1;", "(".repeat(10_000)))]
#[case::blocks(format!("void f() {}", "{".repeat(20_000)))]
#[case::closed_blocks(format!("void f() {}{}", "{".repeat(10_000), "}".repeat(10_000)))]
#[case::nested_ifs(format!("void f() {{ {} return; }}", "if (true) ".repeat(10_000)))]
#[case::prefix_operators(format!("float x = {}1;", "-".repeat(10_000)))]
#[case::casts(format!("float x = {}1;", "(float)".repeat(10_000)))]
#[case::binary_chain(format!("float x = 1{};", " + 1".repeat(10_000)))]
#[case::conditional_chain(format!("float x = {}1;", "c ? 1 : ".repeat(10_000)))]
#[case::member_chain(format!("float x = v{};", ".x".repeat(10_000)))]
#[case::initializers(format!("float x[1] = {};", "{".repeat(10_000)))]
#[case::templates(format!("{}float{} x;", "vector<".repeat(10_000), ", 4>".repeat(10_000)))]
fn test_deeply_nested_input_terminates(#[case] source: String) {
    assert_too_deep(&source);
}
