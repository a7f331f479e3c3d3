//! Conditional compilation and directive structure.

use hlsl::base::FileId;
use hlsl::parser::{ErrorCode, ParseOptions, SyntaxKind};
use hlsl::syntax::{parse, parse_with_options};

fn disabled_text(source: &str, options: &ParseOptions) -> Vec<String> {
    parse_with_options(source, FileId::default(), options)
        .root()
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::DISABLED_TEXT)
        .map(|token| token.text().to_string())
        .collect()
}

#[test]
fn test_inactive_branch_becomes_disabled_text() {
    let source = "#if 0\nthis is not { hlsl\n#else\nfloat x;\n#endif\n";
    let tree = parse(source, FileId::default());

    assert!(!tree.has_errors(), "{:#?}", tree.diagnostics());
    let disabled = disabled_text(source, &ParseOptions::default());
    assert_eq!(disabled.len(), 1);
    assert!(disabled[0].contains("this is not { hlsl"));
    assert_eq!(tree.root().to_string(), source);
}

#[test]
fn test_defines_select_branch() {
    let source = "#ifdef DEBUG\nfloat debug;\n#else\nfloat release;\n#endif\n";

    let plain = disabled_text(source, &ParseOptions::default());
    assert!(plain.iter().any(|t| t.contains("debug")));

    let options = ParseOptions::default().with_define("DEBUG", "1");
    let debug = disabled_text(source, &options);
    assert!(debug.iter().any(|t| t.contains("release")));
    assert!(!debug.iter().any(|t| t.contains("float debug")));
}

#[test]
fn test_define_inside_file_affects_later_conditionals() {
    let source = "#define LEVEL 2\n#if LEVEL > 1\nfloat high;\n#elif LEVEL > 0\nfloat low;\n#endif\n";
    let disabled = disabled_text(source, &ParseOptions::default());
    assert!(disabled.iter().any(|t| t.contains("low")));
    assert!(!disabled.iter().any(|t| t.contains("high")));
}

#[test]
fn test_unbalanced_conditional_is_reported() {
    let tree = parse("#if 1\nfloat x;\n", FileId::default());
    assert!(tree.diagnostics().iter().any(|e| e.code == ErrorCode::E0504));
}

#[test]
fn test_includes_are_listed_in_order() {
    let source = "#include \"a.hlsli\"\nfloat x;\n#include <b.hlsli>\n#if 0\n#include \"c.hlsli\"\n#endif\n";
    let tree = parse(source, FileId::default());

    let includes = tree.includes();
    let paths: Vec<&str> = includes.iter().map(|i| i.path.as_str()).collect();
    assert_eq!(paths, vec!["a.hlsli", "b.hlsli"]);
    assert!(!includes[0].is_system);
    assert!(includes[1].is_system);
}

#[test]
fn test_define_directive_structure() {
    let source = "#define SQUARE(x) ((x) * (x))\n";
    let tree = parse(source, FileId::default());
    let define = tree
        .root()
        .descendants()
        .find(|n| n.kind() == SyntaxKind::DEFINE_DIRECTIVE)
        .expect("define directive");
    assert!(define.children().any(|c| c.kind() == SyntaxKind::NAME));
    assert_eq!(define.text().to_string().trim_end(), source.trim_end());
}
