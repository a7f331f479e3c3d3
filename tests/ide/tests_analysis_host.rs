//! Document lifecycle through the analysis host.

use std::sync::Arc;

use hlsl::hir::codes;
use hlsl::ide::AnalysisHost;
use hlsl::parser::ParseOptions;

use crate::helpers::source_fixtures::{PIXEL_SHADER, VERTEX_SHADER};

#[test]
fn test_documents_are_analyzed_independently() {
    let mut host = AnalysisHost::new();
    host.set_file_content("vs.hlsl", VERTEX_SHADER);
    host.set_file_content("ps.hlsl", PIXEL_SHADER);
    host.set_file_content("bad.hlsl", "float f() { return missing; }");

    let analysis = host.analysis();
    assert!(analysis.diagnostics("vs.hlsl").is_empty());
    assert!(analysis.diagnostics("ps.hlsl").is_empty());
    let bad = analysis.diagnostics("bad.hlsl");
    assert_eq!(bad.len(), 1);
    assert_eq!(bad[0].code, codes::UNDEFINED_REFERENCE);
}

#[test]
fn test_unchanged_document_is_memoized() {
    let mut host = AnalysisHost::new();
    host.set_file_content("a.hlsl", VERTEX_SHADER);
    host.set_file_content("b.hlsl", PIXEL_SHADER);

    let before = host.analysis().syntax_tree("a.hlsl").unwrap();
    host.set_file_content("b.hlsl", "float x;");
    let after = host.analysis().syntax_tree("a.hlsl").unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn test_edit_is_reflected_in_next_snapshot() {
    let mut host = AnalysisHost::new();
    host.set_file_content("main.hlsl", "float f() { return missing; }");
    assert_eq!(host.analysis().diagnostics("main.hlsl").len(), 1);

    host.set_file_content("main.hlsl", "static const float missing = 1;\nfloat f() { return missing; }");
    assert!(host.analysis().diagnostics("main.hlsl").is_empty());
}

#[test]
fn test_include_follows_open_document() {
    let mut host = AnalysisHost::new();
    host.set_file_content("shaders/main.hlsl", "#include \"lib/common.hlsli\"\nfloat r = Shared;");
    assert!(!host.analysis().diagnostics("shaders/main.hlsl").is_empty());

    host.set_file_content("shaders/lib/common.hlsli", "float Shared;");
    let analysis = host.analysis();
    assert!(analysis.diagnostics("shaders/main.hlsl").is_empty());

    let model = analysis.semantic_model("shaders/main.hlsl").unwrap();
    let include = &model.compilation().includes()[0];
    assert_eq!(
        analysis.file_path(include.tree.file_id()),
        Some("shaders/lib/common.hlsli")
    );
}

#[test]
fn test_removing_include_reports_it_unresolved() {
    let mut host = AnalysisHost::new();
    host.set_file_content("main.hlsl", "#include \"common.hlsli\"\nfloat r = Shared;");
    host.set_file_content("common.hlsli", "float Shared;");
    assert!(host.analysis().diagnostics("main.hlsl").is_empty());

    host.remove_file("common.hlsli");
    let diagnostics = host.analysis().diagnostics("main.hlsl");
    assert!(diagnostics.iter().any(|d| d.code == codes::UNRESOLVED_INCLUDE));
}

#[test]
fn test_predefined_macros_select_branch() {
    let source = "#ifdef FAST\nfloat f() { return 1; }\n#else\nfloat f() { return missing; }\n#endif\n";

    let mut host = AnalysisHost::new();
    host.set_file_content("main.hlsl", source);
    assert_eq!(host.analysis().diagnostics("main.hlsl").len(), 1);

    host.set_options(ParseOptions::default().with_define("FAST", "1"));
    assert!(host.analysis().diagnostics("main.hlsl").is_empty());
}

#[test]
fn test_unknown_document_has_no_results() {
    let host = AnalysisHost::new();
    let analysis = host.analysis();
    assert!(analysis.syntax_tree("nowhere.hlsl").is_none());
    assert!(analysis.semantic_model("nowhere.hlsl").is_none());
    assert!(analysis.diagnostics("nowhere.hlsl").is_empty());
    assert!(analysis.quick_info("nowhere.hlsl", 0.into()).is_none());
}
