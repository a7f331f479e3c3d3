//! Include resolution: in memory, from disk, cycles and failures.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use crate::helpers::model_helpers::*;
use hlsl::base::FileId;
use hlsl::hir::{FsIncludeResolver, InMemoryIncludes, MAX_INCLUDE_DEPTH, bind, codes};
use hlsl::parser::ParseOptions;
use hlsl::syntax::parse;

#[test]
fn test_in_memory_include_declares_symbols() {
    let source = "#include \"common.hlsli\"\nfloat4 f() { return Tint * Scale(2.0); }";
    let includes = InMemoryIncludes::new().with_file(
        "common.hlsli",
        "float4 Tint;\nfloat Scale(float x) { return x * 0.5; }",
    );
    let model = bind(tree_from(source), &includes);

    assert_no_diagnostics(&model);
    assert_eq!(model.compilation().includes().len(), 1);
    let tint = model
        .lookup_symbols(offset_of(source, "return"))
        .into_iter()
        .find(|s| s.name() == "Tint")
        .expect("Tint visible");
    let decl = tint.decl().expect("declared in include");
    assert_ne!(decl.file, model.file_id());
    assert!(!decl.in_root_file);
}

#[test]
fn test_include_macros_are_visible_after_directive() {
    let source = "float before = 0;\n#include \"defs.hlsli\"\nfloat after = SIZE;";
    let includes = InMemoryIncludes::new().with_file("defs.hlsli", "#define SIZE 4\n");
    let model = bind(tree_from(source), &includes);

    assert!(model.visible_macros(offset_of(source, "float before")).next().is_none());
    let visible: Vec<_> = model
        .visible_macros(offset_of(source, "float after"))
        .map(|m| m.name.to_string())
        .collect();
    assert_eq!(visible, vec!["SIZE".to_string()]);
    assert_no_diagnostics(&model);
}

#[test]
fn test_unresolved_include_is_reported() {
    let source = "#include \"missing.hlsli\"\nfloat x;";
    let model = bind(tree_from(source), &InMemoryIncludes::new());
    assert_has_code(&model, codes::UNRESOLVED_INCLUDE);
}

#[test]
fn test_include_cycle_is_skipped() {
    let source = "#include \"a.hlsli\"\nfloat r = A + B;";
    let includes = InMemoryIncludes::new()
        .with_file("a.hlsli", "#include \"b.hlsli\"\nstatic const float A = 1;")
        .with_file("b.hlsli", "#include \"a.hlsli\"\nstatic const float B = 2;");
    let model = bind(tree_from(source), &includes);

    assert_no_diagnostics(&model);
    assert_eq!(model.compilation().includes().len(), 2);
}

#[test]
fn test_self_include_terminates() {
    let source = "#include \"self.hlsli\"\nfloat x;";
    let includes = InMemoryIncludes::new().with_file("self.hlsli", "#include \"self.hlsli\"\nfloat y;");
    let model = bind(tree_from(source), &includes);
    assert!(model.compilation().includes().len() <= MAX_INCLUDE_DEPTH);
    assert_no_diagnostics(&model);
}

// =============================================================================
// FILE SYSTEM
// =============================================================================

fn write(dir: &TempDir, path: &str, text: &str) {
    let path = dir.path().join(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

#[test]
fn test_fs_resolver_reads_relative_and_search_dirs() {
    let dir = TempDir::new().unwrap();
    write(&dir, "shaders/main.hlsl", "");
    write(&dir, "shaders/local.hlsli", "float Local;");
    write(&dir, "lib/shared.hlsli", "float Shared;");

    let resolver = FsIncludeResolver::new([dir.path().join("lib")], ParseOptions::default());
    let root_id = FileId::new(0);
    resolver.register(root_id, dir.path().join("shaders/main.hlsl"));

    let source = "#include \"local.hlsli\"\n#include <shared.hlsli>\nfloat r = Local + Shared;";
    let model = bind(Arc::new(parse(source, root_id)), &resolver);

    assert_no_diagnostics(&model);
    let files: Vec<FileId> = model.compilation().includes().iter().map(|i| i.tree.file_id()).collect();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|&f| resolver.path(f).is_some()));
}

#[test]
fn test_fs_resolver_keeps_file_ids_stable() {
    let dir = TempDir::new().unwrap();
    write(&dir, "common.hlsli", "float Common;");

    let resolver = FsIncludeResolver::new([dir.path().to_path_buf()], ParseOptions::default());
    let source = "#include <common.hlsli>\nfloat r = Common;";
    let first = bind(tree_from(source), &resolver);
    let second = bind(tree_from(source), &resolver);

    let id = |model: &hlsl::hir::SemanticModel| model.compilation().includes()[0].tree.file_id();
    assert_eq!(id(&first), id(&second));
}

#[test]
fn test_fs_resolver_missing_file() {
    let dir = TempDir::new().unwrap();
    let resolver = FsIncludeResolver::new([dir.path().to_path_buf()], ParseOptions::default());
    let model = bind(tree_from("#include <nowhere.hlsli>\n"), &resolver);
    assert_has_code(&model, codes::UNRESOLVED_INCLUDE);
}
