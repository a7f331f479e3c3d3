//! Every shader under `tests/shaders` is valid HLSL and must bind without
//! diagnostics.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use hlsl::base::FileId;
use hlsl::hir::{FsIncludeResolver, bind};
use hlsl::parser::ParseOptions;
use hlsl::syntax::parse;

fn corpus_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("shaders")
}

fn corpus() -> Vec<PathBuf> {
    let files: Vec<PathBuf> = WalkDir::new(corpus_dir())
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "hlsl"))
        .collect();
    assert!(!files.is_empty(), "no shaders found under {}", corpus_dir().display());
    files
}

#[test]
fn test_corpus_round_trips() {
    for path in corpus() {
        let text = fs::read_to_string(&path).unwrap();
        let tree = parse(&text, FileId::default());
        assert_eq!(tree.root().to_string(), text, "{}", path.display());
        assert!(tree.validate().is_ok(), "{}", path.display());
    }
}

#[test]
fn test_corpus_has_no_diagnostics() {
    let resolver = FsIncludeResolver::new([corpus_dir().join("include")], ParseOptions::default());
    for (index, path) in corpus().into_iter().enumerate() {
        let text = fs::read_to_string(&path).unwrap();
        let file = FileId::new(index as u32);
        resolver.register(file, &path);

        let model = bind(Arc::new(parse(&text, file)), &resolver);
        let diagnostics = model.diagnostics();
        assert!(
            diagnostics.is_empty(),
            "{}: {:#?}",
            path.display(),
            diagnostics
        );
    }
}
