//! Salsa database definition and queries.
//!
//! ```text
//! FileText / Workspace   ← INPUTS: document text, open documents, defines
//!     │
//!     ▼
//! parse_file(file)       ← SyntaxTree per document
//!     │
//!     ▼
//! compile_file(file)     ← SemanticModel, includes resolved among documents
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::base::{AnalysisError, FileId};
use crate::parser::ParseOptions;
use crate::syntax::{SyntaxTree, parse_with_options};

use super::compilation::{IncludeResolver, MAX_INCLUDE_DEPTH};
use super::model::{SemanticModel, bind};

// ============================================================================
// INPUTS
// ============================================================================

/// Input: the set of open documents and the options they are parsed with.
#[salsa::input]
pub struct Workspace {
    #[return_ref]
    pub files: Vec<FileText>,
    #[return_ref]
    pub options: ParseOptions,
}

/// Input: the raw text of one document.
///
/// Set this explicitly when a document is opened or changed.
#[salsa::input]
pub struct FileText {
    pub file: FileId,
    /// Path the document is known by; `#include`s are matched against it.
    #[return_ref]
    pub path: String,
    #[return_ref]
    pub text: String,
    pub workspace: Workspace,
}

// ============================================================================
// DATABASE
// ============================================================================

/// The root Salsa database.
///
/// Parsing and binding are memoized per document and invalidated when
/// their inputs change.
#[salsa::db]
#[derive(Default, Clone)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {
    fn salsa_event(&self, _event: &dyn Fn() -> salsa::Event) {}
}

impl RootDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// TRACKED QUERIES
// ============================================================================

/// Parse a document with its workspace's options.
#[salsa::tracked]
pub fn parse_file(db: &dyn salsa::Database, file_text: FileText) -> Arc<SyntaxTree> {
    let options = file_text.workspace(db).options(db);
    let tree = parse_with_options(file_text.text(db), file_text.file(db), options);
    debug!(path = %file_text.path(db), errors = tree.diagnostics().len(), "parsed document");
    Arc::new(tree)
}

/// Bind a document, resolving `#include`s against the other documents of
/// its workspace.
#[salsa::tracked]
pub fn compile_file(db: &dyn salsa::Database, file_text: FileText) -> SemanticModel {
    let root = parse_file(db, file_text);
    let includes = WorkspaceIncludes::collect(db, file_text, &root);
    bind(root, &includes)
}

/// Includes already parsed through [`parse_file`], keyed by the path as
/// written.
#[derive(Debug, Default)]
struct WorkspaceIncludes {
    trees: FxHashMap<String, Arc<SyntaxTree>>,
}

impl WorkspaceIncludes {
    /// Parse every document reachable from `root` through `#include`s.
    fn collect(db: &dyn salsa::Database, file_text: FileText, root: &Arc<SyntaxTree>) -> Self {
        let documents = file_text.workspace(db).files(db);
        let mut trees = FxHashMap::default();
        let mut seen = FxHashSet::default();
        seen.insert(root.file_id());
        let mut queue = VecDeque::from([(root.clone(), 0)]);

        while let Some((tree, depth)) = queue.pop_front() {
            if depth >= MAX_INCLUDE_DEPTH {
                continue;
            }
            for include in tree.includes() {
                if trees.contains_key(&include.path) {
                    continue;
                }
                let Some(document) = find_document(db, documents, &include.path) else {
                    continue;
                };
                let included = parse_file(db, document);
                trees.insert(include.path, included.clone());
                if seen.insert(included.file_id()) {
                    queue.push_back((included, depth + 1));
                }
            }
        }
        Self { trees }
    }
}

impl IncludeResolver for WorkspaceIncludes {
    fn resolve(&self, path: &str, _is_system: bool, _from: &SyntaxTree) -> Result<Option<Arc<SyntaxTree>>, AnalysisError> {
        Ok(self.trees.get(path).cloned())
    }
}

/// The document whose path is `include`, or ends with `/include`.
fn find_document(db: &dyn salsa::Database, documents: &[FileText], include: &str) -> Option<FileText> {
    let include = include.replace('\\', "/");
    documents.iter().copied().find(|document| {
        let path = document.path(db).replace('\\', "/");
        path == include
            || path
                .strip_suffix(include.as_str())
                .is_some_and(|prefix| prefix.ends_with('/'))
    })
}

#[cfg(test)]
mod tests {
    use salsa::Setter;

    use super::*;

    fn workspace(db: &mut RootDatabase, files: &[(&str, &str)]) -> Vec<FileText> {
        let workspace = Workspace::new(&*db, Vec::new(), ParseOptions::default());
        let texts: Vec<FileText> = files
            .iter()
            .enumerate()
            .map(|(i, (path, text))| {
                FileText::new(&*db, FileId::new(i as u32), path.to_string(), text.to_string(), workspace)
            })
            .collect();
        workspace.set_files(db).to(texts.clone());
        texts
    }

    #[test]
    fn test_parse_file_is_memoized() {
        let mut db = RootDatabase::new();
        let files = workspace(&mut db, &[("a.hlsl", "float x;")]);
        let first = parse_file(&db, files[0]);
        let second = parse_file(&db, files[0]);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_parse_file_reparses_on_edit() {
        let mut db = RootDatabase::new();
        let files = workspace(&mut db, &[("a.hlsl", "float x;")]);
        let before = parse_file(&db, files[0]);
        files[0].set_text(&mut db).to("float y;".to_string());
        let after = parse_file(&db, files[0]);
        assert_eq!(before.text(), "float x;");
        assert_eq!(after.text(), "float y;");
    }

    #[test]
    fn test_compile_file_resolves_workspace_include() {
        let mut db = RootDatabase::new();
        let files = workspace(
            &mut db,
            &[
                ("shaders/main.hlsl", "#include \"common.hlsli\"\nfloat f() { return Scale; }"),
                ("shaders/common.hlsli", "static const float Scale = 2.0;"),
            ],
        );
        let model = compile_file(&db, files[0]);
        assert!(model.diagnostics().is_empty(), "{:?}", model.diagnostics());
        assert_eq!(model.compilation().includes().len(), 1);
    }

    #[test]
    fn test_find_document_matches_path_suffix() {
        let mut db = RootDatabase::new();
        let files = workspace(&mut db, &[("c:\\src\\lib\\common.hlsli", ""), ("notcommon.hlsli", "")]);
        assert_eq!(find_document(&db, &files, "lib/common.hlsli"), Some(files[0]));
        assert_eq!(find_document(&db, &files, "common.hlsli"), Some(files[0]));
        assert_eq!(find_document(&db, &files, "other.hlsli"), None);
    }
}
