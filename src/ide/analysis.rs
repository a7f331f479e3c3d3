//! AnalysisHost and Analysis: document state for editor features.
//!
//! The `AnalysisHost` owns all mutable state and hands out `Analysis`
//! snapshots for querying.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//!
//! // Apply document changes
//! host.set_file_content("shaders/main.hlsl", text);
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let info = analysis.quick_info("shaders/main.hlsl", offset);
//! let diagnostics = analysis.diagnostics("shaders/main.hlsl");
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use salsa::Setter;
use tracing::debug;

use crate::base::{FileId, TextSize};
use crate::hir::{Diagnostic, FileText, RootDatabase, SemanticModel, Workspace, compile_file, parse_file};
use crate::parser::ParseOptions;
use crate::syntax::SyntaxTree;

use super::QuickInfo;

/// Owns every open document.
///
/// Apply changes with `set_file_content()` and `remove_file()`, then take
/// a snapshot with `analysis()`. An edit replaces the document's
/// compilation wholesale; unchanged documents keep their memoized results.
pub struct AnalysisHost {
    db: RootDatabase,
    workspace: Workspace,
    /// Open documents by path.
    files: IndexMap<String, FileText>,
    next_file_id: u32,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// A host whose documents are all parsed with `options`.
    pub fn with_options(options: ParseOptions) -> Self {
        let db = RootDatabase::new();
        let workspace = Workspace::new(&db, Vec::new(), options);
        Self {
            db,
            workspace,
            files: IndexMap::new(),
            next_file_id: 0,
        }
    }

    /// Open or replace a document, returning its id.
    ///
    /// A document keeps its id across edits.
    pub fn set_file_content(&mut self, path: &str, content: &str) -> FileId {
        if let Some(&file_text) = self.files.get(path) {
            debug!(path, "document changed");
            file_text.set_text(&mut self.db).to(content.to_string());
            return file_text.file(&self.db);
        }

        debug!(path, "document opened");
        let file = FileId::new(self.next_file_id);
        self.next_file_id += 1;
        let file_text = FileText::new(&self.db, file, path.to_string(), content.to_string(), self.workspace);
        self.files.insert(path.to_string(), file_text);
        self.sync_workspace();
        file
    }

    /// Close a document.
    pub fn remove_file(&mut self, path: &str) {
        if self.files.shift_remove(path).is_some() {
            debug!(path, "document closed");
            self.sync_workspace();
        }
    }

    /// Change the predefined macros; every document is re-parsed on demand.
    pub fn set_options(&mut self, options: ParseOptions) {
        self.workspace.set_options(&mut self.db).to(options);
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn sync_workspace(&mut self) {
        let files: Vec<FileText> = self.files.values().copied().collect();
        self.workspace.set_files(&mut self.db).to(files);
    }

    /// Bind every document not bound since its last change, in parallel.
    pub fn prime_caches(&self) {
        let files: Vec<FileText> = self.files.values().copied().collect();
        debug!(documents = files.len(), "priming caches");
        files.par_iter().for_each_with(self.db.clone(), |db, &file_text| {
            compile_file(&*db, file_text);
        });
    }

    /// A consistent snapshot for querying.
    pub fn analysis(&self) -> Analysis<'_> {
        Analysis {
            db: &self.db,
            files: &self.files,
        }
    }
}

/// An immutable snapshot of the open documents.
pub struct Analysis<'a> {
    db: &'a RootDatabase,
    files: &'a IndexMap<String, FileText>,
}

impl<'a> Analysis<'a> {
    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files.get(path).map(|file_text| file_text.file(self.db))
    }

    pub fn file_path(&self, file: FileId) -> Option<&'a str> {
        self.files
            .iter()
            .find(|(_, file_text)| file_text.file(self.db) == file)
            .map(|(path, _)| path.as_str())
    }

    pub fn syntax_tree(&self, path: &str) -> Option<Arc<SyntaxTree>> {
        let &file_text = self.files.get(path)?;
        Some(parse_file(self.db, file_text))
    }

    pub fn semantic_model(&self, path: &str) -> Option<SemanticModel> {
        let &file_text = self.files.get(path)?;
        Some(compile_file(self.db, file_text))
    }

    /// Syntax and semantic diagnostics of one document.
    pub fn diagnostics(&self, path: &str) -> Vec<Diagnostic> {
        self.semantic_model(path)
            .map(|model| model.diagnostics())
            .unwrap_or_default()
    }

    pub fn quick_info(&self, path: &str, offset: TextSize) -> Option<QuickInfo> {
        let model = self.semantic_model(path)?;
        super::quick_info(&model, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_host_basic() {
        let mut host = AnalysisHost::new();
        let file = host.set_file_content("test.hlsl", "float4 main() : SV_Target { return 0; }");

        let analysis = host.analysis();
        assert_eq!(analysis.file_id("test.hlsl"), Some(file));
        assert_eq!(analysis.file_path(file), Some("test.hlsl"));
        assert!(analysis.diagnostics("test.hlsl").is_empty());
    }

    #[test]
    fn test_file_keeps_id_across_edits() {
        let mut host = AnalysisHost::new();
        let first = host.set_file_content("test.hlsl", "float x;");
        let second = host.set_file_content("test.hlsl", "float y;");
        assert_eq!(first, second);
        let tree = host.analysis().syntax_tree("test.hlsl").unwrap();
        assert_eq!(tree.text(), "float y;");
    }

    #[test]
    fn test_file_removal() {
        let mut host = AnalysisHost::new();
        host.set_file_content("test.hlsl", "float x;");
        host.remove_file("test.hlsl");

        let analysis = host.analysis();
        assert!(analysis.file_id("test.hlsl").is_none());
        assert!(analysis.semantic_model("test.hlsl").is_none());
    }

    #[test]
    fn test_options_apply_to_documents() {
        let mut host = AnalysisHost::new();
        host.set_file_content("test.hlsl", "#ifdef FAST\nfloat x = y;\n#endif\n");
        assert!(host.analysis().diagnostics("test.hlsl").is_empty());

        host.set_options(ParseOptions::default().with_define("FAST", "1"));
        assert!(!host.analysis().diagnostics("test.hlsl").is_empty());
    }

    #[test]
    fn test_prime_caches() {
        let mut host = AnalysisHost::new();
        host.set_file_content("a.hlsl", "#include \"b.hlsli\"\nfloat f() { return g; }");
        host.set_file_content("b.hlsli", "static const float g = 1;");
        host.prime_caches();
        assert!(host.analysis().diagnostics("a.hlsl").is_empty());
    }
}
