//! Compilation units: a root file, everything it includes, and the result
//! of binding them together.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use crate::base::{AnalysisError, CancellationToken, FileId, TextRange, TextSize, check_cancelled};
use crate::parser::ParseOptions;
use crate::syntax::{IncludeRef, MacroSource, MacroTable, SyntaxTree, parse_with_options};

use super::binder::{SourceUnit, bind_units};
use super::bound::BoundTree;
use super::diagnostics::{Diagnostic, codes};
use super::table::SymbolTable;

/// Includes nested deeper than this are ignored.
pub const MAX_INCLUDE_DEPTH: usize = 32;

/// Include files get ids from here up, leaving lower ids to documents.
pub const FIRST_INCLUDE_FILE_ID: u32 = 1 << 24;

// ============================================================================
// INCLUDE RESOLUTION
// ============================================================================

/// Loads the files named by `#include` directives.
///
/// Returning the same tree for the same path keeps file ids stable across
/// compilations.
pub trait IncludeResolver: Send + Sync {
    /// The tree for `path` as included from `from`; `None` when no such
    /// file exists.
    fn resolve(&self, path: &str, is_system: bool, from: &SyntaxTree) -> Result<Option<Arc<SyntaxTree>>, AnalysisError>;
}

/// Resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIncludes;

impl IncludeResolver for NoIncludes {
    fn resolve(&self, _path: &str, _is_system: bool, _from: &SyntaxTree) -> Result<Option<Arc<SyntaxTree>>, AnalysisError> {
        Ok(None)
    }
}

/// Include files held in memory, keyed by the path as written.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIncludes {
    files: FxHashMap<String, Arc<SyntaxTree>>,
    options: ParseOptions,
}

impl InMemoryIncludes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            files: FxHashMap::default(),
            options,
        }
    }

    /// Add `path`, parsing `text` now.
    pub fn add(&mut self, path: impl Into<String>, text: &str) -> FileId {
        let file = FileId::new(FIRST_INCLUDE_FILE_ID + self.files.len() as u32);
        let tree = parse_with_options(text, file, &self.options);
        self.files.insert(path.into(), Arc::new(tree));
        file
    }

    pub fn with_file(mut self, path: impl Into<String>, text: &str) -> Self {
        self.add(path, text);
        self
    }
}

impl IncludeResolver for InMemoryIncludes {
    fn resolve(&self, path: &str, _is_system: bool, _from: &SyntaxTree) -> Result<Option<Arc<SyntaxTree>>, AnalysisError> {
        Ok(self.files.get(path).cloned())
    }
}

#[derive(Debug, Default)]
struct LoadedFiles {
    by_path: FxHashMap<PathBuf, Arc<SyntaxTree>>,
    paths: FxHashMap<FileId, PathBuf>,
    next_id: u32,
}

/// Reads includes from disk.
///
/// Quoted includes are searched next to the including file first, then in
/// the search directories; system includes only in the search directories.
/// Each file is parsed once and keeps its id for the resolver's lifetime.
#[derive(Debug, Default)]
pub struct FsIncludeResolver {
    search_dirs: Vec<PathBuf>,
    options: ParseOptions,
    files: Mutex<LoadedFiles>,
}

impl FsIncludeResolver {
    pub fn new(search_dirs: impl IntoIterator<Item = PathBuf>, options: ParseOptions) -> Self {
        Self {
            search_dirs: search_dirs.into_iter().collect(),
            options,
            files: Mutex::new(LoadedFiles {
                next_id: FIRST_INCLUDE_FILE_ID,
                ..LoadedFiles::default()
            }),
        }
    }

    /// Record where a document lives, so its quoted includes resolve
    /// relative to it.
    pub fn register(&self, file: FileId, path: impl Into<PathBuf>) {
        self.files.lock().paths.insert(file, path.into());
    }

    /// Path of a loaded include or registered document.
    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.files.lock().paths.get(&file).cloned()
    }

    fn candidates(&self, path: &str, is_system: bool, from: FileId) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if !is_system {
            let dir = self.path(from).and_then(|p| p.parent().map(Path::to_path_buf));
            if let Some(dir) = dir {
                candidates.push(dir.join(path));
            }
        }
        candidates.extend(self.search_dirs.iter().map(|dir| dir.join(path)));
        candidates
    }

    fn load(&self, path: &Path) -> Result<Option<Arc<SyntaxTree>>, AnalysisError> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if let Some(tree) = self.files.lock().by_path.get(&key) {
            return Ok(Some(tree.clone()));
        }
        let text = match std::fs::read_to_string(&key) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AnalysisError::include(key.display().to_string(), err.to_string())),
        };

        let mut files = self.files.lock();
        // Another thread may have loaded it meanwhile
        if let Some(tree) = files.by_path.get(&key) {
            return Ok(Some(tree.clone()));
        }
        let file = FileId::new(files.next_id);
        files.next_id += 1;
        let tree = Arc::new(parse_with_options(&text, file, &self.options));
        files.by_path.insert(key.clone(), tree.clone());
        files.paths.insert(file, key);
        debug!(%file, path = %path.display(), "loaded include");
        Ok(Some(tree))
    }
}

impl IncludeResolver for FsIncludeResolver {
    fn resolve(&self, path: &str, is_system: bool, from: &SyntaxTree) -> Result<Option<Arc<SyntaxTree>>, AnalysisError> {
        for candidate in self.candidates(path, is_system, from.file_id()) {
            if let Some(tree) = self.load(&candidate)? {
                return Ok(Some(tree));
            }
        }
        Ok(None)
    }
}

// ============================================================================
// COMPILATION
// ============================================================================

/// A file brought in by `#include`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludedFile {
    pub tree: Arc<SyntaxTree>,
    /// Root-file offset of the `#include` that brought it in.
    pub include_offset: TextSize,
}

/// The immutable result of analyzing one root file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    root: Arc<SyntaxTree>,
    /// Included files in the order their contents take effect.
    includes: Vec<IncludedFile>,
    macros: MacroTable,
    table: SymbolTable,
    bound: BoundTree,
    /// Semantic diagnostics for the root file.
    diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    /// Resolve includes of `root` and bind everything.
    pub fn build(
        root: Arc<SyntaxTree>,
        resolver: &dyn IncludeResolver,
        cancel: Option<&CancellationToken>,
    ) -> Result<Self, AnalysisError> {
        debug!(file = %root.file_id(), "building compilation");
        let mut collector = IncludeCollector {
            resolver,
            cancel,
            root_file: root.file_id(),
            visiting: FxHashSet::default(),
            seen: FxHashSet::default(),
            includes: Vec::new(),
            diagnostics: Vec::new(),
        };
        collector.visiting.insert(root.file_id());
        collector.seen.insert(root.file_id());
        collector.collect(&root, None, 0)?;
        let IncludeCollector {
            includes,
            diagnostics: include_diagnostics,
            ..
        } = collector;

        let mut units: Vec<SourceUnit<'_>> = includes
            .iter()
            .map(|include| SourceUnit {
                tree: &include.tree,
                include_offset: Some(include.include_offset),
            })
            .collect();
        units.push(SourceUnit {
            tree: &root,
            include_offset: None,
        });
        let sources: Vec<MacroSource<'_>> = units
            .iter()
            .map(|unit| MacroSource {
                tree: unit.tree,
                include_offset: unit.include_offset,
            })
            .collect();
        let macros = MacroTable::build(&sources);

        let output = bind_units(&units, &macros, cancel)?;
        let root_file = root.file_id();
        let mut diagnostics = include_diagnostics;
        diagnostics.extend(output.diagnostics.into_iter().filter(|d| d.file == root_file));

        Ok(Self {
            root,
            includes,
            macros,
            table: output.table,
            bound: output.bound,
            diagnostics,
        })
    }

    pub fn root(&self) -> &Arc<SyntaxTree> {
        &self.root
    }

    pub fn file_id(&self) -> FileId {
        self.root.file_id()
    }

    pub fn includes(&self) -> &[IncludedFile] {
        &self.includes
    }

    /// The tree of `file`, the root or one of its includes.
    pub fn tree(&self, file: FileId) -> Option<&Arc<SyntaxTree>> {
        if file == self.root.file_id() {
            return Some(&self.root);
        }
        self.includes
            .iter()
            .map(|include| &include.tree)
            .find(|tree| tree.file_id() == file)
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn bound(&self) -> &BoundTree {
        &self.bound
    }

    pub fn semantic_diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

struct IncludeCollector<'a> {
    resolver: &'a dyn IncludeResolver,
    cancel: Option<&'a CancellationToken>,
    root_file: FileId,
    /// Files on the current include path.
    visiting: FxHashSet<FileId>,
    /// Files already included once.
    seen: FxHashSet<FileId>,
    includes: Vec<IncludedFile>,
    diagnostics: Vec<Diagnostic>,
}

impl IncludeCollector<'_> {
    /// Collect the includes of `tree` depth-first, each after its own includes.
    fn collect(&mut self, tree: &SyntaxTree, root_offset: Option<TextSize>, depth: usize) -> Result<(), AnalysisError> {
        if depth >= MAX_INCLUDE_DEPTH {
            warn!(file = %tree.file_id(), "include depth limit reached");
            return Ok(());
        }
        for include in tree.includes() {
            check_cancelled(self.cancel)?;
            let offset = root_offset.unwrap_or(include.range.start());
            let resolved = match self.resolver.resolve(&include.path, include.is_system, tree) {
                Ok(resolved) => resolved,
                Err(err) if err.is_cancelled() => return Err(err),
                Err(err) => {
                    self.unresolved(root_offset, &include, Some(err.to_string()));
                    continue;
                }
            };
            let Some(child) = resolved else {
                self.unresolved(root_offset, &include, None);
                continue;
            };
            let file = child.file_id();
            if self.visiting.contains(&file) || !self.seen.insert(file) {
                trace!(%file, path = %include.path, "skipping repeated include");
                continue;
            }
            self.visiting.insert(file);
            self.collect(&child, Some(offset), depth + 1)?;
            self.visiting.remove(&file);
            self.includes.push(IncludedFile {
                tree: child,
                include_offset: offset,
            });
        }
        Ok(())
    }

    /// Report an include that could not be loaded, at its directive in the
    /// root file.
    fn unresolved(&mut self, root_offset: Option<TextSize>, include: &IncludeRef, reason: Option<String>) {
        // Nested failures surface where the outermost include is
        if root_offset.is_some() {
            return;
        }
        let message = match reason {
            Some(reason) => format!("cannot open include file '{}': {}", include.path, reason),
            None => format!("cannot open include file '{}'", include.path),
        };
        self.diagnostics.push(Diagnostic::error(
            self.root_file,
            include.range,
            codes::UNRESOLVED_INCLUDE,
            message,
        ));
    }
}

/// A compilation that failed before binding, as a single diagnostic.
pub(crate) fn failed_compilation(root: Arc<SyntaxTree>, error: &AnalysisError) -> Compilation {
    let diagnostic = Diagnostic::error(
        root.file_id(),
        TextRange::empty(TextSize::from(0)),
        codes::UNRESOLVED_INCLUDE,
        error.to_string(),
    );
    Compilation {
        root,
        includes: Vec::new(),
        macros: MacroTable::default(),
        table: SymbolTable::new(),
        bound: BoundTree::default(),
        diagnostics: vec![diagnostic],
    }
}
