//! Immutable syntax tree for one HLSL file.
//!
//! A [`SyntaxTree`] bundles the green tree produced by the parser with the
//! source text it was built from and the syntax diagnostics found on the way.
//! Edits never mutate a tree; re-parsing produces a new one.

use std::sync::Arc;

use crate::base::{AnalysisError, FileId, LineIndex, TextRange, TextSize};
use crate::parser::{
    AstNode, Directive, GreenNode, IncludeDirective, Parse, ParseOptions, SourceFile, SyntaxError,
    SyntaxNode,
};

/// A parsed HLSL file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    green: GreenNode,
    diagnostics: Vec<SyntaxError>,
    text: Arc<str>,
    file_id: FileId,
    options: ParseOptions,
    line_index: Arc<LineIndex>,
}

// Two trees are equal when they were built from the same text with the same
// options; the green tree is a function of both.
impl PartialEq for SyntaxTree {
    fn eq(&self, other: &Self) -> bool {
        self.file_id == other.file_id && self.text == other.text && self.options == other.options
    }
}

impl Eq for SyntaxTree {}

/// One `#include` found in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeRef {
    pub path: String,
    /// Written as `<path>` rather than `"path"`.
    pub is_system: bool,
    /// Range of the whole directive line.
    pub range: TextRange,
}

impl SyntaxTree {
    pub(crate) fn new(text: Arc<str>, file_id: FileId, options: ParseOptions, parse: Parse) -> Self {
        let line_index = Arc::new(LineIndex::new(&text));
        Self {
            green: parse.green,
            diagnostics: parse.errors,
            text,
            file_id,
            options,
            line_index,
        }
    }

    /// Root node of the tree; always a `SOURCE_FILE`.
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Typed root node.
    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.root())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn shared_text(&self) -> Arc<str> {
        self.text.clone()
    }

    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Syntax diagnostics, ordered by position.
    pub fn diagnostics(&self) -> &[SyntaxError] {
        &self.diagnostics
    }

    /// Check if parsing reported any error-severity diagnostic
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.is_error())
    }

    /// Full length of the source text.
    pub fn len(&self) -> TextSize {
        TextSize::of(&*self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Active `#include` directives in source order
    pub fn includes(&self) -> Vec<IncludeRef> {
        self.root()
            .descendants()
            .filter_map(Directive::cast)
            .filter_map(|directive| match directive {
                Directive::Include(include) => Some(include),
                _ => None,
            })
            .filter_map(|include: IncludeDirective| {
                let (path, is_system) = include.path()?;
                Some(IncludeRef {
                    path,
                    is_system,
                    range: include.syntax().text_range(),
                })
            })
            .collect()
    }

    /// Check the structural invariants of the tree.
    ///
    /// Every child must lie inside its parent, siblings must be contiguous,
    /// and the concatenated token text must equal the source.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let root = self.root();
        let expected = TextRange::up_to(self.len());
        if root.text_range() != expected {
            return Err(AnalysisError::invalid_tree(format!(
                "root covers {:?}, source covers {:?}",
                root.text_range(),
                expected
            )));
        }

        for node in root.descendants() {
            let parent_range = node.text_range();
            let mut cursor = parent_range.start();
            for child in node.children_with_tokens() {
                let range = child.text_range();
                if !parent_range.contains_range(range) {
                    return Err(AnalysisError::invalid_tree(format!(
                        "{:?} at {:?} lies outside parent {:?} at {:?}",
                        child.kind(),
                        range,
                        node.kind(),
                        parent_range
                    )));
                }
                if range.start() != cursor {
                    return Err(AnalysisError::invalid_tree(format!(
                        "gap before {:?} at {:?}",
                        child.kind(),
                        range
                    )));
                }
                cursor = range.end();
            }
        }

        if root.text() != &*self.text {
            return Err(AnalysisError::invalid_tree("tree text differs from source"));
        }
        Ok(())
    }
}
