//! Macro table: which `#define` is visible where.
//!
//! Macros are associated with their names, never expanded. Definitions from
//! included files take effect at the `#include` line of the root file, and an
//! `#undef` ends the visibility of the definition it names.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use crate::base::{FileId, FileSpan, TextSize};
use crate::parser::{AstNode, DefineDirective, Directive, extract_doc_comment};

use super::{NodePtr, SyntaxTree};

/// One `#define`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MacroDefinition {
    pub name: SmolStr,
    /// The `DEFINE_DIRECTIVE` node in its own file's tree.
    pub node: NodePtr,
    pub name_span: FileSpan,
    /// `None` for object-like macros.
    pub parameters: Option<Vec<SmolStr>>,
    pub body: String,
    pub documentation: Option<String>,
    /// Offset in the root file from which the definition is visible.
    pub root_offset: TextSize,
    /// Offset in the root file at which an `#undef` removed it.
    pub undefined_at: Option<TextSize>,
}

impl MacroDefinition {
    pub fn file(&self) -> FileId {
        self.name_span.file
    }

    pub fn is_in_root_file(&self) -> bool {
        self.name_span.is_in_root_file()
    }

    pub fn is_function_like(&self) -> bool {
        self.parameters.is_some()
    }

    pub fn is_visible_at(&self, offset: TextSize) -> bool {
        self.root_offset <= offset && self.undefined_at.is_none_or(|end| offset < end)
    }

    /// `#define NAME(a, b) body`
    pub fn signature(&self) -> String {
        let mut text = format!("#define {}", self.name);
        if let Some(params) = &self.parameters {
            text.push('(');
            text.push_str(&params.join(", "));
            text.push(')');
        }
        if !self.body.is_empty() {
            text.push(' ');
            text.push_str(&self.body);
        }
        text
    }
}

/// A tree contributing macros, and where it enters the root file.
#[derive(Debug, Clone, Copy)]
pub struct MacroSource<'a> {
    pub tree: &'a SyntaxTree,
    /// `None` for the root file itself; otherwise the root-file offset of the
    /// `#include` that (transitively) brought this tree in.
    pub include_offset: Option<TextSize>,
}

enum Event {
    Define(MacroDefinition),
    Undef(SmolStr),
}

/// Every macro definition of a compilation, in the order they take effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroTable {
    definitions: Vec<MacroDefinition>,
    by_name: FxHashMap<SmolStr, Vec<usize>>,
}

impl MacroTable {
    /// Table for a single file with no includes.
    pub fn from_tree(tree: &SyntaxTree) -> Self {
        Self::build(&[MacroSource {
            tree,
            include_offset: None,
        }])
    }

    pub fn build(sources: &[MacroSource<'_>]) -> Self {
        let mut events: Vec<(TextSize, usize, Event)> = Vec::new();
        for source in sources {
            let in_root_file = source.include_offset.is_none();
            let root = source.tree.root();
            for directive in root.descendants().filter_map(Directive::cast) {
                let local = directive.syntax().text_range().start();
                let root_offset = source.include_offset.unwrap_or(local);
                let event = match directive {
                    Directive::Define(define) => {
                        match definition(&define, source.tree.file_id(), in_root_file, root_offset) {
                            Some(def) => Event::Define(def),
                            None => continue,
                        }
                    }
                    Directive::Undef(undef) => match undef.name_ref().and_then(|n| n.text()) {
                        Some(name) => Event::Undef(name),
                        None => continue,
                    },
                    _ => continue,
                };
                let seq = events.len();
                events.push((root_offset, seq, event));
            }
        }
        events.sort_by_key(|(offset, seq, _)| (*offset, *seq));

        let mut table = Self::default();
        for (offset, _, event) in events {
            match event {
                Event::Define(def) => {
                    table
                        .by_name
                        .entry(def.name.clone())
                        .or_default()
                        .push(table.definitions.len());
                    table.definitions.push(def);
                }
                Event::Undef(name) => {
                    let Some(indices) = table.by_name.get(&name) else {
                        continue;
                    };
                    for &index in indices {
                        let def = &mut table.definitions[index];
                        if def.undefined_at.is_none() {
                            def.undefined_at = Some(offset);
                        }
                    }
                }
            }
        }
        trace!(count = table.definitions.len(), "built macro table");
        table
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacroDefinition> {
        self.definitions.iter()
    }

    /// The definition of `name` active at root-file `offset`.
    pub fn lookup(&self, name: &str, offset: TextSize) -> Option<&MacroDefinition> {
        self.by_name
            .get(name)?
            .iter()
            .rev()
            .map(|&index| &self.definitions[index])
            .find(|def| def.is_visible_at(offset))
    }

    /// Every macro visible at `offset`, one per name.
    pub fn visible_at(&self, offset: TextSize) -> impl Iterator<Item = &MacroDefinition> {
        self.definitions
            .iter()
            .filter(move |def| def.is_visible_at(offset))
            .filter(move |def| {
                self.lookup(&def.name, offset)
                    .is_some_and(|active| std::ptr::eq(active, *def))
            })
    }

    /// Root-file definition whose name contains or touches `offset`.
    pub fn definition_at(&self, offset: TextSize) -> Option<&MacroDefinition> {
        self.definitions
            .iter()
            .find(|def| def.is_in_root_file() && def.name_span.contains_or_touches(offset))
    }
}

fn definition(
    define: &DefineDirective,
    file: FileId,
    in_root_file: bool,
    root_offset: TextSize,
) -> Option<MacroDefinition> {
    let name = define.name()?;
    let text = name.text()?;
    Some(MacroDefinition {
        name: text,
        node: NodePtr::new(define.syntax()),
        name_span: FileSpan::new(file, name.syntax().text_range(), in_root_file),
        parameters: define.parameters(),
        body: define.body_text().trim().to_string(),
        documentation: extract_doc_comment(define.syntax()),
        root_offset,
        undefined_at: None,
    })
}
