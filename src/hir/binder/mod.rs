//! Binder: resolves names, overloads and expression types.
//!
//! Binding runs three passes over every file of a compilation, included
//! files first in include order:
//!
//! ```text
//! 1. struct names           → global scope
//! 2. typedefs, struct members, function signatures, globals, cbuffers
//! 3. function bodies and global initializers, with a scope stack
//! ```
//!
//! Global declarations are therefore visible from anywhere in pass 3, while
//! locals are declared as their statements are reached.
//!
//! Binding is total: anything that can't be resolved gets a diagnostic and
//! the error type.

mod declarations;
mod expressions;
mod overloads;
mod statements;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug_span, trace};

use crate::base::{AnalysisError, CancellationToken, FileId, TextRange, TextSize, check_cancelled};
use crate::parser::{AstNode, Expr, Function, Name, SyntaxNode};
use crate::syntax::{MacroTable, NodePtr, SyntaxTree};

use super::bound::{BoundKind, BoundTree};
use super::diagnostics::{Diagnostic, DiagnosticCollector, RelatedInfo};
use super::symbols::{DeclSite, MacroSymbol, SymbolId, SymbolKind};
use super::table::{ScopeId, ScopeKind, SymbolTable};

pub(crate) use overloads::{Argument, Resolution, resolve_overload};

/// A file to bind, and where it enters the root file.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceUnit<'a> {
    pub tree: &'a SyntaxTree,
    /// `None` for the root file.
    pub include_offset: Option<TextSize>,
}

#[derive(Debug)]
pub(crate) struct BindOutput {
    pub table: SymbolTable,
    pub bound: BoundTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Bind `units`. Only fails when `cancel` fires.
pub(crate) fn bind_units(
    units: &[SourceUnit<'_>],
    macros: &MacroTable,
    cancel: Option<&CancellationToken>,
) -> Result<BindOutput, AnalysisError> {
    let span = debug_span!("bind", files = units.len());
    let _enter = span.enter();

    let mut binder = Binder::new(units, macros, cancel);
    for (index, unit) in units.iter().enumerate() {
        binder.enter_unit(index, ScopeId::GLOBAL);
        binder.declare_struct_names(unit.tree)?;
    }
    for (index, unit) in units.iter().enumerate() {
        binder.enter_unit(index, ScopeId::GLOBAL);
        binder.declare_globals(unit.tree)?;
    }
    binder.bind_pending()?;
    Ok(binder.finish())
}

/// Work deferred to pass 3.
enum Pending {
    Body {
        unit: usize,
        function: Function,
        symbol: SymbolId,
        scope: ScopeId,
    },
    Initializer {
        unit: usize,
        value: Expr,
        ty: SymbolId,
    },
}

struct Binder<'a> {
    units: Vec<(FileId, Option<TextSize>)>,
    macros: &'a MacroTable,
    cancel: Option<&'a CancellationToken>,

    table: SymbolTable,
    bound: BoundTree,
    diagnostics: DiagnosticCollector,

    // Position
    unit: usize,
    file: FileId,
    include_offset: Option<TextSize>,
    scope: ScopeId,
    function: Option<SymbolId>,
    loop_depth: u32,
    switch_depth: u32,
    expr_depth: usize,

    structs: FxHashMap<(FileId, NodePtr), SymbolId>,
    completed_structs: FxHashSet<SymbolId>,
    parameters: FxHashMap<(FileId, NodePtr), Vec<SymbolId>>,
    macro_symbols: FxHashMap<(FileId, TextRange), SymbolId>,
    pending: Vec<Pending>,
}

impl<'a> Binder<'a> {
    fn new(units: &[SourceUnit<'_>], macros: &'a MacroTable, cancel: Option<&'a CancellationToken>) -> Self {
        Self {
            units: units
                .iter()
                .map(|u| (u.tree.file_id(), u.include_offset))
                .collect(),
            macros,
            cancel,
            table: SymbolTable::new(),
            bound: BoundTree::default(),
            diagnostics: DiagnosticCollector::new(),
            unit: 0,
            file: FileId::default(),
            include_offset: None,
            scope: ScopeId::GLOBAL,
            function: None,
            loop_depth: 0,
            switch_depth: 0,
            expr_depth: 0,
            structs: FxHashMap::default(),
            completed_structs: FxHashSet::default(),
            parameters: FxHashMap::default(),
            macro_symbols: FxHashMap::default(),
            pending: Vec::new(),
        }
    }

    fn finish(self) -> BindOutput {
        trace!(
            symbols = self.table.user_symbols().count(),
            bound = self.bound.len(),
            "binding finished"
        );
        BindOutput {
            table: self.table,
            bound: self.bound,
            diagnostics: self.diagnostics.diagnostics().to_vec(),
        }
    }

    fn enter_unit(&mut self, index: usize, scope: ScopeId) {
        self.unit = index;
        if let Some(&(file, include_offset)) = self.units.get(index) {
            self.file = file;
            self.include_offset = include_offset;
        }
        self.scope = scope;
        self.function = None;
        self.loop_depth = 0;
        self.switch_depth = 0;
    }

    fn check_cancelled(&self) -> Result<(), AnalysisError> {
        check_cancelled(self.cancel)
    }

    fn bind_pending(&mut self) -> Result<(), AnalysisError> {
        let pending = std::mem::take(&mut self.pending);
        let span = debug_span!("bind_bodies", items = pending.len());
        let _enter = span.enter();
        for item in pending {
            self.check_cancelled()?;
            match item {
                Pending::Body {
                    unit,
                    function,
                    symbol,
                    scope,
                } => {
                    self.enter_unit(unit, scope);
                    self.bind_function_body(&function, symbol);
                }
                Pending::Initializer { unit, value, ty } => {
                    self.enter_unit(unit, ScopeId::GLOBAL);
                    self.bind_initializer(&value, ty);
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Scopes
    // ------------------------------------------------------------------------

    fn push_scope(&mut self, kind: ScopeKind, range: TextRange, owner: Option<SymbolId>) {
        self.scope = self.table.push_scope(self.scope, kind, self.file, range, owner);
    }

    fn pop_scope(&mut self) {
        if let Some(parent) = self.table.scope(self.scope).and_then(|s| s.parent()) {
            self.scope = parent;
        }
    }

    /// Declare `id` in the current scope. Reports a duplicate when `conflicts`
    /// accepts a symbol already declared there under the same name.
    fn declare(
        &mut self,
        name: &Name,
        id: SymbolId,
        visible_from: Option<TextSize>,
        conflicts: impl Fn(&SymbolTable, SymbolId) -> bool,
    ) {
        let Some(text) = name.text() else {
            return;
        };
        let previous = self
            .table
            .declared_in(self.scope, &text)
            .iter()
            .copied()
            .find(|&existing| conflicts(&self.table, existing));
        if let Some(previous) = previous {
            let location = self
                .table
                .get(previous)
                .decl()
                .map(|d| (d.file, d.name_range));
            self.diagnostics
                .duplicate_definition(self.file, name.syntax().text_range(), &text, location);
        }
        self.table.declare(self.scope, &text, id, visible_from);
        self.bound
            .insert(self.file, name.syntax(), BoundKind::Declaration { symbol: id });
    }

    fn decl_site(&self, node: &SyntaxNode, name: &Name) -> DeclSite {
        DeclSite {
            file: self.file,
            node: NodePtr::new(node),
            name_range: name.syntax().text_range(),
            in_root_file: self.include_offset.is_none(),
        }
    }

    // ------------------------------------------------------------------------
    // Macros
    // ------------------------------------------------------------------------

    /// Root-file offset at which macros are looked up for local `offset`.
    fn macro_offset(&self, offset: TextSize) -> TextSize {
        self.include_offset.unwrap_or(offset)
    }

    /// The macro `name` refers to at `offset`, as a symbol.
    fn macro_symbol(&mut self, name: &str, offset: TextSize) -> Option<SymbolId> {
        let macros = self.macros;
        let def = macros.lookup(name, self.macro_offset(offset))?;
        let key = (def.file(), def.name_span.range);
        if let Some(&id) = self.macro_symbols.get(&key) {
            return Some(id);
        }
        let kind = SymbolKind::Macro(MacroSymbol {
            parameters: def.parameters.clone(),
            body: def.body.clone(),
        });
        let decl = DeclSite {
            file: def.file(),
            node: def.node.clone(),
            name_range: def.name_span.range,
            in_root_file: def.is_in_root_file(),
        };
        let id = self
            .table
            .add_symbol(def.name.clone(), kind, Some(decl), None, def.documentation.clone());
        self.macro_symbols.insert(key, id);
        Some(id)
    }

    /// The integer a macro body spells, for array sizes.
    fn macro_value(&self, name: &str, offset: TextSize) -> Option<u32> {
        let def = self.macros.lookup(name, self.macro_offset(offset))?;
        if def.is_function_like() {
            return None;
        }
        parse_integer(def.body.trim_matches(|c| c == '(' || c == ')' || char::is_whitespace(c)))
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    fn related_for(&self, id: SymbolId) -> RelatedInfo {
        let symbol = self.table.get(id);
        RelatedInfo::new(
            super::markup::symbol_markup(&self.table, symbol),
            symbol.decl().map(|d| (d.file, d.name_range)),
        )
    }

    fn ambiguous(&mut self, range: TextRange, name: &str, candidates: &[SymbolId]) {
        let related = candidates.iter().map(|&c| self.related_for(c)).collect();
        self.diagnostics
            .ambiguous_reference(self.file, range, name, related);
    }
}

/// `16`, `0x10`, `16u`
pub(crate) fn parse_integer(text: &str) -> Option<u32> {
    let text = text.trim_end_matches(['u', 'U', 'l', 'L']);
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None if text.len() > 1 && text.starts_with('0') => u32::from_str_radix(&text[1..], 8).ok(),
        None => text.parse().ok(),
    }
}
