//! Scopes and the per-compilation symbol arena.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{FileId, TextRange, TextSize};

use super::intrinsics::{Intrinsics, intrinsics};
use super::symbols::{
    DeclSite, ObjectKind, ScalarType, SemanticSymbol, Shape, Symbol, SymbolId, SymbolKind, TypeKind,
    TypeSymbol, VariableKind, VariableSymbol,
};

/// Index of a scope in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    /// Built-in symbols; parent of the global scope.
    pub const INTRINSIC: ScopeId = ScopeId(0);
    pub const GLOBAL: ScopeId = ScopeId(1);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Intrinsic,
    Global,
    Function,
    Block,
    Struct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    parent: Option<ScopeId>,
    kind: ScopeKind,
    file: Option<FileId>,
    range: Option<TextRange>,
    owner: Option<SymbolId>,
    symbols: IndexMap<SmolStr, Vec<SymbolId>>,
    /// Locals are only visible after their declarator.
    visible_from: FxHashMap<SymbolId, TextSize>,
}

impl Scope {
    fn new(parent: Option<ScopeId>, kind: ScopeKind) -> Self {
        Self {
            parent,
            kind,
            file: None,
            range: None,
            owner: None,
            symbols: IndexMap::new(),
            visible_from: FxHashMap::default(),
        }
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn range(&self) -> Option<TextRange> {
        self.range
    }

    /// The function or struct that opened this scope.
    pub fn owner(&self) -> Option<SymbolId> {
        self.owner
    }

    pub fn names(&self) -> impl Iterator<Item = &SmolStr> {
        self.symbols.keys()
    }

    fn is_visible(&self, id: SymbolId, offset: TextSize) -> bool {
        self.visible_from.get(&id).is_none_or(|&from| from <= offset)
    }
}

/// Every symbol and scope of one compilation.
///
/// Lookups fall through to the shared [`Intrinsics`]; the table only stores
/// what the compilation declared, plus the array, object and swizzle types
/// its declarations needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    arrays: FxHashMap<(SymbolId, Option<u32>), SymbolId>,
    objects: FxHashMap<(ObjectKind, Option<SymbolId>), SymbolId>,
    swizzles: FxHashMap<(SymbolId, SmolStr), SymbolId>,
    semantics: FxHashMap<SmolStr, SymbolId>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            scopes: vec![
                Scope::new(None, ScopeKind::Intrinsic),
                Scope::new(Some(ScopeId::INTRINSIC), ScopeKind::Global),
            ],
            arrays: FxHashMap::default(),
            objects: FxHashMap::default(),
            swizzles: FxHashMap::default(),
            semantics: FxHashMap::default(),
        }
    }

    pub fn intrinsics(&self) -> &'static Intrinsics {
        intrinsics()
    }

    // ------------------------------------------------------------------------
    // Symbols
    // ------------------------------------------------------------------------

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        let intrinsics = intrinsics();
        match id.index().checked_sub(intrinsics.len()) {
            None => intrinsics.symbol(id),
            Some(index) => self.symbols.get(index),
        }
    }

    /// Like [`symbol`](Self::symbol), with the error type for unknown ids.
    pub fn get(&self, id: SymbolId) -> &Symbol {
        self.symbol(id).unwrap_or_else(|| intrinsics().error_symbol())
    }

    /// Symbols declared by this compilation, in declaration order.
    pub fn user_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub(crate) fn add_symbol(
        &mut self,
        name: impl Into<SmolStr>,
        kind: SymbolKind,
        decl: Option<DeclSite>,
        container: Option<SymbolId>,
        documentation: Option<String>,
    ) -> SymbolId {
        let id = SymbolId::new((intrinsics().len() + self.symbols.len()) as u32);
        let symbol = Symbol::new(id, name, kind)
            .with_decl(decl)
            .with_container(container)
            .with_documentation(documentation);
        self.symbols.push(symbol);
        id
    }

    pub(crate) fn symbol_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        let index = id.index().checked_sub(intrinsics().len())?;
        self.symbols.get_mut(index)
    }

    pub(crate) fn type_symbol_mut(&mut self, id: SymbolId) -> Option<&mut TypeSymbol> {
        match &mut self.symbol_mut(id)?.kind {
            SymbolKind::Type(ty) => Some(ty),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------------

    /// Follow `typedef` chains to the underlying type.
    pub fn resolve_alias(&self, mut id: SymbolId) -> SymbolId {
        for _ in 0..32 {
            match self.get(id).as_type().map(|t| &t.kind) {
                Some(TypeKind::Alias(target)) => id = *target,
                _ => return id,
            }
        }
        intrinsics().error()
    }

    /// Kind of the type `id` denotes, through aliases. Non-types are `Error`.
    pub fn type_kind(&self, id: SymbolId) -> &TypeKind {
        let id = self.resolve_alias(id);
        match self.get(id).as_type() {
            Some(ty) => &ty.kind,
            None => &TypeKind::Error,
        }
    }

    pub fn is_intrinsic_numeric_type(&self, id: SymbolId) -> bool {
        let symbol = self.get(id);
        symbol.is_intrinsic() && symbol.as_type().is_some_and(|t| t.kind.is_numeric())
    }

    pub fn is_numeric_constructor(&self, id: SymbolId) -> bool {
        self.get(id).is_numeric_constructor()
    }

    /// `Texture2D<float4>`, `float[4]`, `S`
    pub fn type_name(&self, id: SymbolId) -> String {
        let symbol = self.get(id);
        match symbol.as_type().map(|t| &t.kind) {
            Some(TypeKind::Object {
                element: Some(element),
                ..
            }) => format!("{}<{}>", symbol.name(), self.type_name(*element)),
            Some(TypeKind::Array { element, size }) => match size {
                Some(size) => format!("{}[{}]", self.type_name(*element), size),
                None => format!("{}[]", self.type_name(*element)),
            },
            _ => symbol.name().to_string(),
        }
    }

    pub fn numeric(&self, scalar: ScalarType, shape: Shape) -> SymbolId {
        intrinsics().numeric(scalar, shape)
    }

    pub fn unknown_type(&self) -> SymbolId {
        intrinsics().unknown()
    }

    pub fn error_type(&self) -> SymbolId {
        intrinsics().error()
    }

    pub(crate) fn array_of(&mut self, element: SymbolId, size: Option<u32>) -> SymbolId {
        if let Some(&id) = self.arrays.get(&(element, size)) {
            return id;
        }
        let name = self.type_name(element);
        let id = self.add_symbol(
            name,
            SymbolKind::Type(TypeSymbol::new(TypeKind::Array { element, size })),
            None,
            None,
            None,
        );
        self.arrays.insert((element, size), id);
        id
    }

    /// An object type instantiated for `element`, with its methods.
    pub(crate) fn object_of(&mut self, kind: ObjectKind, element: Option<SymbolId>) -> SymbolId {
        let intrinsics = intrinsics();
        let default = intrinsics.object(kind);
        if self.type_kind(default) == (&TypeKind::Object { kind, element }) {
            return default;
        }
        if let Some(&id) = self.objects.get(&(kind, element)) {
            return id;
        }
        let ty = self.add_symbol(
            kind.name(),
            SymbolKind::Type(TypeSymbol::new(TypeKind::Object { kind, element })),
            None,
            None,
            intrinsics.symbol(default).and_then(|s| s.documentation()).map(str::to_string),
        );
        let element_scalar = element.and_then(|e| self.type_kind(e).scalar_type());
        let members = intrinsics
            .method_symbols(kind, element, element_scalar)
            .into_iter()
            .map(|(name, function, doc)| {
                self.add_symbol(
                    name,
                    SymbolKind::Function(function),
                    None,
                    Some(ty),
                    Some(doc.to_string()),
                )
            })
            .collect();
        if let Some(symbol) = self.type_symbol_mut(ty) {
            symbol.members = members;
        }
        self.objects.insert((kind, element), ty);
        ty
    }

    /// The semantic named `name`; unknown names become user semantics.
    pub(crate) fn semantic(&mut self, name: &str) -> SymbolId {
        if let Some(id) = intrinsics().semantic(name) {
            return id;
        }
        let key = SmolStr::new(name.to_ascii_uppercase());
        if let Some(&id) = self.semantics.get(&key) {
            return id;
        }
        let kind = SymbolKind::Semantic(SemanticSymbol {
            is_system_value: false,
            is_indexed: false,
        });
        let id = self.add_symbol(name, kind, None, None, None);
        self.semantics.insert(key, id);
        id
    }

    // ------------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------------

    /// Fields and methods of a type, including inherited struct members.
    pub fn members(&self, ty: SymbolId) -> Vec<SymbolId> {
        let mut members = Vec::new();
        let mut current = Some(self.resolve_alias(ty));
        for _ in 0..32 {
            let Some(ty) = current.and_then(|id| self.get(id).as_type()) else {
                break;
            };
            members.extend(ty.members.iter().copied());
            current = ty.base.map(|b| self.resolve_alias(b));
        }
        members
    }

    /// Members of `ty` named `name`. Methods may be overloaded.
    pub fn member(&self, ty: SymbolId, name: &str) -> Vec<SymbolId> {
        self.members(ty)
            .into_iter()
            .filter(|&m| self.get(m).name() == name)
            .collect()
    }

    /// A swizzle such as `.xyz`, `.rg` or `._m00_m11` on a numeric type.
    pub(crate) fn swizzle(&mut self, ty: SymbolId, name: &str) -> Option<SymbolId> {
        let ty = self.resolve_alias(ty);
        let kind = self.type_kind(ty).clone();
        let scalar = kind.scalar_type()?;
        let count = match kind.shape()? {
            Shape::Scalar => vector_swizzle(name, 1)?,
            Shape::Vector(n) => vector_swizzle(name, n)?,
            Shape::Matrix(r, c) => matrix_swizzle(name, r, c)?,
        };
        let key = (ty, SmolStr::new(name));
        if let Some(&id) = self.swizzles.get(&key) {
            return Some(id);
        }
        let shape = if count == 1 { Shape::Scalar } else { Shape::Vector(count) };
        let variable = SymbolKind::Variable(VariableSymbol {
            kind: VariableKind::Swizzle,
            ty: intrinsics().numeric(scalar, shape),
            is_const: false,
            is_static: false,
            semantic: None,
        });
        let id = self.add_symbol(name, variable, None, Some(ty), None);
        self.swizzles.insert(key, id);
        Some(id)
    }

    // ------------------------------------------------------------------------
    // Scopes
    // ------------------------------------------------------------------------

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    pub(crate) fn push_scope(
        &mut self,
        parent: ScopeId,
        kind: ScopeKind,
        file: FileId,
        range: TextRange,
        owner: Option<SymbolId>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        let mut scope = Scope::new(Some(parent), kind);
        scope.file = Some(file);
        scope.range = Some(range);
        scope.owner = owner;
        self.scopes.push(scope);
        id
    }

    /// Add `id` under `name`. A `visible_from` offset hides it before that point.
    pub(crate) fn declare(&mut self, scope: ScopeId, name: &str, id: SymbolId, visible_from: Option<TextSize>) {
        let Some(scope) = self.scopes.get_mut(scope.index()) else {
            return;
        };
        scope.symbols.entry(SmolStr::new(name)).or_default().push(id);
        if let Some(offset) = visible_from {
            scope.visible_from.insert(id, offset);
        }
    }

    /// Symbols declared directly in `scope` under `name`.
    pub fn declared_in(&self, scope: ScopeId, name: &str) -> &[SymbolId] {
        self.scope(scope)
            .and_then(|s| s.symbols.get(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The overload set for `name`: every symbol of the nearest scope that
    /// declares it. In the global scope, intrinsic functions of the same
    /// name join the set.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Vec<SymbolId> {
        self.lookup_where(scope, name, |_| true)
    }

    /// Like [`lookup`](Self::lookup), considering only variables and functions.
    pub fn lookup_value(&self, scope: ScopeId, name: &str) -> Vec<SymbolId> {
        self.lookup_where(scope, name, Symbol::is_value)
    }

    /// Like [`lookup`](Self::lookup), considering only types.
    pub fn lookup_type(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.lookup_where(scope, name, Symbol::is_type).into_iter().next()
    }

    fn lookup_where(&self, scope: ScopeId, name: &str, filter: impl Fn(&Symbol) -> bool) -> Vec<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let Some(scope) = self.scope(id) else {
                break;
            };
            let ids: Vec<SymbolId> = if scope.kind == ScopeKind::Intrinsic {
                intrinsics().lookup(name).to_vec()
            } else {
                scope.symbols.get(name).cloned().unwrap_or_default()
            };
            let mut found: Vec<SymbolId> = ids.into_iter().filter(|&s| filter(self.get(s))).collect();
            if !found.is_empty() {
                if scope.kind == ScopeKind::Global {
                    found.extend(self.intrinsic_functions(name).filter(|&s| filter(self.get(s))));
                }
                return found;
            }
            current = scope.parent;
        }
        Vec::new()
    }

    fn intrinsic_functions(&self, name: &str) -> impl Iterator<Item = SymbolId> + '_ {
        intrinsics()
            .lookup(name)
            .iter()
            .copied()
            .filter(|&id| self.get(id).is_invocable())
    }

    /// The innermost scope of `file` containing `offset`.
    pub fn scope_at(&self, file: FileId, offset: TextSize) -> ScopeId {
        let mut best = ScopeId::GLOBAL;
        let mut best_len = None;
        for (index, scope) in self.scopes.iter().enumerate() {
            let (Some(scope_file), Some(range)) = (scope.file, scope.range) else {
                continue;
            };
            if scope_file != file || !(range.start() < offset && offset < range.end()) {
                continue;
            }
            if best_len.is_none_or(|len| range.len() <= len) {
                best = ScopeId(index as u32);
                best_len = Some(range.len());
            }
        }
        best
    }

    /// Every symbol visible from `scope` at `offset`, innermost scope first.
    ///
    /// A name declared in a nearer scope hides the same name further out.
    pub fn visible_symbols(&self, scope: ScopeId, offset: TextSize) -> Vec<SymbolId> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut result = Vec::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            let Some(scope) = self.scope(id) else {
                break;
            };
            if scope.kind == ScopeKind::Intrinsic {
                for (name, ids) in intrinsics().scope() {
                    if seen.insert(name.clone()) {
                        result.extend_from_slice(ids);
                    }
                }
            } else {
                for (name, ids) in &scope.symbols {
                    let visible: Vec<SymbolId> = ids.iter().copied().filter(|&s| scope.is_visible(s, offset)).collect();
                    if visible.is_empty() || !seen.insert(name.clone()) {
                        continue;
                    }
                    result.extend(visible);
                    if scope.kind == ScopeKind::Global {
                        result.extend(self.intrinsic_functions(name));
                    }
                }
            }
            current = scope.parent;
        }
        result
    }
}

/// Component count of an `xyzw` or `rgba` swizzle over `n` components.
fn vector_swizzle(name: &str, n: u8) -> Option<u8> {
    if name.is_empty() || name.len() > 4 {
        return None;
    }
    let index_in = |set: &str, c: char| set.find(c);
    let set = if name.chars().all(|c| index_in("xyzw", c).is_some()) {
        "xyzw"
    } else if name.chars().all(|c| index_in("rgba", c).is_some()) {
        "rgba"
    } else {
        return None;
    };
    let in_range = name
        .chars()
        .all(|c| index_in(set, c).is_some_and(|i| i < usize::from(n)));
    in_range.then_some(name.len() as u8)
}

/// Component count of a `_m00_m01` or `_11_12` swizzle over a `rows`x`cols`
/// matrix. The two notations cannot be mixed.
fn matrix_swizzle(name: &str, rows: u8, cols: u8) -> Option<u8> {
    let parts: Vec<&str> = name.strip_prefix('_')?.split('_').collect();
    if parts.is_empty() || parts.len() > 4 {
        return None;
    }
    let zero_based = parts[0].starts_with('m');
    for part in &parts {
        let digits = if zero_based {
            part.strip_prefix('m')?
        } else {
            part
        };
        let &[r, c] = digits.as_bytes() else {
            return None;
        };
        let (r, c) = (r.checked_sub(b'0')?, c.checked_sub(b'0')?);
        let (r, c) = if zero_based {
            (r, c)
        } else {
            (r.checked_sub(1)?, c.checked_sub(1)?)
        };
        if r >= rows || c >= cols {
            return None;
        }
    }
    Some(parts.len() as u8)
}
