//! Grouping symbols by name for display.
//!
//! Completion lists and hovers show one entry per name. How the entry reads
//! depends on what shares the name:
//!
//! ```text
//! one symbol                         → Single
//! functions only                     → Overloads      "(+ 2 more overloads)"
//! a numeric type and its constructor → NumericType
//! anything else                      → Ambiguous      "Ambiguous name"
//! ```

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::markup::symbol_markup;
use super::symbols::SymbolId;
use super::table::SymbolTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolGroup {
    Single(SymbolId),
    Overloads { first: SymbolId, additional: Vec<SymbolId> },
    /// `float4` the type together with `float4(...)` the constructor.
    NumericType(SymbolId),
    Ambiguous(Vec<SymbolId>),
}

impl SymbolGroup {
    /// The symbol that stands for the group.
    pub fn primary(&self) -> SymbolId {
        match self {
            Self::Single(id) | Self::NumericType(id) => *id,
            Self::Overloads { first, .. } => *first,
            Self::Ambiguous(ids) => ids[0],
        }
    }

    pub fn symbols(&self) -> Vec<SymbolId> {
        match self {
            Self::Single(id) | Self::NumericType(id) => vec![*id],
            Self::Overloads { first, additional } => std::iter::once(*first).chain(additional.iter().copied()).collect(),
            Self::Ambiguous(ids) => ids.clone(),
        }
    }

    pub fn name<'t>(&self, table: &'t SymbolTable) -> &'t str {
        table.get(self.primary()).name()
    }

    /// Display text for the group.
    pub fn description(&self, table: &SymbolTable) -> String {
        match self {
            Self::Single(id) | Self::NumericType(id) => symbol_markup(table, table.get(*id)),
            Self::Overloads { first, additional } => {
                let markup = symbol_markup(table, table.get(*first));
                match additional.len() {
                    0 => markup,
                    1 => format!("{} (+ 1 more overload)", markup),
                    n => format!("{} (+ {} more overloads)", markup, n),
                }
            }
            Self::Ambiguous(ids) => {
                let mut text = String::from("Ambiguous name");
                for &id in ids {
                    text.push('\n');
                    text.push_str(&symbol_markup(table, table.get(id)));
                }
                text
            }
        }
    }
}

/// Group `symbols` by name, keeping first-seen order.
pub fn group_symbols(table: &SymbolTable, symbols: &[SymbolId]) -> Vec<SymbolGroup> {
    let mut by_name: IndexMap<SmolStr, Vec<SymbolId>> = IndexMap::new();
    for &id in symbols {
        let ids = by_name.entry(SmolStr::new(table.get(id).name())).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    by_name
        .into_values()
        .map(|ids| classify_group(table, ids))
        .collect()
}

fn classify_group(table: &SymbolTable, ids: Vec<SymbolId>) -> SymbolGroup {
    if let [single] = ids.as_slice() {
        return SymbolGroup::Single(*single);
    }
    if ids.iter().all(|&id| table.get(id).is_invocable()) {
        if let Some((&first, rest)) = ids.split_first() {
            return SymbolGroup::Overloads {
                first,
                additional: rest.to_vec(),
            };
        }
    }
    let numeric_types: Vec<SymbolId> = ids
        .iter()
        .copied()
        .filter(|&id| table.is_intrinsic_numeric_type(id))
        .collect();
    let only_numeric = ids
        .iter()
        .all(|&id| table.is_intrinsic_numeric_type(id) || table.is_numeric_constructor(id));
    match numeric_types.as_slice() {
        [ty] if only_numeric => SymbolGroup::NumericType(*ty),
        _ => SymbolGroup::Ambiguous(ids),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::symbols::{FunctionSymbol, ScalarType, Shape, SymbolKind, VariableKind, VariableSymbol};

    fn foo(table: &mut SymbolTable) -> SymbolId {
        let kind = SymbolKind::Function(FunctionSymbol {
            return_type: table.intrinsics().void(),
            parameters: Vec::new(),
            is_intrinsic: false,
            is_numeric_constructor: false,
            has_body: true,
            semantic: None,
        });
        table.add_symbol("foo", kind, None, None, None)
    }

    #[test]
    fn test_overloads_collapse() {
        let mut table = SymbolTable::new();
        let ids = [foo(&mut table), foo(&mut table), foo(&mut table)];

        let groups = group_symbols(&table, &ids);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0],
            SymbolGroup::Overloads {
                first: ids[0],
                additional: vec![ids[1], ids[2]],
            }
        );
        assert!(groups[0].description(&table).ends_with("(+ 2 more overloads)"));
    }

    #[test]
    fn test_numeric_type_and_constructor() {
        let table = SymbolTable::new();
        let ids = table.intrinsics().lookup("float4").to_vec();
        assert_eq!(ids.len(), 2);

        let groups = group_symbols(&table, &ids);
        let float4 = table.numeric(ScalarType::Float, Shape::Vector(4));
        assert_eq!(groups, vec![SymbolGroup::NumericType(float4)]);
    }

    #[test]
    fn test_ambiguous_group() {
        let mut table = SymbolTable::new();
        let function = foo(&mut table);
        let ty = table.numeric(ScalarType::Float, Shape::Vector(4));
        let variable = table.add_symbol(
            "foo",
            SymbolKind::Variable(VariableSymbol {
                kind: VariableKind::Global,
                ty,
                is_const: false,
                is_static: false,
                semantic: None,
            }),
            None,
            None,
            None,
        );

        let groups = group_symbols(&table, &[variable, function]);
        assert_eq!(groups, vec![SymbolGroup::Ambiguous(vec![variable, function])]);
        let description = groups[0].description(&table);
        assert!(description.starts_with("Ambiguous name"));
        assert_eq!(description.lines().count(), 3);
    }
}
