//! Overload resolution.

use std::cmp::Reverse;

use tracing::trace;

use super::super::conversions::{classify, classify_literal};
use super::super::symbols::SymbolId;
use super::super::table::SymbolTable;

/// A bound call argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Argument {
    pub ty: SymbolId,
    /// Literals adapt to their target type.
    pub is_literal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    Resolved(SymbolId),
    /// Several candidates ranked best, in declaration order.
    Ambiguous(Vec<SymbolId>),
    NoMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Rank {
    exact: Reverse<usize>,
    cost: u32,
    /// Defaulted parameters left unfilled.
    defaults_used: usize,
}

/// Pick the candidate `args` fit best.
///
/// Candidates are ranked by the number of arguments that need no
/// conversion, then by total conversion cost. A tie at the top is
/// ambiguous.
pub(crate) fn resolve_overload(table: &SymbolTable, candidates: &[SymbolId], args: &[Argument]) -> Resolution {
    let mut ranked: Vec<(Rank, SymbolId)> = candidates
        .iter()
        .filter_map(|&id| rank(table, id, args).map(|rank| (rank, id)))
        .collect();
    ranked.sort_by_key(|(rank, _)| *rank);

    let Some(&(best, first)) = ranked.first() else {
        return Resolution::NoMatch;
    };
    let tied: Vec<SymbolId> = ranked
        .iter()
        .take_while(|(rank, _)| *rank == best)
        .map(|(_, id)| *id)
        .collect();
    trace!(candidates = candidates.len(), viable = ranked.len(), tied = tied.len(), "resolved overload");
    if tied.len() == 1 {
        Resolution::Resolved(first)
    } else {
        Resolution::Ambiguous(tied)
    }
}

fn rank(table: &SymbolTable, id: SymbolId, args: &[Argument]) -> Option<Rank> {
    let function = table.get(id).as_function()?;
    if !function.accepts_arity(args.len()) {
        return None;
    }
    let mut exact = 0;
    let mut cost = 0;
    for (arg, parameter) in args.iter().zip(&function.parameters) {
        let conversion = if arg.is_literal {
            classify_literal(table, arg.ty, parameter.ty)?
        } else {
            classify(table, arg.ty, parameter.ty)?
        };
        if conversion.exact {
            exact += 1;
        }
        cost += conversion.cost;
    }
    Some(Rank {
        exact: Reverse(exact),
        cost,
        defaults_used: function.parameters.len() - args.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::symbols::{FunctionSymbol, ParameterInfo, ScalarType, Shape, SymbolKind};
    use crate::parser::ParameterDirection;

    fn function(table: &mut SymbolTable, parameters: &[SymbolId]) -> SymbolId {
        let parameters = parameters
            .iter()
            .enumerate()
            .map(|(i, &ty)| ParameterInfo {
                name: format!("p{}", i).into(),
                ty,
                direction: ParameterDirection::In,
                has_default: false,
            })
            .collect();
        let kind = SymbolKind::Function(FunctionSymbol {
            return_type: table.intrinsics().void(),
            parameters,
            is_intrinsic: false,
            is_numeric_constructor: false,
            has_body: true,
            semantic: None,
        });
        table.add_symbol("foo", kind, None, None, None)
    }

    fn arg(ty: SymbolId) -> Argument {
        Argument { ty, is_literal: false }
    }

    #[test]
    fn test_literal_prefers_cheapest_overload() {
        let mut table = SymbolTable::new();
        let int = table.numeric(ScalarType::Int, Shape::Scalar);
        let float = table.numeric(ScalarType::Float, Shape::Scalar);
        let float2 = table.numeric(ScalarType::Float, Shape::Vector(2));
        let foo_int = function(&mut table, &[int]);
        let foo_float = function(&mut table, &[float]);
        let foo_float2 = function(&mut table, &[float2]);
        let candidates = [foo_int, foo_float, foo_float2];

        let literal = Argument { ty: int, is_literal: true };
        assert_eq!(resolve_overload(&table, &candidates, &[literal]), Resolution::Resolved(foo_int));
        assert_eq!(resolve_overload(&table, &candidates, &[arg(float)]), Resolution::Resolved(foo_float));
        assert_eq!(resolve_overload(&table, &candidates, &[arg(float2)]), Resolution::Resolved(foo_float2));
    }

    #[test]
    fn test_no_match() {
        let mut table = SymbolTable::new();
        let float2 = table.numeric(ScalarType::Float, Shape::Vector(2));
        let float4 = table.numeric(ScalarType::Float, Shape::Vector(4));
        let foo = function(&mut table, &[float4]);

        assert_eq!(resolve_overload(&table, &[foo], &[arg(float2)]), Resolution::NoMatch);
        assert_eq!(resolve_overload(&table, &[foo], &[]), Resolution::NoMatch);
    }

    #[test]
    fn test_ambiguous_tie() {
        let mut table = SymbolTable::new();
        let int = table.numeric(ScalarType::Int, Shape::Scalar);
        let uint = table.numeric(ScalarType::Uint, Shape::Scalar);
        let foo_int_uint = function(&mut table, &[int, uint]);
        let foo_uint_int = function(&mut table, &[uint, int]);

        let resolution = resolve_overload(&table, &[foo_int_uint, foo_uint_int], &[arg(int), arg(int)]);
        assert_eq!(resolution, Resolution::Ambiguous(vec![foo_int_uint, foo_uint_int]));
    }
}
