//! Implicit conversions and operator typing.
//!
//! Every implicit conversion has a cost. Overload resolution prefers the
//! candidate with the most exact arguments, then the lowest total cost.
//!
//! | from \ to        | cost |
//! |------------------|------|
//! | same scalar      | 0    |
//! | float widening   | 1 to `float`, 2 otherwise |
//! | float narrowing  | 3    |
//! | int to float     | 2 to `float`, 3 otherwise |
//! | int widening     | 1    |
//! | other int to int | 2    |
//! | float to int     | 4    |
//! | bool to numeric  | 2    |
//! | numeric to bool  | 4    |
//!
//! Shape changes add to the scalar cost: a scalar splat costs 1, a
//! vector/matrix reinterpretation with the same component count costs 2, and
//! a truncation costs 4 and warns.

use crate::parser::SyntaxKind;

use super::symbols::{ObjectKind, ScalarType, Shape, SymbolId, TypeKind};
use super::table::SymbolTable;

/// Cost of a shape-preserving conversion between two scalars.
pub fn scalar_cost(from: ScalarType, to: ScalarType) -> u32 {
    if from == to {
        return 0;
    }
    if from.is_bool() {
        return 2;
    }
    if to.is_bool() {
        return 4;
    }
    match (from.is_float(), to.is_float()) {
        (true, true) if to.rank() > from.rank() => {
            if to == ScalarType::Float {
                1
            } else {
                2
            }
        }
        (true, true) => 3,
        (false, true) => {
            if to == ScalarType::Float {
                2
            } else {
                3
            }
        }
        (true, false) => 4,
        (false, false) if is_unsigned(from) == is_unsigned(to) && to.rank() > from.rank() => 1,
        (false, false) => 2,
    }
}

fn is_unsigned(scalar: ScalarType) -> bool {
    matches!(scalar, ScalarType::Min16Uint | ScalarType::Uint)
}

/// Cost of reshaping, and whether components are dropped.
pub fn shape_cost(from: Shape, to: Shape) -> Option<(u32, bool)> {
    use Shape::*;

    if from == to {
        return Some((0, false));
    }
    match (from, to) {
        (_, Scalar) if from.components() == 1 => Some((0, false)),
        (_, Scalar) => Some((4, true)),
        (Scalar | Vector(1), _) => Some((1, false)),
        (Vector(n), Vector(m)) if m < n => Some((4, true)),
        (Matrix(r, c), Matrix(r2, c2)) if r2 <= r && c2 <= c => Some((4, true)),
        (Vector(_), Matrix(_, _)) | (Matrix(_, _), Vector(_)) if from.components() == to.components() => {
            Some((2, false))
        }
        _ => None,
    }
}

/// An implicit conversion from one type to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub cost: u32,
    /// No conversion is needed, or none could be reported.
    pub exact: bool,
    pub truncates: bool,
}

impl Conversion {
    pub const IDENTITY: Conversion = Conversion {
        cost: 0,
        exact: true,
        truncates: false,
    };

    fn implicit(cost: u32, truncates: bool) -> Self {
        Self {
            cost,
            exact: false,
            truncates,
        }
    }
}

/// The implicit conversion from `from` to `to`, if one exists.
///
/// Error and unknown types convert to anything without cost, so a
/// failure is reported once at its source.
pub fn classify(table: &SymbolTable, from: SymbolId, to: SymbolId) -> Option<Conversion> {
    let (from, to) = (table.resolve_alias(from), table.resolve_alias(to));
    if from == to {
        return Some(Conversion::IDENTITY);
    }
    let (from_kind, to_kind) = (table.type_kind(from), table.type_kind(to));
    if from_kind.is_error_or_unknown() || to_kind.is_error_or_unknown() {
        return Some(Conversion::IDENTITY);
    }
    match (from_kind, to_kind) {
        (from_kind, to_kind) if from_kind.is_numeric() && to_kind.is_numeric() => {
            numeric_conversion(from_kind, to_kind)
        }
        (
            TypeKind::Array { element, size },
            TypeKind::Array {
                element: to_element,
                size: to_size,
            },
        ) => {
            let same_element = table.resolve_alias(*element) == table.resolve_alias(*to_element);
            (same_element && (to_size.is_none() || size == to_size)).then_some(Conversion::IDENTITY)
        }
        (
            TypeKind::Object { kind, element },
            TypeKind::Object {
                kind: to_kind,
                element: to_element,
            },
        ) => object_conversion(table, (*kind, *element), (*to_kind, *to_element)),
        _ => None,
    }
}

fn numeric_conversion(from: &TypeKind, to: &TypeKind) -> Option<Conversion> {
    let (from_scalar, from_shape) = (from.scalar_type()?, from.shape()?);
    let (to_scalar, to_shape) = (to.scalar_type()?, to.shape()?);
    let (shape, truncates) = shape_cost(from_shape, to_shape)?;
    Some(Conversion::implicit(scalar_cost(from_scalar, to_scalar) + shape, truncates))
}

fn object_conversion(
    table: &SymbolTable,
    (kind, element): (ObjectKind, Option<SymbolId>),
    (to_kind, to_element): (ObjectKind, Option<SymbolId>),
) -> Option<Conversion> {
    let same_element = match (element, to_element) {
        (Some(a), Some(b)) => table.resolve_alias(a) == table.resolve_alias(b),
        _ => true,
    };
    if kind == to_kind {
        return same_element.then_some(Conversion::IDENTITY);
    }
    // Legacy `sampler` stands in for any sampler object.
    let is_sampler = |k: ObjectKind| {
        matches!(
            k,
            ObjectKind::SamplerState | ObjectKind::SamplerComparisonState | ObjectKind::LegacySampler(_)
        )
    };
    (is_sampler(kind) && is_sampler(to_kind)).then_some(Conversion::implicit(1, false))
}

/// Like [`classify`], for a literal argument. Literals adapt to any numeric
/// target, so the conversion always counts as exact.
pub fn classify_literal(table: &SymbolTable, from: SymbolId, to: SymbolId) -> Option<Conversion> {
    let conversion = classify(table, from, to)?;
    let to_numeric = table.type_kind(to).is_numeric();
    Some(Conversion {
        exact: conversion.exact || to_numeric,
        ..conversion
    })
}

// ============================================================================
// OPERATORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    /// `+ - * / %`
    Arithmetic,
    /// `< > <= >= == !=`
    Comparison,
    /// `&& ||`
    Logical,
    /// `& | ^ << >>`
    Bitwise,
}

pub fn operator_class(op: SyntaxKind) -> Option<OperatorClass> {
    use SyntaxKind::*;
    let class = match op {
        PLUS | MINUS | STAR | SLASH | PERCENT => OperatorClass::Arithmetic,
        LT | GT | LT_EQ | GT_EQ | EQ_EQ | BANG_EQ => OperatorClass::Comparison,
        AMP_AMP | PIPE_PIPE => OperatorClass::Logical,
        AMP | PIPE | CARET | LT_LT | GT_GT => OperatorClass::Bitwise,
        _ => return None,
    };
    Some(class)
}

/// The binary operator a compound assignment applies, `+=` to `+`.
pub fn compound_assignment_operator(op: SyntaxKind) -> Option<SyntaxKind> {
    use SyntaxKind::*;
    let binary = match op {
        PLUS_EQ => PLUS,
        MINUS_EQ => MINUS,
        STAR_EQ => STAR,
        SLASH_EQ => SLASH,
        PERCENT_EQ => PERCENT,
        AMP_EQ => AMP,
        PIPE_EQ => PIPE,
        CARET_EQ => CARET,
        LT_LT_EQ => LT_LT,
        GT_GT_EQ => GT_GT,
        _ => return None,
    };
    Some(binary)
}

/// Type of a binary operation, and whether an operand was truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorResult {
    pub ty: SymbolId,
    pub truncates: bool,
}

/// Shape both operands are brought to: scalars splat, mismatched vectors
/// and matrices truncate to the smaller one.
fn common_shape(lhs: Shape, rhs: Shape) -> Option<(Shape, bool)> {
    use Shape::*;
    match (lhs, rhs) {
        _ if lhs == rhs => Some((lhs, false)),
        (Scalar | Vector(1), other) | (other, Scalar | Vector(1)) => Some((other, false)),
        (Vector(a), Vector(b)) => Some((Vector(a.min(b)), true)),
        (Matrix(r1, c1), Matrix(r2, c2)) => Some((Matrix(r1.min(r2), c1.min(c2)), true)),
        _ => None,
    }
}

/// Result type of `lhs op rhs`. `None` when the operands don't support it.
pub fn binary_result(table: &SymbolTable, op: SyntaxKind, lhs: SymbolId, rhs: SymbolId) -> Option<OperatorResult> {
    let class = operator_class(op)?;
    let (lhs_kind, rhs_kind) = (table.type_kind(lhs), table.type_kind(rhs));
    if lhs_kind == &TypeKind::Error || rhs_kind == &TypeKind::Error {
        return Some(OperatorResult {
            ty: table.error_type(),
            truncates: false,
        });
    }
    if lhs_kind.is_error_or_unknown() || rhs_kind.is_error_or_unknown() {
        return Some(OperatorResult {
            ty: table.unknown_type(),
            truncates: false,
        });
    }
    let (lhs_scalar, lhs_shape) = (lhs_kind.scalar_type()?, lhs_kind.shape()?);
    let (rhs_scalar, rhs_shape) = (rhs_kind.scalar_type()?, rhs_kind.shape()?);
    let (shape, truncates) = common_shape(lhs_shape, rhs_shape)?;
    let promoted = lhs_scalar.max(rhs_scalar);
    let scalar = match class {
        OperatorClass::Comparison | OperatorClass::Logical => ScalarType::Bool,
        OperatorClass::Arithmetic if promoted.is_bool() => ScalarType::Int,
        OperatorClass::Arithmetic => promoted,
        OperatorClass::Bitwise if promoted.is_float() => return None,
        OperatorClass::Bitwise => promoted,
    };
    Some(OperatorResult {
        ty: table.numeric(scalar, shape),
        truncates,
    })
}

/// Type both branches of `c ? a : b` convert to.
pub fn common_type(table: &SymbolTable, a: SymbolId, b: SymbolId) -> Option<OperatorResult> {
    let (a, b) = (table.resolve_alias(a), table.resolve_alias(b));
    let (a_kind, b_kind) = (table.type_kind(a), table.type_kind(b));
    if a == b || b_kind.is_error_or_unknown() {
        return Some(OperatorResult { ty: a, truncates: false });
    }
    if a_kind.is_error_or_unknown() {
        return Some(OperatorResult { ty: b, truncates: false });
    }
    let (shape, truncates) = common_shape(a_kind.shape()?, b_kind.shape()?)?;
    let scalar = a_kind.scalar_type()?.max(b_kind.scalar_type()?);
    Some(OperatorResult {
        ty: table.numeric(scalar, shape),
        truncates,
    })
}

/// Source spelling of an operator token.
pub fn operator_text(op: SyntaxKind) -> &'static str {
    use SyntaxKind::*;
    match op {
        PLUS => "+",
        MINUS => "-",
        STAR => "*",
        SLASH => "/",
        PERCENT => "%",
        PLUS_PLUS => "++",
        MINUS_MINUS => "--",
        AMP => "&",
        PIPE => "|",
        CARET => "^",
        TILDE => "~",
        BANG => "!",
        AMP_AMP => "&&",
        PIPE_PIPE => "||",
        LT => "<",
        GT => ">",
        LT_EQ => "<=",
        GT_EQ => ">=",
        EQ_EQ => "==",
        BANG_EQ => "!=",
        LT_LT => "<<",
        GT_GT => ">>",
        EQ => "=",
        PLUS_EQ => "+=",
        MINUS_EQ => "-=",
        STAR_EQ => "*=",
        SLASH_EQ => "/=",
        PERCENT_EQ => "%=",
        AMP_EQ => "&=",
        PIPE_EQ => "|=",
        CARET_EQ => "^=",
        LT_LT_EQ => "<<=",
        GT_GT_EQ => ">>=",
        _ => "?",
    }
}

/// Result type of a prefix or postfix operator applied to `operand`.
pub fn unary_result(table: &SymbolTable, op: SyntaxKind, operand: SymbolId) -> Option<SymbolId> {
    let kind = table.type_kind(operand);
    if kind.is_error_or_unknown() {
        return Some(operand);
    }
    let (scalar, shape) = (kind.scalar_type()?, kind.shape()?);
    match op {
        SyntaxKind::BANG => Some(table.numeric(ScalarType::Bool, shape)),
        SyntaxKind::TILDE if scalar.is_float() => None,
        SyntaxKind::TILDE | SyntaxKind::PLUS | SyntaxKind::MINUS if scalar.is_bool() => {
            Some(table.numeric(ScalarType::Int, shape))
        }
        SyntaxKind::TILDE | SyntaxKind::PLUS | SyntaxKind::MINUS => Some(operand),
        SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS if scalar.is_bool() => None,
        SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => Some(operand),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use ScalarType::*;

    #[rstest]
    #[case(Float, Float, 0)]
    #[case(Half, Float, 1)]
    #[case(Half, Double, 2)]
    #[case(Double, Float, 3)]
    #[case(Int, Float, 2)]
    #[case(Int, Double, 3)]
    #[case(Min16Int, Int, 1)]
    #[case(Int, Uint, 2)]
    #[case(Float, Int, 4)]
    #[case(Bool, Float, 2)]
    #[case(Float, Bool, 4)]
    fn test_scalar_cost(#[case] from: ScalarType, #[case] to: ScalarType, #[case] cost: u32) {
        assert_eq!(scalar_cost(from, to), cost);
    }

    #[rstest]
    #[case(Shape::Scalar, Shape::Vector(4), Some((1, false)))]
    #[case(Shape::Vector(4), Shape::Vector(3), Some((4, true)))]
    #[case(Shape::Vector(3), Shape::Vector(4), None)]
    #[case(Shape::Vector(4), Shape::Scalar, Some((4, true)))]
    #[case(Shape::Vector(1), Shape::Scalar, Some((0, false)))]
    #[case(Shape::Vector(4), Shape::Matrix(2, 2), Some((2, false)))]
    #[case(Shape::Matrix(4, 4), Shape::Matrix(3, 3), Some((4, true)))]
    #[case(Shape::Matrix(3, 3), Shape::Vector(4), None)]
    fn test_shape_cost(#[case] from: Shape, #[case] to: Shape, #[case] expected: Option<(u32, bool)>) {
        assert_eq!(shape_cost(from, to), expected);
    }

    #[test]
    fn test_classify() {
        let table = SymbolTable::new();
        let float = table.numeric(Float, Shape::Scalar);
        let float3 = table.numeric(Float, Shape::Vector(3));
        let int = table.numeric(Int, Shape::Scalar);

        assert_eq!(classify(&table, float, float), Some(Conversion::IDENTITY));
        let splat = classify(&table, int, float3).unwrap();
        assert_eq!(splat.cost, 3);
        assert!(!splat.exact);
        assert!(classify(&table, float3, float).unwrap().truncates);
        assert!(classify(&table, table.error_type(), float3).unwrap().exact);
        assert!(classify(&table, table.intrinsics().void(), float).is_none());
        assert!(classify_literal(&table, int, float).unwrap().exact);
    }

    #[test]
    fn test_binary_promotion() {
        let table = SymbolTable::new();
        let float = table.numeric(Float, Shape::Scalar);
        let float3 = table.numeric(Float, Shape::Vector(3));
        let float4 = table.numeric(Float, Shape::Vector(4));
        let int = table.numeric(Int, Shape::Scalar);

        let sum = binary_result(&table, SyntaxKind::STAR, int, float3).unwrap();
        assert_eq!(sum.ty, float3);
        assert!(!sum.truncates);

        let mixed = binary_result(&table, SyntaxKind::PLUS, float4, float3).unwrap();
        assert_eq!(mixed.ty, float3);
        assert!(mixed.truncates);

        let cmp = binary_result(&table, SyntaxKind::LT, float3, float).unwrap();
        assert_eq!(cmp.ty, table.numeric(Bool, Shape::Vector(3)));

        assert!(binary_result(&table, SyntaxKind::AMP, float, int).is_none());
        assert_eq!(unary_result(&table, SyntaxKind::BANG, float4), Some(table.numeric(Bool, Shape::Vector(4))));
        assert!(unary_result(&table, SyntaxKind::TILDE, float).is_none());
    }

    #[test]
    fn test_common_type() {
        let table = SymbolTable::new();
        let float = table.numeric(Float, Shape::Scalar);
        let int3 = table.numeric(Int, Shape::Vector(3));

        let common = common_type(&table, float, int3).unwrap();
        assert_eq!(common.ty, table.numeric(Float, Shape::Vector(3)));
        assert_eq!(common_type(&table, table.error_type(), int3).unwrap().ty, int3);
        assert!(common_type(&table, table.intrinsics().void(), float).is_none());
    }

    #[test]
    fn test_compound_assignment_operator() {
        assert_eq!(compound_assignment_operator(SyntaxKind::PLUS_EQ), Some(SyntaxKind::PLUS));
        assert_eq!(compound_assignment_operator(SyntaxKind::EQ), None);
    }
}
