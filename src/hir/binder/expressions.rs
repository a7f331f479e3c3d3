//! Expression binding: name lookup, calls and expression types.

use crate::base::TextRange;
use crate::parser::{
    ArgumentList, AssignmentExpr, AstNode, BinaryExpr, CastExpr, ConditionalExpr, ElementAccessExpr, Expr,
    FieldAccessExpr, FunctionInvocationExpr, LiteralExpr, LiteralKind, MAX_NESTING_DEPTH, MethodInvocationExpr,
    NameRef, NumericConstructorExpr, SyntaxKind,
};

use super::super::bound::{BoundExpr, BoundKind};
use super::super::conversions::{
    binary_result, classify, classify_literal, common_type, compound_assignment_operator, operator_text, unary_result,
};
use super::super::diagnostics::{Diagnostic, codes};
use super::super::symbols::{ScalarType, Shape, SymbolId, SymbolKind, TypeKind};
use super::{Argument, Binder, Resolution, resolve_overload};

impl Binder<'_> {
    /// Bind `expr` and everything below it. Always records a bound node.
    pub(super) fn bind_expr(&mut self, expr: &Expr) -> BoundExpr {
        // Past the parser's nesting limit the tree is already reported
        let bound = if self.expr_depth >= MAX_NESTING_DEPTH {
            BoundExpr::new(self.table.error_type())
        } else {
            self.expr_depth += 1;
            let bound = self.bind_expr_kind(expr);
            self.expr_depth -= 1;
            bound
        };
        self.bound
            .insert(self.file, expr.syntax(), BoundKind::Expr(bound.clone()));
        bound
    }

    fn bind_expr_kind(&mut self, expr: &Expr) -> BoundExpr {
        match expr {
            Expr::Literal(literal) => BoundExpr::new(self.literal_type(literal)),
            Expr::Identifier(ident) => match ident.name_ref() {
                Some(name_ref) => self.bind_name(&name_ref),
                None => BoundExpr::new(self.table.error_type()),
            },
            Expr::Paren(paren) => match paren.expr() {
                Some(inner) => self.bind_expr(&inner),
                None => BoundExpr::new(self.table.error_type()),
            },
            Expr::Cast(cast) => self.bind_cast(cast),
            Expr::NumericConstructor(constructor) => self.bind_numeric_constructor(constructor),
            Expr::FunctionInvocation(call) => self.bind_function_call(call),
            Expr::MethodInvocation(call) => self.bind_method_call(call),
            Expr::FieldAccess(access) => self.bind_field_access(access),
            Expr::ElementAccess(access) => self.bind_element_access(access),
            Expr::PrefixUnary(unary) => self.bind_unary(expr, unary.operand(), unary.op_kind()),
            Expr::PostfixUnary(unary) => self.bind_unary(expr, unary.operand(), unary.op_kind()),
            Expr::Binary(binary) => self.bind_binary(binary),
            Expr::Conditional(conditional) => self.bind_conditional(conditional),
            Expr::Assignment(assignment) => self.bind_assignment(assignment),
            Expr::Compound(compound) => {
                let mut last = BoundExpr::new(self.table.unknown_type());
                for inner in compound.exprs() {
                    last = BoundExpr::new(self.bind_expr(&inner).ty);
                }
                last
            }
            Expr::ArrayInitializer(init) => {
                for element in init.elements() {
                    self.bind_expr(&element);
                }
                BoundExpr::new(self.table.unknown_type())
            }
        }
    }

    fn literal_type(&self, literal: &LiteralExpr) -> SymbolId {
        let text = literal.token().map(|t| t.text().to_string()).unwrap_or_default();
        let scalar = match literal.kind() {
            Some(LiteralKind::Int) if text.ends_with(['u', 'U']) => ScalarType::Uint,
            Some(LiteralKind::Int) => ScalarType::Int,
            Some(LiteralKind::Float) if text.ends_with(['h', 'H']) => ScalarType::Half,
            Some(LiteralKind::Float) if text.ends_with(['l', 'L']) => ScalarType::Double,
            Some(LiteralKind::Float) => ScalarType::Float,
            Some(LiteralKind::Bool) => ScalarType::Bool,
            Some(LiteralKind::String) => return self.table.intrinsics().string(),
            None => return self.table.error_type(),
        };
        self.table.numeric(scalar, Shape::Scalar)
    }

    fn reference(&mut self, name_ref: &NameRef, symbol: Option<SymbolId>, candidates: Vec<SymbolId>) {
        self.bound
            .insert(self.file, name_ref.syntax(), BoundKind::Reference { symbol, candidates });
    }

    /// A value-producing reference to `id`.
    fn value_expr(&self, id: SymbolId) -> BoundExpr {
        let symbol = self.table.get(id);
        let ty = symbol.value_type().unwrap_or(self.table.error_type());
        let bound = BoundExpr::new(ty).with_symbol(Some(id));
        match symbol.kind() {
            SymbolKind::Variable(v) if !v.is_const => bound.lvalue(),
            _ => bound,
        }
    }

    // ------------------------------------------------------------------------
    // Names
    // ------------------------------------------------------------------------

    fn bind_name(&mut self, name_ref: &NameRef) -> BoundExpr {
        let Some(name) = name_ref.text() else {
            return BoundExpr::new(self.table.error_type());
        };
        let range = name_ref.syntax().text_range();
        let found = self.table.lookup_value(self.scope, &name);
        let bound = match found.as_slice() {
            [] => self.bind_unresolved_name(&name, range),
            [single] => self.value_expr(*single),
            // An overload set outside a call stays unresolved
            all if all.iter().all(|&id| self.table.get(id).is_invocable()) => {
                BoundExpr::new(self.table.unknown_type()).with_candidates(found.clone())
            }
            _ => {
                self.ambiguous(range, &name, &found);
                BoundExpr::new(self.table.error_type()).with_candidates(found.clone())
            }
        };
        self.reference(name_ref, bound.symbol, bound.candidates.clone());
        bound
    }

    /// A name with no value in scope: a macro, a type, or an error.
    fn bind_unresolved_name(&mut self, name: &str, range: TextRange) -> BoundExpr {
        if let Some(id) = self.macro_symbol(name, range.start()) {
            return BoundExpr::new(self.table.unknown_type()).with_symbol(Some(id));
        }
        let ty = self
            .table
            .lookup_type(self.scope, name)
            .or_else(|| self.table.intrinsics().type_by_name(name));
        if let Some(ty) = ty {
            return BoundExpr::new(ty).with_symbol(Some(ty));
        }
        self.diagnostics.undefined_reference(self.file, range, name);
        BoundExpr::new(self.table.error_type())
    }

    // ------------------------------------------------------------------------
    // Calls
    // ------------------------------------------------------------------------

    fn bind_arguments(&mut self, list: Option<ArgumentList>) -> Vec<Argument> {
        let Some(list) = list else {
            return Vec::new();
        };
        list.args()
            .map(|arg| Argument {
                ty: self.bind_expr(&arg).ty,
                is_literal: is_literal_expr(&arg),
            })
            .collect()
    }

    fn bind_function_call(&mut self, call: &FunctionInvocationExpr) -> BoundExpr {
        let args = self.bind_arguments(call.argument_list());
        let Some(name_ref) = call.name_ref() else {
            return BoundExpr::new(self.table.error_type());
        };
        let Some(name) = name_ref.text() else {
            return BoundExpr::new(self.table.error_type());
        };
        let range = name_ref.syntax().text_range();
        let found = self.table.lookup_value(self.scope, &name);
        let invocable: Vec<SymbolId> = found
            .iter()
            .copied()
            .filter(|&id| self.table.get(id).is_invocable())
            .collect();

        let bound = if !invocable.is_empty() {
            self.resolve_call(&name, range, &invocable, &args)
        } else if let Some(&first) = found.first() {
            self.diagnostics.error(
                self.file,
                range,
                codes::NOT_INVOCABLE,
                format!("'{}' is not a function", name),
            );
            BoundExpr::new(self.table.error_type()).with_candidates(vec![first])
        } else if let Some(ty) = self.table.lookup_type(self.scope, &name) {
            // `S(...)` reads as a constructor-like cast
            BoundExpr::new(ty).with_symbol(Some(ty))
        } else if let Some(id) = self.macro_symbol(&name, range.start()) {
            BoundExpr::new(self.table.unknown_type()).with_symbol(Some(id))
        } else {
            self.diagnostics.undefined_reference(self.file, range, &name);
            BoundExpr::new(self.table.error_type())
        };
        let candidates = match bound.symbol {
            Some(_) => Vec::new(),
            None => bound.candidates.clone(),
        };
        self.reference(&name_ref, bound.symbol, candidates);
        bound
    }

    fn bind_method_call(&mut self, call: &MethodInvocationExpr) -> BoundExpr {
        let receiver = match call.receiver() {
            Some(receiver) => self.bind_expr(&receiver),
            None => BoundExpr::new(self.table.error_type()),
        };
        let args = self.bind_arguments(call.argument_list());
        let Some(name_ref) = call.name_ref() else {
            return BoundExpr::new(self.table.error_type());
        };
        let name = name_ref.text().unwrap_or_default();
        let range = name_ref.syntax().text_range();
        if self.table.type_kind(receiver.ty).is_error_or_unknown() {
            self.reference(&name_ref, None, Vec::new());
            return BoundExpr::new(receiver.ty);
        }
        let methods: Vec<SymbolId> = self
            .table
            .member(receiver.ty, &name)
            .into_iter()
            .filter(|&id| self.table.get(id).is_invocable())
            .collect();
        let bound = if methods.is_empty() {
            self.invalid_member(range, receiver.ty, &name);
            BoundExpr::new(self.table.error_type())
        } else {
            self.resolve_call(&name, range, &methods, &args)
        };
        self.reference(&name_ref, bound.symbol, bound.candidates.clone());
        bound
    }

    /// Resolve a call among `candidates`, reporting failures unless an
    /// argument already failed to bind.
    fn resolve_call(&mut self, name: &str, range: TextRange, candidates: &[SymbolId], args: &[Argument]) -> BoundExpr {
        let suppressed = args
            .iter()
            .any(|a| self.table.type_kind(a.ty).is_error_or_unknown());
        match resolve_overload(&self.table, candidates, args) {
            Resolution::Resolved(id) => self.value_expr(id),
            Resolution::Ambiguous(tied) => {
                let returns: Vec<SymbolId> = tied
                    .iter()
                    .filter_map(|&id| self.table.get(id).value_type())
                    .collect();
                let ty = match returns.split_first() {
                    Some((first, rest)) if rest.iter().all(|r| r == first) => *first,
                    _ if suppressed => self.table.unknown_type(),
                    _ => self.table.error_type(),
                };
                if !suppressed {
                    let mut diagnostic = Diagnostic::error(
                        self.file,
                        range,
                        codes::AMBIGUOUS_REFERENCE,
                        format!("ambiguous call to '{}': {} overloads match equally well", name, tied.len()),
                    );
                    for &id in &tied {
                        diagnostic = diagnostic.with_related(self.related_for(id));
                    }
                    self.diagnostics.add(diagnostic);
                }
                BoundExpr::new(ty).with_candidates(tied)
            }
            Resolution::NoMatch => {
                if !suppressed {
                    let arg_types: Vec<String> = args.iter().map(|a| self.table.type_name(a.ty)).collect();
                    let mut diagnostic = Diagnostic::error(
                        self.file,
                        range,
                        codes::NO_MATCHING_OVERLOAD,
                        format!("no overload of '{}' takes ({})", name, arg_types.join(", ")),
                    );
                    for &id in candidates.iter().take(8) {
                        diagnostic = diagnostic.with_related(self.related_for(id));
                    }
                    self.diagnostics.add(diagnostic);
                }
                let ty = if suppressed {
                    self.table.unknown_type()
                } else {
                    self.table.error_type()
                };
                BoundExpr::new(ty).with_candidates(candidates.to_vec())
            }
        }
    }

    fn bind_numeric_constructor(&mut self, constructor: &NumericConstructorExpr) -> BoundExpr {
        let ty = match constructor.ty() {
            Some(ty) => self.resolve_type(&ty),
            None => self.table.error_type(),
        };
        let args = self.bind_arguments(constructor.argument_list());
        let kind = self.table.type_kind(ty).clone();
        let Some(expected) = kind.component_count() else {
            return BoundExpr::new(ty);
        };

        let mut total = 0;
        for arg in &args {
            let arg_kind = self.table.type_kind(arg.ty);
            if arg_kind.is_error_or_unknown() {
                return BoundExpr::new(ty);
            }
            match arg_kind.component_count() {
                Some(count) => total += count,
                None => {
                    let found = self.table.type_name(arg.ty);
                    self.diagnostics.error(
                        self.file,
                        constructor.syntax().text_range(),
                        codes::COMPONENT_COUNT,
                        format!("'{}' cannot be used to construct a numeric value", found),
                    );
                    return BoundExpr::new(ty);
                }
            }
        }
        let splat = args.len() == 1 && total == 1;
        if total != expected && !splat {
            let name = self.table.type_name(ty);
            self.diagnostics.error(
                self.file,
                constructor.syntax().text_range(),
                codes::COMPONENT_COUNT,
                format!("'{}' needs {} components, found {}", name, expected, total),
            );
        }
        let type_name = self.table.type_name(ty);
        let symbol = self
            .table
            .intrinsics()
            .lookup(&type_name)
            .iter()
            .copied()
            .find(|&id| self.table.get(id).is_numeric_constructor());
        BoundExpr::new(ty).with_symbol(symbol)
    }

    fn bind_cast(&mut self, cast: &CastExpr) -> BoundExpr {
        let base = match cast.ty() {
            Some(ty) => self.resolve_type(&ty),
            None => self.table.error_type(),
        };
        let ty = self.with_array_ranks(base, cast.array_ranks());
        let Some(inner) = cast.expr() else {
            return BoundExpr::new(ty);
        };
        let operand = self.bind_expr(&inner);
        let (from, to) = (self.table.type_kind(operand.ty), self.table.type_kind(ty));
        // Explicit casts may truncate and reinterpret freely between numerics
        let allowed = (from.is_numeric() && to.is_numeric())
            || to == &TypeKind::Struct
            || classify(&self.table, operand.ty, ty).is_some();
        if !allowed {
            let (from, to) = (self.table.type_name(operand.ty), self.table.type_name(ty));
            self.diagnostics.error(
                self.file,
                cast.syntax().text_range(),
                codes::TYPE_MISMATCH,
                format!("cannot cast from '{}' to '{}'", from, to),
            );
        }
        BoundExpr::new(ty)
    }

    // ------------------------------------------------------------------------
    // Member and element access
    // ------------------------------------------------------------------------

    fn invalid_member(&mut self, range: TextRange, ty: SymbolId, name: &str) {
        let type_name = self.table.type_name(ty);
        self.diagnostics.error(
            self.file,
            range,
            codes::INVALID_MEMBER,
            format!("'{}' has no member '{}'", type_name, name),
        );
    }

    fn bind_field_access(&mut self, access: &FieldAccessExpr) -> BoundExpr {
        let receiver = match access.receiver() {
            Some(receiver) => self.bind_expr(&receiver),
            None => BoundExpr::new(self.table.error_type()),
        };
        let Some(name_ref) = access.name_ref() else {
            return BoundExpr::new(self.table.error_type());
        };
        let name = name_ref.text().unwrap_or_default();
        let range = name_ref.syntax().text_range();
        if self.table.type_kind(receiver.ty).is_error_or_unknown() {
            self.reference(&name_ref, None, Vec::new());
            return BoundExpr::new(receiver.ty);
        }

        let field = self
            .table
            .member(receiver.ty, &name)
            .into_iter()
            .find(|&id| self.table.get(id).as_variable().is_some());
        let field = match field {
            Some(field) => Some(field),
            None => self.table.swizzle(receiver.ty, &name),
        };
        let bound = match field {
            Some(field) => {
                let mut bound = self.value_expr(field);
                bound.is_lvalue = receiver.is_lvalue;
                bound
            }
            None => {
                self.invalid_member(range, receiver.ty, &name);
                BoundExpr::new(self.table.error_type())
            }
        };
        self.reference(&name_ref, bound.symbol, Vec::new());
        bound
    }

    fn bind_element_access(&mut self, access: &ElementAccessExpr) -> BoundExpr {
        let base = match access.base() {
            Some(base) => self.bind_expr(&base),
            None => BoundExpr::new(self.table.error_type()),
        };
        if let Some(index) = access.index() {
            let index_ty = self.bind_expr(&index).ty;
            let index_kind = self.table.type_kind(index_ty);
            let is_valid_index = index_kind.is_error_or_unknown() || index_kind.is_numeric();
            if !is_valid_index {
                let found = self.table.type_name(index_ty);
                self.diagnostics.error(
                    self.file,
                    index.syntax().text_range(),
                    codes::TYPE_MISMATCH,
                    format!("index must be numeric, found '{}'", found),
                );
            }
        }

        let kind = self.table.type_kind(base.ty).clone();
        let element = match kind {
            TypeKind::Error | TypeKind::Unknown => return BoundExpr::new(base.ty),
            TypeKind::Array { element, .. } => Some((element, base.is_lvalue)),
            TypeKind::Vector(scalar, _) => Some((self.table.numeric(scalar, Shape::Scalar), base.is_lvalue)),
            TypeKind::Matrix(scalar, _, cols) => {
                Some((self.table.numeric(scalar, Shape::Vector(cols)), base.is_lvalue))
            }
            TypeKind::Object { kind, element } if kind.is_indexable() => Some((
                element.unwrap_or(self.table.unknown_type()),
                kind.is_read_write(),
            )),
            _ => None,
        };
        match element {
            Some((ty, is_lvalue)) => BoundExpr {
                is_lvalue,
                ..BoundExpr::new(ty)
            },
            None => {
                let type_name = self.table.type_name(base.ty);
                self.diagnostics.error(
                    self.file,
                    access.syntax().text_range(),
                    codes::NOT_INDEXABLE,
                    format!("'{}' cannot be indexed", type_name),
                );
                BoundExpr::new(self.table.error_type())
            }
        }
    }

    // ------------------------------------------------------------------------
    // Operators
    // ------------------------------------------------------------------------

    fn bind_unary(&mut self, expr: &Expr, operand: Option<Expr>, op: Option<SyntaxKind>) -> BoundExpr {
        let Some(operand) = operand else {
            return BoundExpr::new(self.table.error_type());
        };
        let bound = self.bind_expr(&operand);
        let Some(op) = op else {
            return BoundExpr::new(bound.ty);
        };
        let range = expr.syntax().text_range();
        let is_increment = matches!(op, SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS);
        if is_increment && !bound.is_lvalue && !self.table.type_kind(bound.ty).is_error_or_unknown() {
            self.not_assignable(range, &operand);
        }
        match unary_result(&self.table, op, bound.ty) {
            Some(ty) => BoundExpr::new(ty),
            None => {
                let found = self.table.type_name(bound.ty);
                self.diagnostics.error(
                    self.file,
                    range,
                    codes::INVALID_OPERAND,
                    format!("operator '{}' cannot be applied to '{}'", operator_text(op), found),
                );
                BoundExpr::new(self.table.error_type())
            }
        }
    }

    fn bind_binary(&mut self, binary: &BinaryExpr) -> BoundExpr {
        let lhs = binary.lhs().map(|lhs| self.bind_expr(&lhs).ty);
        let rhs = binary.rhs().map(|rhs| self.bind_expr(&rhs).ty);
        let (Some(lhs), Some(rhs), Some(op)) = (lhs, rhs, binary.op_kind()) else {
            return BoundExpr::new(self.table.error_type());
        };
        let range = binary.syntax().text_range();
        self.apply_binary(range, op, lhs, rhs)
    }

    fn apply_binary(&mut self, range: TextRange, op: SyntaxKind, lhs: SymbolId, rhs: SymbolId) -> BoundExpr {
        match binary_result(&self.table, op, lhs, rhs) {
            Some(result) => {
                if result.truncates {
                    let (from, to) = (self.table.type_name(lhs), self.table.type_name(result.ty));
                    self.diagnostics.implicit_truncation(self.file, range, &from, &to);
                }
                BoundExpr::new(result.ty)
            }
            None => {
                let (lhs, rhs) = (self.table.type_name(lhs), self.table.type_name(rhs));
                self.diagnostics.error(
                    self.file,
                    range,
                    codes::INVALID_OPERAND,
                    format!("operator '{}' cannot be applied to '{}' and '{}'", operator_text(op), lhs, rhs),
                );
                BoundExpr::new(self.table.error_type())
            }
        }
    }

    fn bind_conditional(&mut self, conditional: &ConditionalExpr) -> BoundExpr {
        if let Some(condition) = conditional.condition() {
            self.bind_expr(&condition);
        }
        let then_ty = conditional.then_expr().map(|e| self.bind_expr(&e).ty);
        let else_ty = conditional.else_expr().map(|e| self.bind_expr(&e).ty);
        let (Some(then_ty), Some(else_ty)) = (then_ty, else_ty) else {
            return BoundExpr::new(self.table.error_type());
        };
        if let Some(result) = common_type(&self.table, then_ty, else_ty) {
            return BoundExpr::new(result.ty);
        }
        if classify(&self.table, else_ty, then_ty).is_some() {
            return BoundExpr::new(then_ty);
        }
        if classify(&self.table, then_ty, else_ty).is_some() {
            return BoundExpr::new(else_ty);
        }
        let (expected, found) = (self.table.type_name(then_ty), self.table.type_name(else_ty));
        self.diagnostics
            .type_mismatch(self.file, conditional.syntax().text_range(), &expected, &found);
        BoundExpr::new(self.table.error_type())
    }

    fn bind_assignment(&mut self, assignment: &AssignmentExpr) -> BoundExpr {
        let lhs = assignment.lhs().map(|lhs| (self.bind_expr(&lhs), lhs));
        let rhs = assignment.rhs().map(|rhs| (self.bind_expr(&rhs).ty, rhs));
        let Some((target, lhs)) = lhs else {
            return BoundExpr::new(self.table.error_type());
        };
        let range = assignment.syntax().text_range();
        if !target.is_lvalue && !self.table.type_kind(target.ty).is_error_or_unknown() {
            self.not_assignable(range, &lhs);
        }
        let Some((value, rhs)) = rhs else {
            return BoundExpr::new(target.ty);
        };
        match assignment.op_kind().and_then(compound_assignment_operator) {
            Some(op) => {
                let result = self.apply_binary(range, op, target.ty, value);
                let expr_ty = result.ty;
                if !self.table.type_kind(expr_ty).is_error_or_unknown() {
                    self.check_conversion(&rhs, expr_ty, target.ty, codes::TYPE_MISMATCH);
                }
            }
            None => self.check_conversion(&rhs, value, target.ty, codes::TYPE_MISMATCH),
        }
        BoundExpr::new(target.ty)
    }

    fn not_assignable(&mut self, range: TextRange, target: &Expr) {
        let text = target.syntax().text().to_string();
        self.diagnostics.error(
            self.file,
            range,
            codes::NOT_ASSIGNABLE,
            format!("'{}' is not assignable", text.trim()),
        );
    }

    // ------------------------------------------------------------------------
    // Conversions
    // ------------------------------------------------------------------------

    /// Report when `expr`, of type `from`, can't implicitly become `to`.
    pub(super) fn check_conversion(&mut self, expr: &Expr, from: SymbolId, to: SymbolId, code: &str) {
        let conversion = if is_literal_expr(expr) {
            classify_literal(&self.table, from, to)
        } else {
            classify(&self.table, from, to)
        };
        let range = expr.syntax().text_range();
        let (from, to) = (self.table.type_name(from), self.table.type_name(to));
        match conversion {
            None if code == codes::TYPE_MISMATCH => self.diagnostics.type_mismatch(self.file, range, &to, &from),
            None => self.diagnostics.error(
                self.file,
                range,
                code,
                format!("cannot convert '{}' to '{}'", from, to),
            ),
            Some(conversion) if conversion.truncates => {
                self.diagnostics.implicit_truncation(self.file, range, &from, &to)
            }
            Some(_) => {}
        }
    }
}

/// `1`, `(2.0)`, `-3`
fn is_literal_expr(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(_) => true,
        Expr::Paren(paren) => paren.expr().is_some_and(|e| is_literal_expr(&e)),
        Expr::PrefixUnary(unary) => {
            matches!(unary.op_kind(), Some(SyntaxKind::PLUS | SyntaxKind::MINUS))
                && unary.operand().is_some_and(|e| is_literal_expr(&e))
        }
        _ => false,
    }
}
