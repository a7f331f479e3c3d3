use super::*;

ast_enum! {
    Expr {
        Literal(LiteralExpr),
        Identifier(IdentifierExpr),
        Paren(ParenExpr),
        Cast(CastExpr),
        NumericConstructor(NumericConstructorExpr),
        FunctionInvocation(FunctionInvocationExpr),
        MethodInvocation(MethodInvocationExpr),
        FieldAccess(FieldAccessExpr),
        ElementAccess(ElementAccessExpr),
        PrefixUnary(PrefixUnaryExpr),
        PostfixUnary(PostfixUnaryExpr),
        Binary(BinaryExpr),
        Conditional(ConditionalExpr),
        Assignment(AssignmentExpr),
        Compound(CompoundExpr),
        ArrayInitializer(ArrayInitializerExpr),
    }
}

/// Operator token of an operator expression: its first direct non-trivia token.
fn operator_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    first_significant_token(node)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Float,
    String,
    Bool,
}

ast_node!(LiteralExpr, LITERAL_EXPR);

impl LiteralExpr {
    pub fn token(&self) -> Option<SyntaxToken> {
        first_significant_token(&self.0)
    }

    token_to_enum_method!(kind, LiteralKind, [
        INT_LITERAL => Int,
        FLOAT_LITERAL => Float,
        STRING_LITERAL => String,
        TRUE_KW => Bool,
        FALSE_KW => Bool,
    ]);
}

ast_node!(IdentifierExpr, IDENTIFIER_EXPR);

impl IdentifierExpr {
    first_child_method!(name_ref, NameRef);
}

ast_node!(ParenExpr, PAREN_EXPR);

impl ParenExpr {
    first_child_method!(expr, Expr);
}

ast_node!(CastExpr, CAST_EXPR);

impl CastExpr {
    first_child_method!(ty, Type);
    children_method!(array_ranks, ArrayRankSpecifier);
    first_child_method!(expr, Expr);
}

ast_node!(NumericConstructorExpr, NUMERIC_CONSTRUCTOR_EXPR);

impl NumericConstructorExpr {
    first_child_method!(ty, Type);
    first_child_method!(argument_list, ArgumentList);
}

ast_node!(FunctionInvocationExpr, FUNCTION_INVOCATION_EXPR);

impl FunctionInvocationExpr {
    first_child_method!(name_ref, NameRef);
    first_child_method!(argument_list, ArgumentList);
}

ast_node!(MethodInvocationExpr, METHOD_INVOCATION_EXPR);

impl MethodInvocationExpr {
    first_child_method!(receiver, Expr);
    first_child_method!(name_ref, NameRef);
    first_child_method!(argument_list, ArgumentList);
}

ast_node!(FieldAccessExpr, FIELD_ACCESS_EXPR);

impl FieldAccessExpr {
    first_child_method!(receiver, Expr);
    first_child_method!(name_ref, NameRef);
}

ast_node!(ElementAccessExpr, ELEMENT_ACCESS_EXPR);

impl ElementAccessExpr {
    nth_child_method!(base, Expr, 0);
    nth_child_method!(index, Expr, 1);
}

ast_node!(PrefixUnaryExpr, PREFIX_UNARY_EXPR);

impl PrefixUnaryExpr {
    first_child_method!(operand, Expr);

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        operator_token(&self.0).map(|t| t.kind())
    }
}

ast_node!(PostfixUnaryExpr, POSTFIX_UNARY_EXPR);

impl PostfixUnaryExpr {
    first_child_method!(operand, Expr);

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        operator_token(&self.0).map(|t| t.kind())
    }
}

ast_node!(BinaryExpr, BINARY_EXPR);

impl BinaryExpr {
    nth_child_method!(lhs, Expr, 0);
    nth_child_method!(rhs, Expr, 1);

    pub fn op_token(&self) -> Option<SyntaxToken> {
        operator_token(&self.0)
    }

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        self.op_token().map(|t| t.kind())
    }
}

ast_node!(ConditionalExpr, CONDITIONAL_EXPR);

impl ConditionalExpr {
    nth_child_method!(condition, Expr, 0);
    nth_child_method!(then_expr, Expr, 1);
    nth_child_method!(else_expr, Expr, 2);
}

ast_node!(AssignmentExpr, ASSIGNMENT_EXPR);

impl AssignmentExpr {
    nth_child_method!(lhs, Expr, 0);
    nth_child_method!(rhs, Expr, 1);

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        operator_token(&self.0).map(|t| t.kind())
    }
}

ast_node!(CompoundExpr, COMPOUND_EXPR);

impl CompoundExpr {
    children_method!(exprs, Expr);
}

ast_node!(ArrayInitializerExpr, ARRAY_INITIALIZER_EXPR);

impl ArrayInitializerExpr {
    children_method!(elements, Expr);
}

ast_node!(ArgumentList, ARGUMENT_LIST);

impl ArgumentList {
    children_method!(args, Expr);
}
