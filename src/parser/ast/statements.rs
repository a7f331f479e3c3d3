use super::*;

ast_enum! {
    Stmt {
        Block(Block),
        Expression(ExpressionStatement),
        Empty(EmptyStatement),
        If(IfStatement),
        For(ForStatement),
        While(WhileStatement),
        Do(DoStatement),
        Switch(SwitchStatement),
        Break(BreakStatement),
        Continue(ContinueStatement),
        Return(ReturnStatement),
        Discard(DiscardStatement),
        Variables(VariableDeclarationStatement),
        TypeDeclaration(TypeDeclarationStatement),
        Typedef(TypedefStatement),
    }
}

ast_node!(Block, BLOCK);

impl Block {
    children_method!(statements, Stmt);
}

ast_node!(ExpressionStatement, EXPRESSION_STATEMENT);

impl ExpressionStatement {
    first_child_method!(expr, Expr);
}

ast_node!(EmptyStatement, EMPTY_STATEMENT);
ast_node!(BreakStatement, BREAK_STATEMENT);
ast_node!(ContinueStatement, CONTINUE_STATEMENT);
ast_node!(DiscardStatement, DISCARD_STATEMENT);

ast_node!(ReturnStatement, RETURN_STATEMENT);

impl ReturnStatement {
    first_child_method!(expr, Expr);
}

ast_node!(IfStatement, IF_STATEMENT);

impl IfStatement {
    first_child_method!(condition, Expr);
    first_child_method!(then_branch, Stmt);
    first_child_method!(else_clause, ElseClause);
}

ast_node!(ElseClause, ELSE_CLAUSE);

impl ElseClause {
    first_child_method!(statement, Stmt);
}

ast_node!(ForStatement, FOR_STATEMENT);

impl ForStatement {
    first_child_method!(declaration, VariableDeclaration);
    first_child_method!(body, Stmt);

    /// Expression before the first `;`, when the initializer is not a declaration.
    pub fn initializer(&self) -> Option<Expr> {
        self.section(0)
    }

    pub fn condition(&self) -> Option<Expr> {
        self.section(1)
    }

    pub fn increment(&self) -> Option<Expr> {
        self.section(2)
    }

    /// The expression in header section `index`, counting `;` separators.
    fn section(&self, index: usize) -> Option<Expr> {
        let mut current = 0;
        for element in self.0.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::SEMICOLON => current += 1,
                rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::R_PAREN => return None,
                rowan::NodeOrToken::Node(n) if current == index => {
                    if let Some(expr) = Expr::cast(n) {
                        return Some(expr);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

ast_node!(WhileStatement, WHILE_STATEMENT);

impl WhileStatement {
    first_child_method!(condition, Expr);
    first_child_method!(body, Stmt);
}

ast_node!(DoStatement, DO_STATEMENT);

impl DoStatement {
    first_child_method!(body, Stmt);
    first_child_method!(condition, Expr);
}

ast_node!(SwitchStatement, SWITCH_STATEMENT);

impl SwitchStatement {
    first_child_method!(expr, Expr);
    children_method!(sections, SwitchSection);
}

ast_node!(SwitchSection, SWITCH_SECTION);

impl SwitchSection {
    children_method!(case_labels, CaseLabel);
    children_method!(statements, Stmt);

    pub fn has_default(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::DEFAULT_LABEL)
    }
}

ast_node!(CaseLabel, CASE_LABEL);

impl CaseLabel {
    first_child_method!(value, Expr);
}
