//! Expression grammar
//!
//! Precedence climbing, lowest to highest:
//!
//! ```text
//! Expr        = Assignment (',' Assignment)*
//! Assignment  = Conditional (AssignOp Assignment)?
//! Conditional = Binary ('?' Assignment ':' Conditional)?
//! Binary      = Unary (BinaryOp Unary)*
//! Unary       = PrefixOp Unary | Cast | Postfix
//! Postfix     = Primary ('.' Name ArgumentList? | '[' Expr ']' | '++' | '--')*
//! ```

use super::types::{TypeNameClass, classify_type_name, parse_type};
use super::{HlslParser, nested, skip_too_deep};
use crate::parser::errors::ErrorCode;
use crate::parser::syntax_kind::SyntaxKind;

/// Left binding power of a binary operator; `None` if `kind` is not one.
fn binary_power(kind: SyntaxKind) -> Option<u8> {
    Some(match kind {
        SyntaxKind::PIPE_PIPE => 1,
        SyntaxKind::AMP_AMP => 2,
        SyntaxKind::PIPE => 3,
        SyntaxKind::CARET => 4,
        SyntaxKind::AMP => 5,
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ => 6,
        SyntaxKind::LT | SyntaxKind::GT | SyntaxKind::LT_EQ | SyntaxKind::GT_EQ => 7,
        SyntaxKind::LT_LT | SyntaxKind::GT_GT => 8,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 9,
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 10,
        _ => return None,
    })
}

fn is_prefix_op(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::PLUS
            | SyntaxKind::MINUS
            | SyntaxKind::BANG
            | SyntaxKind::TILDE
            | SyntaxKind::PLUS_PLUS
            | SyntaxKind::MINUS_MINUS
    )
}

/// Whether the current token can begin an expression.
pub(super) fn at_expression_start<P: HlslParser>(p: &P) -> bool {
    let kind = p.current_kind();
    kind == SyntaxKind::IDENT
        || kind == SyntaxKind::L_PAREN
        || kind.is_literal()
        || is_prefix_op(kind)
}

/// Expr = Assignment (',' Assignment)*
///
/// Returns false if no expression could be started.
pub fn parse_expression<P: HlslParser>(p: &mut P) -> bool {
    let checkpoint = p.checkpoint();
    if !parse_assignment_expression(p) {
        return false;
    }
    if p.at(SyntaxKind::COMMA) {
        while p.eat(SyntaxKind::COMMA) {
            if !parse_assignment_expression(p) {
                break;
            }
        }
        p.start_node_at(checkpoint, SyntaxKind::COMPOUND_EXPR);
        p.finish_node();
    }
    true
}

/// Assignment = Conditional (AssignOp Assignment)?
pub fn parse_assignment_expression<P: HlslParser>(p: &mut P) -> bool {
    nested(p, parse_assignment_rest)
}

fn parse_assignment_rest<P: HlslParser>(p: &mut P) -> bool {
    let checkpoint = p.checkpoint();
    if !parse_conditional_expression(p) {
        return false;
    }
    if p.current_kind().is_assignment_op() {
        p.bump();
        if !parse_assignment_expression(p) {
            p.error(ErrorCode::E0402, "expected a value to assign".to_string());
        }
        p.start_node_at(checkpoint, SyntaxKind::ASSIGNMENT_EXPR);
        p.finish_node();
    }
    true
}

fn parse_conditional_expression<P: HlslParser>(p: &mut P) -> bool {
    let checkpoint = p.checkpoint();
    if !parse_binary_expression(p, 0) {
        return false;
    }
    if p.at(SyntaxKind::QUESTION) {
        p.bump();
        parse_assignment_expression(p);
        p.expect(SyntaxKind::COLON);
        nested(p, parse_conditional_expression);
        p.start_node_at(checkpoint, SyntaxKind::CONDITIONAL_EXPR);
        p.finish_node();
    }
    true
}

fn parse_binary_expression<P: HlslParser>(p: &mut P, min_power: u8) -> bool {
    let checkpoint = p.checkpoint();
    if !parse_unary_expression(p) {
        return false;
    }

    // Each operator wraps the left side one level deeper
    let mut wrapped = 0;
    while let Some(power) = binary_power(p.current_kind()) {
        if power <= min_power {
            break;
        }
        if !p.enter_nesting() {
            skip_too_deep(p);
            break;
        }
        wrapped += 1;
        let operator = p.current_text().to_string();
        p.bump();
        if !parse_binary_expression(p, power) {
            p.error(
                ErrorCode::E0402,
                format!("expected an operand after '{operator}'"),
            );
        }
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        p.finish_node();
    }
    for _ in 0..wrapped {
        p.exit_nesting();
    }
    true
}

/// Unary = PrefixOp Unary | Cast | Postfix
fn parse_unary_expression<P: HlslParser>(p: &mut P) -> bool {
    if is_prefix_op(p.current_kind()) {
        p.start_node(SyntaxKind::PREFIX_UNARY_EXPR);
        p.bump();
        if !nested(p, parse_unary_expression) {
            p.error(ErrorCode::E0402, "expected an operand".to_string());
        }
        p.finish_node();
        return true;
    }
    if at_cast(p) {
        parse_cast_expression(p);
        return true;
    }
    parse_postfix_expression(p)
}

/// Whether `(` starts a cast rather than a parenthesized expression.
fn at_cast<P: HlslParser>(p: &P) -> bool {
    if !p.at(SyntaxKind::L_PAREN) || p.nth(1) != SyntaxKind::IDENT {
        return false;
    }
    let name = p.nth_text(1);
    if classify_type_name(name).is_some() || p.is_known_type(name) {
        return closing_paren_after_type(p, 2).is_some();
    }
    // (T)x where T is not known to be a type: decide on what follows
    p.nth(2) == SyntaxKind::R_PAREN
        && (matches!(
            p.nth(3),
            SyntaxKind::IDENT | SyntaxKind::L_PAREN | SyntaxKind::BANG | SyntaxKind::TILDE
        ) || p.nth(3).is_literal())
}

/// Index of the `)` closing a type that starts before `n`, skipping template
/// arguments and array ranks.
fn closing_paren_after_type<P: HlslParser>(p: &P, mut n: usize) -> Option<usize> {
    if p.nth(n) == SyntaxKind::LT {
        let mut depth = 0usize;
        loop {
            match p.nth(n) {
                SyntaxKind::LT => depth += 1,
                SyntaxKind::GT => depth -= 1,
                SyntaxKind::GT_GT => depth = depth.saturating_sub(2),
                SyntaxKind::IDENT | SyntaxKind::INT_LITERAL | SyntaxKind::COMMA => {}
                _ => return None,
            }
            n += 1;
            if depth == 0 {
                break;
            }
        }
    }
    while p.nth(n) == SyntaxKind::L_BRACKET {
        while !matches!(p.nth(n), SyntaxKind::R_BRACKET | SyntaxKind::ERROR) {
            n += 1;
        }
        n += 1;
    }
    (p.nth(n) == SyntaxKind::R_PAREN).then_some(n)
}

/// Cast = '(' Type ArrayRank* ')' Unary
fn parse_cast_expression<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::CAST_EXPR);
    p.bump(); // (
    parse_type(p);
    while p.at(SyntaxKind::L_BRACKET) {
        p.start_node(SyntaxKind::ARRAY_RANK_SPECIFIER);
        p.bump();
        if !p.at(SyntaxKind::R_BRACKET) {
            parse_expression(p);
        }
        p.expect(SyntaxKind::R_BRACKET);
        p.finish_node();
    }
    p.expect(SyntaxKind::R_PAREN);
    if !nested(p, parse_unary_expression) {
        p.error(ErrorCode::E0402, "expected an expression to cast".to_string());
    }
    p.finish_node();
}

fn parse_postfix_expression<P: HlslParser>(p: &mut P) -> bool {
    let checkpoint = p.checkpoint();
    if !parse_primary_expression(p) {
        return false;
    }

    let mut wrapped = 0;
    loop {
        if !matches!(
            p.current_kind(),
            SyntaxKind::DOT | SyntaxKind::L_BRACKET | SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS
        ) {
            break;
        }
        if !p.enter_nesting() {
            skip_too_deep(p);
            break;
        }
        wrapped += 1;
        let kind = match p.current_kind() {
            SyntaxKind::DOT => {
                p.bump();
                if p.at(SyntaxKind::IDENT) || p.current_kind().is_keyword() {
                    p.start_node(SyntaxKind::NAME_REF);
                    p.bump();
                    p.finish_node();
                } else {
                    p.error(ErrorCode::E0301, "expected a member name after '.'".to_string());
                }
                if p.at(SyntaxKind::L_PAREN) {
                    parse_argument_list(p);
                    SyntaxKind::METHOD_INVOCATION_EXPR
                } else {
                    SyntaxKind::FIELD_ACCESS_EXPR
                }
            }
            SyntaxKind::L_BRACKET => {
                p.bump();
                if !parse_expression(p) {
                    p.error(ErrorCode::E0406, "expected an index".to_string());
                }
                p.expect(SyntaxKind::R_BRACKET);
                SyntaxKind::ELEMENT_ACCESS_EXPR
            }
            SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                p.bump();
                SyntaxKind::POSTFIX_UNARY_EXPR
            }
            _ => break,
        };
        p.start_node_at(checkpoint, kind);
        p.finish_node();
    }
    for _ in 0..wrapped {
        p.exit_nesting();
    }
    true
}

fn parse_primary_expression<P: HlslParser>(p: &mut P) -> bool {
    match p.current_kind() {
        SyntaxKind::STRING_LITERAL => {
            // "a" "b" concatenates
            p.start_node(SyntaxKind::LITERAL_EXPR);
            while p.at(SyntaxKind::STRING_LITERAL) {
                p.bump();
            }
            p.finish_node();
        }
        kind if kind.is_literal() => {
            p.start_node(SyntaxKind::LITERAL_EXPR);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::IDENT => {
            let constructor = match classify_type_name(p.current_text()) {
                Some(TypeNameClass::GenericVector | TypeNameClass::GenericMatrix) => {
                    matches!(p.nth(1), SyntaxKind::L_PAREN | SyntaxKind::LT)
                }
                Some(class) => class.is_numeric() && p.nth(1) == SyntaxKind::L_PAREN,
                None => false,
            };
            if constructor {
                p.start_node(SyntaxKind::NUMERIC_CONSTRUCTOR_EXPR);
                parse_type(p);
                if p.at(SyntaxKind::L_PAREN) {
                    parse_argument_list(p);
                } else {
                    p.expect(SyntaxKind::L_PAREN);
                }
                p.finish_node();
            } else if p.nth(1) == SyntaxKind::L_PAREN {
                p.start_node(SyntaxKind::FUNCTION_INVOCATION_EXPR);
                p.start_node(SyntaxKind::NAME_REF);
                p.bump();
                p.finish_node();
                parse_argument_list(p);
                p.finish_node();
            } else {
                p.start_node(SyntaxKind::IDENTIFIER_EXPR);
                p.start_node(SyntaxKind::NAME_REF);
                p.bump();
                p.finish_node();
                p.finish_node();
            }
        }
        SyntaxKind::L_PAREN => {
            p.start_node(SyntaxKind::PAREN_EXPR);
            p.bump();
            if !parse_expression(p) {
                p.error(ErrorCode::E0406, "expected an expression".to_string());
            }
            p.expect(SyntaxKind::R_PAREN);
            p.finish_node();
        }
        SyntaxKind::L_BRACE => parse_array_initializer(p),
        _ => {
            p.error(ErrorCode::E0406, "expected an expression".to_string());
            return false;
        }
    }
    true
}

/// ArgumentList = '(' (Assignment (',' Assignment)*)? ')'
fn parse_argument_list<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::ARGUMENT_LIST);
    p.bump(); // (
    if !p.at(SyntaxKind::R_PAREN) {
        loop {
            if !parse_assignment_expression(p) {
                break;
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }
    if !p.eat(SyntaxKind::R_PAREN) {
        p.error(
            ErrorCode::E0404,
            "expected ')' to close argument list".to_string(),
        );
    }
    p.finish_node();
}

/// ArrayInitializer = '{' (Element (',' Element)* ','?)? '}'
pub(super) fn parse_array_initializer<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::ARRAY_INITIALIZER_EXPR);
    p.bump(); // {
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        if !parse_assignment_expression(p) {
            break;
        }
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::parser::{SyntaxKind, SyntaxNode, parse};

    fn initializer(expr: &str) -> SyntaxNode {
        let source = format!("float x = {expr};");
        let parse = parse(&source);
        assert!(parse.ok(), "errors for {expr:?}: {:?}", parse.errors);
        parse
            .syntax()
            .descendants()
            .find(|n| n.kind() == SyntaxKind::EQUALS_VALUE_CLAUSE)
            .and_then(|n| n.children().next())
            .expect("initializer expression")
    }

    #[rstest]
    #[case("1 + 2 * 3", SyntaxKind::BINARY_EXPR)]
    #[case("a ? b : c", SyntaxKind::CONDITIONAL_EXPR)]
    #[case("(float)i", SyntaxKind::CAST_EXPR)]
    #[case("(float2x2)m", SyntaxKind::CAST_EXPR)]
    #[case("(Custom)value", SyntaxKind::CAST_EXPR)]
    #[case("(a) + b", SyntaxKind::BINARY_EXPR)]
    #[case("float4(1, 2, 3, 4).x", SyntaxKind::FIELD_ACCESS_EXPR)]
    #[case("vector<float, 2>(0, 1)", SyntaxKind::NUMERIC_CONSTRUCTOR_EXPR)]
    #[case("tex.Sample(s, uv).r", SyntaxKind::FIELD_ACCESS_EXPR)]
    #[case("tex.Sample(s, uv)", SyntaxKind::METHOD_INVOCATION_EXPR)]
    #[case("saturate(v)", SyntaxKind::FUNCTION_INVOCATION_EXPR)]
    #[case("arr[i + 1]", SyntaxKind::ELEMENT_ACCESS_EXPR)]
    #[case("-x", SyntaxKind::PREFIX_UNARY_EXPR)]
    #[case("i++", SyntaxKind::POSTFIX_UNARY_EXPR)]
    #[case("\"a\" \"b\"", SyntaxKind::LITERAL_EXPR)]
    #[case("a = b = c", SyntaxKind::ASSIGNMENT_EXPR)]
    fn test_expression_shapes(#[case] expr: &str, #[case] expected: SyntaxKind) {
        assert_eq!(initializer(expr).kind(), expected);
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let root = initializer("1 + 2 * 3");
        let rhs = root
            .children()
            .nth(1)
            .expect("right operand");
        assert_eq!(rhs.kind(), SyntaxKind::BINARY_EXPR);
        assert_eq!(rhs.text().to_string(), "2 * 3");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let root = initializer("a = b = c");
        let rhs = root.children().nth(1).expect("right side");
        assert_eq!(rhs.kind(), SyntaxKind::ASSIGNMENT_EXPR);
    }

    #[test]
    fn test_missing_operand() {
        let parse = parse("float x = 1 + ;");
        assert!(parse.errors.iter().any(|e| e.code == crate::parser::ErrorCode::E0402));
    }

    #[test]
    fn test_unclosed_call() {
        let parse = parse("float x = f(1, 2;");
        assert!(parse.errors.iter().any(|e| e.code == crate::parser::ErrorCode::E0404));
    }
}
