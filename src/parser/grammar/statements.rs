//! Statement grammar
//!
//! ```text
//! Statement = Attribute* (Block | If | For | While | Do | Switch | Jump
//!           | LocalDeclaration | Typedef | ExpressionStatement | ';')
//! ```

use super::declarations::{parse_attributes, parse_declaration, parse_typedef, parse_variable_declaration};
use super::expressions::{at_expression_start, parse_expression};
use super::types::classify_type_name;
use super::{HlslParser, ParseContext, nested};
use crate::parser::errors::ErrorCode;
use crate::parser::syntax_kind::SyntaxKind;

/// Block = '{' Statement* '}'
pub(super) fn parse_block<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::BLOCK);
    p.bump(); // {
    parse_statements_until(p, &[SyntaxKind::R_BRACE]);
    if !p.eat(SyntaxKind::R_BRACE) {
        p.error(ErrorCode::E0202, "expected '}' to close block".to_string());
    }
    p.finish_node();
}

fn parse_statements_until<P: HlslParser>(p: &mut P, terminators: &[SyntaxKind]) {
    while !p.at_eof() && !p.at_any(terminators) {
        let before = p.get_pos();
        parse_statement(p);
        if p.get_pos() == before {
            p.recover(ParseContext::Block);
        }
    }
}

pub fn parse_statement<P: HlslParser>(p: &mut P) {
    nested(p, |p| {
        parse_statement_rest(p);
        true
    });
}

fn parse_statement_rest<P: HlslParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    let has_attributes = p.at(SyntaxKind::L_BRACKET);
    parse_attributes(p);

    let kind = match p.current_kind() {
        SyntaxKind::L_BRACE => {
            parse_block(p);
            return;
        }
        SyntaxKind::SEMICOLON => {
            p.bump();
            SyntaxKind::EMPTY_STATEMENT
        }
        SyntaxKind::IF_KW => {
            parse_if(p);
            SyntaxKind::IF_STATEMENT
        }
        SyntaxKind::FOR_KW => {
            parse_for(p);
            SyntaxKind::FOR_STATEMENT
        }
        SyntaxKind::WHILE_KW => {
            p.bump();
            parse_condition(p);
            parse_embedded_statement(p);
            SyntaxKind::WHILE_STATEMENT
        }
        SyntaxKind::DO_KW => {
            p.bump();
            parse_embedded_statement(p);
            p.expect(SyntaxKind::WHILE_KW);
            parse_condition(p);
            p.expect(SyntaxKind::SEMICOLON);
            SyntaxKind::DO_STATEMENT
        }
        SyntaxKind::SWITCH_KW => {
            parse_switch(p);
            SyntaxKind::SWITCH_STATEMENT
        }
        SyntaxKind::BREAK_KW => {
            p.bump();
            p.expect(SyntaxKind::SEMICOLON);
            SyntaxKind::BREAK_STATEMENT
        }
        SyntaxKind::CONTINUE_KW => {
            p.bump();
            p.expect(SyntaxKind::SEMICOLON);
            SyntaxKind::CONTINUE_STATEMENT
        }
        SyntaxKind::DISCARD_KW => {
            p.bump();
            p.expect(SyntaxKind::SEMICOLON);
            SyntaxKind::DISCARD_STATEMENT
        }
        SyntaxKind::RETURN_KW => {
            p.bump();
            if !p.at(SyntaxKind::SEMICOLON) {
                parse_expression(p);
            }
            p.expect(SyntaxKind::SEMICOLON);
            SyntaxKind::RETURN_STATEMENT
        }
        SyntaxKind::TYPEDEF_KW if !has_attributes => {
            parse_typedef(p);
            return;
        }
        SyntaxKind::CASE_KW | SyntaxKind::DEFAULT_KW | SyntaxKind::R_BRACE if !has_attributes => {
            // Belongs to an enclosing construct; the caller reports it
            return;
        }
        _ if at_local_declaration(p) => {
            if has_attributes {
                // Attributes on a declaration: let the declaration own them
                parse_local_declaration_rest(p);
                SyntaxKind::VARIABLE_DECLARATION_STATEMENT
            } else {
                parse_declaration(p, ParseContext::Block);
                return;
            }
        }
        _ if at_expression_start(p) => {
            parse_expression(p);
            p.expect(SyntaxKind::SEMICOLON);
            SyntaxKind::EXPRESSION_STATEMENT
        }
        _ => {
            if has_attributes {
                p.error(ErrorCode::E0406, "expected a statement after attributes".to_string());
                p.start_node_at(checkpoint, SyntaxKind::EMPTY_STATEMENT);
                p.finish_node();
            }
            return;
        }
    };

    p.start_node_at(checkpoint, kind);
    p.finish_node();
}

fn parse_local_declaration_rest<P: HlslParser>(p: &mut P) {
    parse_variable_declaration(p);
    p.expect(SyntaxKind::SEMICOLON);
}

/// Whether the tokens ahead start a local declaration rather than an expression.
fn at_local_declaration<P: HlslParser>(p: &P) -> bool {
    let kind = p.current_kind();
    if kind.is_modifier() || kind == SyntaxKind::STRUCT_KW {
        return true;
    }
    if kind != SyntaxKind::IDENT {
        return false;
    }
    let text = p.current_text();
    match classify_type_name(text) {
        // float3(1, 2, 3).x is an expression
        Some(class) if class.is_numeric() => p.nth(1) != SyntaxKind::L_PAREN,
        Some(_) => true,
        None => {
            p.nth(1) == SyntaxKind::IDENT
                || (p.is_known_type(text) && p.nth(1) != SyntaxKind::L_PAREN && p.nth(1) != SyntaxKind::DOT)
        }
    }
}

/// If = 'if' '(' Expr ')' Statement ElseClause?
fn parse_if<P: HlslParser>(p: &mut P) {
    p.bump(); // if
    parse_condition(p);
    parse_embedded_statement(p);
    if p.at(SyntaxKind::ELSE_KW) {
        p.start_node(SyntaxKind::ELSE_CLAUSE);
        p.bump();
        parse_embedded_statement(p);
        p.finish_node();
    }
}

/// For = 'for' '(' (VariableDeclaration | Expr)? ';' Expr? ';' Expr? ')' Statement
fn parse_for<P: HlslParser>(p: &mut P) {
    p.bump(); // for
    p.expect(SyntaxKind::L_PAREN);

    if !p.at(SyntaxKind::SEMICOLON) {
        if at_local_declaration(p) {
            parse_variable_declaration(p);
        } else {
            parse_expression(p);
        }
    }
    p.expect(SyntaxKind::SEMICOLON);
    if !p.at(SyntaxKind::SEMICOLON) {
        parse_expression(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    if !p.at(SyntaxKind::R_PAREN) {
        parse_expression(p);
    }
    p.expect(SyntaxKind::R_PAREN);
    parse_embedded_statement(p);
}

/// Switch = 'switch' '(' Expr ')' '{' SwitchSection* '}'
fn parse_switch<P: HlslParser>(p: &mut P) {
    p.bump(); // switch
    parse_condition(p);
    if !p.eat(SyntaxKind::L_BRACE) {
        p.expect(SyntaxKind::L_BRACE);
        return;
    }

    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        if !p.at_any(&[SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW]) {
            p.recover(ParseContext::Block);
            continue;
        }
        p.start_node(SyntaxKind::SWITCH_SECTION);
        while p.at_any(&[SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW]) {
            if p.at(SyntaxKind::CASE_KW) {
                p.start_node(SyntaxKind::CASE_LABEL);
                p.bump();
                parse_expression(p);
            } else {
                p.start_node(SyntaxKind::DEFAULT_LABEL);
                p.bump();
            }
            p.expect(SyntaxKind::COLON);
            p.finish_node();
        }
        parse_statements_until(p, &[SyntaxKind::CASE_KW, SyntaxKind::DEFAULT_KW, SyntaxKind::R_BRACE]);
        p.finish_node();
    }

    if !p.eat(SyntaxKind::R_BRACE) {
        p.error(ErrorCode::E0202, "expected '}' to close switch".to_string());
    }
}

/// '(' Expr ')'
fn parse_condition<P: HlslParser>(p: &mut P) {
    p.expect(SyntaxKind::L_PAREN);
    if !parse_expression(p) {
        p.error(ErrorCode::E0406, "expected a condition".to_string());
    }
    p.expect(SyntaxKind::R_PAREN);
}

/// The body of a control-flow statement: must consume something.
fn parse_embedded_statement<P: HlslParser>(p: &mut P) {
    let before = p.get_pos();
    parse_statement(p);
    if p.get_pos() == before {
        p.error(ErrorCode::E0406, "expected a statement".to_string());
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::parser::{SyntaxKind, parse};

    fn body_kinds(body: &str) -> Vec<SyntaxKind> {
        let source = format!("void f() {{ {body} }}");
        let parse = parse(&source);
        assert!(parse.ok(), "errors for {body:?}: {:?}", parse.errors);
        assert_eq!(parse.syntax().text().to_string(), source);
        parse.syntax().descendants().map(|n| n.kind()).collect()
    }

    #[rstest]
    #[case("if (a) b = 1; else b = 2;", SyntaxKind::ELSE_CLAUSE)]
    #[case("for (int i = 0; i < 4; i++) {}", SyntaxKind::FOR_STATEMENT)]
    #[case("for (;;) break;", SyntaxKind::BREAK_STATEMENT)]
    #[case("while (x) continue;", SyntaxKind::CONTINUE_STATEMENT)]
    #[case("do { x--; } while (x > 0);", SyntaxKind::DO_STATEMENT)]
    #[case("switch (x) { case 0: case 1: y = 1; break; default: y = 2; }", SyntaxKind::DEFAULT_LABEL)]
    #[case("discard;", SyntaxKind::DISCARD_STATEMENT)]
    #[case("[unroll] for (int i = 0; i < 2; ++i) {}", SyntaxKind::ATTRIBUTE)]
    #[case("float3 v = float3(1, 2, 3);", SyntaxKind::VARIABLE_DECLARATION_STATEMENT)]
    #[case("float3(1, 2, 3).x;", SyntaxKind::EXPRESSION_STATEMENT)]
    #[case("const float k = 2, m[2] = { 1, 2 };", SyntaxKind::ARRAY_INITIALIZER_EXPR)]
    #[case("struct L { float a; } l;", SyntaxKind::STRUCT_TYPE)]
    #[case("typedef float2 F2; F2 q;", SyntaxKind::TYPEDEF_STATEMENT)]
    fn test_statement_forms(#[case] body: &str, #[case] expected: SyntaxKind) {
        assert!(body_kinds(body).contains(&expected));
    }

    #[test]
    fn test_user_type_declaration() {
        let kinds = body_kinds("Light l; l.color = 1;");
        assert!(kinds.contains(&SyntaxKind::VARIABLE_DECLARATION_STATEMENT));
        assert!(kinds.contains(&SyntaxKind::FIELD_ACCESS_EXPR));
    }

    #[test]
    fn test_unclosed_block_reports_brace() {
        let parse = parse("void f() { return;");
        assert!(parse.errors.iter().any(|e| e.code == crate::parser::ErrorCode::E0202));
    }
}
