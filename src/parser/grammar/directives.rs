//! Preprocessor directive nodes
//!
//! A directive covers one logical line, from the `#` up to (not including)
//! the end of line. Directives are reached from `skip_trivia`, so they may sit
//! between any two tokens of the surrounding construct.

use super::HlslParser;
use crate::parser::errors::ErrorCode;
use crate::parser::syntax_kind::SyntaxKind;

fn directive_node_kind(name: Option<SyntaxKind>) -> SyntaxKind {
    match name {
        Some(SyntaxKind::PP_DEFINE) => SyntaxKind::DEFINE_DIRECTIVE,
        Some(SyntaxKind::PP_UNDEF) => SyntaxKind::UNDEF_DIRECTIVE,
        Some(SyntaxKind::PP_INCLUDE) => SyntaxKind::INCLUDE_DIRECTIVE,
        Some(SyntaxKind::PP_IF) => SyntaxKind::IF_DIRECTIVE,
        Some(SyntaxKind::PP_IFDEF) => SyntaxKind::IFDEF_DIRECTIVE,
        Some(SyntaxKind::PP_IFNDEF) => SyntaxKind::IFNDEF_DIRECTIVE,
        Some(SyntaxKind::PP_ELIF) => SyntaxKind::ELIF_DIRECTIVE,
        Some(SyntaxKind::PP_ELSE) => SyntaxKind::ELSE_DIRECTIVE,
        Some(SyntaxKind::PP_ENDIF) => SyntaxKind::ENDIF_DIRECTIVE,
        Some(SyntaxKind::PP_ERROR) => SyntaxKind::ERROR_DIRECTIVE,
        Some(SyntaxKind::PP_PRAGMA) => SyntaxKind::PRAGMA_DIRECTIVE,
        Some(SyntaxKind::PP_LINE) => SyntaxKind::LINE_DIRECTIVE,
        _ => SyntaxKind::BAD_DIRECTIVE,
    }
}

/// Directive = '#' DirectiveName DirectiveBody
pub fn parse_directive<P: HlslParser>(p: &mut P) {
    let kind = directive_node_kind(p.raw_directive_name());
    p.start_raw_node(kind);
    p.bump_raw(); // #
    skip_blanks(p);

    match kind {
        SyntaxKind::DEFINE_DIRECTIVE => parse_define(p),
        SyntaxKind::UNDEF_DIRECTIVE | SyntaxKind::IFDEF_DIRECTIVE | SyntaxKind::IFNDEF_DIRECTIVE => {
            p.bump_raw();
            skip_blanks(p);
            if at_raw_name(p) {
                p.start_raw_node(SyntaxKind::NAME_REF);
                p.bump_raw();
                p.finish_node();
            } else {
                p.raw_error(ErrorCode::E0502, "expected a macro name".to_string());
            }
        }
        SyntaxKind::INCLUDE_DIRECTIVE => {
            p.bump_raw();
            skip_blanks(p);
            match p.raw_kind() {
                Some(SyntaxKind::STRING_LITERAL | SyntaxKind::SYSTEM_INCLUDE_PATH) => p.bump_raw(),
                _ => p.raw_error(
                    ErrorCode::E0505,
                    "expected \"file\" or <file> after '#include'".to_string(),
                ),
            }
        }
        SyntaxKind::BAD_DIRECTIVE => {
            if p.raw_kind().is_some_and(|k| !k.is_trivia()) {
                let message = format!("unknown preprocessor directive '#{}'", p.raw_text());
                p.raw_error(ErrorCode::E0501, message);
            }
        }
        _ => {}
    }

    bump_rest_of_line(p);
    p.finish_node();
}

/// Define = 'define' Name MacroParamList? MacroBody?
fn parse_define<P: HlslParser>(p: &mut P) {
    p.bump_raw(); // define
    skip_blanks(p);

    if !at_raw_name(p) {
        p.raw_error(ErrorCode::E0502, "expected a macro name after '#define'".to_string());
        return;
    }
    p.start_raw_node(SyntaxKind::NAME);
    p.bump_raw();
    p.finish_node();

    // Function-like only when '(' follows the name directly
    if p.raw_kind() == Some(SyntaxKind::L_PAREN) {
        p.start_raw_node(SyntaxKind::MACRO_PARAM_LIST);
        p.bump_raw();
        loop {
            match p.raw_kind() {
                None => {
                    p.raw_error(ErrorCode::E0203, "expected ')' to close macro parameters".to_string());
                    break;
                }
                Some(SyntaxKind::R_PAREN) => {
                    p.bump_raw();
                    break;
                }
                Some(SyntaxKind::IDENT) => {
                    p.start_raw_node(SyntaxKind::NAME);
                    p.bump_raw();
                    p.finish_node();
                }
                Some(_) => p.bump_raw(),
            }
        }
        p.finish_node();
    }

    skip_blanks(p);
    if p.raw_kind().is_some() {
        p.start_raw_node(SyntaxKind::MACRO_BODY);
        bump_rest_of_line(p);
        p.finish_node();
    }
}

fn at_raw_name<P: HlslParser>(p: &P) -> bool {
    p.raw_kind()
        .is_some_and(|k| k == SyntaxKind::IDENT || k.is_keyword())
}

fn skip_blanks<P: HlslParser>(p: &mut P) {
    while matches!(
        p.raw_kind(),
        Some(SyntaxKind::WHITESPACE | SyntaxKind::LINE_CONTINUATION | SyntaxKind::BLOCK_COMMENT)
    ) {
        p.bump_raw();
    }
}

fn bump_rest_of_line<P: HlslParser>(p: &mut P) {
    while p.raw_kind().is_some() {
        p.bump_raw();
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{ErrorCode, SyntaxKind, parse};

    fn directive(source: &str) -> crate::parser::SyntaxNode {
        parse(source)
            .syntax()
            .descendants()
            .find(|n| n.kind().is_directive_node())
            .expect("directive node")
    }

    #[test]
    fn test_object_like_define() {
        let node = directive("#define SCALE 2.0\nfloat x;");
        assert_eq!(node.kind(), SyntaxKind::DEFINE_DIRECTIVE);
        assert_eq!(node.text().to_string(), "#define SCALE 2.0");
        let body = node
            .children()
            .find(|n| n.kind() == SyntaxKind::MACRO_BODY)
            .expect("body");
        assert_eq!(body.text().to_string(), "2.0");
    }

    #[test]
    fn test_function_like_define() {
        let node = directive("#define SQR(a) ((a) * (a))\n");
        let params = node
            .children()
            .find(|n| n.kind() == SyntaxKind::MACRO_PARAM_LIST)
            .expect("params");
        assert_eq!(params.text().to_string(), "(a)");
    }

    #[test]
    fn test_space_before_paren_is_body() {
        let node = directive("#define V (1)\n");
        assert!(node.children().all(|n| n.kind() != SyntaxKind::MACRO_PARAM_LIST));
    }

    #[test]
    fn test_directive_between_tokens() {
        let source = "float a =\n#define X 1\n 2;";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
        assert_eq!(parse.syntax().text().to_string(), source);
    }

    #[test]
    fn test_missing_define_name() {
        let parse = parse("#define\n");
        assert!(parse.errors.iter().any(|e| e.code == ErrorCode::E0502));
    }

    #[test]
    fn test_include_forms() {
        assert_eq!(directive("#include \"common.hlsli\"\n").kind(), SyntaxKind::INCLUDE_DIRECTIVE);
        assert_eq!(directive("#include <common.hlsli>\n").kind(), SyntaxKind::INCLUDE_DIRECTIVE);
        let parse = parse("#include common\n");
        assert!(parse.errors.iter().any(|e| e.code == ErrorCode::E0505));
    }
}
