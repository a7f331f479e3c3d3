//! Position predicates computed from the syntax tree alone.
//!
//! Editor features use these to decide what applies at a caret before doing
//! any semantic work: no completion inside a comment, only types after
//! `static`, no symbol list while the user is naming a new variable.

use crate::base::TextSize;
use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken};

use super::navigation::{token_at, token_before_word, token_on_left, token_touching_left};

/// The caret is inside a comment.
///
/// A line comment still contains the caret at its end; a block comment only
/// does so when unterminated.
pub fn in_comment(root: &SyntaxNode, offset: TextSize) -> bool {
    let Some(token) = token_touching_left(root, offset) else {
        return false;
    };
    let range = token.text_range();
    match token.kind() {
        SyntaxKind::LINE_COMMENT => range.start() < offset,
        SyntaxKind::BLOCK_COMMENT => {
            let terminated = token.text().len() >= 4 && token.text().ends_with("*/");
            range.start() < offset && (range.end() > offset || !terminated)
        }
        _ => false,
    }
}

/// The caret is inside a string or numeric literal.
pub fn in_literal(root: &SyntaxNode, offset: TextSize) -> bool {
    let Some(token) = token_touching_left(root, offset) else {
        return false;
    };
    let range = token.text_range();
    match token.kind() {
        SyntaxKind::STRING_LITERAL => {
            let terminated = token.text().len() >= 2 && token.text().ends_with('"');
            range.start() < offset && (range.end() > offset || !terminated)
        }
        SyntaxKind::INT_LITERAL | SyntaxKind::FLOAT_LITERAL => {
            range.start() < offset && range.end() >= offset
        }
        _ => false,
    }
}

/// Directive node containing the token at `offset`, if any.
fn enclosing_directive(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxNode> {
    let token = token_touching_left(root, offset)?;
    token
        .parent_ancestors()
        .find(|n| n.kind().is_directive_node())
}

/// The caret is past the `#` of a directive line.
pub fn definitely_in_macro(root: &SyntaxNode, offset: TextSize) -> bool {
    enclosing_directive(root, offset)
        .is_some_and(|d| d.text_range().start() < offset && offset <= d.text_range().end())
}

/// The caret is in a directive, or on an identifier that names a
/// `#define`d macro.
pub fn possibly_in_macro(root: &SyntaxNode, offset: TextSize) -> bool {
    if definitely_in_macro(root, offset) {
        return true;
    }
    let Some(token) = token_at(root, offset).filter(|t| t.kind() == SyntaxKind::IDENT) else {
        return false;
    };
    root.descendants()
        .filter(|n| n.kind() == SyntaxKind::DEFINE_DIRECTIVE)
        .filter_map(|d| d.children().find(|c| c.kind() == SyntaxKind::NAME))
        .any(|name| name.text() == token.text())
}

fn in_type_node(token: &SyntaxToken) -> bool {
    token.parent_ancestors().take_while(|n| !n.kind().is_expression_node()).any(|n| {
        matches!(
            n.kind(),
            SyntaxKind::PREDEFINED_TYPE
                | SyntaxKind::VECTOR_TEMPLATE_TYPE
                | SyntaxKind::MATRIX_TEMPLATE_TYPE
                | SyntaxKind::OBJECT_TYPE
                | SyntaxKind::NAMED_TYPE
        )
    })
}

/// Tokens after which only a type can follow.
fn only_type_follows(token: &SyntaxToken) -> bool {
    let kind = token.kind();
    (kind.is_modifier() && kind != SyntaxKind::INLINE_KW)
        || kind == SyntaxKind::TYPEDEF_KW
        || (kind == SyntaxKind::LT
            && token
                .parent()
                .is_some_and(|p| p.kind() == SyntaxKind::TEMPLATE_ARGUMENT_LIST))
}

/// The word at the caret can only be a type name.
pub fn definitely_in_type_name(root: &SyntaxNode, offset: TextSize) -> bool {
    if let Some(token) = token_touching_left(root, offset)
        && token.kind() == SyntaxKind::IDENT
        && token.text_range().start() < offset
        && in_type_node(&token)
        && !is_last_word_of_statement_type(&token)
    {
        return true;
    }
    token_before_word(root, offset).is_some_and(|t| only_type_follows(&t))
}

/// `float x|` is parsed as a named type when the declarator is still
/// missing; such a word may be the variable name.
fn is_last_word_of_statement_type(token: &SyntaxToken) -> bool {
    let Some(declaration) = token
        .parent_ancestors()
        .find(|n| n.kind() == SyntaxKind::VARIABLE_DECLARATION)
    else {
        return false;
    };
    !declaration
        .children()
        .any(|c| c.kind() == SyntaxKind::VARIABLE_DECLARATOR && c.children().next().is_some())
}

/// A type name may start at the caret.
pub fn possibly_in_type_name(root: &SyntaxNode, offset: TextSize) -> bool {
    if definitely_in_type_name(root, offset) {
        return true;
    }
    let Some(prev) = token_before_word(root, offset) else {
        // Start of file
        return true;
    };
    match prev.kind() {
        SyntaxKind::L_BRACE
        | SyntaxKind::R_BRACE
        | SyntaxKind::SEMICOLON
        | SyntaxKind::L_PAREN
        | SyntaxKind::COMMA
        | SyntaxKind::R_BRACKET
        | SyntaxKind::INLINE_KW
        | SyntaxKind::RETURN_KW
        | SyntaxKind::ELSE_KW
        | SyntaxKind::COLON => true,
        kind => kind.is_modifier() || kind == SyntaxKind::TYPEDEF_KW || kind == SyntaxKind::LT,
    }
}

/// The caret is in a `: SEMANTIC`, `: register(...)` or `: packoffset(...)`
/// qualifier of a declarator, parameter or function.
pub fn definitely_in_variable_declarator_qualifier(root: &SyntaxNode, offset: TextSize) -> bool {
    if let Some(token) = token_touching_left(root, offset)
        && token.text_range().start() < offset
        && token.parent_ancestors().any(|n| {
            matches!(
                n.kind(),
                SyntaxKind::SEMANTIC | SyntaxKind::REGISTER_LOCATION | SyntaxKind::PACKOFFSET_LOCATION
            )
        })
    {
        return true;
    }
    let Some(prev) = token_before_word(root, offset) else {
        return false;
    };
    prev.kind() == SyntaxKind::COLON
        && prev.parent().is_some_and(|p| {
            matches!(
                p.kind(),
                SyntaxKind::SEMANTIC
                    | SyntaxKind::REGISTER_LOCATION
                    | SyntaxKind::PACKOFFSET_LOCATION
                    | SyntaxKind::VARIABLE_DECLARATOR
                    | SyntaxKind::FUNCTION_DECLARATION
                    | SyntaxKind::FUNCTION_DEFINITION
            )
        })
}

/// The caret is where the user is writing a new name: a variable,
/// parameter, function, struct, buffer or macro name.
pub fn possibly_in_user_given_name(root: &SyntaxNode, offset: TextSize) -> bool {
    if let Some(token) = token_on_left(root, offset)
        && token.text_range().end() == offset
        && token.parent().is_some_and(|p| p.kind() == SyntaxKind::NAME)
    {
        return true;
    }
    let Some(prev) = token_before_word(root, offset) else {
        return false;
    };
    match prev.kind() {
        SyntaxKind::STRUCT_KW | SyntaxKind::CBUFFER_KW | SyntaxKind::TBUFFER_KW | SyntaxKind::PP_DEFINE => true,
        _ => ends_declared_type(&prev),
    }
}

/// `prev` is the last token of the type of a declaration, so a name follows.
fn ends_declared_type(prev: &SyntaxToken) -> bool {
    let Some(type_node) = prev.parent_ancestors().find(|n| n.kind().is_type_node()) else {
        return false;
    };
    let ends_type = type_node.last_token().is_some_and(|last| last == *prev);
    let declares = type_node.parent().is_some_and(|p| {
        matches!(
            p.kind(),
            SyntaxKind::VARIABLE_DECLARATION
                | SyntaxKind::PARAMETER
                | SyntaxKind::FUNCTION_DECLARATION
                | SyntaxKind::FUNCTION_DEFINITION
                | SyntaxKind::TYPEDEF_STATEMENT
        )
    });
    ends_type && declares
}
