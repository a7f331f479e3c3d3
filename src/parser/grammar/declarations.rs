//! Declaration grammar
//!
//! ```text
//! SourceFile = TopLevelItem*
//! TopLevelItem = ';' | ConstantBuffer | Typedef | Declaration
//! Declaration = Attribute* Modifier* Type (FunctionRest | VariableRest | ';')
//! FunctionRest = Name ParameterList Qualifier* (Block | ';')
//! VariableRest = Declarator (',' Declarator)* ';'
//! Declarator = Name ArrayRank* Qualifier* Annotations? (Initializer | StateInitializer)?
//! ```

use rowan::Checkpoint;

use super::expressions::{parse_array_initializer, parse_assignment_expression, parse_expression};
use super::statements::parse_block;
use super::types::{at_type_start, parse_type};
use super::{HlslParser, ParseContext};
use crate::parser::errors::ErrorCode;
use crate::parser::syntax_kind::SyntaxKind;

/// Geometry-shader primitive qualifiers, spelled as identifiers.
const PRIMITIVE_MODIFIERS: &[&str] = &["point", "line", "triangle", "lineadj", "triangleadj"];

/// SourceFile = TopLevelItem*
pub fn parse_source_file<P: HlslParser>(p: &mut P) {
    p.start_raw_node(SyntaxKind::SOURCE_FILE);

    while !p.at_eof() {
        if p.should_stop() {
            break;
        }
        let before = p.get_pos();
        parse_top_level_item(p);
        if p.get_pos() == before && !p.at_eof() {
            p.recover(ParseContext::TopLevel);
        }
    }

    p.skip_trivia();
    p.finish_node();
}

fn parse_top_level_item<P: HlslParser>(p: &mut P) {
    match p.current_kind() {
        SyntaxKind::SEMICOLON => {
            p.start_node(SyntaxKind::EMPTY_STATEMENT);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::CBUFFER_KW | SyntaxKind::TBUFFER_KW => parse_constant_buffer(p),
        SyntaxKind::TYPEDEF_KW => parse_typedef(p),
        SyntaxKind::IDENT | SyntaxKind::STRUCT_KW | SyntaxKind::L_BRACKET => {
            parse_declaration(p, ParseContext::TopLevel)
        }
        kind if kind.is_modifier() => parse_declaration(p, ParseContext::TopLevel),
        _ => p.recover(ParseContext::TopLevel),
    }
}

/// A member of a struct body: field or member function.
pub(super) fn parse_struct_member<P: HlslParser>(p: &mut P) {
    match p.current_kind() {
        SyntaxKind::SEMICOLON => {
            p.start_node(SyntaxKind::EMPTY_STATEMENT);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::IDENT | SyntaxKind::STRUCT_KW | SyntaxKind::L_BRACKET => {
            parse_declaration(p, ParseContext::StructBody)
        }
        kind if kind.is_modifier() => parse_declaration(p, ParseContext::StructBody),
        _ => {
            p.error(
                ErrorCode::E0304,
                format!("unexpected '{}' in struct body", p.current_text()),
            );
            p.recover(ParseContext::StructBody);
        }
    }
}

/// Declaration = Attribute* Modifier* Type (FunctionRest | VariableRest | ';')
pub(super) fn parse_declaration<P: HlslParser>(p: &mut P, context: ParseContext) {
    let checkpoint = p.checkpoint();
    parse_attributes(p);
    parse_modifiers(p);

    let Some(type_kind) = parse_type(p) else {
        p.recover(context);
        return;
    };

    // struct S { ... };
    if type_kind == SyntaxKind::STRUCT_TYPE && p.at(SyntaxKind::SEMICOLON) {
        p.start_node_at(checkpoint, SyntaxKind::TYPE_DECLARATION_STATEMENT);
        p.bump();
        p.finish_node();
        return;
    }

    if p.at(SyntaxKind::IDENT) && p.nth(1) == SyntaxKind::L_PAREN {
        parse_function_rest(p, checkpoint);
        return;
    }

    parse_variable_declaration_rest(p, checkpoint);
    p.start_node_at(checkpoint, SyntaxKind::VARIABLE_DECLARATION_STATEMENT);
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// VariableDeclaration = Modifier* Type Declarator (',' Declarator)*
///
/// Used for local declarations and `for` initializers, without the `;`.
pub(super) fn parse_variable_declaration<P: HlslParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_modifiers(p);
    parse_type(p);
    parse_variable_declaration_rest(p, checkpoint);
}

fn parse_variable_declaration_rest<P: HlslParser>(p: &mut P, checkpoint: Checkpoint) {
    p.start_node_at(checkpoint, SyntaxKind::VARIABLE_DECLARATION);
    parse_variable_declarator(p);
    while p.eat(SyntaxKind::COMMA) {
        parse_variable_declarator(p);
    }
    p.finish_node();
}

/// FunctionRest = Name ParameterList Qualifier* (Block | ';')
fn parse_function_rest<P: HlslParser>(p: &mut P, checkpoint: Checkpoint) {
    p.start_node(SyntaxKind::NAME);
    p.bump();
    p.finish_node();

    parse_parameter_list(p);
    parse_qualifiers(p);

    let kind = if p.at(SyntaxKind::L_BRACE) {
        parse_block(p);
        SyntaxKind::FUNCTION_DEFINITION
    } else {
        if !p.eat(SyntaxKind::SEMICOLON) {
            p.error(
                ErrorCode::E0306,
                "expected function body or ';'".to_string(),
            );
        }
        SyntaxKind::FUNCTION_DECLARATION
    };
    p.start_node_at(checkpoint, kind);
    p.finish_node();
}

/// ParameterList = '(' ('void' | Parameter (',' Parameter)*)? ')'
fn parse_parameter_list<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::PARAMETER_LIST);
    p.bump(); // (

    if p.at(SyntaxKind::IDENT) && p.current_text() == "void" && p.nth(1) == SyntaxKind::R_PAREN {
        p.bump();
    } else if !p.at(SyntaxKind::R_PAREN) {
        loop {
            let before = p.get_pos();
            parse_parameter(p);
            if p.get_pos() == before {
                p.recover(ParseContext::ParameterList);
            }
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }

    if !p.eat(SyntaxKind::R_PAREN) {
        p.error(
            ErrorCode::E0203,
            "expected ')' to close parameter list".to_string(),
        );
    }
    p.finish_node();
}

/// Parameter = Attribute* Modifier* Type Declarator?
fn parse_parameter<P: HlslParser>(p: &mut P) {
    if !at_type_start(p) && !p.at(SyntaxKind::IDENT) && !p.current_kind().is_modifier() && !p.at(SyntaxKind::L_BRACKET) {
        return;
    }
    p.start_node(SyntaxKind::PARAMETER);
    parse_attributes(p);
    loop {
        if p.current_kind().is_modifier() {
            p.bump();
        } else if p.at(SyntaxKind::IDENT)
            && PRIMITIVE_MODIFIERS.contains(&p.current_text())
            && p.nth(1) == SyntaxKind::IDENT
        {
            p.bump();
        } else {
            break;
        }
    }
    parse_type(p);
    if p.at(SyntaxKind::IDENT) {
        parse_variable_declarator(p);
    }
    p.finish_node();
}

/// Declarator = Name ArrayRank* Qualifier* Annotations? (Initializer | StateInitializer)?
fn parse_variable_declarator<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::VARIABLE_DECLARATOR);

    if p.at(SyntaxKind::IDENT) {
        p.start_node(SyntaxKind::NAME);
        p.bump();
        p.finish_node();
    } else {
        p.error(ErrorCode::E0301, "expected a variable name".to_string());
    }

    parse_array_ranks(p);
    parse_qualifiers(p);

    if p.at(SyntaxKind::LT) {
        parse_annotations(p);
    }

    if p.at(SyntaxKind::EQ) {
        p.start_node(SyntaxKind::EQUALS_VALUE_CLAUSE);
        p.bump();
        match p.current_kind() {
            SyntaxKind::L_BRACE => parse_array_initializer(p),
            SyntaxKind::IDENT
                if p.current_text().eq_ignore_ascii_case("sampler_state")
                    && p.nth(1) == SyntaxKind::L_BRACE =>
            {
                parse_state_initializer(p)
            }
            _ => {
                parse_assignment_expression(p);
            }
        }
        p.finish_node();
    } else if p.at(SyntaxKind::L_BRACE) {
        parse_state_initializer(p);
    }

    p.finish_node();
}

fn parse_array_ranks<P: HlslParser>(p: &mut P) {
    while p.at(SyntaxKind::L_BRACKET) {
        p.start_node(SyntaxKind::ARRAY_RANK_SPECIFIER);
        p.bump();
        if !p.at(SyntaxKind::R_BRACKET) {
            parse_expression(p);
        }
        p.expect(SyntaxKind::R_BRACKET);
        p.finish_node();
    }
}

/// Qualifier = ':' (Semantic | 'register' '(' ... ')' | 'packoffset' '(' ... ')')
fn parse_qualifiers<P: HlslParser>(p: &mut P) {
    while p.at(SyntaxKind::COLON) {
        match p.nth(1) {
            SyntaxKind::REGISTER_KW => parse_location(p, SyntaxKind::REGISTER_LOCATION),
            SyntaxKind::PACKOFFSET_KW => parse_location(p, SyntaxKind::PACKOFFSET_LOCATION),
            SyntaxKind::IDENT => {
                p.start_node(SyntaxKind::SEMANTIC);
                p.bump(); // :
                p.bump();
                p.finish_node();
            }
            _ => {
                p.bump();
                p.error(ErrorCode::E0303, "expected a semantic, register or packoffset".to_string());
                break;
            }
        }
    }
}

/// ':' ('register' | 'packoffset') '(' ... ')'
fn parse_location<P: HlslParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump(); // :
    p.bump(); // register / packoffset
    if p.eat(SyntaxKind::L_PAREN) {
        while !p.at_eof()
            && !p.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::SEMICOLON, SyntaxKind::L_BRACE])
        {
            p.bump();
        }
        p.expect(SyntaxKind::R_PAREN);
    } else {
        p.expect(SyntaxKind::L_PAREN);
    }
    // register(t0)[2] is not valid; a subscript after a location is left to the caller
    p.finish_node();
}

/// Annotations = '<' AnnotationDeclaration* '>'
fn parse_annotations<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::ANNOTATIONS);
    p.bump(); // <
    while !p.at_eof() && !p.at(SyntaxKind::GT) {
        let before = p.get_pos();
        let checkpoint = p.checkpoint();
        parse_variable_declaration(p);
        p.start_node_at(checkpoint, SyntaxKind::VARIABLE_DECLARATION_STATEMENT);
        p.expect(SyntaxKind::SEMICOLON);
        p.finish_node();
        if p.get_pos() == before {
            break;
        }
    }
    p.expect(SyntaxKind::GT);
    p.finish_node();
}

/// StateInitializer = 'sampler_state'? '{' StateProperty* '}'
fn parse_state_initializer<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::STATE_INITIALIZER);
    if p.at(SyntaxKind::IDENT) {
        p.bump(); // sampler_state
    }
    p.bump(); // {
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        let before = p.get_pos();
        parse_state_property(p);
        if p.get_pos() == before {
            p.recover(ParseContext::Block);
        }
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

/// StateProperty = IDENT ('[' Expr ']')? '=' ('<' IDENT '>' | Expr) ';'
fn parse_state_property<P: HlslParser>(p: &mut P) {
    if !p.at(SyntaxKind::IDENT) {
        return;
    }
    p.start_node(SyntaxKind::STATE_PROPERTY);
    p.bump();
    parse_array_ranks(p);
    p.expect(SyntaxKind::EQ);
    if p.eat(SyntaxKind::LT) {
        if p.at(SyntaxKind::IDENT) {
            p.start_node(SyntaxKind::IDENTIFIER_EXPR);
            p.start_node(SyntaxKind::NAME_REF);
            p.bump();
            p.finish_node();
            p.finish_node();
        }
        p.expect(SyntaxKind::GT);
    } else {
        parse_assignment_expression(p);
    }
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Modifier*
pub(super) fn parse_modifiers<P: HlslParser>(p: &mut P) {
    while p.current_kind().is_modifier() {
        p.bump();
    }
}

/// Attribute = '[' NameRef ('(' Expr (',' Expr)* ')')? ']'
pub(super) fn parse_attributes<P: HlslParser>(p: &mut P) {
    while p.at(SyntaxKind::L_BRACKET) {
        p.start_node(SyntaxKind::ATTRIBUTE);
        p.bump(); // [
        if p.at(SyntaxKind::IDENT) || p.current_kind().is_keyword() {
            p.start_node(SyntaxKind::NAME_REF);
            p.bump();
            p.finish_node();
        } else {
            p.error(ErrorCode::E0301, "expected an attribute name".to_string());
        }
        if p.at(SyntaxKind::L_PAREN) {
            p.start_node(SyntaxKind::ATTRIBUTE_ARGUMENT_LIST);
            p.bump();
            if !p.at(SyntaxKind::R_PAREN) {
                parse_assignment_expression(p);
                while p.eat(SyntaxKind::COMMA) {
                    parse_assignment_expression(p);
                }
            }
            p.expect(SyntaxKind::R_PAREN);
            p.finish_node();
        }
        p.expect(SyntaxKind::R_BRACKET);
        p.finish_node();
    }
}

/// ConstantBuffer = ('cbuffer' | 'tbuffer') Name Qualifier* '{' VariableDeclarationStatement* '}' ';'?
fn parse_constant_buffer<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::CONSTANT_BUFFER_DECLARATION);
    p.bump(); // cbuffer / tbuffer

    if p.at(SyntaxKind::IDENT) {
        p.start_node(SyntaxKind::NAME);
        p.bump();
        p.finish_node();
    } else {
        p.error(ErrorCode::E0301, "expected a constant buffer name".to_string());
    }
    parse_qualifiers(p);

    if p.eat(SyntaxKind::L_BRACE) {
        while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
            let before = p.get_pos();
            if p.at(SyntaxKind::SEMICOLON) {
                p.start_node(SyntaxKind::EMPTY_STATEMENT);
                p.bump();
                p.finish_node();
            } else if at_type_start(p) || p.at(SyntaxKind::IDENT) || p.current_kind().is_modifier() {
                parse_declaration(p, ParseContext::ConstantBufferBody);
            } else {
                p.error(
                    ErrorCode::E0304,
                    format!("unexpected '{}' in constant buffer", p.current_text()),
                );
            }
            if p.get_pos() == before {
                p.recover(ParseContext::ConstantBufferBody);
            }
        }
        p.expect(SyntaxKind::R_BRACE);
    } else {
        p.expect(SyntaxKind::L_BRACE);
    }
    p.eat(SyntaxKind::SEMICOLON);
    p.finish_node();
}

/// Typedef = 'typedef' Modifier* Type TypedefDeclarator (',' TypedefDeclarator)* ';'
pub(super) fn parse_typedef<P: HlslParser>(p: &mut P) {
    p.start_node(SyntaxKind::TYPEDEF_STATEMENT);
    p.bump(); // typedef
    parse_modifiers(p);
    parse_type(p);

    loop {
        p.start_node(SyntaxKind::TYPEDEF_DECLARATOR);
        if p.at(SyntaxKind::IDENT) {
            let name = p.current_text().to_string();
            p.declare_type(&name);
            p.start_node(SyntaxKind::NAME);
            p.bump();
            p.finish_node();
        } else {
            p.error(ErrorCode::E0301, "expected a type name".to_string());
        }
        parse_array_ranks(p);
        p.finish_node();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }

    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

#[cfg(test)]
mod tests {
    use crate::parser::{SyntaxKind, parse};

    fn kinds(source: &str) -> Vec<SyntaxKind> {
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
        parse.syntax().descendants().map(|n| n.kind()).collect()
    }

    #[test]
    fn test_function_definition_vs_declaration() {
        let kinds = kinds("float f(float x);\nfloat f(float x) { return x; }");
        assert!(kinds.contains(&SyntaxKind::FUNCTION_DECLARATION));
        assert!(kinds.contains(&SyntaxKind::FUNCTION_DEFINITION));
    }

    #[test]
    fn test_global_variable_qualifiers() {
        let kinds = kinds(
            "Texture2D tex : register(t0);\nfloat4 color : COLOR0 = float4(1, 1, 1, 1);\nfloat4 v : packoffset(c0.x);",
        );
        assert!(kinds.contains(&SyntaxKind::REGISTER_LOCATION));
        assert!(kinds.contains(&SyntaxKind::SEMANTIC));
        assert!(kinds.contains(&SyntaxKind::PACKOFFSET_LOCATION));
        assert!(kinds.contains(&SyntaxKind::NUMERIC_CONSTRUCTOR_EXPR));
    }

    #[test]
    fn test_struct_and_cbuffer() {
        let kinds = kinds(
            "struct VSIn { float3 pos : POSITION; float2 uv : TEXCOORD0; };\ncbuffer Globals : register(b0) { float4x4 world; float time; };",
        );
        assert!(kinds.contains(&SyntaxKind::TYPE_DECLARATION_STATEMENT));
        assert!(kinds.contains(&SyntaxKind::FIELD_LIST));
        assert!(kinds.contains(&SyntaxKind::CONSTANT_BUFFER_DECLARATION));
    }

    #[test]
    fn test_attributes_and_parameter_modifiers() {
        let kinds = kinds(
            "[numthreads(8, 8, 1)]\nvoid main(uint3 id : SV_DispatchThreadID, inout float x, triangle float4 p[3]) {}",
        );
        assert!(kinds.contains(&SyntaxKind::ATTRIBUTE));
        assert!(kinds.contains(&SyntaxKind::ATTRIBUTE_ARGUMENT_LIST));
        assert_eq!(kinds.iter().filter(|k| **k == SyntaxKind::PARAMETER).count(), 3);
    }

    #[test]
    fn test_sampler_state_and_typedef() {
        let kinds = kinds(
            "typedef float3 Color;\nColor c;\nsampler s = sampler_state { Texture = <tex>; MinFilter = LINEAR; };\nSamplerState ss { Filter = MIN_MAG_MIP_LINEAR; };",
        );
        assert!(kinds.contains(&SyntaxKind::TYPEDEF_STATEMENT));
        assert_eq!(kinds.iter().filter(|k| **k == SyntaxKind::STATE_INITIALIZER).count(), 2);
    }

    #[test]
    fn test_annotations() {
        let kinds = kinds("float Scale < string UIName = \"scale\"; > = 1.0;");
        assert!(kinds.contains(&SyntaxKind::ANNOTATIONS));
    }

    #[test]
    fn test_missing_function_body() {
        let parse = parse("float f() return;");
        assert!(!parse.ok());
    }
}
