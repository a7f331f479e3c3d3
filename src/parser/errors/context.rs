//! Parse contexts for context-aware messages and recovery.

use crate::parser::SyntaxKind;

/// Where in the source structure the parser currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseContext {
    #[default]
    TopLevel,
    StructBody,
    ConstantBufferBody,
    ParameterList,
    Block,
    Expression,
    ArgumentList,
    TypeName,
    Directive,
}

impl ParseContext {
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::StructBody => "in struct body",
            Self::ConstantBufferBody => "in constant buffer body",
            Self::ParameterList => "in parameter list",
            Self::Block => "in block",
            Self::Expression => "in expression",
            Self::ArgumentList => "in argument list",
            Self::TypeName => "in type",
            Self::Directive => "in preprocessor directive",
        }
    }

    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel => "a declaration, function or directive",
            Self::StructBody => "a field declaration",
            Self::ConstantBufferBody => "a variable declaration",
            Self::ParameterList => "a parameter",
            Self::Block => "a statement",
            Self::Expression => "an expression",
            Self::ArgumentList => "an argument",
            Self::TypeName => "a type name",
            Self::Directive => "directive arguments",
        }
    }

    /// Tokens at which error recovery stops skipping.
    pub fn recovery_tokens(&self) -> &'static [SyntaxKind] {
        match self {
            Self::TopLevel => &[
                SyntaxKind::STRUCT_KW,
                SyntaxKind::CBUFFER_KW,
                SyntaxKind::TBUFFER_KW,
                SyntaxKind::TYPEDEF_KW,
                SyntaxKind::STATIC_KW,
                SyntaxKind::CONST_KW,
                SyntaxKind::SEMICOLON,
            ],
            Self::StructBody | Self::ConstantBufferBody => {
                &[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]
            }
            Self::ParameterList => &[SyntaxKind::R_PAREN, SyntaxKind::COMMA, SyntaxKind::L_BRACE],
            Self::Block => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::R_BRACE,
                SyntaxKind::IF_KW,
                SyntaxKind::FOR_KW,
                SyntaxKind::WHILE_KW,
                SyntaxKind::DO_KW,
                SyntaxKind::SWITCH_KW,
                SyntaxKind::RETURN_KW,
                SyntaxKind::CASE_KW,
                SyntaxKind::DEFAULT_KW,
            ],
            Self::Expression | Self::ArgumentList => &[
                SyntaxKind::SEMICOLON,
                SyntaxKind::R_PAREN,
                SyntaxKind::R_BRACE,
                SyntaxKind::R_BRACKET,
                SyntaxKind::COMMA,
            ],
            Self::TypeName => &[SyntaxKind::GT, SyntaxKind::SEMICOLON, SyntaxKind::IDENT],
            Self::Directive => &[SyntaxKind::NEWLINE],
        }
    }

    pub fn is_body(&self) -> bool {
        matches!(self, Self::StructBody | Self::ConstantBufferBody | Self::Block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        assert_eq!(ParseContext::TopLevel.description(), "at top level");
        assert!(ParseContext::Block.expected_description().contains("statement"));
    }

    #[test]
    fn test_recovery_tokens() {
        assert!(ParseContext::Block.recovery_tokens().contains(&SyntaxKind::R_BRACE));
        assert!(ParseContext::ArgumentList.recovery_tokens().contains(&SyntaxKind::COMMA));
    }

    #[test]
    fn test_default_and_body() {
        assert_eq!(ParseContext::default(), ParseContext::TopLevel);
        assert!(ParseContext::StructBody.is_body());
        assert!(!ParseContext::Expression.is_body());
    }
}
