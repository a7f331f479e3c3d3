//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It follows the HLSL grammar structure, including preprocessor directives.

/// All syntax kinds (tokens and nodes) in HLSL
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation, trivia).
/// Nodes are composite (declarations, statements, expressions, directives).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    LINE_COMMENT,
    BLOCK_COMMENT,
    LINE_CONTINUATION, // \ at end of line
    DISABLED_TEXT,     // inactive #if region

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,
    INT_LITERAL,    // 42, 0x2A, 7u
    FLOAT_LITERAL,  // 1.0, .5f, 2e3h
    STRING_LITERAL, // "text"

    // =========================================================================
    // PREPROCESSOR TOKENS
    // =========================================================================
    DIRECTIVE_HASH,      // # at line start
    PP_DEFINE,           // define
    PP_UNDEF,            // undef
    PP_INCLUDE,          // include
    PP_IF,               // if
    PP_IFDEF,            // ifdef
    PP_IFNDEF,           // ifndef
    PP_ELIF,             // elif
    PP_ELSE,             // else
    PP_ENDIF,            // endif
    PP_ERROR,            // error
    PP_PRAGMA,           // pragma
    PP_LINE,             // line
    PP_DEFINED,          // defined (inside #if)
    DIRECTIVE_TEXT,      // rest of an #error/#pragma line
    SYSTEM_INCLUDE_PATH, // <file.hlsl>
    HASH,                // # (stringize inside a macro body)
    HASH_HASH,           // ##

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,     // {
    R_BRACE,     // }
    L_PAREN,     // (
    R_PAREN,     // )
    L_BRACKET,   // [
    R_BRACKET,   // ]
    SEMICOLON,   // ;
    COLON,       // :
    COLON_COLON, // ::
    COMMA,       // ,
    DOT,         // .
    QUESTION,    // ?
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /
    PERCENT,     // %
    PLUS_PLUS,   // ++
    MINUS_MINUS, // --
    AMP,         // &
    PIPE,        // |
    CARET,       // ^
    TILDE,       // ~
    BANG,        // !
    AMP_AMP,     // &&
    PIPE_PIPE,   // ||
    LT,          // <
    GT,          // >
    LT_EQ,       // <=
    GT_EQ,       // >=
    EQ_EQ,       // ==
    BANG_EQ,     // !=
    LT_LT,       // <<
    GT_GT,       // >>
    EQ,          // =
    PLUS_EQ,     // +=
    MINUS_EQ,    // -=
    STAR_EQ,     // *=
    SLASH_EQ,    // /=
    PERCENT_EQ,  // %=
    AMP_EQ,      // &=
    PIPE_EQ,     // |=
    CARET_EQ,    // ^=
    LT_LT_EQ,    // <<=
    GT_GT_EQ,    // >>=
    BACKSLASH,   // \ outside a line continuation

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    BREAK_KW,
    CASE_KW,
    CBUFFER_KW,
    CENTROID_KW,
    COLUMN_MAJOR_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DISCARD_KW,
    DO_KW,
    ELSE_KW,
    EXTERN_KW,
    FALSE_KW,
    FOR_KW,
    GROUPSHARED_KW,
    IF_KW,
    IN_KW,
    INLINE_KW,
    INOUT_KW,
    LINEAR_KW,
    NOINTERPOLATION_KW,
    NOPERSPECTIVE_KW,
    OUT_KW,
    PACKOFFSET_KW,
    PRECISE_KW,
    REGISTER_KW,
    RETURN_KW,
    ROW_MAJOR_KW,
    SAMPLE_KW,
    SHARED_KW,
    STATIC_KW,
    STRUCT_KW,
    SWITCH_KW,
    TBUFFER_KW,
    TRUE_KW,
    TYPEDEF_KW,
    UNIFORM_KW,
    VOLATILE_KW,
    WHILE_KW,

    // =========================================================================
    // ERROR (invalid character token, or a node wrapping skipped tokens)
    // =========================================================================
    ERROR,

    // =========================================================================
    // NODES: root and shared
    // =========================================================================
    SOURCE_FILE,
    NAME,     // declaration name
    NAME_REF, // reference to a name

    // =========================================================================
    // NODES: directives
    // =========================================================================
    DEFINE_DIRECTIVE,
    MACRO_PARAM_LIST,
    MACRO_BODY,
    UNDEF_DIRECTIVE,
    INCLUDE_DIRECTIVE,
    IF_DIRECTIVE,
    IFDEF_DIRECTIVE,
    IFNDEF_DIRECTIVE,
    ELIF_DIRECTIVE,
    ELSE_DIRECTIVE,
    ENDIF_DIRECTIVE,
    ERROR_DIRECTIVE,
    PRAGMA_DIRECTIVE,
    LINE_DIRECTIVE,
    BAD_DIRECTIVE,

    // =========================================================================
    // NODES: types
    // =========================================================================
    PREDEFINED_TYPE,       // float4, void, bool
    VECTOR_TEMPLATE_TYPE,  // vector<float, 3>
    MATRIX_TEMPLATE_TYPE,  // matrix<float, 4, 4>
    OBJECT_TYPE,           // Texture2D<float4>
    TEMPLATE_ARGUMENT_LIST,
    NAMED_TYPE,            // user struct or typedef
    STRUCT_TYPE,           // struct S { ... }
    FIELD_LIST,

    // =========================================================================
    // NODES: declarations
    // =========================================================================
    VARIABLE_DECLARATION_STATEMENT,
    VARIABLE_DECLARATION,
    VARIABLE_DECLARATOR,
    ARRAY_RANK_SPECIFIER,
    SEMANTIC,
    REGISTER_LOCATION,
    PACKOFFSET_LOCATION,
    ANNOTATIONS,
    EQUALS_VALUE_CLAUSE,
    STATE_INITIALIZER,
    STATE_PROPERTY,
    FUNCTION_DECLARATION, // prototype
    FUNCTION_DEFINITION,  // with body
    PARAMETER_LIST,
    PARAMETER,
    ATTRIBUTE,
    ATTRIBUTE_ARGUMENT_LIST,
    TYPE_DECLARATION_STATEMENT, // struct S { ... };
    CONSTANT_BUFFER_DECLARATION,
    TYPEDEF_STATEMENT,
    TYPEDEF_DECLARATOR,

    // =========================================================================
    // NODES: statements
    // =========================================================================
    BLOCK,
    EXPRESSION_STATEMENT,
    EMPTY_STATEMENT,
    IF_STATEMENT,
    ELSE_CLAUSE,
    FOR_STATEMENT,
    WHILE_STATEMENT,
    DO_STATEMENT,
    SWITCH_STATEMENT,
    SWITCH_SECTION,
    CASE_LABEL,
    DEFAULT_LABEL,
    BREAK_STATEMENT,
    CONTINUE_STATEMENT,
    RETURN_STATEMENT,
    DISCARD_STATEMENT,

    // =========================================================================
    // NODES: expressions
    // =========================================================================
    LITERAL_EXPR,
    IDENTIFIER_EXPR,
    PAREN_EXPR,
    CAST_EXPR,
    NUMERIC_CONSTRUCTOR_EXPR,
    FUNCTION_INVOCATION_EXPR,
    METHOD_INVOCATION_EXPR,
    FIELD_ACCESS_EXPR,
    ELEMENT_ACCESS_EXPR,
    PREFIX_UNARY_EXPR,
    POSTFIX_UNARY_EXPR,
    BINARY_EXPR,
    CONDITIONAL_EXPR,
    ASSIGNMENT_EXPR,
    COMPOUND_EXPR,
    ARRAY_INITIALIZER_EXPR,
    ARGUMENT_LIST,

    // Must be last
    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, newline, comment, disabled text)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE
                | Self::NEWLINE
                | Self::LINE_COMMENT
                | Self::BLOCK_COMMENT
                | Self::LINE_CONTINUATION
                | Self::DISABLED_TEXT
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::BREAK_KW as u16) && (self as u16) <= (Self::WHILE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::BACKSLASH as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INT_LITERAL | Self::FLOAT_LITERAL | Self::STRING_LITERAL | Self::TRUE_KW | Self::FALSE_KW
        )
    }

    /// Tokens that only appear inside preprocessor directives
    pub fn is_directive_token(self) -> bool {
        (self as u16) >= (Self::DIRECTIVE_HASH as u16) && (self as u16) <= (Self::HASH_HASH as u16)
    }

    /// Nodes produced for preprocessor directives
    pub fn is_directive_node(self) -> bool {
        (self as u16) >= (Self::DEFINE_DIRECTIVE as u16) && (self as u16) <= (Self::BAD_DIRECTIVE as u16)
    }

    /// Storage, interpolation and parameter modifiers
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::CENTROID_KW
                | Self::COLUMN_MAJOR_KW
                | Self::CONST_KW
                | Self::EXTERN_KW
                | Self::GROUPSHARED_KW
                | Self::IN_KW
                | Self::INLINE_KW
                | Self::INOUT_KW
                | Self::LINEAR_KW
                | Self::NOINTERPOLATION_KW
                | Self::NOPERSPECTIVE_KW
                | Self::OUT_KW
                | Self::PRECISE_KW
                | Self::ROW_MAJOR_KW
                | Self::SAMPLE_KW
                | Self::SHARED_KW
                | Self::STATIC_KW
                | Self::UNIFORM_KW
                | Self::VOLATILE_KW
        )
    }

    pub fn is_assignment_op(self) -> bool {
        matches!(
            self,
            Self::EQ
                | Self::PLUS_EQ
                | Self::MINUS_EQ
                | Self::STAR_EQ
                | Self::SLASH_EQ
                | Self::PERCENT_EQ
                | Self::AMP_EQ
                | Self::PIPE_EQ
                | Self::CARET_EQ
                | Self::LT_LT_EQ
                | Self::GT_GT_EQ
        )
    }

    pub fn is_type_node(self) -> bool {
        matches!(
            self,
            Self::PREDEFINED_TYPE
                | Self::VECTOR_TEMPLATE_TYPE
                | Self::MATRIX_TEMPLATE_TYPE
                | Self::OBJECT_TYPE
                | Self::NAMED_TYPE
                | Self::STRUCT_TYPE
        )
    }

    pub fn is_expression_node(self) -> bool {
        (self as u16) >= (Self::LITERAL_EXPR as u16) && (self as u16) <= (Self::ARRAY_INITIALIZER_EXPR as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HlslLanguage {}

impl rowan::Language for HlslLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<HlslLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<HlslLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<HlslLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<HlslLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_categories() {
        assert!(SyntaxKind::DISABLED_TEXT.is_trivia());
        assert!(!SyntaxKind::IDENT.is_trivia());
        assert!(SyntaxKind::STRUCT_KW.is_keyword());
        assert!(SyntaxKind::GT_GT_EQ.is_punct());
        assert!(SyntaxKind::PP_DEFINE.is_directive_token());
        assert!(SyntaxKind::BAD_DIRECTIVE.is_directive_node());
        assert!(SyntaxKind::INOUT_KW.is_modifier());
        assert!(SyntaxKind::COMPOUND_EXPR.is_expression_node());
        assert!(!SyntaxKind::ARGUMENT_LIST.is_expression_node());
    }

    #[test]
    fn test_raw_round_trip() {
        let raw: rowan::SyntaxKind = SyntaxKind::FIELD_ACCESS_EXPR.into();
        assert_eq!(SyntaxKind::from(raw), SyntaxKind::FIELD_ACCESS_EXPR);
    }
}
