//! Logos-based lexer for HLSL
//!
//! Fast raw tokenization using the logos crate. Every byte of the input ends
//! up in exactly one token; nothing is skipped. Directive recognition and
//! conditional regions are layered on top by [`super::preprocessor`].

use super::errors::{ErrorCode, SyntaxError};
use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Lexer wrapping the logos-generated tokenizer
///
/// Lexical problems (unterminated literals, invalid characters, malformed
/// numbers) never stop the lexer; they are collected and can be taken with
/// [`Lexer::take_errors`].
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    base: TextSize,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_offset(input, TextSize::new(0))
    }

    /// Lex `input` as if it started at `offset` in a larger document.
    pub fn with_offset(input: &'a str, offset: TextSize) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            base: offset,
            errors: Vec::new(),
        }
    }

    pub fn take_errors(&mut self) -> Vec<SyntaxError> {
        std::mem::take(&mut self.errors)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = self.base + TextSize::new(self.inner.span().start as u32);
        let range = TextRange::at(offset, TextSize::of(text));

        let kind = match logos_token {
            Ok(token) => {
                if let Some(error) = token.lexical_error(range) {
                    self.errors.push(error);
                }
                token.into()
            }
            Err(()) => {
                self.errors.push(SyntaxError::new(
                    format!("invalid character '{}'", text.escape_debug()),
                    range,
                    ErrorCode::E0101,
                ));
                SyntaxKind::ERROR
            }
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec, without directive processing
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Classification of a numeric literal scanned by [`lex_number`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLiteral {
    Int,
    Float,
    MalformedInt,
    MalformedFloat,
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\x0B\x0C]+")]
    Whitespace,

    #[regex(r"\r\n|\n|\r")]
    Newline,

    #[regex(r"\\[ \t]*(\r\n|\n|\r)")]
    LineContinuation,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    /// `true` when the closing `*/` was found
    #[token("/*", lex_block_comment)]
    BlockComment(bool),

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]", lex_number)]
    #[regex(r"\.[0-9]", lex_number)]
    Number(NumberLiteral),

    /// `true` when the closing quote was found
    #[token("\"", lex_string)]
    String(bool),

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,
    #[token("::")]
    ColonColon,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("##")]
    HashHash,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("?")]
    Question,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("#")]
    Hash,
    #[token("\\")]
    Backslash,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("break")]
    BreakKw,
    #[token("case")]
    CaseKw,
    #[token("cbuffer")]
    CbufferKw,
    #[token("centroid")]
    CentroidKw,
    #[token("column_major")]
    ColumnMajorKw,
    #[token("const")]
    ConstKw,
    #[token("continue")]
    ContinueKw,
    #[token("default")]
    DefaultKw,
    #[token("discard")]
    DiscardKw,
    #[token("do")]
    DoKw,
    #[token("else")]
    ElseKw,
    #[token("extern")]
    ExternKw,
    #[token("false")]
    FalseKw,
    #[token("for")]
    ForKw,
    #[token("groupshared")]
    GroupsharedKw,
    #[token("if")]
    IfKw,
    #[token("in")]
    InKw,
    #[token("inline")]
    InlineKw,
    #[token("inout")]
    InoutKw,
    #[token("linear")]
    LinearKw,
    #[token("nointerpolation")]
    NointerpolationKw,
    #[token("noperspective")]
    NoperspectiveKw,
    #[token("out")]
    OutKw,
    #[token("packoffset")]
    PackoffsetKw,
    #[token("precise")]
    PreciseKw,
    #[token("register")]
    RegisterKw,
    #[token("return")]
    ReturnKw,
    #[token("row_major")]
    RowMajorKw,
    #[token("sample")]
    SampleKw,
    #[token("shared")]
    SharedKw,
    #[token("static")]
    StaticKw,
    #[token("struct")]
    StructKw,
    #[token("switch")]
    SwitchKw,
    #[token("tbuffer")]
    TbufferKw,
    #[token("true")]
    TrueKw,
    #[token("typedef")]
    TypedefKw,
    #[token("uniform")]
    UniformKw,
    #[token("volatile")]
    VolatileKw,
    #[token("while")]
    WhileKw,
}

impl LogosToken {
    fn lexical_error(self, range: TextRange) -> Option<SyntaxError> {
        match self {
            Self::BlockComment(false) => Some(
                SyntaxError::new("unterminated block comment", range, ErrorCode::E0103)
                    .with_hint("add '*/' to close the comment"),
            ),
            Self::String(false) => Some(SyntaxError::new(
                "unterminated string literal",
                range,
                ErrorCode::E0102,
            )),
            Self::Number(NumberLiteral::MalformedInt) => Some(SyntaxError::new(
                "malformed integer literal",
                range,
                ErrorCode::E0104,
            )),
            Self::Number(NumberLiteral::MalformedFloat) => Some(SyntaxError::new(
                "malformed floating-point literal",
                range,
                ErrorCode::E0104,
            )),
            _ => None,
        }
    }
}

// =============================================================================
// Callbacks
// =============================================================================

fn lex_block_comment(lex: &mut logos::Lexer<LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

fn lex_string(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'"' => {
                lex.bump(i + 1);
                return true;
            }
            b'\n' | b'\r' => break,
            b'\\' if matches!(rest.get(i + 1), Some(c) if *c != b'\n' && *c != b'\r') => i += 2,
            _ => i += 1,
        }
    }
    // An escape may have stepped into a multi-byte character; back up to a boundary.
    while i > 0 && !lex.remainder().is_char_boundary(i) {
        i -= 1;
    }
    lex.bump(i);
    false
}

fn lex_number(lex: &mut logos::Lexer<LogosToken>) -> NumberLiteral {
    let (consumed, literal) = scan_number(lex.slice().as_bytes(), lex.remainder().as_bytes());
    lex.bump(consumed);
    literal
}

/// Scan the rest of a numeric literal whose first character(s) are `head`.
///
/// Returns how many bytes of `rest` belong to the literal.
fn scan_number(head: &[u8], rest: &[u8]) -> (usize, NumberLiteral) {
    let at = |i: usize| rest.get(i).copied().unwrap_or(0);
    let mut i = 0;
    let mut is_float = head.first() == Some(&b'.');
    let mut malformed = false;

    if head == b"0" && matches!(at(0), b'x' | b'X') {
        i = 1;
        let digits = i;
        while at(i).is_ascii_hexdigit() {
            i += 1;
        }
        malformed = i == digits;
        while matches!(at(i), b'u' | b'U' | b'l' | b'L') {
            i += 1;
        }
    } else {
        while at(i).is_ascii_digit() {
            i += 1;
        }
        if !is_float && at(i) == b'.' {
            is_float = true;
            i += 1;
            while at(i).is_ascii_digit() {
                i += 1;
            }
        }
        if matches!(at(i), b'e' | b'E') {
            is_float = true;
            i += 1;
            if matches!(at(i), b'+' | b'-') {
                i += 1;
            }
            if at(i).is_ascii_digit() {
                while at(i).is_ascii_digit() {
                    i += 1;
                }
            } else {
                malformed = true;
            }
        }
        if is_float {
            if matches!(at(i), b'f' | b'F' | b'h' | b'H' | b'l' | b'L') {
                i += 1;
            }
        } else {
            while matches!(at(i), b'u' | b'U' | b'l' | b'L') {
                i += 1;
            }
        }
    }

    // Identifier characters glued to a literal make it malformed.
    while at(i).is_ascii_alphanumeric() || at(i) == b'_' {
        malformed = true;
        i += 1;
    }

    let literal = match (is_float, malformed) {
        (false, false) => NumberLiteral::Int,
        (true, false) => NumberLiteral::Float,
        (false, true) => NumberLiteral::MalformedInt,
        (true, true) => NumberLiteral::MalformedFloat,
    };
    (i, literal)
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            Whitespace => SyntaxKind::WHITESPACE,
            Newline => SyntaxKind::NEWLINE,
            LineContinuation => SyntaxKind::LINE_CONTINUATION,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment(_) => SyntaxKind::BLOCK_COMMENT,
            Ident => SyntaxKind::IDENT,
            Number(NumberLiteral::Int | NumberLiteral::MalformedInt) => SyntaxKind::INT_LITERAL,
            Number(NumberLiteral::Float | NumberLiteral::MalformedFloat) => SyntaxKind::FLOAT_LITERAL,
            String(_) => SyntaxKind::STRING_LITERAL,
            LtLtEq => SyntaxKind::LT_LT_EQ,
            GtGtEq => SyntaxKind::GT_GT_EQ,
            ColonColon => SyntaxKind::COLON_COLON,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            LtLt => SyntaxKind::LT_LT,
            GtGt => SyntaxKind::GT_GT,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            PercentEq => SyntaxKind::PERCENT_EQ,
            AmpEq => SyntaxKind::AMP_EQ,
            PipeEq => SyntaxKind::PIPE_EQ,
            CaretEq => SyntaxKind::CARET_EQ,
            HashHash => SyntaxKind::HASH_HASH,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Question => SyntaxKind::QUESTION,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            Caret => SyntaxKind::CARET,
            Tilde => SyntaxKind::TILDE,
            Bang => SyntaxKind::BANG,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Eq => SyntaxKind::EQ,
            Hash => SyntaxKind::HASH,
            Backslash => SyntaxKind::BACKSLASH,
            BreakKw => SyntaxKind::BREAK_KW,
            CaseKw => SyntaxKind::CASE_KW,
            CbufferKw => SyntaxKind::CBUFFER_KW,
            CentroidKw => SyntaxKind::CENTROID_KW,
            ColumnMajorKw => SyntaxKind::COLUMN_MAJOR_KW,
            ConstKw => SyntaxKind::CONST_KW,
            ContinueKw => SyntaxKind::CONTINUE_KW,
            DefaultKw => SyntaxKind::DEFAULT_KW,
            DiscardKw => SyntaxKind::DISCARD_KW,
            DoKw => SyntaxKind::DO_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            ExternKw => SyntaxKind::EXTERN_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            ForKw => SyntaxKind::FOR_KW,
            GroupsharedKw => SyntaxKind::GROUPSHARED_KW,
            IfKw => SyntaxKind::IF_KW,
            InKw => SyntaxKind::IN_KW,
            InlineKw => SyntaxKind::INLINE_KW,
            InoutKw => SyntaxKind::INOUT_KW,
            LinearKw => SyntaxKind::LINEAR_KW,
            NointerpolationKw => SyntaxKind::NOINTERPOLATION_KW,
            NoperspectiveKw => SyntaxKind::NOPERSPECTIVE_KW,
            OutKw => SyntaxKind::OUT_KW,
            PackoffsetKw => SyntaxKind::PACKOFFSET_KW,
            PreciseKw => SyntaxKind::PRECISE_KW,
            RegisterKw => SyntaxKind::REGISTER_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            RowMajorKw => SyntaxKind::ROW_MAJOR_KW,
            SampleKw => SyntaxKind::SAMPLE_KW,
            SharedKw => SyntaxKind::SHARED_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            StructKw => SyntaxKind::STRUCT_KW,
            SwitchKw => SyntaxKind::SWITCH_KW,
            TbufferKw => SyntaxKind::TBUFFER_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            TypedefKw => SyntaxKind::TYPEDEF_KW,
            UniformKw => SyntaxKind::UNIFORM_KW,
            VolatileKw => SyntaxKind::VOLATILE_KW,
            WhileKw => SyntaxKind::WHILE_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_declaration() {
        let tokens: Vec<_> = Lexer::new("float4 color;").collect();
        assert_eq!(tokens.len(), 4); // float4, whitespace, color, ;
        assert_eq!(tokens[0].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[3].kind, SyntaxKind::SEMICOLON);
    }

    #[test]
    fn test_lex_keywords_and_modifiers() {
        assert_eq!(
            kinds("static const inout"),
            vec![
                SyntaxKind::STATIC_KW,
                SyntaxKind::WHITESPACE,
                SyntaxKind::CONST_KW,
                SyntaxKind::WHITESPACE,
                SyntaxKind::INOUT_KW,
            ]
        );
        // keyword prefixes stay identifiers
        assert_eq!(kinds("intake"), vec![SyntaxKind::IDENT]);
    }

    #[test]
    fn test_lex_numbers() {
        assert_eq!(kinds("42"), vec![SyntaxKind::INT_LITERAL]);
        assert_eq!(kinds("0x1Fu"), vec![SyntaxKind::INT_LITERAL]);
        assert_eq!(kinds("1.5f"), vec![SyntaxKind::FLOAT_LITERAL]);
        assert_eq!(kinds(".5"), vec![SyntaxKind::FLOAT_LITERAL]);
        assert_eq!(kinds("1e-3"), vec![SyntaxKind::FLOAT_LITERAL]);
        assert_eq!(kinds("2.h"), vec![SyntaxKind::FLOAT_LITERAL]);
    }

    #[test]
    fn test_malformed_numbers_report_errors() {
        for input in ["1e", "0x", "12abc", "1.0ee"] {
            let mut lexer = Lexer::new(input);
            let tokens: Vec<_> = lexer.by_ref().collect();
            assert_eq!(tokens.len(), 1, "{input} should be a single token");
            let errors = lexer.take_errors();
            assert_eq!(errors.len(), 1, "{input} should report one error");
            assert_eq!(errors[0].code, ErrorCode::E0104);
        }
    }

    #[test]
    fn test_comments_and_newlines() {
        assert_eq!(
            kinds("// c\r\n/* b */\n"),
            vec![
                SyntaxKind::LINE_COMMENT,
                SyntaxKind::NEWLINE,
                SyntaxKind::BLOCK_COMMENT,
                SyntaxKind::NEWLINE,
            ]
        );
    }

    #[test]
    fn test_unterminated_literals() {
        let mut lexer = Lexer::new("\"abc\nx /* open");
        let tokens: Vec<_> = lexer.by_ref().collect();
        assert_eq!(tokens[0].kind, SyntaxKind::STRING_LITERAL);
        assert_eq!(tokens[0].text, "\"abc");
        assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::BLOCK_COMMENT));
        let codes: Vec<_> = lexer.take_errors().into_iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![ErrorCode::E0102, ErrorCode::E0103]);
    }

    #[test]
    fn test_invalid_character() {
        let mut lexer = Lexer::new("a @ b");
        let tokens: Vec<_> = lexer.by_ref().collect();
        assert!(tokens.iter().any(|t| t.kind == SyntaxKind::ERROR && t.text == "@"));
        assert_eq!(lexer.take_errors()[0].code, ErrorCode::E0101);
    }

    #[test]
    fn test_offsets_cover_input() {
        let input = "float x = 1.0; // done\n";
        let tokens: Vec<_> = Lexer::with_offset(input, TextSize::new(10)).collect();
        assert_eq!(tokens[0].offset, TextSize::new(10));
        let text: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(text, input);
    }
}
