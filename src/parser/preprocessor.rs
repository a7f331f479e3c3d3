//! Directive-aware token stream
//!
//! Takes the raw logos tokens and:
//! - retags directive names after a line-leading `#` as `PP_*` kinds;
//! - folds `#error`/`#pragma` text and `<path>` include arguments into single tokens;
//! - evaluates `#if`/`#ifdef`/`#ifndef`/`#elif`/`#else`/`#endif` and folds
//!   inactive regions into one `DISABLED_TEXT` token each.
//!
//! No tokens are dropped, so the output still covers every byte of the input.

use std::collections::BTreeMap;

use rowan::{TextRange, TextSize};
use smol_str::SmolStr;
use tracing::trace;

use super::conditional;
use super::errors::{ErrorCode, RelatedInfo, SyntaxError};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;

/// Macro name to replacement text.
pub type Defines = BTreeMap<SmolStr, String>;

/// Options that affect how a file is tokenized and parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    /// Macros defined before the first line of the file.
    pub defines: Defines,
}

impl ParseOptions {
    pub fn with_define(mut self, name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.defines.insert(name.into(), value.into());
        self
    }
}

/// Tokens plus every lexical and directive diagnostic.
#[derive(Debug, Clone)]
pub struct LexedText<'a> {
    pub tokens: Vec<Token<'a>>,
    pub errors: Vec<SyntaxError>,
    /// Ranges folded into `DISABLED_TEXT`.
    pub disabled: Vec<TextRange>,
}

/// Directive names recognised after a line-leading `#`.
pub fn directive_kind(name: &str) -> Option<SyntaxKind> {
    Some(match name {
        "define" => SyntaxKind::PP_DEFINE,
        "undef" => SyntaxKind::PP_UNDEF,
        "include" => SyntaxKind::PP_INCLUDE,
        "if" => SyntaxKind::PP_IF,
        "ifdef" => SyntaxKind::PP_IFDEF,
        "ifndef" => SyntaxKind::PP_IFNDEF,
        "elif" => SyntaxKind::PP_ELIF,
        "else" => SyntaxKind::PP_ELSE,
        "endif" => SyntaxKind::PP_ENDIF,
        "error" => SyntaxKind::PP_ERROR,
        "pragma" => SyntaxKind::PP_PRAGMA,
        "line" => SyntaxKind::PP_LINE,
        _ => return None,
    })
}

/// Tokenize `input` (which starts at `offset` in its file) with directives applied.
pub fn tokenize_with<'a>(input: &'a str, offset: TextSize, options: &ParseOptions) -> LexedText<'a> {
    let mut lexer = Lexer::with_offset(input, offset);
    let raw: Vec<Token<'a>> = lexer.by_ref().collect();
    let lex_errors = lexer.take_errors();

    let mut pp = Preprocessor {
        input,
        base: offset,
        raw,
        pos: 0,
        out: Vec::new(),
        errors: Vec::new(),
        disabled: Vec::new(),
        defines: options.defines.clone(),
        conditionals: Vec::new(),
        line_start: true,
    };
    pp.run();

    let Preprocessor {
        out,
        mut errors,
        disabled,
        ..
    } = pp;

    // Diagnostics from inside inactive regions are not reported.
    let mut all_errors: Vec<SyntaxError> = lex_errors
        .into_iter()
        .filter(|e| !disabled.iter().any(|d| d.contains_range(e.range)))
        .collect();
    all_errors.append(&mut errors);
    all_errors.sort_by_key(|e| e.range.start());

    trace!(tokens = out.len(), disabled = disabled.len(), "tokenized");
    LexedText {
        tokens: out,
        errors: all_errors,
        disabled,
    }
}

#[derive(Debug, Clone, Copy)]
struct ConditionalFrame {
    /// Some branch of this conditional has already been active.
    taken: bool,
    seen_else: bool,
    open: TextRange,
}

struct Preprocessor<'a> {
    input: &'a str,
    base: TextSize,
    raw: Vec<Token<'a>>,
    pos: usize,
    out: Vec<Token<'a>>,
    errors: Vec<SyntaxError>,
    disabled: Vec<TextRange>,
    defines: Defines,
    conditionals: Vec<ConditionalFrame>,
    /// No significant token yet on the current line.
    line_start: bool,
}

impl<'a> Preprocessor<'a> {
    fn run(&mut self) {
        while let Some(token) = self.raw.get(self.pos).copied() {
            match token.kind {
                SyntaxKind::NEWLINE => {
                    self.line_start = true;
                    self.emit(token);
                }
                SyntaxKind::BLOCK_COMMENT => {
                    if token.text.contains(['\n', '\r']) {
                        self.line_start = true;
                    }
                    self.emit(token);
                }
                kind if kind.is_trivia() => self.emit(token),
                SyntaxKind::HASH if self.line_start => {
                    self.line_start = false;
                    self.directive();
                }
                SyntaxKind::HASH | SyntaxKind::HASH_HASH => {
                    self.errors.push(SyntaxError::from_code(ErrorCode::E0506, token.range()));
                    self.emit(Token {
                        kind: SyntaxKind::ERROR,
                        ..token
                    });
                    self.line_start = false;
                }
                _ => {
                    self.line_start = false;
                    self.emit(token);
                }
            }
        }

        for frame in std::mem::take(&mut self.conditionals) {
            self.errors.push(
                SyntaxError::new("unterminated conditional directive", frame.open, ErrorCode::E0504)
                    .with_hint("add a matching '#endif'"),
            );
        }
    }

    fn emit(&mut self, token: Token<'a>) {
        self.out.push(token);
        self.pos += 1;
    }

    fn peek_kind(&self) -> Option<SyntaxKind> {
        self.raw.get(self.pos).map(|t| t.kind)
    }

    fn emit_horizontal_trivia(&mut self) {
        while matches!(
            self.peek_kind(),
            Some(SyntaxKind::WHITESPACE | SyntaxKind::LINE_CONTINUATION | SyntaxKind::BLOCK_COMMENT)
        ) {
            let token = self.raw[self.pos];
            self.emit(token);
        }
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek_kind(), None | Some(SyntaxKind::NEWLINE))
    }

    fn slice(&self, start: TextSize, end: TextSize) -> &'a str {
        let start = usize::from(start - self.base);
        let end = usize::from(end - self.base);
        &self.input[start..end]
    }

    /// Everything from the current token to the end of the line, as one token.
    fn merge_rest_of_line(&mut self, kind: SyntaxKind) {
        let first = self.pos;
        while !self.at_line_end() {
            self.pos += 1;
        }
        if self.pos > first {
            let start = self.raw[first].offset;
            let last = self.raw[self.pos - 1];
            let end = last.offset + TextSize::of(last.text);
            let text = self.slice(start, end);
            self.out.push(Token {
                kind,
                text,
                offset: start,
            });
        }
    }

    /// Emit the rest of the directive line, returning its significant tokens.
    fn emit_rest_of_line(&mut self, retag_defined: bool) -> Vec<Token<'a>> {
        let mut significant = Vec::new();
        while !self.at_line_end() {
            let mut token = self.raw[self.pos];
            if retag_defined && token.kind == SyntaxKind::IDENT && token.text == "defined" {
                token.kind = SyntaxKind::PP_DEFINED;
            }
            if !token.kind.is_trivia() {
                significant.push(token);
            }
            self.emit(token);
        }
        significant
    }

    fn directive(&mut self) {
        let hash = self.raw[self.pos];
        self.emit(Token {
            kind: SyntaxKind::DIRECTIVE_HASH,
            ..hash
        });
        self.emit_horizontal_trivia();

        let Some(name) = self.raw.get(self.pos).copied() else {
            return;
        };
        let Some(kind) = directive_kind(name.text).filter(|_| !name.kind.is_trivia()) else {
            // Null directive or unknown name: left for the parser to report.
            self.emit_rest_of_line(false);
            return;
        };
        self.emit(Token { kind, ..name });
        let directive_range = TextRange::new(hash.offset, name.range().end());

        match kind {
            SyntaxKind::PP_ERROR | SyntaxKind::PP_PRAGMA => {
                self.emit_horizontal_trivia();
                self.merge_rest_of_line(SyntaxKind::DIRECTIVE_TEXT);
            }
            SyntaxKind::PP_INCLUDE => {
                self.emit_horizontal_trivia();
                if self.peek_kind() == Some(SyntaxKind::LT) {
                    self.system_include_path();
                }
                self.emit_rest_of_line(false);
            }
            SyntaxKind::PP_DEFINE => {
                let rest = self.emit_rest_of_line(false);
                self.define(&rest);
            }
            SyntaxKind::PP_UNDEF => {
                let rest = self.emit_rest_of_line(false);
                if let Some(name) = rest.first() {
                    self.defines.remove(name.text);
                }
            }
            SyntaxKind::PP_IF | SyntaxKind::PP_ELIF => {
                let rest = self.emit_rest_of_line(true);
                if kind == SyntaxKind::PP_IF {
                    let active = self.condition(&rest, directive_range);
                    self.open_conditional(active, directive_range);
                } else {
                    self.elif(&rest, directive_range);
                }
            }
            SyntaxKind::PP_IFDEF | SyntaxKind::PP_IFNDEF => {
                let rest = self.emit_rest_of_line(false);
                let defined = rest
                    .first()
                    .is_some_and(|name| self.defines.contains_key(name.text));
                let active = defined == (kind == SyntaxKind::PP_IFDEF);
                self.open_conditional(active, directive_range);
            }
            SyntaxKind::PP_ELSE => {
                self.emit_rest_of_line(false);
                self.else_branch(directive_range);
            }
            SyntaxKind::PP_ENDIF => {
                self.emit_rest_of_line(false);
                if self.conditionals.pop().is_none() {
                    self.errors.push(SyntaxError::new(
                        "'#endif' without matching '#if'",
                        directive_range,
                        ErrorCode::E0504,
                    ));
                }
            }
            _ => {
                self.emit_rest_of_line(false);
            }
        }
    }

    fn system_include_path(&mut self) {
        let first = self.pos;
        let mut closed = false;
        while !self.at_line_end() {
            let kind = self.raw[self.pos].kind;
            self.pos += 1;
            if kind == SyntaxKind::GT {
                closed = true;
                break;
            }
        }
        let start = self.raw[first].offset;
        let last = self.raw[self.pos - 1];
        let end = last.offset + TextSize::of(last.text);
        if !closed {
            self.errors.push(
                SyntaxError::new("unterminated include path", TextRange::new(start, end), ErrorCode::E0505)
                    .with_hint("close the path with '>'"),
            );
        }
        let text = self.slice(start, end);
        self.out.push(Token {
            kind: SyntaxKind::SYSTEM_INCLUDE_PATH,
            text,
            offset: start,
        });
    }

    fn define(&mut self, rest: &[Token<'a>]) {
        let Some(name) = rest.first().filter(|t| t.kind == SyntaxKind::IDENT || t.kind.is_keyword())
        else {
            return;
        };
        let body_start = rest
            .get(1)
            .map(|t| t.offset)
            .unwrap_or_else(|| name.range().end());
        let body_end = rest
            .last()
            .map(|t| t.range().end())
            .unwrap_or(body_start)
            .max(body_start);
        let body = self.slice(body_start, body_end).to_string();
        self.defines.insert(SmolStr::new(name.text), body);
    }

    fn condition(&mut self, tokens: &[Token<'a>], directive_range: TextRange) -> bool {
        match conditional::evaluate(tokens, &self.defines) {
            Ok(value) => value,
            Err(message) => {
                let range = match (tokens.first(), tokens.last()) {
                    (Some(first), Some(last)) => TextRange::new(first.offset, last.range().end()),
                    _ => directive_range,
                };
                self.errors.push(SyntaxError::new(message, range, ErrorCode::E0503));
                false
            }
        }
    }

    fn open_conditional(&mut self, active: bool, open: TextRange) {
        self.conditionals.push(ConditionalFrame {
            taken: active,
            seen_else: false,
            open,
        });
        if !active {
            self.skip_disabled();
        }
    }

    fn elif(&mut self, tokens: &[Token<'a>], directive_range: TextRange) {
        let Some(frame) = self.conditionals.last().copied() else {
            self.errors.push(SyntaxError::new(
                "'#elif' without matching '#if'",
                directive_range,
                ErrorCode::E0504,
            ));
            return;
        };
        if frame.seen_else {
            self.errors.push(
                SyntaxError::new("'#elif' after '#else'", directive_range, ErrorCode::E0504)
                    .with_related(RelatedInfo::new("conditional opened here", frame.open)),
            );
        }
        if frame.taken {
            self.skip_disabled();
            return;
        }
        let active = self.condition(tokens, directive_range);
        if let Some(frame) = self.conditionals.last_mut() {
            frame.taken = active;
        }
        if !active {
            self.skip_disabled();
        }
    }

    fn else_branch(&mut self, directive_range: TextRange) {
        let Some(frame) = self.conditionals.last_mut() else {
            self.errors.push(SyntaxError::new(
                "'#else' without matching '#if'",
                directive_range,
                ErrorCode::E0504,
            ));
            return;
        };
        let duplicate = frame.seen_else.then_some(frame.open);
        let was_taken = frame.taken;
        frame.seen_else = true;
        frame.taken = true;

        if let Some(open) = duplicate {
            self.errors.push(
                SyntaxError::new("duplicate '#else'", directive_range, ErrorCode::E0504)
                    .with_related(RelatedInfo::new("conditional opened here", open)),
            );
        }
        if was_taken {
            self.skip_disabled();
        }
    }

    /// Name of the directive whose `#` is at `index`, if any.
    fn directive_name_at(&self, index: usize) -> Option<&'a str> {
        self.raw[index + 1..]
            .iter()
            .find(|t| !matches!(t.kind, SyntaxKind::WHITESPACE | SyntaxKind::LINE_CONTINUATION))
            .filter(|t| t.kind == SyntaxKind::IDENT || t.kind.is_keyword())
            .map(|t| t.text)
    }

    /// Fold tokens into `DISABLED_TEXT` up to the `#` of the `#elif`,
    /// `#else` or `#endif` that closes this branch, or to end of input.
    fn skip_disabled(&mut self) {
        // The directive's own line break stays a separate token.
        if self.peek_kind() == Some(SyntaxKind::NEWLINE) {
            let token = self.raw[self.pos];
            self.emit(token);
        }

        let first = self.pos;
        let mut depth = 0usize;
        let mut at_line_start = true;
        while let Some(token) = self.raw.get(self.pos).copied() {
            match token.kind {
                SyntaxKind::NEWLINE => at_line_start = true,
                SyntaxKind::WHITESPACE | SyntaxKind::LINE_CONTINUATION => {}
                SyntaxKind::BLOCK_COMMENT => {
                    if token.text.contains(['\n', '\r']) {
                        at_line_start = true;
                    }
                }
                SyntaxKind::HASH if at_line_start => {
                    match self.directive_name_at(self.pos) {
                        Some("if" | "ifdef" | "ifndef") => depth += 1,
                        Some("elif" | "else" | "endif") if depth == 0 => {
                            self.line_start = true;
                            break;
                        }
                        Some("endif") => depth -= 1,
                        _ => {}
                    }
                    at_line_start = false;
                }
                _ => at_line_start = false,
            }
            self.pos += 1;
        }

        if self.pos > first {
            let start = self.raw[first].offset;
            let last = self.raw[self.pos - 1];
            let end = last.offset + TextSize::of(last.text);
            let text = self.slice(start, end);
            self.out.push(Token {
                kind: SyntaxKind::DISABLED_TEXT,
                text,
                offset: start,
            });
            self.disabled.push(TextRange::new(start, end));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> LexedText<'_> {
        tokenize_with(text, TextSize::new(0), &ParseOptions::default())
    }

    fn kinds(lexed: &LexedText<'_>) -> Vec<SyntaxKind> {
        lexed
            .tokens
            .iter()
            .map(|t| t.kind)
            .filter(|k| !matches!(k, SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE))
            .collect()
    }

    fn concat(lexed: &LexedText<'_>) -> String {
        lexed.tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_define_directive_tokens() {
        let lexed = lex("#define FOO(a) a * 2\n");
        assert_eq!(
            kinds(&lexed),
            vec![
                SyntaxKind::DIRECTIVE_HASH,
                SyntaxKind::PP_DEFINE,
                SyntaxKind::IDENT,
                SyntaxKind::L_PAREN,
                SyntaxKind::IDENT,
                SyntaxKind::R_PAREN,
                SyntaxKind::IDENT,
                SyntaxKind::STAR,
                SyntaxKind::INT_LITERAL,
            ]
        );
    }

    #[test]
    fn test_pragma_and_system_include_are_single_tokens() {
        let lexed = lex("#pragma pack_matrix( row_major )\n#include <common/util.hlsli>\n");
        let texts: Vec<_> = lexed
            .tokens
            .iter()
            .filter(|t| matches!(t.kind, SyntaxKind::DIRECTIVE_TEXT | SyntaxKind::SYSTEM_INCLUDE_PATH))
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["pack_matrix( row_major )", "<common/util.hlsli>"]);
        assert!(lexed.errors.is_empty());
    }

    #[test]
    fn test_inactive_branch_is_disabled_text() {
        let source = "#if 0\nfloat a;\n#else\nfloat b;\n#endif\n";
        let lexed = lex(source);
        assert_eq!(concat(&lexed), source);
        let disabled: Vec<_> = lexed
            .tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::DISABLED_TEXT)
            .map(|t| t.text)
            .collect();
        assert_eq!(disabled, vec!["float a;\n"]);
        assert!(lexed.errors.is_empty());
    }

    #[test]
    fn test_taken_branch_disables_the_rest() {
        let source = "#ifdef FOO\nint a;\n#elif 1\nint b;\n#else\nint c;\n#endif\n";
        let options = ParseOptions::default().with_define("FOO", "");
        let lexed = tokenize_with(source, TextSize::new(0), &options);
        assert_eq!(concat(&lexed), source);
        assert_eq!(lexed.disabled.len(), 2);
    }

    #[test]
    fn test_nested_conditionals_inside_disabled_region() {
        let source = "#if 0\n#if 1\nx\n#endif\n#endif\nint y;\n";
        let lexed = lex(source);
        assert_eq!(lexed.disabled.len(), 1);
        assert!(lexed.errors.is_empty());
        assert!(lexed.tokens.iter().any(|t| t.text == "y"));
    }

    #[test]
    fn test_file_defines_feed_conditions() {
        let lexed = lex("#define LEVEL 3\n#if LEVEL > 2\nint a;\n#endif\n");
        assert!(lexed.disabled.is_empty());
        let lexed = lex("#define LEVEL 3\n#undef LEVEL\n#if LEVEL > 2\nint a;\n#endif\n");
        assert_eq!(lexed.disabled.len(), 1);
    }

    #[test]
    fn test_unbalanced_conditionals() {
        let lexed = lex("#if 1\nint a;\n");
        assert!(lexed.errors.iter().any(|e| e.code == ErrorCode::E0504));
        let lexed = lex("#endif\n");
        assert!(lexed.errors.iter().any(|e| e.code == ErrorCode::E0504));
    }

    #[test]
    fn test_stray_hash_is_error_token() {
        let lexed = lex("float a # b;");
        assert!(lexed.tokens.iter().any(|t| t.kind == SyntaxKind::ERROR));
        assert_eq!(lexed.errors[0].code, ErrorCode::E0506);
    }

    #[test]
    fn test_lexer_errors_in_disabled_region_are_dropped() {
        let lexed = lex("#if 0\n\"unterminated\n#endif\n");
        assert!(lexed.errors.is_empty());
    }

    #[test]
    fn test_invalid_if_expression() {
        let lexed = lex("#if (1\n#endif\n");
        assert!(lexed.errors.iter().any(|e| e.code == ErrorCode::E0503));
    }
}
