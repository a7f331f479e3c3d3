//! Token view with trivia attached
//!
//! Editor features that work token by token (classification, brace matching)
//! want each significant token together with the whitespace, comments and
//! directives around it. A token's trailing trivia runs up to and including
//! the first end-of-line; everything after that leads the next token.

use rowan::{TextRange, TextSize};

use super::errors::SyntaxError;
use super::preprocessor::{ParseOptions, tokenize_with};
use super::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    Comment,
    LineContinuation,
    /// A whole directive line, `#` to end of line.
    Directive,
    DisabledText,
    /// An invalid character or stray `#`.
    SkippedToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaToken {
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub leading: Vec<Trivia>,
    pub trailing: Vec<Trivia>,
}

impl TriviaToken {
    /// Range including leading and trailing trivia.
    pub fn full_range(&self) -> TextRange {
        let start = self.leading.first().map_or(self.range.start(), |t| t.range.start());
        let end = self.trailing.last().map_or(self.range.end(), |t| t.range.end());
        TextRange::new(start, end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaLex {
    pub tokens: Vec<TriviaToken>,
    /// Trivia after the last significant token, owned by end of file.
    pub end_of_file_trivia: Vec<Trivia>,
    pub errors: Vec<SyntaxError>,
}

impl TriviaLex {
    pub fn end_of_file(&self) -> TextSize {
        self.end_of_file_trivia
            .last()
            .map(|t| t.range.end())
            .or_else(|| self.tokens.last().map(|t| t.full_range().end()))
            .unwrap_or_default()
    }
}

fn trivia_kind(kind: SyntaxKind) -> Option<TriviaKind> {
    Some(match kind {
        SyntaxKind::WHITESPACE => TriviaKind::Whitespace,
        SyntaxKind::NEWLINE => TriviaKind::EndOfLine,
        SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT => TriviaKind::Comment,
        SyntaxKind::LINE_CONTINUATION => TriviaKind::LineContinuation,
        SyntaxKind::DISABLED_TEXT => TriviaKind::DisabledText,
        SyntaxKind::ERROR => TriviaKind::SkippedToken,
        _ => return None,
    })
}

/// Lex `text` into significant tokens with attached trivia.
pub fn lex_with_trivia(text: &str, options: &ParseOptions) -> TriviaLex {
    let lexed = tokenize_with(text, TextSize::new(0), options);
    let tokens = &lexed.tokens;

    let mut out: Vec<TriviaToken> = Vec::new();
    let mut pending: Vec<Trivia> = Vec::new();
    let mut in_trailing = false;

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        let trivia = if token.kind == SyntaxKind::DIRECTIVE_HASH {
            let start = token.offset;
            let mut end = token.range().end();
            i += 1;
            while i < tokens.len() && tokens[i].kind != SyntaxKind::NEWLINE {
                end = tokens[i].range().end();
                i += 1;
            }
            Some(Trivia {
                kind: TriviaKind::Directive,
                range: TextRange::new(start, end),
            })
        } else {
            i += 1;
            trivia_kind(token.kind).map(|kind| Trivia {
                kind,
                range: token.range(),
            })
        };

        match trivia {
            Some(trivia) => {
                let line_bound = matches!(trivia.kind, TriviaKind::Directive | TriviaKind::DisabledText);
                if in_trailing && !line_bound {
                    if let Some(last) = out.last_mut() {
                        last.trailing.push(trivia);
                    }
                    if trivia.kind == TriviaKind::EndOfLine {
                        in_trailing = false;
                    }
                } else {
                    in_trailing = false;
                    pending.push(trivia);
                }
            }
            None => {
                out.push(TriviaToken {
                    kind: token.kind,
                    range: token.range(),
                    leading: std::mem::take(&mut pending),
                    trailing: Vec::new(),
                });
                in_trailing = true;
            }
        }
    }

    TriviaLex {
        tokens: out,
        end_of_file_trivia: pending,
        errors: lexed.errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(text: &str, lex: &TriviaLex) -> String {
        let mut out = String::new();
        let mut push = |range: TextRange| out.push_str(&text[range]);
        for token in &lex.tokens {
            token.leading.iter().for_each(|t| push(t.range));
            push(token.range);
            token.trailing.iter().for_each(|t| push(t.range));
        }
        lex.end_of_file_trivia.iter().for_each(|t| push(t.range));
        out
    }

    #[test]
    fn test_trailing_trivia_stops_after_end_of_line() {
        let text = "float a; // note\n  int b;";
        let lex = lex_with_trivia(text, &ParseOptions::default());
        let semicolon = &lex.tokens[2];
        assert_eq!(semicolon.kind, SyntaxKind::SEMICOLON);
        let kinds: Vec<_> = semicolon.trailing.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TriviaKind::Whitespace, TriviaKind::Comment, TriviaKind::EndOfLine]
        );
        assert_eq!(lex.tokens[3].leading[0].kind, TriviaKind::Whitespace);
        assert_eq!(reconstruct(text, &lex), text);
    }

    #[test]
    fn test_directives_are_leading_trivia() {
        let text = "#define X 1\nfloat a;\n";
        let lex = lex_with_trivia(text, &ParseOptions::default());
        let first = &lex.tokens[0];
        assert_eq!(first.leading[0].kind, TriviaKind::Directive);
        assert_eq!(&text[first.leading[0].range], "#define X 1");
        assert_eq!(reconstruct(text, &lex), text);
    }

    #[test]
    fn test_disabled_text_and_end_of_file() {
        let text = "int a;\n#if 0\nint b;\n#endif\n";
        let lex = lex_with_trivia(text, &ParseOptions::default());
        assert_eq!(lex.tokens.len(), 3);
        let eof_kinds: Vec<_> = lex.end_of_file_trivia.iter().map(|t| t.kind).collect();
        assert!(eof_kinds.contains(&TriviaKind::DisabledText));
        assert_eq!(lex.end_of_file(), TextSize::of(text));
        assert_eq!(reconstruct(text, &lex), text);
    }
}
