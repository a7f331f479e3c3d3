//! Recursive descent parser for HLSL
//!
//! Builds a rowan GreenNode tree from the directive-aware token stream.
//! Supports error recovery and produces a lossless CST.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::debug;

use super::errors::{ErrorCode, ParseContext, Severity, SyntaxError};
use super::grammar::{self, HlslParser, MAX_NESTING_DEPTH, kind_to_name, missing_token_code};
use super::lexer::Token;
use super::preprocessor::{ParseOptions, tokenize_with};
use super::syntax_kind::SyntaxKind;
use crate::base::{AnalysisError, CancellationToken};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// No error-severity diagnostics
    pub fn ok(&self) -> bool {
        !self.errors.iter().any(|e| e.severity == Severity::Error)
    }
}

/// Parse HLSL source with no predefined macros.
pub fn parse(input: &str) -> Parse {
    parse_with_options(input, &ParseOptions::default())
}

pub fn parse_with_options(input: &str, options: &ParseOptions) -> Parse {
    run(input, options, None)
}

/// Parse, checking `cancel` between top-level declarations.
pub fn parse_cancellable(
    input: &str,
    options: &ParseOptions,
    cancel: &CancellationToken,
) -> Result<Parse, AnalysisError> {
    if cancel.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }
    let parse = run(input, options, Some(cancel));
    if cancel.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }
    Ok(parse)
}

fn run(input: &str, options: &ParseOptions, cancel: Option<&CancellationToken>) -> Parse {
    let lexed = tokenize_with(input, TextSize::new(0), options);
    let mut parser = Parser::new(&lexed.tokens, cancel);
    grammar::parse_source_file(&mut parser);

    let mut parse = parser.finish();
    parse.errors.extend(lexed.errors);
    parse.errors.sort_by_key(|e| (e.range.start(), e.range.end()));
    debug!(len = input.len(), errors = parse.errors.len(), "parsed source");
    parse
}

/// The parser state
///
/// `pos` indexes every token; `cursor` indexes `significant`, the subset the
/// grammar can see.
struct Parser<'t> {
    tokens: &'t [Token<'t>],
    significant: Vec<usize>,
    pos: usize,
    cursor: usize,
    /// The current `>>` has had its first `>` consumed.
    split_gt: bool,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    known_types: FxHashSet<SmolStr>,
    cancel: Option<&'t CancellationToken>,
    cancelled: bool,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token<'t>], cancel: Option<&'t CancellationToken>) -> Self {
        let mut significant = Vec::with_capacity(tokens.len());
        let mut in_directive = false;
        for (index, token) in tokens.iter().enumerate() {
            match token.kind {
                SyntaxKind::DIRECTIVE_HASH => in_directive = true,
                SyntaxKind::NEWLINE => in_directive = false,
                SyntaxKind::ERROR => {}
                kind if !in_directive && !kind.is_trivia() => significant.push(index),
                _ => {}
            }
        }

        Self {
            tokens,
            significant,
            pos: 0,
            cursor: 0,
            split_gt: false,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            known_types: FxHashSet::default(),
            cancel,
            cancelled: false,
            depth: 0,
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    fn nth_token(&self, n: usize) -> Option<&Token<'t>> {
        self.significant
            .get(self.cursor + n)
            .map(|&index| &self.tokens[index])
    }

    fn current_range(&self) -> TextRange {
        match self.nth_token(0) {
            Some(token) if self.split_gt => {
                TextRange::at(token.offset + TextSize::new(1), TextSize::new(1))
            }
            Some(token) => token.range(),
            None => TextRange::empty(self.end_offset()),
        }
    }

    fn end_offset(&self) -> TextSize {
        self.tokens
            .last()
            .map(|t| t.range().end())
            .unwrap_or_default()
    }

    /// Zero-width range just after the last significant token consumed.
    fn missing_range(&self) -> TextRange {
        let offset = self
            .cursor
            .checked_sub(1)
            .and_then(|i| self.significant.get(i))
            .map(|&index| self.tokens[index].range().end())
            .unwrap_or_default();
        TextRange::empty(offset)
    }
}

impl HlslParser for Parser<'_> {
    fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn current_text(&self) -> &str {
        self.nth_text(0)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        if n == 0 && self.split_gt {
            return SyntaxKind::GT;
        }
        self.nth_token(n).map_or(SyntaxKind::ERROR, |t| t.kind)
    }

    fn nth_text(&self, n: usize) -> &str {
        match self.nth_token(n) {
            Some(token) if n == 0 && self.split_gt => &token.text[1..],
            Some(token) => token.text,
            None => "",
        }
    }

    fn at_eof(&self) -> bool {
        self.cursor >= self.significant.len()
    }

    fn get_pos(&self) -> usize {
        self.cursor
    }

    fn bump(&mut self) {
        self.skip_trivia();
        let Some(&token) = self.nth_token(0) else {
            return;
        };
        if self.split_gt {
            self.builder.token(SyntaxKind::GT.into(), &token.text[1..]);
            self.split_gt = false;
        } else {
            self.builder.token(token.kind.into(), token.text);
        }
        self.pos += 1;
        self.cursor += 1;
    }

    fn bump_split_gt(&mut self) {
        self.skip_trivia();
        match self.nth_token(0) {
            Some(&token) if token.kind == SyntaxKind::GT_GT && !self.split_gt => {
                self.builder.token(SyntaxKind::GT.into(), &token.text[..1]);
                self.split_gt = true;
            }
            _ => self.bump(),
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        let found = if self.at_eof() {
            "end of file".to_string()
        } else {
            format!("'{}'", self.current_text())
        };
        let range = self.missing_range();
        self.errors.push(SyntaxError::new(
            format!("expected {}, found {}", kind_to_name(kind), found),
            range,
            missing_token_code(kind),
        ));
        false
    }

    fn skip_trivia(&mut self) {
        let target = self
            .significant
            .get(self.cursor)
            .copied()
            .unwrap_or(self.tokens.len());
        while self.pos < target {
            let token = self.tokens[self.pos];
            if token.kind == SyntaxKind::DIRECTIVE_HASH {
                grammar::parse_directive(self);
            } else {
                self.builder.token(token.kind.into(), token.text);
                self.pos += 1;
            }
        }
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn error(&mut self, code: ErrorCode, message: String) {
        let range = self.current_range();
        self.errors.push(SyntaxError::new(message, range, code));
    }

    fn recover(&mut self, context: ParseContext) {
        let found = if self.at_eof() {
            "end of file".to_string()
        } else {
            format!("'{}'", self.current_text())
        };
        let range = self.current_range();
        self.errors
            .push(SyntaxError::unexpected_in(&found, context, range));

        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !(consumed && self.at_any(context.recovery_tokens())) {
            self.bump();
            consumed = true;
        }
        self.finish_node();
    }

    fn is_known_type(&self, name: &str) -> bool {
        self.known_types.contains(name)
    }

    fn declare_type(&mut self, name: &str) {
        self.known_types.insert(SmolStr::new(name));
    }

    fn should_stop(&mut self) -> bool {
        if !self.cancelled && self.cancel.is_some_and(|c| c.is_cancelled()) {
            debug!("parse cancelled");
            self.cancelled = true;
        }
        self.cancelled
    }

    fn enter_nesting(&mut self) -> bool {
        if self.depth >= MAX_NESTING_DEPTH {
            return false;
        }
        self.depth += 1;
        true
    }

    fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn raw_kind(&self) -> Option<SyntaxKind> {
        self.tokens
            .get(self.pos)
            .map(|t| t.kind)
            .filter(|&k| k != SyntaxKind::NEWLINE)
    }

    fn raw_text(&self) -> &str {
        self.tokens.get(self.pos).map_or("", |t| t.text)
    }

    fn bump_raw(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn start_raw_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn raw_error(&mut self, code: ErrorCode, message: String) {
        let range = self
            .tokens
            .get(self.pos)
            .filter(|t| t.kind != SyntaxKind::NEWLINE)
            .map(|t| t.range())
            .unwrap_or_else(|| {
                let end = self.pos.checked_sub(1).map_or_else(TextSize::default, |i| {
                    self.tokens[i].range().end()
                });
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range, code));
    }

    fn raw_directive_name(&self) -> Option<SyntaxKind> {
        self.tokens
            .get(self.pos + 1..)?
            .iter()
            .find(|t| {
                !matches!(
                    t.kind,
                    SyntaxKind::WHITESPACE | SyntaxKind::LINE_CONTINUATION | SyntaxKind::BLOCK_COMMENT
                )
            })
            .map(|t| t.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_of(parse: &Parse) -> Vec<SyntaxKind> {
        parse.syntax().descendants().map(|n| n.kind()).collect()
    }

    #[test]
    fn test_empty_input() {
        let parse = parse("");
        assert!(parse.ok());
        assert_eq!(parse.syntax().kind(), SyntaxKind::SOURCE_FILE);
    }

    #[test]
    fn test_lossless_with_directives_and_comments() {
        let source = "// header\n#define FOO 1\n/* c */ float4 main() : SV_Target { return FOO; }\n";
        let parse = parse(source);
        assert_eq!(parse.syntax().text().to_string(), source);
    }

    #[test]
    fn test_nested_template_closing() {
        let source = "RWStructuredBuffer<vector<float, 4>> buf;";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
        assert_eq!(parse.syntax().text().to_string(), source);
        assert!(kinds_of(&parse).contains(&SyntaxKind::VECTOR_TEMPLATE_TYPE));
    }

    #[test]
    fn test_missing_semicolon_is_reported_after_previous_token() {
        let parse = parse("float a\nfloat b;");
        let error = &parse.errors[0];
        assert_eq!(error.code, ErrorCode::E0201);
        assert_eq!(error.range, TextRange::empty(TextSize::new(7)));
    }

    #[test]
    fn test_cancelled_token_fails_fast() {
        let token = CancellationToken::new();
        token.cancel();
        let result = parse_cancellable("float a;", &ParseOptions::default(), &token);
        assert!(matches!(result, Err(AnalysisError::Cancelled)));
    }

    #[test]
    fn test_errors_are_sorted() {
        let parse = parse("float a = ;\n#bogus\nint b = @;");
        let starts: Vec<_> = parse.errors.iter().map(|e| e.range.start()).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
        assert!(parse.errors.iter().any(|e| e.code == ErrorCode::E0501));
        assert!(parse.errors.iter().any(|e| e.code == ErrorCode::E0101));
    }
}
