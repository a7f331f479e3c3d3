//! Grammar modules for HLSL parsing
//!
//! The parsing functions are generic over [`HlslParser`] so the grammar stays
//! separate from token bookkeeping and tree building:
//! - `declarations` - top-level and member declarations, functions, buffers, typedefs
//! - `types` - predefined, template, object, named and inline struct types
//! - `statements` - blocks and control flow
//! - `expressions` - precedence-climbing expression parser
//! - `directives` - preprocessor directive nodes

mod declarations;
mod directives;
mod expressions;
mod statements;
mod types;

pub use declarations::parse_source_file;
pub use directives::parse_directive;
pub use expressions::{parse_assignment_expression, parse_expression};
pub use statements::parse_statement;
pub use types::{TypeNameClass, classify_type_name, parse_type, split_numeric_type_name};

use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::syntax_kind::SyntaxKind;
use rowan::Checkpoint;

/// Deepest combined nesting of statements, expressions and types the grammar
/// descends into before giving up on a construct.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Interface between the grammar functions and the parser.
///
/// Lookahead (`current_kind`, `nth`) sees only significant tokens: trivia,
/// directive lines and skipped tokens are invisible to it and are flushed into
/// the tree by `skip_trivia`, which `bump`, `start_node` and `checkpoint` call
/// first.
pub trait HlslParser {
    // Token inspection
    fn current_kind(&self) -> SyntaxKind;
    fn current_text(&self) -> &str;
    /// Kind of the nth significant token ahead; `ERROR` past the end.
    fn nth(&self, n: usize) -> SyntaxKind;
    fn nth_text(&self, n: usize) -> &str;
    fn at_eof(&self) -> bool;
    fn get_pos(&self) -> usize;

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    // Token consumption
    fn bump(&mut self);
    /// Consume the first `>` of a `>>` token, leaving the second one current.
    fn bump_split_gt(&mut self);

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool;

    // Trivia handling
    fn skip_trivia(&mut self);

    // Node building
    fn start_node(&mut self, kind: SyntaxKind);
    fn checkpoint(&mut self) -> Checkpoint;
    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind);
    fn finish_node(&mut self);

    // Errors
    fn error(&mut self, code: ErrorCode, message: String);
    /// Wrap tokens up to the context's recovery set in an `ERROR` node.
    fn recover(&mut self, context: ParseContext);

    // Type-name knowledge for disambiguation
    fn is_known_type(&self, name: &str) -> bool;
    fn declare_type(&mut self, name: &str);

    /// True once cancellation has been requested.
    fn should_stop(&mut self) -> bool;

    // Nesting guard
    /// Enter one level of nesting; false once [`MAX_NESTING_DEPTH`] is reached.
    fn enter_nesting(&mut self) -> bool;
    fn exit_nesting(&mut self);

    // Raw access inside a directive line, trivia included
    /// Next raw token of the current directive line; `None` at its end.
    fn raw_kind(&self) -> Option<SyntaxKind>;
    fn raw_text(&self) -> &str;
    fn bump_raw(&mut self);
    fn start_raw_node(&mut self, kind: SyntaxKind);
    /// Report an error at the current raw token.
    fn raw_error(&mut self, code: ErrorCode, message: String);
    /// Kind of the first non-blank token after the current `#`.
    fn raw_directive_name(&self) -> Option<SyntaxKind>;
}

/// Run `parse` one nesting level deeper, or skip the construct once the
/// limit is reached.
pub(crate) fn nested<P: HlslParser>(p: &mut P, parse: impl FnOnce(&mut P) -> bool) -> bool {
    if !p.enter_nesting() {
        return skip_too_deep(p);
    }
    let parsed = parse(p);
    p.exit_nesting();
    parsed
}

/// Report nesting past [`MAX_NESTING_DEPTH`] and wrap the construct at the
/// cursor in a flat `ERROR` node.
///
/// Stops at a `;`, `,` or unmatched closing delimiter, or right after a
/// balanced `{ ... }` group. Returns false if nothing was consumed.
pub(crate) fn skip_too_deep<P: HlslParser>(p: &mut P) -> bool {
    p.error(
        ErrorCode::E0903,
        format!("nesting exceeds the maximum depth of {MAX_NESTING_DEPTH}"),
    );
    let before = p.get_pos();
    p.start_node(SyntaxKind::ERROR);
    let mut depth = 0usize;
    while !p.at_eof() {
        match p.current_kind() {
            SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET if depth == 0 => break,
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => depth -= 1,
            SyntaxKind::R_BRACE if depth == 0 => break,
            SyntaxKind::R_BRACE => {
                depth -= 1;
                p.bump();
                if depth == 0 {
                    break;
                }
                continue;
            }
            SyntaxKind::SEMICOLON | SyntaxKind::COMMA if depth == 0 => break,
            _ => {}
        }
        p.bump();
    }
    p.finish_node();
    p.get_pos() != before
}

/// Human-readable token description for diagnostics.
pub fn kind_to_name(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::IDENT => "identifier",
        SyntaxKind::INT_LITERAL | SyntaxKind::FLOAT_LITERAL => "number",
        SyntaxKind::STRING_LITERAL => "string",
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::L_BRACKET => "'['",
        SyntaxKind::R_BRACKET => "']'",
        SyntaxKind::SEMICOLON => "';'",
        SyntaxKind::COLON => "':'",
        SyntaxKind::COMMA => "','",
        SyntaxKind::DOT => "'.'",
        SyntaxKind::EQ => "'='",
        SyntaxKind::LT => "'<'",
        SyntaxKind::GT => "'>'",
        SyntaxKind::QUESTION => "'?'",
        kind if kind.is_keyword() => "keyword",
        kind if kind.is_punct() => "operator",
        _ => "token",
    }
}

/// Error code for a missing token of `kind`.
pub(crate) fn missing_token_code(kind: SyntaxKind) -> ErrorCode {
    match kind {
        SyntaxKind::SEMICOLON => ErrorCode::E0201,
        SyntaxKind::R_BRACE => ErrorCode::E0202,
        SyntaxKind::R_PAREN => ErrorCode::E0203,
        SyntaxKind::R_BRACKET => ErrorCode::E0204,
        SyntaxKind::IDENT => ErrorCode::E0301,
        _ => ErrorCode::E0902,
    }
}
