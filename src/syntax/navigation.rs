//! Finding tokens and nodes by offset.

use rowan::TokenAtOffset;

use crate::base::{TextRange, TextSize};
use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Token whose range contains `offset`.
///
/// At a boundary between two tokens the one on the right wins, unless it is
/// trivia and the left one is not.
pub fn token_at(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    if !root.text_range().contains_inclusive(offset) {
        return None;
    }
    match root.token_at_offset(offset) {
        TokenAtOffset::None => None,
        TokenAtOffset::Single(token) => Some(token),
        TokenAtOffset::Between(left, right) => {
            if right.kind().is_trivia() && !left.kind().is_trivia() {
                Some(left)
            } else {
                Some(right)
            }
        }
    }
}

/// Token that contains `offset` or ends exactly at it, preferring the left one.
pub fn token_touching_left(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    if !root.text_range().contains_inclusive(offset) {
        return None;
    }
    root.token_at_offset(offset).left_biased()
}

/// Nearest significant token that ends at or before `offset`.
///
/// Trivia tokens are skipped, so a caret inside whitespace finds the last
/// word written before it.
pub fn token_on_left(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    let mut token = token_touching_left(root, offset)?;
    loop {
        if !token.kind().is_trivia() && token.text_range().end() <= offset {
            return Some(token);
        }
        token = token.prev_token()?;
    }
}

/// Previous token that is not trivia.
pub fn previous_significant(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut current = token.prev_token();
    while let Some(t) = current {
        if !t.kind().is_trivia() {
            return Some(t);
        }
        current = t.prev_token();
    }
    None
}

/// The significant token before the word being typed at `offset`.
///
/// When the caret sits inside or at the end of an identifier, that
/// identifier is skipped; otherwise this is [`token_on_left`].
pub fn token_before_word(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    let left = token_on_left(root, offset)?;
    let is_word = left.kind() == SyntaxKind::IDENT || left.kind().is_keyword();
    if is_word && left.text_range().end() == offset {
        previous_significant(&left)
    } else {
        match token_at(root, offset) {
            // The caret is in the middle of a word
            Some(inside) if inside.kind() == SyntaxKind::IDENT && inside.text_range().start() < offset => {
                previous_significant(&inside)
            }
            _ => Some(left),
        }
    }
}

/// Smallest node whose range covers `range`.
pub fn covering_node(root: &SyntaxNode, range: TextRange) -> Option<SyntaxNode> {
    if !root.text_range().contains_range(range) {
        return None;
    }
    let element = root.covering_element(range);
    match element {
        rowan::NodeOrToken::Node(node) => Some(node),
        rowan::NodeOrToken::Token(token) => token.parent(),
    }
}

/// Innermost node of `kind` containing the token at `offset`.
pub fn ancestor_at(root: &SyntaxNode, offset: TextSize, kind: SyntaxKind) -> Option<SyntaxNode> {
    let token = token_at(root, offset)?;
    token.parent_ancestors().find(|n| n.kind() == kind)
}
