//! `#if` / `#elif` expression evaluation
//!
//! Integer-only, C-style: literals, `defined`, unary and binary operators,
//! parentheses and `?:`. Identifiers expand through the active defines;
//! anything undefined evaluates to zero.

use super::grammar::MAX_NESTING_DEPTH;
use super::lexer::{Token, tokenize};
use super::preprocessor::Defines;
use super::syntax_kind::SyntaxKind;

/// Expansion depth at which a self-referencing define is reported.
const MAX_EXPANSION_DEPTH: usize = 32;

/// Evaluate the significant tokens of a conditional directive.
pub fn evaluate(tokens: &[Token<'_>], defines: &Defines) -> Result<bool, String> {
    evaluate_at_depth(tokens, defines, 0, 0).map(|value| value != 0)
}

fn evaluate_at_depth(
    tokens: &[Token<'_>],
    defines: &Defines,
    depth: usize,
    nesting: usize,
) -> Result<i64, String> {
    let tokens: Vec<Token<'_>> = tokens
        .iter()
        .copied()
        .filter(|t| !t.kind.is_trivia())
        .collect();
    if tokens.is_empty() {
        return Err("expected an expression".to_string());
    }
    let mut eval = Evaluator {
        tokens: &tokens,
        pos: 0,
        defines,
        depth,
        nesting,
    };
    let value = eval.conditional()?;
    match eval.tokens.get(eval.pos) {
        Some(extra) => Err(format!("unexpected '{}' in expression", extra.text)),
        None => Ok(value),
    }
}

/// Parse an integer literal with optional `0x`/octal prefix and `u`/`l` suffixes.
pub fn parse_int_literal(text: &str) -> Option<i64> {
    let digits = text.trim_end_matches(['u', 'U', 'l', 'L']);
    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16).ok().map(|v| v as i64);
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return u64::from_str_radix(&digits[1..], 8).ok().map(|v| v as i64);
    }
    digits.parse::<u64>().ok().map(|v| v as i64)
}

struct Evaluator<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    defines: &'t Defines,
    depth: usize,
    /// Parentheses, `?:` and unary operators open, counted across expansions.
    nesting: usize,
}

impl Evaluator<'_, '_> {
    fn peek(&self) -> Option<SyntaxKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn nested(&mut self, eval: impl FnOnce(&mut Self) -> Result<i64, String>) -> Result<i64, String> {
        if self.nesting >= MAX_NESTING_DEPTH {
            return Err("expression nests too deeply".to_string());
        }
        self.nesting += 1;
        let value = eval(self);
        self.nesting -= 1;
        value
    }

    fn conditional(&mut self) -> Result<i64, String> {
        self.nested(Self::conditional_rest)
    }

    fn conditional_rest(&mut self) -> Result<i64, String> {
        let cond = self.binary(0)?;
        if !self.eat(SyntaxKind::QUESTION) {
            return Ok(cond);
        }
        let then_value = self.conditional()?;
        if !self.eat(SyntaxKind::COLON) {
            return Err("expected ':' in conditional expression".to_string());
        }
        let else_value = self.conditional()?;
        Ok(if cond != 0 { then_value } else { else_value })
    }

    fn binary(&mut self, min_prec: u8) -> Result<i64, String> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek() {
            let Some(prec) = binary_precedence(op) else {
                break;
            };
            if prec < min_prec {
                break;
            }
            self.pos += 1;
            let rhs = self.binary(prec + 1)?;
            lhs = apply_binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<i64, String> {
        self.nested(Self::unary_rest)
    }

    fn unary_rest(&mut self) -> Result<i64, String> {
        match self.peek() {
            Some(SyntaxKind::BANG) => {
                self.pos += 1;
                Ok((self.unary()? == 0) as i64)
            }
            Some(SyntaxKind::MINUS) => {
                self.pos += 1;
                Ok(self.unary()?.wrapping_neg())
            }
            Some(SyntaxKind::PLUS) => {
                self.pos += 1;
                self.unary()
            }
            Some(SyntaxKind::TILDE) => {
                self.pos += 1;
                Ok(!self.unary()?)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<i64, String> {
        let Some(token) = self.tokens.get(self.pos).copied() else {
            return Err("unexpected end of expression".to_string());
        };
        self.pos += 1;
        match token.kind {
            SyntaxKind::INT_LITERAL => parse_int_literal(token.text)
                .ok_or_else(|| format!("invalid integer literal '{}'", token.text)),
            SyntaxKind::FLOAT_LITERAL => {
                Err("floating-point literal in preprocessor expression".to_string())
            }
            SyntaxKind::L_PAREN => {
                let value = self.conditional()?;
                if !self.eat(SyntaxKind::R_PAREN) {
                    return Err("expected ')'".to_string());
                }
                Ok(value)
            }
            SyntaxKind::PP_DEFINED => self.defined(),
            SyntaxKind::IDENT if token.text == "defined" => self.defined(),
            kind if kind == SyntaxKind::IDENT || kind.is_keyword() => self.expand(token.text),
            _ => Err(format!("unexpected '{}' in expression", token.text)),
        }
    }

    /// `defined X` or `defined(X)`
    fn defined(&mut self) -> Result<i64, String> {
        let parenthesized = self.eat(SyntaxKind::L_PAREN);
        let name = match self.tokens.get(self.pos) {
            Some(t) if t.kind == SyntaxKind::IDENT || t.kind.is_keyword() => t.text,
            _ => return Err("expected a macro name after 'defined'".to_string()),
        };
        self.pos += 1;
        if parenthesized && !self.eat(SyntaxKind::R_PAREN) {
            return Err("expected ')' after macro name".to_string());
        }
        Ok(self.defines.contains_key(name) as i64)
    }

    fn expand(&mut self, name: &str) -> Result<i64, String> {
        let Some(value) = self.defines.get(name) else {
            return Ok(0);
        };
        if self.depth >= MAX_EXPANSION_DEPTH {
            return Err(format!("macro '{}' expands recursively", name));
        }
        let tokens = tokenize(value);
        if tokens.iter().all(|t| t.kind.is_trivia()) {
            return Ok(0);
        }
        evaluate_at_depth(&tokens, self.defines, self.depth + 1, self.nesting)
    }
}

fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    Some(match kind {
        SyntaxKind::PIPE_PIPE => 1,
        SyntaxKind::AMP_AMP => 2,
        SyntaxKind::PIPE => 3,
        SyntaxKind::CARET => 4,
        SyntaxKind::AMP => 5,
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ => 6,
        SyntaxKind::LT | SyntaxKind::GT | SyntaxKind::LT_EQ | SyntaxKind::GT_EQ => 7,
        SyntaxKind::LT_LT | SyntaxKind::GT_GT => 8,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 9,
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 10,
        _ => return None,
    })
}

fn apply_binary(op: SyntaxKind, lhs: i64, rhs: i64) -> Result<i64, String> {
    Ok(match op {
        SyntaxKind::PIPE_PIPE => (lhs != 0 || rhs != 0) as i64,
        SyntaxKind::AMP_AMP => (lhs != 0 && rhs != 0) as i64,
        SyntaxKind::PIPE => lhs | rhs,
        SyntaxKind::CARET => lhs ^ rhs,
        SyntaxKind::AMP => lhs & rhs,
        SyntaxKind::EQ_EQ => (lhs == rhs) as i64,
        SyntaxKind::BANG_EQ => (lhs != rhs) as i64,
        SyntaxKind::LT => (lhs < rhs) as i64,
        SyntaxKind::GT => (lhs > rhs) as i64,
        SyntaxKind::LT_EQ => (lhs <= rhs) as i64,
        SyntaxKind::GT_EQ => (lhs >= rhs) as i64,
        SyntaxKind::LT_LT => lhs.wrapping_shl(rhs as u32),
        SyntaxKind::GT_GT => lhs.wrapping_shr(rhs as u32),
        SyntaxKind::PLUS => lhs.wrapping_add(rhs),
        SyntaxKind::MINUS => lhs.wrapping_sub(rhs),
        SyntaxKind::STAR => lhs.wrapping_mul(rhs),
        SyntaxKind::SLASH | SyntaxKind::PERCENT if rhs == 0 => {
            return Err("division by zero in preprocessor expression".to_string());
        }
        SyntaxKind::SLASH => lhs.wrapping_div(rhs),
        SyntaxKind::PERCENT => lhs.wrapping_rem(rhs),
        _ => return Err("unsupported operator".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn eval(text: &str, defines: &[(&str, &str)]) -> Result<bool, String> {
        let defines: Defines = defines
            .iter()
            .map(|(k, v)| ((*k).into(), (*v).to_string()))
            .collect();
        evaluate(&tokenize(text), &defines)
    }

    #[rstest]
    #[case("1", true)]
    #[case("0", false)]
    #[case("1 + 2 * 3 == 7", true)]
    #[case("(1 + 2) * 3 == 7", false)]
    #[case("!0 && ~0", true)]
    #[case("-1 < 0", true)]
    #[case("0x10 == 16 && 010 == 8", true)]
    #[case("1 ? 0 : 1", false)]
    #[case("UNKNOWN", false)]
    fn test_literal_expressions(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(eval(text, &[]), Ok(expected));
    }

    #[test]
    fn test_defined_forms() {
        let defines = [("FOO", ""), ("LEVEL", "2")];
        assert_eq!(eval("defined FOO", &defines), Ok(true));
        assert_eq!(eval("defined(BAR)", &defines), Ok(false));
        assert_eq!(eval("LEVEL >= 2 && defined(FOO)", &defines), Ok(true));
    }

    #[test]
    fn test_nested_expansion() {
        let defines = [("A", "B + 1"), ("B", "3")];
        assert_eq!(eval("A == 4", &defines), Ok(true));
    }

    #[test]
    fn test_errors() {
        assert!(eval("", &[]).is_err());
        assert!(eval("1 / 0", &[]).is_err());
        assert!(eval("(1", &[]).is_err());
        assert!(eval("SELF", &[("SELF", "SELF")]).is_err());
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let shallow = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(eval(&shallow, &[]), Ok(true));

        let deep = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
        assert!(eval(&deep, &[]).is_err());
        assert!(eval(&"!".repeat(20_000), &[]).is_err());
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case("42u", Some(42))]
    #[case("0xFFL", Some(255))]
    #[case("017", Some(15))]
    #[case("0", Some(0))]
    #[case("abc", None)]
    fn test_parse_int_literal(#[case] text: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_int_literal(text), expected);
    }
}
