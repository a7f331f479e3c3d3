//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (braces, semicolons)
//! - E03xx: Declaration errors (types, names, declarators)
//! - E04xx: Expression errors
//! - E05xx: Preprocessor directive errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated block comment
    E0103,
    /// Malformed numeric literal
    E0104,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Missing semicolon
    E0201,
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[`
    E0204,
    /// Unexpected closing delimiter
    E0205,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Missing identifier/name
    E0301,
    /// Missing type
    E0302,
    /// Invalid variable declarator
    E0303,
    /// Unexpected token in a struct or constant buffer body
    E0304,
    /// Invalid template argument list
    E0305,
    /// Missing function body (neither `;` nor `{`)
    E0306,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Invalid expression
    E0401,
    /// Missing operand in expression
    E0402,
    /// Unclosed function/method call
    E0404,
    /// Missing expression where expected
    E0406,

    // =========================================================================
    // E05xx: Preprocessor errors
    // =========================================================================
    /// Unknown preprocessor directive
    E0501,
    /// Missing macro name
    E0502,
    /// Invalid `#if` expression
    E0503,
    /// Unbalanced conditional directive
    E0504,
    /// Malformed `#include`
    E0505,
    /// `#` outside of a directive
    E0506,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,
    /// Nesting deeper than the parser descends
    E0903,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0306 => "E0306",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0404 => "E0404",
            Self::E0406 => "E0406",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::E0504 => "E0504",
            Self::E0505 => "E0505",
            Self::E0506 => "E0506",
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
            Self::E0903 => "E0903",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 => "structural error",
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305 | Self::E0306 => {
                "declaration error"
            }
            Self::E0401 | Self::E0402 | Self::E0404 | Self::E0406 => "expression error",
            Self::E0501 | Self::E0502 | Self::E0503 | Self::E0504 | Self::E0505 | Self::E0506 => {
                "preprocessor error"
            }
            Self::E0901 | Self::E0902 | Self::E0903 | Self::E0999 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated block comment",
            Self::E0104 => "malformed numeric literal",
            Self::E0201 => "missing semicolon",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "unexpected closing delimiter",
            Self::E0301 => "missing identifier",
            Self::E0302 => "missing type",
            Self::E0303 => "invalid declarator",
            Self::E0304 => "unexpected token in declaration body",
            Self::E0305 => "invalid template arguments",
            Self::E0306 => "missing function body",
            Self::E0401 => "invalid expression",
            Self::E0402 => "missing operand",
            Self::E0404 => "unclosed function call",
            Self::E0406 => "expected expression",
            Self::E0501 => "unknown preprocessor directive",
            Self::E0502 => "missing macro name",
            Self::E0503 => "invalid preprocessor expression",
            Self::E0504 => "unbalanced conditional directive",
            Self::E0505 => "malformed include",
            Self::E0506 => "'#' outside of a directive",
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
            Self::E0903 => "nesting too deep",
            Self::E0999 => "internal parser error",
        }
    }

    /// Check if this is a structural error (delimiter-related)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205
        )
    }

    pub fn is_preprocessor(&self) -> bool {
        matches!(
            self,
            Self::E0501 | Self::E0502 | Self::E0503 | Self::E0504 | Self::E0505 | Self::E0506
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::E0201), "E0201");
        assert_eq!(ErrorCode::E0506.as_str(), "E0506");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0104.category_description(), "lexical error");
        assert_eq!(ErrorCode::E0201.category_description(), "structural error");
        assert_eq!(ErrorCode::E0503.category_description(), "preprocessor error");
    }

    #[test]
    fn test_predicates() {
        assert!(ErrorCode::E0202.is_structural());
        assert!(!ErrorCode::E0301.is_structural());
        assert!(ErrorCode::E0504.is_preprocessor());
    }
}
