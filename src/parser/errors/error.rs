//! Syntax diagnostics produced by the lexer, preprocessor and parser.

use rowan::{TextRange, TextSize};

use super::codes::ErrorCode;
use super::context::ParseContext;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Hint,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Hint => "hint",
        }
    }
}

/// A secondary location attached to a diagnostic, e.g. the `{` that was
/// never closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub message: String,
    pub range: TextRange,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// A syntax error with code, severity, optional hint and related spans.
///
/// Ranges are absolute offsets in the file that was lexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
    pub code: ErrorCode,
    pub severity: Severity,
    pub hint: Option<String>,
    pub related: Vec<RelatedInfo>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
            severity: Severity::Error,
            hint: None,
            related: vec![],
        }
    }

    /// Zero-width error at `offset`.
    pub fn at_offset(message: impl Into<String>, offset: TextSize, code: ErrorCode) -> Self {
        Self::new(message, TextRange::empty(offset), code)
    }

    /// Error carrying the code's default message.
    pub fn from_code(code: ErrorCode, range: TextRange) -> Self {
        Self::new(code.default_message(), range, code)
    }

    /// "unexpected X in Y, expected Z" for the given parse context.
    pub fn unexpected_in(found: &str, context: ParseContext, range: TextRange) -> Self {
        let message = format!(
            "unexpected {} {}, expected {}",
            found,
            context.description(),
            context.expected_description()
        );
        Self::new(message, range, ErrorCode::E0901)
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// `E0201: missing semicolon`, with the hint on a second line.
    pub fn format(&self) -> String {
        let mut result = format!("{}: {}", self.code, self.message);
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn test_new_defaults_to_error() {
        let err = SyntaxError::new("expected ';'", range(10, 11), ErrorCode::E0201);
        assert_eq!(err.severity, Severity::Error);
        assert!(err.hint.is_none());
        assert!(err.related.is_empty());
    }

    #[test]
    fn test_from_code_uses_default_message() {
        let err = SyntaxError::from_code(ErrorCode::E0202, range(0, 1));
        assert_eq!(err.message, "unclosed brace");
    }

    #[test]
    fn test_related_and_hint() {
        let err = SyntaxError::at_offset("unclosed brace", TextSize::new(50), ErrorCode::E0202)
            .with_hint("add '}'")
            .with_related(RelatedInfo::new("opened here", range(10, 11)));
        assert_eq!(err.related[0].message, "opened here");
        let formatted = err.format();
        assert!(formatted.starts_with("E0202: unclosed brace"));
        assert!(formatted.contains("hint: add '}'"));
    }

    #[test]
    fn test_unexpected_in_context() {
        let err = SyntaxError::unexpected_in("'return'", ParseContext::StructBody, range(3, 9));
        assert!(err.message.contains("in struct body"));
        assert!(err.message.contains("expected a field declaration"));
        assert_eq!(err.code, ErrorCode::E0901);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error < Severity::Warning);
        assert_eq!(Severity::Hint.as_str(), "hint");
        assert!(!Severity::Warning.is_error());
    }
}
