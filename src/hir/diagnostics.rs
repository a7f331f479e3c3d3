//! Semantic diagnostics: codes, collection and conversion from syntax errors.
//!
//! Syntax errors from the parser are converted into [`Diagnostic`]s so a
//! [`SemanticModel`](super::SemanticModel) can report both kinds in one list.

use std::fmt;

use crate::base::{FileId, TextRange};
use crate::parser::{Severity as SyntaxSeverity, SyntaxError};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl From<SyntaxSeverity> for Severity {
    fn from(severity: SyntaxSeverity) -> Self {
        match severity {
            SyntaxSeverity::Error => Severity::Error,
            SyntaxSeverity::Warning => Severity::Warning,
            SyntaxSeverity::Hint => Severity::Hint,
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: FileId,
    pub range: TextRange,
    pub severity: Severity,
    /// Error/warning code, e.g. `E0001` or `E0201`.
    pub code: String,
    pub message: String,
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
///
/// Intrinsic candidates have no location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedInfo {
    pub location: Option<(FileId, TextRange)>,
    pub message: String,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, location: Option<(FileId, TextRange)>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }
}

impl Diagnostic {
    pub fn error(file: FileId, range: TextRange, code: &str, message: impl Into<String>) -> Self {
        Self {
            file,
            range,
            severity: Severity::Error,
            code: code.to_string(),
            message: message.into(),
            related: Vec::new(),
        }
    }

    pub fn warning(file: FileId, range: TextRange, code: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(file, range, code, message)
        }
    }

    /// A parser diagnostic of `file`. Hints are folded into the message.
    pub fn from_syntax(file: FileId, error: &SyntaxError) -> Self {
        let message = match &error.hint {
            Some(hint) => format!("{} ({})", error.message, hint),
            None => error.message.clone(),
        };
        Self {
            file,
            range: error.range,
            severity: error.severity.into(),
            code: error.code.to_string(),
            message,
            related: error
                .related
                .iter()
                .map(|r| RelatedInfo::new(r.message.clone(), Some((file, r.range))))
                .collect(),
        }
    }

    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<(FileId, &SyntaxError)> for Diagnostic {
    fn from((file, error): (FileId, &SyntaxError)) -> Self {
        Self::from_syntax(file, error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes for semantic errors.
///
/// ## Error Code Ranges
///
/// - **E0001-E0099**: Semantic analysis errors (name resolution, typing)
/// - **W0001-W0099**: Warnings
/// - **E0101-E0999**: Syntax errors, see [`ErrorCode`](crate::parser::ErrorCode)
pub mod codes {
    /// Undefined reference (name not found).
    pub const UNDEFINED_REFERENCE: &str = "E0001";
    /// Ambiguous reference (multiple candidates of different kinds).
    pub const AMBIGUOUS_REFERENCE: &str = "E0002";
    /// Type mismatch.
    pub const TYPE_MISMATCH: &str = "E0003";
    /// Duplicate definition.
    pub const DUPLICATE_DEFINITION: &str = "E0004";
    /// Invalid type.
    pub const INVALID_TYPE: &str = "E0008";
    /// Include not found.
    pub const UNRESOLVED_INCLUDE: &str = "E0014";
    /// No overload accepts the arguments.
    pub const NO_MATCHING_OVERLOAD: &str = "E0015";
    /// Constructor argument components don't add up.
    pub const COMPONENT_COUNT: &str = "E0016";
    /// Member or swizzle doesn't exist.
    pub const INVALID_MEMBER: &str = "E0017";
    /// Indexing a value that can't be indexed.
    pub const NOT_INDEXABLE: &str = "E0018";
    /// Assigning to something that isn't an l-value.
    pub const NOT_ASSIGNABLE: &str = "E0019";
    /// `break`/`continue` outside a loop.
    pub const MISPLACED_JUMP: &str = "E0020";
    /// `return` doesn't match the function's return type.
    pub const RETURN_MISMATCH: &str = "E0021";
    /// Calling something that isn't a function.
    pub const NOT_INVOCABLE: &str = "E0022";
    /// Operator applied to operands it doesn't support.
    pub const INVALID_OPERAND: &str = "E0023";
    /// Condition isn't a scalar.
    pub const INVALID_CONDITION: &str = "E0024";

    /// Implicit truncation of a vector or matrix.
    pub const IMPLICIT_TRUNCATION: &str = "W0004";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during binding.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, file: FileId, range: TextRange, code: &str, message: impl Into<String>) {
        self.add(Diagnostic::error(file, range, code, message));
    }

    pub fn warning(&mut self, file: FileId, range: TextRange, code: &str, message: impl Into<String>) {
        self.add(Diagnostic::warning(file, range, code, message));
    }

    pub fn undefined_reference(&mut self, file: FileId, range: TextRange, name: &str) {
        self.error(
            file,
            range,
            codes::UNDEFINED_REFERENCE,
            format!("undefined reference: '{}'", name),
        );
    }

    /// Ambiguous reference, with one related entry per candidate.
    pub fn ambiguous_reference(
        &mut self,
        file: FileId,
        range: TextRange,
        name: &str,
        candidates: Vec<RelatedInfo>,
    ) {
        let mut diag = Diagnostic::error(
            file,
            range,
            codes::AMBIGUOUS_REFERENCE,
            format!("ambiguous reference: '{}' has {} candidates", name, candidates.len()),
        );
        diag.related = candidates;
        self.add(diag);
    }

    pub fn duplicate_definition(
        &mut self,
        file: FileId,
        range: TextRange,
        name: &str,
        previous: Option<(FileId, TextRange)>,
    ) {
        self.add(
            Diagnostic::error(
                file,
                range,
                codes::DUPLICATE_DEFINITION,
                format!("duplicate definition: '{}' is already defined", name),
            )
            .with_related(RelatedInfo::new(format!("previous definition of '{}'", name), previous)),
        );
    }

    pub fn type_mismatch(&mut self, file: FileId, range: TextRange, expected: &str, found: &str) {
        self.error(
            file,
            range,
            codes::TYPE_MISMATCH,
            format!("type mismatch: expected '{}', found '{}'", expected, found),
        );
    }

    pub fn implicit_truncation(&mut self, file: FileId, range: TextRange, from: &str, to: &str) {
        self.warning(
            file,
            range,
            codes::IMPLICIT_TRUNCATION,
            format!("implicit truncation of '{}' to '{}'", from, to),
        );
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
