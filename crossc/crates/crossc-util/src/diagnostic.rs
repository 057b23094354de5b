//! Diagnostic module - Error and warning reporting infrastructure.
//!
//! Parse and conversion errors never unwind the call stack: panic-mode
//! recovery requires the caller to resume, so every phase appends to a
//! [`Handler`] owned by the request and carries on. The driver reads the
//! accumulated list once at the end and folds it into the result record.
//!
//! # Examples
//!
//! ```
//! use crossc_util::{DiagnosticKind, Handler, Severity};
//!
//! let handler = Handler::new();
//! handler.error(DiagnosticKind::RdpParsing, "expected ';'", 3, 14);
//!
//! assert!(handler.has_errors());
//! assert_eq!(handler.error_count(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;

use serde::Serialize;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A defect in the input that makes the result unreliable.
    Error,
    /// Something was converted but with a semantic caveat.
    Warning,
    /// Informational note, e.g. a dropped using-directive.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Which phase of the pipeline produced a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The recursive-descent parser rejected a token.
    RdpParsing,
    /// A lexically malformed construct (e.g. an unknown byte).
    Syntax,
    /// The construct parsed but violates a language rule.
    Semantic,
    /// The conversion pipeline failed as a whole.
    ConversionError,
    /// The AST mapper met a node it cannot express in the target language.
    AstConversionError,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::RdpParsing => write!(f, "rdp_parsing"),
            DiagnosticKind::Syntax => write!(f, "syntax"),
            DiagnosticKind::Semantic => write!(f, "semantic"),
            DiagnosticKind::ConversionError => write!(f, "conversion_error"),
            DiagnosticKind::AstConversionError => write!(f, "ast_conversion_error"),
        }
    }
}

/// A single diagnostic message with its source location.
///
/// # Examples
///
/// ```
/// use crossc_util::{Diagnostic, DiagnosticKind, Severity};
///
/// let diag = Diagnostic::error(DiagnosticKind::Syntax, "unexpected character '@'", 1, 5);
/// assert_eq!(diag.severity, Severity::Error);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Phase classification.
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
    /// Source line (1-based).
    pub line: u32,
    /// Source column (1-based).
    pub column: u32,
    /// Severity level.
    pub severity: Severity,
}

impl Diagnostic {
    /// Create a diagnostic with an explicit severity.
    pub fn new(
        kind: DiagnosticKind,
        severity: Severity,
        message: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column,
            severity,
        }
    }

    /// Create an error-severity diagnostic.
    pub fn error(kind: DiagnosticKind, message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(kind, Severity::Error, message, line, column)
    }

    /// Create a warning-severity diagnostic.
    pub fn warning(
        kind: DiagnosticKind,
        message: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        Self::new(kind, Severity::Warning, message, line, column)
    }

    /// Create an info-severity diagnostic.
    pub fn info(kind: DiagnosticKind, message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(kind, Severity::Info, message, line, column)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}:{}] ({})",
            self.severity, self.message, self.line, self.column, self.kind
        )
    }
}

/// Collector for the diagnostics of one request.
///
/// The handler is shared by reference between the parser, the mapper and the
/// driver, so it uses interior mutability rather than `&mut` threading.
/// One handler belongs to exactly one request; it is never shared across
/// threads.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new empty handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error.
    pub fn error(&self, kind: DiagnosticKind, message: impl Into<String>, line: u32, column: u32) {
        self.emit(Diagnostic::error(kind, message, line, column));
    }

    /// Record a warning.
    pub fn warning(
        &self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        line: u32,
        column: u32,
    ) {
        self.emit(Diagnostic::warning(kind, message, line, column));
    }

    /// Record an informational note.
    pub fn info(&self, kind: DiagnosticKind, message: impl Into<String>, line: u32, column: u32) {
        self.emit(Diagnostic::info(kind, message, line, column));
    }

    /// Append a fully-built diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Whether any error-severity diagnostic has been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Clone out every recorded diagnostic, in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Error-severity diagnostics only.
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.filtered(Severity::Error)
    }

    /// Warning-severity diagnostics only.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.filtered(Severity::Warning)
    }

    /// Info-severity diagnostics only.
    pub fn notes(&self) -> Vec<Diagnostic> {
        self.filtered(Severity::Info)
    }

    fn filtered(&self, severity: Severity) -> Vec<Diagnostic> {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.severity == severity)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DiagnosticKind::RdpParsing.to_string(), "rdp_parsing");
        assert_eq!(
            DiagnosticKind::AstConversionError.to_string(),
            "ast_conversion_error"
        );
    }

    #[test]
    fn test_handler_counts() {
        let handler = Handler::new();
        handler.error(DiagnosticKind::RdpParsing, "expected ';'", 1, 1);
        handler.warning(DiagnosticKind::ConversionError, "lossy operator", 2, 3);
        handler.info(DiagnosticKind::ConversionError, "using dropped", 1, 1);

        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.warning_count(), 1);
        assert_eq!(handler.diagnostics().len(), 3);
        assert_eq!(handler.errors().len(), 1);
        assert_eq!(handler.warnings().len(), 1);
        assert_eq!(handler.notes().len(), 1);
    }

    #[test]
    fn test_diagnostic_serializes_type_field() {
        let diag = Diagnostic::error(DiagnosticKind::Syntax, "bad byte", 4, 2);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["type"], "syntax");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["line"], 4);
    }
}
