//! Conversion and parse result records.
//!
//! These are the carriers the request boundary sees: the converted text,
//! the diagnostic lists and the research metrics, flattened into one record
//! that serializes directly (the `type` field name of diagnostics is
//! preserved through serde).

use crossc_util::{Diagnostic, Handler, Metrics, Severity};
use serde::Serialize;

/// Result record of one conversion request.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionResult {
    /// True iff no error-severity diagnostic was recorded.
    pub success: bool,
    /// The emitted target-language text; may be empty or partial on error.
    pub converted_code: String,
    /// Error-severity diagnostics.
    pub errors: Vec<Diagnostic>,
    /// Warning- and info-severity diagnostics, in emission order.
    pub warnings: Vec<Diagnostic>,
    /// Wall-clock time of the recursive-descent parse, in milliseconds.
    pub rdp_parsing_time_ms: f64,
    /// Wall-clock time of mapping plus emission, in milliseconds.
    pub conversion_time_ms: f64,
    /// AST nodes constructed by the parser.
    pub ast_nodes: usize,
    /// Non-EOF tokens handed to the parser.
    pub tokens_processed: usize,
    /// Estimated working-set size in kilobytes.
    pub memory_usage_kb: f64,
    /// Panic-mode synchronizations performed.
    pub error_recovery_count: usize,
    /// Share of tokens not implicated in an error, 0-100.
    pub syntax_accuracy: f64,
    /// Heuristic preservation score, 0-100.
    pub semantic_preservation: f64,
}

impl ConversionResult {
    /// Assemble the record from the emitted code and the request-owned
    /// handler and metrics sink.
    pub(crate) fn assemble(converted_code: String, handler: &Handler, metrics: Metrics) -> Self {
        let diagnostics = handler.diagnostics();
        let errors: Vec<Diagnostic> = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .cloned()
            .collect();
        let warnings: Vec<Diagnostic> = diagnostics
            .iter()
            .filter(|d| d.severity != Severity::Error)
            .cloned()
            .collect();

        Self {
            success: errors.is_empty(),
            converted_code,
            errors,
            warnings,
            rdp_parsing_time_ms: metrics.parsing_time_ms,
            conversion_time_ms: metrics.conversion_time_ms,
            ast_nodes: metrics.ast_nodes,
            tokens_processed: metrics.tokens_processed,
            memory_usage_kb: metrics.memory_usage_kb,
            error_recovery_count: metrics.error_recovery_count,
            syntax_accuracy: metrics.syntax_accuracy,
            semantic_preservation: metrics.semantic_preservation,
        }
    }
}

/// Result record of a parse-only (syntax check) request. No AST is exposed.
#[derive(Clone, Debug, Serialize)]
pub struct ParseResult {
    /// True iff no error-severity diagnostic was recorded.
    pub success: bool,
    /// Error-severity diagnostics.
    pub errors: Vec<Diagnostic>,
    /// Warning- and info-severity diagnostics.
    pub warnings: Vec<Diagnostic>,
    /// The metrics sink, read once.
    pub metrics: Metrics,
}

impl ParseResult {
    pub(crate) fn assemble(handler: &Handler, metrics: Metrics) -> Self {
        let diagnostics = handler.diagnostics();
        let errors: Vec<Diagnostic> = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .cloned()
            .collect();
        let warnings: Vec<Diagnostic> = diagnostics
            .iter()
            .filter(|d| d.severity != Severity::Error)
            .cloned()
            .collect();

        Self {
            success: errors.is_empty(),
            errors,
            warnings,
            metrics,
        }
    }
}
