//! Metrics sink - per-request parse and conversion instrumentation.
//!
//! The sink is created fresh for every request, written by the parser while
//! it runs, and read exactly once by the driver when the result record is
//! assembled. The accuracy scores are research instruments, not correctness
//! signals; they are computed by the fixed formulas below and reported
//! as-is.

use serde::Serialize;

/// Accumulator for the counters and timings of a single parse/convert run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// Wall-clock time spent inside the parser, in milliseconds.
    pub parsing_time_ms: f64,

    /// Wall-clock time spent mapping and emitting, in milliseconds.
    pub conversion_time_ms: f64,

    /// Number of AST nodes constructed by the parser.
    pub ast_nodes: usize,

    /// Number of non-EOF tokens in the stream handed to the parser.
    pub tokens_processed: usize,

    /// Estimated working-set size in kilobytes.
    pub memory_usage_kb: f64,

    /// Number of panic-mode synchronizations performed.
    pub error_recovery_count: usize,

    /// Share of tokens not implicated in an error, 0-100.
    pub syntax_accuracy: f64,

    /// Heuristic preservation score, 0-100.
    pub semantic_preservation: f64,
}

impl Metrics {
    /// Create a zeroed sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one constructed AST node.
    #[inline]
    pub fn record_node(&mut self) {
        self.ast_nodes += 1;
    }

    /// Count one panic-mode recovery.
    #[inline]
    pub fn record_recovery(&mut self) {
        self.error_recovery_count += 1;
    }

    /// Compute the derived accuracy scores from the diagnostic tallies.
    ///
    /// `syntax_accuracy = max(0, (tokens - errors) / tokens * 100)` with an
    /// empty stream scoring 100. `semantic_preservation = max(0, 100 -
    /// 10*errors - 5*warnings)`.
    pub fn finish_scores(&mut self, errors: usize, warnings: usize) {
        self.syntax_accuracy = if self.tokens_processed == 0 {
            100.0
        } else {
            let tokens = self.tokens_processed as f64;
            ((tokens - errors as f64) / tokens * 100.0).max(0.0)
        };
        self.semantic_preservation =
            (100.0 - 10.0 * errors as f64 - 5.0 * warnings as f64).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut metrics = Metrics::new();
        metrics.record_node();
        metrics.record_node();
        metrics.record_recovery();
        assert_eq!(metrics.ast_nodes, 2);
        assert_eq!(metrics.error_recovery_count, 1);
    }

    #[test]
    fn test_scores_clean_parse() {
        let mut metrics = Metrics::new();
        metrics.tokens_processed = 10;
        metrics.finish_scores(0, 0);
        assert_eq!(metrics.syntax_accuracy, 100.0);
        assert_eq!(metrics.semantic_preservation, 100.0);
    }

    #[test]
    fn test_scores_with_errors() {
        let mut metrics = Metrics::new();
        metrics.tokens_processed = 10;
        metrics.finish_scores(2, 1);
        assert_eq!(metrics.syntax_accuracy, 80.0);
        assert_eq!(metrics.semantic_preservation, 75.0);
    }

    #[test]
    fn test_scores_floor_at_zero() {
        let mut metrics = Metrics::new();
        metrics.tokens_processed = 3;
        metrics.finish_scores(20, 20);
        assert_eq!(metrics.syntax_accuracy, 0.0);
        assert_eq!(metrics.semantic_preservation, 0.0);
    }

    #[test]
    fn test_scores_empty_stream() {
        let mut metrics = Metrics::new();
        metrics.finish_scores(0, 0);
        assert_eq!(metrics.syntax_accuracy, 100.0);
    }
}
