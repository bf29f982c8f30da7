//! Parsing statistics for report ingestion
//!
//! This module provides the counters and diagnostics attached to every
//! ingestion result so callers can surface data-quality warnings.

use super::diagnostics::{Diagnostic, DiagnosticKind};
use serde::{Deserialize, Serialize};

/// Simple parsing statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    /// Non-blank rows read from the input
    pub total_rows: usize,

    /// Rows mapped into records or leaderboard entries
    pub rows_parsed: usize,

    /// Rows discarded by the row tests
    pub rows_skipped: usize,

    /// Cells that fell back to their field default
    pub cells_defaulted: usize,

    /// Everything noteworthy that happened, in order
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_rows: 0,
            rows_parsed: 0,
            rows_skipped: 0,
            cells_defaulted: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Whether any diagnostic of the given kind was recorded
    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }

    /// Diagnostics concerning the batch as a whole
    pub fn batch_warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind.is_batch_level())
    }

    /// Whether the input was rejected outright
    pub fn is_rejected(&self) -> bool {
        self.has(DiagnosticKind::RejectedInput) || self.has(DiagnosticKind::InsufficientRows)
    }

    /// Share of candidate rows that were parsed, as a percentage
    pub fn success_rate(&self) -> f64 {
        let candidates = self.rows_parsed + self.rows_skipped;
        if candidates == 0 {
            0.0
        } else {
            (self.rows_parsed as f64 / candidates as f64) * 100.0
        }
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
