//! Data-quality diagnostics for report ingestion
//!
//! Parsing never fails, but every place where a value was defaulted, a row was
//! skipped or a structural assumption did not hold produces a [`Diagnostic`].
//! Diagnostics are always collected into the batch's
//! [`ParseStats`](super::stats::ParseStats) and are additionally forwarded to an
//! optional caller-supplied [`DiagnosticSink`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Input looked like an HTML page or was otherwise not an export
    RejectedInput,
    /// Fewer non-blank rows than a team export can hold
    InsufficientRows,
    /// Header marker not found; the fixed fallback row was used
    HeaderMarkerMissing,
    /// The CSV tokenizer could not read a record
    MalformedRecord,
    /// Row before the footer failed the employee-row test
    RowSkipped,
    /// A cell could not be normalized and its default was used
    CellDefaulted,
    /// No footer marker; summary aggregated from records
    FooterMissing,
    /// Footer marker present but the value row is missing
    FooterPayloadMissing,
    /// Footer value row does not have the expected shape
    FooterMisaligned,
    /// Footer total is zero; summary aggregated from records
    DegenerateFooter,
    /// Footer total differs from the sum of employee sales
    FooterDisagreement,
}

impl DiagnosticKind {
    /// Whether this kind concerns the whole batch rather than one cell or row
    pub fn is_batch_level(&self) -> bool {
        !matches!(
            self,
            DiagnosticKind::CellDefaulted | DiagnosticKind::RowSkipped
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::RejectedInput => "rejected input",
            DiagnosticKind::InsufficientRows => "insufficient rows",
            DiagnosticKind::HeaderMarkerMissing => "header marker missing",
            DiagnosticKind::MalformedRecord => "malformed record",
            DiagnosticKind::RowSkipped => "row skipped",
            DiagnosticKind::CellDefaulted => "cell defaulted",
            DiagnosticKind::FooterMissing => "footer missing",
            DiagnosticKind::FooterPayloadMissing => "footer payload missing",
            DiagnosticKind::FooterMisaligned => "footer misaligned",
            DiagnosticKind::DegenerateFooter => "degenerate footer",
            DiagnosticKind::FooterDisagreement => "footer disagreement",
        };
        f.write_str(name)
    }
}

/// A single data-quality observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    /// Index into the non-blank row sequence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,

    /// Name of the field being extracted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            row: None,
            column: None,
            field: None,
            message: message.into(),
        }
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn at_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(row) = self.row {
            write!(f, " at row {}", row)?;
        }
        if let Some(column) = self.column {
            write!(f, ", column {}", column)?;
        }
        if let Some(field) = &self.field {
            write!(f, " ({})", field)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Receiver for diagnostics as they are produced
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: &Diagnostic) {}
}

/// Sink that forwards diagnostics to `tracing`
///
/// Batch-level diagnostics are logged at `warn`, cell and row level ones at
/// `debug`.
#[derive(Debug, Clone)]
pub struct TracingSink {
    context: String,
}

impl TracingSink {
    /// Create a sink that prefixes every event with `context` (usually the team)
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        if diagnostic.kind.is_batch_level() {
            warn!("[{}] {}", self.context, diagnostic);
        } else {
            debug!("[{}] {}", self.context, diagnostic);
        }
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

/// Collects diagnostics for one ingestion call and forwards them to a sink
pub(crate) struct DiagnosticLog<'s> {
    entries: Vec<Diagnostic>,
    sink: &'s mut dyn DiagnosticSink,
}

impl<'s> DiagnosticLog<'s> {
    pub(crate) fn new(sink: &'s mut dyn DiagnosticSink) -> Self {
        Self {
            entries: Vec::new(),
            sink,
        }
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        self.sink.report(&diagnostic);
        self.entries.push(diagnostic);
    }

    pub(crate) fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
