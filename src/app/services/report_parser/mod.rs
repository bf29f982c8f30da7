//! Parser for spreadsheet sales performance exports
//!
//! This module turns the semicolon-delimited exports of a sales organization
//! into employee records, team KPI summaries and the company-wide leaderboard.
//! Parsing is a pure function of the input text: it performs no I/O, never
//! fails, and reports data-quality problems as diagnostics instead.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`reader`] - Tabular reader for `;`-delimited text, HTML page rejection
//! - [`segmenter`] - Header, employee row and footer detection
//! - [`layout`] - Versioned column tables for every known export revision
//! - [`normalizers`] - Currency, percentage, count and duration normalization
//! - [`record_mapper`] - Employee row to [`EmployeeRecord`](crate::EmployeeRecord)
//! - [`summary`] - Footer KPI extraction with arithmetic fallback
//! - [`ranking`] - Leaderboard row mapping
//! - [`diagnostics`] - Data-quality observations and pluggable sinks
//! - [`stats`] - Parsing statistics attached to every result
//! - [`parser`] - Orchestration and entry points
//!
//! ## Usage
//!
//! ```rust
//! use salesboard::{EmployeeLayout, ReportParser};
//!
//! let text = "Equipe;Azul\nNome;Pos. Ranking;Vendas\nAna Souza;1;R$ 1.000,00\n";
//! let batch = ReportParser::default().parse_team(text, "AZUL", EmployeeLayout::Legacy);
//!
//! assert_eq!(batch.records.len(), 1);
//! assert_eq!(batch.records[0].portability_sales, 1000.0);
//! ```

pub mod diagnostics;
pub mod layout;
pub mod normalizers;
pub mod parser;
pub mod ranking;
pub mod reader;
pub mod record_mapper;
pub mod segmenter;
pub mod stats;
pub mod summary;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, NullSink, TracingSink};
pub use layout::{EmployeeLayout, RankingLayout};
pub use normalizers::{normalize_duration, normalize_duration_value, normalize_number};
pub use parser::{
    ReportParser, parse_attendance_export, parse_extended_ranking, parse_legacy_export,
    parse_ranking,
};
pub use stats::ParseStats;
