//! Report parser orchestration
//!
//! This module wires the reader, segmenter, record mapper and summary
//! extractor together into the ingestion entry points. Every entry point is
//! total: whatever the input, a batch or table comes back, with anything
//! noteworthy recorded as diagnostics in its [`ParseStats`].

use super::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticSink, NullSink};
use super::layout::{EmployeeLayout, RankingLayout};
use super::ranking::map_ranking_row;
use super::reader::{Table, read_table};
use super::record_mapper::map_employee_row;
use super::segmenter::{Footer, segment};
use super::stats::ParseStats;
use super::summary::summarize;
use crate::app::models::{RankingTable, TeamBatch};
use crate::config::ParserConfig;

/// Parser for team and leaderboard exports
///
/// Holds only configuration, so one instance can serve any number of
/// concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct ReportParser {
    config: ParserConfig,
}

impl ReportParser {
    /// Create a parser with the given settings
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a team export, recording diagnostics only in the batch stats
    pub fn parse_team(&self, text: &str, team: &str, layout: EmployeeLayout) -> TeamBatch {
        self.parse_team_with_sink(text, team, layout, &mut NullSink)
    }

    /// Parse a team export, also forwarding each diagnostic to `sink`
    pub fn parse_team_with_sink(
        &self,
        text: &str,
        team: &str,
        layout: EmployeeLayout,
        sink: &mut dyn DiagnosticSink,
    ) -> TeamBatch {
        let mut log = DiagnosticLog::new(sink);
        let mut stats = ParseStats::new();

        let Some(table) = read_or_reject(text, &mut log) else {
            stats.diagnostics = log.into_entries();
            return TeamBatch::empty(team, layout, stats);
        };
        stats.total_rows = table.len();

        if table.len() < self.config.min_rows {
            log.push(Diagnostic::new(
                DiagnosticKind::InsufficientRows,
                format!(
                    "export has {} non-blank rows, at least {} required",
                    table.len(),
                    self.config.min_rows
                ),
            ));
            stats.diagnostics = log.into_entries();
            return TeamBatch::empty(team, layout, stats);
        }

        let segments = segment(&table.rows, &self.config);

        if !segments.header_found {
            log.push(
                Diagnostic::new(
                    DiagnosticKind::HeaderMarkerMissing,
                    format!(
                        "header marker '{}' not found; assuming row {}",
                        self.config.header_marker, segments.header_row
                    ),
                )
                .at_row(segments.header_row),
            );
        }

        for &row in &segments.skipped_rows {
            log.push(
                Diagnostic::new(DiagnosticKind::RowSkipped, "not an employee row").at_row(row),
            );
        }

        let mut records = Vec::with_capacity(segments.employee_rows.len());
        for &(row_index, row) in &segments.employee_rows {
            let mapped = map_employee_row(row, team, layout, self.config.rank_sentinel);
            for default in &mapped.defaults {
                stats.cells_defaulted += 1;
                log.push(
                    Diagnostic::new(DiagnosticKind::CellDefaulted, default.reason.to_string())
                        .at_row(row_index)
                        .at_column(default.column)
                        .for_field(default.field.name()),
                );
            }
            records.push(mapped.record);
        }

        let footer = match segments.footer {
            Footer::Absent => {
                log.push(Diagnostic::new(
                    DiagnosticKind::FooterMissing,
                    format!(
                        "no '{}' marker; summary aggregated from records",
                        self.config.footer_marker
                    ),
                ));
                None
            }
            Footer::PayloadMissing { marker_row } => {
                log.push(
                    Diagnostic::new(
                        DiagnosticKind::FooterPayloadMissing,
                        "table ends before the footer value row; summary aggregated from records",
                    )
                    .at_row(marker_row),
                );
                None
            }
            Footer::Present {
                payload_row,
                values,
                ..
            } => Some((payload_row, values.as_slice())),
        };

        let outcome = summarize(
            footer,
            &records,
            layout.summary_layout(),
            self.config.footer_tolerance,
        );
        for diagnostic in outcome.diagnostics {
            log.push(diagnostic);
        }

        stats.rows_parsed = records.len();
        stats.rows_skipped = segments.skipped_rows.len();
        stats.diagnostics = log.into_entries();

        TeamBatch {
            team: team.to_string(),
            layout,
            records,
            summary: outcome.summary,
            summary_source: outcome.source,
            stats,
        }
    }

    /// Parse a leaderboard export, recording diagnostics only in the stats
    pub fn parse_ranking(&self, text: &str, layout: RankingLayout) -> RankingTable {
        self.parse_ranking_with_sink(text, layout, &mut NullSink)
    }

    /// Parse a leaderboard export, also forwarding each diagnostic to `sink`
    pub fn parse_ranking_with_sink(
        &self,
        text: &str,
        layout: RankingLayout,
        sink: &mut dyn DiagnosticSink,
    ) -> RankingTable {
        let mut log = DiagnosticLog::new(sink);
        let mut stats = ParseStats::new();
        let mut entries = Vec::new();

        if let Some(table) = read_or_reject(text, &mut log) {
            stats.total_rows = table.len();

            if table.len() < 2 {
                log.push(Diagnostic::new(
                    DiagnosticKind::InsufficientRows,
                    "leaderboard export has no rows below its header",
                ));
            }

            // Exactly one header row
            for (row_index, row) in table.rows.iter().enumerate().skip(1) {
                let Some(mapped) = map_ranking_row(row, layout) else {
                    stats.rows_skipped += 1;
                    log.push(
                        Diagnostic::new(DiagnosticKind::RowSkipped, "leaderboard row has no name")
                            .at_row(row_index),
                    );
                    continue;
                };

                for default in &mapped.defaults {
                    stats.cells_defaulted += 1;
                    log.push(
                        Diagnostic::new(DiagnosticKind::CellDefaulted, default.reason.to_string())
                            .at_row(row_index)
                            .at_column(default.column)
                            .for_field(default.field.name()),
                    );
                }
                entries.push(mapped.entry);
            }
        }

        stats.rows_parsed = entries.len();
        stats.diagnostics = log.into_entries();

        RankingTable {
            layout,
            entries,
            stats,
        }
    }
}

/// Read the table, turning rejection and tokenizer problems into diagnostics
fn read_or_reject(text: &str, log: &mut DiagnosticLog<'_>) -> Option<Table> {
    match read_table(text) {
        Ok(table) => {
            for (line, message) in &table.malformed {
                log.push(Diagnostic::new(
                    DiagnosticKind::MalformedRecord,
                    format!("line {}: {}", line, message),
                ));
            }
            Some(table)
        }
        Err(e) => {
            log.push(Diagnostic::new(DiagnosticKind::RejectedInput, e.to_string()));
            None
        }
    }
}

// =============================================================================
// Convenience Entry Points
// =============================================================================

/// Parse a Layout A team export with default settings
pub fn parse_legacy_export(text: &str, team: &str) -> TeamBatch {
    ReportParser::default().parse_team(text, team, EmployeeLayout::Legacy)
}

/// Parse a Layout B team export with default settings
pub fn parse_attendance_export(text: &str, team: &str) -> TeamBatch {
    ReportParser::default().parse_team(text, team, EmployeeLayout::Attendance)
}

/// Parse the minimal leaderboard export with default settings
pub fn parse_ranking(text: &str) -> RankingTable {
    ReportParser::default().parse_ranking(text, RankingLayout::Minimal)
}

/// Parse the extended leaderboard export with default settings
pub fn parse_extended_ranking(text: &str) -> RankingTable {
    ReportParser::default().parse_ranking(text, RankingLayout::Extended)
}
