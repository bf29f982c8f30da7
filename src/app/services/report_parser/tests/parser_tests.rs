//! Tests for the team export entry points

use super::super::diagnostics::{Diagnostic, DiagnosticKind};
use super::super::layout::EmployeeLayout;
use super::super::parser::{ReportParser, parse_attendance_export, parse_legacy_export};
use super::*;
use crate::app::models::{Period, SummarySource, TeamSummary};
use crate::config::ParserConfig;

#[test]
fn test_attendance_export_end_to_end() {
    let batch = parse_attendance_export(&attendance_export(), "AZUL");

    assert_eq!(batch.team, "AZUL");
    assert_eq!(batch.layout, EmployeeLayout::Attendance);
    assert_eq!(batch.records.len(), 3);
    assert_eq!(batch.summary_source, SummarySource::Footer);

    let periods: Vec<Period> = batch.records.iter().map(|r| r.period).collect();
    assert_eq!(
        periods,
        vec![Period::Morning, Period::Morning, Period::Afternoon]
    );
    let terminated: Vec<bool> = batch.records.iter().map(|r| r.terminated).collect();
    assert_eq!(terminated, vec![false, true, true]);

    let TeamSummary::Scoped(scoped) = &batch.summary else {
        panic!("expected a scoped summary");
    };
    assert_eq!(scoped.geral.total_sales, FIXTURE_TOTAL_SALES);
    assert_eq!(scoped.geral.rank_position, Some(3));
    assert!(scoped.manha.is_some());
    assert!(scoped.tarde.is_some());

    assert_eq!(batch.stats.total_rows, 8);
    assert_eq!(batch.stats.rows_parsed, 3);
    assert_eq!(batch.stats.rows_skipped, 0);
    assert_eq!(batch.stats.cells_defaulted, 0);
    assert!(batch.stats.diagnostics.is_empty(), "{:?}", batch.stats.diagnostics);
}

#[test]
fn test_footer_literal_reported_over_recomputed_sum() {
    let text = attendance_export_with_footer(attendance_footer_line("R$ 1.800,00"));
    let batch = parse_attendance_export(&text, "AZUL");

    assert_eq!(batch.summary.total_sales(), 1800.0);
    assert!(batch.stats.has(DiagnosticKind::FooterDisagreement));
}

#[test]
fn test_legacy_export_end_to_end() {
    let batch = parse_legacy_export(&legacy_export(), "VERDE");

    assert_eq!(batch.records.len(), 3);
    assert!(batch.records.iter().all(|r| r.supervisor_id == "VERDE"));
    assert_eq!(batch.records[0].outbound_leads, 4);
    assert_eq!(batch.records[2].rank_position, 5);

    let TeamSummary::Flat(flat) = &batch.summary else {
        panic!("expected a flat summary");
    };
    assert_eq!(flat.total_sales, FIXTURE_TOTAL_SALES);
    assert_eq!(flat.rank_position, Some(3));
    assert_eq!(batch.summary_source, SummarySource::Footer);
}

#[test]
fn test_missing_footer_uses_fallback() {
    let batch = parse_legacy_export(&legacy_export_without_footer(), "AZUL");

    assert_eq!(batch.records.len(), 3);
    assert_eq!(batch.summary_source, SummarySource::Fallback);
    assert_eq!(batch.summary.total_sales(), FIXTURE_TOTAL_SALES);
    assert_eq!(batch.summary.margin(), 4.0);
    assert_eq!(
        batch.summary.attainment(),
        (0.5 + 0.25 + 0.125) / 3.0
    );
    assert!(batch.stats.has(DiagnosticKind::FooterMissing));
}

#[test]
fn test_html_input_yields_empty_batch() {
    let batch = parse_attendance_export("<!DOCTYPE html>\n<html><body></body></html>", "AZUL");

    assert!(batch.is_empty());
    assert_eq!(batch.summary_source, SummarySource::Empty);
    assert_eq!(batch.summary.total_sales(), 0.0);
    assert!(batch.stats.has(DiagnosticKind::RejectedInput));
    assert!(batch.stats.is_rejected());
}

#[test]
fn test_too_few_rows_yields_empty_batch() {
    let text = export(&[title_line(), header_line()]);
    let batch = parse_legacy_export(&text, "AZUL");

    assert!(batch.is_empty());
    assert_eq!(batch.stats.total_rows, 2);
    assert!(batch.stats.has(DiagnosticKind::InsufficientRows));
    assert!(matches!(batch.summary, TeamSummary::Flat(_)));
}

#[test]
fn test_empty_input_yields_empty_batch() {
    let batch = parse_attendance_export("", "AZUL");

    assert!(batch.is_empty());
    assert!(matches!(batch.summary, TeamSummary::Scoped(_)));
}

#[test]
fn test_header_marker_missing_flagged() {
    let text = export(&[
        title_line(),
        line(&["Nome", "Posição"]),
        legacy_line(&ANA),
        legacy_line(&BRUNO),
    ]);
    let batch = parse_legacy_export(&text, "AZUL");

    assert_eq!(batch.records.len(), 2);
    let diagnostic = batch
        .stats
        .diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::HeaderMarkerMissing)
        .expect("header diagnostic");
    assert_eq!(diagnostic.row, Some(1));
}

#[test]
fn test_separator_rows_skipped() {
    let text = export(&[
        title_line(),
        header_line(),
        legacy_line(&ANA),
        line(&["--", "", "x"]),
        legacy_line(&BRUNO),
    ]);
    let batch = parse_legacy_export(&text, "AZUL");

    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.stats.rows_skipped, 1);
    assert!(batch.stats.has(DiagnosticKind::RowSkipped));
}

#[test]
fn test_defaulted_cells_counted() {
    let mut cells: Vec<String> = legacy_line(&ANA).split(';').map(str::to_string).collect();
    cells[2] = "#VALOR!".to_string();
    let text = export(&[title_line(), header_line(), cells.join(";")]);

    let batch = parse_legacy_export(&text, "AZUL");

    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.records[0].portability_sales, 0.0);
    assert_eq!(batch.stats.cells_defaulted, 1);

    let diagnostic = batch
        .stats
        .diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::CellDefaulted)
        .expect("cell diagnostic");
    assert_eq!(diagnostic.row, Some(2));
    assert_eq!(diagnostic.column, Some(2));
    assert_eq!(diagnostic.field.as_deref(), Some("portabilitySales"));
}

#[test]
fn test_sink_receives_every_diagnostic() {
    let mut sink: Vec<Diagnostic> = Vec::new();
    let batch = ReportParser::default().parse_team_with_sink(
        &legacy_export_without_footer(),
        "AZUL",
        EmployeeLayout::Legacy,
        &mut sink,
    );

    assert!(!sink.is_empty());
    assert_eq!(sink, batch.stats.diagnostics);
}

#[test]
fn test_duplicate_names_preserved() {
    let text = export(&[
        title_line(),
        header_line(),
        legacy_line(&ANA),
        legacy_line(&ANA),
    ]);
    let batch = parse_legacy_export(&text, "AZUL");

    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.summary.total_sales(), 2000.0);
}

#[test]
fn test_custom_parser_config() {
    let config = ParserConfig {
        min_rows: 10,
        ..ParserConfig::default()
    };
    let batch = ReportParser::new(config).parse_team(&legacy_export(), "AZUL", EmployeeLayout::Legacy);

    assert!(batch.is_empty());
    assert!(batch.stats.has(DiagnosticKind::InsufficientRows));
}

#[test]
fn test_batch_views() {
    let batch = parse_attendance_export(&attendance_export(), "AZUL");

    let active: Vec<&str> = batch.active_records().map(|r| r.name.as_str()).collect();
    assert_eq!(active, vec!["Ana Souza"]);
    assert_eq!(batch.terminated_count(), 2);

    let morning: Vec<&str> = batch
        .records_for_period(Period::Morning)
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(morning, vec!["Ana Souza", "Bruno Lima"]);

    assert_eq!(
        batch.find_by_name("Carla Dias").map(|r| r.rank_position),
        Some(5)
    );
    assert!(batch.find_by_name("Nobody").is_none());
}

#[test]
fn test_unbounded_payload_offset_never_panics() {
    let config = ParserConfig {
        footer_payload_offset: usize::MAX,
        ..ParserConfig::default()
    };
    let text = "T\nNome;Pos. Ranking\nAna Souza;1;R$ 10,00\nRESULTADO GERAL\nx\ny\n";
    let batch = ReportParser::new(config).parse_team(text, "A", EmployeeLayout::Legacy);

    assert_eq!(batch.records.len(), 1);
    assert_eq!(batch.summary_source, SummarySource::Fallback);
    assert!(batch.stats.has(DiagnosticKind::FooterPayloadMissing));
}
