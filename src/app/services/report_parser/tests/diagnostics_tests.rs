//! Tests for diagnostics, sinks and parse statistics

use super::super::diagnostics::{
    Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticSink, NullSink, TracingSink,
};
use super::super::stats::ParseStats;

#[test]
fn test_diagnostic_display() {
    let diagnostic = Diagnostic::new(DiagnosticKind::CellDefaulted, "unparsable value 'x'")
        .at_row(4)
        .at_column(2)
        .for_field("portabilitySales");

    assert_eq!(
        diagnostic.to_string(),
        "cell defaulted at row 4, column 2 (portabilitySales): unparsable value 'x'"
    );

    let bare = Diagnostic::new(DiagnosticKind::FooterMissing, "no marker");
    assert_eq!(bare.to_string(), "footer missing: no marker");
}

#[test]
fn test_batch_level_kinds() {
    assert!(DiagnosticKind::RejectedInput.is_batch_level());
    assert!(DiagnosticKind::FooterDisagreement.is_batch_level());
    assert!(!DiagnosticKind::CellDefaulted.is_batch_level());
    assert!(!DiagnosticKind::RowSkipped.is_batch_level());
}

#[test]
fn test_log_forwards_to_sink() {
    let mut sink: Vec<Diagnostic> = Vec::new();
    let entries = {
        let mut log = DiagnosticLog::new(&mut sink);
        log.push(Diagnostic::new(DiagnosticKind::RowSkipped, "a").at_row(3));
        log.push(Diagnostic::new(DiagnosticKind::FooterMissing, "b"));
        log.push(Diagnostic::new(DiagnosticKind::RowSkipped, "c").at_row(5));
        log.into_entries()
    };

    assert_eq!(entries.len(), 3);
    assert_eq!(
        entries
            .iter()
            .filter(|d| d.kind == DiagnosticKind::RowSkipped)
            .count(),
        2
    );
    assert_eq!(sink, entries);
}

#[test]
fn test_null_and_tracing_sinks_accept_everything() {
    let diagnostic = Diagnostic::new(DiagnosticKind::DegenerateFooter, "zero total");
    NullSink.report(&diagnostic);
    TracingSink::new("AZUL").report(&diagnostic);
    TracingSink::new("AZUL").report(&Diagnostic::new(DiagnosticKind::CellDefaulted, "x"));
}

#[test]
fn test_diagnostic_serializes_without_empty_locations() {
    let diagnostic = Diagnostic::new(DiagnosticKind::FooterMissing, "no marker");
    let json = serde_json::to_value(&diagnostic).unwrap();

    assert_eq!(json["kind"], "footer_missing");
    assert!(json.get("row").is_none());
    assert!(json.get("field").is_none());
}

#[test]
fn test_stats_defaults() {
    let stats = ParseStats::default();

    assert_eq!(stats.total_rows, 0);
    assert_eq!(stats.success_rate(), 0.0);
    assert!(!stats.is_rejected());
    assert_eq!(stats.batch_warnings().count(), 0);
}

#[test]
fn test_stats_queries() {
    let stats = ParseStats {
        total_rows: 8,
        rows_parsed: 3,
        rows_skipped: 1,
        cells_defaulted: 2,
        diagnostics: vec![
            Diagnostic::new(DiagnosticKind::RowSkipped, "a"),
            Diagnostic::new(DiagnosticKind::FooterMisaligned, "b"),
            Diagnostic::new(DiagnosticKind::CellDefaulted, "c"),
        ],
    };

    assert_eq!(stats.success_rate(), 75.0);
    assert!(stats.has(DiagnosticKind::FooterMisaligned));
    assert!(!stats.has(DiagnosticKind::FooterMissing));
    assert_eq!(stats.batch_warnings().count(), 1);
    assert!(!stats.is_rejected());
}
