//! Tests for leaderboard parsing

use super::super::diagnostics::DiagnosticKind;
use super::super::layout::{RankingField, RankingLayout, column_of};
use super::super::parser::{ReportParser, parse_extended_ranking, parse_ranking};
use super::super::ranking::{is_total_name, map_ranking_row};
use super::{export, extended_ranking_export, line, ranking_export, row};
use crate::app::models::Period;

#[test]
fn test_ranking_offsets_pinned() {
    let minimal = RankingLayout::Minimal.columns();
    assert_eq!(column_of(minimal, RankingField::Name), Some(1));
    assert_eq!(column_of(minimal, RankingField::Leads), Some(3));
    assert_eq!(column_of(minimal, RankingField::TalkTime), Some(6));
    assert_eq!(column_of(minimal, RankingField::Period), None);

    let extended = RankingLayout::Extended.columns();
    assert_eq!(column_of(extended, RankingField::Attainment), Some(3));
    assert_eq!(column_of(extended, RankingField::HandleTime), Some(5));
    assert_eq!(column_of(extended, RankingField::Period), Some(8));
    assert_eq!(column_of(extended, RankingField::HireDate), Some(12));
}

#[test]
fn test_total_name_detection() {
    assert!(is_total_name("TOTAL"));
    assert!(is_total_name("total"));
    assert!(is_total_name(" Total "));
    assert!(!is_total_name("TOTAL GERAL"));
    assert!(!is_total_name("Totalizador"));
}

#[test]
fn test_parse_minimal_ranking() {
    let table = parse_ranking(&ranking_export());

    assert_eq!(table.layout, RankingLayout::Minimal);
    assert_eq!(table.entries.len(), 3);

    let ana = &table.entries[0];
    assert!(!ana.is_total);
    assert_eq!(ana.position, Some(1));
    assert_eq!(ana.name, "Ana Souza");
    assert_eq!(ana.total_sales, 1000.0);
    assert_eq!(ana.leads, 10);
    assert_eq!(ana.handle_time, "00:05:00");
    assert_eq!(ana.talk_time, "00:04:00");
    assert_eq!(ana.attainment, None);
    assert_eq!(ana.period, None);

    let bruno = &table.entries[1];
    assert_eq!(bruno.post_call_time, "00:00:00");
    assert_eq!(bruno.talk_time, "00:00:00");
}

#[test]
fn test_total_row_has_no_position() {
    let table = parse_ranking(&ranking_export());
    let total = table.total().expect("total row");

    assert!(total.is_total);
    assert_eq!(total.position, None);
    assert_eq!(total.name, "total");
    assert_eq!(total.total_sales, 1500.0);
    assert_eq!(total.handle_time, "3d 2m 08:35:00");
    assert_eq!(total.talk_time, "1d 04:00:00");

    assert_eq!(table.employees().count(), 2);
}

#[test]
fn test_nameless_rows_discarded() {
    let table = parse_ranking(&ranking_export());

    assert!(table.entries.iter().all(|e| !e.name.is_empty()));
    assert_eq!(table.stats.rows_skipped, 1);
    assert!(table.stats.has(DiagnosticKind::RowSkipped));
    assert_eq!(table.stats.rows_parsed, 3);
}

#[test]
fn test_parse_extended_ranking() {
    let table = parse_extended_ranking(&extended_ranking_export());

    assert_eq!(table.layout, RankingLayout::Extended);
    assert_eq!(table.entries.len(), 3);

    let ana = &table.entries[0];
    assert_eq!(ana.attainment, Some(0.5));
    assert_eq!(ana.leads, 10);
    assert_eq!(ana.period, Some(Period::Morning));
    assert_eq!(ana.terminated, Some(false));
    assert_eq!(ana.late_count.as_deref(), Some("2"));
    assert_eq!(ana.absence_count.as_deref(), Some("-"));
    assert_eq!(ana.hire_date.as_deref(), Some("15/01/2023"));

    let bruno = &table.entries[1];
    assert_eq!(bruno.period, Some(Period::Afternoon));
    assert_eq!(bruno.terminated, Some(true));

    let total = &table.entries[2];
    assert!(total.is_total);
    assert_eq!(total.position, None);
    assert_eq!(total.attainment, Some(0.375));
    assert_eq!(total.handle_time, "3d 2m 08:35:00");
}

#[test]
fn test_only_first_row_is_header() {
    // A data row in the first position is consumed as the header
    let text = export(&[
        line(&["1", "Ana Souza", "R$ 10,00", "1", "0", "0", "0"]),
        line(&["2", "Bruno Lima", "R$ 5,00", "1", "0", "0", "0"]),
    ]);
    let table = parse_ranking(&text);

    assert_eq!(table.entries.len(), 1);
    assert_eq!(table.entries[0].name, "Bruno Lima");
}

#[test]
fn test_bad_position_reported() {
    let mapped = map_ranking_row(
        &row(&["abc", "Ana Souza", "R$ 10,00", "1", "0", "0", "0"]),
        RankingLayout::Minimal,
    )
    .expect("named row");

    assert_eq!(mapped.entry.position, None);
    assert_eq!(mapped.defaults.len(), 1);
    assert_eq!(mapped.defaults[0].field, RankingField::Position);
}

#[test]
fn test_short_ranking_row() {
    let mapped = map_ranking_row(&row(&["3", "Carla Dias"]), RankingLayout::Extended)
        .expect("named row");

    assert_eq!(mapped.entry.position, Some(3));
    assert_eq!(mapped.entry.total_sales, 0.0);
    assert_eq!(mapped.entry.attainment, Some(0.0));
    assert_eq!(mapped.entry.terminated, Some(false));
    assert_eq!(mapped.entry.period, None);
    assert_eq!(mapped.defaults.len(), 11);
}

#[test]
fn test_html_ranking_rejected() {
    let table = ReportParser::default()
        .parse_ranking("<!DOCTYPE html><html></html>", RankingLayout::Minimal);

    assert!(table.entries.is_empty());
    assert!(table.stats.is_rejected());
}

#[test]
fn test_header_only_ranking() {
    let table = parse_ranking("Pos.;Nome;Vendas\n");

    assert!(table.entries.is_empty());
    assert!(table.stats.has(DiagnosticKind::InsufficientRows));
}
