//! Tests for team export segmentation

use super::super::segmenter::{Footer, find_header_row, is_employee_row, segment};
use super::row;
use crate::config::ParserConfig;

fn rows(lines: &[&[&str]]) -> Vec<Vec<String>> {
    lines.iter().map(|cells| row(cells)).collect()
}

#[test]
fn test_find_header_row() {
    let table = rows(&[
        &["RELATÓRIO"],
        &["Equipe", "AZUL"],
        &["Nome", "Pos. Ranking", "Vendas"],
    ]);
    assert_eq!(find_header_row(&table, "Pos. Ranking"), Some(2));
    assert_eq!(find_header_row(&table, "Inexistente"), None);
}

#[test]
fn test_employee_row_test() {
    assert!(is_employee_row(&row(&["Ana", "1"]), 2));
    assert!(is_employee_row(&row(&["  Ana  "]), 2));
    assert!(!is_employee_row(&row(&["Al"]), 2));
    assert!(!is_employee_row(&row(&["  ", "R$ 10,00"]), 2));
    assert!(!is_employee_row(&row(&[]), 2));
}

#[test]
fn test_segment_with_footer() {
    let table = rows(&[
        &["RELATÓRIO"],
        &["Nome", "Pos. Ranking"],
        &["Ana Souza", "1"],
        &["--", ""],
        &["Bruno Lima", "2"],
        &["RESULTADO GERAL"],
        &["Total", "Atingimento"],
        &["R$ 1.500,00", "30%"],
        &["Trailing notes"],
    ]);
    let segments = segment(&table, &ParserConfig::default());

    assert!(segments.header_found);
    assert_eq!(segments.header_row, 1);

    let names: Vec<&str> = segments
        .employee_rows
        .iter()
        .map(|(_, r)| r[0].as_str())
        .collect();
    assert_eq!(names, vec!["Ana Souza", "Bruno Lima"]);
    assert_eq!(segments.employee_rows[1].0, 4);
    assert_eq!(segments.skipped_rows, vec![3]);

    match segments.footer {
        Footer::Present {
            marker_row,
            payload_row,
            values,
        } => {
            assert_eq!(marker_row, 5);
            assert_eq!(payload_row, 7);
            assert_eq!(values[0], "R$ 1.500,00");
        }
        other => panic!("expected a footer, got {:?}", other),
    }
}

#[test]
fn test_segment_without_footer() {
    let table = rows(&[
        &["RELATÓRIO"],
        &["Nome", "Pos. Ranking"],
        &["Ana Souza", "1"],
        &["Bruno Lima", "2"],
    ]);
    let segments = segment(&table, &ParserConfig::default());

    assert_eq!(segments.employee_rows.len(), 2);
    assert_eq!(segments.footer, Footer::Absent);
    assert!(segments.footer.values().is_none());
}

#[test]
fn test_footer_payload_beyond_table() {
    let table = rows(&[
        &["Nome", "Pos. Ranking"],
        &["Ana Souza", "1"],
        &["RESULTADO GERAL"],
        &["Total"],
    ]);
    let segments = segment(&table, &ParserConfig::default());

    assert_eq!(segments.footer, Footer::PayloadMissing { marker_row: 2 });
    assert_eq!(segments.employee_rows.len(), 1);
}

#[test]
fn test_footer_marker_matched_as_substring() {
    let table = rows(&[
        &["Nome", "Pos. Ranking"],
        &["Ana Souza", "1"],
        &["  RESULTADO GERAL DA EQUIPE"],
        &["Total"],
        &["R$ 10,00"],
    ]);
    let segments = segment(&table, &ParserConfig::default());
    assert_eq!(segments.footer.values().map(|v| v[0].as_str()), Some("R$ 10,00"));
}

#[test]
fn test_header_fallback_row() {
    let table = rows(&[
        &["RELATÓRIO"],
        &["Nome", "Posição"],
        &["Ana Souza", "1"],
        &["Bruno Lima", "2"],
    ]);
    let segments = segment(&table, &ParserConfig::default());

    assert!(!segments.header_found);
    assert_eq!(segments.header_row, 1);
    assert_eq!(segments.employee_rows.len(), 2);
    assert_eq!(segments.employee_rows[0].0, 2);
}

#[test]
fn test_custom_markers_and_offset() {
    let config = ParserConfig {
        header_marker: "Colaborador".to_string(),
        footer_marker: "TOTAIS".to_string(),
        footer_payload_offset: 1,
        ..ParserConfig::default()
    };
    let table = rows(&[
        &["Colaborador", "Rank"],
        &["Ana Souza", "1"],
        &["TOTAIS"],
        &["R$ 5,00"],
    ]);
    let segments = segment(&table, &config);

    assert_eq!(segments.header_row, 0);
    assert_eq!(segments.employee_rows.len(), 1);
    assert_eq!(segments.footer.values().map(|v| v[0].as_str()), Some("R$ 5,00"));
}

#[test]
fn test_segment_with_unbounded_offsets() {
    let table = rows(&[
        &["T"],
        &["Nome", "Pos. Ranking"],
        &["Ana Souza", "1", "R$ 10,00"],
        &["RESULTADO GERAL"],
        &["x"],
        &["y"],
    ]);

    let config = ParserConfig {
        footer_payload_offset: usize::MAX,
        ..ParserConfig::default()
    };
    let segments = segment(&table, &config);
    assert_eq!(segments.employee_rows.len(), 1);
    assert_eq!(segments.footer, Footer::PayloadMissing { marker_row: 3 });

    let config = ParserConfig {
        header_marker: "Inexistente".to_string(),
        fallback_header_row: usize::MAX,
        ..ParserConfig::default()
    };
    let segments = segment(&table, &config);
    assert!(!segments.header_found);
    assert!(segments.employee_rows.is_empty());
    assert_eq!(segments.footer, Footer::Absent);
}
