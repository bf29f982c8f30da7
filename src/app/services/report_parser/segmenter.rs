//! Table segmentation for team exports
//!
//! A team export is a header block, the column header row (found by its
//! marker text), one row per employee, and a footer block opened by a marker
//! row. The footer's values sit a fixed number of rows below the marker.

use super::reader::Row;
use crate::config::ParserConfig;

/// Where the footer value row is, if anywhere
#[derive(Debug, Clone, PartialEq)]
pub enum Footer<'t> {
    /// No marker before the end of the table
    Absent,
    /// Marker found but the table ends before the value row
    PayloadMissing { marker_row: usize },
    /// Marker and value row found
    Present {
        marker_row: usize,
        payload_row: usize,
        values: &'t Row,
    },
}

impl<'t> Footer<'t> {
    pub fn values(&self) -> Option<&'t Row> {
        match self {
            Footer::Present { values, .. } => Some(values),
            _ => None,
        }
    }
}

/// Partitions of a team export
#[derive(Debug, Clone)]
pub struct Segments<'t> {
    /// Index of the column header row
    pub header_row: usize,

    /// Whether the header row was located by its marker
    pub header_found: bool,

    /// Employee rows with their row index
    pub employee_rows: Vec<(usize, &'t Row)>,

    /// Indices of rows before the footer that failed the employee-row test
    pub skipped_rows: Vec<usize>,

    pub footer: Footer<'t>,
}

/// Index of the first row with a cell containing `marker`
pub fn find_header_row(rows: &[Row], marker: &str) -> Option<usize> {
    rows.iter()
        .position(|row| row.iter().any(|cell| cell.contains(marker)))
}

/// Whether a row names an employee
pub fn is_employee_row(row: &Row, min_name_len: usize) -> bool {
    row.first()
        .is_some_and(|cell| cell.trim().chars().count() > min_name_len)
}

/// Split rows into employee rows and the footer value row
pub fn segment<'t>(rows: &'t [Row], config: &ParserConfig) -> Segments<'t> {
    let located = find_header_row(rows, &config.header_marker);
    let header_row = located.unwrap_or(config.fallback_header_row);

    let mut employee_rows = Vec::new();
    let mut skipped_rows = Vec::new();
    let mut footer = Footer::Absent;

    for (index, row) in rows.iter().enumerate().skip(header_row.saturating_add(1)) {
        let first = row.first().map(String::as_str).unwrap_or("");

        if first.contains(config.footer_marker.as_str()) {
            let payload = index
                .checked_add(config.footer_payload_offset)
                .and_then(|payload_row| rows.get(payload_row).map(|values| (payload_row, values)));
            footer = match payload {
                Some((payload_row, values)) => Footer::Present {
                    marker_row: index,
                    payload_row,
                    values,
                },
                None => Footer::PayloadMissing { marker_row: index },
            };
            break;
        }

        if is_employee_row(row, config.min_name_len) {
            employee_rows.push((index, row));
        } else {
            skipped_rows.push(index);
        }
    }

    Segments {
        header_row,
        header_found: located.is_some(),
        employee_rows,
        skipped_rows,
        footer,
    }
}
