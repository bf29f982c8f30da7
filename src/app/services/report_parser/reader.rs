//! Tabular reader for semicolon-delimited exports
//!
//! This is the only component that knows the raw serialization format. It
//! turns a text blob into rows of raw string cells, dropping blank rows and
//! refusing HTML pages that a failed fetch may have returned instead of data.

use crate::constants::{BYTE_ORDER_MARK, FIELD_DELIMITER, HTML_SENTINELS};
use crate::{Error, Result};

/// One row of raw cells
pub type Row = Vec<String>;

/// Rows read from an export, plus records the tokenizer could not read
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub rows: Vec<Row>,

    /// Line number and message for every unreadable record
    pub malformed: Vec<(u64, String)>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Whether the text is an HTML document rather than an export
pub fn is_html_document(text: &str) -> bool {
    let head: String = text
        .trim_start_matches(BYTE_ORDER_MARK)
        .trim_start()
        .chars()
        .take(16)
        .collect::<String>()
        .to_lowercase();
    HTML_SENTINELS
        .iter()
        .any(|sentinel| head.starts_with(sentinel))
}

/// Split an export into rows of raw cells
///
/// Rows whose cells are all blank are dropped. Returns
/// [`Error::RejectedInput`] for HTML documents.
pub fn read_table(text: &str) -> Result<Table> {
    if is_html_document(text) {
        return Err(Error::rejected_input(
            "input is an HTML document, not a data export",
        ));
    }

    let body = text.trim_start_matches(BYTE_ORDER_MARK);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut table = Table::default();
    for result in reader.records() {
        match result {
            Ok(record) => {
                if record.iter().all(|cell| cell.trim().is_empty()) {
                    continue;
                }
                table.rows.push(record.iter().map(str::to_string).collect());
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                table.malformed.push((line, e.to_string()));
            }
        }
    }

    Ok(table)
}
