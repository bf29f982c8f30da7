//! Application constants for the sales report ingester
//!
//! This module contains the literal markers, sentinels and default offsets
//! the spreadsheet exports rely upon. Column positions for the per-employee
//! layouts live in [`crate::app::services::report_parser::layout`].

// =============================================================================
// Table Markers
// =============================================================================

/// Text found in the column header row of a team export
pub const HEADER_MARKER: &str = "Pos. Ranking";

/// Text found in the first cell of the row that opens the team footer block
pub const FOOTER_MARKER: &str = "RESULTADO GERAL";

/// Number of rows between the footer marker and the footer value row
///
/// Row `i` holds the marker, row `i + 1` the footer column titles and
/// row `i + 2` the values.
pub const FOOTER_PAYLOAD_OFFSET: usize = 2;

/// Header row index assumed when the header marker cannot be found
pub const FALLBACK_HEADER_ROW: usize = 1;

/// Upper bound for configured row offsets (footer payload, fallback header)
pub const MAX_ROW_OFFSET: usize = 10_000;

/// Minimum number of non-blank rows for a team export to be considered
pub const MIN_TEAM_ROWS: usize = 3;

/// A row is an employee row iff its trimmed first cell is longer than this
pub const MIN_NAME_LEN: usize = 2;

/// Absolute difference tolerated between a footer total and the sum of records
pub const FOOTER_TOLERANCE: f64 = 0.01;

// =============================================================================
// Literal Values
// =============================================================================

/// Rank assigned to employees whose rank cell is missing or unparsable
pub const RANK_SENTINEL: u32 = 999;

/// Literal marking a true boolean cell (compared case-insensitively after trim)
pub const TRUE_LITERAL: &str = "TRUE";

/// Name cell literal that identifies the leaderboard grand-total row
pub const TOTAL_ROW_LITERAL: &str = "TOTAL";

/// Canonical rendering of a zero duration
pub const ZERO_DURATION: &str = "00:00:00";

/// Prefixes (lower-cased) identifying an HTML error page returned instead of data
pub const HTML_SENTINELS: &[&str] = &["<!doctype html", "<html"];

/// Byte order mark some spreadsheet tools prepend to text exports
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Field delimiter used by the exports
pub const FIELD_DELIMITER: u8 = b';';

// =============================================================================
// Period Labels
// =============================================================================

/// Period labels (upper-cased) and their variants
pub mod period_labels {
    /// Morning shift, correctly encoded
    pub const MORNING: &str = "MANHÃ";

    /// Morning shift with the accented vowel lost to a replacement character
    pub const MORNING_REPLACEMENT: &str = "MANH\u{FFFD}";

    /// Morning shift written without the accent
    pub const MORNING_PLAIN: &str = "MANHA";

    /// Afternoon shift
    pub const AFTERNOON: &str = "TARDE";

    /// Full-day shift
    pub const FULL_DAY: &str = "INTEGRAL";

    /// Placeholder used when the period cell is absent
    pub const UNDEFINED: &str = "INDEFINIDO";
}

// =============================================================================
// Team Discovery
// =============================================================================

/// Default glob for team export files inside the data directory
pub const DEFAULT_DISCOVER_PATTERN: &str = "EQUIPE_*.csv";

/// File stem prefix stripped to obtain the team name
pub const TEAM_FILE_PREFIX: &str = "EQUIPE_";

/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "SALESBOARD_DATA_DIR";

/// Environment variable overriding the loader concurrency
pub const ENV_CONCURRENCY: &str = "SALESBOARD_CONCURRENCY";

/// Directory name under the platform config dir holding `config.json`
pub const CONFIG_DIR_NAME: &str = "salesboard";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";
