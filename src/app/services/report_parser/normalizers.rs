//! Value normalizers for spreadsheet cells
//!
//! Every function here is total: any input string yields a value. The
//! `try_*` variants additionally say whether the value was read from the cell
//! or is a default standing in for unusable content, which the record mapper
//! turns into diagnostics.

use regex::Regex;
use std::sync::LazyLock;

use crate::app::models::Period;
use crate::constants::{TRUE_LITERAL, ZERO_DURATION, period_labels};

/// Spreadsheet rendering of a zero currency amount (`R$ -`, `R$   -`)
static CURRENCY_ZERO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^R\$\s*-\s*$").expect("valid currency-zero regex"));

/// Longest numeric prefix accepted after cleanup
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("valid float-prefix regex")
});

static INTEGER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid integer-prefix regex"));

static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+:\d{2}:\d{2}$").expect("valid clock regex"));

static ZERO_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?0+(?:[.,]0*)?$").expect("valid zero regex"));

static COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid count regex"));

/// Why a field fell back to its default
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    /// The row is too short to have this column
    MissingCell,
    /// The cell has content that could not be read
    Unparsable(String),
    /// The cell was read but the value is outside the field's domain
    OutOfRange(String),
}

impl std::fmt::Display for DefaultReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultReason::MissingCell => write!(f, "cell missing"),
            DefaultReason::Unparsable(raw) => write!(f, "unparsable value '{}'", raw),
            DefaultReason::OutOfRange(raw) => write!(f, "value out of range '{}'", raw),
        }
    }
}

/// A normalized value, or a default together with the reason it was used
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome<T> {
    Parsed(T),
    Defaulted { value: T, reason: DefaultReason },
}

impl<T> FieldOutcome<T> {
    pub fn defaulted(value: T, reason: DefaultReason) -> Self {
        FieldOutcome::Defaulted { value, reason }
    }

    /// The value, whichever way it was obtained
    pub fn value(self) -> T {
        match self {
            FieldOutcome::Parsed(value) | FieldOutcome::Defaulted { value, .. } => value,
        }
    }

    pub fn reason(&self) -> Option<&DefaultReason> {
        match self {
            FieldOutcome::Parsed(_) => None,
            FieldOutcome::Defaulted { reason, .. } => Some(reason),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, FieldOutcome::Defaulted { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldOutcome<U> {
        match self {
            FieldOutcome::Parsed(value) => FieldOutcome::Parsed(f(value)),
            FieldOutcome::Defaulted { value, reason } => FieldOutcome::Defaulted {
                value: f(value),
                reason,
            },
        }
    }
}

/// Normalize a currency, plain or percentage cell into a number
///
/// Empty cells and the spreadsheet zero markers (`-`, `R$ -`) are `0`.
/// Brazilian notation (`1.234,56`) is recognized, and a percent sign divides
/// the result by 100 so attainment-like values are always fractions.
/// Unparsable text yields `0`.
pub fn normalize_number(raw: &str) -> f64 {
    try_number(raw).value()
}

/// Like [`normalize_number`], reporting when the `0` is a default
pub fn try_number(raw: &str) -> FieldOutcome<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || CURRENCY_ZERO.is_match(trimmed) {
        return FieldOutcome::Parsed(0.0);
    }

    let is_percentage = trimmed.contains('%');
    let mut cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, 'R' | '$' | '%') && !c.is_whitespace())
        .collect();

    if let Some(comma) = cleaned.find(',') {
        let brazilian = match cleaned.find('.') {
            None => true,
            Some(dot) => dot < comma,
        };
        if brazilian {
            cleaned = cleaned.replace('.', "").replacen(',', ".", 1);
        }
    }

    let parsed = FLOAT_PREFIX
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite());

    match parsed {
        Some(value) if is_percentage => FieldOutcome::Parsed(value / 100.0),
        Some(value) => FieldOutcome::Parsed(value),
        None => FieldOutcome::defaulted(0.0, DefaultReason::Unparsable(trimmed.to_string())),
    }
}

/// Read the leading integer of a cell (`"12º"` is 12, `"1.5"` is 1)
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    INTEGER_PREFIX
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Normalize a non-negative count; blank cells are zero
pub fn try_count(raw: &str) -> FieldOutcome<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return FieldOutcome::Parsed(0);
    }

    match parse_leading_int(trimmed) {
        Some(value) if value < 0 => {
            FieldOutcome::defaulted(0, DefaultReason::OutOfRange(trimmed.to_string()))
        }
        Some(value) => match u32::try_from(value) {
            Ok(count) => FieldOutcome::Parsed(count),
            Err(_) => FieldOutcome::defaulted(0, DefaultReason::OutOfRange(trimmed.to_string())),
        },
        None => FieldOutcome::defaulted(0, DefaultReason::Unparsable(trimmed.to_string())),
    }
}

/// Normalize a rank position; anything but a positive integer is `sentinel`
pub fn try_rank(raw: &str, sentinel: u32) -> FieldOutcome<u32> {
    let trimmed = raw.trim();
    match parse_leading_int(trimmed) {
        Some(value) if value >= 1 => match u32::try_from(value) {
            Ok(rank) => FieldOutcome::Parsed(rank),
            Err(_) => {
                FieldOutcome::defaulted(sentinel, DefaultReason::OutOfRange(trimmed.to_string()))
            }
        },
        Some(_) => {
            FieldOutcome::defaulted(sentinel, DefaultReason::OutOfRange(trimmed.to_string()))
        }
        None => FieldOutcome::defaulted(sentinel, DefaultReason::Unparsable(trimmed.to_string())),
    }
}

/// Normalize a duration cell into its display string
///
/// Blank, `-` and numeric zero render as `00:00:00`. The spreadsheet's
/// `"<days> <HH:MM:SS>"` encoding renders as `"<days>d <HH:MM:SS>"` (clock
/// only when days is zero) and the total-row `"<days> <months> <HH:MM:SS>"`
/// encoding as `"<days>d <months>m <HH:MM:SS>"`. Anything else is returned
/// trimmed but otherwise unchanged.
pub fn normalize_duration(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || ZERO_NUMBER.is_match(trimmed) {
        return ZERO_DURATION.to_string();
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    match tokens.as_slice() {
        [days, clock] if COUNT.is_match(days) && CLOCK.is_match(clock) => {
            match days.parse::<u64>() {
                Ok(0) => clock.to_string(),
                Ok(days) => format!("{}d {}", days, clock),
                Err(_) => trimmed.to_string(),
            }
        }
        [days, months, clock]
            if COUNT.is_match(days) && COUNT.is_match(months) && CLOCK.is_match(clock) =>
        {
            match (days.parse::<u64>(), months.parse::<u64>()) {
                (Ok(days), Ok(months)) => format!("{}d {}m {}", days, months, clock),
                _ => trimmed.to_string(),
            }
        }
        _ => trimmed.to_string(),
    }
}

/// Normalize a duration that arrived as a number rather than text
pub fn normalize_duration_value(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        ZERO_DURATION.to_string()
    } else {
        normalize_duration(&value.to_string())
    }
}

/// Whether a cell looks like a duration produced by the exports
pub fn looks_like_duration(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || trimmed == "-"
        || ZERO_NUMBER.is_match(trimmed)
        || trimmed
            .split_whitespace()
            .last()
            .is_some_and(|clock| CLOCK.is_match(clock))
}

/// `true` only for the literal `TRUE`, case-insensitive after trim
pub fn parse_flag(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case(TRUE_LITERAL)
}

/// Normalize a period cell into its tag and upper-cased label
pub fn normalize_period(raw: &str) -> (Period, String) {
    let label = raw.trim().to_uppercase();
    if label.is_empty() {
        (Period::Undefined, period_labels::UNDEFINED.to_string())
    } else {
        (Period::from_label(&label), label)
    }
}

/// Trimmed copy of a free-text cell
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_string()
}
