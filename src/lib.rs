//! Salesboard Library
//!
//! A Rust library for ingesting the semicolon-delimited performance exports
//! a sales organization produces from its spreadsheets, and turning them into
//! a normalized in-memory model for presentation code.
//!
//! This library provides tools for:
//! - Locale-aware normalization of currency, percentage and duration cells
//! - Segmenting a team export into employee rows and its footer block
//! - Mapping rows onto employee records through versioned column layouts
//! - Extracting team KPI summaries, with arithmetic fallback
//! - Parsing the company-wide leaderboard export
//! - Collecting data-quality diagnostics without ever failing a batch

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod report_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    EmployeeRecord, FlatSummary, KpiBlock, Period, RankingEntry, RankingTable, ScopedSummary,
    TeamBatch, TeamSummary,
};
pub use app::services::report_parser::{
    EmployeeLayout, RankingLayout, ReportParser, normalize_duration, normalize_number,
    parse_attendance_export, parse_extended_ranking, parse_legacy_export, parse_ranking,
};
pub use config::{Config, ParserConfig};

/// Result type alias for salesboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the fallible edges of the crate
///
/// The parsing core never surfaces these to callers; they are produced by the
/// tabular reader and the configuration/loader layers and turned into
/// diagnostics or CLI messages at those boundaries.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV tokenizing error
    #[error("CSV parsing error: {message}")]
    Csv {
        message: String,
        #[source]
        source: csv::Error,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Input recognized as something other than a data export
    #[error("Rejected input: {reason}")]
    RejectedInput { reason: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Invalid discovery pattern
    #[error("Invalid glob pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A single team export could not be loaded
    #[error("Failed to load team {team}: {message}")]
    TeamLoad { team: String, message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv(message: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a rejected input error
    pub fn rejected_input(reason: impl Into<String>) -> Self {
        Self::RejectedInput {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a glob pattern error
    pub fn glob_pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::GlobPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a team load error
    pub fn team_load(team: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TeamLoad {
            team: team.into(),
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            message: "CSV parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
