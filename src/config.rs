//! Configuration management and validation.
//!
//! Provides the parser tuning knobs (markers, offsets, sentinels) and the team
//! manifest used by the batch loader. Configuration is layered: defaults, then
//! an optional JSON file, then environment variables, then CLI flags (applied
//! by the command layer).

use crate::app::services::report_parser::layout::{EmployeeLayout, RankingLayout};
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DISCOVER_PATTERN, ENV_CONCURRENCY, ENV_DATA_DIR,
    FALLBACK_HEADER_ROW, FOOTER_MARKER, FOOTER_PAYLOAD_OFFSET, FOOTER_TOLERANCE, HEADER_MARKER,
    MAX_ROW_OFFSET, MIN_NAME_LEN, MIN_TEAM_ROWS, RANK_SENTINEL, TEAM_FILE_PREFIX,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Tuning for the team export parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Text identifying the column header row
    pub header_marker: String,

    /// Text identifying the row that opens the footer block
    pub footer_marker: String,

    /// Rows between the footer marker and the footer value row
    pub footer_payload_offset: usize,

    /// Header row assumed when the marker is absent
    pub fallback_header_row: usize,

    /// Minimum non-blank rows for a team export
    pub min_rows: usize,

    /// A row is an employee row iff its trimmed first cell is longer than this
    pub min_name_len: usize,

    /// Rank given to employees without a usable rank cell
    pub rank_sentinel: u32,

    /// Tolerated difference between footer total and the sum of records
    pub footer_tolerance: f64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_marker: HEADER_MARKER.to_string(),
            footer_marker: FOOTER_MARKER.to_string(),
            footer_payload_offset: FOOTER_PAYLOAD_OFFSET,
            fallback_header_row: FALLBACK_HEADER_ROW,
            min_rows: MIN_TEAM_ROWS,
            min_name_len: MIN_NAME_LEN,
            rank_sentinel: RANK_SENTINEL,
            footer_tolerance: FOOTER_TOLERANCE,
        }
    }
}

impl ParserConfig {
    /// Validate the parser settings
    pub fn validate(&self) -> Result<()> {
        if self.header_marker.trim().is_empty() {
            return Err(Error::configuration("header_marker must not be empty"));
        }
        if self.footer_marker.trim().is_empty() {
            return Err(Error::configuration("footer_marker must not be empty"));
        }
        if self.footer_payload_offset == 0 {
            return Err(Error::configuration(
                "footer_payload_offset must be at least 1",
            ));
        }
        if self.footer_payload_offset > MAX_ROW_OFFSET {
            return Err(Error::configuration(format!(
                "footer_payload_offset must be at most {}, got {}",
                MAX_ROW_OFFSET, self.footer_payload_offset
            )));
        }
        if self.fallback_header_row > MAX_ROW_OFFSET {
            return Err(Error::configuration(format!(
                "fallback_header_row must be at most {}, got {}",
                MAX_ROW_OFFSET, self.fallback_header_row
            )));
        }
        if self.footer_tolerance.is_nan() || self.footer_tolerance < 0.0 {
            return Err(Error::configuration(format!(
                "footer_tolerance must be a non-negative number, got {}",
                self.footer_tolerance
            )));
        }
        Ok(())
    }
}

/// One team export to load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSource {
    pub team: String,
    pub path: PathBuf,
    #[serde(default)]
    pub layout: EmployeeLayout,
}

/// The leaderboard export to load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSource {
    pub path: PathBuf,
    #[serde(default)]
    pub layout: RankingLayout,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,

    /// Base directory for relative paths and team discovery
    pub data_dir: Option<PathBuf>,

    /// Explicit team manifest; discovered from `data_dir` when empty
    pub teams: Vec<TeamSource>,

    /// Teams whose discovered exports use the attendance layout
    pub attendance_teams: Vec<String>,

    pub ranking: Option<RankingSource>,

    /// Maximum team exports processed at once
    pub concurrency: usize,

    /// Glob used for team discovery inside `data_dir`
    pub discover_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            data_dir: None,
            teams: Vec::new(),
            attendance_teams: Vec::new(),
            ranking: None,
            concurrency: num_cpus::get(),
            discover_pattern: DEFAULT_DISCOVER_PATTERN.to_string(),
        }
    }
}

impl Config {
    /// Platform default location of the configuration file
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine the user configuration directory")
        })?;
        Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::json(format!("Invalid configuration in {}", path.display()), e))
    }

    /// Load defaults, then the file (if any), then the environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = lookup(ENV_CONCURRENCY) {
            self.concurrency = raw.trim().parse::<usize>().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_CONCURRENCY, raw
                ))
            })?;
        }
        Ok(())
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;
        if self.concurrency == 0 {
            return Err(Error::configuration("concurrency must be at least 1"));
        }
        if let Some(team) = self.teams.iter().find(|t| t.team.trim().is_empty()) {
            return Err(Error::configuration(format!(
                "team entry for {} has an empty name",
                team.path.display()
            )));
        }
        Ok(())
    }

    /// Resolve a possibly relative path against `data_dir`
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Team exports to load: the manifest, or discovery when it is empty
    pub fn team_sources(&self) -> Result<Vec<TeamSource>> {
        if self.teams.is_empty() {
            self.discover_teams()
        } else {
            Ok(self
                .teams
                .iter()
                .map(|source| TeamSource {
                    path: self.resolve_path(&source.path),
                    ..source.clone()
                })
                .collect())
        }
    }

    /// Find team exports in `data_dir` matching `discover_pattern`
    pub fn discover_teams(&self) -> Result<Vec<TeamSource>> {
        let dir = self.data_dir.as_ref().ok_or_else(|| {
            Error::configuration("No teams configured and no data directory to discover them in")
        })?;

        let pattern = dir.join(&self.discover_pattern);
        let pattern = pattern.to_string_lossy().to_string();
        let paths = glob::glob(&pattern).map_err(|e| Error::glob_pattern(&pattern, e))?;

        let mut sources = Vec::new();
        for path in paths.flatten() {
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };
            let team = stem
                .strip_prefix(TEAM_FILE_PREFIX)
                .unwrap_or(&stem)
                .to_string();
            let layout = if self
                .attendance_teams
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&team))
            {
                EmployeeLayout::Attendance
            } else {
                EmployeeLayout::Legacy
            };
            sources.push(TeamSource { team, path, layout });
        }

        sources.sort_by(|a, b| a.team.cmp(&b.team));
        debug!("Discovered {} team exports in {}", sources.len(), dir.display());
        Ok(sources)
    }
}
