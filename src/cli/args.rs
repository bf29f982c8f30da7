//! Command-line argument definitions for salesboard
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::app::services::report_parser::{EmployeeLayout, RankingLayout};
use crate::constants::TEAM_FILE_PREFIX;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the sales report ingester
///
/// Reads the semicolon-delimited performance exports of the sales teams and
/// prints the normalized records, team KPIs and data-quality warnings.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "salesboard",
    version,
    about = "Ingest spreadsheet sales exports into normalized records and team KPIs",
    long_about = "Reads the semicolon-delimited performance exports produced by the sales \
                  spreadsheets (one per team, plus the company-wide leaderboard), normalizes \
                  currency, percentage and duration cells, extracts each team's KPI footer and \
                  reports every data-quality problem found along the way."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    ///
    /// JSON configuration holding parser settings and the team manifest. If not
    /// specified, looks for config.json under the platform config directory.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "text",
        global = true,
        help = "Output format for results"
    )]
    pub format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse a single team export
    Team(TeamArgs),
    /// Parse the company-wide leaderboard export
    Ranking(RankingArgs),
    /// Load every configured or discovered team export concurrently
    Load(LoadArgs),
}

/// Arguments for the team command
#[derive(Debug, Clone, Parser)]
pub struct TeamArgs {
    /// Team export to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Team the records belong to
    ///
    /// Defaults to the file stem without the EQUIPE_ prefix.
    #[arg(long = "team", value_name = "NAME", help = "Team the records belong to")]
    pub team: Option<String>,

    /// Column layout of the export
    #[arg(
        long = "layout",
        value_enum,
        default_value = "legacy",
        help = "Column layout of the export"
    )]
    pub layout: LayoutArg,
}

/// Arguments for the ranking command
#[derive(Debug, Clone, Parser)]
pub struct RankingArgs {
    /// Leaderboard export to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Parse the extended layout with attendance columns
    #[arg(long = "extended", help = "Leaderboard uses the extended layout")]
    pub extended: bool,
}

/// Arguments for the load command
#[derive(Debug, Clone, Default, Parser)]
pub struct LoadArgs {
    /// Directory holding the team exports
    ///
    /// Relative manifest paths are resolved against it, and when the manifest
    /// is empty every file matching the discovery pattern is loaded.
    #[arg(
        short = 'd',
        long = "data-dir",
        value_name = "DIR",
        help = "Directory holding the team exports"
    )]
    pub data_dir: Option<PathBuf>,

    /// Maximum number of exports processed at once
    #[arg(
        short = 'j',
        long = "concurrency",
        value_name = "COUNT",
        help = "Number of team exports processed concurrently"
    )]
    pub concurrency: Option<usize>,

    /// Discovered teams that use the attendance layout (repeatable)
    #[arg(
        long = "attendance-team",
        value_name = "NAME",
        help = "Discovered team that uses the attendance layout"
    )]
    pub attendance_teams: Vec<String>,

    /// Leaderboard export to load alongside the teams
    #[arg(long = "ranking", value_name = "FILE", help = "Leaderboard export to load")]
    pub ranking: Option<PathBuf>,

    /// The leaderboard uses the extended layout
    #[arg(
        long = "extended-ranking",
        requires = "ranking",
        help = "Leaderboard uses the extended layout"
    )]
    pub extended_ranking: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable coloured report
    Text,
    /// JSON document for scripting
    Json,
}

/// Team export layouts selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Single period per file with outbound metrics
    Legacy,
    /// Attendance columns and a footer split by period
    Attendance,
}

impl From<LayoutArg> for EmployeeLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Legacy => EmployeeLayout::Legacy,
            LayoutArg::Attendance => EmployeeLayout::Attendance,
        }
    }
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode or JSON output)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Text
    }

    /// Validate the global arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }
}

impl TeamArgs {
    /// Validate the team command arguments
    pub fn validate(&self) -> Result<()> {
        require_file(&self.file)?;
        if self.team_name().trim().is_empty() {
            return Err(Error::configuration(
                "Team name cannot be empty; pass --team",
            ));
        }
        Ok(())
    }

    /// Team name given on the command line or derived from the file name
    pub fn team_name(&self) -> String {
        match &self.team {
            Some(team) => team.trim().to_string(),
            None => team_from_path(&self.file),
        }
    }
}

impl RankingArgs {
    /// Validate the ranking command arguments
    pub fn validate(&self) -> Result<()> {
        require_file(&self.file)
    }

    pub fn layout(&self) -> RankingLayout {
        if self.extended {
            RankingLayout::Extended
        } else {
            RankingLayout::Minimal
        }
    }
}

impl LoadArgs {
    /// Validate the load command arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.data_dir {
            if !dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Data directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        if self.concurrency == Some(0) {
            return Err(Error::configuration(
                "Concurrency must be greater than 0",
            ));
        }

        if let Some(ranking) = &self.ranking {
            require_file(ranking)?;
        }

        Ok(())
    }

    pub fn ranking_layout(&self) -> RankingLayout {
        if self.extended_ranking {
            RankingLayout::Extended
        } else {
            RankingLayout::Minimal
        }
    }
}

/// Team name from an export file name (`EQUIPE_AZUL.csv` is `AZUL`)
pub fn team_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    stem.strip_prefix(TEAM_FILE_PREFIX)
        .map(str::to_string)
        .unwrap_or(stem)
}

fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::configuration(format!(
            "Input file does not exist: {}",
            path.display()
        )));
    }
    Ok(())
}
