//! Command implementations for the salesboard CLI
//!
//! This module contains the command execution logic, the concurrent team
//! loader, progress reporting and the text/JSON report renderers.

use crate::app::models::{RankingTable, TeamBatch, TeamSummary};
use crate::app::services::report_parser::{ReportParser, TracingSink};
use crate::cli::args::{Args, Commands, LoadArgs, OutputFormat, RankingArgs, TeamArgs};
use crate::config::{Config, RankingSource, TeamSource};
use crate::{Error, Result};
use anyhow::Context;
use colored::Colorize;
use futures::stream::{self, StreamExt};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use serde_json::json;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Outcome of loading every configured team export
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Parsed batches, ordered by team name
    pub batches: Vec<TeamBatch>,
    /// Teams whose export could not be read
    pub failures: Vec<Error>,
    pub ranking: Option<RankingTable>,
    pub elapsed: Duration,
}

impl LoadReport {
    /// Batches that produced at least one record
    pub fn loaded_teams(&self) -> usize {
        self.batches.iter().filter(|b| !b.is_empty()).count()
    }

    pub fn total_records(&self) -> usize {
        self.batches.iter().map(|b| b.records.len()).sum()
    }

    /// Sum of the reported team totals
    pub fn total_sales(&self) -> f64 {
        self.batches.iter().map(|b| b.summary.total_sales()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.batches
            .iter()
            .map(|b| b.stats.batch_warnings().count())
            .sum()
    }
}

/// Main command runner
///
/// Sets up logging, resolves the configuration and dispatches to the
/// selected subcommand.
pub async fn run(args: Args) -> anyhow::Result<()> {
    setup_logging(&args)?;

    info!("Starting salesboard");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    match &args.command {
        Some(Commands::Team(team_args)) => run_team(&args, team_args).await,
        Some(Commands::Ranking(ranking_args)) => run_ranking(&args, ranking_args).await,
        Some(Commands::Load(load_args)) => run_load(&args, load_args).await,
        None => Err(Error::configuration("No command given").into()),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("salesboard={}", log_level)));

    let installed = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    installed.map_err(|e| Error::configuration(format!("Failed to install logger: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
fn load_configuration(args: &Args, load_args: Option<&LoadArgs>) -> Result<Config> {
    info!("Loading configuration");

    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    let mut config = Config::load_layered(config_file)?;

    if let Some(load_args) = load_args {
        apply_cli_overrides(&mut config, load_args);
    }

    config.validate()?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, args: &LoadArgs) {
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    for team in &args.attendance_teams {
        if !config
            .attendance_teams
            .iter()
            .any(|name| name.eq_ignore_ascii_case(team))
        {
            config.attendance_teams.push(team.clone());
        }
    }
    if let Some(path) = &args.ranking {
        config.ranking = Some(RankingSource {
            path: path.clone(),
            layout: args.ranking_layout(),
        });
    }
}

async fn run_team(args: &Args, team_args: &TeamArgs) -> anyhow::Result<()> {
    team_args.validate()?;
    let config = load_configuration(args, None)?;
    let parser = ReportParser::new(config.parser);

    let source = TeamSource {
        team: team_args.team_name(),
        path: team_args.file.clone(),
        layout: team_args.layout.into(),
    };
    let batch = load_team(&parser, &source)
        .await
        .with_context(|| format!("Could not load {}", source.path.display()))?;

    match args.format {
        OutputFormat::Json => print_json(&json!({
            "generatedAt": chrono::Utc::now().to_rfc3339(),
            "team": batch,
        }))?,
        OutputFormat::Text => print_team(&batch),
    }
    Ok(())
}

async fn run_ranking(args: &Args, ranking_args: &RankingArgs) -> anyhow::Result<()> {
    ranking_args.validate()?;
    let config = load_configuration(args, None)?;
    let parser = ReportParser::new(config.parser);

    let source = RankingSource {
        path: ranking_args.file.clone(),
        layout: ranking_args.layout(),
    };
    let table = load_ranking(&parser, &source)
        .await
        .with_context(|| format!("Could not load {}", source.path.display()))?;

    match args.format {
        OutputFormat::Json => print_json(&json!({
            "generatedAt": chrono::Utc::now().to_rfc3339(),
            "ranking": table,
        }))?,
        OutputFormat::Text => print_ranking(&table),
    }
    Ok(())
}

async fn run_load(args: &Args, load_args: &LoadArgs) -> anyhow::Result<()> {
    load_args.validate()?;
    let config = load_configuration(args, Some(load_args))
        .context("Invalid configuration for the load command")?;
    debug!("Loaded configuration: {:?}", config);

    let report = load_all(&config, args.show_progress()).await?;

    match args.format {
        OutputFormat::Json => print_json(&load_report_json(&report))?,
        OutputFormat::Text => print_load_report(&report),
    }
    Ok(())
}

/// Read and parse one team export
///
/// Bytes that are not valid UTF-8 become replacement characters, which the
/// period normalizer recognizes.
pub async fn load_team(parser: &ReportParser, source: &TeamSource) -> Result<TeamBatch> {
    let bytes = tokio::fs::read(&source.path).await.map_err(|e| {
        Error::team_load(
            &source.team,
            format!("cannot read {}: {}", source.path.display(), e),
        )
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let mut sink = TracingSink::new(&source.team);
    let batch = parser.parse_team_with_sink(&text, &source.team, source.layout, &mut sink);

    if batch.stats.is_rejected() || batch.is_empty() {
        warn!(
            "Team {} produced no records from {}",
            source.team,
            source.path.display()
        );
    } else {
        debug!(
            "Team {}: {} records, summary from {:?}",
            source.team,
            batch.records.len(),
            batch.summary_source
        );
    }

    Ok(batch)
}

/// Read and parse the leaderboard export
pub async fn load_ranking(parser: &ReportParser, source: &RankingSource) -> Result<RankingTable> {
    let bytes = tokio::fs::read(&source.path)
        .await
        .map_err(|e| Error::io(format!("Failed to read {}", source.path.display()), e))?;
    let text = String::from_utf8_lossy(&bytes);

    let mut sink = TracingSink::new("ranking");
    Ok(parser.parse_ranking_with_sink(&text, source.layout, &mut sink))
}

/// Load every team export concurrently
///
/// At most `concurrency` exports are in flight at once. A team that cannot be
/// read is logged and recorded in the failures; the others still load.
pub async fn load_teams(
    parser: &ReportParser,
    sources: &[TeamSource],
    concurrency: usize,
    progress: Option<&ProgressBar>,
) -> (Vec<TeamBatch>, Vec<Error>) {
    let (mut batches, mut failures) = stream::iter(sources.iter())
        .map(|source| async move {
            let result = load_team(parser, source).await;
            if let Some(pb) = progress {
                pb.inc(1);
                pb.set_message(source.team.clone());
            }
            result
        })
        .buffer_unordered(concurrency.max(1))
        .fold(
            (Vec::new(), Vec::new()),
            |(mut batches, mut failures), result| async move {
                match result {
                    Ok(batch) => batches.push(batch),
                    Err(e) => {
                        error!("{}", e);
                        failures.push(e);
                    }
                }
                (batches, failures)
            },
        )
        .await;

    batches.sort_by(|a: &TeamBatch, b: &TeamBatch| a.team.cmp(&b.team));
    failures.sort_by_key(|e: &Error| e.to_string());
    (batches, failures)
}

/// Resolve the team sources, load them and the optional leaderboard
pub async fn load_all(config: &Config, show_progress: bool) -> Result<LoadReport> {
    let start_time = Instant::now();
    let parser = ReportParser::new(config.parser.clone());

    let sources = config.team_sources()?;
    if sources.is_empty() {
        warn!("No team exports found to load");
    }
    info!(
        "Loading {} team exports with concurrency {}",
        sources.len(),
        config.concurrency
    );

    let progress_bar = if show_progress && !sources.is_empty() {
        Some(create_progress_bar(sources.len() as u64)?)
    } else {
        None
    };

    let (batches, mut failures) =
        load_teams(&parser, &sources, config.concurrency, progress_bar.as_ref()).await;

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Teams loaded");
    }

    let ranking = match &config.ranking {
        Some(source) => {
            let source = RankingSource {
                path: config.resolve_path(&source.path),
                layout: source.layout,
            };
            match load_ranking(&parser, &source).await {
                Ok(table) => Some(table),
                Err(e) => {
                    error!("Failed to load ranking: {}", e);
                    failures.push(e);
                    None
                }
            }
        }
        None => None,
    };

    let report = LoadReport {
        batches,
        failures,
        ranking,
        elapsed: start_time.elapsed(),
    };
    info!(
        "Loaded {} of {} teams ({} records) in {}",
        report.loaded_teams(),
        sources.len(),
        report.total_records(),
        HumanDuration(report.elapsed)
    );
    Ok(report)
}

/// Progress bar in the house style
fn create_progress_bar(total: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map_err(|e| Error::configuration(format!("Invalid progress template: {}", e)))?
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message("Loading teams...");
    Ok(pb)
}

// =============================================================================
// Reports
// =============================================================================

fn print_json(value: &serde_json::Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| Error::json("Failed to render report", e))?;
    println!("{}", rendered);
    Ok(())
}

/// JSON document for a whole load
pub fn load_report_json(report: &LoadReport) -> serde_json::Value {
    json!({
        "generatedAt": chrono::Utc::now().to_rfc3339(),
        "elapsedMs": report.elapsed.as_millis() as u64,
        "teams": report.batches,
        "failures": report.failures.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        "ranking": report.ranking,
    })
}

fn money(value: f64) -> String {
    format!("R$ {:.2}", value)
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn print_summary(summary: &TeamSummary) {
    match summary {
        TeamSummary::Flat(flat) => {
            println!(
                "  Total sales: {}  Attainment: {}  Margin: {}  Avg ticket: {}",
                money(flat.total_sales).green(),
                percent(flat.average_attainment),
                flat.margin_total,
                money(flat.average_ticket)
            );
            println!("  Handle time: {}", flat.handle_time);
        }
        TeamSummary::Scoped(scoped) => {
            for (scope, block) in [
                ("geral", Some(&scoped.geral)),
                ("manha", scoped.manha.as_ref()),
                ("tarde", scoped.tarde.as_ref()),
            ] {
                let Some(block) = block else { continue };
                println!(
                    "  [{}] Total sales: {}  Attainment: {}  Margin: {}  Avg ticket: {}  Handle time: {}",
                    scope,
                    money(block.total_sales).green(),
                    percent(block.attainment),
                    block.margin_count,
                    money(block.average_ticket),
                    block.handle_time
                );
            }
        }
    }
    if let Some(rank) = summary.rank_position() {
        println!("  Team rank: {}", rank);
    }
}

fn print_team(batch: &TeamBatch) {
    println!();
    println!(
        "{} {} ({:?} layout, summary from {:?})",
        "Team".bold(),
        batch.team.bold().cyan(),
        batch.layout,
        batch.summary_source
    );
    println!(
        "  Records: {} ({} active, {} terminated)",
        batch.records.len(),
        batch.active_records().count(),
        batch.terminated_count()
    );
    print_summary(&batch.summary);

    for record in &batch.records {
        let line = format!(
            "    {:>3}  {:<28} {:<10} {:>14} {:>8}",
            record.rank_position,
            record.name,
            record.period.label(),
            money(record.portability_sales),
            percent(record.target_attainment)
        );
        if record.terminated {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }

    let warnings: Vec<_> = batch.stats.batch_warnings().collect();
    if !warnings.is_empty() {
        println!("  {}", format!("Warnings: {}", warnings.len()).yellow());
        for warning in warnings {
            println!("    - {}", warning);
        }
    }
    if batch.stats.cells_defaulted > 0 || batch.stats.rows_skipped > 0 {
        println!(
            "  {} cells defaulted, {} rows skipped",
            batch.stats.cells_defaulted, batch.stats.rows_skipped
        );
    }
}

fn print_ranking(table: &RankingTable) {
    println!();
    println!("{} ({:?} layout)", "Ranking".bold(), table.layout);
    for entry in &table.entries {
        let position = entry
            .position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        let line = format!(
            "  {:>3}  {:<28} {:>14} {:>6} {:>12}",
            position,
            entry.name,
            money(entry.total_sales),
            entry.leads,
            entry.handle_time
        );
        if entry.is_total {
            println!("{}", line.bold());
        } else if entry.terminated == Some(true) {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }
    if table.stats.rows_skipped > 0 {
        println!("  {} rows skipped", table.stats.rows_skipped);
    }
}

fn print_load_report(report: &LoadReport) {
    for batch in &report.batches {
        print_team(batch);
    }
    if let Some(table) = &report.ranking {
        print_ranking(table);
    }

    println!();
    println!("{}", "Load Summary".bold().green());
    println!("{}", "============".green());
    println!(
        "Teams loaded: {} of {}",
        report.loaded_teams(),
        report.batches.len() + report.failures.len()
    );
    println!("Records: {}", report.total_records());
    println!("Total sales: {}", money(report.total_sales()));
    println!("Warnings: {}", report.warning_count());
    println!("Elapsed: {}", HumanDuration(report.elapsed));

    if !report.failures.is_empty() {
        println!("{}", format!("Failures: {}", report.failures.len()).red());
        for failure in &report.failures {
            println!("  - {}", failure);
        }
    }
}
