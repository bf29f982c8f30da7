//! Data models for sales report ingestion
//!
//! This module contains the core data structures produced by the report
//! parser: per-employee performance records, team KPI summaries and the
//! company-wide leaderboard. All of them are created once per ingestion call
//! and never mutated afterwards.

use crate::app::services::report_parser::layout::{EmployeeLayout, RankingLayout};
use crate::app::services::report_parser::stats::ParseStats;
use crate::constants::{RANK_SENTINEL, ZERO_DURATION, period_labels};
use serde::{Deserialize, Serialize};

// =============================================================================
// Period
// =============================================================================

/// Work shift an employee record belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Period {
    Morning,
    Afternoon,
    FullDay,
    #[default]
    Undefined,
}

impl Period {
    /// Map an already trimmed and upper-cased period label onto its tag
    ///
    /// The morning label shows up both correctly encoded and with the
    /// accented vowel replaced by U+FFFD; both resolve to [`Period::Morning`].
    pub fn from_label(label: &str) -> Self {
        match label {
            period_labels::MORNING
            | period_labels::MORNING_REPLACEMENT
            | period_labels::MORNING_PLAIN => Period::Morning,
            period_labels::AFTERNOON => Period::Afternoon,
            period_labels::FULL_DAY => Period::FullDay,
            _ => Period::Undefined,
        }
    }

    /// Canonical label for display
    pub fn label(&self) -> &'static str {
        match self {
            Period::Morning => period_labels::MORNING,
            Period::Afternoon => period_labels::AFTERNOON,
            Period::FullDay => period_labels::FULL_DAY,
            Period::Undefined => period_labels::UNDEFINED,
        }
    }

    /// Summary scope key used by scoped team summaries
    pub fn scope_key(&self) -> Option<&'static str> {
        match self {
            Period::Morning => Some("manha"),
            Period::Afternoon => Some("tarde"),
            _ => None,
        }
    }
}

// =============================================================================
// Employee Record
// =============================================================================

/// One row of performance data for one period slice of one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    /// Team the record belongs to, supplied by the caller
    pub supervisor_id: String,

    /// Employee name, the routing key to the detail view
    pub name: String,

    /// Company-wide rank, or [`RANK_SENTINEL`] when absent
    pub rank_position: u32,

    /// Portability sales in currency units
    pub portability_sales: f64,

    /// Percent of target as a fraction (3% is 0.03)
    pub target_attainment: f64,

    /// Margin sold in currency units
    pub margin_value: f64,

    /// Margin/card units sold
    pub margin_count: u32,

    /// Average sale in currency units
    pub average_sale: f64,

    pub inbound_leads: u32,
    pub inbound_handle_time: String,
    pub inbound_post_call_time: String,
    pub inbound_talk_time: String,

    /// Outbound leads (zero for layouts without outbound metrics)
    pub outbound_leads: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_handle_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_post_call_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_talk_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_contact_date: Option<String>,

    pub period: Period,

    /// Normalized period text as found in the export
    pub period_label: String,

    /// True only when the source cell is the literal `TRUE`
    pub terminated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absence_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
}

impl EmployeeRecord {
    /// Create a record with every metric at its default
    pub fn new(supervisor_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            supervisor_id: supervisor_id.into(),
            name: name.into(),
            rank_position: RANK_SENTINEL,
            portability_sales: 0.0,
            target_attainment: 0.0,
            margin_value: 0.0,
            margin_count: 0,
            average_sale: 0.0,
            inbound_leads: 0,
            inbound_handle_time: ZERO_DURATION.to_string(),
            inbound_post_call_time: ZERO_DURATION.to_string(),
            inbound_talk_time: ZERO_DURATION.to_string(),
            outbound_leads: 0,
            outbound_handle_time: None,
            outbound_post_call_time: None,
            outbound_talk_time: None,
            min_contact_date: None,
            period: Period::Undefined,
            period_label: period_labels::UNDEFINED.to_string(),
            terminated: false,
            late_count: None,
            absence_count: None,
            hire_date: None,
        }
    }

    /// Whether the export carried a usable rank for this employee
    pub fn has_rank(&self) -> bool {
        self.rank_position != RANK_SENTINEL
    }
}

// =============================================================================
// Team Summary
// =============================================================================

/// Single-scope team summary read from legacy exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatSummary {
    pub total_sales: f64,
    pub average_attainment: f64,
    pub margin_total: f64,
    pub average_ticket: f64,
    pub handle_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_position: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover: Option<f64>,
}

impl Default for FlatSummary {
    fn default() -> Self {
        Self {
            total_sales: 0.0,
            average_attainment: 0.0,
            margin_total: 0.0,
            average_ticket: 0.0,
            handle_time: ZERO_DURATION.to_string(),
            rank_position: None,
            turnover: None,
        }
    }
}

/// KPI block for one scope of a scoped summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiBlock {
    pub total_sales: f64,
    pub attainment: f64,
    pub margin_count: f64,
    pub average_ticket: f64,
    pub handle_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hires: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminations: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_sold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_position: Option<u32>,
}

impl Default for KpiBlock {
    fn default() -> Self {
        Self {
            total_sales: 0.0,
            attainment: 0.0,
            margin_count: 0.0,
            average_ticket: 0.0,
            handle_time: ZERO_DURATION.to_string(),
            turnover: None,
            hires: None,
            terminations: None,
            margin_sold: None,
            rank_position: None,
        }
    }
}

/// Team summary keyed by scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopedSummary {
    pub geral: KpiBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manha: Option<KpiBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tarde: Option<KpiBlock>,
}

impl ScopedSummary {
    /// Look a block up by its scope key (`geral`, `manha` or `tarde`)
    pub fn scope(&self, key: &str) -> Option<&KpiBlock> {
        match key {
            "geral" => Some(&self.geral),
            "manha" => self.manha.as_ref(),
            "tarde" => self.tarde.as_ref(),
            _ => None,
        }
    }
}

/// Aggregate KPIs attached to a team batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamSummary {
    Flat(FlatSummary),
    Scoped(ScopedSummary),
}

impl TeamSummary {
    /// Total sales of the whole team
    pub fn total_sales(&self) -> f64 {
        match self {
            TeamSummary::Flat(flat) => flat.total_sales,
            TeamSummary::Scoped(scoped) => scoped.geral.total_sales,
        }
    }

    /// Team attainment as a fraction
    pub fn attainment(&self) -> f64 {
        match self {
            TeamSummary::Flat(flat) => flat.average_attainment,
            TeamSummary::Scoped(scoped) => scoped.geral.attainment,
        }
    }

    /// Margin units sold by the whole team
    pub fn margin(&self) -> f64 {
        match self {
            TeamSummary::Flat(flat) => flat.margin_total,
            TeamSummary::Scoped(scoped) => scoped.geral.margin_count,
        }
    }

    /// Team rank, when the export carries one
    pub fn rank_position(&self) -> Option<u32> {
        match self {
            TeamSummary::Flat(flat) => flat.rank_position,
            TeamSummary::Scoped(scoped) => scoped.geral.rank_position,
        }
    }
}

/// Where the summary of a batch came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    /// Read from the footer value row
    Footer,
    /// Aggregated from the employee records
    Fallback,
    /// Input was rejected; default summary
    Empty,
}

// =============================================================================
// Team Batch
// =============================================================================

/// Result of ingesting one team export
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamBatch {
    pub team: String,
    pub layout: EmployeeLayout,
    pub records: Vec<EmployeeRecord>,
    pub summary: TeamSummary,
    pub summary_source: SummarySource,
    pub stats: ParseStats,
}

impl TeamBatch {
    /// Batch with no records and a default summary for the layout
    pub fn empty(team: impl Into<String>, layout: EmployeeLayout, stats: ParseStats) -> Self {
        Self {
            team: team.into(),
            layout,
            records: Vec::new(),
            summary: layout.empty_summary(),
            summary_source: SummarySource::Empty,
            stats,
        }
    }

    /// Whether the batch holds no employee records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of employees that are still active
    pub fn active_records(&self) -> impl Iterator<Item = &EmployeeRecord> {
        self.records.iter().filter(|record| !record.terminated)
    }

    /// Records of one period, best seller first
    pub fn records_for_period(&self, period: Period) -> Vec<&EmployeeRecord> {
        let mut records: Vec<&EmployeeRecord> = self
            .records
            .iter()
            .filter(|record| record.period == period)
            .collect();
        records.sort_by(|a, b| b.portability_sales.total_cmp(&a.portability_sales));
        records
    }

    /// First record with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&EmployeeRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    /// Number of records flagged as terminated
    pub fn terminated_count(&self) -> usize {
        self.records.iter().filter(|record| record.terminated).count()
    }
}

// =============================================================================
// Ranking
// =============================================================================

/// One row of the company-wide leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub is_total: bool,

    /// Numeric rank; always `None` on the grand-total row
    pub position: Option<u32>,

    pub name: String,
    pub total_sales: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attainment: Option<f64>,
    pub leads: u32,
    pub handle_time: String,
    pub post_call_time: String,
    pub talk_time: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absence_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
}

impl RankingEntry {
    /// Create an entry with every metric at its default
    pub fn new(name: impl Into<String>, is_total: bool) -> Self {
        Self {
            is_total,
            position: None,
            name: name.into(),
            total_sales: 0.0,
            attainment: None,
            leads: 0,
            handle_time: ZERO_DURATION.to_string(),
            post_call_time: ZERO_DURATION.to_string(),
            talk_time: ZERO_DURATION.to_string(),
            period: None,
            terminated: None,
            late_count: None,
            absence_count: None,
            hire_date: None,
        }
    }
}

/// Parsed leaderboard export
#[derive(Debug, Clone, Serialize)]
pub struct RankingTable {
    pub layout: RankingLayout,
    pub entries: Vec<RankingEntry>,
    pub stats: ParseStats,
}

impl RankingTable {
    /// The grand-total row, if the export has one
    pub fn total(&self) -> Option<&RankingEntry> {
        self.entries.iter().find(|entry| entry.is_total)
    }

    /// Every non-total row in export order
    pub fn employees(&self) -> impl Iterator<Item = &RankingEntry> {
        self.entries.iter().filter(|entry| !entry.is_total)
    }
}
