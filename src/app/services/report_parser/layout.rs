//! Versioned column layouts for the known export formats
//!
//! Data columns are located purely by position. Each layout is a table of
//! `(field, column)` pairs, so supporting a new export revision means adding a
//! table here rather than touching the mappers, and tests can pin the exact
//! offsets of every version.

use serde::{Deserialize, Serialize};

use crate::app::models::{FlatSummary, ScopedSummary, TeamSummary};

/// A field extracted from a fixed column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec<F> {
    pub field: F,
    pub column: usize,
}

const fn col<F>(field: F, column: usize) -> ColumnSpec<F> {
    ColumnSpec { field, column }
}

/// Column index of `field` in `specs`, if the table has it
pub fn column_of<F: PartialEq>(specs: &[ColumnSpec<F>], field: F) -> Option<usize> {
    specs
        .iter()
        .find(|spec| spec.field == field)
        .map(|spec| spec.column)
}

// =============================================================================
// Employee Layouts
// =============================================================================

/// Fields of an employee row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeField {
    Name,
    RankPosition,
    PortabilitySales,
    TargetAttainment,
    MarginValue,
    MarginCount,
    AverageSale,
    InboundLeads,
    InboundHandleTime,
    InboundPostCallTime,
    InboundTalkTime,
    OutboundLeads,
    OutboundHandleTime,
    OutboundPostCallTime,
    OutboundTalkTime,
    MinContactDate,
    Period,
    Terminated,
    LateCount,
    AbsenceCount,
    HireDate,
}

impl EmployeeField {
    pub fn name(&self) -> &'static str {
        match self {
            EmployeeField::Name => "name",
            EmployeeField::RankPosition => "rankPosition",
            EmployeeField::PortabilitySales => "portabilitySales",
            EmployeeField::TargetAttainment => "targetAttainment",
            EmployeeField::MarginValue => "marginValue",
            EmployeeField::MarginCount => "marginCount",
            EmployeeField::AverageSale => "averageSale",
            EmployeeField::InboundLeads => "inboundLeads",
            EmployeeField::InboundHandleTime => "inboundHandleTime",
            EmployeeField::InboundPostCallTime => "inboundPostCallTime",
            EmployeeField::InboundTalkTime => "inboundTalkTime",
            EmployeeField::OutboundLeads => "outboundLeads",
            EmployeeField::OutboundHandleTime => "outboundHandleTime",
            EmployeeField::OutboundPostCallTime => "outboundPostCallTime",
            EmployeeField::OutboundTalkTime => "outboundTalkTime",
            EmployeeField::MinContactDate => "minContactDate",
            EmployeeField::Period => "period",
            EmployeeField::Terminated => "terminated",
            EmployeeField::LateCount => "lateCount",
            EmployeeField::AbsenceCount => "absenceCount",
            EmployeeField::HireDate => "hireDate",
        }
    }
}

/// Sales fields shared by every employee layout (columns 0-10)
const SHARED_COLUMNS: [ColumnSpec<EmployeeField>; 11] = [
    col(EmployeeField::Name, 0),
    col(EmployeeField::RankPosition, 1),
    col(EmployeeField::PortabilitySales, 2),
    col(EmployeeField::TargetAttainment, 3),
    col(EmployeeField::MarginValue, 4),
    col(EmployeeField::MarginCount, 5),
    col(EmployeeField::AverageSale, 6),
    col(EmployeeField::InboundLeads, 7),
    col(EmployeeField::InboundHandleTime, 8),
    col(EmployeeField::InboundPostCallTime, 9),
    col(EmployeeField::InboundTalkTime, 10),
];

/// Layout A: single period per file with outbound metrics
pub const LEGACY_COLUMNS: &[ColumnSpec<EmployeeField>] = &[
    SHARED_COLUMNS[0],
    SHARED_COLUMNS[1],
    SHARED_COLUMNS[2],
    SHARED_COLUMNS[3],
    SHARED_COLUMNS[4],
    SHARED_COLUMNS[5],
    SHARED_COLUMNS[6],
    SHARED_COLUMNS[7],
    SHARED_COLUMNS[8],
    SHARED_COLUMNS[9],
    SHARED_COLUMNS[10],
    col(EmployeeField::OutboundLeads, 12),
    col(EmployeeField::OutboundHandleTime, 13),
    col(EmployeeField::OutboundPostCallTime, 14),
    col(EmployeeField::OutboundTalkTime, 15),
    col(EmployeeField::Period, 17),
    col(EmployeeField::Terminated, 18),
];

/// Layout B: outbound metrics dropped, attendance data added
pub const ATTENDANCE_COLUMNS: &[ColumnSpec<EmployeeField>] = &[
    SHARED_COLUMNS[0],
    SHARED_COLUMNS[1],
    SHARED_COLUMNS[2],
    SHARED_COLUMNS[3],
    SHARED_COLUMNS[4],
    SHARED_COLUMNS[5],
    SHARED_COLUMNS[6],
    SHARED_COLUMNS[7],
    SHARED_COLUMNS[8],
    SHARED_COLUMNS[9],
    SHARED_COLUMNS[10],
    col(EmployeeField::MinContactDate, 11),
    col(EmployeeField::Period, 12),
    col(EmployeeField::Terminated, 13),
    col(EmployeeField::LateCount, 14),
    col(EmployeeField::AbsenceCount, 15),
    col(EmployeeField::HireDate, 16),
];

/// Column layout of a team export, chosen by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeLayout {
    /// Layout A: legacy single-period export with a flat footer
    #[default]
    Legacy,
    /// Layout B: current export with attendance data and a scoped footer
    Attendance,
}

impl EmployeeLayout {
    pub fn name(&self) -> &'static str {
        match self {
            EmployeeLayout::Legacy => "legacy",
            EmployeeLayout::Attendance => "attendance",
        }
    }

    /// Field-to-column table for this layout
    pub fn columns(&self) -> &'static [ColumnSpec<EmployeeField>] {
        match self {
            EmployeeLayout::Legacy => LEGACY_COLUMNS,
            EmployeeLayout::Attendance => ATTENDANCE_COLUMNS,
        }
    }

    /// Number of columns a complete row has
    pub fn width(&self) -> usize {
        self.columns()
            .iter()
            .map(|spec| spec.column + 1)
            .max()
            .unwrap_or(0)
    }

    /// Footer layout that goes with this employee layout
    pub fn summary_layout(&self) -> SummaryLayout {
        match self {
            EmployeeLayout::Legacy => SummaryLayout::Flat {
                fields: FLAT_SUMMARY_FIELDS,
            },
            EmployeeLayout::Attendance => SummaryLayout::Scoped {
                blocks: SCOPED_SUMMARY_BLOCKS,
                rank_column: SCOPED_RANK_COLUMN,
            },
        }
    }

    /// Default summary returned for rejected input
    pub fn empty_summary(&self) -> TeamSummary {
        match self {
            EmployeeLayout::Legacy => TeamSummary::Flat(FlatSummary::default()),
            EmployeeLayout::Attendance => TeamSummary::Scoped(ScopedSummary::default()),
        }
    }
}

// =============================================================================
// Summary Layouts
// =============================================================================

/// Fields of a footer KPI block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KpiField {
    TotalSales,
    Attainment,
    MarginCount,
    AverageTicket,
    HandleTime,
    Turnover,
    Hires,
    Terminations,
    MarginSold,
    RankPosition,
}

impl KpiField {
    pub fn name(&self) -> &'static str {
        match self {
            KpiField::TotalSales => "totalSales",
            KpiField::Attainment => "attainment",
            KpiField::MarginCount => "marginCount",
            KpiField::AverageTicket => "averageTicket",
            KpiField::HandleTime => "handleTime",
            KpiField::Turnover => "turnover",
            KpiField::Hires => "hires",
            KpiField::Terminations => "terminations",
            KpiField::MarginSold => "marginSold",
            KpiField::RankPosition => "rankPosition",
        }
    }
}

/// Legacy footer: one flat block
pub const FLAT_SUMMARY_FIELDS: &[ColumnSpec<KpiField>] = &[
    col(KpiField::TotalSales, 0),
    col(KpiField::Attainment, 1),
    col(KpiField::MarginCount, 2),
    col(KpiField::AverageTicket, 3),
    col(KpiField::HandleTime, 4),
    col(KpiField::RankPosition, 5),
    col(KpiField::Turnover, 6),
];

/// Overall block of the scoped footer, offsets relative to the block start
pub const OVERALL_BLOCK_FIELDS: &[ColumnSpec<KpiField>] = &[
    col(KpiField::TotalSales, 0),
    col(KpiField::Attainment, 1),
    col(KpiField::MarginCount, 2),
    col(KpiField::AverageTicket, 3),
    col(KpiField::HandleTime, 4),
    col(KpiField::Turnover, 5),
    col(KpiField::Hires, 6),
    col(KpiField::Terminations, 7),
    col(KpiField::MarginSold, 8),
];

/// Per-period blocks carry no turnover; later fields shift left by one
pub const PERIOD_BLOCK_FIELDS: &[ColumnSpec<KpiField>] = &[
    col(KpiField::TotalSales, 0),
    col(KpiField::Attainment, 1),
    col(KpiField::MarginCount, 2),
    col(KpiField::AverageTicket, 3),
    col(KpiField::HandleTime, 4),
    col(KpiField::Hires, 5),
    col(KpiField::Terminations, 6),
    col(KpiField::MarginSold, 7),
];

/// One KPI block of a scoped footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiBlockLayout {
    /// Scope key: `geral`, `manha` or `tarde`
    pub scope: &'static str,
    pub start: usize,
    pub fields: &'static [ColumnSpec<KpiField>],
}

impl KpiBlockLayout {
    /// Columns spanned by the block
    pub fn width(&self) -> usize {
        self.fields
            .iter()
            .map(|spec| spec.column + 1)
            .max()
            .unwrap_or(0)
    }
}

pub const SCOPED_SUMMARY_BLOCKS: &[KpiBlockLayout] = &[
    KpiBlockLayout {
        scope: "geral",
        start: 0,
        fields: OVERALL_BLOCK_FIELDS,
    },
    KpiBlockLayout {
        scope: "manha",
        start: 10,
        fields: PERIOD_BLOCK_FIELDS,
    },
    KpiBlockLayout {
        scope: "tarde",
        start: 19,
        fields: PERIOD_BLOCK_FIELDS,
    },
];

/// Rank column of the scoped footer, shared by every block
pub const SCOPED_RANK_COLUMN: usize = 28;

/// Shape of the footer value row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryLayout {
    Flat {
        fields: &'static [ColumnSpec<KpiField>],
    },
    Scoped {
        blocks: &'static [KpiBlockLayout],
        rank_column: usize,
    },
}

// =============================================================================
// Ranking Layouts
// =============================================================================

/// Fields of a leaderboard row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingField {
    Position,
    Name,
    TotalSales,
    Attainment,
    Leads,
    HandleTime,
    PostCallTime,
    TalkTime,
    Period,
    Terminated,
    LateCount,
    AbsenceCount,
    HireDate,
}

impl RankingField {
    pub fn name(&self) -> &'static str {
        match self {
            RankingField::Position => "position",
            RankingField::Name => "name",
            RankingField::TotalSales => "totalSales",
            RankingField::Attainment => "attainment",
            RankingField::Leads => "leads",
            RankingField::HandleTime => "handleTime",
            RankingField::PostCallTime => "postCallTime",
            RankingField::TalkTime => "talkTime",
            RankingField::Period => "period",
            RankingField::Terminated => "terminated",
            RankingField::LateCount => "lateCount",
            RankingField::AbsenceCount => "absenceCount",
            RankingField::HireDate => "hireDate",
        }
    }
}

pub const MINIMAL_RANKING_COLUMNS: &[ColumnSpec<RankingField>] = &[
    col(RankingField::Position, 0),
    col(RankingField::Name, 1),
    col(RankingField::TotalSales, 2),
    col(RankingField::Leads, 3),
    col(RankingField::HandleTime, 4),
    col(RankingField::PostCallTime, 5),
    col(RankingField::TalkTime, 6),
];

pub const EXTENDED_RANKING_COLUMNS: &[ColumnSpec<RankingField>] = &[
    col(RankingField::Position, 0),
    col(RankingField::Name, 1),
    col(RankingField::TotalSales, 2),
    col(RankingField::Attainment, 3),
    col(RankingField::Leads, 4),
    col(RankingField::HandleTime, 5),
    col(RankingField::PostCallTime, 6),
    col(RankingField::TalkTime, 7),
    col(RankingField::Period, 8),
    col(RankingField::Terminated, 9),
    col(RankingField::LateCount, 10),
    col(RankingField::AbsenceCount, 11),
    col(RankingField::HireDate, 12),
];

/// Column layout of the leaderboard export, chosen by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingLayout {
    #[default]
    Minimal,
    Extended,
}

impl RankingLayout {
    pub fn name(&self) -> &'static str {
        match self {
            RankingLayout::Minimal => "minimal",
            RankingLayout::Extended => "extended",
        }
    }

    pub fn columns(&self) -> &'static [ColumnSpec<RankingField>] {
        match self {
            RankingLayout::Minimal => MINIMAL_RANKING_COLUMNS,
            RankingLayout::Extended => EXTENDED_RANKING_COLUMNS,
        }
    }
}
