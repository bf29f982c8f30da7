//! Team summary extraction
//!
//! The footer value row is read by fixed offsets. When there is no footer, or
//! it reports a zero total, the summary is aggregated from the employee
//! records instead. Offsets are not self-describing, so the extractor checks
//! the row's shape and reports anything suspicious as a diagnostic; the footer
//! values still win.

use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::layout::{ColumnSpec, KpiBlockLayout, KpiField, SummaryLayout};
use super::normalizers::{looks_like_duration, normalize_duration, try_count, try_number};
use crate::app::models::{
    EmployeeRecord, FlatSummary, KpiBlock, Period, ScopedSummary, SummarySource, TeamSummary,
};
use crate::constants::ZERO_DURATION;

/// Summary with where it came from and what was noticed on the way
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOutcome {
    pub summary: TeamSummary,
    pub source: SummarySource,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the team summary from the footer row, or fall back to the records
///
/// `footer` pairs the value row with its row index, which diagnostics refer to.
pub fn summarize(
    footer: Option<(usize, &[String])>,
    records: &[EmployeeRecord],
    layout: SummaryLayout,
    tolerance: f64,
) -> SummaryOutcome {
    let mut diagnostics = Vec::new();

    let Some((row_index, values)) = footer else {
        return SummaryOutcome {
            summary: fallback_summary(records, layout),
            source: SummarySource::Fallback,
            diagnostics,
        };
    };

    let summary = extract_footer(values, layout, row_index, &mut diagnostics);

    if summary.total_sales() == 0.0 {
        diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::DegenerateFooter,
                "footer total is zero; aggregating employee records instead",
            )
            .at_row(row_index),
        );
        return SummaryOutcome {
            summary: fallback_summary(records, layout),
            source: SummarySource::Fallback,
            diagnostics,
        };
    }

    if !records.is_empty() {
        let recomputed: f64 = records.iter().map(|r| r.portability_sales).sum();
        if (summary.total_sales() - recomputed).abs() > tolerance {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::FooterDisagreement,
                    format!(
                        "footer total {:.2} differs from the sum of employee sales {:.2}",
                        summary.total_sales(),
                        recomputed
                    ),
                )
                .at_row(row_index),
            );
        }
    }

    SummaryOutcome {
        summary,
        source: SummarySource::Footer,
        diagnostics,
    }
}

/// Read a summary from the footer value row
pub fn extract_footer(
    values: &[String],
    layout: SummaryLayout,
    row_index: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> TeamSummary {
    match layout {
        SummaryLayout::Flat { fields } => {
            let mut reader = BlockReader::new(values, 0, row_index, "flat", diagnostics);
            reader.check_width(fields);
            TeamSummary::Flat(FlatSummary {
                total_sales: reader.number(fields, KpiField::TotalSales),
                average_attainment: reader.number(fields, KpiField::Attainment),
                margin_total: reader.number(fields, KpiField::MarginCount),
                average_ticket: reader.number(fields, KpiField::AverageTicket),
                handle_time: reader.duration(fields, KpiField::HandleTime),
                rank_position: reader.rank(fields, KpiField::RankPosition),
                turnover: reader.optional_number(fields, KpiField::Turnover),
            })
        }
        SummaryLayout::Scoped {
            blocks,
            rank_column,
        } => {
            let rank_position = values
                .get(rank_column)
                .and_then(|raw| positive_rank(raw));

            let mut scoped = ScopedSummary::default();
            for block in blocks {
                let is_overall = block.scope == "geral";
                if !is_overall && !block_present(values, block) {
                    continue;
                }

                let mut kpi = read_block(values, block, row_index, diagnostics, is_overall);
                kpi.rank_position = rank_position;

                match block.scope {
                    "geral" => scoped.geral = kpi,
                    "manha" => scoped.manha = Some(kpi),
                    "tarde" => scoped.tarde = Some(kpi),
                    _ => {}
                }
            }
            TeamSummary::Scoped(scoped)
        }
    }
}

/// Whether the row reaches a block and has something in it
fn block_present(values: &[String], block: &KpiBlockLayout) -> bool {
    let end = (block.start + block.width()).min(values.len());
    block.start < end && values[block.start..end].iter().any(|c| !c.trim().is_empty())
}

fn read_block(
    values: &[String],
    block: &KpiBlockLayout,
    row_index: usize,
    diagnostics: &mut Vec<Diagnostic>,
    check_width: bool,
) -> KpiBlock {
    let fields = block.fields;
    let mut reader = BlockReader::new(values, block.start, row_index, block.scope, diagnostics);
    if check_width {
        reader.check_width(fields);
    }
    KpiBlock {
        total_sales: reader.number(fields, KpiField::TotalSales),
        attainment: reader.number(fields, KpiField::Attainment),
        margin_count: reader.number(fields, KpiField::MarginCount),
        average_ticket: reader.number(fields, KpiField::AverageTicket),
        handle_time: reader.duration(fields, KpiField::HandleTime),
        turnover: reader.optional_number(fields, KpiField::Turnover),
        hires: reader.optional_count(fields, KpiField::Hires),
        terminations: reader.optional_count(fields, KpiField::Terminations),
        margin_sold: reader.optional_number(fields, KpiField::MarginSold),
        rank_position: None,
    }
}

/// Reads the fields of one block, recording suspicious cells
struct BlockReader<'a> {
    values: &'a [String],
    start: usize,
    row_index: usize,
    scope: &'static str,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> BlockReader<'a> {
    fn new(
        values: &'a [String],
        start: usize,
        row_index: usize,
        scope: &'static str,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            values,
            start,
            row_index,
            scope,
            diagnostics,
        }
    }

    fn cell(&self, fields: &[ColumnSpec<KpiField>], field: KpiField) -> Option<(usize, &'a str)> {
        let offset = fields.iter().find(|spec| spec.field == field)?.column;
        let column = self.start + offset;
        self.values.get(column).map(|raw| (column, raw.as_str()))
    }

    fn misaligned(&mut self, column: usize, field: KpiField, message: String) {
        self.diagnostics.push(
            Diagnostic::new(DiagnosticKind::FooterMisaligned, message)
                .at_row(self.row_index)
                .at_column(column)
                .for_field(format!("{}.{}", self.scope, field.name())),
        );
    }

    /// Report a row too short for the mandatory fields of the block
    fn check_width(&mut self, fields: &[ColumnSpec<KpiField>]) {
        let required = fields
            .iter()
            .filter(|spec| {
                matches!(
                    spec.field,
                    KpiField::TotalSales
                        | KpiField::Attainment
                        | KpiField::MarginCount
                        | KpiField::AverageTicket
                        | KpiField::HandleTime
                )
            })
            .map(|spec| self.start + spec.column + 1)
            .max()
            .unwrap_or(0);

        if self.values.len() < required {
            self.diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::FooterMisaligned,
                    format!(
                        "footer row has {} cells, the {} block needs {}",
                        self.values.len(),
                        self.scope,
                        required
                    ),
                )
                .at_row(self.row_index),
            );
        }
    }

    fn number(&mut self, fields: &[ColumnSpec<KpiField>], field: KpiField) -> f64 {
        self.optional_number(fields, field).unwrap_or(0.0)
    }

    fn optional_number(&mut self, fields: &[ColumnSpec<KpiField>], field: KpiField) -> Option<f64> {
        let (column, raw) = self.cell(fields, field)?;
        let outcome = try_number(raw);
        if let Some(reason) = outcome.reason() {
            let message = reason.to_string();
            self.misaligned(column, field, message);
        }
        Some(outcome.value())
    }

    fn optional_count(&mut self, fields: &[ColumnSpec<KpiField>], field: KpiField) -> Option<u32> {
        let (column, raw) = self.cell(fields, field)?;
        let outcome = try_count(raw);
        if let Some(reason) = outcome.reason() {
            let message = reason.to_string();
            self.misaligned(column, field, message);
        }
        Some(outcome.value())
    }

    fn duration(&mut self, fields: &[ColumnSpec<KpiField>], field: KpiField) -> String {
        match self.cell(fields, field) {
            Some((column, raw)) => {
                if !looks_like_duration(raw) {
                    self.misaligned(
                        column,
                        field,
                        format!("expected a duration, found '{}'", raw.trim()),
                    );
                }
                normalize_duration(raw)
            }
            None => ZERO_DURATION.to_string(),
        }
    }

    fn rank(&mut self, fields: &[ColumnSpec<KpiField>], field: KpiField) -> Option<u32> {
        self.cell(fields, field).and_then(|(_, raw)| positive_rank(raw))
    }
}

/// Rank cell read leniently: anything but a positive integer is no rank
fn positive_rank(raw: &str) -> Option<u32> {
    super::normalizers::parse_leading_int(raw)
        .filter(|rank| *rank >= 1)
        .and_then(|rank| u32::try_from(rank).ok())
}

// =============================================================================
// Fallback Aggregation
// =============================================================================

/// Summary computed from the records when the footer cannot be used
pub fn fallback_summary(records: &[EmployeeRecord], layout: SummaryLayout) -> TeamSummary {
    match layout {
        SummaryLayout::Flat { .. } => {
            let block = aggregate_block(records.iter());
            TeamSummary::Flat(FlatSummary {
                total_sales: block.total_sales,
                average_attainment: block.attainment,
                margin_total: block.margin_count,
                average_ticket: block.average_ticket,
                handle_time: block.handle_time,
                rank_position: None,
                turnover: None,
            })
        }
        SummaryLayout::Scoped { .. } => {
            let for_period = |period: Period| {
                let mut slice = records.iter().filter(|r| r.period == period).peekable();
                slice.peek().is_some().then(|| aggregate_block(slice))
            };
            TeamSummary::Scoped(ScopedSummary {
                geral: aggregate_block(records.iter()),
                manha: for_period(Period::Morning),
                tarde: for_period(Period::Afternoon),
            })
        }
    }
}

/// Sum of sales and margin units, mean attainment and mean ticket
///
/// Attendance-only fields are left unset.
pub fn aggregate_block<'r>(records: impl Iterator<Item = &'r EmployeeRecord>) -> KpiBlock {
    let mut count = 0usize;
    let mut total_sales = 0.0;
    let mut margin_count = 0.0;
    let mut attainment_sum = 0.0;
    let mut ticket_sum = 0.0;

    for record in records {
        count += 1;
        total_sales += record.portability_sales;
        margin_count += f64::from(record.margin_count);
        attainment_sum += record.target_attainment;
        ticket_sum += record.average_sale;
    }

    let mean = |sum: f64| if count == 0 { 0.0 } else { sum / count as f64 };

    KpiBlock {
        total_sales,
        attainment: mean(attainment_sum),
        margin_count,
        average_ticket: mean(ticket_sum),
        ..KpiBlock::default()
    }
}
