//! Leaderboard row mapping
//!
//! The company-wide leaderboard has one header row followed by one row per
//! employee and a grand-total row named `TOTAL`. Rows are mapped by position
//! using the [`RankingLayout`] table chosen by the caller.

use super::layout::{RankingField, RankingLayout};
use super::normalizers::{
    DefaultReason, FieldOutcome, normalize_duration, normalize_period, normalize_text, parse_flag,
    try_count, try_number, try_rank,
};
use crate::app::models::RankingEntry;
use crate::constants::TOTAL_ROW_LITERAL;

/// A leaderboard field that fell back to its default
#[derive(Debug, Clone, PartialEq)]
pub struct RankingDefault {
    pub field: RankingField,
    pub column: usize,
    pub reason: DefaultReason,
}

/// A mapped leaderboard row and the defaults applied while mapping it
#[derive(Debug, Clone, PartialEq)]
pub struct MappedEntry {
    pub entry: RankingEntry,
    pub defaults: Vec<RankingDefault>,
}

/// Name cell of a leaderboard row, trimmed
pub fn ranking_name(row: &[String], layout: RankingLayout) -> String {
    layout
        .columns()
        .iter()
        .find(|spec| spec.field == RankingField::Name)
        .and_then(|spec| row.get(spec.column))
        .map(|cell| normalize_text(cell))
        .unwrap_or_default()
}

/// Whether a name marks the grand-total row
pub fn is_total_name(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(TOTAL_ROW_LITERAL)
}

/// Map a leaderboard row, or `None` when the row has no name
///
/// The total row never carries a position, whatever its position cell holds.
pub fn map_ranking_row(row: &[String], layout: RankingLayout) -> Option<MappedEntry> {
    let name = ranking_name(row, layout);
    if name.is_empty() {
        return None;
    }

    let is_total = is_total_name(&name);
    let mut entry = RankingEntry::new(name, is_total);
    let mut defaults = Vec::new();

    for spec in layout.columns() {
        if spec.field == RankingField::Name || (is_total && spec.field == RankingField::Position) {
            continue;
        }

        let reason = match row.get(spec.column) {
            Some(raw) => apply_field(&mut entry, spec.field, raw),
            None => {
                apply_missing(&mut entry, spec.field);
                Some(DefaultReason::MissingCell)
            }
        };

        if let Some(reason) = reason {
            defaults.push(RankingDefault {
                field: spec.field,
                column: spec.column,
                reason,
            });
        }
    }

    Some(MappedEntry { entry, defaults })
}

fn reason_of<T>(outcome: FieldOutcome<T>, slot: &mut T) -> Option<DefaultReason> {
    match outcome {
        FieldOutcome::Parsed(value) => {
            *slot = value;
            None
        }
        FieldOutcome::Defaulted { value, reason } => {
            *slot = value;
            Some(reason)
        }
    }
}

fn apply_field(entry: &mut RankingEntry, field: RankingField, raw: &str) -> Option<DefaultReason> {
    match field {
        RankingField::Name => None,
        RankingField::Position => {
            // Unranked rows have an empty position rather than a sentinel
            if raw.trim().is_empty() {
                return None;
            }
            let outcome = try_rank(raw, 0);
            let reason = outcome.reason().cloned();
            let rank = outcome.value();
            entry.position = (rank > 0).then_some(rank);
            reason
        }
        RankingField::TotalSales => reason_of(try_number(raw), &mut entry.total_sales),
        RankingField::Attainment => {
            let mut value = 0.0;
            let reason = reason_of(try_number(raw), &mut value);
            entry.attainment = Some(value);
            reason
        }
        RankingField::Leads => reason_of(try_count(raw), &mut entry.leads),
        RankingField::HandleTime => {
            entry.handle_time = normalize_duration(raw);
            None
        }
        RankingField::PostCallTime => {
            entry.post_call_time = normalize_duration(raw);
            None
        }
        RankingField::TalkTime => {
            entry.talk_time = normalize_duration(raw);
            None
        }
        RankingField::Period => {
            let (period, _) = normalize_period(raw);
            entry.period = Some(period);
            None
        }
        RankingField::Terminated => {
            entry.terminated = Some(parse_flag(raw));
            None
        }
        RankingField::LateCount => {
            entry.late_count = Some(raw.to_string());
            None
        }
        RankingField::AbsenceCount => {
            entry.absence_count = Some(raw.to_string());
            None
        }
        RankingField::HireDate => {
            entry.hire_date = Some(normalize_text(raw));
            None
        }
    }
}

/// Default for a column the row does not reach; optional fields stay unset
fn apply_missing(entry: &mut RankingEntry, field: RankingField) {
    match field {
        RankingField::Attainment => entry.attainment = Some(0.0),
        RankingField::Terminated => entry.terminated = Some(false),
        _ => {}
    }
}
