//! Employee row mapping
//!
//! Maps one employee row onto an [`EmployeeRecord`] by walking the layout's
//! column table. A bad cell never aborts the row: the field takes its default
//! and the reason is returned alongside the record.

use super::layout::{EmployeeField, EmployeeLayout};
use super::normalizers::{
    DefaultReason, FieldOutcome, normalize_duration, normalize_period, normalize_text, parse_flag,
    try_count, try_number, try_rank,
};
use crate::app::models::{EmployeeRecord, Period};

/// A field that fell back to its default
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefault {
    pub field: EmployeeField,
    pub column: usize,
    pub reason: DefaultReason,
}

/// A mapped row and the defaults applied while mapping it
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord {
    pub record: EmployeeRecord,
    pub defaults: Vec<FieldDefault>,
}

/// Map an employee row according to `layout`
///
/// `team` is attached to the record as its supervisor; it is never read from
/// the row.
pub fn map_employee_row(
    row: &[String],
    team: &str,
    layout: EmployeeLayout,
    rank_sentinel: u32,
) -> MappedRecord {
    let mut record = EmployeeRecord::new(team, "");
    let mut defaults = Vec::new();

    for spec in layout.columns() {
        let reason = match row.get(spec.column) {
            Some(raw) => apply_field(&mut record, spec.field, raw, rank_sentinel),
            None => {
                apply_missing(&mut record, spec.field, rank_sentinel);
                Some(DefaultReason::MissingCell)
            }
        };

        if let Some(reason) = reason {
            defaults.push(FieldDefault {
                field: spec.field,
                column: spec.column,
                reason,
            });
        }
    }

    MappedRecord { record, defaults }
}

fn assign<T>(slot: &mut T, outcome: FieldOutcome<T>) -> Option<DefaultReason> {
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

fn apply_field(
    record: &mut EmployeeRecord,
    field: EmployeeField,
    raw: &str,
    rank_sentinel: u32,
) -> Option<DefaultReason> {
    match field {
        EmployeeField::Name => {
            record.name = normalize_text(raw);
            None
        }
        EmployeeField::RankPosition => {
            assign(&mut record.rank_position, try_rank(raw, rank_sentinel))
        }
        EmployeeField::PortabilitySales => assign(&mut record.portability_sales, try_number(raw)),
        EmployeeField::TargetAttainment => assign(&mut record.target_attainment, try_number(raw)),
        EmployeeField::MarginValue => assign(&mut record.margin_value, try_number(raw)),
        EmployeeField::MarginCount => assign(&mut record.margin_count, try_count(raw)),
        EmployeeField::AverageSale => assign(&mut record.average_sale, try_number(raw)),
        EmployeeField::InboundLeads => assign(&mut record.inbound_leads, try_count(raw)),
        EmployeeField::InboundHandleTime => {
            record.inbound_handle_time = normalize_duration(raw);
            None
        }
        EmployeeField::InboundPostCallTime => {
            record.inbound_post_call_time = normalize_duration(raw);
            None
        }
        EmployeeField::InboundTalkTime => {
            record.inbound_talk_time = normalize_duration(raw);
            None
        }
        EmployeeField::OutboundLeads => assign(&mut record.outbound_leads, try_count(raw)),
        EmployeeField::OutboundHandleTime => {
            record.outbound_handle_time = Some(normalize_duration(raw));
            None
        }
        EmployeeField::OutboundPostCallTime => {
            record.outbound_post_call_time = Some(normalize_duration(raw));
            None
        }
        EmployeeField::OutboundTalkTime => {
            record.outbound_talk_time = Some(normalize_duration(raw));
            None
        }
        EmployeeField::MinContactDate => {
            record.min_contact_date = Some(normalize_text(raw));
            None
        }
        EmployeeField::Period => {
            let (period, label) = normalize_period(raw);
            let unrecognized = period == Period::Undefined && !raw.trim().is_empty();
            record.period = period;
            record.period_label = label;
            unrecognized.then(|| DefaultReason::Unparsable(raw.trim().to_string()))
        }
        EmployeeField::Terminated => {
            record.terminated = parse_flag(raw);
            None
        }
        // Attendance counters may hold placeholders; kept verbatim
        EmployeeField::LateCount => {
            record.late_count = Some(raw.to_string());
            None
        }
        EmployeeField::AbsenceCount => {
            record.absence_count = Some(raw.to_string());
            None
        }
        EmployeeField::HireDate => {
            record.hire_date = Some(normalize_text(raw));
            None
        }
    }
}

/// Default for a column the row does not reach
fn apply_missing(record: &mut EmployeeRecord, field: EmployeeField, rank_sentinel: u32) {
    match field {
        // Optional text fields stay unset
        EmployeeField::MinContactDate
        | EmployeeField::LateCount
        | EmployeeField::AbsenceCount
        | EmployeeField::HireDate => {}
        EmployeeField::RankPosition => record.rank_position = rank_sentinel,
        _ => {
            apply_field(record, field, "", rank_sentinel);
        }
    }
}
