//! Deadline computation
//!
//! Combines reference-point resolution, offset parsing, and working-day
//! arithmetic into a concrete deadline date. Every failure mode is a
//! value, never a panic: an entry the engine cannot compute yields `None`
//! and the rest of the batch is unaffected.

use chrono::{Duration, Months, NaiveDate};
use shared_types::InsolvencyCase;

use super::offset::{parse_offset, Offset, OffsetUnit};
use super::reference;
use super::working_days::add_working_days;

/// Compute the deadline for one diary entry against the current case
/// record.
///
/// Returns `None` when the reference point does not (yet) resolve to a
/// known date (the "awaiting reference" condition), or when the offset
/// arithmetic leaves the calendar range. An unparseable offset falls back
/// to the reference date unchanged.
pub fn compute_deadline(
    reference_point: &str,
    time_offset: &str,
    case: &InsolvencyCase,
) -> Option<NaiveDate> {
    if reference_point.trim().is_empty() || time_offset.trim().is_empty() {
        return None;
    }

    let base = reference::resolve(reference_point, case)?;

    let Some(offset) = parse_offset(time_offset) else {
        tracing::warn!(
            time_offset,
            reference_point,
            "unparseable diary offset, using reference date as-is"
        );
        return Some(base);
    };

    apply_offset(base, offset)
}

fn apply_offset(base: NaiveDate, offset: Offset) -> Option<NaiveDate> {
    match offset.unit {
        OffsetUnit::WorkingDay => Some(add_working_days(base, offset.magnitude)),
        OffsetUnit::Day => {
            base.checked_add_signed(Duration::try_days(i64::from(offset.magnitude))?)
        }
        OffsetUnit::Month => add_months_signed(base, offset.magnitude),
        OffsetUnit::Year => add_months_signed(base, offset.magnitude.checked_mul(12)?),
    }
}

/// Calendar month arithmetic with chrono's month-end rollover semantics
/// (Jan 31 + 1 month = Feb 28/29).
fn add_months_signed(base: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        base.checked_add_months(Months::new(months as u32))
    } else {
        base.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}
