//! Working-day arithmetic
//!
//! Adds or subtracts working days (Mon–Fri) one calendar day at a time,
//! skipping weekends. No holiday calendar is consulted. The day-stepping
//! loop keeps the weekend-boundary behavior easy to verify.

use chrono::{Datelike, NaiveDate, Weekday};

/// Check if a date is a weekend.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Add a signed number of working days to a date.
///
/// Steps one calendar day at a time in the direction of the sign and
/// counts only landings on Mon–Fri. A count of 0 returns the input
/// unchanged, even when it falls on a weekend.
pub fn add_working_days(date: NaiveDate, count: i32) -> NaiveDate {
    let mut current = date;
    let mut remaining = count.unsigned_abs();
    while remaining > 0 {
        let next = if count > 0 {
            current.succ_opt()
        } else {
            current.pred_opt()
        };
        // Calendar range exhausted; stay on the last representable day.
        let Some(next) = next else {
            return current;
        };
        current = next;
        if !is_weekend(current) {
            remaining -= 1;
        }
    }
    current
}
