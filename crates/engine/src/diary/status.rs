//! Status classification
//!
//! Pure function of (deadline, completion, reference availability, today);
//! re-derivable from stored data at any time. Callers compute `today` once
//! per pass so every entry in a batch is judged against the same day.

use chrono::NaiveDate;
use shared_types::EntryStatus;

/// Classify a diary entry.
pub fn classify(
    deadline: Option<NaiveDate>,
    completed: Option<NaiveDate>,
    reference_resolved: bool,
    today: NaiveDate,
) -> EntryStatus {
    let Some(deadline) = deadline else {
        return EntryStatus::AwaitingReference;
    };
    if !reference_resolved {
        return EntryStatus::AwaitingReference;
    }

    match completed {
        Some(done) if done <= deadline => EntryStatus::CompletedOnTime,
        Some(_) => EntryStatus::CompletedLate,
        None if today > deadline => EntryStatus::Overdue,
        None => EntryStatus::Pending,
    }
}
