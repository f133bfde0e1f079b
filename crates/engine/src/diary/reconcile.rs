//! Diary materialization and reconciliation
//!
//! Materialization expands a case type's default template into case-bound
//! entries, once. Reconciliation runs on every load: deduplicate by
//! template entry id, compute any missing deadline, classify every
//! status, and split the result into the pre-/post-appointment views.
//! A second concurrent materialization produces duplicates; the dedup
//! step neutralizes them for display, so correctness lives on the read
//! path rather than behind a write lock.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared_types::{
    CaseDiaryEntry, DiaryTemplate, DiaryView, EntryStatus, InsolvencyCase, NewDiaryEntry,
};

use super::{deadline, reference, status};

/// Sort key for entries with no explicit order.
const ORDER_SENTINEL: i32 = 999_999;

/// Entries in this category (case-insensitive) belong to the
/// pre-appointment view only, unless they are the completion marker.
const PRE_APPOINTMENT_CATEGORY: &str = "pre appointment";

/// Title fragment of the entry that marks the pre-appointment checklist
/// as finished; it is shown in the post-appointment view under this
/// category and sorts first there.
const PRE_APP_COMPLETED_MARKER: &str = "pre app tasks all completed";
const POST_APPOINTMENT_CATEGORY: &str = "Post Appointment";

/// Expand the default diary template for the case's type into new entry
/// records.
///
/// Returns an empty vec when no matching default template exists; the
/// case is left unlocked so generation can be retried once a template is
/// authored.
pub fn materialize(case: &InsolvencyCase, templates: &[DiaryTemplate]) -> Vec<NewDiaryEntry> {
    let Some(template) = templates
        .iter()
        .find(|t| t.case_type == case.case_type && t.is_default)
    else {
        tracing::warn!(
            case_id = %case.id,
            case_type = %case.case_type,
            "no default diary template for case type, skipping generation"
        );
        return Vec::new();
    };

    template
        .entries
        .iter()
        .map(|entry| NewDiaryEntry {
            case_id: case.id,
            entry_id: entry.id.clone(),
            category: entry.category.clone(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            reference_point: entry.reference_point.clone(),
            time_offset: entry.time.clone(),
            deadline_date: None,
            status: EntryStatus::Pending,
            notes: String::new(),
            order: entry.order,
        })
        .collect()
}

/// Keep exactly one entry per `entry_id`: the latest `created_date` wins;
/// ties keep the first seen. Input order of the survivors is preserved.
pub fn dedup_latest(entries: Vec<CaseDiaryEntry>) -> Vec<CaseDiaryEntry> {
    let mut kept: Vec<CaseDiaryEntry> = Vec::with_capacity(entries.len());
    let mut index: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        if let Some(&i) = index.get(&entry.entry_id) {
            if entry.created_date > kept[i].created_date {
                kept[i] = entry;
            }
        } else {
            index.insert(entry.entry_id.clone(), kept.len());
            kept.push(entry);
        }
    }
    kept
}

/// Refresh one entry's derived fields against the current case record.
/// A persisted deadline wins over a fresh computation; status is always
/// recomputed.
fn refresh(entry: &mut CaseDiaryEntry, case: &InsolvencyCase, today: NaiveDate) {
    let reference_resolved = reference::resolve(&entry.reference_point, case).is_some();
    if entry.deadline_date.is_none() {
        entry.deadline_date =
            deadline::compute_deadline(&entry.reference_point, &entry.time_offset, case);
    }
    entry.status = status::classify(
        entry.deadline_date,
        entry.completed_date,
        reference_resolved,
        today,
    );
}

fn is_completion_marker(entry: &CaseDiaryEntry) -> bool {
    entry.title.to_lowercase().contains(PRE_APP_COMPLETED_MARKER)
}

fn is_pre_appointment_only(entry: &CaseDiaryEntry) -> bool {
    entry.category.trim().eq_ignore_ascii_case(PRE_APPOINTMENT_CATEGORY)
        && !is_completion_marker(entry)
}

/// Display sort: completion marker first (post view only), then template
/// order ascending with missing order last, tie-broken by deadline
/// ascending with missing deadline last.
fn display_order(entry: &CaseDiaryEntry, marker_first: bool) -> (u8, i32, NaiveDate) {
    let lead = u8::from(!(marker_first && is_completion_marker(entry)));
    (
        lead,
        entry.order.unwrap_or(ORDER_SENTINEL),
        entry.deadline_date.unwrap_or(NaiveDate::MAX),
    )
}

/// Reconcile a case's fetched entries for display. Idempotent: running it
/// twice over the same input (with unchanged case dates) yields identical
/// deadlines and statuses.
pub fn reconcile(
    case: &InsolvencyCase,
    entries: Vec<CaseDiaryEntry>,
    today: NaiveDate,
) -> DiaryView {
    let mut entries = dedup_latest(entries);
    for entry in &mut entries {
        refresh(entry, case, today);
    }

    let mut view = DiaryView::default();
    for mut entry in entries {
        let negative_offset = entry.time_offset.contains('-');
        if negative_offset || is_pre_appointment_only(&entry) {
            view.pre_appointment.push(entry);
        } else {
            if is_completion_marker(&entry) {
                entry.category = POST_APPOINTMENT_CATEGORY.to_string();
            }
            view.post_appointment.push(entry);
        }
    }

    view.pre_appointment.sort_by_key(|e| display_order(e, false));
    view.post_appointment.sort_by_key(|e| display_order(e, true));
    view
}
