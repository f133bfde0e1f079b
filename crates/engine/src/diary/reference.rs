//! Reference-point resolution
//!
//! Maps free-text, human-authored reference-point labels onto the date
//! fields of a case record: exact lookup against a static table of known
//! label variants first, keyword fallback heuristics second. Labels are
//! authored inside diary templates, so spelling drifts; the fallbacks
//! catch variants the table has not seen yet.

use chrono::NaiveDate;
use shared_types::{CaseDateField, InsolvencyCase};

use CaseDateField::*;

/// Known label variants, normalized (trimmed + lowercased).
const EXACT_LABELS: &[(&str, CaseDateField)] = &[
    // Appointment
    ("date of appointment", AppointmentDate),
    ("appointment date", AppointmentDate),
    ("appointment", AppointmentDate),
    // Board meeting
    ("date of board meeting", BoardMeetingDate),
    ("board meeting", BoardMeetingDate),
    ("board meeting date", BoardMeetingDate),
    // Board resolution
    ("date of board resolution", BoardResolutionPassedDate),
    ("board resolution", BoardResolutionPassedDate),
    ("board resolution passed", BoardResolutionPassedDate),
    ("board resolution passed date", BoardResolutionPassedDate),
    ("date board resolution passed", BoardResolutionPassedDate),
    // Members meeting
    ("date of members meeting", MembersMeetingDate),
    ("date of members' meeting", MembersMeetingDate),
    ("members meeting", MembersMeetingDate),
    ("members' meeting", MembersMeetingDate),
    // Members resolutions
    ("date of members resolutions", DateOfMembersResolutions),
    ("date of members' resolutions", DateOfMembersResolutions),
    ("members resolutions", DateOfMembersResolutions),
    ("members' resolutions", DateOfMembersResolutions),
    ("members resolution", DateOfMembersResolutions),
    ("members' resolution", DateOfMembersResolutions),
    // Creditors meeting / decision
    ("creditors meeting", CreditorsDecisionsDate),
    ("creditors' meeting", CreditorsDecisionsDate),
    ("date of creditors meeting", CreditorsDecisionsDate),
    ("creditors decision", CreditorsDecisionsDate),
    ("creditors' decision", CreditorsDecisionsDate),
    ("date of creditors decision", CreditorsDecisionsDate),
    ("creditors decisions date", CreditorsDecisionsDate),
    // Creditors decision passed
    ("creditors decision passed", CreditorsDecisionPassedDate),
    ("creditors' decision passed", CreditorsDecisionPassedDate),
    ("date creditors decision passed", CreditorsDecisionPassedDate),
    ("creditors decision passed date", CreditorsDecisionPassedDate),
    // Subsequent creditors decision
    ("subsequent creditors decision", SubsequentDecisionPassedDate),
    ("subsequent creditors' decision", SubsequentDecisionPassedDate),
    ("date of subsequent creditors decision", SubsequentDecisionPassedDate),
    ("subsequent decision passed", SubsequentDecisionPassedDate),
    ("subsequent decision passed date", SubsequentDecisionPassedDate),
];

/// Keyword fallback candidates for a normalized label, in precedence
/// order; the first rule whose keywords all appear wins. Returns an empty
/// slice when no rule matches.
pub fn fallback_candidates(label: &str) -> &'static [CaseDateField] {
    if label.contains("appointment") {
        &[AppointmentDate]
    } else if label.contains("board") && label.contains("resolution") {
        &[BoardResolutionPassedDate, BoardMeetingDate]
    } else if label.contains("board") && label.contains("meeting") {
        &[BoardMeetingDate, BoardResolutionPassedDate]
    } else if label.contains("members")
        && (label.contains("resolution") || label.contains("winding up"))
    {
        &[DateOfMembersResolutions, MembersMeetingDate]
    } else if label.contains("members") && label.contains("meeting") {
        &[MembersMeetingDate, DateOfMembersResolutions]
    } else if label.contains("creditor") {
        &[CreditorsDecisionsDate, CreditorsDecisionPassedDate]
    } else {
        &[]
    }
}

/// Resolve a reference-point label to a concrete date on the case.
///
/// Returns `None` when the label is empty or unknown, or when every
/// candidate field is unset: the "awaiting reference" condition.
pub fn resolve(label: &str, case: &InsolvencyCase) -> Option<NaiveDate> {
    let normalized = label.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if let Some((_, field)) = EXACT_LABELS.iter().find(|(l, _)| *l == normalized) {
        if let Some(date) = case.date_field(*field) {
            return Some(date);
        }
        // Exact label hit but the field is unset: the fallbacks may still
        // find a sibling field that is.
    }

    fallback_candidates(&normalized)
        .iter()
        .find_map(|field| case.date_field(*field))
}
