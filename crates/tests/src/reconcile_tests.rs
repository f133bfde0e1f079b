//! Reconciliation tests: dedup, idempotence, deadline stickiness, the
//! pre/post-appointment split, and display ordering.

use std::collections::HashMap;

use engine::diary::{dedup_latest, reconcile};
use shared_types::{CaseDiaryEntry, CaseType, EntryStatus, InsolvencyCase};

use crate::common::{case, date, diary_entry, timestamp};

fn cvl_with_appointment() -> InsolvencyCase {
    InsolvencyCase {
        appointment_date: Some(date(2024, 1, 10)),
        ..case(CaseType::Cvl)
    }
}

#[test]
fn dedup_keeps_latest_created_date() {
    let c = cvl_with_appointment();
    let older = CaseDiaryEntry {
        notes: "older".to_string(),
        created_date: timestamp(2024, 1, 1, 9),
        ..diary_entry(c.id, "e1", "Date of Appointment", "+5 Days")
    };
    let newer = CaseDiaryEntry {
        notes: "newer".to_string(),
        created_date: timestamp(2024, 1, 2, 9),
        ..diary_entry(c.id, "e1", "Date of Appointment", "+5 Days")
    };

    let kept = dedup_latest(vec![older, newer]);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].notes, "newer");
}

#[test]
fn dedup_keeps_latest_regardless_of_input_order() {
    let c = cvl_with_appointment();
    let older = CaseDiaryEntry {
        notes: "older".to_string(),
        created_date: timestamp(2024, 1, 1, 9),
        ..diary_entry(c.id, "e1", "Date of Appointment", "+5 Days")
    };
    let newer = CaseDiaryEntry {
        notes: "newer".to_string(),
        created_date: timestamp(2024, 1, 2, 9),
        ..diary_entry(c.id, "e1", "Date of Appointment", "+5 Days")
    };

    let kept = dedup_latest(vec![newer, older]);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].notes, "newer");
}

#[test]
fn dedup_tie_keeps_first_seen() {
    let c = cvl_with_appointment();
    let first = CaseDiaryEntry {
        notes: "first".to_string(),
        ..diary_entry(c.id, "e1", "Date of Appointment", "+5 Days")
    };
    let second = CaseDiaryEntry {
        notes: "second".to_string(),
        ..diary_entry(c.id, "e1", "Date of Appointment", "+5 Days")
    };

    let kept = dedup_latest(vec![first, second]);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].notes, "first");
}

#[test]
fn dedup_leaves_distinct_entry_ids_alone() {
    let c = cvl_with_appointment();
    let entries = vec![
        diary_entry(c.id, "e1", "Date of Appointment", "+5 Days"),
        diary_entry(c.id, "e2", "Date of Appointment", "+10 Days"),
        diary_entry(c.id, "e3", "Date of Appointment", "+15 Days"),
    ];
    assert_eq!(dedup_latest(entries).len(), 3);
}

#[test]
fn computes_missing_deadline_from_case_dates() {
    let c = cvl_with_appointment();
    let entries = vec![diary_entry(c.id, "e1", "Date of Appointment", "+14 Working Days")];

    let view = reconcile(&c, entries, date(2024, 1, 15));
    assert_eq!(view.post_appointment.len(), 1);
    assert_eq!(
        view.post_appointment[0].deadline_date,
        Some(date(2024, 1, 30))
    );
    assert_eq!(view.post_appointment[0].status, EntryStatus::Pending);
}

#[test]
fn persisted_deadline_is_not_recomputed() {
    let c = cvl_with_appointment();
    let entry = CaseDiaryEntry {
        deadline_date: Some(date(2024, 2, 15)),
        ..diary_entry(c.id, "e1", "Date of Appointment", "+14 Working Days")
    };

    let view = reconcile(&c, vec![entry], date(2024, 1, 15));
    assert_eq!(
        view.post_appointment[0].deadline_date,
        Some(date(2024, 2, 15))
    );
}

#[test]
fn stale_status_is_recomputed_every_pass() {
    let c = cvl_with_appointment();
    let entry = CaseDiaryEntry {
        deadline_date: Some(date(2024, 1, 5)),
        status: EntryStatus::Pending,
        ..diary_entry(c.id, "e1", "Date of Appointment", "+5 Days")
    };

    let view = reconcile(&c, vec![entry], date(2024, 6, 10));
    assert_eq!(view.post_appointment[0].status, EntryStatus::Overdue);
}

#[test]
fn persisted_deadline_with_unresolved_reference_is_awaiting() {
    // The appointment date was cleared after the deadline had been
    // persisted; rule 1 wins.
    let c = case(CaseType::Cvl);
    let entry = CaseDiaryEntry {
        deadline_date: Some(date(2024, 1, 30)),
        ..diary_entry(c.id, "e1", "Date of Appointment", "+14 Working Days")
    };

    let view = reconcile(&c, vec![entry], date(2024, 1, 15));
    assert_eq!(
        view.post_appointment[0].status,
        EntryStatus::AwaitingReference
    );
}

#[test]
fn unknown_reference_does_not_poison_the_batch() {
    let c = cvl_with_appointment();
    let entries = vec![
        diary_entry(c.id, "bad", "Gazette Notice", "+5 Days"),
        diary_entry(c.id, "good", "Date of Appointment", "+5 Days"),
    ];

    let view = reconcile(&c, entries, date(2024, 1, 11));
    let by_id: HashMap<_, _> = view
        .all()
        .map(|e| (e.entry_id.clone(), e.status))
        .collect();
    assert_eq!(by_id["bad"], EntryStatus::AwaitingReference);
    assert_eq!(by_id["good"], EntryStatus::Pending);
}

#[test]
fn reconcile_twice_yields_identical_results() {
    let c = cvl_with_appointment();
    let entries = vec![
        diary_entry(c.id, "e1", "Date of Appointment", "+14 Working Days"),
        diary_entry(c.id, "e2", "Date of Appointment", "-5 Days"),
        diary_entry(c.id, "e3", "Gazette Notice", "+5 Days"),
    ];
    let today = date(2024, 1, 15);

    fn snapshot(
        view: &shared_types::DiaryView,
    ) -> HashMap<String, (Option<chrono::NaiveDate>, EntryStatus)> {
        view.all()
            .map(|e| (e.entry_id.clone(), (e.deadline_date, e.status)))
            .collect()
    }

    let first = reconcile(&c, entries, today);
    let round_trip: Vec<CaseDiaryEntry> = first.all().cloned().collect();
    let second = reconcile(&c, round_trip, today);

    assert_eq!(snapshot(&first), snapshot(&second));
}

#[test]
fn negative_offset_belongs_to_pre_appointment_view() {
    let c = cvl_with_appointment();
    let entries = vec![diary_entry(c.id, "e1", "Date of Appointment", "-5 Days")];

    let view = reconcile(&c, entries, date(2024, 1, 15));
    assert_eq!(view.pre_appointment.len(), 1);
    assert!(view.post_appointment.is_empty());
}

#[test]
fn positive_offset_belongs_to_post_appointment_view() {
    let c = cvl_with_appointment();
    let entries = vec![diary_entry(c.id, "e1", "Date of Appointment", "+5 Days")];

    let view = reconcile(&c, entries, date(2024, 1, 15));
    assert!(view.pre_appointment.is_empty());
    assert_eq!(view.post_appointment.len(), 1);
}

#[test]
fn pre_appointment_category_never_appears_post() {
    let c = cvl_with_appointment();
    let entry = CaseDiaryEntry {
        category: "Pre Appointment".to_string(),
        ..diary_entry(c.id, "e1", "Date of Appointment", "+5 Days")
    };

    let view = reconcile(&c, vec![entry], date(2024, 1, 15));
    assert_eq!(view.pre_appointment.len(), 1);
    assert!(view.post_appointment.is_empty());
}

#[test]
fn completion_marker_is_recategorized_and_sorts_first() {
    let c = cvl_with_appointment();
    let marker = CaseDiaryEntry {
        category: "Pre Appointment".to_string(),
        title: "Pre App Tasks All Completed".to_string(),
        order: Some(50),
        ..diary_entry(c.id, "marker", "Date of Appointment", "+1 Day")
    };
    let ordinary = CaseDiaryEntry {
        order: Some(1),
        ..diary_entry(c.id, "e1", "Date of Appointment", "+5 Days")
    };

    let view = reconcile(&c, vec![ordinary, marker], date(2024, 1, 15));
    assert_eq!(view.post_appointment.len(), 2);
    assert_eq!(view.post_appointment[0].entry_id, "marker");
    assert_eq!(view.post_appointment[0].category, "Post Appointment");
}

#[test]
fn entries_sort_by_order_with_missing_order_last() {
    let c = cvl_with_appointment();
    let entries = vec![
        CaseDiaryEntry {
            order: None,
            ..diary_entry(c.id, "unordered", "Date of Appointment", "+5 Days")
        },
        CaseDiaryEntry {
            order: Some(2),
            ..diary_entry(c.id, "second", "Date of Appointment", "+5 Days")
        },
        CaseDiaryEntry {
            order: Some(1),
            ..diary_entry(c.id, "first", "Date of Appointment", "+5 Days")
        },
    ];

    let view = reconcile(&c, entries, date(2024, 1, 15));
    let ids: Vec<_> = view
        .post_appointment
        .iter()
        .map(|e| e.entry_id.as_str())
        .collect();
    assert_eq!(ids, ["first", "second", "unordered"]);
}

#[test]
fn equal_order_ties_break_on_deadline() {
    let c = cvl_with_appointment();
    let entries = vec![
        CaseDiaryEntry {
            order: Some(1),
            ..diary_entry(c.id, "later", "Date of Appointment", "+20 Days")
        },
        CaseDiaryEntry {
            order: Some(1),
            ..diary_entry(c.id, "sooner", "Date of Appointment", "+5 Days")
        },
        CaseDiaryEntry {
            order: Some(1),
            ..diary_entry(c.id, "no-deadline", "Gazette Notice", "+5 Days")
        },
    ];

    let view = reconcile(&c, entries, date(2024, 1, 15));
    let ids: Vec<_> = view
        .post_appointment
        .iter()
        .map(|e| e.entry_id.as_str())
        .collect();
    assert_eq!(ids, ["sooner", "later", "no-deadline"]);
}
