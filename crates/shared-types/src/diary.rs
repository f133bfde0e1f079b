use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::case::CaseType;

// ── Entry status ────────────────────────────────────────────────────

/// Status of a diary entry, derived from (deadline, completion, reference
/// availability). Recomputed on every load; the persisted value is display
/// state, not ground truth.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    AwaitingReference,
    Pending,
    Overdue,
    CompletedOnTime,
    CompletedLate,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingReference => "awaiting_reference",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
            Self::CompletedOnTime => "completed_on_time",
            Self::CompletedLate => "completed_late",
        }
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Template types ──────────────────────────────────────────────────

/// One line of a diary template: a reusable, case-type-scoped definition
/// of a single diary obligation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateEntry {
    /// Stable template-local identifier; becomes the dedup key
    /// (`entry_id`) on materialized entries.
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    /// Free-text reference-point label, resolved against the case record.
    pub reference_point: String,
    /// Free-text offset expression, e.g. "+21 Working Days".
    pub time: String,
    pub order: Option<i32>,
}

/// A diary template: an ordered list of template entries for one case type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryTemplate {
    pub id: Uuid,
    pub name: String,
    pub case_type: CaseType,
    pub is_default: bool,
    pub entries: Vec<TemplateEntry>,
}

// ── Case diary entry ────────────────────────────────────────────────

/// A case-bound, mutable instance of a template entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDiaryEntry {
    pub id: Uuid,
    pub case_id: Uuid,
    /// Originating `TemplateEntry::id`; deduplication key.
    pub entry_id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub reference_point: String,
    pub time_offset: String,
    /// Derived, but sticky: the first persisted computation wins until
    /// explicitly cleared.
    pub deadline_date: Option<NaiveDate>,
    pub status: EntryStatus,
    pub notes: String,
    pub completed_date: Option<NaiveDate>,
    pub order: Option<i32>,
    /// Used only for dedup tie-breaking between duplicate generations.
    pub created_date: DateTime<Utc>,
}

/// Fields for bulk-creating a diary entry; the store stamps `id` and
/// `created_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDiaryEntry {
    pub case_id: Uuid,
    pub entry_id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    pub reference_point: String,
    pub time_offset: String,
    pub deadline_date: Option<NaiveDate>,
    pub status: EntryStatus,
    pub notes: String,
    pub order: Option<i32>,
}

/// User edit to a diary entry: notes and completion are the only fields a
/// user may mutate directly. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateDiaryEntryRequest {
    pub notes: Option<String>,
    pub completed_date: Option<NaiveDate>,
}

/// Partial update for a diary entry. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiaryEntryPatch {
    pub notes: Option<String>,
    pub completed_date: Option<NaiveDate>,
    pub status: Option<EntryStatus>,
    pub deadline_date: Option<NaiveDate>,
}

// ── Display views ───────────────────────────────────────────────────

/// Reconciled diary split into the pre-/post-appointment views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiaryView {
    pub pre_appointment: Vec<CaseDiaryEntry>,
    pub post_appointment: Vec<CaseDiaryEntry>,
}

impl DiaryView {
    /// All entries of both views, pre-appointment first.
    pub fn all(&self) -> impl Iterator<Item = &CaseDiaryEntry> {
        self.pre_appointment.iter().chain(self.post_appointment.iter())
    }
}

/// Aggregate status counts for a case's diary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiaryStats {
    pub total: i64,
    pub awaiting_reference: i64,
    pub pending: i64,
    pub overdue: i64,
    pub completed_on_time: i64,
    pub completed_late: i64,
    pub completion_rate: f64,
}

impl DiaryStats {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a CaseDiaryEntry>,
    {
        let mut stats = Self::default();
        for entry in entries {
            stats.total += 1;
            match entry.status {
                EntryStatus::AwaitingReference => stats.awaiting_reference += 1,
                EntryStatus::Pending => stats.pending += 1,
                EntryStatus::Overdue => stats.overdue += 1,
                EntryStatus::CompletedOnTime => stats.completed_on_time += 1,
                EntryStatus::CompletedLate => stats.completed_late += 1,
            }
        }
        let completed = stats.completed_on_time + stats.completed_late;
        stats.completion_rate = if stats.total > 0 {
            completed as f64 / stats.total as f64
        } else {
            0.0
        };
        stats
    }
}
