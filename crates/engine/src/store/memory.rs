//! In-memory entity store
//!
//! Reference implementation of [`DiaryStore`] backing the test suite. A
//! production deployment points the engine at the hosted entity service
//! instead; this keeps the same observable contract (stamped ids and
//! creation timestamps, COALESCE-style partial updates).

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use shared_types::{
    AppError, CaseDiaryEntry, CaseType, DiaryEntryPatch, DiaryTemplate, InsolvencyCase,
    NewDiaryEntry,
};
use uuid::Uuid;

use super::DiaryStore;

#[derive(Default)]
struct State {
    cases: HashMap<Uuid, InsolvencyCase>,
    templates: Vec<DiaryTemplate>,
    entries: HashMap<Uuid, CaseDiaryEntry>,
}

/// Mutex-backed in-memory store.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a case record.
    pub fn insert_case(&self, case: InsolvencyCase) {
        self.guard().cases.insert(case.id, case);
    }

    /// Seed a diary template.
    pub fn insert_template(&self, template: DiaryTemplate) {
        self.guard().templates.push(template);
    }

    /// Seed a pre-existing diary entry (bypasses id/timestamp stamping).
    pub fn insert_entry(&self, entry: CaseDiaryEntry) {
        self.guard().entries.insert(entry.id, entry);
    }
}

impl DiaryStore for MemoryStore {
    async fn case(&self, case_id: Uuid) -> Result<Option<InsolvencyCase>, AppError> {
        Ok(self.guard().cases.get(&case_id).cloned())
    }

    async fn set_diary_locked(&self, case_id: Uuid, locked: bool) -> Result<(), AppError> {
        let mut state = self.guard();
        let case = state
            .cases
            .get_mut(&case_id)
            .ok_or_else(|| AppError::not_found(format!("case {case_id} not found")))?;
        case.diary_locked = locked;
        case.updated_at = Utc::now();
        Ok(())
    }

    async fn templates_for_case_type(
        &self,
        case_type: CaseType,
    ) -> Result<Vec<DiaryTemplate>, AppError> {
        Ok(self
            .guard()
            .templates
            .iter()
            .filter(|t| t.case_type == case_type)
            .cloned()
            .collect())
    }

    async fn entries_for_case(&self, case_id: Uuid) -> Result<Vec<CaseDiaryEntry>, AppError> {
        let mut entries: Vec<CaseDiaryEntry> = self
            .guard()
            .entries
            .values()
            .filter(|e| e.case_id == case_id)
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary; return a stable order.
        entries.sort_by_key(|e| (e.created_date, e.id));
        Ok(entries)
    }

    async fn create_entries(
        &self,
        entries: &[NewDiaryEntry],
    ) -> Result<Vec<CaseDiaryEntry>, AppError> {
        let mut state = self.guard();
        let now = Utc::now();
        let mut created = Vec::with_capacity(entries.len());
        for new in entries {
            let entry = CaseDiaryEntry {
                id: Uuid::new_v4(),
                case_id: new.case_id,
                entry_id: new.entry_id.clone(),
                category: new.category.clone(),
                title: new.title.clone(),
                description: new.description.clone(),
                reference_point: new.reference_point.clone(),
                time_offset: new.time_offset.clone(),
                deadline_date: new.deadline_date,
                status: new.status,
                notes: new.notes.clone(),
                completed_date: None,
                order: new.order,
                created_date: now,
            };
            state.entries.insert(entry.id, entry.clone());
            created.push(entry);
        }
        Ok(created)
    }

    async fn entry(&self, entry_id: Uuid) -> Result<Option<CaseDiaryEntry>, AppError> {
        Ok(self.guard().entries.get(&entry_id).cloned())
    }

    async fn update_entry(
        &self,
        entry_id: Uuid,
        patch: DiaryEntryPatch,
    ) -> Result<Option<CaseDiaryEntry>, AppError> {
        let mut state = self.guard();
        let Some(entry) = state.entries.get_mut(&entry_id) else {
            return Ok(None);
        };
        if let Some(notes) = patch.notes {
            entry.notes = notes;
        }
        if let Some(completed_date) = patch.completed_date {
            entry.completed_date = Some(completed_date);
        }
        if let Some(status) = patch.status {
            entry.status = status;
        }
        if let Some(deadline_date) = patch.deadline_date {
            entry.deadline_date = Some(deadline_date);
        }
        Ok(Some(entry.clone()))
    }
}
