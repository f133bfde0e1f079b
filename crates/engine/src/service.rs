//! Diary orchestration over the entity-store port
//!
//! Thin async layer that wires the pure diary pipeline to the store:
//! first-view materialization behind the generation guard, per-load
//! reconciliation, and user edits with status recomputed at write time.

use chrono::Utc;
use shared_types::{
    AppError, CaseDiaryEntry, DiaryEntryPatch, DiaryStats, DiaryView, UpdateDiaryEntryRequest,
};
use uuid::Uuid;

use crate::diary::{deadline, reconcile, reference, status};
use crate::store::DiaryStore;

pub struct DiaryService<S> {
    store: S,
}

impl<S: DiaryStore> DiaryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load a case's diary for display, generating entries on first view.
    ///
    /// Generation runs only when the case has zero entries and is not
    /// locked; after a successful non-empty generation the case is
    /// stamped locked. Entries that enter the pass without a deadline
    /// and gain one have it persisted; later passes leave it alone.
    pub async fn load_diary(&self, case_id: Uuid) -> Result<DiaryView, AppError> {
        let case = self
            .store
            .case(case_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("case {case_id} not found")))?;

        let mut entries = self.store.entries_for_case(case_id).await?;
        if entries.is_empty() && !case.diary_locked {
            let templates = self.store.templates_for_case_type(case.case_type).await?;
            let drafts = reconcile::materialize(&case, &templates);
            if !drafts.is_empty() {
                entries = self.store.create_entries(&drafts).await?;
                self.store.set_diary_locked(case_id, true).await?;
                tracing::info!(
                    case_id = %case_id,
                    count = entries.len(),
                    "diary entries generated"
                );
            }
        }

        let newly_computed: Vec<Uuid> = entries
            .iter()
            .filter(|e| e.deadline_date.is_none())
            .map(|e| e.id)
            .collect();

        let today = Utc::now().date_naive();
        let view = reconcile::reconcile(&case, entries, today);

        for entry in view.all() {
            if newly_computed.contains(&entry.id) {
                if let Some(deadline_date) = entry.deadline_date {
                    self.store
                        .update_entry(
                            entry.id,
                            DiaryEntryPatch {
                                deadline_date: Some(deadline_date),
                                status: Some(entry.status),
                                ..Default::default()
                            },
                        )
                        .await?;
                }
            }
        }

        Ok(view)
    }

    /// Apply a user edit (notes and/or completion) to one entry. Status
    /// is recomputed before the write so the stored value is consistent
    /// with the stored completion date.
    pub async fn update_entry(
        &self,
        entry_id: Uuid,
        req: UpdateDiaryEntryRequest,
    ) -> Result<CaseDiaryEntry, AppError> {
        let entry = self
            .store
            .entry(entry_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("diary entry {entry_id} not found")))?;
        let case = self
            .store
            .case(entry.case_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("case {} not found", entry.case_id)))?;

        let completed = req.completed_date.or(entry.completed_date);
        let deadline_date = entry.deadline_date.or_else(|| {
            deadline::compute_deadline(&entry.reference_point, &entry.time_offset, &case)
        });
        let reference_resolved = reference::resolve(&entry.reference_point, &case).is_some();
        let today = Utc::now().date_naive();
        let new_status = status::classify(deadline_date, completed, reference_resolved, today);

        let patch = DiaryEntryPatch {
            notes: req.notes,
            completed_date: req.completed_date,
            status: Some(new_status),
            // First successful computation wins; never overwrite.
            deadline_date: if entry.deadline_date.is_none() {
                deadline_date
            } else {
                None
            },
        };
        self.store
            .update_entry(entry_id, patch)
            .await?
            .ok_or_else(|| AppError::not_found(format!("diary entry {entry_id} not found")))
    }

    /// Aggregate status counts over the reconciled working set.
    pub async fn diary_stats(&self, case_id: Uuid) -> Result<DiaryStats, AppError> {
        let view = self.load_diary(case_id).await?;
        Ok(DiaryStats::from_entries(view.all()))
    }
}
