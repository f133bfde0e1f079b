//! Entity-store port
//!
//! The persistence layer is an external collaborator; this trait is the
//! engine's seam to it. All computational failures are absorbed into
//! entry status upstream; only store-level I/O failures travel through
//! these `Result`s.

use shared_types::{
    AppError, CaseDiaryEntry, CaseType, DiaryEntryPatch, DiaryTemplate, InsolvencyCase,
    NewDiaryEntry,
};
use uuid::Uuid;

mod memory;
pub use memory::MemoryStore;

/// Entity operations the diary engine needs from the store.
#[allow(async_fn_in_trait)]
pub trait DiaryStore: Send + Sync {
    /// Fetch a case record by id.
    async fn case(&self, case_id: Uuid) -> Result<Option<InsolvencyCase>, AppError>;

    /// Flip the one-time generation guard on a case.
    async fn set_diary_locked(&self, case_id: Uuid, locked: bool) -> Result<(), AppError>;

    /// All diary templates for a case type, in store order.
    async fn templates_for_case_type(
        &self,
        case_type: CaseType,
    ) -> Result<Vec<DiaryTemplate>, AppError>;

    /// All diary entries bound to a case.
    async fn entries_for_case(&self, case_id: Uuid) -> Result<Vec<CaseDiaryEntry>, AppError>;

    /// Bulk-create entries in a single operation; the store stamps ids
    /// and creation timestamps. Returns the created rows.
    async fn create_entries(
        &self,
        entries: &[NewDiaryEntry],
    ) -> Result<Vec<CaseDiaryEntry>, AppError>;

    /// Fetch a single diary entry by id.
    async fn entry(&self, entry_id: Uuid) -> Result<Option<CaseDiaryEntry>, AppError>;

    /// Partial update; `None` patch fields are left unchanged. Returns
    /// the updated row or `None` if not found.
    async fn update_entry(
        &self,
        entry_id: Uuid,
        patch: DiaryEntryPatch,
    ) -> Result<Option<CaseDiaryEntry>, AppError>;
}
