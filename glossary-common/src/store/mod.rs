//! Term store: the sole authority for reading and writing glossary entries
//!
//! The store is a trait so the HTTP layer can run against SQLite in
//! production and an in-memory map in tests. One implementation is chosen
//! at process start and injected; they are never mixed at runtime.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryTermStore;
pub use sqlite::SqliteTermStore;

use crate::{DraftTerm, Result, Term};
use async_trait::async_trait;

/// Persistence operations over glossary terms
///
/// The dataset is small (tens to low hundreds of records), so reads are
/// full scans with in-Rust filtering; no indexing or ranking is needed.
#[async_trait]
pub trait TermStore: Send + Sync {
    /// Every stored term, order unspecified
    async fn get_all(&self) -> Result<Vec<Term>>;

    /// Term by id; `Ok(None)` when absent (absence is not an error)
    async fn get_by_id(&self, id: &str) -> Result<Option<Term>>;

    /// All terms whose section exactly equals `section` (case-sensitive)
    async fn get_by_section(&self, section: &str) -> Result<Vec<Term>>;

    /// Terms where `query` is a case-insensitive substring of the headword,
    /// definition, English equivalent, or usage example. Fails with
    /// [`crate::Error::Validation`] when `query` is empty.
    async fn search(&self, query: &str) -> Result<Vec<Term>>;

    /// Validate and insert one draft, assigning a fresh id
    async fn create(&self, draft: DraftTerm) -> Result<Term>;

    /// Validate and insert a batch as one logical operation, returning the
    /// stored terms in input order. Empty input returns `[]` without
    /// touching the store.
    async fn create_many(&self, drafts: Vec<DraftTerm>) -> Result<Vec<Term>>;

    /// Remove every term; idempotent
    async fn delete_all(&self) -> Result<()>;

    /// Atomically replace the whole dataset: validate all drafts, then
    /// wipe + bulk-insert so a failure partway leaves the prior state
    /// intact.
    async fn replace_all(&self, drafts: Vec<DraftTerm>) -> Result<Vec<Term>>;

    /// Sorted distinct section labels
    async fn sections(&self) -> Result<Vec<String>>;
}

/// Reject empty search queries: an empty query is not a meaningful filter
pub(crate) fn ensure_query(query: &str) -> Result<()> {
    if query.is_empty() {
        return Err(crate::Error::Validation(
            "search query must not be empty".into(),
        ));
    }
    Ok(())
}

/// Validate a batch up front so nothing is written when any draft is bad
pub(crate) fn validate_all(drafts: Vec<DraftTerm>) -> Result<Vec<DraftTerm>> {
    drafts.into_iter().map(DraftTerm::validate).collect()
}
