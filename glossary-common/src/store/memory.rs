//! In-memory term store
//!
//! Backs tests and ad-hoc runs without a database file. Same contract as
//! the SQLite store; a plain mutex suffices since no lock is held across
//! an await point.

use crate::store::{ensure_query, validate_all, TermStore};
use crate::{DraftTerm, Result, Term};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use uuid::Uuid;

/// Map-backed [`TermStore`] implementation
#[derive(Debug, Default)]
pub struct MemoryTermStore {
    terms: Mutex<HashMap<String, Term>>,
}

impl MemoryTermStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Term>> {
        // A poisoned lock means a panicked test thread; the map itself is
        // still consistent because every mutation is a single insert/clear.
        self.terms.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TermStore for MemoryTermStore {
    async fn get_all(&self) -> Result<Vec<Term>> {
        Ok(self.lock().values().cloned().collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Term>> {
        Ok(self.lock().get(id).cloned())
    }

    async fn get_by_section(&self, section: &str) -> Result<Vec<Term>> {
        Ok(self
            .lock()
            .values()
            .filter(|t| t.section == section)
            .cloned()
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Term>> {
        ensure_query(query)?;
        let query_lower = query.to_lowercase();
        Ok(self
            .lock()
            .values()
            .filter(|t| t.matches(&query_lower))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: DraftTerm) -> Result<Term> {
        let term = draft.validate()?.into_term(Uuid::new_v4().to_string());
        self.lock().insert(term.id.clone(), term.clone());
        Ok(term)
    }

    async fn create_many(&self, drafts: Vec<DraftTerm>) -> Result<Vec<Term>> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        let validated = validate_all(drafts)?;
        let mut map = self.lock();
        let mut created = Vec::with_capacity(validated.len());
        for draft in validated {
            let term = draft.into_term(Uuid::new_v4().to_string());
            map.insert(term.id.clone(), term.clone());
            created.push(term);
        }
        Ok(created)
    }

    async fn delete_all(&self) -> Result<()> {
        self.lock().clear();
        Ok(())
    }

    async fn replace_all(&self, drafts: Vec<DraftTerm>) -> Result<Vec<Term>> {
        let validated = validate_all(drafts)?;
        let mut map = self.lock();
        map.clear();
        let mut created = Vec::with_capacity(validated.len());
        for draft in validated {
            let term = draft.into_term(Uuid::new_v4().to_string());
            map.insert(term.id.clone(), term.clone());
            created.push(term);
        }
        Ok(created)
    }

    async fn sections(&self) -> Result<Vec<String>> {
        let sections: BTreeSet<String> =
            self.lock().values().map(|t| t.section.clone()).collect();
        Ok(sections.into_iter().collect())
    }
}
