//! SQLite-backed term store
//!
//! All mutation is whole-record: single inserts, batch inserts, and the
//! full replace used by spreadsheet import. Batch operations run inside a
//! transaction so a mid-batch failure leaves the prior dataset intact.
//!
//! Search and substring matching happen in Rust after a full-table read:
//! SQLite's LIKE only case-folds ASCII, which is useless for the Russian
//! half of the glossary, and the dataset is small enough that a scan is
//! the simplest correct answer.

use crate::store::{ensure_query, validate_all, TermStore};
use crate::{DraftTerm, Error, Result, Term};
use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

/// [`TermStore`] implementation over a SQLite connection pool
#[derive(Debug, Clone)]
pub struct SqliteTermStore {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct TermRow {
    id: String,
    section: String,
    term: String,
    definition: String,
    usage_example: Option<String>,
    english_equivalent: Option<String>,
    related_terms: Option<String>,
    source: Option<String>,
}

impl TermRow {
    fn into_term(self) -> Result<Term> {
        let related_terms = self
            .related_terms
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| Error::Internal(format!("corrupt related_terms column: {}", e)))?;

        Ok(Term {
            id: self.id,
            section: self.section,
            term: self.term,
            definition: self.definition,
            usage_example: self.usage_example,
            english_equivalent: self.english_equivalent,
            related_terms,
            source: self.source,
        })
    }
}

const SELECT_TERMS: &str = "SELECT id, section, term, definition, usage_example, \
     english_equivalent, related_terms, source FROM terms";

impl SqliteTermStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Insert one term via any executor (pool or open transaction)
async fn insert_term<'e, E>(executor: E, term: &Term) -> Result<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let related_json = term
        .related_terms
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| Error::Internal(format!("failed to encode related_terms: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO terms (id, section, term, definition, usage_example,
                           english_equivalent, related_terms, source)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&term.id)
    .bind(&term.section)
    .bind(&term.term)
    .bind(&term.definition)
    .bind(&term.usage_example)
    .bind(&term.english_equivalent)
    .bind(&related_json)
    .bind(&term.source)
    .execute(executor)
    .await?;

    Ok(())
}

#[async_trait]
impl TermStore for SqliteTermStore {
    async fn get_all(&self) -> Result<Vec<Term>> {
        let rows = sqlx::query_as::<_, TermRow>(SELECT_TERMS)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(TermRow::into_term).collect()
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Term>> {
        let row = sqlx::query_as::<_, TermRow>(&format!("{} WHERE id = ?", SELECT_TERMS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(TermRow::into_term).transpose()
    }

    async fn get_by_section(&self, section: &str) -> Result<Vec<Term>> {
        // SQLite TEXT comparison is binary, which gives the required
        // case-sensitive exact match
        let rows = sqlx::query_as::<_, TermRow>(&format!("{} WHERE section = ?", SELECT_TERMS))
            .bind(section)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(TermRow::into_term).collect()
    }

    async fn search(&self, query: &str) -> Result<Vec<Term>> {
        ensure_query(query)?;
        let query_lower = query.to_lowercase();
        let all = self.get_all().await?;
        Ok(all.into_iter().filter(|t| t.matches(&query_lower)).collect())
    }

    async fn create(&self, draft: DraftTerm) -> Result<Term> {
        let term = draft.validate()?.into_term(Uuid::new_v4().to_string());
        insert_term(&self.pool, &term).await?;
        Ok(term)
    }

    async fn create_many(&self, drafts: Vec<DraftTerm>) -> Result<Vec<Term>> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        let validated = validate_all(drafts)?;

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(validated.len());
        for draft in validated {
            let term = draft.into_term(Uuid::new_v4().to_string());
            insert_term(&mut *tx, &term).await?;
            created.push(term);
        }
        tx.commit().await?;

        Ok(created)
    }

    async fn delete_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM terms").execute(&self.pool).await?;
        Ok(())
    }

    async fn replace_all(&self, drafts: Vec<DraftTerm>) -> Result<Vec<Term>> {
        let validated = validate_all(drafts)?;

        // Wipe and re-insert in one transaction: either the whole new
        // dataset lands or the old one stays
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM terms").execute(&mut *tx).await?;
        let mut created = Vec::with_capacity(validated.len());
        for draft in validated {
            let term = draft.into_term(Uuid::new_v4().to_string());
            insert_term(&mut *tx, &term).await?;
            created.push(term);
        }
        tx.commit().await?;

        Ok(created)
    }

    async fn sections(&self) -> Result<Vec<String>> {
        let sections: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT section FROM terms ORDER BY section")
                .fetch_all(&self.pool)
                .await?;
        Ok(sections)
    }
}
