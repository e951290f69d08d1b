//! # Glossary Common Library
//!
//! Shared code for the glossary service:
//! - Term entity and field validation
//! - Term store (trait + SQLite and in-memory implementations)
//! - Database initialization
//! - Configuration loading
//! - Error types

pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod store;

pub use error::{Error, Result};
pub use model::{DraftTerm, Term};
pub use store::{MemoryTermStore, SqliteTermStore, TermStore};
