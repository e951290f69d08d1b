//! Glossary web service library
//!
//! REST API over the term store plus the spreadsheet import pipeline.
//! Exposed as a library so integration tests can drive the router
//! directly.

pub mod api;
pub mod import;
