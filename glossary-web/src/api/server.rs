//! HTTP server setup and routing
//!
//! Builds the Axum router for the glossary REST API. The term store is
//! injected as a trait object so tests run against the in-memory store
//! while production uses SQLite.

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use glossary_common::TermStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Uploaded spreadsheets are small; 10 MiB is generous headroom
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared application context passed to all handlers
///
/// **Note:** AppContext implements Clone, which gives us `FromRef<AppContext>`
/// for free via Axum's blanket implementation.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn TermStore>,
}

/// Build the application router
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(super::handlers::health))

        // Term browsing and search
        .route("/api/terms", get(super::handlers::get_terms))
        .route("/api/terms/search", get(super::handlers::search_terms))
        .route("/api/terms/section/:section", get(super::handlers::get_terms_by_section))
        .route("/api/terms/:id", get(super::handlers::get_term_by_id))
        .route("/api/sections", get(super::handlers::get_sections))

        // Bulk import from spreadsheet
        .route("/api/upload-excel", post(super::handlers::upload_excel))

        // Attach application context
        .with_state(ctx)

        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())

        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
