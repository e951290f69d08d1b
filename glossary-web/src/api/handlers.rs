//! HTTP request handlers
//!
//! Every handler converts store/import errors into a JSON response at the
//! boundary; nothing propagates far enough to take the process down.
//! Store failures surface a generic message and the details go to the log.

use crate::api::server::AppContext;
use crate::import;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use glossary_common::{Error, Term};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message.into() }),
    )
}

fn not_found(message: impl Into<String>) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse { error: message.into() }),
    )
}

fn internal_error(message: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: message.into() }),
    )
}

// ============================================================================
// Health Endpoint
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        module: "glossary-web".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Term Endpoints
// ============================================================================

/// GET /api/terms - All terms, order unspecified
pub async fn get_terms(State(ctx): State<AppContext>) -> Result<Json<Vec<Term>>, ApiError> {
    match ctx.store.get_all().await {
        Ok(terms) => Ok(Json(terms)),
        Err(e) => {
            error!("Failed to fetch terms: {}", e);
            Err(internal_error("Failed to fetch terms"))
        }
    }
}

/// GET /api/terms/:id - Single term by id
pub async fn get_term_by_id(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Term>, ApiError> {
    match ctx.store.get_by_id(&id).await {
        Ok(Some(term)) => Ok(Json(term)),
        Ok(None) => Err(not_found("Term not found")),
        Err(e) => {
            error!("Failed to fetch term {}: {}", id, e);
            Err(internal_error("Failed to fetch term"))
        }
    }
}

/// GET /api/terms/search?q= - Case-insensitive substring search
pub async fn search_terms(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Term>>, ApiError> {
    let Some(query) = params.q else {
        return Err(bad_request("Query parameter 'q' is required"));
    };

    match ctx.store.search(&query).await {
        Ok(terms) => Ok(Json(terms)),
        Err(Error::Validation(msg)) => Err(bad_request(msg)),
        Err(e) => {
            error!("Failed to search terms: {}", e);
            Err(internal_error("Failed to search terms"))
        }
    }
}

/// GET /api/terms/section/:section - Exact section match
pub async fn get_terms_by_section(
    State(ctx): State<AppContext>,
    Path(section): Path<String>,
) -> Result<Json<Vec<Term>>, ApiError> {
    match ctx.store.get_by_section(&section).await {
        Ok(terms) => Ok(Json(terms)),
        Err(e) => {
            error!("Failed to fetch terms for section {}: {}", section, e);
            Err(internal_error("Failed to fetch terms"))
        }
    }
}

/// GET /api/sections - Sorted distinct section labels
pub async fn get_sections(State(ctx): State<AppContext>) -> Result<Json<Vec<String>>, ApiError> {
    match ctx.store.sections().await {
        Ok(sections) => Ok(Json(sections)),
        Err(e) => {
            error!("Failed to fetch sections: {}", e);
            Err(internal_error("Failed to fetch sections"))
        }
    }
}

// ============================================================================
// Spreadsheet Import Endpoint
// ============================================================================

/// POST /api/upload-excel - Replace the whole dataset from a spreadsheet
///
/// Expects a multipart form with the file under the `file` field. The
/// import is all-or-nothing: a single bad row rejects the upload and the
/// stored data stays as it was.
pub async fn upload_excel(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<Json<import::ImportSummary>, ApiError> {
    let mut payload: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| bad_request(format!("Failed to read uploaded file: {}", e)))?;
            payload = Some(bytes.to_vec());
            break;
        }
    }

    let Some(payload) = payload else {
        return Err(bad_request("No file uploaded"));
    };

    info!("Received spreadsheet upload ({} bytes)", payload.len());

    match import::import_spreadsheet(ctx.store.as_ref(), &payload).await {
        Ok(summary) => Ok(Json(summary)),
        Err(Error::Validation(msg)) => Err(bad_request(msg)),
        Err(Error::Internal(msg)) => {
            error!("Spreadsheet import failed: {}", msg);
            Err(internal_error(msg))
        }
        Err(e) => {
            error!("Spreadsheet import failed: {}", e);
            Err(internal_error("Failed to import terms"))
        }
    }
}
