use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use cardscan_core::ContactRecord;
use cardscan_ocr::ScanPipeline;
use cardscan_storage::{
    check_scan_duplicate, contacts_to_csv, get_all_contacts, insert_contact, DbPool,
    StoredContact,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub pipeline: Arc<ScanPipeline>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/scan", post(scan_card))
        .route("/api/contacts", get(list_contacts))
        .route("/api/contacts.csv", get(export_contacts))
        .route("/api/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Error plumbing ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn bad_request(message: &str) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody { error: message.to_string(), details: None },
        }
    }

    fn internal(err: impl std::fmt::Display) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: "Failed to process card.".to_string(),
                details: Some(err.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = %self.body.error, details = ?self.body.details, "request failed");
        }
        (self.status, Json(self.body)).into_response()
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ScanResponse {
    success: bool,
    data: ContactRecord,
    message: String,
    duplicate: bool,
}

/// `POST /api/scan`: multipart fields `front` and `back`, each one image.
/// Runs OCR + extraction + merge, appends the contact row, and returns the
/// merged record.
async fn scan_card(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScanResponse>, ApiError> {
    let mut front: Option<Vec<u8>> = None;
    let mut back: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(&format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(&format!("Invalid multipart body: {e}")))?;
        match name.as_deref() {
            Some("front") => front = Some(data.to_vec()),
            Some("back") => back = Some(data.to_vec()),
            _ => {}
        }
    }

    let (Some(front), Some(back)) = (front, back) else {
        return Err(ApiError::bad_request("Both front and back images are required."));
    };

    let outcome = state
        .pipeline
        .scan(&front, &back)
        .await
        .map_err(ApiError::internal)?;

    let duplicate = check_scan_duplicate(&state.db, &outcome.scan_hash)
        .await
        .map_err(ApiError::internal)?;
    let id = insert_contact(
        &state.db,
        &outcome.contact,
        &outcome.scan_hash,
        &outcome.front_text,
        &outcome.back_text,
    )
    .await
    .map_err(ApiError::internal)?;

    tracing::info!(id, duplicate, name = %outcome.contact.name, "contact stored");

    Ok(Json(ScanResponse {
        success: true,
        data: outcome.contact,
        message: format!("Contact saved (row {id})"),
        duplicate,
    }))
}

async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredContact>>, ApiError> {
    let contacts = get_all_contacts(&state.db).await.map_err(ApiError::internal)?;
    Ok(Json(contacts))
}

async fn export_contacts(State(state): State<AppState>) -> Result<Response, ApiError> {
    let contacts = get_all_contacts(&state.db).await.map_err(ApiError::internal)?;
    let csv = contacts_to_csv(&contacts).map_err(ApiError::internal)?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv).into_response())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
