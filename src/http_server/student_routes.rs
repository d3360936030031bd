//! Student HTTP Routes
//!
//! Endpoints over the file-backed record table: list, add, search, and
//! raw export/import of the backing file.
//!
//! Every handler is stateless across calls: it reloads the full table
//! from the store, works on a local copy, and writes the whole table
//! back. Mutating handlers serialize through the store's update lock so
//! concurrent writes cannot discard each other.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::codec::Record;
use crate::observability::{ChangeEvent, ChangeNotifier, Logger};
use crate::store::{RecordStore, StoreError};

// ==================
// Shared State
// ==================

/// State shared across student handlers
#[derive(Debug)]
pub struct StudentState {
    pub store: RecordStore,
    pub notifier: ChangeNotifier,
}

impl StudentState {
    pub fn new(store: RecordStore, notifier: ChangeNotifier) -> Self {
        Self { store, notifier }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct AddStudentRequest {
    pub name: String,
    pub roll: String,
    pub marks: String,
}

#[derive(Debug, Serialize)]
pub struct AddStudentResponse {
    pub message: String,
    pub student: Record,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// JSON error envelope: `{message, error?}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ==================
// Student Routes
// ==================

/// Create student routes
pub fn student_routes(state: Arc<StudentState>) -> Router {
    // Per-method fallbacks keep verb mismatches at 404 instead of
    // axum's default 405, so every unmatched verb+path answers the
    // same way.
    Router::new()
        .route("/", get(index_handler).fallback(route_not_found))
        .route("/students", get(list_students_handler).fallback(route_not_found))
        .route("/add", post(add_student_handler).fallback(route_not_found))
        .route("/search", get(search_students_handler).fallback(route_not_found))
        .route("/export", get(export_handler).fallback(route_not_found))
        .route("/upload", post(upload_handler).fallback(route_not_found))
        .fallback(route_not_found)
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn store_failure(message: &str, e: StoreError) -> (StatusCode, Json<ErrorBody>) {
    Logger::error("STORE_FAILURE", &[("context", message), ("error", &e.to_string())]);
    (
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorBody {
            message: message.to_string(),
            error: Some(e.to_string()),
        }),
    )
}

fn name_matches(record: &Record, needle_lower: &str) -> bool {
    record
        .get("name")
        .map(|name| name.to_lowercase().contains(needle_lower))
        .unwrap_or(false)
}

// ==================
// Handlers
// ==================

const INDEX_HTML: &str = include_str!("index.html");

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn list_students_handler(
    State(state): State<Arc<StudentState>>,
) -> Result<Json<Vec<Record>>, (StatusCode, Json<ErrorBody>)> {
    let table = state
        .store
        .load_all()
        .map_err(|e| store_failure("Failed to load students", e))?;

    Ok(Json(table.records().to_vec()))
}

async fn add_student_handler(
    State(state): State<Arc<StudentState>>,
    Form(request): Form<AddStudentRequest>,
) -> Result<(StatusCode, Json<AddStudentResponse>), (StatusCode, Json<ErrorBody>)> {
    let mut student = Record::new();
    student.push("name", request.name.trim());
    student.push("roll", request.roll.trim());
    student.push("marks", request.marks.trim());

    // Hold the update lock across load+append+replace so a concurrent
    // add cannot overwrite this one.
    let _guard = state.store.lock_for_update().await;

    let mut table = state
        .store
        .load_all()
        .map_err(|e| store_failure("Failed to add student", e))?;
    table.push(student.clone());
    state
        .store
        .replace_all(&table)
        .map_err(|e| store_failure("Failed to add student", e))?;

    state.notifier.notify(ChangeEvent::Added);

    Ok((
        StatusCode::CREATED,
        Json(AddStudentResponse {
            message: "Student added successfully".to_string(),
            student,
        }),
    ))
}

async fn search_students_handler(
    State(state): State<Arc<StudentState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Record>>, (StatusCode, Json<ErrorBody>)> {
    let needle = match query.name.as_deref().map(str::trim) {
        Some(needle) if !needle.is_empty() => needle.to_lowercase(),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    message: "Missing 'name' query parameter".to_string(),
                    error: None,
                }),
            ))
        }
    };

    let table = state
        .store
        .load_all()
        .map_err(|e| store_failure("Failed to search students", e))?;

    let matches: Vec<Record> = table
        .records()
        .iter()
        .filter(|record| name_matches(record, &needle))
        .cloned()
        .collect();

    Ok(Json(matches))
}

async fn export_handler(
    State(state): State<Arc<StudentState>>,
) -> Result<([(header::HeaderName, &'static str); 2], Bytes), (StatusCode, Json<ErrorBody>)> {
    let bytes = state
        .store
        .export_raw()
        .map_err(|e| store_failure("Failed to export students", e))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"students.csv\"",
            ),
        ],
        Bytes::from(bytes),
    ))
}

async fn upload_handler(
    State(state): State<Arc<StudentState>>,
    body: Bytes,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorBody>)> {
    // Raw replacement, no validation of the uploaded content.
    let _guard = state.store.lock_for_update().await;
    state
        .store
        .import_raw(&body)
        .map_err(|e| store_failure("Failed to import students", e))?;

    state.notifier.notify(ChangeEvent::Imported);

    Ok(Json(MessageResponse {
        message: "File imported successfully".to_string(),
    }))
}

async fn route_not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "Route not found".to_string(),
            error: None,
        }),
    )
}
