//! Handlers for the employee-facing onboarding surface
//! (`/onboarding/catalog`, `/onboarding/tasks/{key}`, `/onboarding/files`).
//!
//! Every mutation resolves the caller's effective catalog first and
//! refuses completion keys that are not part of it, so the ledger can
//! never accumulate rows for tasks an employee does not have.

use std::collections::{HashMap, HashSet};

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use talenthub_core::catalog::step_progress;
use talenthub_core::completion_key::completion_key;
use talenthub_core::error::CoreError;
use talenthub_core::forms::validate_submission;
use talenthub_core::progress::{self, ProgressSnapshot};
use talenthub_core::task::{Step, Task, TaskDetail};
use talenthub_core::types::DbId;
use talenthub_db::models::ledger::{LedgerEntry, LedgerFile, STATUS_DONE};
use talenthub_db::models::user::User;
use talenthub_db::repositories::ledger_repo::LedgerRepo;
use talenthub_db::repositories::step_repo::StepRepo;
use talenthub_db::repositories::user_repo::UserRepo;
use talenthub_storage::is_pdf;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEmployee;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// One task in the catalog view, with its resolved key and ledger state.
#[derive(Debug, Serialize)]
pub struct TaskView {
    /// `None` when no key could be derived; such tasks are display-only.
    pub completion_key: Option<String>,
    /// Ledger status (`done` / `pending`), `None` when untouched.
    pub status: Option<String>,
    pub files: Vec<LedgerFile>,
    pub task: Task,
}

/// One step in the catalog view.
#[derive(Debug, Serialize)]
pub struct StepView {
    pub step_id: String,
    pub scope: String,
    pub title: String,
    pub summary: String,
    pub total: usize,
    pub done: usize,
    pub tasks: Vec<TaskView>,
}

/// Response body for `GET /onboarding/catalog`.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub steps: Vec<StepView>,
    pub progress: ProgressSnapshot,
    pub days_left: Option<i64>,
    pub overdue: bool,
}

/// Request body for `POST /onboarding/tasks/{key}/form`.
#[derive(Debug, Deserialize)]
pub struct FormSubmission {
    pub submission: serde_json::Value,
}

/// Query parameters for file download and removal (`?path=`).
#[derive(Debug, Deserialize)]
pub struct FilePathParams {
    pub path: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/onboarding/catalog
///
/// The caller's effective step catalog with per-task completion state
/// and the aggregated progress snapshot.
pub async fn catalog(
    State(state): State<AppState>,
    RequireEmployee(user): RequireEmployee,
) -> AppResult<Json<DataResponse<CatalogResponse>>> {
    let row = load_user(&state, user.user_id).await?;
    let response = build_catalog(&state, &row).await?;
    Ok(Json(DataResponse { data: response }))
}

/// GET /api/v1/onboarding/tasks/{key}
///
/// The caller's ledger record for one task. 404 when the task was never
/// touched.
pub async fn get_task(
    State(state): State<AppState>,
    RequireEmployee(user): RequireEmployee,
    Path(key): Path<String>,
) -> AppResult<Json<DataResponse<LedgerEntry>>> {
    let entry = LedgerRepo::get(&state.pool, user.user_id, &key)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ledger entry", &key)))?;
    Ok(Json(DataResponse { data: entry }))
}

/// POST /api/v1/onboarding/tasks/{key}/complete
///
/// Mark a plain task (page, video, doc, course) done.
pub async fn complete_task(
    State(state): State<AppState>,
    RequireEmployee(user): RequireEmployee,
    Path(key): Path<String>,
) -> AppResult<Json<DataResponse<LedgerEntry>>> {
    let row = load_user(&state, user.user_id).await?;
    let steps = load_steps(&state, &row).await?;
    find_task(&steps, &key)?;

    let entry = LedgerRepo::upsert(
        &state.pool,
        user.user_id,
        &key,
        STATUS_DONE,
        None,
        &serde_json::json!([]),
    )
    .await?;
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/onboarding/tasks/{key}
///
/// Undo a task: delete the ledger entry and any stored files.
pub async fn uncomplete_task(
    State(state): State<AppState>,
    RequireEmployee(user): RequireEmployee,
    Path(key): Path<String>,
) -> AppResult<StatusCode> {
    let entry = LedgerRepo::get(&state.pool, user.user_id, &key)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ledger entry", &key)))?;

    delete_stored_files(&state, &entry).await;
    LedgerRepo::delete(&state.pool, user.user_id, &key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/onboarding/tasks/{key}/form
///
/// Submit a structured form for a form-type task. The submission is
/// validated and canonicalized before it lands in the ledger.
pub async fn submit_form(
    State(state): State<AppState>,
    RequireEmployee(user): RequireEmployee,
    Path(key): Path<String>,
    Json(input): Json<FormSubmission>,
) -> AppResult<Json<DataResponse<LedgerEntry>>> {
    let row = load_user(&state, user.user_id).await?;
    let steps = load_steps(&state, &row).await?;
    let task = find_task(&steps, &key)?;

    let TaskDetail::Form { kind } = &task.detail else {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Task '{key}' does not accept form submissions"
        ))));
    };
    let canonical = validate_submission(*kind, &input.submission)?;

    let entry = LedgerRepo::upsert(
        &state.pool,
        user.user_id,
        &key,
        STATUS_DONE,
        Some(&canonical),
        &serde_json::json!([]),
    )
    .await?;
    Ok(Json(DataResponse { data: entry }))
}

/// POST /api/v1/onboarding/tasks/{key}/files (multipart)
///
/// Attach one or more PDF files to an upload-type task. New files are
/// appended to any already stored; the entry is marked done.
pub async fn upload_files(
    State(state): State<AppState>,
    RequireEmployee(user): RequireEmployee,
    Path(key): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<LedgerEntry>>> {
    let row = load_user(&state, user.user_id).await?;
    let steps = load_steps(&state, &row).await?;
    let task = find_task(&steps, &key)?;

    if !matches!(task.detail, TaskDetail::Upload { .. }) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Task '{key}' does not accept file uploads"
        ))));
    }

    let mut incoming: Vec<(String, Bytes)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let filename = field
            .file_name()
            .unwrap_or("upload.pdf")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        if bytes.len() > state.config.max_upload_bytes {
            return Err(AppError::BadRequest("Uploaded file is too large".into()));
        }
        if !is_pdf(&bytes) {
            return Err(AppError::Core(CoreError::Validation(
                "Only PDF files are accepted".into(),
            )));
        }
        incoming.push((filename, bytes));
    }

    if incoming.is_empty() {
        return Err(AppError::BadRequest("No files in upload".into()));
    }

    let mut files = match LedgerRepo::get(&state.pool, user.user_id, &key).await? {
        Some(entry) => entry.parsed_files(),
        None => Vec::new(),
    };
    let prefix = format!("uploads/{}", user.user_id);
    for (filename, bytes) in &incoming {
        let stored = state.store.put(&prefix, filename, bytes).await?;
        files.push(LedgerFile {
            name: stored.name,
            path: stored.path,
        });
    }

    let files_value =
        serde_json::to_value(&files).map_err(|e| AppError::InternalError(e.to_string()))?;
    let entry = LedgerRepo::upsert(
        &state.pool,
        user.user_id,
        &key,
        STATUS_DONE,
        None,
        &files_value,
    )
    .await?;
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/onboarding/tasks/{key}/files?path=
///
/// Remove one stored file from an upload task. Removing the last file
/// deletes the ledger entry entirely, so the task reads as not done.
pub async fn remove_file(
    State(state): State<AppState>,
    RequireEmployee(user): RequireEmployee,
    Path(key): Path<String>,
    Query(params): Query<FilePathParams>,
) -> AppResult<StatusCode> {
    let entry = LedgerRepo::get(&state.pool, user.user_id, &key)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ledger entry", &key)))?;

    let mut files = entry.parsed_files();
    let before = files.len();
    files.retain(|f| f.path != params.path);
    if files.len() == before {
        return Err(AppError::Core(CoreError::not_found("file", &params.path)));
    }

    state.store.delete(&params.path).await?;

    if files.is_empty() {
        LedgerRepo::delete(&state.pool, user.user_id, &key).await?;
    } else {
        let files_value =
            serde_json::to_value(&files).map_err(|e| AppError::InternalError(e.to_string()))?;
        LedgerRepo::set_files(&state.pool, user.user_id, &key, &files_value).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/onboarding/files?path=
///
/// Download a stored file. Employees may only read their own uploads;
/// HR and managers may read anyone's.
pub async fn download_file(
    State(state): State<AppState>,
    RequireEmployee(user): RequireEmployee,
    Query(params): Query<FilePathParams>,
) -> AppResult<impl IntoResponse> {
    let own_prefix = format!("uploads/{}/", user.user_id);
    let is_staff = talenthub_core::authz::can_view(
        &user.role,
        talenthub_core::authz::Resource::EmployeeDetail,
    );
    if !is_staff && !params.path.starts_with(&own_prefix) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not allowed to read this file".into(),
        )));
    }

    let bytes = state.store.get(&params.path).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/pdf")],
        bytes,
    ))
}

/// GET /api/v1/onboarding/progress/{user_id}/catalog is served by the
/// progress module; staff reuse [`build_catalog`] through it.
pub(crate) async fn build_catalog(
    state: &AppState,
    user: &User,
) -> AppResult<CatalogResponse> {
    let steps = load_steps(state, user).await?;

    let entries = LedgerRepo::list_for_user(&state.pool, user.id).await?;
    let by_key: HashMap<&str, &LedgerEntry> = entries
        .iter()
        .map(|e| (e.completion_key.as_str(), e))
        .collect();
    let done_keys: HashSet<String> = entries
        .iter()
        .filter(|e| e.status == STATUS_DONE)
        .map(|e| e.completion_key.clone())
        .collect();

    let mut views = Vec::with_capacity(steps.len());
    for step in &steps {
        let sp = step_progress(step, &done_keys);
        let tasks = step
            .tasks
            .iter()
            .zip(sp.keys.iter())
            .map(|(task, key)| {
                let entry = key.as_deref().and_then(|k| by_key.get(k));
                TaskView {
                    completion_key: key.clone(),
                    status: entry.map(|e| e.status.clone()),
                    files: entry.map(|e| e.parsed_files()).unwrap_or_default(),
                    task: task.clone(),
                }
            })
            .collect();
        views.push(StepView {
            step_id: step.step_id.clone(),
            scope: step.scope.clone(),
            title: step.title.clone(),
            summary: step.summary.clone(),
            total: sp.total,
            done: sp.done,
            tasks,
        });
    }

    let expected = talenthub_core::catalog::expected_keys(&steps);
    let last_updated = LedgerRepo::last_updated(&state.pool, user.id).await?;
    let due_at = progress::resolve_due_at(user.onboarding_due_at, user.start_date);
    let snapshot = progress::aggregate(&expected, &done_keys, last_updated, due_at);

    let days_left = due_at.map(|due| progress::days_left(due, Utc::now()));
    let overdue = days_left.is_some_and(|d| d < 0)
        && snapshot.status != talenthub_core::progress::OnboardingStatus::Done;

    Ok(CatalogResponse {
        steps: views,
        progress: snapshot,
        days_left,
        overdue,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))
}

async fn load_steps(state: &AppState, user: &User) -> AppResult<Vec<Step>> {
    let rows = StepRepo::resolve_catalog(&state.pool, user.department_id.as_deref()).await?;
    Ok(rows.into_iter().map(|r| r.into_step()).collect())
}

/// Find the catalog task whose derived key equals `key`, or 404.
fn find_task<'a>(steps: &'a [Step], key: &str) -> AppResult<&'a Task> {
    for step in steps {
        for task in &step.tasks {
            if let Ok(derived) = completion_key(task, &step.step_id) {
                if derived == key {
                    return Ok(task);
                }
            }
        }
    }
    Err(AppError::Core(CoreError::not_found("task", key)))
}

/// Best-effort blob cleanup for a ledger entry's files.
async fn delete_stored_files(state: &AppState, entry: &LedgerEntry) {
    for file in entry.parsed_files() {
        if let Err(e) = state.store.delete(&file.path).await {
            tracing::error!(path = %file.path, error = %e, "Failed to delete stored file");
        }
    }
}
