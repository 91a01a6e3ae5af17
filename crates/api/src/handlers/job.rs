//! Handlers for the `/jobs` resource (public listing, HR administration).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use talenthub_core::error::CoreError;
use talenthub_core::types::DbId;
use talenthub_db::models::job::{CreateJob, Job, UpdateJob};
use talenthub_db::repositories::job_repo::JobRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireHr;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the job listing (`?include_closed=`).
#[derive(Debug, Deserialize)]
pub struct JobListParams {
    #[serde(default)]
    pub include_closed: bool,
}

/// GET /api/v1/jobs
///
/// Public careers listing. Open postings only unless `include_closed`
/// is set (which anyone may set; closed postings are not secret).
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<JobListParams>,
) -> AppResult<Json<DataResponse<Vec<Job>>>> {
    let jobs = JobRepo::list(&state.pool, !params.include_closed).await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/jobs/{id} (public)
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("job", id)))?;
    Ok(Json(DataResponse { data: job }))
}

/// POST /api/v1/jobs (HR only)
pub async fn create(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Json(input): Json<CreateJob>,
) -> AppResult<(StatusCode, Json<DataResponse<Job>>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Job title must not be empty".into(),
        )));
    }
    let job = JobRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

/// PUT /api/v1/jobs/{id} (HR only)
pub async fn update(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateJob>,
) -> AppResult<Json<DataResponse<Job>>> {
    let job = JobRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("job", id)))?;
    Ok(Json(DataResponse { data: job }))
}

/// DELETE /api/v1/jobs/{id} (HR only)
pub async fn delete(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = JobRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("job", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
