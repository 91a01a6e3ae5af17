//! Handlers for the `/departments` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use talenthub_core::error::CoreError;
use talenthub_db::models::department::{CreateDepartment, Department, UpdateDepartment};
use talenthub_db::repositories::department_repo::DepartmentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireHr};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/departments
///
/// List departments. Any authenticated user may read them (they feed
/// dropdowns across the portal).
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Department>>>> {
    let departments = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: departments }))
}

/// POST /api/v1/departments (HR only)
pub async fn create(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<DataResponse<Department>>)> {
    if input.id.trim().is_empty() || input.id == "base" {
        return Err(AppError::Core(CoreError::Validation(
            "Department id must be non-empty and must not be 'base'".into(),
        )));
    }
    let department = DepartmentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: department })))
}

/// PUT /api/v1/departments/{id} (HR only)
pub async fn update(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Path(id): Path<String>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<DataResponse<Department>>> {
    let department = DepartmentRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("department", &id)))?;
    Ok(Json(DataResponse { data: department }))
}

/// DELETE /api/v1/departments/{id} (HR only)
pub async fn delete(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let deleted = DepartmentRepo::delete(&state.pool, &id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("department", &id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
