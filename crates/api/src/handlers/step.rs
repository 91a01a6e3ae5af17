//! Handlers for onboarding step catalog administration
//! (`/onboarding/steps`).
//!
//! HR touches every scope; a department manager lists and edits only
//! their own department's scope. Every handler here, reads included,
//! goes through [`talenthub_core::authz::can_manage_scope`] against the
//! department carried in the caller's token.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use talenthub_core::authz::can_manage_scope;
use talenthub_core::error::CoreError;
use talenthub_core::types::DbId;
use talenthub_db::models::step::{CreateStep, StepRow, UpdateStep};
use talenthub_db::repositories::step_repo::StepRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::ScopeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /onboarding/steps/reorder`.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub scope: String,
    pub ordered_ids: Vec<DbId>,
}

/// GET /api/v1/onboarding/steps?scope= (staff, scope-checked)
///
/// List the steps of one scope, defaulting to `base`. Managers may only
/// list the scope they manage.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Query(params): Query<ScopeParams>,
) -> AppResult<Json<DataResponse<Vec<StepRow>>>> {
    let scope = params.scope.as_deref().unwrap_or("base");
    ensure_scope_access(&user, scope)?;

    let steps = StepRepo::list_for_scope(&state.pool, scope).await?;
    Ok(Json(DataResponse { data: steps }))
}

/// POST /api/v1/onboarding/steps (staff, scope-checked)
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateStep>,
) -> AppResult<(StatusCode, Json<DataResponse<StepRow>>)> {
    ensure_scope_access(&user, &input.scope)?;

    if input.step_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "step_id must not be empty".into(),
        )));
    }
    for task in &input.tasks {
        task.validate()?;
    }

    let step = StepRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: step })))
}

/// PUT /api/v1/onboarding/steps/{id} (staff, scope-checked)
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStep>,
) -> AppResult<Json<DataResponse<StepRow>>> {
    let existing = StepRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("step", id)))?;
    ensure_scope_access(&user, &existing.scope)?;

    if let Some(tasks) = &input.tasks {
        for task in tasks {
            task.validate()?;
        }
    }

    let step = StepRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("step", id)))?;
    Ok(Json(DataResponse { data: step }))
}

/// POST /api/v1/onboarding/steps/reorder (staff, scope-checked)
///
/// Re-number one scope's steps to match the given id order.
pub async fn reorder(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    ensure_scope_access(&user, &input.scope)?;
    StepRepo::reorder(&state.pool, &input.scope, &input.ordered_ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/onboarding/steps/{id} (staff, scope-checked)
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = StepRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("step", id)))?;
    ensure_scope_access(&user, &existing.scope)?;

    StepRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reject the request unless `user` may manage steps in `scope`. The
/// department comes from the caller's token claims, so this check needs
/// no database round trip.
fn ensure_scope_access(user: &AuthUser, scope: &str) -> AppResult<()> {
    if !can_manage_scope(&user.role, user.department_id.as_deref(), scope) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Not allowed to manage steps in scope '{scope}'"
        ))));
    }
    Ok(())
}
