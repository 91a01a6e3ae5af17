//! HR user administration handlers (`/admin/users`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use talenthub_core::error::CoreError;
use talenthub_core::roles::{normalize_role, ROLE_EMPLOYEE};
use talenthub_core::types::DbId;
use talenthub_db::models::user::{CreateUser, UpdateUser, User};
use talenthub_db::repositories::session_repo::SessionRepo;
use talenthub_db::repositories::user_repo::UserRepo;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireHr;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the user listing (`?role=`).
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub role: Option<String>,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

/// GET /api/v1/admin/users?role= (HR only)
pub async fn list(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let role = params.role.as_deref().map(normalize_role);
    let users = UserRepo::list(&state.pool, role).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/admin/users (HR only)
///
/// Provision an account. A duplicate email maps to 409 Conflict through
/// the `uq_users_email` constraint.
pub async fn create(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    if !input.email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email is required".into(),
        )));
    }
    if input.display_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "display_name must not be empty".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = input
        .role
        .as_deref()
        .map(normalize_role)
        .unwrap_or(ROLE_EMPLOYEE);
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        input.email.trim(),
        &password_hash,
        input.display_name.trim(),
        role,
        input.department_id.as_deref(),
        input.start_date,
        input.onboarding_due_at,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/admin/users/{id} (HR only)
pub async fn get(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("user", id)))?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/admin/users/{id} (HR only)
pub async fn update(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateUser>,
) -> AppResult<Json<DataResponse<User>>> {
    if let Some(role) = &input.role {
        input.role = Some(normalize_role(role).to_string());
    }
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("user", id)))?;
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/v1/admin/users/{id}/reset-password (HR only)
///
/// Replaces the password and revokes every live session.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::set_password_hash(&state.pool, id, &password_hash).await?;
    if !updated {
        return Err(AppError::Core(CoreError::not_found("user", id)));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/users/{id} (HR only)
///
/// Soft delete: the account is deactivated, not removed, so the ledger
/// and application history stay intact.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireHr(_user): RequireHr,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::not_found("user", id)));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
