//! Handlers for the `/notifications` resource.
//!
//! Every authenticated user sees their personal notifications plus any
//! broadcast addressed to their role. Read state is tracked per user.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use talenthub_core::error::CoreError;
use talenthub_core::types::DbId;
use talenthub_db::models::notification::Notification;
use talenthub_db::repositories::notification_repo::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

/// GET /api/v1/notifications?limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let (limit, offset) = params.clamped();
    let notifications =
        NotificationRepo::list_for_user(&state.pool, user.user_id, &user.role, limit, offset)
            .await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let unread = NotificationRepo::unread_count(&state.pool, user.user_id, &user.role).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { unread },
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Idempotent. 404 when the notification does not exist or is not
/// visible to the caller.
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let visible = NotificationRepo::mark_read(&state.pool, id, user.user_id, &user.role).await?;
    if !visible {
        return Err(AppError::Core(CoreError::not_found("notification", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
