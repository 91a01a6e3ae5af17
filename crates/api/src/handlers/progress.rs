//! Handlers for the staff progress board (`/onboarding/progress`).

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use talenthub_core::error::CoreError;
use talenthub_core::progress::{self, ProgressSnapshot};
use talenthub_core::roles::ROLE_MANAGER;
use talenthub_core::types::DbId;
use talenthub_db::models::user::User;
use talenthub_db::repositories::ledger_repo::LedgerRepo;
use talenthub_db::repositories::step_repo::StepRepo;
use talenthub_db::repositories::user_repo::UserRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::onboarding::{build_catalog, CatalogResponse};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// One row on the progress board.
#[derive(Debug, Serialize)]
pub struct BoardRow {
    pub user_id: DbId,
    pub display_name: String,
    pub email: String,
    pub department_id: Option<String>,
    pub progress: ProgressSnapshot,
    pub days_left: Option<i64>,
    pub overdue: bool,
}

/// GET /api/v1/onboarding/progress (staff)
///
/// Aggregated progress board. HR sees every active staff member; a
/// manager sees their own department only. A failure for one employee
/// skips that row rather than failing the board. Rows are ordered most
/// urgent first: earliest due date, then lowest completion, then
/// longest-idle.
pub async fn board(
    State(state): State<AppState>,
    RequireStaff(viewer): RequireStaff,
) -> AppResult<Json<DataResponse<Vec<BoardRow>>>> {
    let mut users = UserRepo::list_onboarding(&state.pool).await?;

    // Managers are fenced to the department in their token claims.
    if viewer.role == ROLE_MANAGER {
        users.retain(|u| u.department_id == viewer.department_id);
    }

    let now = Utc::now();
    let mut rows = Vec::with_capacity(users.len());
    for user in &users {
        match board_row(&state, user, now).await {
            Ok(row) => rows.push(row),
            Err(e) => {
                tracing::error!(user_id = user.id, error = %e, "Skipping user on progress board");
            }
        }
    }

    rows.sort_by(|a, b| {
        let due = |r: &BoardRow| r.progress.due_at.map_or((1, None), |d| (0, Some(d)));
        due(a)
            .cmp(&due(b))
            .then(a.progress.pct.cmp(&b.progress.pct))
            .then(a.progress.last_updated.cmp(&b.progress.last_updated))
    });

    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/onboarding/progress/{user_id} (staff)
///
/// One employee's full catalog view, as the employee would see it.
pub async fn detail(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CatalogResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("user", user_id)))?;
    let response = build_catalog(&state, &user).await?;
    Ok(Json(DataResponse { data: response }))
}

async fn board_row(
    state: &AppState,
    user: &User,
    now: talenthub_core::types::Timestamp,
) -> AppResult<BoardRow> {
    let steps: Vec<_> = StepRepo::resolve_catalog(&state.pool, user.department_id.as_deref())
        .await?
        .into_iter()
        .map(|r| r.into_step())
        .collect();
    let expected = talenthub_core::catalog::expected_keys(&steps);
    let done: HashSet<String> = LedgerRepo::done_keys(&state.pool, user.id)
        .await?
        .into_iter()
        .collect();
    let last_updated = LedgerRepo::last_updated(&state.pool, user.id).await?;
    let due_at = progress::resolve_due_at(user.onboarding_due_at, user.start_date);
    let snapshot = progress::aggregate(&expected, &done, last_updated, due_at);

    let days_left = due_at.map(|due| progress::days_left(due, now));
    let overdue = days_left.is_some_and(|d| d < 0)
        && snapshot.status != talenthub_core::progress::OnboardingStatus::Done;

    Ok(BoardRow {
        user_id: user.id,
        display_name: user.display_name.clone(),
        email: user.email.clone(),
        department_id: user.department_id.clone(),
        progress: snapshot,
        days_left,
        overdue,
    })
}
