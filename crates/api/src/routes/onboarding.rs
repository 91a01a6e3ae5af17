//! Route definitions for the onboarding portal: step catalog
//! administration, the employee's own catalog and task ledger, file
//! uploads, and the staff progress board.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{onboarding, progress, step};
use crate::state::AppState;

/// Routes mounted at `/onboarding`.
///
/// ```text
/// GET    /steps                   -> step::list (staff, scope-checked, ?scope=)
/// POST   /steps                   -> step::create (staff, scope-checked)
/// POST   /steps/reorder           -> step::reorder (staff, scope-checked)
/// PUT    /steps/{id}              -> step::update (staff, scope-checked)
/// DELETE /steps/{id}              -> step::delete (staff, scope-checked)
///
/// GET    /catalog                 -> onboarding::catalog (employee)
/// POST   /tasks/{key}/complete    -> onboarding::complete_task
/// GET    /tasks/{key}             -> onboarding::get_task
/// DELETE /tasks/{key}             -> onboarding::uncomplete_task
/// POST   /tasks/{key}/form        -> onboarding::submit_form
/// POST   /tasks/{key}/files       -> onboarding::upload_files (multipart)
/// DELETE /tasks/{key}/files       -> onboarding::remove_file (?path=)
/// GET    /files                   -> onboarding::download_file (?path=)
///
/// GET    /progress                -> progress::board (staff)
/// GET    /progress/{user_id}      -> progress::detail (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/steps", get(step::list).post(step::create))
        .route("/steps/reorder", post(step::reorder))
        .route("/steps/{id}", axum::routing::put(step::update).delete(step::delete))
        .route("/catalog", get(onboarding::catalog))
        .route("/tasks/{key}/complete", post(onboarding::complete_task))
        .route(
            "/tasks/{key}",
            get(onboarding::get_task).delete(onboarding::uncomplete_task),
        )
        .route("/tasks/{key}/form", post(onboarding::submit_form))
        .route(
            "/tasks/{key}/files",
            post(onboarding::upload_files).delete(onboarding::remove_file),
        )
        .route("/files", get(onboarding::download_file))
        .route("/progress", get(progress::board))
        .route("/progress/{user_id}", get(progress::detail))
}
