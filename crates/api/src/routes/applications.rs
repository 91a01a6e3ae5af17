//! Route definitions for the `/applications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::application;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// POST /              -> create (public, multipart with optional resume)
/// GET  /              -> list (staff, ?status=&job_id=)
/// GET  /mine          -> mine (authenticated applicant)
/// GET  /{id}          -> get (staff)
/// POST /{id}/status   -> set_status (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(application::list).post(application::create))
        .route("/mine", get(application::mine))
        .route("/{id}", get(application::get))
        .route("/{id}/status", post(application::set_status))
}
