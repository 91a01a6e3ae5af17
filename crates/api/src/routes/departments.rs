//! Route definitions for the `/departments` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::department;
use crate::state::AppState;

/// Routes mounted at `/departments`.
///
/// ```text
/// GET    /       -> list (any authenticated user)
/// POST   /       -> create (hr only)
/// PUT    /{id}   -> update (hr only)
/// DELETE /{id}   -> delete (hr only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(department::list).post(department::create))
        .route("/{id}", put(department::update).delete(department::delete))
}
