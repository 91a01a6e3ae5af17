//! Route definitions for the `/jobs` resource (careers listings).

use axum::routing::get;
use axum::Router;

use crate::handlers::job;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// Listing and detail are public (the careers page). Writes require
/// the `hr` role.
///
/// ```text
/// GET    /       -> list (?include_closed=)
/// POST   /       -> create (hr only)
/// GET    /{id}   -> get
/// PUT    /{id}   -> update (hr only)
/// DELETE /{id}   -> delete (hr only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(job::list).post(job::create))
        .route(
            "/{id}",
            get(job::get).put(job::update).delete(job::delete),
        )
}
