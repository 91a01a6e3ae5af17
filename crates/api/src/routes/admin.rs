//! Route definitions for the `/admin` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user_admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `hr` role (enforced by handler extractors).
///
/// ```text
/// GET    /users                     -> list
/// POST   /users                     -> create
/// GET    /users/{id}                -> get
/// PUT    /users/{id}                -> update
/// DELETE /users/{id}                -> deactivate
/// POST   /users/{id}/reset-password -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(user_admin::list).post(user_admin::create))
        .route(
            "/users/{id}",
            get(user_admin::get)
                .put(user_admin::update)
                .delete(user_admin::deactivate),
        )
        .route(
            "/users/{id}/reset-password",
            axum::routing::post(user_admin::reset_password),
        )
}
