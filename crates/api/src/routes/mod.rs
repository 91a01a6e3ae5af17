pub mod admin;
pub mod applications;
pub mod auth;
pub mod departments;
pub mod health;
pub mod jobs;
pub mod notifications;
pub mod onboarding;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public)
/// /auth/refresh                      refresh (public)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           current user (requires auth)
///
/// /admin/users                       list, create (hr only)
/// /admin/users/{id}                  get, update, deactivate
/// /admin/users/{id}/reset-password   reset password
///
/// /departments                       list, create
/// /departments/{id}                  update, delete
///
/// /jobs                              list (public), create (hr)
/// /jobs/{id}                         get (public), update, delete (hr)
///
/// /applications                      apply (public, multipart), list (staff)
/// /applications/mine                 own applications
/// /applications/{id}                 get (staff)
/// /applications/{id}/status          change status (staff)
///
/// /notifications                     list (?limit, offset)
/// /notifications/unread-count        unread count (GET)
/// /notifications/{id}/read           mark read (POST)
///
/// /onboarding/steps                  list, create (staff, scope-checked)
/// /onboarding/steps/reorder          reorder one scope (POST)
/// /onboarding/steps/{id}             update, delete
/// /onboarding/catalog                employee's resolved catalog (GET)
/// /onboarding/tasks/{key}/complete   mark task done (POST)
/// /onboarding/tasks/{key}            own ledger record (GET), undo (DELETE)
/// /onboarding/tasks/{key}/form       submit form task (POST)
/// /onboarding/tasks/{key}/files      upload PDFs (POST), remove one (DELETE)
/// /onboarding/files                  download a stored file (?path=)
/// /onboarding/progress               staff progress board (GET)
/// /onboarding/progress/{user_id}     one employee's catalog view (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, me).
        .nest("/auth", auth::router())
        // HR user administration.
        .nest("/admin", admin::router())
        // Department directory.
        .nest("/departments", departments::router())
        // Careers listings.
        .nest("/jobs", jobs::router())
        // Recruiting pipeline.
        .nest("/applications", applications::router())
        // Personal and broadcast notifications.
        .nest("/notifications", notifications::router())
        // Onboarding: step catalog, ledger, uploads, progress board.
        .nest("/onboarding", onboarding::router())
}
