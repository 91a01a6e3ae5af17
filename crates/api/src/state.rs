use std::sync::Arc;

use talenthub_storage::FileStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: talenthub_db::DbPool,
    /// Server configuration (JWT secret, CORS origins, upload limits).
    pub config: Arc<ServerConfig>,
    /// Blob storage for uploaded files.
    pub store: Arc<dyn FileStore>,
    /// Outbound email, `None` when SMTP is not configured.
    pub mailer: Option<talenthub_notify::EmailDelivery>,
}
