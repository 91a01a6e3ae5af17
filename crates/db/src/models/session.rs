//! Refresh token entity model.

use sqlx::FromRow;
use talenthub_core::types::{DbId, Timestamp};

/// A row from the `refresh_tokens` table. Only the SHA-256 hash of the
/// token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
