//! Repository for the `notifications` table.

use sqlx::PgPool;
use talenthub_core::types::DbId;

use crate::models::notification::Notification;

const COLUMNS: &str =
    "id, kind, title, body, user_id, audience_roles, items, read_by, created_at";

/// Provides access to personal and broadcast notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Create a personal notification for one user, returning the
    /// generated ID.
    pub async fn create_for_user(
        pool: &PgPool,
        user_id: DbId,
        kind: &str,
        title: &str,
        body: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notifications (kind, title, body, user_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(kind)
        .bind(title)
        .bind(body)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Create a broadcast notification visible to the given roles,
    /// returning the generated ID. `items` carries structured summary
    /// rows for the client to render.
    pub async fn create_broadcast(
        pool: &PgPool,
        kind: &str,
        title: &str,
        body: &str,
        audience_roles: &[&str],
        items: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        let roles = serde_json::to_value(audience_roles).unwrap_or_default();
        sqlx::query_scalar(
            "INSERT INTO notifications (kind, title, body, audience_roles, items) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(kind)
        .bind(title)
        .bind(body)
        .bind(roles)
        .bind(items)
        .fetch_one(pool)
        .await
    }

    /// List the notifications visible to a user: their personal ones plus
    /// broadcasts addressed to their role. Newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        role: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 OR audience_roles @> to_jsonb($2::text) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(role)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of notifications visible to a user that they have not read.
    pub async fn unread_count(
        pool: &PgPool,
        user_id: DbId,
        role: &str,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE (user_id = $1 OR audience_roles @> to_jsonb($2::text)) \
               AND NOT read_by @> to_jsonb($1::bigint)",
        )
        .bind(user_id)
        .bind(role)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Record that a user read a notification. Idempotent. Returns `true`
    /// if the notification exists and is visible to the user.
    pub async fn mark_read(
        pool: &PgPool,
        notification_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET read_by = read_by || to_jsonb($2::bigint) \
             WHERE id = $1 \
               AND (user_id = $2 OR audience_roles @> to_jsonb($3::text)) \
               AND NOT read_by @> to_jsonb($2::bigint)",
        )
        .bind(notification_id)
        .bind(user_id)
        .bind(role)
        .execute(pool)
        .await?;
        if result.rows_affected() > 0 {
            return Ok(true);
        }
        // Already read counts as success; only a missing or invisible
        // notification is a failure.
        let visible: Option<i64> = sqlx::query_scalar(
            "SELECT id FROM notifications \
             WHERE id = $1 AND (user_id = $2 OR audience_roles @> to_jsonb($3::text))",
        )
        .bind(notification_id)
        .bind(user_id)
        .bind(role)
        .fetch_optional(pool)
        .await?;
        Ok(visible.is_some())
    }

    /// Delete broadcasts older than `days` days. Returns the number of
    /// rows removed.
    pub async fn purge_old_broadcasts(pool: &PgPool, days: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM notifications \
             WHERE user_id IS NULL AND created_at < NOW() - interval '1 day' * $1",
        )
        .bind(days as f64)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
