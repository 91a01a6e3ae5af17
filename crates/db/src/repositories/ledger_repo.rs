//! Repository for the `onboarding_ledger` table.

use sqlx::PgPool;
use talenthub_core::types::{DbId, Timestamp};

use crate::models::ledger::LedgerEntry;

const COLUMNS: &str = "user_id, completion_key, status, submission, files, updated_at";

/// Provides access to per-user task completion state.
pub struct LedgerRepo;

impl LedgerRepo {
    /// Completion keys marked done for a user.
    pub async fn done_keys(pool: &PgPool, user_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT completion_key FROM onboarding_ledger \
             WHERE user_id = $1 AND status = 'done'",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// All ledger entries for a user.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<LedgerEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM onboarding_ledger WHERE user_id = $1 ORDER BY completion_key"
        );
        sqlx::query_as::<_, LedgerEntry>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// One ledger entry, if present.
    pub async fn get(
        pool: &PgPool,
        user_id: DbId,
        completion_key: &str,
    ) -> Result<Option<LedgerEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM onboarding_ledger \
             WHERE user_id = $1 AND completion_key = $2"
        );
        sqlx::query_as::<_, LedgerEntry>(&query)
            .bind(user_id)
            .bind(completion_key)
            .fetch_optional(pool)
            .await
    }

    /// Upsert a ledger entry. `submission` and `files` replace any
    /// existing values wholesale.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        completion_key: &str,
        status: &str,
        submission: Option<&serde_json::Value>,
        files: &serde_json::Value,
    ) -> Result<LedgerEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO onboarding_ledger (user_id, completion_key, status, submission, files) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, completion_key) DO UPDATE SET \
                status = EXCLUDED.status, \
                submission = EXCLUDED.submission, \
                files = EXCLUDED.files, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LedgerEntry>(&query)
            .bind(user_id)
            .bind(completion_key)
            .bind(status)
            .bind(submission)
            .bind(files)
            .fetch_one(pool)
            .await
    }

    /// Replace the files list of an existing entry.
    pub async fn set_files(
        pool: &PgPool,
        user_id: DbId,
        completion_key: &str,
        files: &serde_json::Value,
    ) -> Result<Option<LedgerEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE onboarding_ledger SET files = $3, updated_at = NOW() \
             WHERE user_id = $1 AND completion_key = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LedgerEntry>(&query)
            .bind(user_id)
            .bind(completion_key)
            .bind(files)
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        user_id: DbId,
        completion_key: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM onboarding_ledger WHERE user_id = $1 AND completion_key = $2",
        )
        .bind(user_id)
        .bind(completion_key)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Most recent ledger write for a user, if any.
    pub async fn last_updated(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar("SELECT MAX(updated_at) FROM onboarding_ledger WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
