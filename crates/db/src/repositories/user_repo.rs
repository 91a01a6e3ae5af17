//! Repository for the `users` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use talenthub_core::types::{DbId, Timestamp};

use crate::models::user::{UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, display_name, role, department_id, start_date, \
     onboarding_due_at, failed_login_attempts, locked_until, is_active, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// `password_hash` must already be an Argon2 hash; this layer never
    /// sees plaintext passwords.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        display_name: &str,
        role: &str,
        department_id: Option<&str>,
        start_date: Option<NaiveDate>,
        onboarding_due_at: Option<Timestamp>,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users \
                (email, password_hash, display_name, role, department_id, start_date, onboarding_due_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(password_hash)
            .bind(display_name)
            .bind(role)
            .bind(department_id)
            .bind(start_date)
            .bind(onboarding_due_at)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users, optionally filtered by role.
    pub async fn list(pool: &PgPool, role: Option<&str>) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE ($1::text IS NULL OR role = $1) \
             ORDER BY display_name, id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(role)
            .fetch_all(pool)
            .await
    }

    /// List active staff for the progress board. Applicants never appear
    /// on the board.
    pub async fn list_onboarding(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE is_active AND role <> 'applicant' \
             ORDER BY display_name, id"
        );
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                display_name = COALESCE($2, display_name),
                role = COALESCE($3, role),
                department_id = COALESCE($4, department_id),
                start_date = COALESCE($5, start_date),
                onboarding_due_at = COALESCE($6, onboarding_due_at),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.display_name)
            .bind(&input.role)
            .bind(&input.department_id)
            .bind(input.start_date)
            .bind(input.onboarding_due_at)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's password hash.
    pub async fn set_password_hash(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a failed login, locking the account when the attempt count
    /// reaches `max_attempts`.
    pub async fn record_failed_login(
        pool: &PgPool,
        id: DbId,
        max_attempts: i32,
        lockout_minutes: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET \
                failed_login_attempts = failed_login_attempts + 1, \
                locked_until = CASE \
                    WHEN failed_login_attempts + 1 >= $2 \
                    THEN NOW() + interval '1 minute' * $3 \
                    ELSE locked_until \
                END \
             WHERE id = $1",
        )
        .bind(id)
        .bind(max_attempts)
        .bind(lockout_minutes as f64)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Clear the failed-login counter after a successful login.
    pub async fn reset_failed_logins(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET failed_login_attempts = 0, locked_until = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List active employees with a resolved due date in the past, for
    /// the overdue reminder job. Managers and HR are excluded.
    pub async fn list_employees_for_reminder(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE is_active AND role = 'employee' \
               AND (onboarding_due_at IS NOT NULL OR start_date IS NOT NULL) \
             ORDER BY id"
        );
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Deactivate a user. Returns `true` if a row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
