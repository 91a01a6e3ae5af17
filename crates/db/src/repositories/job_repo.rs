//! Repository for the `jobs` table.

use sqlx::PgPool;
use talenthub_core::types::DbId;

use crate::models::job::{CreateJob, Job, UpdateJob};

const COLUMNS: &str = "id, title, description, department_id, location, employment_type, \
     is_open, created_at, updated_at";

/// Provides CRUD operations for job postings.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new job posting, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateJob) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (title, description, department_id, location, employment_type) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'full_time')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.department_id)
            .bind(&input.location)
            .bind(&input.employment_type)
            .fetch_one(pool)
            .await
    }

    /// Find a job by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List job postings, newest first. When `open_only` is `true`, only
    /// open postings are returned (the public careers listing).
    pub async fn list(pool: &PgPool, open_only: bool) -> Result<Vec<Job>, sqlx::Error> {
        let filter = if open_only { "WHERE is_open" } else { "" };
        let query = format!("SELECT {COLUMNS} FROM jobs {filter} ORDER BY created_at DESC");
        sqlx::query_as::<_, Job>(&query).fetch_all(pool).await
    }

    /// Update a job posting. Only non-`None` fields in `input` are
    /// applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateJob,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                department_id = COALESCE($4, department_id),
                location = COALESCE($5, location),
                employment_type = COALESCE($6, employment_type),
                is_open = COALESCE($7, is_open),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.department_id)
            .bind(&input.location)
            .bind(&input.employment_type)
            .bind(input.is_open)
            .fetch_optional(pool)
            .await
    }

    /// Delete a job posting. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
