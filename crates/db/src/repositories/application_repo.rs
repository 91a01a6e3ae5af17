//! Repository for the `applications` table.

use sqlx::PgPool;
use talenthub_core::types::{DbId, Timestamp};

use crate::models::application::{Application, ApplicationCount, CreateApplication};

const COLUMNS: &str = "id, job_id, applicant_user_id, applicant_name, email, phone, \
     cover_letter, resume_path, status, created_at, updated_at";

/// Provides CRUD operations for job applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application in `pending` status, returning the
    /// created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
        applicant_user_id: Option<DbId>,
        resume_path: Option<&str>,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications \
                (job_id, applicant_user_id, applicant_name, email, phone, cover_letter, resume_path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(input.job_id)
            .bind(applicant_user_id)
            .bind(&input.applicant_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.cover_letter)
            .bind(resume_path)
            .fetch_one(pool)
            .await
    }

    /// Find an application by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List applications, newest first, optionally filtered by status
    /// and/or job.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        job_id: Option<DbId>,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications \
             WHERE ($1::text IS NULL OR status = $1) \
               AND ($2::bigint IS NULL OR job_id = $2) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(status)
            .bind(job_id)
            .fetch_all(pool)
            .await
    }

    /// List the applications one applicant submitted, newest first.
    pub async fn list_for_applicant(
        pool: &PgPool,
        applicant_user_id: DbId,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications \
             WHERE applicant_user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(applicant_user_id)
            .fetch_all(pool)
            .await
    }

    /// Move an application to a new pipeline status. Returns the updated
    /// row, or `None` if it does not exist. Status validity is checked by
    /// the caller.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Per-job counts of applications created since `since`, for the
    /// periodic summary. Jobs with no new applications are omitted.
    pub async fn count_since(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<ApplicationCount>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationCount>(
            "SELECT a.job_id, j.title AS job_title, COUNT(*) AS count \
             FROM applications a \
             JOIN jobs j ON j.id = a.job_id \
             WHERE a.created_at >= $1 \
             GROUP BY a.job_id, j.title \
             ORDER BY count DESC, j.title",
        )
        .bind(since)
        .fetch_all(pool)
        .await
    }
}
