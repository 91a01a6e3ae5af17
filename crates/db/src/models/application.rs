//! Job application entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use talenthub_core::types::{DbId, Timestamp};

/// Application pipeline statuses, in pipeline order.
pub const APPLICATION_STATUSES: &[&str] =
    &["pending", "reviewing", "scheduled", "recruited", "rejected"];

/// Whether `status` is a known pipeline status.
pub fn is_valid_status(status: &str) -> bool {
    APPLICATION_STATUSES.contains(&status)
}

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub job_id: DbId,
    pub applicant_user_id: Option<DbId>,
    pub applicant_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_path: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting an application.
#[derive(Debug, Deserialize)]
pub struct CreateApplication {
    pub job_id: DbId,
    pub applicant_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
}

/// One row of the per-job application counts used by the periodic
/// summary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApplicationCount {
    pub job_id: DbId,
    pub job_title: String,
    pub count: i64,
}
