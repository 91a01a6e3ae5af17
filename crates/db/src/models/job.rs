//! Job posting entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use talenthub_core::types::{DbId, Timestamp};

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub department_id: Option<String>,
    pub location: String,
    pub employment_type: String,
    pub is_open: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a job posting.
#[derive(Debug, Deserialize)]
pub struct CreateJob {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub department_id: Option<String>,
    #[serde(default)]
    pub location: String,
    pub employment_type: Option<String>,
}

/// DTO for patching a job posting.
#[derive(Debug, Deserialize)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub description: Option<String>,
    pub department_id: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub is_open: Option<bool>,
}
