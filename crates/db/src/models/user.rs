//! User entity models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use talenthub_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
    pub department_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub onboarding_due_at: Option<Timestamp>,
    #[serde(skip_serializing)]
    pub failed_login_attempts: i32,
    #[serde(skip_serializing)]
    pub locked_until: Option<Timestamp>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for provisioning a user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: Option<String>,
    pub department_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub onboarding_due_at: Option<Timestamp>,
}

/// DTO for patching a user. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub display_name: Option<String>,
    pub role: Option<String>,
    pub department_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub onboarding_due_at: Option<Timestamp>,
    pub is_active: Option<bool>,
}
