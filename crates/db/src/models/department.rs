//! Department entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use talenthub_core::types::Timestamp;

/// A row from the `departments` table. The id doubles as the step scope.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a department.
#[derive(Debug, Deserialize)]
pub struct CreateDepartment {
    pub id: String,
    pub name: String,
}

/// DTO for renaming a department.
#[derive(Debug, Deserialize)]
pub struct UpdateDepartment {
    pub name: Option<String>,
}
