//! Onboarding step entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use talenthub_core::task::{self, Step, Task};
use talenthub_core::types::{DbId, Timestamp};

/// A row from the `onboarding_steps` table. `tasks` is raw JSONB; use
/// [`StepRow::into_step`] to get the parsed domain type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StepRow {
    pub id: DbId,
    pub step_id: String,
    pub scope: String,
    pub title: String,
    pub summary: String,
    pub sort_order: i32,
    pub tasks: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StepRow {
    /// Convert into the domain [`Step`], leniently parsing tasks.
    pub fn into_step(self) -> Step {
        Step {
            tasks: task::parse_tasks(&self.tasks),
            step_id: self.step_id,
            scope: self.scope,
            title: self.title,
            summary: self.summary,
            sort_order: self.sort_order,
        }
    }
}

/// DTO for creating a step.
#[derive(Debug, Deserialize)]
pub struct CreateStep {
    pub step_id: String,
    pub scope: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// DTO for patching a step. Only non-`None` fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateStep {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub sort_order: Option<i32>,
    pub tasks: Option<Vec<Task>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn into_step_parses_tasks_leniently() {
        let row = StepRow {
            id: 1,
            step_id: "paperwork".into(),
            scope: "base".into(),
            title: "Paperwork".into(),
            summary: String::new(),
            sort_order: 0,
            tasks: json!([
                { "type": "upload", "label": "Contract", "kind": "signed_contract" },
                { "type": "mystery", "label": "???" },
            ]),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let step = row.into_step();
        assert_eq!(step.tasks.len(), 1);
        assert_eq!(step.step_id, "paperwork");
    }
}
