//! Repository for the `onboarding_steps` table.

use sqlx::PgPool;
use talenthub_core::types::DbId;

use crate::models::step::{CreateStep, StepRow, UpdateStep};

const COLUMNS: &str =
    "id, step_id, scope, title, summary, sort_order, tasks, created_at, updated_at";

/// Provides CRUD operations for the onboarding step catalog.
pub struct StepRepo;

impl StepRepo {
    /// Insert a new step, returning the created row.
    ///
    /// When `sort_order` is `None`, the step is appended after the
    /// current last step in its scope.
    pub async fn create(pool: &PgPool, input: &CreateStep) -> Result<StepRow, sqlx::Error> {
        let tasks = serde_json::to_value(&input.tasks).unwrap_or_default();
        let query = format!(
            "INSERT INTO onboarding_steps (step_id, scope, title, summary, sort_order, tasks) \
             VALUES ($1, $2, $3, $4, \
                COALESCE($5, (SELECT COALESCE(MAX(sort_order), -1) + 1 \
                              FROM onboarding_steps WHERE scope = $2)), \
                $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StepRow>(&query)
            .bind(&input.step_id)
            .bind(&input.scope)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(input.sort_order)
            .bind(tasks)
            .fetch_one(pool)
            .await
    }

    /// Find a step by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StepRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM onboarding_steps WHERE id = $1");
        sqlx::query_as::<_, StepRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the steps in one scope, ordered.
    pub async fn list_for_scope(pool: &PgPool, scope: &str) -> Result<Vec<StepRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM onboarding_steps \
             WHERE scope = $1 ORDER BY sort_order, step_id"
        );
        sqlx::query_as::<_, StepRow>(&query)
            .bind(scope)
            .fetch_all(pool)
            .await
    }

    /// Resolve the effective catalog for an employee: base steps first,
    /// then the department's own steps, each ordered internally.
    pub async fn resolve_catalog(
        pool: &PgPool,
        department_id: Option<&str>,
    ) -> Result<Vec<StepRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM onboarding_steps \
             WHERE scope = 'base' OR scope = $1 \
             ORDER BY (scope <> 'base'), sort_order, step_id"
        );
        sqlx::query_as::<_, StepRow>(&query)
            .bind(department_id)
            .fetch_all(pool)
            .await
    }

    /// Update a step. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStep,
    ) -> Result<Option<StepRow>, sqlx::Error> {
        let tasks = input
            .tasks
            .as_ref()
            .map(|t| serde_json::to_value(t).unwrap_or_default());
        let query = format!(
            "UPDATE onboarding_steps SET
                title = COALESCE($2, title),
                summary = COALESCE($3, summary),
                sort_order = COALESCE($4, sort_order),
                tasks = COALESCE($5, tasks),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StepRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(input.sort_order)
            .bind(tasks)
            .fetch_optional(pool)
            .await
    }

    /// Re-number an entire scope in one transaction. `ordered_ids` is the
    /// desired order of the scope's internal ids; ids outside the scope
    /// are ignored.
    pub async fn reorder(
        pool: &PgPool,
        scope: &str,
        ordered_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for (position, id) in ordered_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE onboarding_steps SET sort_order = $3, updated_at = NOW() \
                 WHERE id = $1 AND scope = $2",
            )
            .bind(id)
            .bind(scope)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    /// Delete a step. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM onboarding_steps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
