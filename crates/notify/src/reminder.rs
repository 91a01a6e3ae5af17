//! Daily onboarding-reminder job.
//!
//! [`OnboardingReminderJob`] walks every active employee once a day,
//! aggregates their onboarding progress, and writes an
//! `onboarding_summary` broadcast for HR and managers listing everyone
//! who is not done. Employees who are overdue or due within three days
//! additionally get a reminder email when SMTP is configured. Daily
//! housekeeping rides on the same tick: expired refresh tokens and aged
//! broadcasts are purged before the sweep.

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use talenthub_core::progress::{self, OnboardingStatus};
use talenthub_core::roles::{ROLE_HR, ROLE_MANAGER};
use talenthub_core::{catalog, task::Step};
use talenthub_db::models::notification::KIND_ONBOARDING_SUMMARY;
use talenthub_db::models::user::User;
use talenthub_db::repositories::ledger_repo::LedgerRepo;
use talenthub_db::repositories::notification_repo::NotificationRepo;
use talenthub_db::repositories::session_repo::SessionRepo;
use talenthub_db::repositories::step_repo::StepRepo;
use talenthub_db::repositories::user_repo::UserRepo;
use talenthub_db::DbPool;

use crate::email::EmailDelivery;

/// How often the reminder runs.
const REMINDER_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Employees due within this many days are emailed, not just the overdue.
const REMINDER_WINDOW_DAYS: i64 = 3;

/// Broadcasts older than this are purged by the daily housekeeping.
const BROADCAST_RETENTION_DAYS: i32 = 30;

// ---------------------------------------------------------------------------
// OnboardingReminderJob
// ---------------------------------------------------------------------------

/// Background service that reminds about incomplete onboarding daily.
pub struct OnboardingReminderJob {
    pool: DbPool,
    mailer: Option<EmailDelivery>,
}

impl OnboardingReminderJob {
    /// Create a new job. `mailer` is `None` when SMTP is not configured;
    /// the broadcast is still written in that case.
    pub fn new(pool: DbPool, mailer: Option<EmailDelivery>) -> Self {
        Self { pool, mailer }
    }

    /// Run the reminder loop.
    ///
    /// The loop exits gracefully when the provided [`CancellationToken`]
    /// is cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(REMINDER_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Onboarding reminder job cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.remind().await {
                        tracing::error!(error = %e, "Failed to run onboarding reminder");
                    }
                }
            }
        }
    }

    /// Aggregate every employee's progress and write the broadcast.
    ///
    /// A failure for one employee skips that row; it never aborts the
    /// whole sweep.
    async fn remind(&self) -> Result<(), sqlx::Error> {
        self.housekeeping().await;

        let employees = UserRepo::list_employees_for_reminder(&self.pool).await?;
        let now = Utc::now();
        let mut items = Vec::new();

        for user in &employees {
            match self.progress_item(user, now).await {
                Ok(Some(item)) => items.push(item),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(user_id = user.id, error = %e, "Skipping employee in reminder");
                }
            }
        }

        if items.is_empty() {
            return Ok(());
        }

        let count = items.len();
        NotificationRepo::create_broadcast(
            &self.pool,
            KIND_ONBOARDING_SUMMARY,
            &format!("{count} employee(s) with incomplete onboarding"),
            "Daily onboarding progress summary",
            &[ROLE_HR, ROLE_MANAGER],
            &serde_json::Value::Array(items),
        )
        .await?;

        tracing::info!(count, "Onboarding summary written");
        Ok(())
    }

    /// Purge expired refresh tokens and aged broadcasts. Failures are
    /// logged; the reminder sweep still runs.
    async fn housekeeping(&self) {
        match SessionRepo::purge_expired(&self.pool).await {
            Ok(purged) if purged > 0 => tracing::info!(purged, "Purged expired sessions"),
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Failed to purge expired sessions"),
        }
        match NotificationRepo::purge_old_broadcasts(&self.pool, BROADCAST_RETENTION_DAYS).await {
            Ok(purged) if purged > 0 => tracing::info!(purged, "Purged old broadcasts"),
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Failed to purge old broadcasts"),
        }
    }

    /// Build the summary item for one employee, or `None` when they are
    /// done. Sends the overdue email as a side effect.
    async fn progress_item(
        &self,
        user: &User,
        now: talenthub_core::types::Timestamp,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        let steps: Vec<Step> = StepRepo::resolve_catalog(&self.pool, user.department_id.as_deref())
            .await?
            .into_iter()
            .map(|row| row.into_step())
            .collect();
        let expected = catalog::expected_keys(&steps);
        let done: HashSet<String> = LedgerRepo::done_keys(&self.pool, user.id)
            .await?
            .into_iter()
            .collect();
        let last_updated = LedgerRepo::last_updated(&self.pool, user.id).await?;
        let due_at = progress::resolve_due_at(user.onboarding_due_at, user.start_date);

        let snapshot = progress::aggregate(&expected, &done, last_updated, due_at);
        if snapshot.status == OnboardingStatus::Done {
            return Ok(None);
        }

        let days_left = due_at.map(|due| progress::days_left(due, now));
        let overdue = days_left.is_some_and(|d| d < 0);

        // Email the employee when the due date is past or imminent.
        if days_left.is_some_and(|d| d <= REMINDER_WINDOW_DAYS) {
            self.send_reminder_email(user, snapshot.pct, overdue).await;
        }

        let mut item = serde_json::to_value(&snapshot).unwrap_or_default();
        if let Some(map) = item.as_object_mut() {
            map.insert("user_id".into(), serde_json::json!(user.id));
            map.insert("display_name".into(), serde_json::json!(user.display_name));
            map.insert("days_left".into(), serde_json::json!(days_left));
            map.insert("overdue".into(), serde_json::json!(overdue));
        }
        Ok(Some(item))
    }

    /// Fire-and-forget reminder email for an overdue or nearly-due
    /// employee.
    async fn send_reminder_email(&self, user: &User, pct: u8, overdue: bool) {
        let Some(mailer) = &self.mailer else {
            return;
        };
        let urgency = if overdue {
            "past its due date"
        } else {
            "due soon"
        };
        let body = format!(
            "Hi {},\n\nYour onboarding checklist is {}% complete and {urgency}.\n\
             Please log in to the portal and finish the remaining tasks.\n",
            user.display_name, pct
        );
        if let Err(e) = mailer
            .deliver(&user.email, "Onboarding reminder", &body)
            .await
        {
            tracing::error!(user_id = user.id, error = %e, "Failed to send reminder email");
        }
    }
}
