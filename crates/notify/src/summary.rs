//! Periodic application-summary job.
//!
//! [`ApplicationSummaryJob`] runs as a background task, counting the job
//! applications that arrived during the last window and writing an
//! `apps_summary` broadcast notification for HR and managers. Windows
//! with no new applications write nothing.

use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use talenthub_core::roles::{ROLE_HR, ROLE_MANAGER};
use talenthub_db::models::notification::KIND_APPS_SUMMARY;
use talenthub_db::repositories::application_repo::ApplicationRepo;
use talenthub_db::repositories::notification_repo::NotificationRepo;
use talenthub_db::DbPool;

/// How often the summary runs, and the width of its lookback window.
const SUMMARY_INTERVAL: Duration = Duration::from_secs(30 * 60);

// ---------------------------------------------------------------------------
// ApplicationSummaryJob
// ---------------------------------------------------------------------------

/// Background service that summarizes new applications every half hour.
pub struct ApplicationSummaryJob {
    pool: DbPool,
}

impl ApplicationSummaryJob {
    /// Create a new job with the given database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run the summary loop.
    ///
    /// The loop exits gracefully when the provided [`CancellationToken`]
    /// is cancelled. The first tick fires immediately on startup.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(SUMMARY_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Application summary job cancelled");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.summarize().await {
                        tracing::error!(error = %e, "Failed to summarize applications");
                    }
                }
            }
        }
    }

    /// Count applications from the last window and write the broadcast.
    async fn summarize(&self) -> Result<(), sqlx::Error> {
        let since = Utc::now() - chrono::Duration::from_std(SUMMARY_INTERVAL).unwrap_or_default();
        let counts = ApplicationRepo::count_since(&self.pool, since).await?;

        if counts.is_empty() {
            return Ok(());
        }

        let total: i64 = counts.iter().map(|c| c.count).sum();
        let items = serde_json::to_value(&counts).unwrap_or_default();
        let body = counts
            .iter()
            .map(|c| format!("{}: {}", c.job_title, c.count))
            .collect::<Vec<_>>()
            .join(", ");

        NotificationRepo::create_broadcast(
            &self.pool,
            KIND_APPS_SUMMARY,
            &format!("{total} new application(s)"),
            &body,
            &[ROLE_HR, ROLE_MANAGER],
            &items,
        )
        .await?;

        tracing::info!(total, jobs = counts.len(), "Application summary written");
        Ok(())
    }
}
