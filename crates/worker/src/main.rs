//! Standalone runner for the periodic jobs, for deployments that keep
//! the API server and background work in separate processes. The API
//! binary runs the same jobs in-process by default.

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talenthub_notify::{ApplicationSummaryJob, EmailConfig, EmailDelivery, OnboardingReminderJob};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talenthub_worker=debug,talenthub_notify=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = talenthub_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    talenthub_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Worker connected to database");

    let mailer = EmailConfig::from_env().map(EmailDelivery::new);
    if mailer.is_none() {
        tracing::info!("SMTP not configured, overdue reminder emails disabled");
    }

    let cancel = CancellationToken::new();

    let summary_job = ApplicationSummaryJob::new(pool.clone());
    let summary_cancel = cancel.clone();
    let summary_handle = tokio::spawn(async move {
        summary_job.run(summary_cancel).await;
    });

    let reminder_job = OnboardingReminderJob::new(pool, mailer);
    let reminder_cancel = cancel.clone();
    let reminder_handle = tokio::spawn(async move {
        reminder_job.run(reminder_cancel).await;
    });

    tracing::info!("Worker running (application summary, onboarding reminder)");

    shutdown_signal().await;
    cancel.cancel();
    let _ = summary_handle.await;
    let _ = reminder_handle.await;
    tracing::info!("Worker shut down");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), shutting down");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
