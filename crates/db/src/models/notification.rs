//! Notification entity models.

use serde::Serialize;
use sqlx::FromRow;
use talenthub_core::types::{DbId, Timestamp};

/// Notification kinds written by the portal and the scheduled jobs.
pub const KIND_APPS_SUMMARY: &str = "apps_summary";
pub const KIND_ONBOARDING_SUMMARY: &str = "onboarding_summary";
pub const KIND_STATUS_CHANGE: &str = "status_change";

/// A row from the `notifications` table.
///
/// Personal notifications have `user_id` set; broadcast summaries have
/// `audience_roles` set instead, with `read_by` tracking which users
/// dismissed them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub user_id: Option<DbId>,
    pub audience_roles: serde_json::Value,
    pub items: serde_json::Value,
    pub read_by: serde_json::Value,
    pub created_at: Timestamp,
}
