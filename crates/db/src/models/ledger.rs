//! Onboarding ledger entity models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use talenthub_core::types::{DbId, Timestamp};

/// Ledger row status. Rows are only written when a task completes, so
/// every row carries `done`; the column stays textual so historical
/// imports with other markers still load.
pub const STATUS_DONE: &str = "done";

/// A row from the `onboarding_ledger` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LedgerEntry {
    pub user_id: DbId,
    pub completion_key: String,
    pub status: String,
    pub submission: Option<serde_json::Value>,
    pub files: serde_json::Value,
    pub updated_at: Timestamp,
}

/// A file attached to a ledger entry, stored inside the `files` JSONB
/// list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerFile {
    pub name: String,
    pub path: String,
}

impl LedgerEntry {
    /// Parse the `files` JSONB list. Unparseable content yields an empty
    /// list rather than an error.
    pub fn parsed_files(&self) -> Vec<LedgerFile> {
        serde_json::from_value(self.files.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(files: serde_json::Value) -> LedgerEntry {
        LedgerEntry {
            user_id: 1,
            completion_key: "upload_id_tax".into(),
            status: STATUS_DONE.into(),
            submission: None,
            files,
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn files_parse() {
        let e = entry(json!([{ "name": "id.pdf", "path": "uploads/1/id.pdf" }]));
        let files = e.parsed_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "id.pdf");
    }

    #[test]
    fn malformed_files_yield_empty_list() {
        assert!(entry(json!("not a list")).parsed_files().is_empty());
        assert!(entry(json!([{"nope": true}])).parsed_files().is_empty());
    }
}
