//! Task and step domain types.
//!
//! Tasks are stored as a JSONB list on each step document. Historically
//! they were duck-typed ("string or object"); they are now a tagged
//! variant with required-field validation performed once when a catalog
//! is saved or loaded, so consumers never re-check shapes.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Sub-type for upload and form tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    SignedContract,
    IdTax,
    PersonalDetails,
    BankInfo,
}

impl TaskKind {
    /// Canonical wire/key spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::SignedContract => "signed_contract",
            TaskKind::IdTax => "id_tax",
            TaskKind::PersonalDetails => "personal_details",
            TaskKind::BankInfo => "bank_info",
        }
    }

    /// Whether this kind is valid for an upload task.
    pub fn is_upload_kind(self) -> bool {
        matches!(self, TaskKind::SignedContract | TaskKind::IdTax)
    }

    /// Whether this kind is valid for a form task.
    pub fn is_form_kind(self) -> bool {
        matches!(self, TaskKind::PersonalDetails | TaskKind::BankInfo)
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific task payload. The `type` field discriminates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskDetail {
    /// Visit an internal page.
    Page {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        route: Option<String>,
    },
    /// Complete a training course.
    Course {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        course_id: Option<String>,
    },
    /// Watch a video.
    Video {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    /// Read a document.
    Doc {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    /// Upload one or more files (PDF).
    Upload { kind: TaskKind },
    /// Fill in a structured form.
    Form { kind: TaskKind },
}

/// One completable unit inside a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Display text.
    pub label: String,
    /// Optional id, scoped to the owning step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Explicit completion-key override. Always wins over derivation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_key: Option<String>,
    #[serde(flatten)]
    pub detail: TaskDetail,
}

impl Task {
    /// Validate required fields for this task's type.
    ///
    /// Called when a step is saved; load paths are lenient instead (see
    /// [`parse_tasks`]).
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.label.trim().is_empty() {
            return Err(CoreError::Validation("Task label must not be empty".into()));
        }
        match &self.detail {
            TaskDetail::Upload { kind } if !kind.is_upload_kind() => {
                Err(CoreError::Validation(format!(
                    "'{kind}' is not a valid upload kind"
                )))
            }
            TaskDetail::Form { kind } if !kind.is_form_kind() => Err(CoreError::Validation(
                format!("'{kind}' is not a valid form kind"),
            )),
            _ => Ok(()),
        }
    }
}

/// An ordered onboarding phase containing tasks.
///
/// `scope` is `"base"` (applies to everyone) or a department id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub step_id: String,
    pub scope: String,
    pub title: String,
    pub summary: String,
    pub sort_order: i32,
    pub tasks: Vec<Task>,
}

/// Leniently parse a step's raw `tasks` JSONB value.
///
/// A non-list value yields an empty task list; individual entries that do
/// not parse as a valid [`Task`] are skipped. Catalog authors may save a
/// task before wiring it up completely, and a half-authored task must not
/// break every consumer of the catalog.
pub fn parse_tasks(raw: &serde_json::Value) -> Vec<Task> {
    let Some(entries) = raw.as_array() else {
        if !raw.is_null() {
            tracing::debug!("step tasks field is not a list, treating as empty");
        }
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<Task>(entry.clone()) {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unparseable task entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tagged_roundtrip() {
        let task = Task {
            label: "Read the handbook".into(),
            id: None,
            completion_key: None,
            detail: TaskDetail::Doc {
                url: Some("https://intranet/handbook.pdf".into()),
            },
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "doc");
        let back: Task = serde_json::from_value(value).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn upload_requires_upload_kind() {
        let ok = Task {
            label: "Upload contract".into(),
            id: None,
            completion_key: None,
            detail: TaskDetail::Upload {
                kind: TaskKind::SignedContract,
            },
        };
        assert!(ok.validate().is_ok());

        let bad = Task {
            detail: TaskDetail::Upload {
                kind: TaskKind::BankInfo,
            },
            ..ok
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn form_requires_form_kind() {
        let bad = Task {
            label: "Bank details".into(),
            id: None,
            completion_key: None,
            detail: TaskDetail::Form {
                kind: TaskKind::IdTax,
            },
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn empty_label_rejected() {
        let task = Task {
            label: "  ".into(),
            id: None,
            completion_key: None,
            detail: TaskDetail::Page { route: None },
        };
        assert!(task.validate().is_err());
    }

    #[test]
    fn parse_tasks_skips_invalid_entries() {
        let raw = json!([
            { "type": "page", "label": "Welcome", "route": "/welcome" },
            { "type": "nonsense", "label": "???" },
            "just a string",
            { "type": "upload", "label": "Contract", "kind": "signed_contract" },
        ]);
        let tasks = parse_tasks(&raw);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].label, "Welcome");
        assert_eq!(tasks[1].label, "Contract");
    }

    #[test]
    fn parse_tasks_tolerates_non_list() {
        assert!(parse_tasks(&json!("oops")).is_empty());
        assert!(parse_tasks(&json!(null)).is_empty());
        assert!(parse_tasks(&json!({})).is_empty());
    }
}
