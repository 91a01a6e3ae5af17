//! Completion-key derivation.
//!
//! A completion key ties a catalog task to a ledger row. Keys must be
//! stable across catalog edits that do not change a task's identity,
//! which is why derivation is deterministic and an explicit override
//! always wins over any derived value.

use crate::error::CoreError;
use crate::slug::slug;
use crate::task::{Task, TaskDetail};

/// Derive the completion key for `task` within the step `step_id`.
///
/// Resolution order:
/// 1. a non-empty explicit `completion_key` on the task
/// 2. a type-specific derived key
/// 3. `task_<slug(id)>`, then `task_<slug(label)>`
///
/// Returns [`CoreError::MissingKey`] when nothing yields a non-empty key.
pub fn completion_key(task: &Task, step_id: &str) -> Result<String, CoreError> {
    if let Some(explicit) = &task.completion_key {
        let explicit = explicit.trim();
        if !explicit.is_empty() {
            return Ok(explicit.to_string());
        }
    }

    let derived = match &task.detail {
        TaskDetail::Course { course_id } => course_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| format!("training_{id}")),
        TaskDetail::Page { route } => route
            .as_deref()
            .map(|r| slug(r.trim_start_matches('/')))
            .filter(|s| !s.is_empty())
            .map(|s| format!("page_{s}")),
        TaskDetail::Video { url } => url
            .as_deref()
            .map(slug)
            .filter(|s| !s.is_empty())
            .map(|s| format!("video_{s}")),
        TaskDetail::Doc { url } => url
            .as_deref()
            .map(slug)
            .filter(|s| !s.is_empty())
            .map(|s| format!("doc_{s}")),
        TaskDetail::Upload { kind } => Some(format!("upload_{kind}")),
        TaskDetail::Form { kind } => Some(format!("{}--form-{}", slug(step_id), slug(kind.as_str()))),
    };
    if let Some(key) = derived {
        return Ok(key);
    }

    let fallback = task
        .id
        .as_deref()
        .map(slug)
        .filter(|s| !s.is_empty())
        .or_else(|| Some(slug(&task.label)).filter(|s| !s.is_empty()));
    match fallback {
        Some(s) => Ok(format!("task_{s}")),
        None => Err(CoreError::MissingKey(format!(
            "task '{}' in step '{step_id}' yields no completion key",
            task.label
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::task::TaskKind;

    fn task(detail: TaskDetail) -> Task {
        Task {
            label: "Some task".into(),
            id: None,
            completion_key: None,
            detail,
        }
    }

    #[test]
    fn explicit_override_always_wins() {
        let mut t = task(TaskDetail::Upload {
            kind: TaskKind::IdTax,
        });
        t.completion_key = Some("custom_key".into());
        assert_eq!(completion_key(&t, "paperwork").unwrap(), "custom_key");
    }

    #[test]
    fn blank_override_is_ignored() {
        let mut t = task(TaskDetail::Upload {
            kind: TaskKind::IdTax,
        });
        t.completion_key = Some("   ".into());
        assert_eq!(completion_key(&t, "paperwork").unwrap(), "upload_id_tax");
    }

    #[test]
    fn course_key_uses_raw_course_id() {
        let t = task(TaskDetail::Course {
            course_id: Some("SEC-101".into()),
        });
        assert_eq!(completion_key(&t, "s").unwrap(), "training_SEC-101");
    }

    #[test]
    fn page_key_drops_leading_slash() {
        let t = task(TaskDetail::Page {
            route: Some("/onboarding/policies".into()),
        });
        assert_eq!(completion_key(&t, "s").unwrap(), "page_onboarding_policies");
    }

    #[test]
    fn video_and_doc_keys_slug_the_url() {
        let v = task(TaskDetail::Video {
            url: Some("https://videos.example.com/intro".into()),
        });
        assert_eq!(
            completion_key(&v, "s").unwrap(),
            "video_videos-example-com_intro"
        );

        let d = task(TaskDetail::Doc {
            url: Some("https://docs.example.com/handbook".into()),
        });
        assert_eq!(
            completion_key(&d, "s").unwrap(),
            "doc_docs-example-com_handbook"
        );
    }

    #[test]
    fn upload_key_uses_kind() {
        let t = task(TaskDetail::Upload {
            kind: TaskKind::SignedContract,
        });
        assert_eq!(completion_key(&t, "s").unwrap(), "upload_signed_contract");
        let t = task(TaskDetail::Upload {
            kind: TaskKind::IdTax,
        });
        assert_eq!(completion_key(&t, "s").unwrap(), "upload_id_tax");
    }

    #[test]
    fn form_key_combines_step_and_kind() {
        let t = task(TaskDetail::Form {
            kind: TaskKind::BankInfo,
        });
        assert_eq!(
            completion_key(&t, "HR Paperwork").unwrap(),
            "hr-paperwork--form-bank_info"
        );
    }

    #[test]
    fn fallback_prefers_id_over_label() {
        let mut t = task(TaskDetail::Page { route: None });
        t.id = Some("Meet The Team".into());
        assert_eq!(completion_key(&t, "s").unwrap(), "task_meet-the-team");

        t.id = None;
        t.label = "Say Hello".into();
        assert_eq!(completion_key(&t, "s").unwrap(), "task_say-hello");
    }

    #[test]
    fn nothing_to_derive_is_an_error() {
        let t = Task {
            label: "___".into(),
            id: None,
            completion_key: None,
            detail: TaskDetail::Video { url: None },
        };
        assert_matches!(completion_key(&t, "s"), Err(CoreError::MissingKey(_)));
    }
}
