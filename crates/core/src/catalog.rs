//! Catalog resolution: turning steps into expected completion keys.
//!
//! The expected-key set is the denominator of every progress figure, so
//! both the board and the per-employee detail view must build it through
//! this module and nothing else.

use std::collections::{BTreeSet, HashSet};

use crate::completion_key::completion_key;
use crate::task::Step;

/// Per-step progress for the detail view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StepProgress {
    /// Derived key per task, positionally aligned with the step's tasks.
    /// `None` marks a task whose key could not be derived; it is excluded
    /// from the totals.
    pub keys: Vec<Option<String>>,
    pub total: usize,
    pub done: usize,
}

/// Build the deduplicated set of completion keys expected from `steps`.
///
/// Tasks with no derivable key are skipped with a warning rather than
/// failing the whole catalog; a single broken task must not blank out an
/// employee's progress view.
pub fn expected_keys(steps: &[Step]) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    for step in steps {
        for task in &step.tasks {
            match completion_key(task, &step.step_id) {
                Ok(key) => {
                    keys.insert(key);
                }
                Err(e) => {
                    tracing::warn!(
                        step_id = %step.step_id,
                        label = %task.label,
                        error = %e,
                        "skipping task with no derivable completion key"
                    );
                }
            }
        }
    }
    keys
}

/// Resolve one step's tasks against the set of done keys.
pub fn step_progress(step: &Step, done_keys: &HashSet<String>) -> StepProgress {
    let keys: Vec<Option<String>> = step
        .tasks
        .iter()
        .map(|task| completion_key(task, &step.step_id).ok())
        .collect();
    let total = keys.iter().flatten().count();
    let done = keys
        .iter()
        .flatten()
        .filter(|key| done_keys.contains(key.as_str()))
        .count();
    StepProgress { keys, total, done }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, TaskDetail, TaskKind};

    fn step(step_id: &str, tasks: Vec<Task>) -> Step {
        Step {
            step_id: step_id.into(),
            scope: "base".into(),
            title: step_id.into(),
            summary: String::new(),
            sort_order: 0,
            tasks,
        }
    }

    fn upload(kind: TaskKind) -> Task {
        Task {
            label: format!("Upload {kind}"),
            id: None,
            completion_key: None,
            detail: TaskDetail::Upload { kind },
        }
    }

    #[test]
    fn expected_keys_dedupes_across_steps() {
        let steps = vec![
            step("paperwork", vec![upload(TaskKind::IdTax)]),
            step("more-paperwork", vec![upload(TaskKind::IdTax)]),
        ];
        let keys = expected_keys(&steps);
        assert_eq!(keys.len(), 1);
        assert!(keys.contains("upload_id_tax"));
    }

    #[test]
    fn expected_keys_skips_underivable_tasks() {
        let broken = Task {
            label: "___".into(),
            id: None,
            completion_key: None,
            detail: TaskDetail::Doc { url: None },
        };
        let steps = vec![step("intro", vec![broken, upload(TaskKind::SignedContract)])];
        let keys = expected_keys(&steps);
        assert_eq!(keys.len(), 1);
        assert!(keys.contains("upload_signed_contract"));
    }

    #[test]
    fn step_progress_counts_only_derivable_tasks() {
        let broken = Task {
            label: "___".into(),
            id: None,
            completion_key: None,
            detail: TaskDetail::Doc { url: None },
        };
        let s = step(
            "paperwork",
            vec![
                upload(TaskKind::IdTax),
                upload(TaskKind::SignedContract),
                broken,
            ],
        );
        let done: HashSet<String> = ["upload_id_tax".to_string()].into();
        let progress = step_progress(&s, &done);
        assert_eq!(progress.total, 2);
        assert_eq!(progress.done, 1);
        assert_eq!(progress.keys.len(), 3);
        assert!(progress.keys[2].is_none());
    }
}
