//! Progress aggregation over the expected-key set and the ledger.

use std::collections::{BTreeSet, HashSet};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Grace period granted when no explicit due date is set.
pub const DEFAULT_DUE_DAYS: i64 = 14;

/// Coarse onboarding state shown on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnboardingStatus {
    #[serde(rename = "Not started")]
    NotStarted,
    #[serde(rename = "In progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

/// Aggregated progress for one employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub done: usize,
    /// Rounded percentage in `0..=100`. Always 0 when `total` is 0.
    pub pct: u8,
    pub status: OnboardingStatus,
    /// Most recent ledger write, if any.
    pub last_updated: Option<Timestamp>,
    pub due_at: Option<Timestamp>,
}

/// Aggregate a ledger against the expected catalog keys.
///
/// Only keys present in `expected` count toward `done`; stale ledger rows
/// for keys removed from the catalog are ignored.
pub fn aggregate(
    expected: &BTreeSet<String>,
    done_keys: &HashSet<String>,
    last_updated: Option<Timestamp>,
    due_at: Option<Timestamp>,
) -> ProgressSnapshot {
    let total = expected.len();
    let done = expected
        .iter()
        .filter(|key| done_keys.contains(key.as_str()))
        .count();

    let pct = if total == 0 {
        0
    } else {
        ((done as f64 / total as f64) * 100.0).round() as u8
    };
    let status = if done == 0 {
        OnboardingStatus::NotStarted
    } else if done == total {
        OnboardingStatus::Done
    } else {
        OnboardingStatus::InProgress
    };

    ProgressSnapshot {
        total,
        done,
        pct,
        status,
        last_updated,
        due_at,
    }
}

/// Resolve an employee's onboarding due date.
///
/// An explicit due date wins; otherwise the start date plus
/// [`DEFAULT_DUE_DAYS`], at midnight UTC. `None` when neither is set.
pub fn resolve_due_at(explicit: Option<Timestamp>, start_date: Option<NaiveDate>) -> Option<Timestamp> {
    explicit.or_else(|| {
        start_date.map(|start| {
            (start + Duration::days(DEFAULT_DUE_DAYS))
                .and_hms_opt(0, 0, 0)
                .expect("midnight is always valid")
                .and_utc()
        })
    })
}

/// Whole days until `due_at`, rounding up. Negative when overdue.
pub fn days_left(due_at: Timestamp, now: Timestamp) -> i64 {
    let seconds = (due_at - now).num_seconds() as f64;
    (seconds / 86_400.0).ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn keys(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn done(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn partial_overlap() {
        let snapshot = aggregate(&keys(&["a", "b", "c"]), &done(&["a", "b", "d"]), None, None);
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.done, 2);
        assert_eq!(snapshot.pct, 67);
        assert_eq!(snapshot.status, OnboardingStatus::InProgress);
    }

    #[test]
    fn empty_catalog_is_not_started() {
        let snapshot = aggregate(&BTreeSet::new(), &done(&["a"]), None, None);
        assert_eq!(snapshot.total, 0);
        assert_eq!(snapshot.pct, 0);
        assert_eq!(snapshot.status, OnboardingStatus::NotStarted);
    }

    #[test]
    fn no_done_keys_is_not_started() {
        let snapshot = aggregate(&keys(&["a", "b"]), &HashSet::new(), None, None);
        assert_eq!(snapshot.done, 0);
        assert_eq!(snapshot.status, OnboardingStatus::NotStarted);
    }

    #[test]
    fn everything_done_is_done() {
        let snapshot = aggregate(&keys(&["a", "b"]), &done(&["a", "b"]), None, None);
        assert_eq!(snapshot.pct, 100);
        assert_eq!(snapshot.status, OnboardingStatus::Done);
    }

    #[test]
    fn stale_ledger_keys_are_ignored() {
        let snapshot = aggregate(&keys(&["a"]), &done(&["a", "removed_key"]), None, None);
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.done, 1);
        assert_eq!(snapshot.pct, 100);
    }

    #[test]
    fn pct_is_monotone_in_done_count() {
        let expected = keys(&["a", "b", "c", "d", "e"]);
        let all = ["a", "b", "c", "d", "e"];
        let mut last = 0;
        for n in 0..=all.len() {
            let snapshot = aggregate(&expected, &done(&all[..n]), None, None);
            assert!(snapshot.pct >= last);
            last = snapshot.pct;
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn explicit_due_date_wins() {
        let explicit = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(resolve_due_at(Some(explicit), Some(start)), Some(explicit));
    }

    #[test]
    fn due_date_defaults_to_start_plus_two_weeks() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let due = resolve_due_at(None, Some(start)).unwrap();
        assert_eq!(due, Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap());
        assert_eq!(resolve_due_at(None, None), None);
    }

    #[test]
    fn days_left_rounds_up_and_goes_negative() {
        let due = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(days_left(due, now), 5);

        let later = Utc.with_ymd_and_hms(2025, 1, 19, 12, 0, 0).unwrap();
        assert_eq!(days_left(due, later), -4);
    }
}
