//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;
use talenthub_core::types::DbId;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamp to sane bounds: limit in `1..=100` (default 50), offset >= 0.
    pub fn clamped(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(50).clamp(1, 100);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Query parameters for the applications list (`?status=&job_id=`).
#[derive(Debug, Deserialize)]
pub struct ApplicationFilterParams {
    pub status: Option<String>,
    pub job_id: Option<DbId>,
}

/// Query parameters for step listing (`?scope=`).
#[derive(Debug, Deserialize)]
pub struct ScopeParams {
    pub scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps() {
        let p = PaginationParams {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(p.clamped(), (100, 0));

        let p = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(p.clamped(), (50, 0));
    }
}
