//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod department_repo;
pub mod job_repo;
pub mod ledger_repo;
pub mod notification_repo;
pub mod session_repo;
pub mod step_repo;
pub mod user_repo;
