//! Domain logic for the TalentHub portal.
//!
//! Everything in this crate is pure and synchronous: the onboarding
//! progress engine (slug/completion-key derivation, catalog flattening,
//! progress aggregation), the task/step domain types, role normalization,
//! and the centralized capability checks. Database and HTTP concerns live
//! in `talenthub-db` and `talenthub-api`.

pub mod authz;
pub mod catalog;
pub mod completion_key;
pub mod error;
pub mod forms;
pub mod progress;
pub mod roles;
pub mod slug;
pub mod task;
pub mod types;
