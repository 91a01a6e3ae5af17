//! HTTP handlers, one module per resource.

pub mod application;
pub mod auth;
pub mod department;
pub mod job;
pub mod notification;
pub mod onboarding;
pub mod progress;
pub mod step;
pub mod user_admin;
