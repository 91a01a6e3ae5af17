//! Notification delivery and the periodic summary jobs.

pub mod email;
pub mod reminder;
pub mod summary;

pub use email::{EmailConfig, EmailDelivery, EmailError};
pub use reminder::OnboardingReminderJob;
pub use summary::ApplicationSummaryJob;
