pub mod report;
pub mod tracked_app;
pub mod usage;

pub use report::UsageReport;
pub use tracked_app::{TrackedApp, SOCIAL_MEDIA_APPS};
pub use usage::{Granularity, UsageRecord, UsageWindow};
