use crate::constants::MILLIS_PER_HOUR;
use serde::Deserialize;

/// Half-open time range `[start_ms, end_ms)` in Unix epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl UsageWindow {
    /// The `window_secs` seconds ending at `end_ms`.
    pub fn trailing(end_ms: i64, window_secs: i64) -> Self {
        Self {
            start_ms: end_ms.saturating_sub(window_secs.saturating_mul(1000)),
            end_ms,
        }
    }
}

/// Bucket size requested from the usage data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Best,
}

impl Granularity {
    /// Interval constant understood by the Android usage-stats service.
    pub fn interval_code(self) -> i32 {
        match self {
            Self::Daily => 0,
            Self::Weekly => 1,
            Self::Monthly => 2,
            Self::Yearly => 3,
            Self::Best => 4,
        }
    }
}

/// Raw foreground time for one application, as reported by the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub identifier: String,
    pub foreground_ms: u64,
}

impl UsageRecord {
    pub fn new(identifier: &str, foreground_ms: u64) -> Self {
        Self {
            identifier: identifier.to_string(),
            foreground_ms,
        }
    }

    #[allow(
        clippy::as_conversions,
        clippy::cast_precision_loss,
        reason = "foreground time stays far below 2^52 ms"
    )]
    pub fn foreground_hours(&self) -> f64 {
        self.foreground_ms as f64 / MILLIS_PER_HOUR as f64
    }
}
