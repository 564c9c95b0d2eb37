// src/constants.rs

/// Milliseconds in one hour (60 * 60 * 1000)
pub const MILLIS_PER_HOUR: u64 = 3_600_000;

/// Seconds in one day (24 * 60 * 60)
pub const SECS_PER_DAY: i64 = 86400;

/// Default trailing usage window in seconds (24 hours)
pub const DEFAULT_WINDOW_SECS: i64 = SECS_PER_DAY;

/// Maximum trailing usage window in seconds (366 days)
pub const MAX_WINDOW_SECS: i64 = 366 * SECS_PER_DAY;

/// Name of the bridge channel the shell talks to
pub const CHANNEL: &str = "deeptrack/usage_stats";

/// App-ops operation guarding access to usage statistics
pub const OPSTR_GET_USAGE_STATS: &str = "android:get_usage_stats";

/// Settings action that shows the usage-access screen
pub const ACTION_USAGE_ACCESS_SETTINGS: &str = "android.settings.USAGE_ACCESS_SETTINGS";

/// Maximum length of a tracked app display name
pub const MAX_DISPLAY_NAME_LEN: usize = 100;
