use crate::constants::{ACTION_USAGE_ACCESS_SETTINGS, OPSTR_GET_USAGE_STATS};
use crate::error::UsageError;
use crate::models::{Granularity, UsageRecord, UsageWindow};
use std::time::{SystemTime, UNIX_EPOCH};

/// Grant state of an app-ops operation, mirroring the OS modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Allowed,
    Ignored,
    Errored,
    Default,
    Foreground,
}

impl OpMode {
    /// Map the integer mode returned by the app-ops service.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Allowed,
            1 => Self::Ignored,
            3 => Self::Default,
            4 => Self::Foreground,
            _ => Self::Errored,
        }
    }
}

/// Process the permission question is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub uid: u32,
    pub package: String,
}

impl CallerIdentity {
    pub fn new(uid: u32, package: &str) -> Self {
        Self {
            uid,
            package: package.to_string(),
        }
    }
}

/// Settings action that lets the user grant `op`, if the OS has one.
pub fn settings_action_for(op: &str) -> Option<&'static str> {
    match op {
        OPSTR_GET_USAGE_STATS => Some(ACTION_USAGE_ACCESS_SETTINGS),
        _ => None,
    }
}

pub trait PermissionCheck: Send + Sync {
    /// Current mode of `op` for `caller`. Must not block on user interaction.
    fn check_op(&self, op: &str, caller: &CallerIdentity) -> OpMode;
}

pub trait SettingsNavigator: Send + Sync {
    /// Open the settings surface where the user can grant `op`.
    fn open_settings_for(&self, op: &str) -> Result<(), UsageError>;
}

pub trait UsageDataSource: Send + Sync {
    fn query(
        &self,
        window: &UsageWindow,
        granularity: Granularity,
    ) -> Result<Vec<UsageRecord>, UsageError>;
}

pub trait InstallCheck: Send + Sync {
    /// `Ok(false)` when the package is absent, `Err` when the lookup itself failed.
    fn is_installed(&self, identifier: &str) -> Result<bool, UsageError>;
}

pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| i64::try_from(d.as_millis()).ok())
            .unwrap_or(0)
    }
}
