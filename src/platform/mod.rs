pub mod fault;
pub mod types;

pub use fault::{release_fault, ExceptionState};

pub use types::{
    settings_action_for, CallerIdentity, Clock, InstallCheck, OpMode, PermissionCheck,
    SettingsNavigator, SystemClock, UsageDataSource,
};

#[cfg(target_os = "android")]
pub mod android;

#[cfg(target_os = "android")]
pub use android::AndroidPlatform;
