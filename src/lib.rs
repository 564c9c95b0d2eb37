pub mod aggregator;
pub mod bridge;
pub mod constants;
pub mod error;
pub mod models;
pub mod platform;
#[cfg(test)]
mod test_utils;
pub mod validation;

pub use aggregator::{AggregatorConfig, UsageAggregator};
pub use bridge::{Method, MethodCall, MethodResponse, UsageBridge};
pub use error::UsageError;
pub use models::{
    Granularity, TrackedApp, UsageRecord, UsageReport, UsageWindow, SOCIAL_MEDIA_APPS,
};
pub use platform::{CallerIdentity, OpMode};

#[cfg(target_os = "android")]
use crate::platform::AndroidPlatform;
#[cfg(target_os = "android")]
use std::sync::Arc;

/// Build the bridge for the running Android app from its VM and context.
#[cfg(target_os = "android")]
pub fn android_bridge(
    vm: jni::JavaVM,
    context: jni::objects::GlobalRef,
    config: AggregatorConfig,
) -> Result<UsageBridge, UsageError> {
    let platform = Arc::new(AndroidPlatform::new(vm, context));
    let caller = platform.caller_identity()?;
    log::info!("Usage bridge ready for {} (uid {})", caller.package, caller.uid);

    let aggregator = UsageAggregator::from_platform(caller, &platform).with_config(config)?;
    Ok(UsageBridge::new(Arc::new(aggregator)))
}
