use crate::constants::{DEFAULT_WINDOW_SECS, OPSTR_GET_USAGE_STATS};
use crate::error::UsageError;
use crate::models::{Granularity, TrackedApp, UsageReport, UsageWindow, SOCIAL_MEDIA_APPS};
use crate::platform::{
    CallerIdentity, Clock, InstallCheck, OpMode, PermissionCheck, SettingsNavigator, SystemClock,
    UsageDataSource,
};
use crate::validation::{validate_registry, validate_window_secs};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    pub window_secs: i64,
    pub granularity: Granularity,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_WINDOW_SECS,
            granularity: Granularity::Daily,
        }
    }
}

impl AggregatorConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, UsageError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), UsageError> {
        validate_window_secs(self.window_secs)
    }
}

/// Turns permissioned OS usage data into per-app foreground hours.
///
/// Holds only immutable configuration and shared capability handles, so a
/// single instance can serve overlapping calls.
pub struct UsageAggregator {
    config: AggregatorConfig,
    caller: CallerIdentity,
    registry: &'static [TrackedApp],
    permission: Arc<dyn PermissionCheck>,
    navigator: Arc<dyn SettingsNavigator>,
    source: Arc<dyn UsageDataSource>,
    installs: Arc<dyn InstallCheck>,
    clock: Arc<dyn Clock>,
}

impl UsageAggregator {
    pub fn new(
        caller: CallerIdentity,
        permission: Arc<dyn PermissionCheck>,
        navigator: Arc<dyn SettingsNavigator>,
        source: Arc<dyn UsageDataSource>,
        installs: Arc<dyn InstallCheck>,
    ) -> Self {
        Self {
            config: AggregatorConfig::default(),
            caller,
            registry: SOCIAL_MEDIA_APPS,
            permission,
            navigator,
            source,
            installs,
            clock: Arc::new(SystemClock),
        }
    }

    /// Build from one adapter that provides every capability.
    pub fn from_platform<P>(caller: CallerIdentity, platform: &Arc<P>) -> Self
    where
        P: PermissionCheck + SettingsNavigator + UsageDataSource + InstallCheck + 'static,
    {
        Self::new(
            caller,
            Arc::<P>::clone(platform),
            Arc::<P>::clone(platform),
            Arc::<P>::clone(platform),
            Arc::<P>::clone(platform),
        )
    }

    pub fn with_config(mut self, config: AggregatorConfig) -> Result<Self, UsageError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_registry(mut self, registry: &'static [TrackedApp]) -> Result<Self, UsageError> {
        validate_registry(registry)?;
        self.registry = registry;
        Ok(self)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Whether usage access is granted to this process. Any mode other than
    /// allowed counts as not granted.
    pub fn has_permission(&self) -> bool {
        let mode = self.permission.check_op(OPSTR_GET_USAGE_STATS, &self.caller);
        log::debug!("Usage access mode for {}: {mode:?}", self.caller.package);
        mode == OpMode::Allowed
    }

    /// Send the user to the usage-access settings screen. Returns as soon as
    /// navigation was triggered; the user's decision is never observed.
    pub fn request_permission(&self) -> Result<(), UsageError> {
        self.navigator
            .open_settings_for(OPSTR_GET_USAGE_STATS)
            .inspect_err(|e| log::error!("Failed to open usage access settings: {e}"))
    }

    /// The trailing window ending now.
    pub fn current_window(&self) -> UsageWindow {
        UsageWindow::trailing(self.clock.now_ms(), self.config.window_secs)
    }

    /// Foreground hours over the trailing window for tracked apps that are
    /// installed and have usage data. Empty without permission.
    pub fn usage_report(&self) -> Result<UsageReport, UsageError> {
        let mut report = UsageReport::new();

        if !self.has_permission() {
            log::debug!("Usage access not granted, returning empty report");
            return Ok(report);
        }

        let window = self.current_window();
        let records = self
            .source
            .query(&window, self.config.granularity)
            .inspect_err(|e| log::error!("Failed to query usage stats: {e}"))?;

        for app in self.registry {
            // First bucket wins, as the OS orders buckets oldest first
            let Some(record) = records.iter().find(|r| r.identifier == app.identifier) else {
                continue;
            };
            if self.is_installed(app) {
                report.insert(app.display_name, record.foreground_hours());
            }
        }

        log::debug!(
            "Usage report over {}..{}: {} of {} tracked apps ({})",
            window.start_ms,
            window.end_ms,
            report.len(),
            self.registry.len(),
            report.names().collect::<Vec<_>>().join(", ")
        );

        Ok(report)
    }

    /// Display names of installed tracked apps, in registry order.
    pub fn installed_tracked_apps(&self) -> Vec<String> {
        self.registry
            .iter()
            .filter(|app| self.is_installed(app))
            .map(|app| app.display_name.to_string())
            .collect()
    }

    // A failed lookup only drops that app
    fn is_installed(&self, app: &TrackedApp) -> bool {
        match self.installs.is_installed(app.identifier) {
            Ok(installed) => installed,
            Err(e) => {
                log::warn!(
                    "Install check for {} failed, treating as absent: {e}",
                    app.identifier
                );
                false
            }
        }
    }
}
