//! Shared test utilities.
//!
//! Provides a scripted in-memory platform that records how it was called,
//! plus a fixed clock.

#![cfg(test)]

use crate::error::UsageError;
use crate::models::{Granularity, UsageRecord, UsageWindow};
use crate::platform::{
    CallerIdentity, Clock, InstallCheck, OpMode, PermissionCheck, SettingsNavigator,
    UsageDataSource,
};
use std::collections::HashSet;
use std::sync::Mutex;

/// Fixed "now" used by aggregator tests: 2023-11-15T00:00:00Z.
pub const TEST_NOW_MS: i64 = 1_700_006_400_000;

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Scripted platform: answers from its configuration and logs every call.
pub struct FakePlatform {
    pub mode: OpMode,
    pub records: Vec<UsageRecord>,
    pub installed: HashSet<String>,
    pub broken_lookups: HashSet<String>,
    pub source_down: bool,
    pub settings_down: bool,
    pub permission_checks: Mutex<Vec<(String, CallerIdentity)>>,
    pub opened_settings: Mutex<Vec<String>>,
    pub queries: Mutex<Vec<(UsageWindow, Granularity)>>,
    pub install_lookups: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn with_mode(mode: OpMode) -> Self {
        Self {
            mode,
            records: Vec::new(),
            installed: HashSet::new(),
            broken_lookups: HashSet::new(),
            source_down: false,
            settings_down: false,
            permission_checks: Mutex::new(Vec::new()),
            opened_settings: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            install_lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn granted() -> Self {
        Self::with_mode(OpMode::Allowed)
    }

    pub fn denied() -> Self {
        Self::with_mode(OpMode::Ignored)
    }

    pub fn record(mut self, identifier: &str, foreground_ms: u64) -> Self {
        self.records.push(UsageRecord::new(identifier, foreground_ms));
        self
    }

    pub fn install(mut self, identifier: &str) -> Self {
        self.installed.insert(identifier.to_string());
        self
    }

    pub fn break_lookup(mut self, identifier: &str) -> Self {
        self.broken_lookups.insert(identifier.to_string());
        self
    }

    pub fn source_down(mut self) -> Self {
        self.source_down = true;
        self
    }

    pub fn settings_down(mut self) -> Self {
        self.settings_down = true;
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl PermissionCheck for FakePlatform {
    fn check_op(&self, op: &str, caller: &CallerIdentity) -> OpMode {
        self.permission_checks
            .lock()
            .unwrap()
            .push((op.to_string(), caller.clone()));
        self.mode
    }
}

impl SettingsNavigator for FakePlatform {
    fn open_settings_for(&self, op: &str) -> Result<(), UsageError> {
        if self.settings_down {
            return Err(UsageError::unavailable("settings navigation", "no activity"));
        }
        self.opened_settings.lock().unwrap().push(op.to_string());
        Ok(())
    }
}

impl UsageDataSource for FakePlatform {
    fn query(
        &self,
        window: &UsageWindow,
        granularity: Granularity,
    ) -> Result<Vec<UsageRecord>, UsageError> {
        self.queries.lock().unwrap().push((*window, granularity));
        if self.source_down {
            return Err(UsageError::unavailable("usage stats service", "service not running"));
        }
        Ok(self.records.clone())
    }
}

impl InstallCheck for FakePlatform {
    fn is_installed(&self, identifier: &str) -> Result<bool, UsageError> {
        self.install_lookups.lock().unwrap().push(identifier.to_string());
        if self.broken_lookups.contains(identifier) {
            return Err(UsageError::unavailable("package manager", "binder died"));
        }
        Ok(self.installed.contains(identifier))
    }
}
