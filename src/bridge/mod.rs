//! Named-operation bridge between the application shell and the aggregator.
//!
//! The shell sends a `MethodCall` naming one of four operations and gets back
//! a `MethodResponse`. Unknown names answer `NotImplemented` so the shell can
//! tell a missing feature apart from an empty result.

use crate::aggregator::UsageAggregator;
use crate::constants::CHANNEL;
use crate::error::UsageError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub const ERROR_USAGE_UNAVAILABLE: &str = "USAGE_UNAVAILABLE";
pub const ERROR_BAD_REQUEST: &str = "BAD_REQUEST";
pub const ERROR_ENCODING: &str = "ENCODING_FAILED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    HasUsageStatsPermission,
    RequestUsageStatsPermission,
    GetSocialMediaUsage,
    GetInstalledSocialApps,
}

impl Method {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hasUsageStatsPermission" => Some(Self::HasUsageStatsPermission),
            "requestUsageStatsPermission" => Some(Self::RequestUsageStatsPermission),
            "getSocialMediaUsage" => Some(Self::GetSocialMediaUsage),
            "getInstalledSocialApps" => Some(Self::GetInstalledSocialApps),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::HasUsageStatsPermission => "hasUsageStatsPermission",
            Self::RequestUsageStatsPermission => "requestUsageStatsPermission",
            Self::GetSocialMediaUsage => "getSocialMediaUsage",
            Self::GetInstalledSocialApps => "getInstalledSocialApps",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            arguments: Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum MethodResponse {
    #[serde(rename = "success")]
    Success { result: Value },
    #[serde(rename = "error")]
    Error { code: String, message: String },
    #[serde(rename = "not_implemented")]
    NotImplemented,
}

impl MethodResponse {
    fn encode<T: Serialize>(result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(result) => Self::Success { result },
            Err(e) => {
                log::error!("Failed to encode bridge result: {e}");
                Self::Error {
                    code: ERROR_ENCODING.to_string(),
                    message: e.to_string(),
                }
            }
        }
    }

    fn unavailable(error: UsageError) -> Self {
        Self::Error {
            code: ERROR_USAGE_UNAVAILABLE.to_string(),
            message: error.into(),
        }
    }
}

pub struct UsageBridge {
    aggregator: Arc<UsageAggregator>,
}

impl UsageBridge {
    pub fn new(aggregator: Arc<UsageAggregator>) -> Self {
        Self { aggregator }
    }

    pub fn channel(&self) -> &'static str {
        CHANNEL
    }

    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        match Method::from_name(&call.method) {
            Some(method) => self.dispatch(method),
            None => {
                log::warn!("Unknown method on {CHANNEL}: {}", call.method);
                MethodResponse::NotImplemented
            }
        }
    }

    /// Decode a JSON `MethodCall`, handle it and encode the response.
    /// Malformed requests get a `BAD_REQUEST` error response.
    pub fn handle_json(&self, request: &[u8]) -> Result<Vec<u8>, UsageError> {
        let response = match serde_json::from_slice::<MethodCall>(request) {
            Ok(call) => self.handle(&call),
            Err(e) => {
                log::warn!("Malformed request on {CHANNEL}: {e}");
                MethodResponse::Error {
                    code: ERROR_BAD_REQUEST.to_string(),
                    message: e.to_string(),
                }
            }
        };

        Ok(serde_json::to_vec(&response)?)
    }

    fn dispatch(&self, method: Method) -> MethodResponse {
        log::debug!("Handling {} on {CHANNEL}", method.name());
        match method {
            Method::HasUsageStatsPermission => MethodResponse::Success {
                result: Value::Bool(self.aggregator.has_permission()),
            },
            Method::RequestUsageStatsPermission => match self.aggregator.request_permission() {
                Ok(()) => MethodResponse::Success { result: Value::Null },
                Err(e) => MethodResponse::unavailable(e),
            },
            Method::GetSocialMediaUsage => match self.aggregator.usage_report() {
                Ok(report) => MethodResponse::encode(&report),
                Err(e) => MethodResponse::unavailable(e),
            },
            Method::GetInstalledSocialApps => {
                MethodResponse::encode(&self.aggregator.installed_tracked_apps())
            }
        }
    }
}
