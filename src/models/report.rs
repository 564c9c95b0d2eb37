use serde::Serialize;
use serde_json::{Map, Value};

/// Foreground hours per tracked app display name.
///
/// Keys keep insertion order, which the aggregator drives from the registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UsageReport {
    entries: Map<String, Value>,
}

impl UsageReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hours for `name`, replacing any earlier value.
    pub fn insert(&mut self, name: &str, hours: f64) {
        self.entries.insert(name.to_string(), Value::from(hours));
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.get(name).and_then(Value::as_f64)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
