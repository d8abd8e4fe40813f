/*!
 * Configuration
 * Runtime settings read from the environment
 */

use crate::core::limits::{DEFAULT_EVENT_CAPACITY, DEFAULT_LIST_CAPACITY, DEFAULT_OPERATION_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Capacity for process listings
pub const ENV_LIST_CAPACITY: &str = "HOSTPROC_LIST_CAPACITY";
/// Capacity for the event queue
pub const ENV_EVENT_CAPACITY: &str = "HOSTPROC_EVENT_CAPACITY";
/// `1` or `true` switches log output to JSON
pub const ENV_TRACE_JSON: &str = "HOSTPROC_TRACE_JSON";
/// Deadline in milliseconds for timed operations
pub const ENV_TIMEOUT_MS: &str = "HOSTPROC_TIMEOUT_MS";

/// hostproc settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HostprocConfig {
    pub list_capacity: usize,
    pub event_capacity: usize,
    pub trace_json: bool,
    #[serde(with = "duration_ms")]
    pub operation_timeout: Duration,
}

impl Default for HostprocConfig {
    fn default() -> Self {
        Self {
            list_capacity: DEFAULT_LIST_CAPACITY,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            trace_json: false,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }
}

impl HostprocConfig {
    /// Defaults overridden by any `HOSTPROC_*` variables that are set
    ///
    /// Malformed values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            list_capacity: parse_or(&lookup, ENV_LIST_CAPACITY, defaults.list_capacity),
            event_capacity: parse_or(&lookup, ENV_EVENT_CAPACITY, defaults.event_capacity),
            trace_json: lookup(ENV_TRACE_JSON)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.trace_json),
            operation_timeout: lookup(ENV_TIMEOUT_MS)
                .and_then(|v| parse_value::<u64>(ENV_TIMEOUT_MS, &v))
                .map(Duration::from_millis)
                .unwrap_or(defaults.operation_timeout),
        }
    }

    pub fn with_list_capacity(mut self, capacity: usize) -> Self {
        self.list_capacity = capacity;
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn with_trace_json(mut self, json: bool) -> Self {
        self.trace_json = json;
        self
    }

    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| parse_value(key, &value))
        .unwrap_or(default)
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, value, "Ignoring malformed configuration value");
            None
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
