//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the watcher.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::health::change::EmissionPolicy;

/// Root configuration for the allocation health watcher.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WatcherConfig {
    /// Node-info (scheduler) API settings.
    pub nomad: NomadConfig,

    /// Health directory API settings.
    pub consul: ConsulConfig,

    /// Watch behavior.
    pub watch: WatchConfig,

    /// Re-invocation cadence used by the CLI driver after a failed cycle.
    pub retry: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Node-info API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NomadConfig {
    /// Base URL of the HTTP API (e.g., "http://127.0.0.1:4646").
    pub address: String,

    /// ACL token sent as `X-Nomad-Token`.
    pub token: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NomadConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:4646".to_string(),
            token: None,
            timeout_secs: 10,
        }
    }
}

/// Health directory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsulConfig {
    /// Base URL of the HTTP API (e.g., "http://127.0.0.1:8500").
    pub address: String,

    /// ACL token sent as `X-Consul-Token`.
    pub token: Option<String>,

    /// Datacenter to query. The agent's own datacenter when unset.
    pub datacenter: Option<String>,

    /// Blocking query wait ceiling in seconds.
    pub wait_secs: u64,

    /// Extra time granted to a blocking query on top of the wait ceiling.
    pub timeout_slack_secs: u64,
}

impl Default for ConsulConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8500".to_string(),
            token: None,
            datacenter: None,
            wait_secs: 30,
            timeout_slack_secs: 5,
        }
    }
}

/// Watch behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WatchConfig {
    /// Predicate deciding whether a computed snapshot is published.
    pub emission: EmissionPolicy,
}

/// Re-invocation cadence after a failed poll cycle.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 500,
            max_delay_ms: 30_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
