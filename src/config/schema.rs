//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the switch.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Protocol family of an upstream node.
///
/// Only Ethereum backends are routable today; the `Btc` variant is reserved
/// and rejected by validation until a probe exists for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolType {
    Eth,
    Btc,
}

impl std::fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolType::Eth => write!(f, "eth"),
            ProtocolType::Btc => write!(f, "btc"),
        }
    }
}

/// Root configuration for the failover switch.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SwitchConfig {
    /// Upstream node definitions, in failover order.
    pub backends: Vec<BackendConfig>,

    /// Health check settings.
    pub health_check: HealthCheckConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// One upstream node.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Protocol family served by this node.
    #[serde(rename = "type")]
    pub kind: ProtocolType,

    /// JSON-RPC endpoint URL (e.g., "http://127.0.0.1:8545").
    pub url: String,

    /// Unique backend identifier for logging.
    pub name: String,

    /// Designates the preferred backend for its protocol type.
    /// At most one per type.
    #[serde(default)]
    pub main: bool,
}

/// Health check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Seconds between health check passes.
    pub interval_secs: u64,

    /// Per-probe timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            interval_secs: 1,
            timeout_secs: 2,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
