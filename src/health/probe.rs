//! Per-protocol health probes.
//!
//! # Responsibilities
//! - Perform one synchronous health check against one backend
//! - Bound every check with a fixed timeout
//! - Translate every failure mode into "unhealthy", never an error

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde_json::Value;

use crate::config::schema::ProtocolType;
use crate::failover::registry::Backend;

/// One health check of a single backend.
///
/// Implementations must be infallible: any transport, timeout, or decode
/// problem is reported as `false`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self, backend: &Backend) -> bool;
}

/// Probe lookup keyed by protocol type.
///
/// Built once at switch construction; a missing entry means the type has no
/// health-checking support and must fail loudly at the call site.
#[derive(Clone, Default)]
pub struct ProbeSet {
    probes: HashMap<ProtocolType, Arc<dyn HealthProbe>>,
}

impl ProbeSet {
    /// The default set: an Ethereum sync-status probe with the given timeout.
    pub fn with_defaults(timeout: Duration) -> Self {
        let mut set = Self::default();
        set.register(ProtocolType::Eth, Arc::new(EthSyncProbe::new(timeout)));
        set
    }

    pub fn register(&mut self, kind: ProtocolType, probe: Arc<dyn HealthProbe>) {
        self.probes.insert(kind, probe);
    }

    pub fn get(&self, kind: ProtocolType) -> Option<&Arc<dyn HealthProbe>> {
        self.probes.get(&kind)
    }

    pub fn supports(&self, kind: ProtocolType) -> bool {
        self.probes.contains_key(&kind)
    }
}

/// Ethereum sync-status probe.
///
/// Sends `eth_syncing` and treats the backend as healthy only when the
/// response carries a boolean `result`. A boolean `false` means fully
/// synced and `true` means syncing; either way the node is answering RPC,
/// so both count as healthy. Anything else (non-success status, missing
/// field, object-shaped result, decode failure, transport failure) counts
/// as unhealthy.
pub struct EthSyncProbe {
    client: reqwest::Client,
}

impl EthSyncProbe {
    pub fn new(timeout: Duration) -> Self {
        // Timeout covers connect + response; a node that cannot answer a
        // sync-status query within it is not a routing candidate anyway.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

#[async_trait]
impl HealthProbe for EthSyncProbe {
    async fn check(&self, backend: &Backend) -> bool {
        let id = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_syncing",
            "params": [],
            "id": id,
        });

        let response = match self
            .client
            .post(backend.url.clone())
            .json(&body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                tracing::warn!(
                    name = %backend.name,
                    url = %backend.url,
                    error = %e,
                    "backend did not answer health check"
                );
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                name = %backend.name,
                url = %backend.url,
                status = %response.status(),
                "backend returned non-success status"
            );
            return false;
        }

        let decoded: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(
                    name = %backend.name,
                    url = %backend.url,
                    error = %e,
                    "backend returned invalid JSON"
                );
                return false;
            }
        };

        if !decoded.get("result").map(Value::is_boolean).unwrap_or(false) {
            tracing::warn!(
                name = %backend.name,
                url = %backend.url,
                "backend is either completing initial sync or has fallen behind"
            );
            return false;
        }

        true
    }
}
