//! The backend switch.
//!
//! # Responsibilities
//! - Own the per-type registries and active index cells
//! - Run one health-check pass at startup, then on a fixed cadence
//! - Answer non-blocking `backend_for` queries from routing callers
//!
//! # Design Decisions
//! - Each tick runs the selector once per supported type, concurrently,
//!   and joins all of them before the pass counts as complete
//! - Passes never overlap: the next tick waits for the current pass
//! - Failover is the retry mechanism; nothing retries faster than the
//!   scheduled cadence

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, MissedTickBehavior};

use crate::config::schema::ProtocolType;
use crate::failover::registry::{ActiveIndex, Backend, BackendRegistry, NO_BACKEND};
use crate::failover::selector::select_backend;
use crate::health::probe::ProbeSet;
use crate::lifecycle::service::{Service, ServiceError};
use crate::lifecycle::shutdown::Shutdown;

/// Caller-visible failures of [`BackendSwitch::backend_for`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwitchError {
    #[error("no health checking support for {0} backends")]
    UnsupportedProtocol(ProtocolType),

    #[error("no {0} backends available")]
    NoBackendAvailable(ProtocolType),
}

/// State shared between the public handle and the scheduler worker.
///
/// Registries and probes are immutable after construction; the active
/// index cells are the only mutable state.
struct SwitchState {
    registries: HashMap<ProtocolType, BackendRegistry>,
    active: HashMap<ProtocolType, ActiveIndex>,
    probes: ProbeSet,
}

impl SwitchState {
    /// Run the selector for one protocol type and publish the result.
    async fn check_one(&self, kind: ProtocolType) {
        let (registry, active) = match (self.registries.get(&kind), self.active.get(&kind)) {
            (Some(r), Some(a)) => (r, a),
            _ => return,
        };
        let probe = match self.probes.get(kind) {
            Some(p) => p,
            None => return,
        };

        let last = active.load();
        // A sentinel over a non-empty registry means every backend failed a
        // previous pass; restart the walk at the primary so a recovered
        // backend comes back into rotation.
        let start = if last == NO_BACKEND {
            registry.initial_index()
        } else {
            last
        };

        let next = select_backend(registry, probe.as_ref(), start).await;
        active.store(next);
    }
}

/// Routes `backend_for` queries to the currently healthy backend of each
/// protocol type, driven by a periodic health-check scheduler.
pub struct BackendSwitch {
    state: Arc<SwitchState>,
    interval: Duration,
    shutdown: Shutdown,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl BackendSwitch {
    /// Build the switch from validated backends and a probe set.
    ///
    /// One registry is created per protocol type the probe set supports;
    /// backends of unsupported types are ignored (validation rejects them
    /// upstream anyway). Each active index starts at the type's primary.
    pub fn new(backends: &[Backend], probes: ProbeSet, interval: Duration) -> Self {
        let mut registries = HashMap::new();
        let mut active = HashMap::new();

        for kind in [ProtocolType::Eth, ProtocolType::Btc] {
            if !probes.supports(kind) {
                continue;
            }
            let registry = BackendRegistry::new(kind, backends);
            active.insert(kind, ActiveIndex::new(registry.initial_index()));
            registries.insert(kind, registry);
        }

        Self {
            state: Arc::new(SwitchState {
                registries,
                active,
                probes,
            }),
            interval,
            shutdown: Shutdown::new(),
            worker: Mutex::new(None),
        }
    }

    /// The backend currently routing traffic for `kind`.
    ///
    /// A pure read of the published active index; never performs network
    /// I/O and never blocks on the scheduler.
    pub fn backend_for(&self, kind: ProtocolType) -> Result<Backend, SwitchError> {
        let active = self
            .state
            .active
            .get(&kind)
            .ok_or(SwitchError::UnsupportedProtocol(kind))?;

        let index = active.load();
        if index == NO_BACKEND {
            return Err(SwitchError::NoBackendAvailable(kind));
        }

        self.state
            .registries
            .get(&kind)
            .and_then(|r| r.get(index))
            .cloned()
            .ok_or(SwitchError::NoBackendAvailable(kind))
    }

    /// Run one full health-check pass: every supported type concurrently,
    /// joined before the pass is considered complete.
    async fn run_pass(state: &Arc<SwitchState>) {
        let mut tasks = JoinSet::new();
        for kind in state.registries.keys().copied() {
            let state = Arc::clone(state);
            tasks.spawn(async move { state.check_one(kind).await });
        }
        while tasks.join_next().await.is_some() {}
    }
}

#[async_trait]
impl Service for BackendSwitch {
    fn name(&self) -> &'static str {
        "backend_switch"
    }

    /// Run the initial pass synchronously so traffic never routes through
    /// an unchecked backend, then launch the periodic scheduler.
    async fn start(&self) -> Result<(), ServiceError> {
        tracing::info!("performing initial health checks on startup");
        Self::run_pass(&self.state).await;

        let state = Arc::clone(&self.state);
        let interval = self.interval;
        let mut shutdown_rx = self.shutdown.subscribe();

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval fires immediately; the initial pass already ran.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        Self::run_pass(&state).await;
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::info!("backend switch received shutdown signal, exiting loop");
                        break;
                    }
                }
            }
        });

        let mut worker = self.worker.lock().map_err(|_| ServiceError::Poisoned {
            service: "backend_switch",
        })?;
        *worker = Some(handle);
        Ok(())
    }

    /// Signal the scheduler loop to exit and wait for it. An in-flight
    /// probe finishes or times out naturally.
    async fn stop(&self) -> Result<(), ServiceError> {
        self.shutdown.trigger();

        let handle = {
            let mut worker = self.worker.lock().map_err(|_| ServiceError::Poisoned {
                service: "backend_switch",
            })?;
            worker.take()
        };

        if let Some(handle) = handle {
            handle.await.map_err(|e| ServiceError::Worker {
                service: "backend_switch",
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}
