//! Failover selection.
//!
//! # Responsibilities
//! - Given the last known-good index, find the next healthy backend
//! - Probe each backend at most once per pass
//! - Converge to the sentinel when every backend is down

use crate::failover::registry::{BackendRegistry, NO_BACKEND};
use crate::health::probe::HealthProbe;

/// Walk the registry starting at `last` and return the first healthy index,
/// or [`NO_BACKEND`] when the whole list fails.
///
/// The walk advances forward one position at a time, wrapping from the tail
/// to index 0, and stops before revisiting the starting index. That bounds
/// the pass to `registry.len()` probes and means a backend that recovers
/// mid-pass is not retried until the next scheduled pass.
///
/// Probing order always starts at the last known-good index, so failover
/// prefers the configured ordering rather than randomizing.
pub async fn select_backend(
    registry: &BackendRegistry,
    probe: &dyn HealthProbe,
    last: i32,
) -> i32 {
    if last == NO_BACKEND {
        return NO_BACKEND;
    }

    let len = registry.len() as i32;
    let mut index = last;

    for _ in 0..len {
        let backend = match registry.get(index) {
            Some(b) => b,
            None => return NO_BACKEND,
        };

        tracing::debug!(kind = %backend.kind, name = %backend.name, url = %backend.url,
            "performing healthcheck");
        if probe.check(backend).await {
            tracing::debug!(kind = %backend.kind, name = %backend.name, url = %backend.url,
                "backend is ok");
            return index;
        }

        tracing::warn!(kind = %backend.kind, name = %backend.name, url = %backend.url,
            "backend is unhealthy, trying another");
        index = (index + 1) % len;
        if index == last {
            break;
        }
    }

    tracing::error!(kind = %registry.kind(), "no more backends to try");
    NO_BACKEND
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use url::Url;

    use super::*;
    use crate::config::schema::ProtocolType;
    use crate::failover::registry::Backend;

    /// Probe scripted by backend name, counting every call.
    struct ScriptedProbe {
        healthy: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedProbe {
        fn new(healthy: &[&str]) -> Self {
            Self {
                healthy: Mutex::new(healthy.iter().map(|s| s.to_string()).collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HealthProbe for ScriptedProbe {
        async fn check(&self, backend: &Backend) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.healthy.lock().unwrap().contains(&backend.name)
        }
    }

    fn registry(names: &[&str]) -> BackendRegistry {
        let backends: Vec<Backend> = names
            .iter()
            .map(|name| Backend {
                kind: ProtocolType::Eth,
                url: Url::parse("http://127.0.0.1:8545").unwrap(),
                name: name.to_string(),
                primary: false,
            })
            .collect();
        BackendRegistry::new(ProtocolType::Eth, &backends)
    }

    #[tokio::test]
    async fn healthy_current_backend_is_kept() {
        let registry = registry(&["a", "b", "c"]);
        let probe = ScriptedProbe::new(&["a", "b", "c"]);
        assert_eq!(select_backend(&registry, &probe, 0).await, 0);
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test]
    async fn advances_to_nearest_following_healthy() {
        let registry = registry(&["a", "b", "c"]);
        let probe = ScriptedProbe::new(&["c"]);
        assert_eq!(select_backend(&registry, &probe, 0).await, 2);
        assert_eq!(probe.calls(), 3);
    }

    #[tokio::test]
    async fn wraps_around_the_tail_once() {
        let registry = registry(&["a", "b", "c"]);
        let probe = ScriptedProbe::new(&["a"]);
        assert_eq!(select_backend(&registry, &probe, 1).await, 0);
        assert_eq!(probe.calls(), 3);
    }

    #[tokio::test]
    async fn all_unhealthy_yields_sentinel_without_duplicate_probes() {
        let registry = registry(&["a", "b", "c"]);
        let probe = ScriptedProbe::new(&[]);
        assert_eq!(select_backend(&registry, &probe, 1).await, NO_BACKEND);
        assert_eq!(probe.calls(), 3);
    }

    #[tokio::test]
    async fn single_unhealthy_backend_is_probed_exactly_once() {
        let registry = registry(&["only"]);
        let probe = ScriptedProbe::new(&[]);
        assert_eq!(select_backend(&registry, &probe, 0).await, NO_BACKEND);
        assert_eq!(probe.calls(), 1);
    }

    #[tokio::test]
    async fn sentinel_input_short_circuits() {
        let registry = registry(&[]);
        let probe = ScriptedProbe::new(&["a"]);
        assert_eq!(select_backend(&registry, &probe, NO_BACKEND).await, NO_BACKEND);
        assert_eq!(probe.calls(), 0);
    }
}
