//! Backend registry.
//!
//! # Responsibilities
//! - Hold the ordered, per-protocol-type backend list built from config
//! - Record which entry is the designated primary
//! - Hold the atomically published active index

use std::sync::atomic::{AtomicI32, Ordering};

use url::Url;

use crate::config::schema::{BackendConfig, ProtocolType};

/// "No healthy backend known" marker for the active index.
pub const NO_BACKEND: i32 = -1;

/// One configured upstream node. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Backend {
    pub kind: ProtocolType,
    pub url: Url,
    pub name: String,
    pub primary: bool,
}

impl Backend {
    /// Build from a validated config entry.
    ///
    /// The URL was already checked by config validation, so a parse failure
    /// here means the entry bypassed validation.
    pub fn from_config(config: &BackendConfig) -> Option<Self> {
        let url = match Url::parse(&config.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(name = %config.name, url = %config.url, error = %e,
                    "backend config slipped past validation, skipping");
                return None;
            }
        };
        Some(Self {
            kind: config.kind,
            url,
            name: config.name.clone(),
            primary: config.main,
        })
    }
}

/// Ordered backend list for one protocol type.
///
/// Order is significant: it is the probing sequence the failover selector
/// walks. Never mutated after construction, which is what makes lock-free
/// concurrent reads of the list safe.
#[derive(Debug)]
pub struct BackendRegistry {
    kind: ProtocolType,
    backends: Vec<Backend>,
}

impl BackendRegistry {
    /// Collect the backends of `kind` from the full list, preserving order.
    pub fn new(kind: ProtocolType, all: &[Backend]) -> Self {
        let backends = all.iter().filter(|b| b.kind == kind).cloned().collect();
        Self { kind, backends }
    }

    pub fn kind(&self) -> ProtocolType {
        self.kind
    }

    pub fn get(&self, index: i32) -> Option<&Backend> {
        usize::try_from(index).ok().and_then(|i| self.backends.get(i))
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Index of the designated primary, if one was configured.
    pub fn primary_index(&self) -> Option<i32> {
        self.backends
            .iter()
            .position(|b| b.primary)
            .map(|i| i as i32)
    }

    /// Where a fresh walk starts: the primary, falling back to the head of
    /// the list, or the sentinel when nothing is configured.
    pub fn initial_index(&self) -> i32 {
        if self.backends.is_empty() {
            NO_BACKEND
        } else {
            self.primary_index().unwrap_or(0)
        }
    }
}

/// The active index cell for one protocol type.
///
/// Written by the scheduler pass only, read by any number of routing
/// callers. Value is always `NO_BACKEND` or a valid index into the
/// registry; relaxed ordering is enough since no cross-variable ordering
/// is promised.
#[derive(Debug)]
pub struct ActiveIndex(AtomicI32);

impl ActiveIndex {
    pub fn new(index: i32) -> Self {
        Self(AtomicI32::new(index))
    }

    pub fn load(&self) -> i32 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn store(&self, index: i32) {
        self.0.store(index, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(name: &str, primary: bool) -> Backend {
        Backend {
            kind: ProtocolType::Eth,
            url: Url::parse("http://127.0.0.1:8545").unwrap(),
            name: name.to_string(),
            primary,
        }
    }

    #[test]
    fn partitions_by_type_preserving_order() {
        let all = vec![backend("a", false), backend("b", true), backend("c", false)];
        let registry = BackendRegistry::new(ProtocolType::Eth, &all);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(0).unwrap().name, "a");
        assert_eq!(registry.primary_index(), Some(1));
        assert_eq!(registry.initial_index(), 1);

        let empty = BackendRegistry::new(ProtocolType::Btc, &all);
        assert!(empty.is_empty());
        assert_eq!(empty.initial_index(), NO_BACKEND);
    }

    #[test]
    fn initial_index_defaults_to_head_without_primary() {
        let all = vec![backend("a", false), backend("b", false)];
        let registry = BackendRegistry::new(ProtocolType::Eth, &all);
        assert_eq!(registry.initial_index(), 0);
    }

    #[test]
    fn get_rejects_sentinel_and_out_of_range() {
        let all = vec![backend("a", true)];
        let registry = BackendRegistry::new(ProtocolType::Eth, &all);
        assert!(registry.get(NO_BACKEND).is_none());
        assert!(registry.get(1).is_none());
        assert_eq!(registry.get(0).unwrap().name, "a");
    }
}
