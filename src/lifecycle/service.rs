//! Long-running service capability.

use async_trait::async_trait;
use thiserror::Error;

/// Failures surfaced by service start/stop.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{service} worker state is poisoned")]
    Poisoned { service: &'static str },

    #[error("{service} worker exited abnormally: {reason}")]
    Worker {
        service: &'static str,
        reason: String,
    },
}

/// A component with a background worker and an explicit lifecycle.
///
/// `start` returns once the service is ready to answer queries; `stop`
/// returns once its worker loop has exited. Calling `start` twice on the
/// same instance is not supported.
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &'static str;

    async fn start(&self) -> Result<(), ServiceError>;

    async fn stop(&self) -> Result<(), ServiceError>;
}
