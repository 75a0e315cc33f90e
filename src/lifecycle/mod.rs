//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Build probes + switch → Service::start
//!     (start blocks until the first health-check pass completes)
//!
//! Shutdown:
//!     Signal received → Shutdown::trigger → workers exit loops
//!     → Service::stop joins the worker
//! ```
//!
//! # Design Decisions
//! - Services are an abstract start/stop capability, decoupled from any
//!   process supervisor, so they unit-test without a real host process
//! - Stop cancels scheduling loops, not in-flight work

pub mod service;
pub mod shutdown;

pub use service::{Service, ServiceError};
pub use shutdown::Shutdown;
