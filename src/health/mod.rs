//! Health probing subsystem.
//!
//! # Data Flow
//! ```text
//! Scheduler pass (failover::switch)
//!     → ProbeSet lookup by protocol type
//!     → HealthProbe::check (one JSON-RPC call, bounded timeout)
//!     → bool consumed by the failover selector
//! ```
//!
//! # Design Decisions
//! - One probe implementation per protocol family, behind a trait object
//! - A probe never returns an error: every transport or decode failure is
//!   logged and mapped to unhealthy
//! - Probe lookup failing for a type is surfaced loudly to callers rather
//!   than silently treated as healthy

pub mod probe;

pub use probe::EthSyncProbe;
pub use probe::HealthProbe;
pub use probe::ProbeSet;
