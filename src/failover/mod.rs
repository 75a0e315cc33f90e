//! Failover subsystem.
//!
//! # Data Flow
//! ```text
//! Validated config
//!     → registry.rs (per-type ordered backend lists, primary index)
//!     → switch.rs (scheduler: one pass per tick)
//!         → selector.rs (walk the list, probe each backend at most once)
//!         → publish winning index atomically
//!
//! Routing callers:
//!     backend_for(type) → atomic index load → registry lookup
//! ```
//!
//! # Design Decisions
//! - The registry is immutable after construction; only the active index
//!   is shared mutable state, and it is a single-writer atomic
//! - Selection is purely healthy/unhealthy in list order; no weighting
//! - `backend_for` never performs network I/O and never blocks on a pass

pub mod registry;
pub mod selector;
pub mod switch;

pub use registry::{Backend, BackendRegistry};
pub use switch::{BackendSwitch, SwitchError};
