//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SwitchConfig (validated, immutable)
//!     → backend list consumed by the failover switch at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the backend list is fixed for the
//!   process lifetime (no runtime reconfiguration)
//! - All sections have defaults so a minimal config parses
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every violation, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::BackendConfig;
pub use schema::ProtocolType;
pub use schema::SwitchConfig;
