//! Blockchain JSON-RPC backend failover switch.

pub mod config;
pub mod failover;
pub mod health;
pub mod lifecycle;
pub mod observability;

pub use config::schema::SwitchConfig;
pub use failover::switch::BackendSwitch;
pub use lifecycle::shutdown::Shutdown;
