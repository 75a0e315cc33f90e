//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; subscriber initialized once at startup
//! - Level comes from config, overridable with RUST_LOG
//! - Health events carry backend name and url as fields, never in prose

pub mod logging;
