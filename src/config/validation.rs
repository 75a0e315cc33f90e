//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce the single-main-per-type rule the failover switch relies on
//! - Validate value ranges (intervals > 0, URLs parse, names non-empty)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SwitchConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::collections::HashMap;

use thiserror::Error;
use url::Url;

use crate::config::schema::{ProtocolType, SwitchConfig};

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("must define at least one backend")]
    NoBackends,

    #[error("cannot have more than one main backend for type {0}")]
    MultipleMains(ProtocolType),

    #[error("backend '{name}': only ethereum backends are supported right now")]
    UnsupportedType { name: String },

    #[error("backend '{name}': invalid url: {url}")]
    InvalidUrl { name: String, url: String },

    #[error("backend name must be defined")]
    EmptyName,

    #[error("health_check.{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

/// Validate a parsed configuration, collecting every violation.
pub fn validate_config(config: &SwitchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.backends.is_empty() {
        errors.push(ValidationError::NoBackends);
    }

    let mut mains: HashMap<ProtocolType, usize> = HashMap::new();
    for backend in &config.backends {
        if backend.main {
            let count = mains.entry(backend.kind).or_insert(0);
            *count += 1;
            if *count == 2 {
                errors.push(ValidationError::MultipleMains(backend.kind));
            }
        }

        if backend.kind != ProtocolType::Eth {
            errors.push(ValidationError::UnsupportedType {
                name: backend.name.clone(),
            });
        }

        if Url::parse(&backend.url).is_err() {
            errors.push(ValidationError::InvalidUrl {
                name: backend.name.clone(),
                url: backend.url.clone(),
            });
        }

        if backend.name.is_empty() {
            errors.push(ValidationError::EmptyName);
        }
    }

    if config.health_check.interval_secs == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "interval_secs",
        });
    }
    if config.health_check.timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "timeout_secs",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
