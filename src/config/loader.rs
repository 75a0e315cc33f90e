//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SwitchConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SwitchConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: SwitchConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ProtocolType;

    #[test]
    fn parses_minimal_backend_table() {
        let raw = r#"
            [[backends]]
            type = "eth"
            url = "http://127.0.0.1:8545"
            name = "geth-local"
            main = true
        "#;
        let config: SwitchConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.backends.len(), 1);
        assert_eq!(config.backends[0].kind, ProtocolType::Eth);
        assert!(config.backends[0].main);
        assert_eq!(config.health_check.interval_secs, 1);
    }
}
