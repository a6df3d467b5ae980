//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::WatcherConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, override from the process environment, and validate a TOML file.
pub fn load_config(path: &Path) -> Result<WatcherConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: WatcherConfig = toml::from_str(&content)?;
    finalize(config)
}

/// Defaults plus environment overrides, validated. Used when no file is given.
pub fn load_default() -> Result<WatcherConfig, ConfigError> {
    finalize(WatcherConfig::default())
}

fn finalize(mut config: WatcherConfig) -> Result<WatcherConfig, ConfigError> {
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply the standard agent environment variables on top of `config`.
///
/// Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut WatcherConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(address) = var("NOMAD_ADDR") {
        config.nomad.address = address;
    }
    if let Some(token) = var("NOMAD_TOKEN") {
        config.nomad.token = Some(token);
    }
    if let Some(address) = var("CONSUL_HTTP_ADDR") {
        config.consul.address = with_scheme(address);
    }
    if let Some(token) = var("CONSUL_HTTP_TOKEN") {
        config.consul.token = Some(token);
    }
}

/// `CONSUL_HTTP_ADDR` is commonly given as a bare `host:port`.
fn with_scheme(address: String) -> String {
    if address.contains("://") {
        address
    } else {
        format!("http://{}", address)
    }
}
