//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate directory addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WatcherConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::WatcherConfig;

/// Upper bound the health directory enforces on a blocking query wait.
pub const MAX_WAIT_SECS: u64 = 600;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &WatcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_http_url("nomad.address", &config.nomad.address, &mut errors);
    check_http_url("consul.address", &config.consul.address, &mut errors);

    if config.nomad.timeout_secs == 0 {
        errors.push(ValidationError::new("nomad.timeout_secs", "must be greater than 0"));
    }

    if config.consul.wait_secs == 0 || config.consul.wait_secs > MAX_WAIT_SECS {
        errors.push(ValidationError::new(
            "consul.wait_secs",
            format!("must be between 1 and {}", MAX_WAIT_SECS),
        ));
    }

    if config.retry.base_delay_ms == 0 {
        errors.push(ValidationError::new("retry.base_delay_ms", "must be greater than 0"));
    }
    if config.retry.max_delay_ms < config.retry.base_delay_ms {
        errors.push(ValidationError::new(
            "retry.max_delay_ms",
            "must not be smaller than retry.base_delay_ms",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("`{}` is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme `{}`", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            field,
            format!("`{}` is not a URL: {}", value, e),
        )),
    }
}
