//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (body limit > 0; a zero timeout means none)
//! - Check the bind address carries a port
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EchoConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::EchoConfig;

/// Log formats understood by the logging subsystem.
pub const LOG_FORMATS: &[&str] = &["pretty", "json"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,

    #[error("listener.bind_address {0:?} has no port")]
    MissingPort(String),

    #[error("limits.max_body_size must be greater than 0")]
    ZeroBodyLimit,

    #[error("observability.log_format {0:?} is not one of pretty, json")]
    UnknownLogFormat(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &EchoConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let addr = config.listener.bind_address.trim();
    if addr.is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    } else if !has_port(addr) {
        errors.push(ValidationError::MissingPort(addr.to_string()));
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if !LOG_FORMATS.contains(&config.observability.log_format.as_str()) {
        errors.push(ValidationError::UnknownLogFormat(
            config.observability.log_format.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// `[::1]:80`, `host:80` and `:80` all end in a numeric port after the last colon.
fn has_port(addr: &str) -> bool {
    match addr.rsplit_once(':') {
        Some((host, port)) => {
            !port.is_empty()
                && port.parse::<u16>().is_ok()
                && (host.is_empty() || !host.contains(':') || host.ends_with(']'))
        }
        None => false,
    }
}
