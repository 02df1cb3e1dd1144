//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports, capacities, TTLs)
//! - Check that the application root is a directory
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure apart from one `is_dir` check of the app root
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("public.scheme must be http or https, got {0:?}")]
    UnsupportedScheme(String),

    #[error("paths.app_root {0:?} is not a directory")]
    MissingAppRoot(String),

    #[error("callback.max_entries must be greater than zero")]
    ZeroCapacity,

    #[error("callback.ttl_secs must be greater than zero")]
    ZeroTtl,

    #[error("callback.url_protocol must not be empty")]
    EmptyUrlProtocol,
}

/// Validate a loaded configuration, collecting every error.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if !matches!(config.public.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::UnsupportedScheme(config.public.scheme.clone()));
    }

    if !config.paths.app_root.is_dir() {
        errors.push(ValidationError::MissingAppRoot(
            config.paths.app_root.display().to_string(),
        ));
    }

    if config.callback.max_entries == 0 {
        errors.push(ValidationError::ZeroCapacity);
    }

    if config.callback.ttl_secs == 0 {
        errors.push(ValidationError::ZeroTtl);
    }

    if config.callback.url_protocol.is_empty() {
        errors.push(ValidationError::EmptyUrlProtocol);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
