//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid, buffer usable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProfilerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::ProfilerConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
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

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a configuration for values the profiler cannot run with.
pub fn validate_config(config: &ProfilerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let transport = &config.transport;

    if transport.port == 0 {
        errors.push(ValidationError::new("transport.port", "must be non-zero"));
    }
    if transport.max_response_bytes < 2 {
        errors.push(ValidationError::new(
            "transport.max_response_bytes",
            "must be at least 2 (one byte is reserved)",
        ));
    }
    if transport.connect_timeout_ms == 0 {
        errors.push(ValidationError::new("transport.connect_timeout_ms", "must be greater than 0"));
    }
    if transport.request_timeout_ms == 0 {
        errors.push(ValidationError::new("transport.request_timeout_ms", "must be greater than 0"));
    }
    if transport.read_chunk_bytes == 0 {
        errors.push(ValidationError::new("transport.read_chunk_bytes", "must be greater than 0"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
