//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (gas > 0, page size > 0, delays ordered)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProviderConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::ProviderConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ProviderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.signing.default_gas == 0 {
        errors.push(ValidationError {
            field: "signing.default_gas",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.events.default_limit == 0 {
        errors.push(ValidationError {
            field: "events.default_limit",
            message: "must be greater than zero".to_string(),
        });
    }

    let confirmation = &config.confirmation;
    if confirmation.poll_base_ms == 0 {
        errors.push(ValidationError {
            field: "confirmation.poll_base_ms",
            message: "must be greater than zero".to_string(),
        });
    }
    if confirmation.poll_base_ms > confirmation.poll_max_ms {
        errors.push(ValidationError {
            field: "confirmation.poll_max_ms",
            message: format!(
                "must be at least poll_base_ms ({})",
                confirmation.poll_base_ms
            ),
        });
    }
    if confirmation.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "confirmation.timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.observability.log_level.trim().is_empty() {
        errors.push(ValidationError {
            field: "observability.log_level",
            message: "must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
