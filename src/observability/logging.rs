//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, overridable by `RUST_LOG`
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, compact format for development

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

/// Build the filter directive for a configured level.
///
/// A bare level (e.g. "debug") is scoped to this crate and keeps
/// dependencies at `info`. Custom directive strings are used as-is.
pub fn filter_directive(log_level: &str) -> String {
    let normalized = log_level.trim();
    if normalized.contains(',') || normalized.contains('=') {
        normalized.to_string()
    } else {
        format!("info,connex_provider={}", normalized)
    }
}

/// Install the global tracing subscriber.
///
/// Returns silently if a subscriber is already installed (e.g. by the host).
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(&config.log_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry
            .with(fmt::layer().json().with_target(false).with_current_span(false))
            .try_init()
            .is_ok()
    } else {
        registry
            .with(fmt::layer().with_target(true).compact())
            .try_init()
            .is_ok()
    };

    if installed {
        let format = if config.json { "json" } else { "compact" };
        tracing::debug!(level = %config.log_level, format, "Logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_is_scoped() {
        assert_eq!(filter_directive("debug"), "info,connex_provider=debug");
    }

    #[test]
    fn test_directive_passthrough() {
        assert_eq!(filter_directive(" warn,connex_provider=trace "), "warn,connex_provider=trace");
    }
}
