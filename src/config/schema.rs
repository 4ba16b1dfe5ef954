//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the provider.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::contract::events::Order;

/// Root configuration for the Connex provider.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProviderConfig {
    /// Transaction signing defaults.
    pub signing: SigningConfig,

    /// Event query defaults.
    pub events: EventsConfig,

    /// Confirmation polling settings.
    pub confirmation: ConfirmationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Transaction signing defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Maximum gas attached to a signing request or gas explanation
    /// when the caller does not give one.
    pub default_gas: u64,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            default_gas: 300_000,
        }
    }
}

/// Event query defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Page size when no page options are given.
    pub default_limit: u64,

    /// Result order when the filter does not set one.
    pub default_order: Order,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            default_limit: 25,
            default_order: Order::Desc,
        }
    }
}

/// Receipt polling for dispatched transactions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Base delay between receipt polls in milliseconds.
    pub poll_base_ms: u64,

    /// Maximum delay between receipt polls in milliseconds.
    pub poll_max_ms: u64,

    /// Give up waiting for a receipt after this many seconds.
    pub timeout_secs: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            poll_base_ms: 500,
            poll_max_ms: 5_000,
            timeout_secs: 120,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive (e.g. "info", "connex_provider=debug").
    pub log_level: String,

    /// Emit JSON log lines instead of the compact format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.signing.default_gas, 300_000);
        assert_eq!(config.events.default_limit, 25);
        assert_eq!(config.events.default_order, Order::Desc);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_partial_toml() {
        let config: ProviderConfig = toml::from_str(
            r#"
            [signing]
            default_gas = 500000

            [events]
            default_order = "asc"
            "#,
        )
        .unwrap();
        assert_eq!(config.signing.default_gas, 500_000);
        assert_eq!(config.events.default_order, Order::Asc);
        assert_eq!(config.events.default_limit, 25);
        assert_eq!(config.confirmation.timeout_secs, 120);
    }
}
