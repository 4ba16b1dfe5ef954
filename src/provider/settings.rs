//! Settings injected by the host when a provider becomes ready.

use std::fmt;
use std::sync::Arc;

use alloy::primitives::Address;

use crate::blockchain::{AskSigning, ChainTag, Connector};
use crate::store::ReactiveStore;

/// Settings passed to `on_ready`.
///
/// Connector, chain tag and default account are required by `connect`;
/// they are optional here so a missing one is reported, not unrepresentable.
#[derive(Clone, Default)]
pub struct ConnexSettings {
    pub connector: Option<Arc<dyn Connector>>,
    pub chain_tag: Option<ChainTag>,
    pub default_account: Option<Address>,
    pub store: Option<Arc<ReactiveStore>>,
    pub ask_signing: Option<AskSigning>,
}

impl ConnexSettings {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector: Some(connector),
            ..Self::default()
        }
    }

    pub fn chain_tag(mut self, chain_tag: ChainTag) -> Self {
        self.chain_tag = Some(chain_tag);
        self
    }

    pub fn default_account(mut self, account: Address) -> Self {
        self.default_account = Some(account);
        self
    }

    pub fn store(mut self, store: Arc<ReactiveStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn ask_signing(mut self, ask: AskSigning) -> Self {
        self.ask_signing = Some(ask);
        self
    }

    /// Names of the required settings that are absent.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.connector.is_none() {
            missing.push("connector");
        }
        if self.chain_tag.is_none() {
            missing.push("chain_tag");
        }
        if self.default_account.is_none() {
            missing.push("default_account");
        }
        missing
    }
}

impl fmt::Debug for ConnexSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnexSettings")
            .field("connector", &self.connector.is_some())
            .field("chain_tag", &self.chain_tag)
            .field("default_account", &self.default_account)
            .field("store", &self.store.is_some())
            .field("ask_signing", &self.ask_signing.is_some())
            .finish()
    }
}

/// Options half of a [`ProviderInstance`]; unset fields keep current values.
#[derive(Clone, Default)]
pub struct InstanceOptions {
    pub chain_tag: Option<ChainTag>,
    pub default_account: Option<Address>,
    pub store: Option<Arc<ReactiveStore>>,
    pub ask_signing: Option<AskSigning>,
}

/// Per-instance override from the host: a connector plus optional settings.
#[derive(Clone)]
pub struct ProviderInstance {
    pub provider: Arc<dyn Connector>,
    pub options: InstanceOptions,
}

impl ProviderInstance {
    pub fn new(provider: Arc<dyn Connector>) -> Self {
        Self {
            provider,
            options: InstanceOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InstanceOptions) -> Self {
        self.options = options;
        self
    }
}

impl fmt::Debug for ProviderInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderInstance")
            .field("chain_tag", &self.options.chain_tag)
            .field("default_account", &self.options.default_account)
            .field("store", &self.options.store.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_required_fields() {
        let settings = ConnexSettings::default().chain_tag(ChainTag::TESTNET);
        assert_eq!(settings.missing(), vec!["connector", "default_account"]);
    }

    #[test]
    fn test_debug_hides_connector() {
        let settings = ConnexSettings::default().default_account(Address::ZERO);
        let debug = format!("{settings:?}");
        assert!(debug.contains("connector: false"));
        assert!(debug.contains("default_account"));
    }
}
