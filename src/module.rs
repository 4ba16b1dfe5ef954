//! Contract module: named contracts bound to provider instances.
//!
//! The host registers each contract once; `bind` readies one provider per
//! contract with shared connector settings.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::contract::ContractImport;
use crate::provider::{ConnexProvider, ConnexSettings, ContractProvider, ProviderResult};

/// One named contract.
#[derive(Debug, Clone)]
pub struct ContractEntry {
    pub name: String,
    pub import: ContractImport,
}

impl ContractEntry {
    pub fn new(name: impl Into<String>, import: ContractImport) -> Self {
        Self {
            name: name.into(),
            import,
        }
    }
}

#[derive(Debug)]
pub struct ContractModule {
    entries: Vec<ContractEntry>,
    config: Arc<ProviderConfig>,
    bound: BTreeMap<String, ConnexProvider>,
}

impl ContractModule {
    pub fn new(entries: Vec<ContractEntry>) -> Self {
        Self::with_config(entries, Arc::new(ProviderConfig::default()))
    }

    pub fn with_config(entries: Vec<ContractEntry>, config: Arc<ProviderConfig>) -> Self {
        Self {
            entries,
            config,
            bound: BTreeMap::new(),
        }
    }

    /// Create and ready a provider for every entry.
    ///
    /// Nothing is bound unless every provider connects.
    pub fn bind(&mut self, settings: ConnexSettings) -> ProviderResult<()> {
        let mut bound = BTreeMap::new();
        for entry in &self.entries {
            let provider = ConnexProvider::with_config(entry.import.clone(), self.config.clone());
            provider.on_ready(settings.clone())?;
            tracing::debug!(contract = %entry.name, address = ?provider.address(), "Contract bound");
            bound.insert(entry.name.clone(), provider);
        }
        self.bound = bound;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ConnexProvider> {
        self.bound.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn is_bound(&self) -> bool {
        !self.bound.is_empty()
    }
}
