//! Connex contract provider.
//!
//! Adapts an injected wallet connector (method calls, event queries,
//! transaction signing) to the contract-provider interface of a host
//! framework, and pushes a reactive store update after dispatched
//! transactions confirm.

pub mod blockchain;
pub mod config;
pub mod contract;
pub mod module;
pub mod observability;
pub mod provider;
pub mod resilience;
pub mod store;

pub use blockchain::{ChainTag, Connector};
pub use config::ProviderConfig;
pub use contract::ContractImport;
pub use module::{ContractEntry, ContractModule};
pub use provider::{ConnexProvider, ConnexSettings, ContractProvider, SigningOptions, SigningOutcome};
pub use store::{MapAction, ReactiveStore};
