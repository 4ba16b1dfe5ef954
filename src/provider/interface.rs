//! Contract-provider interface expected by the host framework.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::blockchain::{CallOutput, EventLog, EventVisitor};
use crate::contract::{AbiEntry, EventFilter};
use crate::provider::method::ContractMethod;
use crate::provider::settings::{ConnexSettings, ProviderInstance};
use crate::provider::types::{ProviderResult, ProviderType, SigningOptions, SigningOutcome};

/// What the host framework calls on a contract provider.
#[async_trait]
pub trait ContractProvider: Send + Sync {
    /// Human-readable summary of address, chain and owner.
    fn describe(&self) -> String;

    fn provider_type(&self) -> ProviderType;

    /// Store settings, then [`connect`](Self::connect).
    fn on_ready(&self, settings: ConnexSettings) -> ProviderResult<()>;

    /// Resolve the contract address; fails when required settings are missing.
    fn connect(&self) -> ProviderResult<()>;

    /// Override connector and any provided options, without validation.
    fn set_instance_options(&self, instance: ProviderInstance);

    /// ABI entry by name, `None` if absent.
    fn get_abi_method(&self, name: &str) -> Option<AbiEntry>;

    fn get_method(&self, name: &str) -> ProviderResult<ContractMethod>;

    async fn call_method(&self, name: &str, args: &[Value]) -> ProviderResult<CallOutput>;

    fn get_event(&self, name: &str) -> ProviderResult<Arc<dyn EventVisitor>>;

    async fn get_events(
        &self,
        name: &str,
        filter: Option<&EventFilter>,
    ) -> ProviderResult<Vec<EventLog>>;

    /// Prompt, sign, and (for dispatched actions) confirm and update the store.
    async fn prepare_signing(
        &self,
        name: &str,
        options: SigningOptions,
        args: Vec<Value>,
    ) -> ProviderResult<SigningOutcome>;
}
