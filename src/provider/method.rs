//! Contract method handle with a gas explainer.

use std::fmt;
use std::sync::Arc;

use alloy::json_abi::Function;
use alloy::primitives::Address;
use serde_json::Value;

use crate::blockchain::{BlockchainResult, CallOutput, Clause, Connector, ExplainRequest, MethodVisitor};
use crate::provider::types::{MethodConfig, ProviderError, ProviderResult};

/// A connector method bound to the contract address.
#[derive(Clone)]
pub struct ContractMethod {
    visitor: Arc<dyn MethodVisitor>,
    connector: Arc<dyn Connector>,
    default_account: Option<Address>,
    default_gas: u64,
}

impl ContractMethod {
    pub(crate) fn new(
        visitor: Arc<dyn MethodVisitor>,
        connector: Arc<dyn Connector>,
        default_account: Option<Address>,
        default_gas: u64,
    ) -> Self {
        Self {
            visitor,
            connector,
            default_account,
            default_gas,
        }
    }

    pub fn abi(&self) -> &Function {
        self.visitor.abi()
    }

    pub fn as_clause(&self, args: &[Value]) -> BlockchainResult<Clause> {
        self.visitor.as_clause(args)
    }

    pub async fn call(&self, args: &[Value]) -> BlockchainResult<CallOutput> {
        self.visitor.call(args).await
    }

    /// Dry-run the call with `args` and report gas per clause.
    ///
    /// Caller falls back to the default account, gas to the configured default.
    pub async fn explain_gas(
        &self,
        args: &[Value],
        config: MethodConfig,
    ) -> ProviderResult<Vec<CallOutput>> {
        let caller = config
            .from
            .or(self.default_account)
            .ok_or(ProviderError::MissingSettings(vec!["default_account"]))?;
        let gas = config.gas.unwrap_or(self.default_gas);
        let clause = self.as_clause(args)?;

        let outputs = self
            .connector
            .explain(ExplainRequest {
                caller,
                gas,
                clauses: vec![clause],
            })
            .await?;

        let gas_used: u64 = outputs.iter().map(|o| o.gas_used).sum();
        tracing::debug!(method = %self.abi().name, caller = %caller, gas_used, "Gas explained");
        Ok(outputs)
    }
}

impl fmt::Debug for ContractMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractMethod")
            .field("method", &self.abi().signature())
            .field("default_account", &self.default_account)
            .field("default_gas", &self.default_gas)
            .finish()
    }
}
