//! Wallet connector interface.
//!
//! # Responsibilities
//! - Describe the external wallet/connector the provider drives
//! - Account visitors: contract method and event handles bound to an address
//! - Signing service, explainer (dry-run) and receipt lookup
//!
//! ABI encoding, broadcasting and block production happen behind these
//! traits. The provider only forwards ABI definitions and JSON arguments.

use std::sync::Arc;

use alloy::json_abi::{Event, Function};
use alloy::primitives::{Address, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::blockchain::types::{BlockchainResult, CallOutput, Clause, EventLog, Receipt, TxResponse};
use crate::contract::events::EventQuery;

/// Request handed to the connector's transaction signing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSigningRequest {
    /// Account expected to sign.
    pub signer: Address,
    /// Maximum gas for the whole transaction.
    pub gas: u64,
    pub clauses: Vec<Clause>,
    /// Free-form text shown by the wallet.
    pub comment: Option<String>,
}

/// Dry-run request for gas estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub caller: Address,
    pub gas: u64,
    pub clauses: Vec<Clause>,
}

/// The injected wallet connector.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Visitor for the account (contract) at `address`.
    fn account(&self, address: Address) -> Arc<dyn AccountVisitor>;

    /// Execute clauses without committing, one output per clause.
    async fn explain(&self, request: ExplainRequest) -> BlockchainResult<Vec<CallOutput>>;

    /// Ask the wallet to sign and send a transaction.
    async fn sign_tx(&self, request: TxSigningRequest) -> BlockchainResult<TxResponse>;

    /// Receipt for `txid`, or `None` while the transaction is not packed.
    async fn receipt(&self, txid: B256) -> BlockchainResult<Option<Receipt>>;
}

/// Contract account handle.
pub trait AccountVisitor: Send + Sync {
    fn address(&self) -> Address;

    /// Method handle for an ABI function definition.
    fn method(&self, abi: &Function) -> Arc<dyn MethodVisitor>;

    /// Event handle for an ABI event definition.
    fn event(&self, abi: &Event) -> Arc<dyn EventVisitor>;
}

/// Contract method handle.
#[async_trait]
pub trait MethodVisitor: Send + Sync {
    fn abi(&self) -> &Function;

    /// Encode arguments into a clause targeting the contract.
    fn as_clause(&self, args: &[Value]) -> BlockchainResult<Clause>;

    /// Read-only call.
    async fn call(&self, args: &[Value]) -> BlockchainResult<CallOutput>;
}

/// Contract event handle.
#[async_trait]
pub trait EventVisitor: Send + Sync {
    fn abi(&self) -> &Event;

    /// Run a filtered, paged event query.
    async fn apply(&self, query: &EventQuery) -> BlockchainResult<Vec<EventLog>>;
}
