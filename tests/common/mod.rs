//! Shared utilities for provider integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use alloy::json_abi::{Event, Function};
use alloy::primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use serde_json::{json, Value};

use connex_provider::blockchain::{
    AccountVisitor, BlockchainError, BlockchainResult, CallOutput, ChainTag, Clause, Connector,
    EventLog, EventVisitor, ExplainRequest, LogMeta, MethodVisitor, Receipt, TxResponse,
    TxSigningRequest,
};
use connex_provider::config::ProviderConfig;
use connex_provider::contract::{ContractImport, EventQuery};

pub const TXID: B256 = B256::repeat_byte(0xab);

pub fn energy_address() -> Address {
    "0x0000000000000000000000000000456e65726779".parse().unwrap()
}

pub fn owner() -> Address {
    "0x7567d83b7b8d80addcb281a71d54fc7b3364ffed".parse().unwrap()
}

pub fn other_account() -> Address {
    "0xd3ae78222beadb038203be21ed5ce7c9b1bff602".parse().unwrap()
}

/// VTHO-like token import deployed on testnet only.
pub fn energy_import() -> ContractImport {
    ContractImport::from_json(
        r#"{
        "abi": [
            {
                "type": "function",
                "name": "balanceOf",
                "inputs": [{ "name": "_owner", "type": "address", "internalType": "address" }],
                "outputs": [{ "name": "balance", "type": "uint256", "internalType": "uint256" }],
                "stateMutability": "view"
            },
            {
                "type": "function",
                "name": "transfer",
                "inputs": [
                    { "name": "_to", "type": "address", "internalType": "address" },
                    { "name": "_amount", "type": "uint256", "internalType": "uint256" }
                ],
                "outputs": [{ "name": "success", "type": "bool", "internalType": "bool" }],
                "stateMutability": "nonpayable"
            },
            {
                "type": "event",
                "name": "Transfer",
                "inputs": [
                    { "name": "_from", "type": "address", "indexed": true, "internalType": "address" },
                    { "name": "_to", "type": "address", "indexed": true, "internalType": "address" },
                    { "name": "_value", "type": "uint256", "indexed": false, "internalType": "uint256" }
                ],
                "anonymous": false
            }
        ],
        "address": { "0x27": "0x0000000000000000000000000000456e65726779" }
    }"#,
    )
    .unwrap()
}

/// Config with fast receipt polling.
pub fn fast_config() -> Arc<ProviderConfig> {
    let mut config = ProviderConfig::default();
    config.confirmation.poll_base_ms = 1;
    config.confirmation.poll_max_ms = 5;
    config.confirmation.timeout_secs = 1;
    Arc::new(config)
}

pub fn transfer_log(block_number: u64) -> EventLog {
    EventLog {
        address: energy_address(),
        topics: vec![B256::repeat_byte(1)],
        data: Bytes::new(),
        decoded: Some(json!({ "_from": owner().to_string(), "_value": "10" })),
        meta: LogMeta {
            block_id: B256::repeat_byte(2),
            block_number,
            block_timestamp: 1_700_000_000 + block_number,
            txid: TXID,
            tx_origin: owner(),
        },
    }
}

/// Recorded interactions and scripted answers.
#[derive(Default)]
pub struct MockState {
    pub sign_requests: Mutex<Vec<TxSigningRequest>>,
    pub explain_requests: Mutex<Vec<ExplainRequest>>,
    pub event_queries: Mutex<Vec<EventQuery>>,
    pub calls: Mutex<Vec<(String, Vec<Value>)>>,
    pub accounts: Mutex<Vec<Address>>,
    pub receipt_polls: AtomicU32,
    /// Polls answered with `None` before the receipt appears; `None` = never.
    pub receipt_after: Mutex<Option<u32>>,
    pub reverted: AtomicBool,
    pub call_result: Mutex<Value>,
    pub logs: Mutex<Vec<EventLog>>,
}

/// In-memory connector.
#[derive(Clone, Default)]
pub struct MockConnector {
    pub state: Arc<MockState>,
}

impl MockConnector {
    pub fn new() -> Self {
        let connector = Self::default();
        *connector.state.receipt_after.lock().unwrap() = Some(2);
        *connector.state.call_result.lock().unwrap() = json!({ "balance": "1000" });
        connector
    }

    pub fn never_confirms(self) -> Self {
        *self.state.receipt_after.lock().unwrap() = None;
        self
    }

    /// Receipts report the transaction as reverted.
    pub fn reverts(self) -> Self {
        self.state.reverted.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_logs(self, logs: Vec<EventLog>) -> Self {
        *self.state.logs.lock().unwrap() = logs;
        self
    }

    pub fn sign_count(&self) -> usize {
        self.state.sign_requests.lock().unwrap().len()
    }

    pub fn last_sign_request(&self) -> Option<TxSigningRequest> {
        self.state.sign_requests.lock().unwrap().last().cloned()
    }

    pub fn last_event_query(&self) -> Option<EventQuery> {
        self.state.event_queries.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Connector for MockConnector {
    fn account(&self, address: Address) -> Arc<dyn AccountVisitor> {
        self.state.accounts.lock().unwrap().push(address);
        Arc::new(MockAccount {
            address,
            state: self.state.clone(),
        })
    }

    async fn explain(&self, request: ExplainRequest) -> BlockchainResult<Vec<CallOutput>> {
        let outputs = request
            .clauses
            .iter()
            .map(|_| CallOutput {
                gas_used: 36_518,
                ..CallOutput::default()
            })
            .collect();
        self.state.explain_requests.lock().unwrap().push(request);
        Ok(outputs)
    }

    async fn sign_tx(&self, request: TxSigningRequest) -> BlockchainResult<TxResponse> {
        let signer = request.signer;
        self.state.sign_requests.lock().unwrap().push(request);
        Ok(TxResponse { txid: TXID, signer })
    }

    async fn receipt(&self, txid: B256) -> BlockchainResult<Option<Receipt>> {
        let polls = self.state.receipt_polls.fetch_add(1, Ordering::SeqCst);
        let ready = match *self.state.receipt_after.lock().unwrap() {
            Some(after) => polls >= after,
            None => false,
        };
        if txid != TXID {
            return Err(BlockchainError::Connector(format!("unknown tx {txid}")));
        }
        Ok(ready.then(|| Receipt {
            block_number: 1_000,
            block_id: B256::repeat_byte(3),
            reverted: self.state.reverted.load(Ordering::SeqCst),
            gas_used: 36_518,
        }))
    }
}

struct MockAccount {
    address: Address,
    state: Arc<MockState>,
}

impl AccountVisitor for MockAccount {
    fn address(&self) -> Address {
        self.address
    }

    fn method(&self, abi: &Function) -> Arc<dyn MethodVisitor> {
        Arc::new(MockMethod {
            abi: abi.clone(),
            address: self.address,
            state: self.state.clone(),
        })
    }

    fn event(&self, abi: &Event) -> Arc<dyn EventVisitor> {
        Arc::new(MockEvent {
            abi: abi.clone(),
            state: self.state.clone(),
        })
    }
}

struct MockMethod {
    abi: Function,
    address: Address,
    state: Arc<MockState>,
}

#[async_trait]
impl MethodVisitor for MockMethod {
    fn abi(&self) -> &Function {
        &self.abi
    }

    fn as_clause(&self, args: &[Value]) -> BlockchainResult<Clause> {
        if args.len() != self.abi.inputs.len() {
            return Err(BlockchainError::Encoding {
                method: self.abi.name.clone(),
                reason: format!("expected {} arguments, got {}", self.abi.inputs.len(), args.len()),
            });
        }
        let data = serde_json::to_vec(args).map_err(|e| BlockchainError::Encoding {
            method: self.abi.name.clone(),
            reason: e.to_string(),
        })?;
        Ok(Clause::call(self.address, Bytes::from(data)))
    }

    async fn call(&self, args: &[Value]) -> BlockchainResult<CallOutput> {
        self.state
            .calls
            .lock()
            .unwrap()
            .push((self.abi.name.clone(), args.to_vec()));
        Ok(CallOutput {
            decoded: Some(self.state.call_result.lock().unwrap().clone()),
            gas_used: 1_000,
            ..CallOutput::default()
        })
    }
}

struct MockEvent {
    abi: Event,
    state: Arc<MockState>,
}

#[async_trait]
impl EventVisitor for MockEvent {
    fn abi(&self) -> &Event {
        &self.abi
    }

    async fn apply(&self, query: &EventQuery) -> BlockchainResult<Vec<EventLog>> {
        self.state.event_queries.lock().unwrap().push(query.clone());
        let logs = self.state.logs.lock().unwrap();
        Ok(logs
            .iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }
}

pub fn testnet() -> ChainTag {
    ChainTag::TESTNET
}
