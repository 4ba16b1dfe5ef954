//! Chain-specific types and error definitions.

use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chain tag identifying a network (the last byte of its genesis block id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainTag(pub u8);

impl ChainTag {
    pub const MAINNET: ChainTag = ChainTag(0x4a);
    pub const TESTNET: ChainTag = ChainTag(0x27);
}

impl From<u8> for ChainTag {
    fn from(tag: u8) -> Self {
        Self(tag)
    }
}

impl From<ChainTag> for u8 {
    fn from(tag: ChainTag) -> Self {
        tag.0
    }
}

impl FromStr for ChainTag {
    type Err = BlockchainError;

    /// Accepts hex (`0x27`) or decimal (`39`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => u8::from_str_radix(hex, 16),
            None => trimmed.parse::<u8>(),
        };
        parsed
            .map(ChainTag)
            .map_err(|_| BlockchainError::InvalidChainTag(s.to_string()))
    }
}

impl TryFrom<String> for ChainTag {
    type Error = BlockchainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChainTag> for String {
    fn from(tag: ChainTag) -> Self {
        tag.to_string()
    }
}

impl fmt::Display for ChainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

/// Errors that can occur talking to the connector.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// The connector rejected or failed a request.
    #[error("Connector error: {0}")]
    Connector(String),

    /// Arguments could not be turned into a clause by the connector.
    #[error("Cannot encode call to {method}: {reason}")]
    Encoding { method: String, reason: String },

    /// The signing service failed (not a user decline).
    #[error("Signing failed: {0}")]
    Signing(String),

    /// No receipt was seen within the confirmation timeout.
    #[error("Transaction {txid} not confirmed after {secs} seconds")]
    ConfirmationTimeout { txid: B256, secs: u64 },

    /// A chain tag string could not be parsed.
    #[error("Invalid chain tag: {0}")]
    InvalidChainTag(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// A single transaction instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Destination contract; `None` deploys.
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
}

impl Clause {
    /// A zero-value call to `to` with the given calldata.
    pub fn call(to: Address, data: Bytes) -> Self {
        Self {
            to: Some(to),
            value: U256::ZERO,
            data,
        }
    }
}

/// Wallet answer to a signing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResponse {
    pub txid: B256,
    pub signer: Address,
}

/// Receipt of a packed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub block_number: u64,
    pub block_id: B256,
    pub reverted: bool,
    pub gas_used: u64,
}

/// Output of a read-only call or of one explained clause.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallOutput {
    pub data: Bytes,
    /// Return values decoded by the connector, keyed by output name and index.
    pub decoded: Option<serde_json::Value>,
    pub reverted: bool,
    pub revert_reason: Option<String>,
    pub vm_error: String,
    pub gas_used: u64,
}

/// Log metadata attached by the connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMeta {
    pub block_id: B256,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub txid: B256,
    pub tx_origin: Address,
}

/// A decoded contract event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    /// Event arguments decoded by the connector.
    pub decoded: Option<serde_json::Value>,
    pub meta: LogMeta,
}

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction is not packed yet.
    Pending,
    /// Transaction is packed in a block.
    Confirmed { block_number: u64 },
    /// Transaction was packed but reverted.
    Failed(String),
}

impl From<&Receipt> for ConfirmationStatus {
    fn from(receipt: &Receipt) -> Self {
        if receipt.reverted {
            ConfirmationStatus::Failed(format!("reverted in block {}", receipt.block_number))
        } else {
            ConfirmationStatus::Confirmed {
                block_number: receipt.block_number,
            }
        }
    }
}

/// Status of a receipt poll; no receipt yet means pending.
impl From<Option<&Receipt>> for ConfirmationStatus {
    fn from(receipt: Option<&Receipt>) -> Self {
        match receipt {
            Some(receipt) => ConfirmationStatus::from(receipt),
            None => ConfirmationStatus::Pending,
        }
    }
}
