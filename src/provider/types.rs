//! Provider-facing types and error definitions.

use std::sync::Arc;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::{BlockchainError, ChainTag, Receipt, TxResponse};
use crate::store::StoreState;

/// Provider families known to the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Connex,
    Thorify,
    Web3,
}

/// Errors raised by provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Required settings were not supplied before connecting.
    #[error("Missing onReady settings: {}", .0.join(", "))]
    MissingSettings(Vec<&'static str>),

    /// No connector has been injected yet.
    #[error("Provider not ready: no connector")]
    NotReady,

    /// The contract import has no address for the active chain tag.
    #[error("No contract address for chain tag {0}")]
    NoContractAddress(ChainTag),

    #[error("Unknown ABI function: {0}")]
    UnknownMethod(String),

    #[error("Unknown ABI event: {0}")]
    UnknownEvent(String),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Per-call signing options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningOptions {
    /// Signer; defaults to the provider's default account.
    pub from: Option<Address>,
    /// Gas limit; defaults to the configured signing gas.
    pub gas: Option<u64>,
    /// Map action to run once the transaction confirms.
    pub dispatch: Option<String>,
    /// Text shown by the wallet.
    pub comment: Option<String>,
}

impl SigningOptions {
    pub fn dispatch(name: impl Into<String>) -> Self {
        Self {
            dispatch: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Caller and gas overrides for a gas explanation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodConfig {
    pub from: Option<Address>,
    pub gas: Option<u64>,
}

/// How a signing request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SigningOutcome {
    /// Signed; no store action was dispatched.
    Signed(TxResponse),
    /// Signed and confirmed; the store holds the merged state.
    Confirmed {
        tx: TxResponse,
        receipt: Receipt,
        state: Arc<StoreState>,
    },
    /// The user-confirmation prompt declined; nothing was sent.
    Declined,
    /// Signed and confirmed, but the store mutation failed and was skipped.
    MutationFailed {
        tx: TxResponse,
        receipt: Receipt,
        error: String,
    },
}

impl SigningOutcome {
    /// Metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            SigningOutcome::Signed(_) => "signed",
            SigningOutcome::Confirmed { .. } => "confirmed",
            SigningOutcome::Declined => "declined",
            SigningOutcome::MutationFailed { .. } => "mutation_failed",
        }
    }

    /// Signed transaction, unless declined.
    pub fn tx(&self) -> Option<&TxResponse> {
        match self {
            SigningOutcome::Signed(tx)
            | SigningOutcome::Confirmed { tx, .. }
            | SigningOutcome::MutationFailed { tx, .. } => Some(tx),
            SigningOutcome::Declined => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings_display() {
        let err = ProviderError::MissingSettings(vec!["connector", "chain_tag"]);
        assert_eq!(err.to_string(), "Missing onReady settings: connector, chain_tag");
    }

    #[test]
    fn test_outcome_kind() {
        assert_eq!(SigningOutcome::Declined.kind(), "declined");
        assert!(SigningOutcome::Declined.tx().is_none());
    }

    #[test]
    fn test_signing_options_from_json() {
        let options: SigningOptions =
            serde_json::from_str(r#"{ "gas": 90000, "dispatch": "transfer" }"#).unwrap();
        assert_eq!(options.gas, Some(90_000));
        assert_eq!(options, SigningOptions { gas: Some(90_000), ..SigningOptions::dispatch("transfer") });
    }
}
