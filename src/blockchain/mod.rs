//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Host-injected connector
//!     → connector.rs (account / method / event visitors, signing service)
//!     → transaction.rs (user prompt, sign, wait for receipt)
//!     → types.rs (clauses, receipts, logs, errors)
//! ```
//!
//! # Constraints
//! - The provider never encodes ABI data or broadcasts itself
//! - Declined prompts never reach the signing service
//! - Every receipt wait is bounded by the confirmation timeout

pub mod connector;
pub mod transaction;
pub mod types;

pub use connector::{
    AccountVisitor, Connector, EventVisitor, ExplainRequest, MethodVisitor, TxSigningRequest,
};
pub use transaction::{wait_for_confirmation, AskSigning, TxSigner};
pub use types::{
    BlockchainError, BlockchainResult, CallOutput, ChainTag, Clause, ConfirmationStatus, EventLog,
    LogMeta, Receipt, TxResponse,
};
