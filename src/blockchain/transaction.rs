//! Transaction signing and confirmation monitoring.
//!
//! # Responsibilities
//! - Put a signing request in front of the user-confirmation prompt
//! - Forward approved requests to the connector's signing service
//! - Wait for the receipt of a signed transaction

use std::sync::Arc;
use std::time::Instant;

use alloy::primitives::B256;
use futures_util::future::BoxFuture;
use tokio::time::{sleep, timeout, Duration};

use crate::blockchain::connector::{Connector, TxSigningRequest};
use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ConfirmationStatus, Receipt, TxResponse,
};
use crate::config::ConfirmationConfig;
use crate::observability::metrics;
use crate::resilience::PollSchedule;

/// User-confirmation callback. Resolves to `true` when the user approves.
pub type AskSigning = Arc<dyn Fn(TxSigningRequest) -> BoxFuture<'static, bool> + Send + Sync>;

/// Signing request gated by an optional user prompt.
pub struct TxSigner {
    connector: Arc<dyn Connector>,
    request: TxSigningRequest,
    ask: Option<AskSigning>,
}

impl TxSigner {
    pub fn new(connector: Arc<dyn Connector>, request: TxSigningRequest) -> Self {
        Self {
            connector,
            request,
            ask: None,
        }
    }

    /// Require approval from `ask` before the wallet is contacted.
    pub fn with_prompt(mut self, ask: Option<AskSigning>) -> Self {
        self.ask = ask;
        self
    }

    pub fn payload(&self) -> &TxSigningRequest {
        &self.request
    }

    /// Prompt the user, then sign.
    ///
    /// Returns `Ok(None)` when the prompt declines; the signing service is
    /// not called in that case.
    pub async fn request_signing(&self) -> BlockchainResult<Option<TxResponse>> {
        if let Some(ask) = &self.ask {
            if !ask(self.request.clone()).await {
                tracing::info!(signer = %self.request.signer, "Signing declined by user");
                return Ok(None);
            }
        }

        let response = self.connector.sign_tx(self.request.clone()).await?;
        tracing::info!(
            txid = %response.txid,
            signer = %response.signer,
            clauses = self.request.clauses.len(),
            "Transaction signed"
        );
        Ok(Some(response))
    }
}

/// Wait until the connector reports a receipt for `txid`.
///
/// Polls with jittered backoff and gives up after `config.timeout_secs`.
/// A reverted receipt is returned like any other; callers inspect it.
pub async fn wait_for_confirmation(
    connector: &dyn Connector,
    txid: B256,
    config: &ConfirmationConfig,
) -> BlockchainResult<Receipt> {
    let started = Instant::now();
    let mut schedule = PollSchedule::new(config.poll_base_ms, config.poll_max_ms);

    let result = timeout(Duration::from_secs(config.timeout_secs), async {
        loop {
            sleep(schedule.next_delay()).await;

            match connector.receipt(txid).await {
                Ok(Some(receipt)) => return Ok(receipt),
                Err(e) => return Err(e),
                Ok(None) => {
                    let status = ConfirmationStatus::from(None::<&Receipt>);
                    tracing::debug!(
                        txid = %txid,
                        attempt = schedule.attempts(),
                        status = ?status,
                        "Transaction pending"
                    );
                }
            }
        }
    })
    .await;

    match result {
        Ok(Ok(receipt)) => {
            metrics::record_confirmation_wait(started.elapsed());
            match ConfirmationStatus::from(&receipt) {
                ConfirmationStatus::Failed(reason) => {
                    tracing::warn!(txid = %txid, reason = %reason, "Transaction confirmed but reverted");
                }
                _ => {
                    tracing::debug!(txid = %txid, block = receipt.block_number, "Transaction confirmed");
                }
            }
            Ok(receipt)
        }
        Ok(Err(e)) => Err(e),
        Err(_) => Err(BlockchainError::ConfirmationTimeout {
            txid,
            secs: config.timeout_secs,
        }),
    }
}
