//! Transaction Submitter
//!
//! Three-phase protocol against the credential ledger, strictly
//! ordered and never auto-retried:
//!
//! 1. Simulate: dry-run the write; a revert aborts before any
//!    signature is requested
//! 2. Submit: request signature and broadcast; failures are classified
//! 3. Confirm: await inclusion under an explicit bound; exceeding it is
//!    `SubmissionTimeout`, an ambiguous outcome that is never treated
//!    as success or failure
//!
//! At most one submission attempt is made per call; preventing
//! duplicate triggers while one is pending is the caller's job.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ChainTarget;
use crate::error::ChallengeError;
use crate::ledger::{CredentialLedger, TxHash};

/// Lifecycle of one credential transaction; ends at Confirmed or Failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionOutcome {
    /// Dry run passed; no signature requested yet
    Simulated,
    /// Broadcast accepted; awaiting inclusion
    Submitted { tx_hash: TxHash },
    /// Included on chain
    Confirmed { tx_hash: TxHash },
    /// Terminal failure with its classified reason
    Failed { reason: String },
}

impl TransactionOutcome {
    /// Hash of the transaction, once one exists
    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            Self::Simulated | Self::Failed { .. } => None,
            Self::Submitted { tx_hash } | Self::Confirmed { tx_hash } => Some(tx_hash),
        }
    }

    /// Whether the lifecycle has ended
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed { .. } | Self::Failed { .. })
    }
}

/// A confirmed credential write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedIssue {
    pub tx_hash: TxHash,
    pub explorer_link: String,
}

/// Runs the simulate/submit/confirm pipeline against a ledger
pub struct CredentialSubmitter<L: CredentialLedger> {
    ledger: L,
    target: ChainTarget,
    confirmation_timeout: Duration,
}

impl<L: CredentialLedger> CredentialSubmitter<L> {
    pub fn new(ledger: L, target: ChainTarget) -> Self {
        Self {
            ledger,
            target,
            confirmation_timeout: Duration::from_secs(crate::DEFAULT_CONFIRMATION_TIMEOUT_SECS),
        }
    }

    /// Override the confirmation wait bound
    pub fn with_confirmation_timeout(mut self, bound: Duration) -> Self {
        self.confirmation_timeout = bound;
        self
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Issue one credential through the full pipeline
    pub async fn issue(&self, fid: u64, skill_name: &str) -> Result<ConfirmedIssue, ChallengeError> {
        // Phase 1: simulate. Abort before any signature on revert.
        if let Err(err) = self.ledger.simulate_issue(fid, skill_name).await {
            let outcome = TransactionOutcome::Failed {
                reason: err.to_string(),
            };
            warn!(fid, skill_name, ?outcome, "simulation reverted");
            return Err(ChallengeError::SimulationReverted(err.to_string()));
        }
        let outcome = TransactionOutcome::Simulated;
        debug!(fid, skill_name, ?outcome, "simulation passed");

        // Phase 2: sign and broadcast.
        let tx_hash = match self.ledger.submit_issue(fid, skill_name).await {
            Ok(hash) => hash,
            Err(err) => {
                let outcome = TransactionOutcome::Failed {
                    reason: err.to_string(),
                };
                warn!(fid, skill_name, ?outcome, "submission failed");
                return Err(ChallengeError::from_chain_failure(
                    &err.to_string(),
                    self.target.chain_id,
                ));
            }
        };
        let outcome = TransactionOutcome::Submitted {
            tx_hash: tx_hash.clone(),
        };
        info!(fid, skill_name, ?outcome, "credential transaction submitted");

        // Phase 3: bounded confirmation wait.
        match tokio::time::timeout(
            self.confirmation_timeout,
            self.ledger.await_inclusion(&tx_hash),
        )
        .await
        {
            Ok(Ok(())) => {
                let outcome = TransactionOutcome::Confirmed {
                    tx_hash: tx_hash.clone(),
                };
                info!(?outcome, "credential transaction confirmed");
                Ok(ConfirmedIssue {
                    explorer_link: self.target.tx_link(&tx_hash),
                    tx_hash,
                })
            }
            Ok(Err(err)) => {
                warn!(%tx_hash, error = %err, "confirmation failed");
                Err(ChallengeError::from_chain_failure(
                    &err.to_string(),
                    self.target.chain_id,
                ))
            }
            Err(_) => {
                // Ambiguous: the transaction may still land on chain.
                warn!(%tx_hash, "confirmation wait exceeded its bound");
                Err(ChallengeError::SubmissionTimeout {
                    explorer_link: self.target.tx_link(&tx_hash),
                    tx_hash,
                    waited_secs: self.confirmation_timeout.as_secs(),
                })
            }
        }
    }
}
