//! Pipeline error taxonomy
//!
//! Every failure the credential pipeline can surface, as a closed
//! `thiserror` enum. Scoring failures are resolved locally and never
//! reach the chain layer; chain-layer failures are surfaced distinctly
//! and are never reinterpreted as a confirmed credential.

use thiserror::Error;

use crate::classify::{classify, ClassifiedError};
use crate::reconcile::ReconcileError;

/// Failures surfaced by the credential pipeline
///
/// All variants are recoverable by user action: edit and resubmit,
/// switch networks, top up funds, approve the signature, or check the
/// explorer after a timeout.
#[derive(Debug, Clone, Error)]
pub enum ChallengeError {
    /// Input too short or below the pass threshold; never triggers a
    /// chain interaction
    #[error("submission did not pass the rubric (score {score}/100): {feedback}")]
    ScoringRejected { score: u32, feedback: String },

    /// No challenge with this id exists in the configuration
    #[error("unknown challenge id: {0}")]
    UnknownChallenge(String),

    /// The wallet reported a foreign chain during submission
    #[error("wallet is on the wrong network, expected chain {expected_chain_id}")]
    NetworkMismatch { expected_chain_id: u64 },

    /// Automatic reconciliation failed; the user must switch manually
    #[error("could not switch the wallet to chain {expected_chain_id}, switch manually and retry")]
    ReconciliationFailed {
        expected_chain_id: u64,
        #[source]
        source: ReconcileError,
    },

    /// The dry run reverted; surfaced verbatim, no retry without
    /// changing inputs
    #[error("transaction simulation reverted: {0}")]
    SimulationReverted(String),

    /// The user declined the signature request
    #[error("signature request was rejected in the wallet")]
    UserRejectedSignature,

    /// The signer cannot cover the transaction cost
    #[error("insufficient funds to cover the transaction")]
    InsufficientFunds,

    /// The confirmation wait ran out. Outcome ambiguous: the
    /// transaction may still land, so instruct the user to check the
    /// explorer rather than assume success or failure
    #[error("no confirmation within {waited_secs}s, check {explorer_link} before retrying")]
    SubmissionTimeout {
        tx_hash: String,
        explorer_link: String,
        waited_secs: u64,
    },

    /// Catch-all with the raw provider message preserved
    #[error("provider error: {0}")]
    UnknownProvider(String),
}

impl ChallengeError {
    /// Map a raw chain-layer failure message through the classifier
    pub fn from_chain_failure(raw: &str, expected_chain_id: u64) -> Self {
        match classify(raw) {
            ClassifiedError::UserRejectedSignature => Self::UserRejectedSignature,
            ClassifiedError::InsufficientFunds => Self::InsufficientFunds,
            ClassifiedError::WrongNetwork => Self::NetworkMismatch { expected_chain_id },
            ClassifiedError::Unknown(message) => Self::UnknownProvider(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_chain_failure_classification() {
        assert!(matches!(
            ChallengeError::from_chain_failure("User rejected the request.", 8453),
            ChallengeError::UserRejectedSignature
        ));
        assert!(matches!(
            ChallengeError::from_chain_failure("insufficient funds for gas", 8453),
            ChallengeError::InsufficientFunds
        ));
        assert!(matches!(
            ChallengeError::from_chain_failure("wrong network", 8453),
            ChallengeError::NetworkMismatch {
                expected_chain_id: 8453
            }
        ));
    }

    #[test]
    fn test_unknown_keeps_raw_message() {
        let err = ChallengeError::from_chain_failure("exotic failure 0xdeadbeef", 8453);
        match err {
            ChallengeError::UnknownProvider(raw) => assert_eq!(raw, "exotic failure 0xdeadbeef"),
            other => panic!("expected UnknownProvider, got {other:?}"),
        }
    }

    #[test]
    fn test_timeout_message_points_at_explorer() {
        let err = ChallengeError::SubmissionTimeout {
            tx_hash: "0xabc".to_string(),
            explorer_link: "https://basescan.org/tx/0xabc".to_string(),
            waited_secs: 90,
        };
        let msg = err.to_string();
        assert!(msg.contains("https://basescan.org/tx/0xabc"));
        assert!(msg.contains("90"));
    }
}
