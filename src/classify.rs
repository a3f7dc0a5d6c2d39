//! Error Classifier
//!
//! Maps raw provider/chain error text onto a closed taxonomy. Matching
//! is substring-based against a fixed ordered pattern list; the first
//! match wins and anything unmatched is kept verbatim as `Unknown`.
//!
//! Used by the Transaction Submitter for submit-phase failures and
//! standalone by the Network Reconciler for switch/add failures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification of raw chain-layer error messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifiedError {
    /// The user declined the signature request in their wallet
    UserRejectedSignature,
    /// The signer cannot cover the transaction cost
    InsufficientFunds,
    /// The wallet is connected to a different chain than the target
    WrongNetwork,
    /// No pattern matched; the raw message is preserved verbatim
    Unknown(String),
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserRejectedSignature => write!(f, "user rejected signature"),
            Self::InsufficientFunds => write!(f, "insufficient funds"),
            Self::WrongNetwork => write!(f, "wrong network"),
            Self::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Tag {
    Rejected,
    Funds,
    Network,
}

/// Ordered pattern table; earlier entries win on overlap
const PATTERNS: &[(&str, Tag)] = &[
    ("user rejected", Tag::Rejected),
    ("user denied", Tag::Rejected),
    ("rejected the request", Tag::Rejected),
    ("request rejected", Tag::Rejected),
    ("insufficient funds", Tag::Funds),
    ("insufficient balance", Tag::Funds),
    ("exceeds balance", Tag::Funds),
    ("wrong network", Tag::Network),
    ("wrong chain", Tag::Network),
    ("chain mismatch", Tag::Network),
    ("unsupported chain", Tag::Network),
    ("network changed", Tag::Network),
];

/// Classify a raw error message
///
/// The message is lowercased before matching; the original casing is
/// what `Unknown` retains for display.
pub fn classify(raw: &str) -> ClassifiedError {
    let normalized = raw.to_lowercase();
    for (pattern, tag) in PATTERNS {
        if normalized.contains(pattern) {
            return match tag {
                Tag::Rejected => ClassifiedError::UserRejectedSignature,
                Tag::Funds => ClassifiedError::InsufficientFunds,
                Tag::Network => ClassifiedError::WrongNetwork,
            };
        }
    }
    ClassifiedError::Unknown(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_rejected_any_case() {
        for raw in [
            "User rejected the request.",
            "USER REJECTED transaction",
            "MetaMask Tx Signature: User denied transaction signature.",
        ] {
            assert_eq!(classify(raw), ClassifiedError::UserRejectedSignature);
        }
    }

    #[test]
    fn test_insufficient_funds() {
        assert_eq!(
            classify("err: insufficient funds for gas * price + value"),
            ClassifiedError::InsufficientFunds
        );
        assert_eq!(
            classify("transfer amount exceeds balance"),
            ClassifiedError::InsufficientFunds
        );
    }

    #[test]
    fn test_wrong_network() {
        assert_eq!(
            classify("provider is on the wrong network"),
            ClassifiedError::WrongNetwork
        );
        assert_eq!(
            classify("underlying network changed"),
            ClassifiedError::WrongNetwork
        );
    }

    #[test]
    fn test_first_match_wins() {
        // Contains both a rejection and a funds pattern; rejection is
        // earlier in the table.
        assert_eq!(
            classify("user rejected after seeing insufficient funds warning"),
            ClassifiedError::UserRejectedSignature
        );
    }

    #[test]
    fn test_unknown_preserves_raw_verbatim() {
        let raw = "RPC Error: Something Novel Happened";
        match classify(raw) {
            ClassifiedError::Unknown(msg) => assert_eq!(msg, raw),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }
}
