//! Proof-of-Skill Credential Challenge
//!
//! Issues a skill credential after a free-text answer passes a
//! deterministic rubric check, then records it on an append-only
//! on-chain ledger.
//!
//! ## Module Structure
//!
//! - `rubric`: static registry mapping rubric kind to scoring config
//! - `scoring`: pure text scoring with diagnostic breakdowns
//! - `classify`: closed-taxonomy classification of raw chain errors
//! - `provider`: wallet provider boundary (EIP-1193 shaped)
//! - `reconcile`: chain-matching state machine run before any write
//! - `submit`: simulate/submit/confirm transaction pipeline
//! - `ledger`: consumed credential-ledger contract interface
//! - `pipeline`: score -> reconcile -> issue orchestration
//! - `config`: chain target and challenge catalog

/// Closed-taxonomy error classification
pub mod classify;

/// Chain target and challenge configuration
pub mod config;

/// Pipeline error taxonomy
pub mod error;

/// Credential ledger consumed interface
pub mod ledger;

/// End-to-end submission pipeline
pub mod pipeline;

/// Wallet provider boundary
pub mod provider;

/// Network reconciliation state machine
pub mod reconcile;

/// Rubric registry
pub mod rubric;

/// Deterministic rubric scorer
pub mod scoring;

/// Transaction submitter
pub mod submit;

pub use classify::{classify, ClassifiedError};
pub use config::{ChainTarget, Challenge, ChallengeConfig};
pub use error::ChallengeError;
pub use ledger::{Credential, CredentialLedger, LedgerError, MemoryLedger, TxHash};
pub use pipeline::{CredentialPipeline, ProofStatus, SubmissionReport};
pub use provider::{ProviderError, WalletProvider, CHAIN_UNRECOGNIZED_CODE, USER_REJECTED_CODE};
pub use reconcile::{NetworkReconciler, ReconcileError, ReconcileState};
pub use rubric::{rubric_for, RubricConfig, RubricKind};
pub use scoring::{score, ScoreBreakdown, Submission};
pub use submit::{ConfirmedIssue, CredentialSubmitter, TransactionOutcome};

/// Fixed pass threshold, identical for every rubric kind
pub const PASS_THRESHOLD: u32 = 60;

/// Default upper bound on the confirmation wait, in seconds
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 90;
