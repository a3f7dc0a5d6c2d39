//! Credential Ledger interface
//!
//! The ledger itself is external; this module is the consumed contract
//! surface only. The published ABI, mirrored bit-exact by the trait:
//!
//! ```text
//! function issueCredential(uint256 fid, string skillName)            // non-payable
//! event    CredentialIssued(address indexed user, uint256 indexed fid,
//!                           string skillName, uint256 timestamp)
//! function getCredentialCount(address) view returns (uint256)
//! function getCredential(address, uint256) view
//!          returns (uint256 fid, string skillName, uint256 completedAt)
//! ```
//!
//! Ownership is bound to the transaction signer: `issue` takes no owner
//! address, ever. Per-owner sequences are append-only and
//! insertion-ordered; the ledger offers no mutation or removal.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

use crate::provider::ProviderError;

/// Transaction hash as the `0x`-prefixed string providers return
pub type TxHash = String;

/// One immutable ledger record, owned by the issuing address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Opaque social-identity id supplied by the external provider
    pub fid: u64,
    /// Skill label from the challenge definition
    pub skill_name: String,
    /// Chain timestamp at issuance
    pub issued_at: u64,
}

/// Ledger interaction failures
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// Read past the end of an owner's sequence
    #[error("credential index {index} out of bounds for {owner} (count {count})")]
    IndexOutOfBounds {
        owner: String,
        index: u64,
        count: u64,
    },

    /// The dry run reverted with this contract message
    #[error("execution reverted: {0}")]
    Reverted(String),

    /// The underlying provider refused or failed the request
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Consumed interface to the credential ledger contract
#[async_trait]
pub trait CredentialLedger: Send + Sync {
    /// Dry-run `issueCredential` against current chain state, without
    /// cost and without requesting a signature
    async fn simulate_issue(&self, fid: u64, skill_name: &str) -> Result<(), LedgerError>;

    /// Request the wallet to sign and broadcast `issueCredential`;
    /// the credential's owner is the transaction signer
    async fn submit_issue(&self, fid: u64, skill_name: &str) -> Result<TxHash, LedgerError>;

    /// Await inclusion of a previously submitted transaction. The
    /// caller bounds this wait; the ledger side may block indefinitely.
    async fn await_inclusion(&self, tx_hash: &TxHash) -> Result<(), LedgerError>;

    /// `getCredentialCount(address)`
    async fn credential_count(&self, owner: &str) -> Result<u64, LedgerError>;

    /// `getCredential(address, index)`; fails for `index >= count`
    async fn credential(&self, owner: &str, index: u64) -> Result<Credential, LedgerError>;
}

#[async_trait]
impl<T: CredentialLedger + ?Sized> CredentialLedger for std::sync::Arc<T> {
    async fn simulate_issue(&self, fid: u64, skill_name: &str) -> Result<(), LedgerError> {
        (**self).simulate_issue(fid, skill_name).await
    }

    async fn submit_issue(&self, fid: u64, skill_name: &str) -> Result<TxHash, LedgerError> {
        (**self).submit_issue(fid, skill_name).await
    }

    async fn await_inclusion(&self, tx_hash: &TxHash) -> Result<(), LedgerError> {
        (**self).await_inclusion(tx_hash).await
    }

    async fn credential_count(&self, owner: &str) -> Result<u64, LedgerError> {
        (**self).credential_count(owner).await
    }

    async fn credential(&self, owner: &str, index: u64) -> Result<Credential, LedgerError> {
        (**self).credential(owner, index).await
    }
}

/// In-memory ledger honoring the contract's append-only guarantees.
///
/// Backs the demo CLI and tests. Sequences are keyed by owner and only
/// ever appended to; issued credentials are never mutated.
pub struct MemoryLedger {
    signer: String,
    entries: RwLock<HashMap<String, Vec<Credential>>>,
    nonce: AtomicU64,
}

impl MemoryLedger {
    pub fn new(signer: impl Into<String>) -> Self {
        Self {
            signer: signer.into(),
            entries: RwLock::new(HashMap::new()),
            nonce: AtomicU64::new(1),
        }
    }

    /// Address this ledger signs as
    pub fn signer(&self) -> &str {
        &self.signer
    }
}

#[async_trait]
impl CredentialLedger for MemoryLedger {
    async fn simulate_issue(&self, _fid: u64, _skill_name: &str) -> Result<(), LedgerError> {
        Ok(())
    }

    async fn submit_issue(&self, fid: u64, skill_name: &str) -> Result<TxHash, LedgerError> {
        let credential = Credential {
            fid,
            skill_name: skill_name.to_string(),
            issued_at: Utc::now().timestamp().max(0) as u64,
        };
        self.entries
            .write()
            .entry(self.signer.clone())
            .or_default()
            .push(credential);
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        Ok(format!("0x{nonce:064x}"))
    }

    async fn await_inclusion(&self, _tx_hash: &TxHash) -> Result<(), LedgerError> {
        Ok(())
    }

    async fn credential_count(&self, owner: &str) -> Result<u64, LedgerError> {
        Ok(self
            .entries
            .read()
            .get(owner)
            .map(|seq| seq.len() as u64)
            .unwrap_or(0))
    }

    async fn credential(&self, owner: &str, index: u64) -> Result<Credential, LedgerError> {
        let entries = self.entries.read();
        let seq = entries.get(owner).map(Vec::as_slice).unwrap_or(&[]);
        seq.get(index as usize)
            .cloned()
            .ok_or_else(|| LedgerError::IndexOutOfBounds {
                owner: owner.to_string(),
                index,
                count: seq.len() as u64,
            })
    }
}
