//! Wallet provider boundary
//!
//! The core never talks to a wallet directly; it goes through the
//! [`WalletProvider`] trait, a `request(method, params)` surface shaped
//! like the EIP-1193 provider API:
//! - `eth_chainId`
//! - `wallet_switchEthereumChain`
//! - `wallet_addEthereumChain`
//! - transaction signing/broadcast (consumed via the ledger interface)
//!
//! Errors carry the provider's numeric code; the Reconciler inspects
//! the code to distinguish "chain unrecognized" from a refusal.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Provider error code meaning the requested chain is not configured
/// in the wallet and must be added before switching (EIP-3085)
pub const CHAIN_UNRECOGNIZED_CODE: i64 = 4902;

/// Provider error code for a user-rejected request (EIP-1193)
pub const USER_REJECTED_CODE: i64 = 4001;

/// RPC method names the core issues against the provider
pub const ETH_CHAIN_ID: &str = "eth_chainId";
pub const WALLET_SWITCH_CHAIN: &str = "wallet_switchEthereumChain";
pub const WALLET_ADD_CHAIN: &str = "wallet_addEthereumChain";

/// Error returned by a wallet provider request
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("provider error {code}: {message}")]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Whether the wallet does not recognize the requested chain
    pub fn is_chain_unrecognized(&self) -> bool {
        self.code == CHAIN_UNRECOGNIZED_CODE
    }
}

/// Async boundary to the user's wallet
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Issue one provider request and await its result
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

/// Parse a `0x`-prefixed hex chain id as returned by `eth_chainId`
pub fn parse_chain_id_hex(raw: &str) -> Option<u64> {
    let stripped = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))?;
    u64::from_str_radix(stripped, 16).ok()
}

/// Format a chain id the way provider requests expect it
pub fn chain_id_hex(chain_id: u64) -> String {
    format!("{chain_id:#x}")
}
