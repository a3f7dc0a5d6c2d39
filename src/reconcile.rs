//! Network Reconciler
//!
//! State machine that guarantees the wallet is on the target chain
//! before any ledger write:
//!
//! ```text
//! Unknown -> Correct                         (chain id already matches)
//! Unknown -> Mismatched -> Switching -> Correct
//! Switching -> AddingChain -> Switching(retry) -> Correct | Failed
//! ```
//!
//! If the chain id already matches, no switch or add request is ever
//! issued. On a switch rejection carrying the "unrecognized chain"
//! code, exactly one add-chain request is issued with the full chain
//! descriptor, then the switch is retried exactly once. Any other
//! failure is terminal; the reconciler never proceeds on a wrong chain.

use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ChainTarget;
use crate::provider::{
    parse_chain_id_hex, ProviderError, WalletProvider, ETH_CHAIN_ID, WALLET_ADD_CHAIN,
    WALLET_SWITCH_CHAIN,
};

/// Reconciliation failure, with the provider error attached
#[derive(Debug, Clone, Error)]
pub enum ReconcileError {
    #[error("chain id query failed: {0}")]
    ChainIdQuery(#[source] ProviderError),

    #[error("provider returned a malformed chain id: {0}")]
    MalformedChainId(String),

    #[error("switch to chain {chain_id} rejected: {source}")]
    SwitchRejected {
        chain_id: u64,
        #[source]
        source: ProviderError,
    },

    #[error("add-chain request for chain {chain_id} rejected: {source}")]
    AddChainRejected {
        chain_id: u64,
        #[source]
        source: ProviderError,
    },
}

/// Observable reconciler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileState {
    /// No chain id observed yet
    Unknown,
    /// Wallet chain id matches the target; safe to submit
    Correct,
    /// Wallet reported a foreign chain id
    Mismatched,
    /// A switch-chain request is in flight
    Switching,
    /// The wallet did not recognize the target; adding its descriptor
    AddingChain,
    /// Terminal failure; the wallet is still on the wrong chain
    Failed,
}

/// Ensures the wallet chain id matches the target before writes
pub struct NetworkReconciler {
    provider: Arc<dyn WalletProvider>,
    target: ChainTarget,
    state: ReconcileState,
    switch_requests: u32,
    add_requests: u32,
}

impl NetworkReconciler {
    pub fn new(provider: Arc<dyn WalletProvider>, target: ChainTarget) -> Self {
        Self {
            provider,
            target,
            state: ReconcileState::Unknown,
            switch_requests: 0,
            add_requests: 0,
        }
    }

    pub fn state(&self) -> ReconcileState {
        self.state
    }

    /// Switch-chain requests issued so far
    pub fn switch_requests(&self) -> u32 {
        self.switch_requests
    }

    /// Add-chain requests issued so far
    pub fn add_requests(&self) -> u32 {
        self.add_requests
    }

    /// Drive the state machine to Correct or Failed
    ///
    /// Single bounded attempt: at most one switch, one add, one retry
    /// switch. No backoff, no loop.
    pub async fn ensure_chain(&mut self) -> Result<(), ReconcileError> {
        let current = self.current_chain_id().await?;

        if current == self.target.chain_id {
            debug!(chain_id = current, "wallet already on target chain");
            self.state = ReconcileState::Correct;
            return Ok(());
        }

        self.state = ReconcileState::Mismatched;
        info!(
            current_chain_id = current,
            target_chain_id = self.target.chain_id,
            "wallet on foreign chain, requesting switch"
        );

        let first_switch = self.request_switch().await;
        match first_switch {
            Ok(()) => {
                self.state = ReconcileState::Correct;
                Ok(())
            }
            Err(err) if err.is_chain_unrecognized() => {
                self.state = ReconcileState::AddingChain;
                info!(
                    chain_id = self.target.chain_id,
                    "target chain unrecognized, adding its descriptor"
                );
                if let Err(source) = self.request_add_chain().await {
                    warn!(error = %source, "add-chain request rejected");
                    self.state = ReconcileState::Failed;
                    return Err(ReconcileError::AddChainRejected {
                        chain_id: self.target.chain_id,
                        source,
                    });
                }
                // One retry after a successful add, never more.
                match self.request_switch().await {
                    Ok(()) => {
                        self.state = ReconcileState::Correct;
                        Ok(())
                    }
                    Err(source) => {
                        warn!(error = %source, "retry switch rejected");
                        self.state = ReconcileState::Failed;
                        Err(ReconcileError::SwitchRejected {
                            chain_id: self.target.chain_id,
                            source,
                        })
                    }
                }
            }
            Err(source) => {
                warn!(error = %source, "switch-chain request rejected");
                self.state = ReconcileState::Failed;
                Err(ReconcileError::SwitchRejected {
                    chain_id: self.target.chain_id,
                    source,
                })
            }
        }
    }

    async fn current_chain_id(&self) -> Result<u64, ReconcileError> {
        let raw = self
            .provider
            .request(ETH_CHAIN_ID, json!([]))
            .await
            .map_err(ReconcileError::ChainIdQuery)?;
        raw.as_str()
            .and_then(parse_chain_id_hex)
            .ok_or_else(|| ReconcileError::MalformedChainId(raw.to_string()))
    }

    async fn request_switch(&mut self) -> Result<(), ProviderError> {
        self.state = ReconcileState::Switching;
        self.switch_requests += 1;
        self.provider
            .request(
                WALLET_SWITCH_CHAIN,
                json!([{ "chainId": self.target.chain_id_hex() }]),
            )
            .await
            .map(|_| ())
    }

    async fn request_add_chain(&mut self) -> Result<(), ProviderError> {
        self.add_requests += 1;
        self.provider
            .request(
                WALLET_ADD_CHAIN,
                json!([{
                    "chainId": self.target.chain_id_hex(),
                    "chainName": self.target.chain_name,
                    "rpcUrls": self.target.rpc_urls,
                    "blockExplorerUrls": [self.target.explorer_url],
                }]),
            )
            .await
            .map(|_| ())
    }
}
