//! Challenge configuration
//!
//! Defines the process-wide configuration:
//! - Target chain descriptor (chain id, RPC endpoints, explorer)
//! - Built-in challenge catalog (prompt, category, rubric kind)
//! - Confirmation wait bound for credential transactions
//!
//! The chain target is an explicit immutable value injected into the
//! Reconciler and Submitter at construction, never module-level state,
//! so tests can substitute alternate targets freely.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::provider::chain_id_hex;
use crate::rubric::RubricKind;

/// Descriptor of the chain credentials are issued on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainTarget {
    /// Numeric chain id the wallet must be on before any write
    pub chain_id: u64,
    /// Human-readable chain name, used in add-chain requests
    pub chain_name: String,
    /// RPC endpoints, passed verbatim in add-chain requests
    pub rpc_urls: Vec<String>,
    /// Explorer base URL for human-facing transaction links
    pub explorer_url: String,
}

impl Default for ChainTarget {
    fn default() -> Self {
        Self {
            chain_id: 8453, // Base mainnet
            chain_name: "Base".to_string(),
            rpc_urls: vec!["https://mainnet.base.org".to_string()],
            explorer_url: "https://basescan.org".to_string(),
        }
    }
}

impl ChainTarget {
    /// Chain id formatted the way provider requests expect it
    pub fn chain_id_hex(&self) -> String {
        chain_id_hex(self.chain_id)
    }

    /// Human-facing explorer link for a transaction hash
    pub fn tx_link(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }

    /// Build a chain target from environment variables, falling back to
    /// the default descriptor for anything unset
    pub fn from_env() -> Self {
        let default = Self::default();
        let chain_id = std::env::var("SKILL_CHAIN_ID")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default.chain_id);
        let chain_name = std::env::var("SKILL_CHAIN_NAME").unwrap_or(default.chain_name);
        let rpc_urls = std::env::var("SKILL_RPC_URL")
            .map(|url| vec![url])
            .unwrap_or(default.rpc_urls);
        let explorer_url = std::env::var("SKILL_EXPLORER_URL").unwrap_or(default.explorer_url);
        Self {
            chain_id,
            chain_name,
            rpc_urls,
            explorer_url,
        }
    }
}

/// One challenge definition, immutable after configuration load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Stable challenge identifier
    pub id: String,
    /// Display category (e.g. "communication")
    pub category: String,
    /// Rubric kind used to score submissions; scoring dispatches on
    /// this alone, never on the challenge id
    pub rubric_kind: RubricKind,
    /// Prompt shown to the user
    pub prompt: String,
    /// Skill label recorded in the issued credential
    pub skill_name: String,
    /// Suggested minimum response length, surfaced as a hint only
    pub min_length_hint: usize,
}

/// Built-in challenge catalog
static CATALOG: Lazy<Vec<Challenge>> = Lazy::new(|| {
    vec![
        Challenge {
            id: "email-rewrite".to_string(),
            category: "communication".to_string(),
            rubric_kind: RubricKind::CorrespondenceRewrite,
            prompt: "Rewrite this message to a client as professional correspondence: \
                     'hey, stuff is late, my bad, will get it to u whenever'"
                .to_string(),
            skill_name: "Professional Correspondence".to_string(),
            min_length_hint: 30,
        },
        Challenge {
            id: "pitch-intro".to_string(),
            category: "presentation".to_string(),
            rubric_kind: RubricKind::PresentationIntro,
            prompt: "Introduce yourself to open a project pitch meeting with a new client."
                .to_string(),
            skill_name: "Presentation Skills".to_string(),
            min_length_hint: 40,
        },
        Challenge {
            id: "rate-pushback".to_string(),
            category: "negotiation".to_string(),
            rubric_kind: RubricKind::NegotiationResponse,
            prompt: "A client says your rate is double their budget. Respond without \
                     simply caving or walking away."
                .to_string(),
            skill_name: "Negotiation".to_string(),
            min_length_hint: 40,
        },
    ]
});

/// Complete challenge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeConfig {
    /// Upper bound on the confirmation wait, in seconds
    pub confirmation_timeout_secs: u64,
    /// Target chain for credential issuance
    pub chain: ChainTarget,
    /// Available challenges
    pub challenges: Vec<Challenge>,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout_secs: crate::DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            chain: ChainTarget::default(),
            challenges: CATALOG.clone(),
        }
    }
}

impl ChallengeConfig {
    /// Look up a challenge by id
    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}
