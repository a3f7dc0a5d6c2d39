//! End-to-end pipeline tests with scripted wallet providers

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

use skill_challenge::provider::{ETH_CHAIN_ID, WALLET_ADD_CHAIN, WALLET_SWITCH_CHAIN};
use skill_challenge::{
    ChallengeConfig, ChallengeError, CredentialLedger, CredentialPipeline, MemoryLedger,
    ProofStatus, ProviderError, Submission, CHAIN_UNRECOGNIZED_CODE, USER_REJECTED_CODE,
};

const SIGNER: &str = "0x00000000000000000000000000000000000000a1";
const PASSING_ANSWER: &str =
    "Dear team, I apologize for the delay; I will send the report by Friday. Best regards";

/// Wallet provider on a foreign chain with scripted switch behavior
struct ForeignChainProvider {
    /// Results for successive switch requests
    switch_results: Mutex<Vec<Result<Value, ProviderError>>>,
    /// Methods issued, in order
    calls: Mutex<Vec<String>>,
    /// Set once a switch succeeds; flips the reported chain id
    switched: Mutex<bool>,
    target_hex: String,
}

impl ForeignChainProvider {
    fn new(switch_results: Vec<Result<Value, ProviderError>>, target_hex: &str) -> Self {
        Self {
            switch_results: Mutex::new(switch_results),
            calls: Mutex::new(vec![]),
            switched: Mutex::new(false),
            target_hex: target_hex.to_string(),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl skill_challenge::WalletProvider for ForeignChainProvider {
    async fn request(&self, method: &str, _params: Value) -> Result<Value, ProviderError> {
        self.calls.lock().push(method.to_string());
        match method {
            ETH_CHAIN_ID => {
                let hex = if *self.switched.lock() {
                    self.target_hex.clone()
                } else {
                    "0x1".to_string()
                };
                Ok(Value::String(hex))
            }
            WALLET_SWITCH_CHAIN => {
                let mut queued = self.switch_results.lock();
                let result = if queued.is_empty() {
                    Ok(Value::Null)
                } else {
                    queued.remove(0)
                };
                if result.is_ok() {
                    *self.switched.lock() = true;
                }
                result
            }
            WALLET_ADD_CHAIN => Ok(Value::Null),
            other => Err(ProviderError::new(-32601, format!("no method {other}"))),
        }
    }
}

fn submission(text: &str) -> Submission {
    Submission {
        text: text.to_string(),
        challenge_id: "email-rewrite".to_string(),
    }
}

#[tokio::test]
async fn test_full_flow_switches_then_issues() {
    let config = ChallengeConfig::default();
    let provider = Arc::new(ForeignChainProvider::new(
        vec![Ok(Value::Null)],
        &config.chain.chain_id_hex(),
    ));
    let pipeline =
        CredentialPipeline::new(provider.clone(), MemoryLedger::new(SIGNER), config.clone());

    let report = pipeline.run(&submission(PASSING_ANSWER), 7).await.unwrap();

    assert!(report.breakdown.passed);
    match &report.proof {
        ProofStatus::Confirmed { explorer_link, .. } => {
            assert!(explorer_link.starts_with(&config.chain.explorer_url));
        }
        other => panic!("expected Confirmed, got {other:?}"),
    }
    // chain id query, one switch, then the write through the ledger
    assert_eq!(
        provider.calls(),
        vec![ETH_CHAIN_ID.to_string(), WALLET_SWITCH_CHAIN.to_string()]
    );
}

#[tokio::test]
async fn test_reconciliation_failure_keeps_verdict() {
    let config = ChallengeConfig::default();
    let rejected = ProviderError::new(USER_REJECTED_CODE, "User rejected the request.");
    let provider = Arc::new(ForeignChainProvider::new(
        vec![Err(rejected)],
        &config.chain.chain_id_hex(),
    ));
    let ledger = MemoryLedger::new(SIGNER);
    let pipeline = CredentialPipeline::new(provider, ledger, config);

    let report = pipeline.run(&submission(PASSING_ANSWER), 7).await.unwrap();

    // The local verdict stands; the proof is explicitly absent with
    // manual-switch guidance.
    assert!(report.breakdown.passed);
    match &report.proof {
        ProofStatus::Absent { error } => match error {
            ChallengeError::ReconciliationFailed {
                expected_chain_id, ..
            } => assert_eq!(*expected_chain_id, 8453),
            other => panic!("expected ReconciliationFailed, got {other:?}"),
        },
        other => panic!("expected Absent, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unrecognized_chain_adds_exactly_once() {
    let config = ChallengeConfig::default();
    let unrecognized = || ProviderError::new(CHAIN_UNRECOGNIZED_CODE, "Unrecognized chain ID");
    let provider = Arc::new(ForeignChainProvider::new(
        vec![Err(unrecognized()), Err(unrecognized())],
        &config.chain.chain_id_hex(),
    ));
    let pipeline = CredentialPipeline::new(provider.clone(), MemoryLedger::new(SIGNER), config);

    let report = pipeline.run(&submission(PASSING_ANSWER), 7).await.unwrap();
    assert!(!report.has_proof());

    let calls = provider.calls();
    let adds = calls.iter().filter(|m| *m == WALLET_ADD_CHAIN).count();
    let switches = calls.iter().filter(|m| *m == WALLET_SWITCH_CHAIN).count();
    assert_eq!(adds, 1);
    assert_eq!(switches, 2);
}

#[tokio::test]
async fn test_ledger_sequence_across_multiple_passes() {
    let config = ChallengeConfig::default();
    let provider = Arc::new(ForeignChainProvider::new(
        vec![Ok(Value::Null)],
        &config.chain.chain_id_hex(),
    ));
    let ledger = Arc::new(MemoryLedger::new(SIGNER));
    let pipeline = CredentialPipeline::new(provider, ledger.clone(), config);

    for fid in [1u64, 2, 3] {
        let report = pipeline.run(&submission(PASSING_ANSWER), fid).await.unwrap();
        assert!(report.has_proof());
    }

    assert_eq!(ledger.credential_count(SIGNER).await.unwrap(), 3);
    for i in 0..3u64 {
        let credential = ledger.credential(SIGNER, i).await.unwrap();
        assert_eq!(credential.fid, i + 1);
    }
    assert!(ledger.credential(SIGNER, 3).await.is_err());
}

#[tokio::test]
async fn test_failed_scoring_issues_no_provider_requests() {
    let config = ChallengeConfig::default();
    let provider = Arc::new(ForeignChainProvider::new(
        vec![],
        &config.chain.chain_id_hex(),
    ));
    let pipeline = CredentialPipeline::new(provider.clone(), MemoryLedger::new(SIGNER), config);

    let report = pipeline.run(&submission("hey thx asap"), 7).await.unwrap();

    assert!(!report.breakdown.passed);
    assert!(matches!(report.proof, ProofStatus::NotAttempted));
    assert!(provider.calls().is_empty());
}
