//! Credential pipeline
//!
//! End-to-end flow for one submission:
//! score -> (if passed) reconcile network -> issue credential -> report.
//!
//! Scoring failures resolve entirely locally and never trigger a chain
//! interaction. A chain failure after a passing score leaves the local
//! verdict standing; the on-chain proof is then reported separately and
//! explicitly as absent. The pipeline makes exactly one submission
//! attempt per passing score; callers prevent duplicate triggers while
//! one run is pending.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ChallengeConfig;
use crate::error::ChallengeError;
use crate::ledger::{CredentialLedger, TxHash};
use crate::provider::WalletProvider;
use crate::reconcile::NetworkReconciler;
use crate::scoring::{score, ScoreBreakdown, Submission};
use crate::submit::CredentialSubmitter;

/// On-chain proof status, reported independently of the local verdict
#[derive(Debug, Clone)]
pub enum ProofStatus {
    /// Scoring did not pass; the chain layer was never touched
    NotAttempted,
    /// Credential write confirmed on chain
    Confirmed {
        tx_hash: TxHash,
        explorer_link: String,
    },
    /// Scoring passed but the write failed; the verdict stands and the
    /// proof is explicitly absent
    Absent { error: ChallengeError },
}

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct SubmissionReport {
    pub challenge_id: String,
    pub skill_name: String,
    pub breakdown: ScoreBreakdown,
    pub proof: ProofStatus,
}

impl SubmissionReport {
    /// Whether the credential landed on chain
    pub fn has_proof(&self) -> bool {
        matches!(self.proof, ProofStatus::Confirmed { .. })
    }
}

/// Orchestrates scoring, reconciliation and submission
pub struct CredentialPipeline<L: CredentialLedger> {
    provider: Arc<dyn WalletProvider>,
    submitter: CredentialSubmitter<L>,
    config: ChallengeConfig,
}

impl<L: CredentialLedger> CredentialPipeline<L> {
    pub fn new(provider: Arc<dyn WalletProvider>, ledger: L, config: ChallengeConfig) -> Self {
        let submitter = CredentialSubmitter::new(ledger, config.chain.clone())
            .with_confirmation_timeout(std::time::Duration::from_secs(
                config.confirmation_timeout_secs,
            ));
        Self {
            provider,
            submitter,
            config,
        }
    }

    pub fn config(&self) -> &ChallengeConfig {
        &self.config
    }

    /// Score a submission without touching the chain layer
    ///
    /// Returns `ScoringRejected` below the pass threshold, so callers
    /// that only need a verdict get the typed failure.
    pub fn evaluate(&self, submission: &Submission) -> Result<ScoreBreakdown, ChallengeError> {
        let challenge = self
            .config
            .challenge(&submission.challenge_id)
            .ok_or_else(|| ChallengeError::UnknownChallenge(submission.challenge_id.clone()))?;
        let breakdown = score(&submission.text, challenge.rubric_kind);
        if breakdown.passed {
            Ok(breakdown)
        } else {
            Err(ChallengeError::ScoringRejected {
                score: breakdown.total,
                feedback: breakdown.feedback,
            })
        }
    }

    /// Run the full pipeline for one submission
    ///
    /// Errors only on an unknown challenge id; every scoring or chain
    /// outcome is folded into the report so the verdict and the proof
    /// status stay independently visible.
    pub async fn run(
        &self,
        submission: &Submission,
        fid: u64,
    ) -> Result<SubmissionReport, ChallengeError> {
        let challenge = self
            .config
            .challenge(&submission.challenge_id)
            .ok_or_else(|| ChallengeError::UnknownChallenge(submission.challenge_id.clone()))?;

        let breakdown = score(&submission.text, challenge.rubric_kind);
        info!(
            challenge_id = %challenge.id,
            total = breakdown.total,
            passed = breakdown.passed,
            "submission scored"
        );

        if !breakdown.passed {
            // Resolved locally; the user edits and resubmits.
            return Ok(SubmissionReport {
                challenge_id: challenge.id.clone(),
                skill_name: challenge.skill_name.clone(),
                breakdown,
                proof: ProofStatus::NotAttempted,
            });
        }

        // Reconciliation strictly precedes the write.
        let mut reconciler =
            NetworkReconciler::new(self.provider.clone(), self.config.chain.clone());
        if let Err(source) = reconciler.ensure_chain().await {
            warn!(error = %source, "network reconciliation failed");
            return Ok(SubmissionReport {
                challenge_id: challenge.id.clone(),
                skill_name: challenge.skill_name.clone(),
                breakdown,
                proof: ProofStatus::Absent {
                    error: ChallengeError::ReconciliationFailed {
                        expected_chain_id: self.config.chain.chain_id,
                        source,
                    },
                },
            });
        }

        // One submission attempt per passing score, no silent retry.
        let proof = match self.submitter.issue(fid, &challenge.skill_name).await {
            Ok(confirmed) => ProofStatus::Confirmed {
                tx_hash: confirmed.tx_hash,
                explorer_link: confirmed.explorer_link,
            },
            Err(error) => {
                warn!(error = %error, "credential issuance failed, verdict stands");
                ProofStatus::Absent { error }
            }
        };

        Ok(SubmissionReport {
            challenge_id: challenge.id.clone(),
            skill_name: challenge.skill_name.clone(),
            breakdown,
            proof,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use crate::provider::ProviderError;
    use async_trait::async_trait;
    use serde_json::Value;

    const SIGNER: &str = "0x00000000000000000000000000000000000000a1";

    struct OnTargetProvider;

    #[async_trait]
    impl WalletProvider for OnTargetProvider {
        async fn request(&self, method: &str, _params: Value) -> Result<Value, ProviderError> {
            match method {
                crate::provider::ETH_CHAIN_ID => Ok(Value::String("0x2105".to_string())),
                other => Err(ProviderError::new(-32601, format!("no method {other}"))),
            }
        }
    }

    fn pipeline() -> CredentialPipeline<MemoryLedger> {
        CredentialPipeline::new(
            Arc::new(OnTargetProvider),
            MemoryLedger::new(SIGNER),
            ChallengeConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_failing_score_never_reaches_chain() {
        let pipeline = pipeline();
        let submission = Submission {
            text: "hey thx asap".to_string(),
            challenge_id: "email-rewrite".to_string(),
        };

        let report = pipeline.run(&submission, 42).await.unwrap();

        assert!(!report.breakdown.passed);
        assert!(matches!(report.proof, ProofStatus::NotAttempted));
        let ledger = pipeline.submitter.ledger();
        assert_eq!(ledger.credential_count(SIGNER).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_passing_score_issues_credential() {
        let pipeline = pipeline();
        let submission = Submission {
            text: "Dear team, I apologize for the delay; I will send the report by Friday. \
                   Best regards"
                .to_string(),
            challenge_id: "email-rewrite".to_string(),
        };

        let report = pipeline.run(&submission, 42).await.unwrap();

        assert!(report.breakdown.passed);
        assert!(report.has_proof());
        let ledger = pipeline.submitter.ledger();
        assert_eq!(ledger.credential_count(SIGNER).await.unwrap(), 1);
        let credential = ledger.credential(SIGNER, 0).await.unwrap();
        assert_eq!(credential.fid, 42);
        assert_eq!(credential.skill_name, "Professional Correspondence");
    }

    #[tokio::test]
    async fn test_unknown_challenge_is_typed() {
        let pipeline = pipeline();
        let submission = Submission {
            text: "anything".to_string(),
            challenge_id: "no-such-challenge".to_string(),
        };
        let err = pipeline.run(&submission, 42).await.unwrap_err();
        assert!(matches!(err, ChallengeError::UnknownChallenge(_)));
    }

    #[test]
    fn test_evaluate_returns_scoring_rejected() {
        let pipeline = pipeline();
        let submission = Submission {
            text: "hey thx asap".to_string(),
            challenge_id: "email-rewrite".to_string(),
        };
        let err = pipeline.evaluate(&submission).unwrap_err();
        assert!(matches!(
            err,
            ChallengeError::ScoringRejected { score: 0, .. }
        ));
    }
}
