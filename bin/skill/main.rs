//! Skill Challenge CLI
//!
//! Local tooling around the credential core: score responses against a
//! rubric, classify raw provider errors, list the challenge catalog,
//! and run the full pipeline against an in-memory chain.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;
use skill_challenge::{
    classify, score, ChainTarget, ChallengeConfig, CredentialPipeline, MemoryLedger, ProofStatus,
    ProviderError, RubricKind, Submission, WalletProvider,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "skill")]
#[command(about = "Proof-of-skill credential challenge tools")]
struct Args {
    /// Challenge config file (TOML); defaults to the built-in catalog
    #[arg(long, env = "SKILL_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a response against a rubric kind and print the breakdown
    Score {
        /// Rubric kind to score against
        #[arg(long, value_enum)]
        rubric: RubricKind,
        /// Response text
        text: String,
    },
    /// Classify a raw provider/chain error message
    Classify {
        /// Raw error message
        message: String,
    },
    /// List the challenge catalog
    Challenges,
    /// Run the full pipeline against an in-memory provider and ledger
    Demo {
        /// Challenge id from the catalog
        #[arg(long, default_value = "email-rewrite")]
        challenge: String,
        /// Social-identity id recorded in the credential
        #[arg(long, default_value = "42")]
        fid: u64,
        /// Response text
        text: String,
    },
}

/// Provider that always reports the configured target chain; stands in
/// for a real wallet during local runs.
struct LocalProvider {
    chain_id_hex: String,
}

#[async_trait::async_trait]
impl WalletProvider for LocalProvider {
    async fn request(&self, method: &str, _params: Value) -> Result<Value, ProviderError> {
        match method {
            skill_challenge::provider::ETH_CHAIN_ID => {
                Ok(Value::String(self.chain_id_hex.clone()))
            }
            other => Err(ProviderError::new(-32601, format!("no method {other}"))),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skill_challenge=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    let args = Args::parse();

    // Without a config file, the chain target still honors SKILL_*
    // environment overrides.
    let config = match &args.config {
        Some(path) => ChallengeConfig::load_from_file(path)?,
        None => ChallengeConfig {
            chain: ChainTarget::from_env(),
            ..ChallengeConfig::default()
        },
    };

    match args.command {
        Command::Score { rubric, text } => {
            let breakdown = score(&text, rubric);
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        }
        Command::Classify { message } => {
            println!("{}", serde_json::to_string_pretty(&classify(&message))?);
        }
        Command::Challenges => {
            for challenge in &config.challenges {
                println!(
                    "{:<16} [{}] min {} chars: {}",
                    challenge.id, challenge.category, challenge.min_length_hint, challenge.prompt
                );
            }
        }
        Command::Demo {
            challenge,
            fid,
            text,
        } => {
            let provider = Arc::new(LocalProvider {
                chain_id_hex: config.chain.chain_id_hex(),
            });
            let signer = "0x00000000000000000000000000000000000000a1";
            let pipeline = CredentialPipeline::new(provider, MemoryLedger::new(signer), config);

            let submission = Submission {
                text,
                challenge_id: challenge,
            };
            let report = pipeline.run(&submission, fid).await?;

            info!(
                challenge_id = %report.challenge_id,
                total = report.breakdown.total,
                passed = report.breakdown.passed,
                "pipeline finished"
            );
            println!("score: {}/100 ({})", report.breakdown.total, report.breakdown.feedback);
            match report.proof {
                ProofStatus::Confirmed {
                    tx_hash,
                    explorer_link,
                } => println!("credential issued: {tx_hash}\n  {explorer_link}"),
                ProofStatus::Absent { error } => println!("no on-chain proof: {error}"),
                ProofStatus::NotAttempted => println!("no on-chain proof: score below threshold"),
            }
        }
    }

    Ok(())
}
