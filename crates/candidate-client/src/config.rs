//! CLI arguments and resolved configuration.
//!
//! The RPC endpoint comes from `--url`, then the `CANDIDATE_RPC_URL` env
//! var, then the devnet default. Everything is resolved once into an
//! immutable `Config` before any component runs.

use std::path::PathBuf;

use clap::Parser;

use crate::error::ClientError;

/// Environment variable naming the RPC endpoint.
pub const RPC_URL_ENV: &str = "CANDIDATE_RPC_URL";

/// Fallback endpoint when neither the flag nor the env var is set.
pub const DEVNET_URL: &str = "https://api.devnet.solana.com";

#[derive(Debug, Parser)]
#[command(
    name = "candidate-client",
    about = "Write a candidate record to the on-chain program and read back records and history"
)]
pub struct Args {
    /// RPC endpoint URL; overrides CANDIDATE_RPC_URL
    #[arg(long)]
    pub url: Option<String>,

    /// Path to the payer keypair file (default: ~/.config/solana/id.json)
    #[arg(long)]
    pub payer_keypair: Option<PathBuf>,

    /// Path to the deployed program's keypair file
    #[arg(long, default_value = "dist/program/candidate-keypair.json")]
    pub program_keypair: PathBuf,

    /// Pin the account derivation seed; unpinned runs pick one of the demo
    /// seeds at random
    #[arg(long)]
    pub seed: Option<String>,

    /// Maximum number of history entries to fetch
    #[arg(long, default_value_t = 10)]
    pub history_limit: usize,

    /// Keep walking the history past per-transaction fetch failures instead
    /// of aborting on the first one
    #[arg(long)]
    pub best_effort: bool,

    /// Candidate age
    #[arg(long, default_value_t = 30)]
    pub age: u32,

    /// Years of experience
    #[arg(long, default_value_t = 5)]
    pub experience: u32,

    /// Candidate first name
    #[arg(long, default_value = "Jane")]
    pub first_name: String,

    /// Candidate last name
    #[arg(long, default_value = "Doe")]
    pub last_name: String,

    /// Candidate qualification
    #[arg(long, default_value = "Rust engineer")]
    pub qualification: String,
}

/// Immutable resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub payer_keypair: PathBuf,
    pub program_keypair: PathBuf,
    pub seed: Option<String>,
    pub history_limit: usize,
    pub best_effort: bool,
}

impl Config {
    pub fn resolve(args: &Args) -> Result<Self, ClientError> {
        let rpc_url = resolve_url(args.url.clone(), std::env::var(RPC_URL_ENV).ok())?;

        let payer_keypair = match &args.payer_keypair {
            Some(path) => path.clone(),
            None => default_payer_keypair()?,
        };

        Ok(Self {
            rpc_url,
            payer_keypair,
            program_keypair: args.program_keypair.clone(),
            seed: args.seed.clone(),
            history_limit: args.history_limit,
            best_effort: args.best_effort,
        })
    }
}

/// Endpoint precedence: flag, then env var, then the devnet default. An env
/// var that is set but blank is a configuration mistake, not a fallback.
fn resolve_url(flag: Option<String>, env: Option<String>) -> Result<String, ClientError> {
    if let Some(url) = flag {
        return Ok(url);
    }
    match env {
        Some(url) if url.trim().is_empty() => Err(ClientError::Configuration(format!(
            "{RPC_URL_ENV} is set but empty"
        ))),
        Some(url) => Ok(url),
        None => Ok(DEVNET_URL.to_string()),
    }
}

fn default_payer_keypair() -> Result<PathBuf, ClientError> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".config/solana/id.json"))
        .ok_or_else(|| {
            ClientError::Configuration(
                "--payer-keypair not given and HOME is unset".into(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_env() {
        let url = resolve_url(
            Some("http://localhost:8899".into()),
            Some("http://elsewhere:8899".into()),
        )
        .unwrap();
        assert_eq!(url, "http://localhost:8899");
    }

    #[test]
    fn env_wins_over_default() {
        let url = resolve_url(None, Some("http://elsewhere:8899".into())).unwrap();
        assert_eq!(url, "http://elsewhere:8899");
    }

    #[test]
    fn default_is_devnet() {
        assert_eq!(resolve_url(None, None).unwrap(), DEVNET_URL);
    }

    #[test]
    fn blank_env_is_an_error() {
        let err = resolve_url(None, Some("   ".into())).unwrap_err();
        assert!(err.to_string().contains(RPC_URL_ENV));
    }

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::parse_from(["candidate-client"]);
        assert!(args.url.is_none());
        assert!(args.seed.is_none());
        assert_eq!(args.history_limit, 10);
        assert!(!args.best_effort);
        assert_eq!(args.first_name, "Jane");
    }

    #[test]
    fn seed_flag_is_captured() {
        let args = Args::parse_from(["candidate-client", "--seed", "hello1"]);
        assert_eq!(args.seed.as_deref(), Some("hello1"));
    }
}
