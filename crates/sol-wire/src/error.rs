use thiserror::Error;

/// Errors raised while assembling or signing Solana wire payloads.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("invalid keypair: {0}")]
    InvalidKeypair(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),
}
