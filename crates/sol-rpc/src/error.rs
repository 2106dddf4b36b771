use thiserror::Error;

/// Errors surfaced by the RPC client.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node error {code}: {message}")]
    Node { code: i64, message: String },

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("invalid base58 payload: {0}")]
    Base58(String),

    #[error("invalid base64 payload: {0}")]
    Base64(String),

    #[error("transaction {signature} failed on-chain: {detail}")]
    TransactionFailed { signature: String, detail: String },

    #[error("transaction {0} was not confirmed in time")]
    ConfirmationTimeout(String),
}
