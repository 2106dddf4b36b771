//! Async JSON-RPC client for the Solana HTTP API.
//!
//! One `reqwest` client, one typed wrapper per RPC method the candidate
//! client uses. No retries, no batching; every call is a single sequential
//! round-trip, and confirmation is a bounded polling loop.

pub mod client;
pub mod error;
pub mod types;

pub use client::RpcClient;
pub use error::RpcError;
pub use types::{
    AccountInfo, Commitment, ConfirmedTransaction, SignatureInfo, SignatureStatus,
    TransactionMeta, VersionInfo,
};
