//! Typed JSON-RPC request/response shapes for the Solana RPC surface this
//! client uses. Field names follow the node's camelCase convention.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Commitment level attached to every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

impl RpcRequest {
    pub fn new(method: &str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method: method.to_string(),
            params,
        }
    }
}

/// Successful JSON-RPC 2.0 response.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Value,
}

/// Failed JSON-RPC 2.0 response.
#[derive(Debug, Deserialize)]
pub struct RpcFailure {
    pub error: NodeError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeError {
    pub code: i64,
    pub message: String,
}

/// The `{context, value}` wrapper many account/balance methods use.
#[derive(Debug, Deserialize)]
pub struct RpcEnvelope<T> {
    pub value: T,
}

/// Node version, from `getVersion`. Diagnostic only.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "solana-core")]
    pub solana_core: String,
}

/// Raw account payload as the node returns it: data is a
/// `[base64, "base64"]` pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccount {
    pub lamports: u64,
    pub owner: String,
    pub executable: bool,
    pub data: (String, String),
}

/// A decoded account: same fields with the data already base64-decoded.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    pub lamports: u64,
    pub owner: String,
    pub executable: bool,
    pub data: Vec<u8>,
}

/// One element of a `getProgramAccounts` response.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyedAccount {
    pub pubkey: String,
    pub account: RawAccount,
}

/// `getLatestBlockhash` value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    pub blockhash: String,
    pub last_valid_block_height: u64,
}

/// One confirmed signature from `getSignaturesForAddress` (newest first).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureInfo {
    pub signature: String,
    pub slot: u64,
    pub err: Option<Value>,
    pub memo: Option<String>,
    pub block_time: Option<i64>,
}

/// Signature status, from `getSignatureStatuses`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub confirmation_status: Option<String>,
    pub err: Option<Value>,
}

/// Execution metadata attached to a confirmed transaction. `preBalances`
/// and `postBalances` are aligned by account index.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    pub fee: u64,
    pub pre_balances: Vec<u64>,
    pub post_balances: Vec<u64>,
    pub err: Option<Value>,
}

/// A confirmed transaction record, from `getTransaction`. The transaction
/// payload itself is kept opaque; this client only reads the metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedTransaction {
    pub slot: u64,
    pub meta: Option<TransactionMeta>,
    pub block_time: Option<i64>,
    pub transaction: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_strings() {
        assert_eq!(Commitment::Processed.as_str(), "processed");
        assert_eq!(Commitment::Confirmed.as_str(), "confirmed");
        assert_eq!(Commitment::Finalized.as_str(), "finalized");
    }

    #[test]
    fn request_serializes_with_version_2_0() {
        let req = RpcRequest::new("getBalance", serde_json::json!(["addr"]));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "getBalance");
        assert_eq!(json["params"][0], "addr");
    }

    #[test]
    fn raw_account_deserializes() {
        let json = serde_json::json!({
            "lamports": 1000,
            "owner": "11111111111111111111111111111111",
            "executable": false,
            "data": ["aGVsbG8=", "base64"],
            "rentEpoch": 361
        });
        let account: RawAccount = serde_json::from_value(json).unwrap();
        assert_eq!(account.lamports, 1000);
        assert!(!account.executable);
        assert_eq!(account.data.0, "aGVsbG8=");
    }

    #[test]
    fn envelope_ignores_context() {
        let json = serde_json::json!({
            "context": { "slot": 123 },
            "value": 42u64
        });
        let env: RpcEnvelope<u64> = serde_json::from_value(json).unwrap();
        assert_eq!(env.value, 42);
    }

    #[test]
    fn signature_info_deserializes() {
        let json = serde_json::json!({
            "signature": "5igK",
            "slot": 99,
            "err": null,
            "memo": null,
            "blockTime": 1700000000
        });
        let info: SignatureInfo = serde_json::from_value(json).unwrap();
        assert_eq!(info.signature, "5igK");
        assert_eq!(info.block_time, Some(1700000000));
        assert!(info.err.is_none());
    }

    #[test]
    fn transaction_meta_balances_align() {
        let json = serde_json::json!({
            "fee": 5000,
            "preBalances": [100, 200],
            "postBalances": [90, 210],
            "err": null
        });
        let meta: TransactionMeta = serde_json::from_value(json).unwrap();
        assert_eq!(meta.pre_balances.len(), meta.post_balances.len());
        assert_eq!(meta.fee, 5000);
    }

    #[test]
    fn confirmed_transaction_tolerates_missing_meta() {
        let json = serde_json::json!({
            "slot": 7,
            "meta": null,
            "blockTime": null,
            "transaction": ["AAEC", "base64"]
        });
        let tx: ConfirmedTransaction = serde_json::from_value(json).unwrap();
        assert!(tx.meta.is_none());
    }

    #[test]
    fn version_info_deserializes() {
        let json = serde_json::json!({ "solana-core": "1.18.26", "feature-set": 3241752014u64 });
        let version: VersionInfo = serde_json::from_value(json).unwrap();
        assert_eq!(version.solana_core, "1.18.26");
    }
}
