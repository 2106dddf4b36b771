//! The JSON-RPC client: one HTTP connection handle, one typed method per
//! RPC call this client makes. All methods are strictly sequential awaits;
//! nothing here retries, batches, or fans out.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use log::{debug, warn};
use serde_json::{json, Value};

use crate::error::RpcError;
use crate::types::{
    AccountInfo, Commitment, ConfirmedTransaction, KeyedAccount, LatestBlockhash, RawAccount,
    RpcEnvelope, RpcFailure, RpcRequest, RpcResponse, SignatureInfo, SignatureStatus, VersionInfo,
};

/// Request timeout for every RPC round-trip.
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Confirmation polling bounds: attempts and delay between them.
const CONFIRM_MAX_ATTEMPTS: u32 = 30;
const CONFIRM_POLL_DELAY_MILLIS: u64 = 1_000;

/// A long-lived connection handle bound to one endpoint and one commitment
/// level.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    commitment: Commitment,
}

impl RpcClient {
    pub fn new(url: String, commitment: Commitment) -> Result<Self, RpcError> {
        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            url,
            commitment,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn commitment(&self) -> Commitment {
        self.commitment
    }

    /// One JSON-RPC round-trip. Node-reported errors come back as
    /// `RpcError::Node`.
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        debug!("rpc call {method}");
        let request = RpcRequest::new(method, params);

        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .json::<Value>()
            .await?;

        if let Ok(ok) = serde_json::from_value::<RpcResponse>(response.clone()) {
            Ok(ok.result)
        } else {
            let failure = serde_json::from_value::<RpcFailure>(response)?;
            Err(RpcError::Node {
                code: failure.error.code,
                message: failure.error.message,
            })
        }
    }

    /// Node software version. Diagnostic only; correctness never depends
    /// on it.
    pub async fn get_version(&self) -> Result<VersionInfo, RpcError> {
        let result = self.call("getVersion", json!([])).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Lamport balance of `address`.
    pub async fn get_balance(&self, address: &str) -> Result<u64, RpcError> {
        let params = json!([address, { "commitment": self.commitment.as_str() }]);
        let result = self.call("getBalance", params).await?;
        let envelope: RpcEnvelope<u64> = serde_json::from_value(result)?;
        Ok(envelope.value)
    }

    /// Account lookup; `None` when the account does not exist at the
    /// configured commitment.
    pub async fn get_account_info(&self, address: &str) -> Result<Option<AccountInfo>, RpcError> {
        let params = json!([address, {
            "commitment": self.commitment.as_str(),
            "encoding": "base64",
        }]);
        let result = self.call("getAccountInfo", params).await?;
        let envelope: RpcEnvelope<Option<RawAccount>> = serde_json::from_value(result)?;
        envelope.value.map(decode_account).transpose()
    }

    /// Minimum lamports for an account of `space` bytes to be rent exempt.
    pub async fn get_minimum_balance_for_rent_exemption(
        &self,
        space: u64,
    ) -> Result<u64, RpcError> {
        let result = self
            .call("getMinimumBalanceForRentExemption", json!([space]))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// A recent blockhash to pin a transaction to, decoded to raw bytes.
    pub async fn get_latest_blockhash(&self) -> Result<[u8; 32], RpcError> {
        let params = json!([{ "commitment": self.commitment.as_str() }]);
        let result = self.call("getLatestBlockhash", params).await?;
        let envelope: RpcEnvelope<LatestBlockhash> = serde_json::from_value(result)?;

        let bytes = bs58::decode(&envelope.value.blockhash)
            .into_vec()
            .map_err(|e| RpcError::Base58(format!("blockhash: {e}")))?;
        bytes
            .try_into()
            .map_err(|v: Vec<u8>| RpcError::Shape(format!("blockhash is {} bytes", v.len())))
    }

    /// Fee the node would charge for a serialized message, when it knows.
    pub async fn get_fee_for_message(&self, message: &[u8]) -> Result<Option<u64>, RpcError> {
        let params = json!([
            BASE64.encode(message),
            { "commitment": self.commitment.as_str() },
        ]);
        let result = self.call("getFeeForMessage", params).await?;
        let envelope: RpcEnvelope<Option<u64>> = serde_json::from_value(result)?;
        Ok(envelope.value)
    }

    /// Broadcast a signed wire-format transaction; returns its signature.
    pub async fn send_transaction(&self, wire: &[u8]) -> Result<String, RpcError> {
        let params = json!([
            BASE64.encode(wire),
            {
                "encoding": "base64",
                "preflightCommitment": self.commitment.as_str(),
            },
        ]);
        let result = self.call("sendTransaction", params).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Ask the faucet to credit `lamports` to `address`; returns the
    /// airdrop transaction signature.
    pub async fn request_airdrop(&self, address: &str, lamports: u64) -> Result<String, RpcError> {
        let result = self
            .call("requestAirdrop", json!([address, lamports]))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Block until `signature` reaches the configured commitment, polling
    /// `getSignatureStatuses`. Bounded by a fixed attempt count; an
    /// on-chain execution error fails the wait.
    pub async fn confirm_transaction(&self, signature: &str) -> Result<(), RpcError> {
        for attempt in 1..=CONFIRM_MAX_ATTEMPTS {
            let params = json!([[signature], { "searchTransactionHistory": false }]);
            let result = self.call("getSignatureStatuses", params).await?;
            let envelope: RpcEnvelope<Vec<Option<SignatureStatus>>> =
                serde_json::from_value(result)?;

            if let Some(Some(status)) = envelope.value.first() {
                if let Some(err) = &status.err {
                    return Err(RpcError::TransactionFailed {
                        signature: signature.to_string(),
                        detail: err.to_string(),
                    });
                }
                if matches!(
                    status.confirmation_status.as_deref(),
                    Some("confirmed") | Some("finalized")
                ) {
                    return Ok(());
                }
            }

            debug!("signature {signature} not yet confirmed (attempt {attempt})");
            tokio::time::sleep(std::time::Duration::from_millis(CONFIRM_POLL_DELAY_MILLIS))
                .await;
        }

        warn!("gave up waiting for confirmation of {signature}");
        Err(RpcError::ConfirmationTimeout(signature.to_string()))
    }

    /// All accounts currently owned by `program`, with their raw data.
    /// Order and completeness are whatever the node returns.
    pub async fn get_program_accounts(
        &self,
        program: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, RpcError> {
        let params = json!([program, {
            "commitment": self.commitment.as_str(),
            "encoding": "base64",
        }]);
        let result = self.call("getProgramAccounts", params).await?;
        let keyed: Vec<KeyedAccount> = serde_json::from_value(result)?;

        keyed
            .into_iter()
            .map(|ka| Ok((ka.pubkey, decode_account(ka.account)?.data)))
            .collect()
    }

    /// Confirmed signatures for `address`, newest first, with optional
    /// pagination cursors.
    pub async fn get_signatures_for_address(
        &self,
        address: &str,
        limit: Option<usize>,
        before: Option<&str>,
        until: Option<&str>,
    ) -> Result<Vec<SignatureInfo>, RpcError> {
        let mut options = serde_json::Map::new();
        options.insert(
            "commitment".into(),
            Value::String(self.commitment.as_str().into()),
        );
        if let Some(limit) = limit {
            options.insert("limit".into(), json!(limit));
        }
        if let Some(before) = before {
            options.insert("before".into(), Value::String(before.into()));
        }
        if let Some(until) = until {
            options.insert("until".into(), Value::String(until.into()));
        }

        let result = self
            .call("getSignaturesForAddress", json!([address, options]))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Full transaction record for a confirmed signature; `None` when the
    /// node no longer has it.
    pub async fn get_transaction(
        &self,
        signature: &str,
    ) -> Result<Option<ConfirmedTransaction>, RpcError> {
        let params = json!([signature, {
            "commitment": self.commitment.as_str(),
            "encoding": "base64",
            "maxSupportedTransactionVersion": 0,
        }]);
        let result = self.call("getTransaction", params).await?;
        Ok(serde_json::from_value(result)?)
    }
}

fn decode_account(raw: RawAccount) -> Result<AccountInfo, RpcError> {
    let data = BASE64
        .decode(raw.data.0.as_bytes())
        .map_err(|e| RpcError::Base64(format!("account data: {e}")))?;
    Ok(AccountInfo {
        lamports: raw.lamports,
        owner: raw.owner,
        executable: raw.executable,
        data,
    })
}
