//! The read paths: program-account enumeration and transaction-history
//! reconciliation.
//!
//! Both paths share one per-item failure policy, chosen by the caller:
//! best-effort (skip the item, log, keep going) or fail-fast (abort the
//! whole walk on the first collaborator error). A transaction that exists
//! but carries no usable metadata is skipped under either policy; a single
//! missing record must not abort reconciliation of the rest.

use log::warn;
use sol_rpc::ConfirmedTransaction;
use sol_wire::bytes_to_address;

use crate::context::ClientContext;
use crate::error::ClientError;
use crate::ledger::{HistoryOptions, LedgerRpc};
use crate::record::{decode_record, CandidateRecord};

/// Per-item failure handling for the read paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Skip the failing item, log a warning, continue.
    BestEffort,
    /// Abort the whole walk on the first collaborator failure.
    FailFast,
}

/// One reconciled history entry. `amount` is the lamport delta of the
/// first account slot (the transaction's primary subject by convention):
/// positive when it paid out, negative when it was credited.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub signature: String,
    pub fee: u64,
    pub amount: i64,
    pub transaction: ConfirmedTransaction,
}

/// Enumerate all accounts owned by the program and decode each one's bytes
/// into a record. Order and completeness are whatever the ledger returned.
pub async fn read_records<R: LedgerRpc>(
    ctx: &ClientContext<R>,
    program_id: &[u8; 32],
    policy: FetchPolicy,
) -> Result<Vec<(String, CandidateRecord)>, ClientError> {
    let program_address = bytes_to_address(program_id);
    let accounts = ctx
        .rpc
        .get_program_accounts(&program_address)
        .await
        .map_err(|e| ClientError::Rpc(e.to_string()))?;

    let mut records = Vec::with_capacity(accounts.len());
    for (pubkey, data) in accounts {
        match decode_record(&data) {
            Ok(record) => records.push((pubkey, record)),
            Err(e) => match policy {
                FetchPolicy::BestEffort => {
                    warn!("skipping account {pubkey}: undecodable record: {e}");
                }
                FetchPolicy::FailFast => {
                    return Err(ClientError::Reconciliation(format!(
                        "account {pubkey}: undecodable record: {e}"
                    )));
                }
            },
        }
    }
    Ok(records)
}

/// Walk the confirmed signatures for `address` (newest first) and fetch
/// each transaction sequentially, computing the balance delta per entry.
/// No batching, no retries; the only bound is the caller's `limit`.
pub async fn fetch_history<R: LedgerRpc>(
    ctx: &ClientContext<R>,
    address: &str,
    options: &HistoryOptions,
    policy: FetchPolicy,
) -> Result<Vec<HistoryEntry>, ClientError> {
    let signatures = ctx
        .rpc
        .get_signatures_for_address(address, options)
        .await
        .map_err(|e| ClientError::Reconciliation(format!("signature listing failed: {e}")))?;

    let mut entries = Vec::with_capacity(signatures.len());
    for info in signatures {
        let fetched = match ctx.rpc.get_transaction(&info.signature).await {
            Ok(fetched) => fetched,
            Err(e) => match policy {
                FetchPolicy::BestEffort => {
                    warn!("skipping {}: fetch failed: {e}", info.signature);
                    continue;
                }
                FetchPolicy::FailFast => {
                    return Err(ClientError::Reconciliation(format!(
                        "transaction {}: {e}",
                        info.signature
                    )));
                }
            },
        };

        let Some(transaction) = fetched else {
            warn!("transaction {} not found, skipping", info.signature);
            continue;
        };
        let Some(meta) = transaction.meta.as_ref() else {
            warn!("transaction {} has no metadata, skipping", info.signature);
            continue;
        };
        let (Some(pre), Some(post)) = (meta.pre_balances.first(), meta.post_balances.first())
        else {
            warn!(
                "transaction {} has empty balance snapshots, skipping",
                info.signature
            );
            continue;
        };

        let fee = meta.fee;
        let amount = *pre as i64 - *post as i64;
        entries.push(HistoryEntry {
            signature: info.signature,
            fee,
            amount,
            transaction,
        });
    }
    Ok(entries)
}
