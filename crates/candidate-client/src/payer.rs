//! Funding checks for the payer identity.

use log::{debug, info};
use sol_wire::transaction::{compile_transaction, serialize_message};

use crate::context::ClientContext;
use crate::error::ClientError;
use crate::ledger::LedgerRpc;
use crate::record::record_space;

/// The network-wide base fee rate, used when the node declines to quote one.
pub const DEFAULT_LAMPORTS_PER_SIGNATURE: u64 = 5_000;

/// Multiplier on the per-signature rate when budgeting fees. Deliberately a
/// large over-estimate so one funding pass covers the whole run.
pub const FEE_SAFETY_MULTIPLIER: u64 = 100;

/// Ensure the payer holds enough lamports for the record account's rent
/// exemption plus a conservative fee budget. Requests at most one faucet
/// credit for the shortfall, waits for it to confirm, and re-queries the
/// balance. Returns the final balance.
pub async fn establish_payer<R: LedgerRpc>(ctx: &ClientContext<R>) -> Result<u64, ClientError> {
    let space = record_space()?;
    let rent = ctx
        .rpc
        .get_minimum_balance_for_rent_exemption(space)
        .await
        .map_err(|e| ClientError::Funding(format!("rent exemption query failed: {e}")))?;

    let fee_rate = probe_fee_rate(ctx).await;
    let required = rent + fee_rate * FEE_SAFETY_MULTIPLIER;

    let address = ctx.payer.address();
    let balance = ctx
        .rpc
        .get_balance(&address)
        .await
        .map_err(|e| ClientError::Funding(format!("balance query failed: {e}")))?;

    if balance >= required {
        info!("payer {address} holds {balance} lamports, {required} required, no top-up");
        return Ok(balance);
    }

    let shortfall = required - balance;
    info!("payer {address} is short {shortfall} lamports, requesting airdrop");

    let signature = ctx
        .rpc
        .request_airdrop(&address, shortfall)
        .await
        .map_err(|e| ClientError::Funding(format!("airdrop request failed: {e}")))?;
    ctx.rpc
        .confirm_transaction(&signature)
        .await
        .map_err(|e| ClientError::Funding(format!("airdrop confirmation failed: {e}")))?;

    let balance = ctx
        .rpc
        .get_balance(&address)
        .await
        .map_err(|e| ClientError::Funding(format!("balance re-query failed: {e}")))?;
    info!("payer {address} now holds {balance} lamports");
    Ok(balance)
}

/// Ask the node what a single-signature message costs. Any failure falls
/// back to the well-known default rate; the budget is an over-estimate
/// either way.
async fn probe_fee_rate<R: LedgerRpc>(ctx: &ClientContext<R>) -> u64 {
    let blockhash = match ctx.rpc.get_latest_blockhash().await {
        Ok(blockhash) => blockhash,
        Err(e) => {
            debug!("fee probe: blockhash query failed ({e}), using default rate");
            return DEFAULT_LAMPORTS_PER_SIGNATURE;
        }
    };

    let Ok(probe) = compile_transaction(&[], &ctx.payer.pubkey(), &blockhash) else {
        return DEFAULT_LAMPORTS_PER_SIGNATURE;
    };

    match ctx.rpc.get_fee_for_message(&serialize_message(&probe)).await {
        Ok(Some(fee)) => fee,
        Ok(None) => DEFAULT_LAMPORTS_PER_SIGNATURE,
        Err(e) => {
            debug!("fee probe failed ({e}), using default rate");
            DEFAULT_LAMPORTS_PER_SIGNATURE
        }
    }
}
