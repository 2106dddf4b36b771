//! Submitting a record to the program.

use log::info;
use sol_wire::{build_record_write, compile_transaction, sign_transaction};

use crate::context::ClientContext;
use crate::error::ClientError;
use crate::ledger::LedgerRpc;
use crate::record::CandidateRecord;

/// Serialize `record` and submit it as instruction data addressed to the
/// record account (writable, not a signer), signed by the payer. Waits for
/// confirmation; either the whole transaction confirms or this fails.
/// Returns the transaction signature.
pub async fn write_record<R: LedgerRpc>(
    ctx: &ClientContext<R>,
    program_id: &[u8; 32],
    record_account: &[u8; 32],
    record: &CandidateRecord,
) -> Result<String, ClientError> {
    let data = borsh::to_vec(record).map_err(|e| ClientError::Write(format!("encode: {e}")))?;
    let instruction = build_record_write(program_id, record_account, data);

    let payer_pubkey = ctx.payer.pubkey();
    let blockhash = ctx
        .rpc
        .get_latest_blockhash()
        .await
        .map_err(|e| ClientError::Write(format!("blockhash query failed: {e}")))?;

    let tx = compile_transaction(&[instruction], &payer_pubkey, &blockhash)
        .map_err(|e| ClientError::Write(e.to_string()))?;
    let wire = sign_transaction(&tx, &ctx.payer).map_err(|e| ClientError::Write(e.to_string()))?;

    let signature = ctx
        .rpc
        .send_transaction(&wire)
        .await
        .map_err(|e| ClientError::Write(format!("broadcast failed: {e}")))?;
    ctx.rpc
        .confirm_transaction(&signature)
        .await
        .map_err(|e| ClientError::Write(format!("confirmation failed: {e}")))?;

    info!("record written in transaction {signature}");
    Ok(signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::decode_record;
    use crate::testing::{test_context, MockLedger};

    fn sample_record() -> CandidateRecord {
        CandidateRecord {
            age: 41,
            experience: 12,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            qualification: "Compiler author".into(),
            timestamp: 1_699_999_999,
        }
    }

    #[tokio::test]
    async fn write_broadcasts_one_signed_transaction() {
        let ctx = test_context(MockLedger::default());
        let program_id = [0xEEu8; 32];
        let account = [0xDDu8; 32];

        let signature = write_record(&ctx, &program_id, &account, &sample_record())
            .await
            .unwrap();

        assert!(!signature.is_empty());
        assert_eq!(ctx.rpc.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn instruction_data_is_the_borsh_record() {
        let ctx = test_context(MockLedger::default());
        let program_id = [0xEEu8; 32];
        let account = [0xDDu8; 32];
        let record = sample_record();

        write_record(&ctx, &program_id, &account, &record)
            .await
            .unwrap();

        // The instruction data sits at the tail of the wire bytes; the
        // borsh record must decode back from it.
        let sent = ctx.rpc.sent.lock().unwrap();
        let encoded = borsh::to_vec(&record).unwrap();
        let wire = &sent[0];
        let tail = &wire[wire.len() - encoded.len()..];
        assert_eq!(decode_record(tail).unwrap(), record);
    }
}
