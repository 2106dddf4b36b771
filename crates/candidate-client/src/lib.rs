//! Thin client for the on-chain candidate-record program.
//!
//! The pipeline is strictly sequential: open a connection, make sure the
//! payer is funded, verify the program is deployed, resolve (and if needed
//! create) the seed-derived record account, write one record, then read
//! back every program-owned record and the account's transaction history.
//! Any failure aborts the remaining steps.

pub mod config;
pub mod context;
pub mod error;
pub mod ledger;
pub mod payer;
pub mod program;
pub mod reader;
pub mod record;
pub mod writer;

use log::info;
use sol_wire::bytes_to_address;

pub use config::{Args, Config};
pub use context::ClientContext;
pub use error::ClientError;
pub use ledger::{HistoryOptions, LedgerRpc};
pub use reader::{FetchPolicy, HistoryEntry};
pub use record::CandidateRecord;

/// Run the whole client sequence against an eagerly built context.
pub async fn run<R: LedgerRpc>(
    ctx: &ClientContext<R>,
    record: CandidateRecord,
) -> anyhow::Result<()> {
    let balance = payer::establish_payer(ctx).await?;
    info!("payer {} funded with {balance} lamports", ctx.payer.address());

    let program_id = program::check_program(ctx).await?;
    let seed = program::select_seed(ctx.config.seed.as_deref());
    let account = program::resolve_record_account(ctx, &program_id, &seed).await?;
    let record_address = bytes_to_address(&account.address);

    let signature = writer::write_record(ctx, &program_id, &account.address, &record).await?;
    println!("wrote record for {} {} in {signature}", record.first_name, record.last_name);

    let records = reader::read_records(ctx, &program_id, FetchPolicy::BestEffort).await?;
    println!("{} candidate record(s) on-chain:", records.len());
    for (pubkey, record) in &records {
        println!(
            "  {pubkey}: {} {}, age {}, {} year(s) experience, {}",
            record.first_name,
            record.last_name,
            record.age,
            record.experience,
            record.qualification,
        );
    }

    let policy = if ctx.config.best_effort {
        FetchPolicy::BestEffort
    } else {
        FetchPolicy::FailFast
    };
    let options = HistoryOptions {
        limit: Some(ctx.config.history_limit),
        ..Default::default()
    };
    let history = reader::fetch_history(ctx, &record_address, &options, policy).await?;
    println!("{} history entries for {record_address}:", history.len());
    for entry in &history {
        println!(
            "  {} fee={} amount={}",
            entry.signature, entry.fee, entry.amount
        );
    }

    Ok(())
}
