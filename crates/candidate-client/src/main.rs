use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context as _, Result};
use candidate_client::{Args, CandidateRecord, ClientContext, ClientError, Config};
use clap::Parser;
use log::{info, warn};
use sol_rpc::{Commitment, RpcClient};
use sol_wire::Keypair;
use tokio::runtime::Builder;

pub const NUM_THREADS: usize = 2;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::init();

    let runtime = Builder::new_multi_thread()
        .worker_threads(NUM_THREADS)
        .enable_all()
        .build()
        .context("failed to build the async runtime")?;

    runtime.block_on(async move {
        let config = Config::resolve(&args)?;

        let rpc = RpcClient::new(config.rpc_url.clone(), Commitment::Confirmed)
            .map_err(|e| ClientError::Configuration(format!("rpc client: {e}")))?;

        // Liveness probe, diagnostic only.
        match rpc.get_version().await {
            Ok(version) => info!(
                "connected to {} (solana-core {})",
                config.rpc_url, version.solana_core
            ),
            Err(e) => warn!("version query against {} failed: {e}", config.rpc_url),
        }

        let payer = Keypair::from_file(&config.payer_keypair)
            .map_err(|e| ClientError::Funding(format!("funding keypair: {e}")))?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let record = CandidateRecord {
            age: args.age,
            experience: args.experience,
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            qualification: args.qualification.clone(),
            timestamp,
        };

        let ctx = ClientContext::new(rpc, payer, config);
        candidate_client::run(&ctx, record).await
    })
}
