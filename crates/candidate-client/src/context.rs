//! The immutable context every component receives by reference.
//!
//! Built eagerly by the entry point before any component runs; there is no
//! lazy initialization and no process-wide mutable state, so concurrent
//! callers (the test suite included) cannot race on first use.

use sol_wire::Keypair;

use crate::config::Config;
use crate::ledger::LedgerRpc;

pub struct ClientContext<R> {
    pub rpc: R,
    pub payer: Keypair,
    pub config: Config,
}

impl<R: LedgerRpc> ClientContext<R> {
    pub fn new(rpc: R, payer: Keypair, config: Config) -> Self {
        Self { rpc, payer, config }
    }
}
