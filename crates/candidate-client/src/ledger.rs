//! The seam between orchestration and the RPC collaborator.
//!
//! Every component talks to the ledger through this trait instead of the
//! concrete client, so the funding, creation, and reconciliation logic can
//! be exercised against an in-memory ledger in tests.

use sol_rpc::{AccountInfo, ConfirmedTransaction, RpcClient, RpcError, SignatureInfo};

/// Pagination for the confirmed-signature listing (newest first, as the
/// ledger defines it).
#[derive(Debug, Clone, Default)]
pub struct HistoryOptions {
    pub limit: Option<usize>,
    pub before: Option<String>,
    pub until: Option<String>,
}

/// The RPC call surface the client depends on. Implemented by
/// `sol_rpc::RpcClient` and by the mock ledger in tests.
#[allow(async_fn_in_trait)]
pub trait LedgerRpc {
    async fn get_balance(&self, address: &str) -> Result<u64, RpcError>;

    async fn get_account_info(&self, address: &str) -> Result<Option<AccountInfo>, RpcError>;

    async fn get_minimum_balance_for_rent_exemption(&self, space: u64) -> Result<u64, RpcError>;

    async fn get_latest_blockhash(&self) -> Result<[u8; 32], RpcError>;

    async fn get_fee_for_message(&self, message: &[u8]) -> Result<Option<u64>, RpcError>;

    async fn send_transaction(&self, wire: &[u8]) -> Result<String, RpcError>;

    async fn request_airdrop(&self, address: &str, lamports: u64) -> Result<String, RpcError>;

    async fn confirm_transaction(&self, signature: &str) -> Result<(), RpcError>;

    async fn get_program_accounts(&self, program: &str)
        -> Result<Vec<(String, Vec<u8>)>, RpcError>;

    async fn get_signatures_for_address(
        &self,
        address: &str,
        options: &HistoryOptions,
    ) -> Result<Vec<SignatureInfo>, RpcError>;

    async fn get_transaction(
        &self,
        signature: &str,
    ) -> Result<Option<ConfirmedTransaction>, RpcError>;
}

impl LedgerRpc for RpcClient {
    async fn get_balance(&self, address: &str) -> Result<u64, RpcError> {
        RpcClient::get_balance(self, address).await
    }

    async fn get_account_info(&self, address: &str) -> Result<Option<AccountInfo>, RpcError> {
        RpcClient::get_account_info(self, address).await
    }

    async fn get_minimum_balance_for_rent_exemption(&self, space: u64) -> Result<u64, RpcError> {
        RpcClient::get_minimum_balance_for_rent_exemption(self, space).await
    }

    async fn get_latest_blockhash(&self) -> Result<[u8; 32], RpcError> {
        RpcClient::get_latest_blockhash(self).await
    }

    async fn get_fee_for_message(&self, message: &[u8]) -> Result<Option<u64>, RpcError> {
        RpcClient::get_fee_for_message(self, message).await
    }

    async fn send_transaction(&self, wire: &[u8]) -> Result<String, RpcError> {
        RpcClient::send_transaction(self, wire).await
    }

    async fn request_airdrop(&self, address: &str, lamports: u64) -> Result<String, RpcError> {
        RpcClient::request_airdrop(self, address, lamports).await
    }

    async fn confirm_transaction(&self, signature: &str) -> Result<(), RpcError> {
        RpcClient::confirm_transaction(self, signature).await
    }

    async fn get_program_accounts(
        &self,
        program: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, RpcError> {
        RpcClient::get_program_accounts(self, program).await
    }

    async fn get_signatures_for_address(
        &self,
        address: &str,
        options: &HistoryOptions,
    ) -> Result<Vec<SignatureInfo>, RpcError> {
        RpcClient::get_signatures_for_address(
            self,
            address,
            options.limit,
            options.before.as_deref(),
            options.until.as_deref(),
        )
        .await
    }

    async fn get_transaction(
        &self,
        signature: &str,
    ) -> Result<Option<ConfirmedTransaction>, RpcError> {
        RpcClient::get_transaction(self, signature).await
    }
}
