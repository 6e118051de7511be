//! Domain traits defining contracts for external systems.

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::Value;

use super::error::AppError;
use super::types::{AccountSnapshot, AffectedNode, FundedAccount, TransactionRecord};

/// Gateway to the ledger node's JSON-RPC endpoint.
///
/// The node does all signing: `submit` hands the seed to the node's
/// sign-and-submit mode, so no key material is ever derived in-process.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Check node connectivity
    async fn health_check(&self) -> Result<(), AppError>;

    /// Issue a read-only JSON-RPC call and return the unwrapped `result`
    async fn request(&self, method: &str, params: Value) -> Result<Value, AppError>;

    /// Sign and submit a transaction via the node, returning the submit
    /// result envelope. The engine result is NOT classified here.
    async fn submit(&self, seed: &SecretString, tx_json: Value) -> Result<Value, AppError>;

    /// Derive the classic address controlled by a seed, again on the
    /// node's side (`wallet_propose`), so key derivation stays external.
    async fn derive_account(&self, seed: &SecretString) -> Result<String, AppError>;
}

/// Client for a test-network faucet that creates and funds accounts.
#[async_trait]
pub trait FaucetClient: Send + Sync {
    /// Ask the faucet for a new funded account
    async fn fund_new_account(&self) -> Result<FundedAccount, AppError>;
}

/// Store for ledger bookkeeping rows.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Check database connectivity
    async fn health_check(&self) -> Result<(), AppError>;

    /// Insert or replace the snapshot for an address
    async fn save_account_snapshot(&self, snapshot: &AccountSnapshot) -> Result<(), AppError>;

    /// Get the stored snapshot for an address
    async fn get_account_snapshot(&self, address: &str)
    -> Result<Option<AccountSnapshot>, AppError>;

    /// Upsert a transaction record by hash together with its affected
    /// nodes. Children are replaced wholesale in the same database
    /// transaction as the parent.
    async fn upsert_transaction(
        &self,
        record: &TransactionRecord,
        nodes: &[AffectedNode],
    ) -> Result<(), AppError>;

    /// Get a stored transaction record with its affected nodes
    async fn get_transaction(
        &self,
        hash: &str,
    ) -> Result<Option<(TransactionRecord, Vec<AffectedNode>)>, AppError>;

    /// List stored transaction records for an account, newest first
    async fn list_transactions_for_account(
        &self,
        account: &str,
        limit: i64,
    ) -> Result<Vec<TransactionRecord>, AppError> {
        let _ = (account, limit);
        Err(AppError::NotSupported(
            "list_transactions_for_account not implemented".to_string(),
        ))
    }
}
