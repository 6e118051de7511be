//! Mock implementations for testing.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::{Value, json};

use crate::domain::{
    AccountSnapshot, AffectedNode, AppError, DatabaseError, ExternalServiceError, FaucetClient,
    FundedAccount, LedgerError, LedgerGateway, LedgerStore, TransactionRecord,
};

/// Address returned by [`MockLedgerGateway::derive_account`] unless overridden.
pub const MOCK_DERIVED_ADDRESS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

/// Configuration for mock behavior
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub should_fail: bool,
    pub error_message: Option<String>,
}

impl MockConfig {
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }
}

/// Mock ledger gateway driven by a scripted response queue.
///
/// Every `request` and `submit` call pops the next queued response and
/// records the call, so tests can assert both what was sent to the node
/// and that nothing was sent at all (validation short-circuits).
pub struct MockLedgerGateway {
    responses: Mutex<VecDeque<Result<Value, AppError>>>,
    calls: Mutex<Vec<(String, Value)>>,
    derived_address: String,
    config: MockConfig,
    is_healthy: AtomicBool,
}

impl MockLedgerGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            derived_address: MOCK_DERIVED_ADDRESS.to_string(),
            config,
            is_healthy: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    #[must_use]
    pub fn with_derived_address(mut self, address: impl Into<String>) -> Self {
        self.derived_address = address.into();
        self
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    /// Queue the next response for `request` or `submit`
    pub fn push_response(&self, response: Result<Value, AppError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Queue a successful submit envelope with the given engine result
    pub fn push_submit_result(&self, transaction_type: &str, engine_result: &str, hash: &str) {
        self.push_response(Ok(json!({
            "engine_result": engine_result,
            "engine_result_message": "Mock engine result message.",
            "tx_json": {
                "TransactionType": transaction_type,
                "Account": MOCK_DERIVED_ADDRESS,
                "hash": hash,
            },
        })));
    }

    /// All recorded `(method, params)` pairs, submits included
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn check_should_fail(&self) -> Result<(), AppError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock error".to_string());
            return Err(AppError::Ledger(LedgerError::Connection(msg)));
        }
        Ok(())
    }

    fn pop_response(&self, method: &str, params: Value) -> Result<Value, AppError> {
        self.calls.lock().unwrap().push((method.to_string(), params));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(AppError::Ledger(LedgerError::MalformedResponse(format!(
                    "no scripted response for '{method}'"
                ))))
            })
    }
}

impl Default for MockLedgerGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerGateway for MockLedgerGateway {
    async fn health_check(&self) -> Result<(), AppError> {
        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(AppError::Ledger(LedgerError::Connection(
                "Unhealthy".to_string(),
            )));
        }
        self.check_should_fail()
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, AppError> {
        self.check_should_fail()?;
        self.pop_response(method, params)
    }

    async fn submit(&self, _seed: &SecretString, tx_json: Value) -> Result<Value, AppError> {
        self.check_should_fail()?;
        self.pop_response("submit", tx_json)
    }

    async fn derive_account(&self, _seed: &SecretString) -> Result<String, AppError> {
        self.check_should_fail()?;
        Ok(self.derived_address.clone())
    }
}

/// Mock faucet returning a fixed funded account.
pub struct MockFaucetClient {
    account: FundedAccount,
    config: MockConfig,
}

impl MockFaucetClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            account: FundedAccount {
                address: "rNewlyFundedAccount111111111111111".to_string(),
                seed: "sEdMockSeedForTestingOnly".to_string(),
                balance_drops: Some(10_000_000),
            },
            config: MockConfig::success(),
        }
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            config: MockConfig::failure(message),
            ..Self::new()
        }
    }
}

impl Default for MockFaucetClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FaucetClient for MockFaucetClient {
    async fn fund_new_account(&self) -> Result<FundedAccount, AppError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock error".to_string());
            return Err(AppError::ExternalService(ExternalServiceError::Unavailable(
                msg,
            )));
        }
        Ok(self.account.clone())
    }
}

/// Mock in-memory ledger store.
pub struct MockLedgerStore {
    snapshots: Arc<Mutex<HashMap<String, AccountSnapshot>>>,
    transactions: Arc<Mutex<HashMap<String, (TransactionRecord, Vec<AffectedNode>)>>>,
    config: MockConfig,
    is_healthy: AtomicBool,
}

impl MockLedgerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            snapshots: Arc::new(Mutex::new(HashMap::new())),
            transactions: Arc::new(Mutex::new(HashMap::new())),
            config,
            is_healthy: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    /// All stored snapshots (for testing)
    pub fn snapshots(&self) -> Vec<AccountSnapshot> {
        self.snapshots.lock().unwrap().values().cloned().collect()
    }

    /// All stored transactions with their node counts (for testing)
    pub fn stored_transactions(&self) -> Vec<(TransactionRecord, usize)> {
        self.transactions
            .lock()
            .unwrap()
            .values()
            .map(|(record, nodes)| (record.clone(), nodes.len()))
            .collect()
    }

    fn check_should_fail(&self) -> Result<(), AppError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock error".to_string());
            return Err(AppError::Database(DatabaseError::Query(msg)));
        }
        Ok(())
    }
}

impl Default for MockLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for MockLedgerStore {
    async fn health_check(&self) -> Result<(), AppError> {
        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(AppError::Database(DatabaseError::Connection(
                "Unhealthy".to_string(),
            )));
        }
        self.check_should_fail()
    }

    async fn save_account_snapshot(&self, snapshot: &AccountSnapshot) -> Result<(), AppError> {
        self.check_should_fail()?;
        self.snapshots
            .lock()
            .unwrap()
            .insert(snapshot.address.clone(), snapshot.clone());
        Ok(())
    }

    async fn get_account_snapshot(
        &self,
        address: &str,
    ) -> Result<Option<AccountSnapshot>, AppError> {
        self.check_should_fail()?;
        Ok(self.snapshots.lock().unwrap().get(address).cloned())
    }

    async fn upsert_transaction(
        &self,
        record: &TransactionRecord,
        nodes: &[AffectedNode],
    ) -> Result<(), AppError> {
        self.check_should_fail()?;
        self.transactions
            .lock()
            .unwrap()
            .insert(record.hash.clone(), (record.clone(), nodes.to_vec()));
        Ok(())
    }

    async fn get_transaction(
        &self,
        hash: &str,
    ) -> Result<Option<(TransactionRecord, Vec<AffectedNode>)>, AppError> {
        self.check_should_fail()?;
        Ok(self.transactions.lock().unwrap().get(hash).cloned())
    }

    async fn list_transactions_for_account(
        &self,
        account: &str,
        limit: i64,
    ) -> Result<Vec<TransactionRecord>, AppError> {
        self.check_should_fail()?;
        let transactions = self.transactions.lock().unwrap();
        let mut records: Vec<TransactionRecord> = transactions
            .values()
            .filter(|(record, _)| record.account == account)
            .map(|(record, _)| record.clone())
            .collect();
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(records.into_iter().take(limit.clamp(1, 100) as usize).collect())
    }
}
