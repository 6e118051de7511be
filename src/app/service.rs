//! Application service layer: account, payment and transaction flows.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::{Value, json};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::config::LedgerConfig;
use crate::domain::error::{AppError, LedgerError, ValidationError};
use crate::domain::traits::{FaucetClient, LedgerGateway, LedgerStore};
use crate::domain::types::{
    AccountDeleteRequest, AccountInfoResponse, AccountSettingsRequest, AccountSnapshot,
    BlackholeRequest, CrossCurrencyPaymentRequest, FundedAccount, HealthResponse, HealthStatus,
    SubmitResponse, TransactionRecord, TransactionResponse, TrustLineRequest, TrustLineResponse,
    XrpPaymentRequest,
};
use crate::domain::{engine_result, validation};

use super::retry::with_transport_retry;

/// asf flag that permanently disables the master key.
const ASF_DISABLE_MASTER: u32 = 4;

/// Application service containing business logic
pub struct AppService {
    pub(crate) gateway: Arc<dyn LedgerGateway>,
    pub(crate) faucet: Arc<dyn FaucetClient>,
    pub(crate) store: Arc<dyn LedgerStore>,
    pub(crate) config: LedgerConfig,
}

/// Uppercase hex, the encoding rippled expects for string-valued fields
/// like `Domain`, `URI` and `DIDDocument`.
pub(crate) fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

impl AppService {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        faucet: Arc<dyn FaucetClient>,
        store: Arc<dyn LedgerStore>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            gateway,
            faucet,
            store,
            config,
        }
    }

    /// Derive the signing account, fill in the shared fields, submit via
    /// the node and classify the engine result. Successful submissions
    /// are recorded before the response is built; a malformed envelope
    /// aborts the write entirely.
    #[instrument(skip(self, seed, tx_json), fields(transaction_type))]
    pub(crate) async fn sign_and_submit(
        &self,
        seed: &SecretString,
        mut tx_json: Value,
    ) -> Result<SubmitResponse, AppError> {
        let account = self.gateway.derive_account(seed).await?;
        let transaction_type = tx_json
            .get("TransactionType")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        tracing::Span::current().record("transaction_type", transaction_type.as_str());

        if let Some(obj) = tx_json.as_object_mut() {
            obj.insert("Account".to_string(), json!(account));
            obj.insert("Fee".to_string(), json!(self.config.fee_drops.to_string()));
        }

        let result = with_transport_retry(self.config.submit_retry_attempts, || {
            let tx = tx_json.clone();
            async move { self.gateway.submit(seed, tx).await }
        })
        .await?;

        let code = result
            .get("engine_result")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AppError::Ledger(LedgerError::MalformedResponse(
                    "engine_result missing from submit result".to_string(),
                ))
            })?;
        let node_message = result.get("engine_result_message").and_then(Value::as_str);
        engine_result::classify(code, node_message).map_err(AppError::Ledger)?;

        let (record, nodes) = TransactionRecord::from_envelope(&result)?;
        self.store.upsert_transaction(&record, &nodes).await?;
        let hash = Some(record.hash.clone());

        info!(account = %account, engine_result = %code, "Transaction accepted");
        Ok(SubmitResponse {
            account,
            transaction_type,
            engine_result: code.to_string(),
            hash,
            result,
        })
    }

    /// Create and fund a new account via the network faucet, then record
    /// an initial snapshot from `account_info` when the account is
    /// already visible in a validated ledger.
    #[instrument(skip(self))]
    pub async fn create_account(&self) -> Result<FundedAccount, AppError> {
        if self.config.faucet_url.is_none() {
            return Err(AppError::NotSupported(format!(
                "no faucet on {}",
                self.config.network
            )));
        }
        let account = self.faucet.fund_new_account().await?;
        info!(address = %account.address, "Funded new account");

        match self
            .gateway
            .request(
                "account_info",
                json!({"account": account.address, "ledger_index": "validated"}),
            )
            .await
        {
            Ok(result) => {
                let snapshot = AccountSnapshot::from_envelope(&result)?;
                self.store.save_account_snapshot(&snapshot).await?;
            }
            Err(AppError::Ledger(LedgerError::NotFound(_))) => {
                info!(address = %account.address, "Account not yet in a validated ledger, snapshot deferred");
            }
            Err(err) => return Err(err),
        }

        Ok(account)
    }

    /// Fetch live account state and store a fresh snapshot.
    #[instrument(skip(self))]
    pub async fn get_account(&self, address: &str) -> Result<AccountInfoResponse, AppError> {
        validation::validate_address(address).map_err(AppError::Validation)?;

        let result = self
            .gateway
            .request(
                "account_info",
                json!({"account": address, "ledger_index": "validated"}),
            )
            .await?;

        let snapshot = AccountSnapshot::from_envelope(&result)?;
        self.store.save_account_snapshot(&snapshot).await?;
        Ok(AccountInfoResponse { snapshot, result })
    }

    /// Delete an account, sending its remaining XRP to the destination.
    #[instrument(skip(self, request))]
    pub async fn delete_account(
        &self,
        request: &AccountDeleteRequest,
    ) -> Result<SubmitResponse, AppError> {
        request.validate()?;
        self.sign_and_submit(
            &request.sender_seed,
            json!({
                "TransactionType": "AccountDelete",
                "Destination": request.destination,
            }),
        )
        .await
    }

    /// Update account flags and/or domain via AccountSet.
    #[instrument(skip(self, request))]
    pub async fn configure_account(
        &self,
        request: &AccountSettingsRequest,
    ) -> Result<SubmitResponse, AppError> {
        request.validate()?;
        if request.set_flag.is_none() && request.clear_flag.is_none() && request.domain.is_none() {
            return Err(AppError::Validation(ValidationError::MissingParameter(
                "one of set_flag, clear_flag or domain".to_string(),
            )));
        }

        let mut tx_json = json!({"TransactionType": "AccountSet"});
        let obj = tx_json
            .as_object_mut()
            .ok_or_else(|| AppError::Internal("tx_json is not an object".to_string()))?;
        if let Some(flag) = request.set_flag {
            obj.insert("SetFlag".to_string(), json!(flag));
        }
        if let Some(flag) = request.clear_flag {
            obj.insert("ClearFlag".to_string(), json!(flag));
        }
        if let Some(domain) = &request.domain {
            obj.insert("Domain".to_string(), json!(hex_upper(domain.as_bytes())));
        }

        self.sign_and_submit(&request.sender_seed, tx_json).await
    }

    /// Irreversibly disable an account's keys: point its regular key at
    /// the black-hole address, then disable the master key.
    #[instrument(skip(self, request))]
    pub async fn blackhole_account(
        &self,
        request: &BlackholeRequest,
    ) -> Result<SubmitResponse, AppError> {
        request.validate()?;

        let regular_key = self
            .sign_and_submit(
                &request.sender_seed,
                json!({
                    "TransactionType": "SetRegularKey",
                    "RegularKey": self.config.black_hole_address,
                }),
            )
            .await?;
        warn!(account = %regular_key.account, "Regular key pointed at black hole, disabling master key");

        self.sign_and_submit(
            &request.sender_seed,
            json!({
                "TransactionType": "AccountSet",
                "SetFlag": ASF_DISABLE_MASTER,
            }),
        )
        .await
    }

    /// Send a native XRP payment.
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn send_payment(
        &self,
        request: &XrpPaymentRequest,
    ) -> Result<SubmitResponse, AppError> {
        request.validate()?;

        let mut tx_json = json!({
            "TransactionType": "Payment",
            "Destination": request.destination,
            "Amount": request.amount_drops.to_string(),
        });
        if let (Some(obj), Some(tag)) = (tx_json.as_object_mut(), request.destination_tag) {
            obj.insert("DestinationTag".to_string(), json!(tag));
        }

        self.sign_and_submit(&request.sender_seed, tx_json).await
    }

    /// Send a cross-currency payment: spend XRP, deliver an issued
    /// currency through the paths the node finds.
    #[instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn send_cross_currency_payment(
        &self,
        request: &CrossCurrencyPaymentRequest,
    ) -> Result<SubmitResponse, AppError> {
        request.validate()?;

        self.sign_and_submit(
            &request.sender_seed,
            json!({
                "TransactionType": "Payment",
                "Destination": request.destination,
                "Amount": {
                    "currency": request.currency_code,
                    "issuer": request.issuer_address,
                    "value": request.amount,
                },
                "SendMax": request.send_max_drops.to_string(),
            }),
        )
        .await
    }

    /// Open or update a trust line toward an issuer.
    #[instrument(skip(self, request), fields(issuer = %request.issuer_address, currency = %request.currency_code))]
    pub async fn create_trust_line(
        &self,
        request: &TrustLineRequest,
    ) -> Result<TrustLineResponse, AppError> {
        request.validate()?;

        let submitted = self
            .sign_and_submit(
                &request.sender_seed,
                json!({
                    "TransactionType": "TrustSet",
                    "LimitAmount": {
                        "currency": request.currency_code,
                        "issuer": request.issuer_address,
                        "value": request.limit,
                    },
                }),
            )
            .await?;

        Ok(TrustLineResponse {
            account: submitted.account,
            currency: request.currency_code.clone(),
            limit: request.limit.clone(),
            result: submitted.result,
        })
    }

    /// Look up a transaction by hash and record it together with its
    /// affected nodes.
    #[instrument(skip(self))]
    pub async fn get_transaction(&self, hash: &str) -> Result<TransactionResponse, AppError> {
        validation::validate_tx_hash(hash).map_err(AppError::Validation)?;

        let result = self
            .gateway
            .request("tx", json!({"transaction": hash}))
            .await?;

        let (record, nodes) = TransactionRecord::from_envelope(&result)?;
        self.store.upsert_transaction(&record, &nodes).await?;
        Ok(TransactionResponse {
            affected_node_count: nodes.len(),
            record,
            result,
        })
    }

    /// Probe database and ledger node health.
    #[instrument(skip(self))]
    pub async fn health(&self) -> HealthResponse {
        let database = match self.store.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(err) => {
                warn!(error = %err, "Database health check failed");
                HealthStatus::Unhealthy
            }
        };
        let ledger = match self.gateway.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(err) => {
                warn!(error = %err, "Ledger health check failed");
                HealthStatus::Unhealthy
            }
        };
        HealthResponse::new(database, ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_upper() {
        assert_eq!(hex_upper(b"example.com"), "6578616D706C652E636F6D");
        assert_eq!(hex_upper(&[]), "");
    }
}
