//! JSON-RPC gateway to a rippled-compatible node.
//!
//! The node's envelope is `{"method": m, "params": [object]}` with the
//! reply under `result`. Node-level failures come back inside `result`
//! with `status == "error"`; they are unwrapped into [`LedgerError`]
//! here so callers never see the raw envelope shape.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::config::LedgerConfig;
use crate::domain::error::{AppError, LedgerError};
use crate::domain::traits::LedgerGateway;

/// Node error codes that mean "does not exist" rather than "call failed".
const NOT_FOUND_CODES: &[&str] = &["actNotFound", "entryNotFound", "txnNotFound", "lgrNotFound"];

/// HTTP gateway to the configured JSON-RPC endpoint.
pub struct JsonRpcGateway {
    url: String,
    http_client: reqwest::Client,
}

impl JsonRpcGateway {
    pub fn new(config: &LedgerConfig) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            url: config.json_rpc_url.clone(),
            http_client,
        })
    }

    /// POST one call and unwrap the node's `result` object.
    async fn call(&self, method: &str, param: Value) -> Result<Value, AppError> {
        let body = json!({"method": method, "params": [param]});

        let response = self
            .http_client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Ledger(LedgerError::Http(format!(
                "node returned HTTP {}",
                status
            ))));
        }

        let envelope: Value = response.json().await.map_err(|e| {
            AppError::Ledger(LedgerError::MalformedResponse(format!(
                "response body is not JSON: {}",
                e
            )))
        })?;
        let result = envelope.get("result").ok_or_else(|| {
            AppError::Ledger(LedgerError::MalformedResponse(
                "'result' missing from response envelope".to_string(),
            ))
        })?;

        if result.get("status").and_then(Value::as_str) == Some("error") {
            let code = result
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            if NOT_FOUND_CODES.contains(&code.as_str()) {
                return Err(AppError::Ledger(LedgerError::NotFound(code)));
            }
            let message = result
                .get("error_message")
                .or_else(|| result.get("error_exception"))
                .and_then(Value::as_str)
                .unwrap_or(&code)
                .to_string();
            return Err(AppError::Ledger(LedgerError::Rpc { code, message }));
        }

        debug!(method, "Ledger call succeeded");
        Ok(result.clone())
    }
}

fn map_transport_error(err: reqwest::Error) -> AppError {
    let ledger_err = if err.is_timeout() {
        LedgerError::Timeout(err.to_string())
    } else if err.is_connect() {
        LedgerError::Connection(err.to_string())
    } else {
        LedgerError::Http(err.to_string())
    };
    AppError::Ledger(ledger_err)
}

#[async_trait]
impl LedgerGateway for JsonRpcGateway {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        self.call("server_info", json!({})).await.map(|_| ())
    }

    #[instrument(skip(self, params))]
    async fn request(&self, method: &str, params: Value) -> Result<Value, AppError> {
        self.call(method, params).await
    }

    // The seed only ever appears inside the request body, never in logs
    // or spans.
    #[instrument(skip(self, seed, tx_json))]
    async fn submit(&self, seed: &SecretString, tx_json: Value) -> Result<Value, AppError> {
        self.call(
            "submit",
            json!({
                "secret": seed.expose_secret(),
                "tx_json": tx_json,
            }),
        )
        .await
    }

    #[instrument(skip(self, seed))]
    async fn derive_account(&self, seed: &SecretString) -> Result<String, AppError> {
        let result = self
            .call("wallet_propose", json!({"seed": seed.expose_secret()}))
            .await?;
        result
            .get("account_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Ledger(LedgerError::MalformedResponse(
                    "'account_id' missing from wallet_propose result".to_string(),
                ))
            })
    }
}
