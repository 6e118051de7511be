//! Test-network faucet client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::domain::error::{AppError, ExternalServiceError};
use crate::domain::traits::FaucetClient;
use crate::domain::types::FundedAccount;

/// Faucet response. Field names vary a little between faucet
/// deployments, so both spellings of each are accepted.
#[derive(Debug, Deserialize)]
struct FaucetResponse {
    account: FaucetAccount,
    /// Initial funding in whole XRP
    amount: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct FaucetAccount {
    #[serde(alias = "classicAddress")]
    address: Option<String>,
    #[serde(alias = "secret")]
    seed: Option<String>,
}

const DROPS_PER_XRP: i64 = 1_000_000;

/// HTTP client for a faucet that creates and funds new accounts.
pub struct HttpFaucetClient {
    url: String,
    http_client: reqwest::Client,
}

impl HttpFaucetClient {
    pub fn new(url: &str, timeout: std::time::Duration) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            url: url.to_string(),
            http_client,
        })
    }
}

#[async_trait]
impl FaucetClient for HttpFaucetClient {
    #[instrument(skip(self))]
    async fn fund_new_account(&self) -> Result<FundedAccount, AppError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| {
                let service_err = if e.is_timeout() {
                    ExternalServiceError::Timeout(e.to_string())
                } else {
                    ExternalServiceError::HttpError(e.to_string())
                };
                AppError::ExternalService(service_err)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalService(ExternalServiceError::Unavailable(
                format!("faucet returned HTTP {}", status),
            )));
        }

        let body: FaucetResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(ExternalServiceError::HttpError(format!(
                "faucet response is not JSON: {}",
                e
            )))
        })?;

        let address = body.account.address.ok_or_else(|| {
            AppError::ExternalService(ExternalServiceError::HttpError(
                "faucet response has no account address".to_string(),
            ))
        })?;
        let seed = body.account.seed.ok_or_else(|| {
            AppError::ExternalService(ExternalServiceError::HttpError(
                "faucet response has no account seed".to_string(),
            ))
        })?;

        info!(address = %address, "Faucet created new account");
        Ok(FundedAccount {
            address,
            seed,
            balance_drops: body.amount.and_then(|xrp| xrp.checked_mul(DROPS_PER_XRP)),
        })
    }
}

/// Placeholder used on networks without a faucet.
pub struct NoFaucet;

#[async_trait]
impl FaucetClient for NoFaucet {
    async fn fund_new_account(&self) -> Result<FundedAccount, AppError> {
        Err(AppError::NotSupported(
            "this network has no faucet".to_string(),
        ))
    }
}
