//! HTTP request handlers with OpenAPI documentation: health probes,
//! error-to-response mapping, and the OpenAPI document.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;
use utoipa::OpenApi;

use crate::app::AppState;
use crate::domain::{
    AppError, DatabaseError, ErrorDetail, ErrorResponse, ExternalServiceError, HealthResponse,
    HealthStatus, LedgerError,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    info(
        title = "XRPL Ledger Relay API",
        version = "0.1.0",
        description = "REST relay in front of an XRP Ledger JSON-RPC node with PostgreSQL bookkeeping",
        license(
            name = "MIT"
        )
    ),
    paths(
        super::accounts::create_account_handler,
        super::accounts::get_account_handler,
        super::accounts::delete_account_handler,
        super::accounts::blackhole_account_handler,
        super::accounts::account_settings_handler,
        super::accounts::list_trust_lines_handler,
        super::accounts::list_offers_handler,
        super::accounts::list_objects_handler,
        super::accounts::list_escrows_handler,
        super::accounts::list_nfts_handler,
        super::payments::send_payment_handler,
        super::payments::send_cross_currency_payment_handler,
        super::payments::create_trust_line_handler,
        super::payments::get_transaction_handler,
        super::objects::create_offer_handler,
        super::objects::cancel_offer_handler,
        super::objects::create_escrow_handler,
        super::objects::finish_escrow_handler,
        super::objects::cancel_escrow_handler,
        super::objects::mint_nft_handler,
        super::objects::burn_nft_handler,
        super::objects::set_oracle_handler,
        super::objects::delete_oracle_handler,
        super::objects::get_oracle_handler,
        super::objects::set_did_handler,
        super::objects::delete_did_handler,
        super::objects::get_did_handler,
        super::objects::get_ledger_handler,
        super::objects::get_fee_handler,
        health_check_handler,
        liveness_handler,
        readiness_handler,
    ),
    components(
        schemas(
            crate::domain::types::FundedAccount,
            crate::domain::types::AccountSnapshot,
            crate::domain::types::AccountInfoResponse,
            crate::domain::types::AccountDeleteRequest,
            crate::domain::types::AccountSettingsRequest,
            crate::domain::types::BlackholeRequest,
            crate::domain::types::XrpPaymentRequest,
            crate::domain::types::CrossCurrencyPaymentRequest,
            crate::domain::types::TrustLineRequest,
            crate::domain::types::TrustLineResponse,
            crate::domain::types::TransactionRecord,
            crate::domain::types::AffectedNode,
            crate::domain::types::NodeDiffType,
            crate::domain::types::TransactionResponse,
            crate::domain::types::OfferCreateRequest,
            crate::domain::types::OfferCancelRequest,
            crate::domain::types::AssetAmount,
            crate::domain::types::EscrowCreateRequest,
            crate::domain::types::EscrowFinishRequest,
            crate::domain::types::EscrowCancelRequest,
            crate::domain::types::NftMintRequest,
            crate::domain::types::NftBurnRequest,
            crate::domain::types::OracleSetRequest,
            crate::domain::types::OracleDeleteRequest,
            crate::domain::types::OraclePrice,
            crate::domain::types::DidSetRequest,
            crate::domain::types::DidDeleteRequest,
            crate::domain::types::LedgerEntryResponse,
            crate::domain::types::LedgerSummary,
            crate::domain::types::FeeInfo,
            crate::domain::types::PageParams,
            crate::domain::types::PagedOutcome,
            crate::domain::types::SubmitResponse,
            HealthResponse,
            HealthStatus,
            ErrorResponse,
            ErrorDetail,
            crate::domain::types::RateLimitResponse,
        )
    ),
    tags(
        (name = "accounts", description = "Account creation, state and listings"),
        (name = "payments", description = "Payments, trust lines and transaction lookups"),
        (name = "objects", description = "DEX offers, escrows, NFTs, oracles and DIDs"),
        (name = "ledger", description = "Ledger-wide queries"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Detailed health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Health status", body = HealthResponse)
    )
)]
pub async fn health_check_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(state.service.health().await)
}

/// Kubernetes liveness probe
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Application is alive")
    )
)]
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}

/// Kubernetes readiness probe
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Application is ready to serve traffic"),
        (status = 503, description = "Application is not ready")
    )
)]
pub async fn readiness_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    let health = state.service.health().await;
    match health.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_type, message) = match &self {
            AppError::Database(db_err) => match db_err {
                DatabaseError::Connection(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "database_error",
                    self.to_string(),
                ),
                DatabaseError::NotFound(_) => {
                    (StatusCode::NOT_FOUND, "not_found", self.to_string())
                }
                DatabaseError::Duplicate(_) => {
                    (StatusCode::CONFLICT, "duplicate", self.to_string())
                }
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    self.to_string(),
                ),
            },
            AppError::Ledger(ledger_err) => match ledger_err {
                LedgerError::Connection(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "ledger_error",
                    self.to_string(),
                ),
                LedgerError::Timeout(_) => {
                    (StatusCode::GATEWAY_TIMEOUT, "timeout", self.to_string())
                }
                LedgerError::NotFound(_) => {
                    (StatusCode::NOT_FOUND, "not_found", self.to_string())
                }
                LedgerError::EngineResult { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "transaction_rejected",
                    self.to_string(),
                ),
                LedgerError::Rpc { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "ledger_rpc_error",
                    self.to_string(),
                ),
                _ => (StatusCode::BAD_GATEWAY, "ledger_error", self.to_string()),
            },
            AppError::ExternalService(ext_err) => match ext_err {
                ExternalServiceError::Timeout(_) => {
                    (StatusCode::GATEWAY_TIMEOUT, "timeout", self.to_string())
                }
                _ => (
                    StatusCode::BAD_GATEWAY,
                    "external_service_error",
                    self.to_string(),
                ),
            },
            AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                self.to_string(),
            ),
            AppError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                self.to_string(),
            ),
            AppError::Serialization(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "serialization_error",
                self.to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                self.to_string(),
            ),
            AppError::NotSupported(_) => (
                StatusCode::NOT_IMPLEMENTED,
                "not_supported",
                self.to_string(),
            ),
        };

        if status.is_server_error() {
            error!(error_type = %error_type, message = %message, "Server error");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                r#type: error_type.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}
