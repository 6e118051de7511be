//! Payment, trust line and transaction lookup endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::app::AppState;
use crate::domain::{
    AppError,
    types::{
        CrossCurrencyPaymentRequest, SubmitResponse, TransactionResponse, TrustLineRequest,
        TrustLineResponse, XrpPaymentRequest,
    },
};

/// Send a native XRP payment
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = XrpPaymentRequest,
    responses(
        (status = 200, description = "Payment accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Payment rejected by the ledger", body = crate::domain::ErrorResponse),
        (status = 503, description = "Ledger node unavailable", body = crate::domain::ErrorResponse)
    )
)]
pub async fn send_payment_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<XrpPaymentRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.send_payment(&payload).await?))
}

/// Send a cross-currency payment (XRP in, issued currency out)
#[utoipa::path(
    post,
    path = "/payments/cross-currency",
    tag = "payments",
    request_body = CrossCurrencyPaymentRequest,
    responses(
        (status = 200, description = "Payment accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Payment rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn send_cross_currency_payment_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CrossCurrencyPaymentRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(
        state.service.send_cross_currency_payment(&payload).await?,
    ))
}

/// Open or update a trust line toward an issuer
#[utoipa::path(
    post,
    path = "/trustlines",
    tag = "payments",
    request_body = TrustLineRequest,
    responses(
        (status = 200, description = "Trust line accepted by the node", body = TrustLineResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "TrustSet rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn create_trust_line_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TrustLineRequest>,
) -> Result<Json<TrustLineResponse>, AppError> {
    Ok(Json(state.service.create_trust_line(&payload).await?))
}

/// Look up a transaction by hash, recording it with its affected nodes
#[utoipa::path(
    get,
    path = "/transactions/{hash}",
    tag = "payments",
    params(
        ("hash" = String, Path, description = "Transaction hash (64 hex characters)")
    ),
    responses(
        (status = 200, description = "Transaction found and recorded", body = TransactionResponse),
        (status = 400, description = "Invalid hash", body = crate::domain::ErrorResponse),
        (status = 404, description = "Transaction not found", body = crate::domain::ErrorResponse)
    )
)]
pub async fn get_transaction_handler(
    State(state): State<Arc<AppState>>,
    Path(hash): Path<String>,
) -> Result<Json<TransactionResponse>, AppError> {
    Ok(Json(state.service.get_transaction(&hash).await?))
}
