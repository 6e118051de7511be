//! Account endpoints: creation, state, destructive operations and the
//! drained listings hanging off an account.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::app::AppState;
use crate::domain::{
    AppError,
    types::{
        AccountDeleteRequest, AccountInfoResponse, AccountSettingsRequest, BlackholeRequest,
        FundedAccount, PageParams, PagedOutcome, SubmitResponse,
    },
};

/// Create and fund a new account via the network faucet
#[utoipa::path(
    post,
    path = "/accounts",
    tag = "accounts",
    responses(
        (status = 200, description = "Account created and funded", body = FundedAccount),
        (status = 501, description = "Network has no faucet", body = crate::domain::ErrorResponse),
        (status = 502, description = "Faucet unavailable", body = crate::domain::ErrorResponse)
    )
)]
pub async fn create_account_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FundedAccount>, AppError> {
    Ok(Json(state.service.create_account().await?))
}

/// Fetch live account state, persisting a fresh snapshot
#[utoipa::path(
    get,
    path = "/accounts/{address}",
    tag = "accounts",
    params(
        ("address" = String, Path, description = "Classic or X-address")
    ),
    responses(
        (status = 200, description = "Account state", body = AccountInfoResponse),
        (status = 400, description = "Invalid address", body = crate::domain::ErrorResponse),
        (status = 404, description = "Account not found", body = crate::domain::ErrorResponse)
    )
)]
pub async fn get_account_handler(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<AccountInfoResponse>, AppError> {
    Ok(Json(state.service.get_account(&address).await?))
}

/// Delete an account, sending its remaining XRP to a destination
#[utoipa::path(
    delete,
    path = "/accounts/{address}",
    tag = "accounts",
    params(
        ("address" = String, Path, description = "Address being deleted (informational)")
    ),
    request_body = AccountDeleteRequest,
    responses(
        (status = 200, description = "Deletion submitted", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Deletion rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn delete_account_handler(
    State(state): State<Arc<AppState>>,
    Path(_address): Path<String>,
    Json(payload): Json<AccountDeleteRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.delete_account(&payload).await?))
}

/// Irreversibly black-hole an account
#[utoipa::path(
    post,
    path = "/accounts/{address}/blackhole",
    tag = "accounts",
    params(
        ("address" = String, Path, description = "Address being black-holed (informational)")
    ),
    request_body = BlackholeRequest,
    responses(
        (status = 200, description = "Master key disabled", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn blackhole_account_handler(
    State(state): State<Arc<AppState>>,
    Path(_address): Path<String>,
    Json(payload): Json<BlackholeRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.blackhole_account(&payload).await?))
}

/// Update account flags and/or domain
#[utoipa::path(
    post,
    path = "/accounts/{address}/settings",
    tag = "accounts",
    params(
        ("address" = String, Path, description = "Address being configured (informational)")
    ),
    request_body = AccountSettingsRequest,
    responses(
        (status = 200, description = "Settings submitted", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse)
    )
)]
pub async fn account_settings_handler(
    State(state): State<Arc<AppState>>,
    Path(_address): Path<String>,
    Json(payload): Json<AccountSettingsRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.configure_account(&payload).await?))
}

/// List an account's trust lines
#[utoipa::path(
    get,
    path = "/accounts/{address}/lines",
    tag = "accounts",
    params(
        ("address" = String, Path, description = "Classic or X-address"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("page_size" = Option<u32>, Query, description = "Items per page (1-100, default: 20)")
    ),
    responses(
        (status = 200, description = "Page of trust lines, or a no-items message", body = PagedOutcome),
        (status = 400, description = "Invalid address or page parameters", body = crate::domain::ErrorResponse)
    )
)]
pub async fn list_trust_lines_handler(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedOutcome>, AppError> {
    Ok(Json(
        state.service.list_trust_lines(&address, &params).await?,
    ))
}

/// List an account's open DEX offers
#[utoipa::path(
    get,
    path = "/accounts/{address}/offers",
    tag = "accounts",
    params(
        ("address" = String, Path, description = "Classic or X-address"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("page_size" = Option<u32>, Query, description = "Items per page (1-100, default: 20)")
    ),
    responses(
        (status = 200, description = "Page of offers, or a no-items message", body = PagedOutcome),
        (status = 400, description = "Invalid address or page parameters", body = crate::domain::ErrorResponse)
    )
)]
pub async fn list_offers_handler(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedOutcome>, AppError> {
    Ok(Json(state.service.list_offers(&address, &params).await?))
}

/// List ledger objects owned by an account
#[utoipa::path(
    get,
    path = "/accounts/{address}/objects",
    tag = "accounts",
    params(
        ("address" = String, Path, description = "Classic or X-address"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("page_size" = Option<u32>, Query, description = "Items per page (1-100, default: 20)"),
        ("object_type" = Option<String>, Query, description = "Ledger object type filter, e.g. 'offer' or 'state'")
    ),
    responses(
        (status = 200, description = "Page of ledger objects, or a no-items message", body = PagedOutcome),
        (status = 400, description = "Invalid address or page parameters", body = crate::domain::ErrorResponse)
    )
)]
pub async fn list_objects_handler(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedOutcome>, AppError> {
    Ok(Json(state.service.list_objects(&address, &params).await?))
}

/// List escrows involving an account
#[utoipa::path(
    get,
    path = "/accounts/{address}/escrows",
    tag = "accounts",
    params(
        ("address" = String, Path, description = "Classic or X-address"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("page_size" = Option<u32>, Query, description = "Items per page (1-100, default: 20)")
    ),
    responses(
        (status = 200, description = "Page of escrows, or a no-items message", body = PagedOutcome),
        (status = 400, description = "Invalid address or page parameters", body = crate::domain::ErrorResponse)
    )
)]
pub async fn list_escrows_handler(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedOutcome>, AppError> {
    Ok(Json(state.service.list_escrows(&address, &params).await?))
}

/// List NFTs owned by an account
#[utoipa::path(
    get,
    path = "/accounts/{address}/nfts",
    tag = "accounts",
    params(
        ("address" = String, Path, description = "Classic or X-address"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("page_size" = Option<u32>, Query, description = "Items per page (1-100, default: 20)")
    ),
    responses(
        (status = 200, description = "Page of NFTs, or a no-items message", body = PagedOutcome),
        (status = 400, description = "Invalid address or page parameters", body = crate::domain::ErrorResponse)
    )
)]
pub async fn list_nfts_handler(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedOutcome>, AppError> {
    Ok(Json(state.service.list_nfts(&address, &params).await?))
}
