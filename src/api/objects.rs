//! Ledger object endpoints: DEX offers, escrows, NFTs, oracles, DIDs
//! and ledger-wide queries.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::app::AppState;
use crate::domain::{
    AppError,
    types::{
        DidDeleteRequest, DidSetRequest, EscrowCancelRequest, EscrowCreateRequest,
        EscrowFinishRequest, FeeInfo, LedgerEntryResponse, LedgerSummary, NftBurnRequest,
        NftMintRequest, OfferCancelRequest, OfferCreateRequest, OracleDeleteRequest,
        OracleSetRequest, SubmitResponse,
    },
};

/// Place an offer on the decentralized exchange
#[utoipa::path(
    post,
    path = "/offers",
    tag = "objects",
    request_body = OfferCreateRequest,
    responses(
        (status = 200, description = "Offer accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Offer rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn create_offer_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OfferCreateRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.create_offer(&payload).await?))
}

/// Cancel an open offer by sequence number
#[utoipa::path(
    post,
    path = "/offers/cancel",
    tag = "objects",
    request_body = OfferCancelRequest,
    responses(
        (status = 200, description = "Cancellation accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Cancellation rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn cancel_offer_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OfferCancelRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.cancel_offer(&payload).await?))
}

/// Lock XRP in an escrow
#[utoipa::path(
    post,
    path = "/escrows",
    tag = "objects",
    request_body = EscrowCreateRequest,
    responses(
        (status = 200, description = "Escrow accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Escrow rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn create_escrow_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EscrowCreateRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.create_escrow(&payload).await?))
}

/// Release a held escrow
#[utoipa::path(
    post,
    path = "/escrows/finish",
    tag = "objects",
    request_body = EscrowFinishRequest,
    responses(
        (status = 200, description = "Finish accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Finish rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn finish_escrow_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EscrowFinishRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.finish_escrow(&payload).await?))
}

/// Cancel an expired escrow
#[utoipa::path(
    post,
    path = "/escrows/cancel",
    tag = "objects",
    request_body = EscrowCancelRequest,
    responses(
        (status = 200, description = "Cancellation accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Cancellation rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn cancel_escrow_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EscrowCancelRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.cancel_escrow(&payload).await?))
}

/// Mint an NFToken
#[utoipa::path(
    post,
    path = "/nfts/mint",
    tag = "objects",
    request_body = NftMintRequest,
    responses(
        (status = 200, description = "Mint accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Mint rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn mint_nft_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NftMintRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.mint_nft(&payload).await?))
}

/// Burn an NFToken by ID
#[utoipa::path(
    post,
    path = "/nfts/burn",
    tag = "objects",
    request_body = NftBurnRequest,
    responses(
        (status = 200, description = "Burn accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Burn rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn burn_nft_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NftBurnRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.burn_nft(&payload).await?))
}

/// Create or update a price oracle
#[utoipa::path(
    post,
    path = "/oracles",
    tag = "objects",
    request_body = OracleSetRequest,
    responses(
        (status = 200, description = "Oracle update accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Oracle update rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn set_oracle_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OracleSetRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.set_oracle(&payload).await?))
}

/// Delete a price oracle
#[utoipa::path(
    post,
    path = "/oracles/delete",
    tag = "objects",
    request_body = OracleDeleteRequest,
    responses(
        (status = 200, description = "Oracle deletion accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "Oracle deletion rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn delete_oracle_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OracleDeleteRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.delete_oracle(&payload).await?))
}

/// Look up a price oracle entry
#[utoipa::path(
    get,
    path = "/oracles/{address}/{document_id}",
    tag = "objects",
    params(
        ("address" = String, Path, description = "Oracle owner address"),
        ("document_id" = u32, Path, description = "Oracle document ID")
    ),
    responses(
        (status = 200, description = "Lookup result; absence is a valid outcome", body = LedgerEntryResponse),
        (status = 400, description = "Invalid address", body = crate::domain::ErrorResponse)
    )
)]
pub async fn get_oracle_handler(
    State(state): State<Arc<AppState>>,
    Path((address, document_id)): Path<(String, u32)>,
) -> Result<Json<LedgerEntryResponse>, AppError> {
    Ok(Json(state.service.get_oracle(&address, document_id).await?))
}

/// Create or update a DID document
#[utoipa::path(
    post,
    path = "/did",
    tag = "objects",
    request_body = DidSetRequest,
    responses(
        (status = 200, description = "DID update accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "DID update rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn set_did_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DidSetRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.set_did(&payload).await?))
}

/// Delete the account's DID
#[utoipa::path(
    post,
    path = "/did/delete",
    tag = "objects",
    request_body = DidDeleteRequest,
    responses(
        (status = 200, description = "DID deletion accepted by the node", body = SubmitResponse),
        (status = 400, description = "Validation error", body = crate::domain::ErrorResponse),
        (status = 422, description = "DID deletion rejected by the ledger", body = crate::domain::ErrorResponse)
    )
)]
pub async fn delete_did_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DidDeleteRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    Ok(Json(state.service.delete_did(&payload).await?))
}

/// Look up an account's DID entry
#[utoipa::path(
    get,
    path = "/did/{address}",
    tag = "objects",
    params(
        ("address" = String, Path, description = "DID owner address")
    ),
    responses(
        (status = 200, description = "Lookup result; absence is a valid outcome", body = LedgerEntryResponse),
        (status = 400, description = "Invalid address", body = crate::domain::ErrorResponse)
    )
)]
pub async fn get_did_handler(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<LedgerEntryResponse>, AppError> {
    Ok(Json(state.service.get_did(&address).await?))
}

/// Summarize the latest validated ledger
#[utoipa::path(
    get,
    path = "/ledger",
    tag = "ledger",
    responses(
        (status = 200, description = "Ledger summary", body = LedgerSummary),
        (status = 503, description = "Ledger node unavailable", body = crate::domain::ErrorResponse)
    )
)]
pub async fn get_ledger_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LedgerSummary>, AppError> {
    Ok(Json(state.service.get_ledger_summary().await?))
}

/// Report current fee levels
#[utoipa::path(
    get,
    path = "/ledger/fee",
    tag = "ledger",
    responses(
        (status = 200, description = "Current fee levels", body = FeeInfo),
        (status = 503, description = "Ledger node unavailable", body = crate::domain::ErrorResponse)
    )
)]
pub async fn get_fee_handler(State(state): State<Arc<AppState>>) -> Result<Json<FeeInfo>, AppError> {
    Ok(Json(state.service.get_fee_info().await?))
}
