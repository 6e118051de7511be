//! Ledger object flows: DEX offers, escrows, NFTs, oracles, DIDs and
//! ledger-wide queries. Listing endpoints drain every node-side page
//! before slicing the client's page out of the full set.

use chrono::Utc;
use serde_json::{Value, json};
use tracing::instrument;
use validator::Validate;

use crate::domain::error::{AppError, LedgerError, ValidationError};
use crate::domain::types::{
    DidDeleteRequest, DidSetRequest, EscrowCancelRequest, EscrowCreateRequest, EscrowFinishRequest,
    FeeInfo, LedgerEntryResponse, LedgerSummary, NftBurnRequest, NftMintRequest,
    OfferCancelRequest, OfferCreateRequest, OracleDeleteRequest, OracleSetRequest, PageParams,
    PagedOutcome, SubmitResponse,
};
use crate::domain::validation;

use super::paging::drain_pages;
use super::service::{AppService, hex_upper};

/// Seconds between the Unix epoch and the ledger's epoch (2000-01-01).
const RIPPLE_EPOCH_OFFSET: i64 = 946_684_800;

/// NFTokenMint flag marking the token as transferable.
const TF_TRANSFERABLE: u64 = 8;

fn to_ripple_time(unix_secs: i64) -> Result<i64, AppError> {
    let ripple = unix_secs - RIPPLE_EPOCH_OFFSET;
    if ripple < 0 {
        return Err(AppError::Validation(ValidationError::InvalidField {
            field: "time".to_string(),
            message: "timestamp predates the ledger epoch".to_string(),
        }));
    }
    Ok(ripple)
}

impl AppService {
    async fn drain_listing(
        &self,
        method: &str,
        base_params: Value,
        items_key: &str,
        params: &PageParams,
        empty_message: &str,
    ) -> Result<PagedOutcome, AppError> {
        params.validate()?;
        let items = drain_pages(self.gateway.as_ref(), method, base_params, items_key).await?;
        Ok(PagedOutcome::slice(&items, params, empty_message))
    }

    /// List an account's trust lines across all node-side pages.
    #[instrument(skip(self, params))]
    pub async fn list_trust_lines(
        &self,
        address: &str,
        params: &PageParams,
    ) -> Result<PagedOutcome, AppError> {
        validation::validate_address(address).map_err(AppError::Validation)?;
        self.drain_listing(
            "account_lines",
            json!({"account": address, "ledger_index": "validated"}),
            "lines",
            params,
            "No trust lines found",
        )
        .await
    }

    /// List an account's open DEX offers.
    #[instrument(skip(self, params))]
    pub async fn list_offers(
        &self,
        address: &str,
        params: &PageParams,
    ) -> Result<PagedOutcome, AppError> {
        validation::validate_address(address).map_err(AppError::Validation)?;
        self.drain_listing(
            "account_offers",
            json!({"account": address, "ledger_index": "validated"}),
            "offers",
            params,
            "No offers found",
        )
        .await
    }

    /// List ledger objects owned by an account, optionally filtered by
    /// object type.
    #[instrument(skip(self, params))]
    pub async fn list_objects(
        &self,
        address: &str,
        params: &PageParams,
    ) -> Result<PagedOutcome, AppError> {
        validation::validate_address(address).map_err(AppError::Validation)?;
        let mut base = json!({"account": address, "ledger_index": "validated"});
        if let (Some(obj), Some(object_type)) = (base.as_object_mut(), &params.object_type) {
            obj.insert("type".to_string(), json!(object_type));
        }
        self.drain_listing(
            "account_objects",
            base,
            "account_objects",
            params,
            "No ledger objects found",
        )
        .await
    }

    /// List escrows involving an account.
    #[instrument(skip(self, params))]
    pub async fn list_escrows(
        &self,
        address: &str,
        params: &PageParams,
    ) -> Result<PagedOutcome, AppError> {
        validation::validate_address(address).map_err(AppError::Validation)?;
        self.drain_listing(
            "account_objects",
            json!({"account": address, "ledger_index": "validated", "type": "escrow"}),
            "account_objects",
            params,
            "No escrows found",
        )
        .await
    }

    /// List NFTs owned by an account.
    #[instrument(skip(self, params))]
    pub async fn list_nfts(
        &self,
        address: &str,
        params: &PageParams,
    ) -> Result<PagedOutcome, AppError> {
        validation::validate_address(address).map_err(AppError::Validation)?;
        self.drain_listing(
            "account_nfts",
            json!({"account": address, "ledger_index": "validated"}),
            "account_nfts",
            params,
            "No NFTs found",
        )
        .await
    }

    /// Place an offer on the decentralized exchange.
    #[instrument(skip(self, request))]
    pub async fn create_offer(
        &self,
        request: &OfferCreateRequest,
    ) -> Result<SubmitResponse, AppError> {
        request.validate()?;
        self.sign_and_submit(
            &request.sender_seed,
            json!({
                "TransactionType": "OfferCreate",
                "TakerGets": request.taker_gets.to_tx_value(),
                "TakerPays": request.taker_pays.to_tx_value(),
            }),
        )
        .await
    }

    /// Cancel an open offer by sequence number.
    #[instrument(skip(self, request))]
    pub async fn cancel_offer(
        &self,
        request: &OfferCancelRequest,
    ) -> Result<SubmitResponse, AppError> {
        request.validate()?;
        self.sign_and_submit(
            &request.sender_seed,
            json!({
                "TransactionType": "OfferCancel",
                "OfferSequence": request.offer_sequence,
            }),
        )
        .await
    }

    /// Lock XRP in an escrow with optional finish/cancel windows.
    #[instrument(skip(self, request))]
    pub async fn create_escrow(
        &self,
        request: &EscrowCreateRequest,
    ) -> Result<SubmitResponse, AppError> {
        request.validate()?;
        if request.finish_after.is_none() && request.cancel_after.is_none() {
            return Err(AppError::Validation(ValidationError::MissingParameter(
                "one of finish_after or cancel_after".to_string(),
            )));
        }

        let mut tx_json = json!({
            "TransactionType": "EscrowCreate",
            "Destination": request.destination,
            "Amount": request.amount_drops.to_string(),
        });
        let obj = tx_json
            .as_object_mut()
            .ok_or_else(|| AppError::Internal("tx_json is not an object".to_string()))?;
        if let Some(finish_after) = request.finish_after {
            obj.insert("FinishAfter".to_string(), json!(to_ripple_time(finish_after)?));
        }
        if let Some(cancel_after) = request.cancel_after {
            obj.insert("CancelAfter".to_string(), json!(to_ripple_time(cancel_after)?));
        }

        self.sign_and_submit(&request.sender_seed, tx_json).await
    }

    /// Release an escrow whose finish time has passed.
    #[instrument(skip(self, request))]
    pub async fn finish_escrow(
        &self,
        request: &EscrowFinishRequest,
    ) -> Result<SubmitResponse, AppError> {
        request.validate()?;
        self.sign_and_submit(
            &request.sender_seed,
            json!({
                "TransactionType": "EscrowFinish",
                "Owner": request.owner,
                "OfferSequence": request.offer_sequence,
            }),
        )
        .await
    }

    /// Cancel an escrow whose cancel time has passed.
    #[instrument(skip(self, request))]
    pub async fn cancel_escrow(
        &self,
        request: &EscrowCancelRequest,
    ) -> Result<SubmitResponse, AppError> {
        request.validate()?;
        self.sign_and_submit(
            &request.sender_seed,
            json!({
                "TransactionType": "EscrowCancel",
                "Owner": request.owner,
                "OfferSequence": request.offer_sequence,
            }),
        )
        .await
    }

    /// Mint an NFToken.
    #[instrument(skip(self, request))]
    pub async fn mint_nft(&self, request: &NftMintRequest) -> Result<SubmitResponse, AppError> {
        request.validate()?;

        let mut tx_json = json!({
            "TransactionType": "NFTokenMint",
            "NFTokenTaxon": request.taxon,
        });
        let obj = tx_json
            .as_object_mut()
            .ok_or_else(|| AppError::Internal("tx_json is not an object".to_string()))?;
        if let Some(uri) = &request.uri {
            obj.insert("URI".to_string(), json!(hex_upper(uri.as_bytes())));
        }
        if request.transferable {
            obj.insert("Flags".to_string(), json!(TF_TRANSFERABLE));
        }

        self.sign_and_submit(&request.sender_seed, tx_json).await
    }

    /// Burn an NFToken by ID.
    #[instrument(skip(self, request))]
    pub async fn burn_nft(&self, request: &NftBurnRequest) -> Result<SubmitResponse, AppError> {
        request.validate()?;
        self.sign_and_submit(
            &request.sender_seed,
            json!({
                "TransactionType": "NFTokenBurn",
                "NFTokenID": request.nftoken_id,
            }),
        )
        .await
    }

    /// Create or update a price oracle.
    #[instrument(skip(self, request))]
    pub async fn set_oracle(&self, request: &OracleSetRequest) -> Result<SubmitResponse, AppError> {
        request.validate()?;

        let series: Vec<Value> = request
            .prices
            .iter()
            .map(|price| {
                json!({
                    "PriceData": {
                        "BaseAsset": price.base_asset,
                        "QuoteAsset": price.quote_asset,
                        "AssetPrice": format!("{:X}", price.asset_price),
                        "Scale": price.scale,
                    }
                })
            })
            .collect();
        let last_update_time = request
            .last_update_time
            .unwrap_or_else(|| Utc::now().timestamp());

        self.sign_and_submit(
            &request.sender_seed,
            json!({
                "TransactionType": "OracleSet",
                "OracleDocumentID": request.oracle_document_id,
                "Provider": hex_upper(request.provider.as_bytes()),
                "AssetClass": hex_upper(request.asset_class.as_bytes()),
                "LastUpdateTime": last_update_time,
                "PriceDataSeries": series,
            }),
        )
        .await
    }

    /// Delete a price oracle.
    #[instrument(skip(self, request))]
    pub async fn delete_oracle(
        &self,
        request: &OracleDeleteRequest,
    ) -> Result<SubmitResponse, AppError> {
        request.validate()?;
        self.sign_and_submit(
            &request.sender_seed,
            json!({
                "TransactionType": "OracleDelete",
                "OracleDocumentID": request.oracle_document_id,
            }),
        )
        .await
    }

    /// Look up a price oracle entry; absence is a valid outcome.
    #[instrument(skip(self))]
    pub async fn get_oracle(
        &self,
        address: &str,
        document_id: u32,
    ) -> Result<LedgerEntryResponse, AppError> {
        validation::validate_address(address).map_err(AppError::Validation)?;
        self.lookup_ledger_entry(json!({
            "oracle": {"account": address, "oracle_document_id": document_id},
            "ledger_index": "validated",
        }))
        .await
    }

    /// Create or update the account's DID document.
    #[instrument(skip(self, request))]
    pub async fn set_did(&self, request: &DidSetRequest) -> Result<SubmitResponse, AppError> {
        request.validate()?;
        if request.did_document.is_none() && request.uri.is_none() && request.data.is_none() {
            return Err(AppError::Validation(ValidationError::MissingParameter(
                "one of did_document, uri or data".to_string(),
            )));
        }

        let mut tx_json = json!({"TransactionType": "DIDSet"});
        let obj = tx_json
            .as_object_mut()
            .ok_or_else(|| AppError::Internal("tx_json is not an object".to_string()))?;
        if let Some(document) = &request.did_document {
            obj.insert(
                "DIDDocument".to_string(),
                json!(hex_upper(document.as_bytes())),
            );
        }
        if let Some(uri) = &request.uri {
            obj.insert("URI".to_string(), json!(hex_upper(uri.as_bytes())));
        }
        if let Some(data) = &request.data {
            obj.insert("Data".to_string(), json!(hex_upper(data.as_bytes())));
        }

        self.sign_and_submit(&request.sender_seed, tx_json).await
    }

    /// Delete the account's DID.
    #[instrument(skip(self, request))]
    pub async fn delete_did(&self, request: &DidDeleteRequest) -> Result<SubmitResponse, AppError> {
        request.validate()?;
        self.sign_and_submit(&request.sender_seed, json!({"TransactionType": "DIDDelete"}))
            .await
    }

    /// Look up an account's DID entry; absence is a valid outcome.
    #[instrument(skip(self))]
    pub async fn get_did(&self, address: &str) -> Result<LedgerEntryResponse, AppError> {
        validation::validate_address(address).map_err(AppError::Validation)?;
        self.lookup_ledger_entry(json!({
            "did": address,
            "ledger_index": "validated",
        }))
        .await
    }

    async fn lookup_ledger_entry(&self, params: Value) -> Result<LedgerEntryResponse, AppError> {
        match self.gateway.request("ledger_entry", params).await {
            Ok(result) => Ok(LedgerEntryResponse {
                found: true,
                entry: result.get("node").cloned().or(Some(result)),
            }),
            Err(AppError::Ledger(LedgerError::NotFound(_))) => Ok(LedgerEntryResponse {
                found: false,
                entry: None,
            }),
            Err(err) => Err(err),
        }
    }

    /// Summarize the latest validated ledger.
    #[instrument(skip(self))]
    pub async fn get_ledger_summary(&self) -> Result<LedgerSummary, AppError> {
        let result = self
            .gateway
            .request("ledger", json!({"ledger_index": "validated"}))
            .await?;

        let ledger = result.get("ledger").unwrap_or(&result);
        let ledger_hash = ledger
            .get("ledger_hash")
            .or_else(|| result.get("ledger_hash"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AppError::Ledger(LedgerError::MalformedResponse(
                    "ledger_hash missing from ledger result".to_string(),
                ))
            })?
            .to_string();
        let ledger_index = result
            .get("ledger_index")
            .and_then(Value::as_i64)
            .or_else(|| {
                ledger
                    .get("ledger_index")
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or(0);

        Ok(LedgerSummary {
            ledger_hash,
            ledger_index,
            close_time_iso: ledger
                .get("close_time_iso")
                .and_then(Value::as_str)
                .map(str::to_string),
            total_coins: ledger
                .get("total_coins")
                .and_then(Value::as_str)
                .map(str::to_string),
            validated: result
                .get("validated")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }

    /// Report current fee levels.
    #[instrument(skip(self))]
    pub async fn get_fee_info(&self) -> Result<FeeInfo, AppError> {
        let result = self.gateway.request("fee", json!({})).await?;
        let drops = result.get("drops").ok_or_else(|| {
            AppError::Ledger(LedgerError::MalformedResponse(
                "drops missing from fee result".to_string(),
            ))
        })?;

        let field = |key: &str| -> String {
            drops
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or("0")
                .to_string()
        };
        Ok(FeeInfo {
            base_fee_drops: field("base_fee"),
            open_ledger_fee_drops: field("open_ledger_fee"),
            median_fee_drops: field("median_fee"),
        })
    }
}
