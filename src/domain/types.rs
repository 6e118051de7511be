//! Domain types with validation support.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::error::DatabaseError;
use super::validation;

/// Diff type of a node inside transaction metadata
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum NodeDiffType {
    CreatedNode,
    ModifiedNode,
    DeletedNode,
}

impl NodeDiffType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedNode => "CreatedNode",
            Self::ModifiedNode => "ModifiedNode",
            Self::DeletedNode => "DeletedNode",
        }
    }
}

impl std::str::FromStr for NodeDiffType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CreatedNode" => Ok(Self::CreatedNode),
            "ModifiedNode" => Ok(Self::ModifiedNode),
            "DeletedNode" => Ok(Self::DeletedNode),
            _ => Err(format!("Invalid node diff type: {}", s)),
        }
    }
}

impl std::fmt::Display for NodeDiffType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Denormalized account state captured from an `account_info` response.
/// A new snapshot replaces the previous one for the same address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct AccountSnapshot {
    /// Classic account address
    #[schema(example = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh")]
    pub address: String,
    /// XRP balance in drops
    #[schema(example = 100_000_000)]
    pub balance_drops: i64,
    /// Next transaction sequence number
    pub sequence: i64,
    /// Number of objects the account owns in the ledger
    pub owner_count: i32,
    /// Raw account root flags
    pub flags: i64,
    /// Hash of the ledger version the data comes from
    pub ledger_hash: Option<String>,
    /// Index of the ledger version the data comes from
    pub ledger_index: i64,
    /// Whether the data comes from a validated ledger
    pub validated: bool,
    /// When this snapshot was taken
    pub fetched_at: DateTime<Utc>,
}

impl AccountSnapshot {
    /// Build a snapshot from an `account_info` result envelope.
    /// A missing required key aborts with [`DatabaseError::MissingKey`].
    pub fn from_envelope(result: &Value) -> Result<Self, DatabaseError> {
        let data = result
            .get("account_data")
            .ok_or_else(|| DatabaseError::MissingKey("account_data".to_string()))?;
        let address = require_str(data, "Account")?.to_string();
        let balance_drops = require_str(data, "Balance")?
            .parse::<i64>()
            .map_err(|_| DatabaseError::MissingKey("Balance".to_string()))?;
        let sequence = require_u64(data, "Sequence")? as i64;
        let owner_count = require_u64(data, "OwnerCount")? as i32;
        let flags = data.get("Flags").and_then(Value::as_i64).unwrap_or(0);
        let ledger_hash = result
            .get("ledger_hash")
            .and_then(Value::as_str)
            .map(str::to_string);
        let ledger_index = result
            .get("ledger_index")
            .or_else(|| result.get("ledger_current_index"))
            .and_then(Value::as_i64)
            .unwrap_or(0);
        let validated = result
            .get("validated")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        Ok(Self {
            address,
            balance_drops,
            sequence,
            owner_count,
            flags,
            ledger_hash,
            ledger_index,
            validated,
            fetched_at: Utc::now(),
        })
    }
}

/// Parent row of a persisted transaction envelope, keyed by hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TransactionRecord {
    /// Transaction hash (unique key, upsert target)
    #[schema(example = "E3FE6EA3D48F0C2B639448020EA4F03D4F4F8FFDB243A852A0F59177921B4879")]
    pub hash: String,
    /// Transaction type, e.g. "Payment" or "TrustSet"
    pub transaction_type: String,
    /// Sending account
    pub account: String,
    /// Engine result code reported by the node
    pub engine_result: Option<String>,
    /// Hash of the ledger that includes the transaction (if validated)
    pub ledger_hash: Option<String>,
    /// Index of the ledger that includes the transaction (if validated)
    pub ledger_index: Option<i64>,
    /// ISO close time of the including ledger
    pub close_time_iso: Option<String>,
    /// Whether the transaction is in a validated ledger
    pub validated: bool,
    /// The full tx_json as returned by the node
    #[schema(value_type = Object)]
    pub tx_json: Value,
    /// When this row was first written
    pub recorded_at: DateTime<Utc>,
    /// When this row was last upserted
    pub updated_at: DateTime<Utc>,
}

/// Child row: one entry of the envelope's `AffectedNodes` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct AffectedNode {
    pub node_type: NodeDiffType,
    /// Ledger entry type of the touched object, e.g. "AccountRoot"
    pub ledger_entry_type: String,
    /// Ledger index (object ID) of the touched object
    pub ledger_index: String,
    /// The raw node content
    #[schema(value_type = Object)]
    pub node_json: Value,
}

impl TransactionRecord {
    /// Build a parent record plus child nodes from a response envelope.
    ///
    /// Works for both `submit` envelopes (tx_json + engine_result, no
    /// metadata yet) and `tx` lookups (validated, with `meta`). A missing
    /// required key aborts the whole conversion so the store never writes
    /// a partial row.
    pub fn from_envelope(result: &Value) -> Result<(Self, Vec<AffectedNode>), DatabaseError> {
        let tx_json = result
            .get("tx_json")
            .or_else(|| result.get("tx"))
            .unwrap_or(result);

        let hash = tx_json
            .get("hash")
            .or_else(|| result.get("hash"))
            .and_then(Value::as_str)
            .ok_or_else(|| DatabaseError::MissingKey("hash".to_string()))?
            .to_string();
        let transaction_type = require_str(tx_json, "TransactionType")?.to_string();
        let account = require_str(tx_json, "Account")?.to_string();

        let engine_result = result
            .get("engine_result")
            .or_else(|| result.pointer("/meta/TransactionResult"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let ledger_hash = result
            .get("ledger_hash")
            .and_then(Value::as_str)
            .map(str::to_string);
        let ledger_index = result.get("ledger_index").and_then(Value::as_i64);
        let close_time_iso = result
            .get("close_time_iso")
            .and_then(Value::as_str)
            .map(str::to_string);
        let validated = result
            .get("validated")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let mut nodes = Vec::new();
        if let Some(affected) = result
            .pointer("/meta/AffectedNodes")
            .and_then(Value::as_array)
        {
            for entry in affected {
                let Some(obj) = entry.as_object() else {
                    return Err(DatabaseError::MissingKey("AffectedNodes".to_string()));
                };
                let (diff, node) = obj
                    .iter()
                    .next()
                    .ok_or_else(|| DatabaseError::MissingKey("AffectedNodes".to_string()))?;
                let node_type: NodeDiffType = diff
                    .parse()
                    .map_err(|_| DatabaseError::MissingKey(diff.clone()))?;
                let ledger_entry_type = require_str(node, "LedgerEntryType")?.to_string();
                let ledger_index = require_str(node, "LedgerIndex")?.to_string();
                nodes.push(AffectedNode {
                    node_type,
                    ledger_entry_type,
                    ledger_index,
                    node_json: node.clone(),
                });
            }
        }

        let now = Utc::now();
        let record = Self {
            hash,
            transaction_type,
            account,
            engine_result,
            ledger_hash,
            ledger_index,
            close_time_iso,
            validated,
            tx_json: tx_json.clone(),
            recorded_at: now,
            updated_at: now,
        };
        Ok((record, nodes))
    }
}

fn require_str<'a>(value: &'a Value, key: &str) -> Result<&'a str, DatabaseError> {
    value
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| DatabaseError::MissingKey(key.to_string()))
}

fn require_u64(value: &Value, key: &str) -> Result<u64, DatabaseError> {
    value
        .get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| DatabaseError::MissingKey(key.to_string()))
}

/// A freshly funded account returned by the faucet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FundedAccount {
    /// Classic address of the new account
    #[schema(example = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh")]
    pub address: String,
    /// Seed of the new account. Test-network faucets generate the key
    /// pair server-side; the seed goes back to the caller.
    #[schema(example = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb")]
    pub seed: String,
    /// Initial balance in drops, when the faucet reports it
    pub balance_drops: Option<i64>,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// An asset amount: XRP drops when `currency` is absent, an issued
/// currency amount otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssetAmount {
    /// Currency code; omit for XRP
    #[schema(example = "USD")]
    pub currency: Option<String>,
    /// Issuer address; required with `currency`
    pub issuer: Option<String>,
    /// Decimal value for issued currencies, drops for XRP
    #[validate(length(min = 1, message = "Value is required"))]
    #[schema(example = "100")]
    pub value: String,
}

impl AssetAmount {
    /// Render as a tx_json amount field.
    #[must_use]
    pub fn to_tx_value(&self) -> Value {
        match (&self.currency, &self.issuer) {
            (Some(currency), Some(issuer)) => serde_json::json!({
                "currency": currency,
                "issuer": issuer,
                "value": self.value,
            }),
            _ => Value::String(self.value.clone()),
        }
    }
}

/// Request to open or update a trust line via TrustSet
#[derive(Debug, Deserialize, ToSchema)]
pub struct TrustLineRequest {
    /// Seed of the account extending trust
    #[schema(value_type = String, example = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb")]
    pub sender_seed: SecretString,
    /// Issuer of the currency being trusted
    #[schema(example = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh")]
    pub issuer_address: String,
    /// Currency code (3-character or 40-character hex)
    #[schema(example = "USD")]
    pub currency_code: String,
    /// Trust line limit as a decimal string
    #[schema(example = "100")]
    pub limit: String,
}

/// Request to send a native XRP payment
#[derive(Debug, Deserialize, ToSchema)]
pub struct XrpPaymentRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    pub destination: String,
    /// Amount in drops (1 XRP = 1,000,000 drops)
    #[schema(example = 1_000_000)]
    pub amount_drops: u64,
    /// Optional destination tag
    pub destination_tag: Option<u32>,
}

/// Request to send a cross-currency payment (XRP in, issued currency out)
#[derive(Debug, Deserialize, ToSchema)]
pub struct CrossCurrencyPaymentRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    pub destination: String,
    pub currency_code: String,
    pub issuer_address: String,
    /// Issued-currency amount to deliver
    #[schema(example = "10")]
    pub amount: String,
    /// Maximum XRP to spend, in drops
    pub send_max_drops: u64,
}

/// Request to update account settings via AccountSet
#[derive(Debug, Deserialize, ToSchema)]
pub struct AccountSettingsRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    /// Account flag to set (asf value)
    pub set_flag: Option<u32>,
    /// Account flag to clear (asf value)
    pub clear_flag: Option<u32>,
    /// Domain to associate with the account
    pub domain: Option<String>,
}

/// Request to delete an account, sending the remaining XRP to a destination
#[derive(Debug, Deserialize, ToSchema)]
pub struct AccountDeleteRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    /// Account receiving the deleted account's remaining balance
    pub destination: String,
}

/// Request to black-hole an account (irreversibly disable its keys)
#[derive(Debug, Deserialize, ToSchema)]
pub struct BlackholeRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
}

/// Request to create an offer on the decentralized exchange
#[derive(Debug, Deserialize, ToSchema)]
pub struct OfferCreateRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    pub taker_gets: AssetAmount,
    pub taker_pays: AssetAmount,
}

/// Request to cancel an existing offer
#[derive(Debug, Deserialize, ToSchema)]
pub struct OfferCancelRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    /// Sequence number of the offer to cancel
    pub offer_sequence: u32,
}

/// Request to create an escrow
#[derive(Debug, Deserialize, ToSchema)]
pub struct EscrowCreateRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    pub destination: String,
    /// Escrowed amount in drops
    pub amount_drops: u64,
    /// Unix time after which the escrow can be finished
    pub finish_after: Option<i64>,
    /// Unix time after which the escrow can be cancelled
    pub cancel_after: Option<i64>,
}

/// Request to finish a held escrow
#[derive(Debug, Deserialize, ToSchema)]
pub struct EscrowFinishRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    /// Account that created the escrow
    pub owner: String,
    /// Sequence number of the EscrowCreate transaction
    pub offer_sequence: u32,
}

/// Request to cancel an expired escrow
#[derive(Debug, Deserialize, ToSchema)]
pub struct EscrowCancelRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    pub owner: String,
    pub offer_sequence: u32,
}

/// Request to mint an NFToken
#[derive(Debug, Deserialize, ToSchema)]
pub struct NftMintRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    /// URI pointing at the token data (stored hex-encoded on ledger)
    #[schema(example = "https://example.com/nft.json")]
    pub uri: Option<String>,
    /// Arbitrary taxon grouping tokens into collections
    #[serde(default)]
    pub taxon: u32,
    /// Whether the minted token can be transferred
    #[serde(default = "default_true")]
    pub transferable: bool,
}

fn default_true() -> bool {
    true
}

/// Request to burn an NFToken
#[derive(Debug, Deserialize, ToSchema)]
pub struct NftBurnRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    /// ID of the token to burn (64 hex characters)
    pub nftoken_id: String,
}

/// One price entry of an oracle's data series
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OraclePrice {
    #[validate(length(min = 1, message = "Base asset is required"))]
    #[schema(example = "XRP")]
    pub base_asset: String,
    #[validate(length(min = 1, message = "Quote asset is required"))]
    #[schema(example = "USD")]
    pub quote_asset: String,
    /// Price scaled by 10^scale
    pub asset_price: u64,
    /// Decimal scale of the price
    #[serde(default)]
    pub scale: u8,
}

/// Request to create or update a price oracle via OracleSet
#[derive(Debug, Deserialize, ToSchema)]
pub struct OracleSetRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    /// Oracle document ID, unique per owner account
    pub oracle_document_id: u32,
    /// Oracle provider identifier
    #[schema(example = "provider")]
    pub provider: String,
    /// Asset class, e.g. "currency"
    #[schema(example = "currency")]
    pub asset_class: String,
    /// Price entries; at most ten per oracle
    pub prices: Vec<OraclePrice>,
    /// Unix time of the reading; defaults to now
    pub last_update_time: Option<i64>,
}

/// Request to delete a price oracle
#[derive(Debug, Deserialize, ToSchema)]
pub struct OracleDeleteRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    pub oracle_document_id: u32,
}

/// Request to create or update a DID document via DIDSet
#[derive(Debug, Deserialize, ToSchema)]
pub struct DidSetRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
    /// DID document content (stored hex-encoded)
    pub did_document: Option<String>,
    /// URI pointing at the DID document
    pub uri: Option<String>,
    /// Attestation data
    pub data: Option<String>,
}

/// Request to delete the account's DID
#[derive(Debug, Deserialize, ToSchema)]
pub struct DidDeleteRequest {
    #[schema(value_type = String)]
    pub sender_seed: SecretString,
}

/// Page slicing parameters for drained listings
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PageParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[schema(example = 1)]
    pub page: u32,
    /// Items per page (1-100, default: 20)
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[schema(example = 20)]
    pub page_size: u32,
    /// Ledger object type filter, only used by the objects listing
    pub object_type: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            object_type: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Outcome of a drained, sliced listing. An empty result set is its own
/// variant, distinct from a populated page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PagedOutcome {
    Empty {
        /// Human-readable "no items" message
        #[schema(example = "No trust lines found")]
        message: String,
    },
    Page {
        /// The requested slice, in ledger-returned order
        #[schema(value_type = Vec<Object>)]
        items: Vec<Value>,
        /// 1-based page number that was requested
        page: u32,
        /// Page size that was applied
        page_size: u32,
        /// Total number of items across all drained pages
        total_items: usize,
        /// Total number of pages at this page size
        total_pages: u32,
    },
}

impl PagedOutcome {
    /// Build an outcome from the full drained item list.
    #[must_use]
    pub fn slice(items: &[Value], params: &PageParams, empty_message: &str) -> Self {
        if items.is_empty() {
            return Self::Empty {
                message: empty_message.to_string(),
            };
        }
        let page_size = params.page_size as usize;
        let total_items = items.len();
        let total_pages = total_items.div_ceil(page_size) as u32;
        let start = (params.page as usize - 1).saturating_mul(page_size);
        let slice = items
            .iter()
            .skip(start)
            .take(page_size)
            .cloned()
            .collect::<Vec<_>>();
        Self::Page {
            items: slice,
            page: params.page,
            page_size: params.page_size,
            total_items,
            total_pages,
        }
    }
}

/// Response for a signed submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    /// Account that signed the transaction
    pub account: String,
    /// Transaction type that was submitted
    #[schema(example = "Payment")]
    pub transaction_type: String,
    /// Engine result code, always in the success family here
    #[schema(example = "tesSUCCESS")]
    pub engine_result: String,
    /// Hash of the submitted transaction, when reported
    pub hash: Option<String>,
    /// Raw submit result from the node
    #[schema(value_type = Object)]
    pub result: Value,
}

/// Response for the trust-line endpoint; echoes the request essentials
/// alongside the raw node result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrustLineResponse {
    /// Account that extended the trust line
    pub account: String,
    /// Currency the line is denominated in
    #[schema(example = "USD")]
    pub currency: String,
    /// Limit that was set
    #[schema(example = "100")]
    pub limit: String,
    /// Raw TrustSet submit result from the node
    #[schema(value_type = Object)]
    pub result: Value,
}

/// Response for an account-info fetch
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountInfoResponse {
    pub snapshot: AccountSnapshot,
    /// Raw account_info result from the node
    #[schema(value_type = Object)]
    pub result: Value,
}

/// Response for a transaction lookup
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub record: TransactionRecord,
    /// Number of affected-node child rows persisted with the record
    pub affected_node_count: usize,
    /// Raw tx result from the node
    #[schema(value_type = Object)]
    pub result: Value,
}

/// Response for a ledger-entry lookup where absence is a valid outcome
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LedgerEntryResponse {
    /// Whether the entry exists in the validated ledger
    pub found: bool,
    /// The entry content when found
    #[schema(value_type = Object)]
    pub entry: Option<Value>,
}

/// Summary of the latest validated ledger
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LedgerSummary {
    pub ledger_hash: String,
    pub ledger_index: i64,
    pub close_time_iso: Option<String>,
    pub total_coins: Option<String>,
    pub validated: bool,
}

/// Current fee levels reported by the node
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeeInfo {
    /// Minimum cost of a reference transaction, in drops
    #[schema(example = "10")]
    pub base_fee_drops: String,
    /// Fee to get into the current open ledger, in drops
    pub open_ledger_fee_drops: String,
    /// Median fee of the last validated ledger, in drops
    pub median_fee_drops: String,
}

/// Health status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// Some systems degraded but functional
    Degraded,
    /// Critical systems unavailable
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system status
    pub status: HealthStatus,
    /// Database health status
    pub database: HealthStatus,
    /// Ledger node health status
    pub ledger: HealthStatus,
    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
    /// Application version
    #[schema(example = "0.1.0")]
    pub version: String,
}

impl HealthResponse {
    #[must_use]
    pub fn new(database: HealthStatus, ledger: HealthStatus) -> Self {
        let status = match (&database, &ledger) {
            (HealthStatus::Healthy, HealthStatus::Healthy) => HealthStatus::Healthy,
            (HealthStatus::Unhealthy, _) | (_, HealthStatus::Unhealthy) => HealthStatus::Unhealthy,
            _ => HealthStatus::Degraded,
        };
        Self {
            status,
            database,
            ledger,
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Error type identifier
    #[schema(example = "validation_error")]
    pub r#type: String,
    /// Human-readable error message
    #[schema(example = "Invalid XRPL address")]
    pub message: String,
}

/// Rate limit exceeded response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RateLimitResponse {
    /// Error details
    pub error: ErrorDetail,
    /// Seconds until rate limit resets
    #[schema(example = 60)]
    pub retry_after: u64,
}
