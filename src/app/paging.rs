//! Marker-based pagination against the ledger node.
//!
//! Listing methods (`account_lines`, `account_offers`, `account_objects`,
//! `account_nfts`) return at most one node-side page per call plus an
//! opaque `marker` when more data exists. `drain_pages` follows markers
//! until the node stops returning one and accumulates every item in
//! ledger-returned order; slicing into client pages happens afterwards.

use serde_json::Value;
use tracing::instrument;

use crate::domain::error::{AppError, LedgerError};
use crate::domain::traits::LedgerGateway;

/// Upper bound on node-side pages followed per drain. A node that keeps
/// echoing markers would otherwise loop forever.
const MAX_DRAIN_PAGES: u32 = 512;

/// Drain every node-side page of a listing method.
///
/// `items_key` names the array field of the result to accumulate, e.g.
/// `"lines"` for `account_lines`.
#[instrument(skip(gateway, base_params))]
pub async fn drain_pages(
    gateway: &dyn LedgerGateway,
    method: &str,
    base_params: Value,
    items_key: &str,
) -> Result<Vec<Value>, AppError> {
    let mut items = Vec::new();
    let mut marker: Option<Value> = None;

    for _ in 0..MAX_DRAIN_PAGES {
        let mut params = base_params.clone();
        if let (Some(obj), Some(m)) = (params.as_object_mut(), marker.take()) {
            obj.insert("marker".to_string(), m);
        }

        let result = gateway.request(method, params).await?;

        let page = result.get(items_key).and_then(Value::as_array).ok_or_else(|| {
            AppError::Ledger(LedgerError::MalformedResponse(format!(
                "'{}' missing from {} result",
                items_key, method
            )))
        })?;
        items.extend(page.iter().cloned());

        match result.get("marker") {
            Some(m) if !m.is_null() => marker = Some(m.clone()),
            _ => return Ok(items),
        }
    }

    Err(AppError::Ledger(LedgerError::MalformedResponse(format!(
        "{} did not stop returning markers after {} pages",
        method, MAX_DRAIN_PAGES
    ))))
}
