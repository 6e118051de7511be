//! Integration tests for specific request flows through the router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use xrpl_ledger_relay::api::create_router;
use xrpl_ledger_relay::app::AppState;
use xrpl_ledger_relay::config::LedgerConfig;
use xrpl_ledger_relay::test_utils::{
    MockFaucetClient, MockLedgerGateway, MockLedgerStore,
    mocks::MOCK_DERIVED_ADDRESS,
};

/// The documented test seed for the genesis account.
const TEST_SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";
/// A well-known classic address with a valid checksum.
const TEST_ISSUER: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const TEST_HASH: &str = "E3FE6EA3D48F0C2B639448020EA4F03D4F4F8FFDB243A852A0F59177921B4879";

struct TestHarness {
    gateway: Arc<MockLedgerGateway>,
    store: Arc<MockLedgerStore>,
    state: Arc<AppState>,
}

fn harness() -> TestHarness {
    harness_with_config(LedgerConfig::testnet_defaults())
}

fn harness_with_config(config: LedgerConfig) -> TestHarness {
    let gateway = Arc::new(MockLedgerGateway::new());
    let store = Arc::new(MockLedgerStore::new());
    let faucet = Arc::new(MockFaucetClient::new());
    let state = Arc::new(AppState::new(
        Arc::clone(&gateway) as _,
        faucet as _,
        Arc::clone(&store) as _,
        config,
    ));
    TestHarness {
        gateway,
        store,
        state,
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_trust_line_flow_submits_and_records() {
    let h = harness();
    h.gateway
        .push_submit_result("TrustSet", "tesSUCCESS", TEST_HASH);
    let router = create_router(Arc::clone(&h.state));

    let response = router
        .oneshot(post_json(
            "/trustlines",
            json!({
                "sender_seed": TEST_SEED,
                "issuer_address": TEST_ISSUER,
                "currency_code": "USD",
                "limit": "100",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["account"], MOCK_DERIVED_ADDRESS);
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["limit"], "100");
    assert_eq!(body["result"]["engine_result"], "tesSUCCESS");

    // The submitted tx_json carries the derived account and the flat fee.
    let calls = h.gateway.calls();
    assert_eq!(calls.len(), 1);
    let (method, tx) = &calls[0];
    assert_eq!(method, "submit");
    assert_eq!(tx["TransactionType"], "TrustSet");
    assert_eq!(tx["Account"], MOCK_DERIVED_ADDRESS);
    assert_eq!(tx["Fee"], "10");
    assert_eq!(tx["LimitAmount"]["currency"], "USD");
    assert_eq!(tx["LimitAmount"]["issuer"], TEST_ISSUER);
    assert_eq!(tx["LimitAmount"]["value"], "100");

    // The accepted transaction was recorded with its hash.
    let stored = h.store.stored_transactions();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].0.hash, TEST_HASH);
}

#[tokio::test]
async fn test_invalid_seed_rejected_before_any_node_call() {
    let h = harness();
    let router = create_router(Arc::clone(&h.state));

    let response = router
        .oneshot(post_json(
            "/trustlines",
            json!({
                "sender_seed": "not-a-seed",
                "issuer_address": TEST_ISSUER,
                "currency_code": "USD",
                "limit": "100",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "validation_error");

    assert_eq!(h.gateway.call_count(), 0);
    assert!(h.store.stored_transactions().is_empty());
}

#[tokio::test]
async fn test_missing_seed_rejected_before_any_node_call() {
    let h = harness();
    let router = create_router(Arc::clone(&h.state));

    // No sender_seed at all: the body is rejected during deserialization,
    // before validation or any outbound call.
    let response = router
        .oneshot(post_json(
            "/trustlines",
            json!({
                "issuer_address": TEST_ISSUER,
                "currency_code": "USD",
                "limit": "100",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(h.gateway.call_count(), 0);
    assert!(h.store.stored_transactions().is_empty());
}

#[tokio::test]
async fn test_payment_with_invalid_destination_is_rejected() {
    let h = harness();
    let router = create_router(Arc::clone(&h.state));

    let response = router
        .oneshot(post_json(
            "/payments",
            json!({
                "sender_seed": TEST_SEED,
                "destination": "not-an-address",
                "amount_drops": 1_000_000,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.gateway.call_count(), 0);
}

#[tokio::test]
async fn test_engine_rejection_maps_to_unprocessable_entity() {
    let h = harness();
    h.gateway
        .push_submit_result("Payment", "tecUNFUNDED_PAYMENT", TEST_HASH);
    let router = create_router(Arc::clone(&h.state));

    let response = router
        .oneshot(post_json(
            "/payments",
            json!({
                "sender_seed": TEST_SEED,
                "destination": TEST_ISSUER,
                "amount_drops": 1_000_000,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "transaction_rejected");

    // A rejected submission must not be recorded.
    assert!(h.store.stored_transactions().is_empty());
}

#[tokio::test]
async fn test_get_transaction_records_affected_nodes() {
    let h = harness();
    h.gateway.push_response(Ok(json!({
        "hash": TEST_HASH,
        "ledger_index": 95_000_000,
        "validated": true,
        "tx_json": {
            "TransactionType": "Payment",
            "Account": TEST_ISSUER,
            "hash": TEST_HASH,
        },
        "meta": {
            "TransactionResult": "tesSUCCESS",
            "AffectedNodes": [
                {"ModifiedNode": {"LedgerEntryType": "AccountRoot", "LedgerIndex": "ABC123"}},
                {"CreatedNode": {"LedgerEntryType": "RippleState", "LedgerIndex": "DEF456"}},
            ],
        },
    })));
    let router = create_router(Arc::clone(&h.state));

    let response = router
        .oneshot(get(&format!("/transactions/{TEST_HASH}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["record"]["hash"], TEST_HASH);
    assert_eq!(body["record"]["engine_result"], "tesSUCCESS");
    assert_eq!(body["affected_node_count"], 2);

    let stored = h.store.stored_transactions();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].1, 2);
}

#[tokio::test]
async fn test_get_transaction_rejects_malformed_hash() {
    let h = harness();
    let router = create_router(Arc::clone(&h.state));

    let response = router
        .oneshot(get("/transactions/nothexatall"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.gateway.call_count(), 0);
}

#[tokio::test]
async fn test_get_account_persists_snapshot() {
    let h = harness();
    h.gateway.push_response(Ok(json!({
        "account_data": {
            "Account": TEST_ISSUER,
            "Balance": "100000000",
            "Sequence": 42,
            "OwnerCount": 3,
            "Flags": 0,
        },
        "ledger_hash": "L1",
        "ledger_index": 95_000_000,
        "validated": true,
    })));
    let router = create_router(Arc::clone(&h.state));

    let response = router
        .oneshot(get(&format!("/accounts/{TEST_ISSUER}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["snapshot"]["address"], TEST_ISSUER);
    assert_eq!(body["snapshot"]["balance_drops"], 100_000_000);

    let snapshots = h.store.snapshots();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].sequence, 42);
}

#[tokio::test]
async fn test_create_account_uses_faucet() {
    let h = harness();
    // The account is funded but not yet in a validated ledger, so the
    // follow-up lookup finds nothing and no snapshot is recorded.
    h.gateway.push_response(Err(
        xrpl_ledger_relay::domain::LedgerError::NotFound("actNotFound".to_string()).into(),
    ));
    let router = create_router(Arc::clone(&h.state));

    let response = router.oneshot(post_json("/accounts", json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["address"].as_str().unwrap().starts_with('r'));
    assert!(body["seed"].is_string());
    assert!(h.store.snapshots().is_empty());
}

#[tokio::test]
async fn test_create_account_persists_initial_snapshot() {
    let h = harness();
    h.gateway.push_response(Ok(json!({
        "account_data": {
            "Account": "rNewlyFundedAccount111111111111111",
            "Balance": "10000000",
            "Sequence": 1,
            "OwnerCount": 0,
            "Flags": 0,
        },
        "ledger_index": 95_000_000,
        "validated": true,
    })));
    let router = create_router(Arc::clone(&h.state));

    let response = router.oneshot(post_json("/accounts", json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let calls = h.gateway.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "account_info");
    assert_eq!(calls[0].1["account"], "rNewlyFundedAccount111111111111111");

    let snapshots = h.store.snapshots();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].address, "rNewlyFundedAccount111111111111111");
    assert_eq!(snapshots[0].balance_drops, 10_000_000);
}

#[tokio::test]
async fn test_create_account_without_faucet_is_not_implemented() {
    let mut config = LedgerConfig::testnet_defaults();
    config.faucet_url = None;
    let h = harness_with_config(config);
    let router = create_router(Arc::clone(&h.state));

    let response = router.oneshot(post_json("/accounts", json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_health_endpoints() {
    let h = harness();
    let router = create_router(Arc::clone(&h.state));

    let response = router.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");

    let response = router.clone().oneshot(get("/health/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router.clone().oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_fails_when_database_is_down() {
    let h = harness();
    h.store.set_healthy(false);
    let router = create_router(Arc::clone(&h.state));

    let response = router.oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let h = harness();
    let router = create_router(Arc::clone(&h.state));

    let response = router.oneshot(get("/no-such-route")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_trust_lines_empty_returns_message() {
    let h = harness();
    h.gateway.push_response(Ok(json!({"lines": []})));
    let router = create_router(Arc::clone(&h.state));

    let response = router
        .oneshot(get(&format!("/accounts/{TEST_ISSUER}/lines")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "No trust lines found");
}

#[tokio::test]
async fn test_ledger_unavailable_maps_to_bad_gateway_family() {
    let h = harness();
    h.gateway.push_response(Err(
        xrpl_ledger_relay::domain::LedgerError::Connection("refused".to_string()).into(),
    ));
    let router = create_router(Arc::clone(&h.state));

    let response = router.oneshot(get("/ledger")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "ledger_error");
}
