//! Service-level integration tests against mock infrastructure.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::{Value, json};

use xrpl_ledger_relay::app::AppService;
use xrpl_ledger_relay::config::LedgerConfig;
use xrpl_ledger_relay::domain::{
    AppError, LedgerError,
    types::{PageParams, PagedOutcome, XrpPaymentRequest},
};
use xrpl_ledger_relay::test_utils::{MockFaucetClient, MockLedgerGateway, MockLedgerStore};

const TEST_SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";
const TEST_ADDRESS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const TEST_HASH: &str = "E3FE6EA3D48F0C2B639448020EA4F03D4F4F8FFDB243A852A0F59177921B4879";

struct TestHarness {
    gateway: Arc<MockLedgerGateway>,
    store: Arc<MockLedgerStore>,
    service: AppService,
}

fn harness() -> TestHarness {
    let gateway = Arc::new(MockLedgerGateway::new());
    let store = Arc::new(MockLedgerStore::new());
    let service = AppService::new(
        Arc::clone(&gateway) as _,
        Arc::new(MockFaucetClient::new()) as _,
        Arc::clone(&store) as _,
        LedgerConfig::testnet_defaults(),
    );
    TestHarness {
        gateway,
        store,
        service,
    }
}

fn payment_request(amount_drops: u64) -> XrpPaymentRequest {
    XrpPaymentRequest {
        sender_seed: SecretString::from(TEST_SEED),
        destination: TEST_ADDRESS.to_string(),
        amount_drops,
        destination_tag: None,
    }
}

fn lines_page(range: std::ops::Range<u32>, marker: Option<&str>) -> Value {
    let lines: Vec<Value> = range.map(|i| json!({"seq": i})).collect();
    match marker {
        Some(m) => json!({"lines": lines, "marker": m}),
        None => json!({"lines": lines}),
    }
}

#[tokio::test]
async fn test_listing_drains_all_node_pages_before_slicing() {
    let h = harness();
    h.gateway.push_response(Ok(lines_page(0..100, Some("m1"))));
    h.gateway.push_response(Ok(lines_page(100..200, Some("m2"))));
    h.gateway.push_response(Ok(lines_page(200..300, None)));

    let params = PageParams {
        page: 2,
        page_size: 100,
        object_type: None,
    };
    let outcome = h
        .service
        .list_trust_lines(TEST_ADDRESS, &params)
        .await
        .unwrap();

    match outcome {
        PagedOutcome::Page {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        } => {
            assert_eq!(page, 2);
            assert_eq!(page_size, 100);
            assert_eq!(total_items, 300);
            assert_eq!(total_pages, 3);
            assert_eq!(items.len(), 100);
            // Ledger-returned order is preserved across drained pages.
            assert_eq!(items[0]["seq"], 100);
            assert_eq!(items[99]["seq"], 199);
        }
        PagedOutcome::Empty { .. } => panic!("expected a populated page"),
    }

    // Three node calls, markers echoed back on the follow-ups.
    let calls = h.gateway.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|(method, _)| method == "account_lines"));
    assert!(calls[0].1.get("marker").is_none());
    assert_eq!(calls[1].1["marker"], "m1");
    assert_eq!(calls[2].1["marker"], "m2");
}

#[tokio::test]
async fn test_listing_page_past_the_end_is_empty_but_counted() {
    let h = harness();
    h.gateway.push_response(Ok(lines_page(0..5, None)));

    let params = PageParams {
        page: 3,
        page_size: 20,
        object_type: None,
    };
    let outcome = h
        .service
        .list_trust_lines(TEST_ADDRESS, &params)
        .await
        .unwrap();

    match outcome {
        PagedOutcome::Page {
            items,
            total_items,
            total_pages,
            ..
        } => {
            assert!(items.is_empty());
            assert_eq!(total_items, 5);
            assert_eq!(total_pages, 1);
        }
        PagedOutcome::Empty { .. } => panic!("expected a populated outcome"),
    }
}

#[tokio::test]
async fn test_successful_payment_is_classified_and_recorded() {
    let h = harness();
    h.gateway
        .push_submit_result("Payment", "tesSUCCESS", TEST_HASH);

    let response = h
        .service
        .send_payment(&payment_request(1_000_000))
        .await
        .unwrap();

    assert_eq!(response.engine_result, "tesSUCCESS");
    assert_eq!(response.transaction_type, "Payment");
    assert_eq!(response.hash.as_deref(), Some(TEST_HASH));

    let stored = h.store.stored_transactions();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].0.hash, TEST_HASH);
}

#[tokio::test]
async fn test_known_engine_rejection_uses_table_message() {
    let h = harness();
    h.gateway
        .push_submit_result("Payment", "tecUNFUNDED", TEST_HASH);

    let err = h
        .service
        .send_payment(&payment_request(1_000_000))
        .await
        .unwrap_err();

    match err {
        AppError::Ledger(LedgerError::EngineResult { code, message }) => {
            assert_eq!(code, "tecUNFUNDED");
            assert_eq!(
                message,
                "The account is unfunded and cannot perform the operation."
            );
        }
        other => panic!("expected EngineResult, got {other:?}"),
    }
    assert!(h.store.stored_transactions().is_empty());
}

#[tokio::test]
async fn test_unknown_engine_code_falls_back_to_node_message() {
    let h = harness();
    h.gateway.push_response(Ok(json!({
        "engine_result": "zzFAKE_CODE",
        "engine_result_message": "Something novel went wrong.",
        "tx_json": {"TransactionType": "Payment", "Account": TEST_ADDRESS, "hash": TEST_HASH},
    })));

    let err = h
        .service
        .send_payment(&payment_request(1_000_000))
        .await
        .unwrap_err();

    match err {
        AppError::Ledger(LedgerError::EngineResult { code, message }) => {
            assert_eq!(code, "zzFAKE_CODE");
            assert_eq!(message, "Something novel went wrong.");
        }
        other => panic!("expected EngineResult, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure_is_retried_then_succeeds() {
    let h = harness();
    h.gateway.push_response(Err(AppError::Ledger(LedgerError::Timeout(
        "deadline exceeded".to_string(),
    ))));
    h.gateway
        .push_submit_result("Payment", "tesSUCCESS", TEST_HASH);

    let response = h
        .service
        .send_payment(&payment_request(1_000_000))
        .await
        .unwrap();

    assert_eq!(response.engine_result, "tesSUCCESS");
    assert_eq!(h.gateway.call_count(), 2);
}

#[tokio::test]
async fn test_rpc_rejection_is_not_retried() {
    let h = harness();
    h.gateway.push_response(Err(AppError::Ledger(LedgerError::Rpc {
        code: "invalidParams".to_string(),
        message: "bad transaction".to_string(),
    })));

    let err = h
        .service
        .send_payment(&payment_request(1_000_000))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Ledger(LedgerError::Rpc { .. })));
    assert_eq!(h.gateway.call_count(), 1);
}

#[tokio::test]
async fn test_missing_engine_result_is_malformed_and_not_recorded() {
    let h = harness();
    h.gateway.push_response(Ok(json!({
        "tx_json": {"TransactionType": "Payment", "Account": TEST_ADDRESS, "hash": TEST_HASH},
    })));

    let err = h
        .service
        .send_payment(&payment_request(1_000_000))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Ledger(LedgerError::MalformedResponse(_))
    ));
    assert!(h.store.stored_transactions().is_empty());
}

#[tokio::test]
async fn test_blackhole_sets_regular_key_then_disables_master() {
    use xrpl_ledger_relay::domain::types::BlackholeRequest;

    let h = harness();
    h.gateway
        .push_submit_result("SetRegularKey", "tesSUCCESS", TEST_HASH);
    h.gateway.push_submit_result(
        "AccountSet",
        "tesSUCCESS",
        "AA11223344556677889900AABBCCDDEEFF00112233445566778899AABBCCDDEE",
    );

    let request = BlackholeRequest {
        sender_seed: SecretString::from(TEST_SEED),
    };
    let response = h.service.blackhole_account(&request).await.unwrap();
    assert_eq!(response.engine_result, "tesSUCCESS");

    let calls = h.gateway.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1["TransactionType"], "SetRegularKey");
    assert_eq!(calls[0].1["RegularKey"], "rrrrrrrrrrrrrrrrrrrrBZbvji");
    assert_eq!(calls[1].1["TransactionType"], "AccountSet");
    assert_eq!(calls[1].1["SetFlag"], 4);
}

#[tokio::test]
async fn test_oracle_lookup_not_found_is_a_valid_outcome() {
    let h = harness();
    h.gateway.push_response(Err(AppError::Ledger(LedgerError::NotFound(
        "entryNotFound".to_string(),
    ))));

    let response = h.service.get_oracle(TEST_ADDRESS, 1).await.unwrap();
    assert!(!response.found);
    assert!(response.entry.is_none());
}
