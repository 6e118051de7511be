//! HTTP-based integration tests for the JSON-RPC gateway and the faucet
//! client, using `wiremock` to stand in for the node and the faucet.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xrpl_ledger_relay::config::LedgerConfig;
use xrpl_ledger_relay::domain::{
    AppError, ExternalServiceError, FaucetClient, LedgerError, LedgerGateway,
};
use xrpl_ledger_relay::infra::{HttpFaucetClient, JsonRpcGateway};

const TEST_SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";

fn gateway_for(server: &MockServer) -> JsonRpcGateway {
    let mut config = LedgerConfig::testnet_defaults();
    config.json_rpc_url = server.uri();
    JsonRpcGateway::new(&config).unwrap()
}

mod jsonrpc_gateway_tests {
    use super::*;

    #[tokio::test]
    async fn test_request_unwraps_result_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "account_info"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "status": "success",
                    "account_data": {"Account": "rSomebody", "Balance": "1000"},
                    "validated": true,
                }
            })))
            .mount(&mock_server)
            .await;

        let gateway = gateway_for(&mock_server);
        let result = gateway
            .request("account_info", json!({"account": "rSomebody"}))
            .await
            .unwrap();

        assert_eq!(result["account_data"]["Balance"], "1000");
        assert_eq!(result["validated"], true);
    }

    #[tokio::test]
    async fn test_request_wraps_params_in_array() {
        let mock_server = MockServer::start().await;

        // The node expects {"method": m, "params": [obj]}.
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "ledger",
                "params": [{"ledger_index": "validated"}],
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": {"status": "success"}})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = gateway_for(&mock_server);
        gateway
            .request("ledger", json!({"ledger_index": "validated"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_node_error_becomes_rpc_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "status": "error",
                    "error": "invalidParams",
                    "error_message": "Missing field 'account'.",
                }
            })))
            .mount(&mock_server)
            .await;

        let gateway = gateway_for(&mock_server);
        let err = gateway.request("account_info", json!({})).await.unwrap_err();

        match err {
            AppError::Ledger(LedgerError::Rpc { code, message }) => {
                assert_eq!(code, "invalidParams");
                assert_eq!(message, "Missing field 'account'.");
            }
            other => panic!("expected Rpc error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_not_found_sentinels_become_not_found() {
        for sentinel in ["actNotFound", "entryNotFound", "txnNotFound", "lgrNotFound"] {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "result": {"status": "error", "error": sentinel}
                })))
                .mount(&mock_server)
                .await;

            let gateway = gateway_for(&mock_server);
            let err = gateway
                .request("account_info", json!({"account": "rNobody"}))
                .await
                .unwrap_err();

            match err {
                AppError::Ledger(LedgerError::NotFound(code)) => assert_eq!(code, sentinel),
                other => panic!("expected NotFound for {sentinel}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_http_error_status_becomes_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let gateway = gateway_for(&mock_server);
        let err = gateway.request("server_info", json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::Ledger(LedgerError::Http(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let gateway = gateway_for(&mock_server);
        let err = gateway.request("server_info", json!({})).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_result_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"forwarded": true})))
            .mount(&mock_server)
            .await;

        let gateway = gateway_for(&mock_server);
        let err = gateway.request("server_info", json!({})).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_sends_secret_and_tx_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "submit",
                "params": [{
                    "secret": TEST_SEED,
                    "tx_json": {"TransactionType": "Payment"},
                }],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "status": "success",
                    "engine_result": "tesSUCCESS",
                    "tx_json": {"TransactionType": "Payment", "hash": "AB12"},
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = gateway_for(&mock_server);
        let seed = SecretString::from(TEST_SEED);
        let result = gateway
            .submit(&seed, json!({"TransactionType": "Payment"}))
            .await
            .unwrap();

        assert_eq!(result["engine_result"], "tesSUCCESS");
    }

    #[tokio::test]
    async fn test_derive_account_uses_wallet_propose() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "wallet_propose",
                "params": [{"seed": TEST_SEED}],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "status": "success",
                    "account_id": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
                }
            })))
            .mount(&mock_server)
            .await;

        let gateway = gateway_for(&mock_server);
        let seed = SecretString::from(TEST_SEED);
        let address = gateway.derive_account(&seed).await.unwrap();
        assert_eq!(address, "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
    }

    #[tokio::test]
    async fn test_derive_account_without_account_id_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": {"status": "success"}})),
            )
            .mount(&mock_server)
            .await;

        let gateway = gateway_for(&mock_server);
        let seed = SecretString::from(TEST_SEED);
        let err = gateway.derive_account(&seed).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_health_check_calls_server_info() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"method": "server_info"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": {"status": "success", "info": {}}})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = gateway_for(&mock_server);
        gateway.health_check().await.unwrap();
    }
}

mod faucet_client_tests {
    use super::*;
    use std::time::Duration;

    fn faucet_for(server: &MockServer) -> HttpFaucetClient {
        HttpFaucetClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fund_new_account_parses_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "account": {
                    "address": "rNewAccount1234567890",
                    "seed": "sEdSomeSeed",
                },
                "amount": 10,
            })))
            .mount(&mock_server)
            .await;

        let faucet = faucet_for(&mock_server);
        let account = faucet.fund_new_account().await.unwrap();

        assert_eq!(account.address, "rNewAccount1234567890");
        assert_eq!(account.seed, "sEdSomeSeed");
        // Faucets report whole XRP; the client stores drops.
        assert_eq!(account.balance_drops, Some(10_000_000));
    }

    #[tokio::test]
    async fn test_fund_new_account_accepts_alternate_field_names() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "account": {
                    "classicAddress": "rAltSpelling111",
                    "secret": "sAltSeed",
                },
            })))
            .mount(&mock_server)
            .await;

        let faucet = faucet_for(&mock_server);
        let account = faucet.fund_new_account().await.unwrap();

        assert_eq!(account.address, "rAltSpelling111");
        assert_eq!(account.seed, "sAltSeed");
        assert_eq!(account.balance_drops, None);
    }

    #[tokio::test]
    async fn test_fund_new_account_drops_overflowing_amount() {
        let mock_server = MockServer::start().await;

        // An absurd XRP amount would overflow the drops conversion; the
        // balance is dropped rather than wrapped.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "account": {
                    "address": "rOverflow111",
                    "seed": "sEdOverflowSeed",
                },
                "amount": i64::MAX,
            })))
            .mount(&mock_server)
            .await;

        let faucet = faucet_for(&mock_server);
        let account = faucet.fund_new_account().await.unwrap();
        assert_eq!(account.balance_drops, None);
    }

    #[tokio::test]
    async fn test_faucet_http_error_is_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let faucet = faucet_for(&mock_server);
        let err = faucet.fund_new_account().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ExternalService(ExternalServiceError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_faucet_response_without_seed_is_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "account": {"address": "rNoSeed"},
            })))
            .mount(&mock_server)
            .await;

        let faucet = faucet_for(&mock_server);
        let err = faucet.fund_new_account().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ExternalService(ExternalServiceError::HttpError(_))
        ));
    }
}
