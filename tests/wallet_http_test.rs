use std::time::Duration;
use httpmock::prelude::*;
use serde_json::json;
use walletsim::rpc::RpcWalletClient;
use walletsim::types::{Balance, FusionTransaction, StandardTransaction, Transfer};
use walletsim::{RpcError, Wallet, WalletError};
use walletsim::types::Endpoint;

fn client(server: &MockServer) -> RpcWalletClient {
    let endpoint = Endpoint::new(server.host(), server.port());
    RpcWalletClient::new(&endpoint, "pass", Duration::from_secs(5))
        .expect("Failed to build wallet client")
}

fn ok(result: serde_json::Value) -> serde_json::Value {
    json!({ "jsonrpc": "2.0", "id": "test", "result": result })
}

/// Tests a wallet's whole life over HTTP: initialize with reset, submit both kinds, refresh
#[tokio::test]
async fn test_wallet_lifecycle_over_json_rpc() {
    let server = MockServer::start_async().await;
    let addresses = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/json_rpc")
                .json_body_partial(r#"{"method": "getAddresses", "password": "pass"}"#);
            then.status(200)
                .json_body(ok(json!({ "addresses": ["addr-one", "addr-two"] })));
        })
        .await;
    let reset = server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc").json_body_partial(r#"{"method": "reset"}"#);
            then.status(200).json_body(ok(json!({})));
        })
        .await;
    let balance = server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc").json_body_partial(r#"{"method": "getBalance"}"#);
            then.status(200)
                .json_body(ok(json!({ "available_balance": 5_000_000u64, "locked_amount": 7u64 })));
        })
        .await;
    let send = server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc").json_body_partial(
                r#"{
                    "method": "sendTransaction",
                    "params": {
                        "transfers": [{ "address": "addr-b", "amount": 100 }],
                        "anonymity": 1,
                        "fee": 1,
                        "unlock_time": 0
                    }
                }"#,
            );
            then.status(200).json_body(ok(json!({ "transaction_hash": "aa" })));
        })
        .await;
    let fusion = server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc").json_body_partial(
                r#"{
                    "method": "sendFusionTransaction",
                    "params": { "threshold": 1000, "anonymity": 0 }
                }"#,
            );
            then.status(200).json_body(ok(json!({ "transaction_hash": "bb" })));
        })
        .await;

    let mut wallet = Wallet::initialize(client(&server), "wallet-a", true)
        .await
        .expect("Failed to initialize wallet");
    assert_eq!(wallet.address(), "addr-one");
    assert_eq!(wallet.balance(), Balance::new(5_000_000, 7));
    addresses.assert_async().await;
    reset.assert_async().await;

    let hash = wallet
        .submit_standard(&StandardTransaction {
            transfers: vec![Transfer { address: "addr-b".to_string(), amount: 100 }],
            anonymity: 1,
            fee: 1,
            unlock_time: 0,
        })
        .await
        .expect("sendTransaction failed");
    assert_eq!(hash, "aa");
    send.assert_async().await;

    let hash = wallet
        .submit_fusion(&FusionTransaction { threshold: 1000, anonymity: 0 })
        .await
        .expect("sendFusionTransaction failed");
    assert_eq!(hash, "bb");
    fusion.assert_async().await;

    wallet.refresh_balance().await.expect("getBalance failed");
    balance.assert_hits_async(2).await;
    assert_eq!(
        wallet.to_string(),
        "addr-one\n\tBalance\tAvailable '5.000000', Locked '0.000007', Total '5.000007'"
    );
}

/// Tests that an error envelope fails initialization even with a 200 status
#[tokio::test]
async fn test_error_envelope_fails_initialization() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": "test",
                "error": { "code": -32600, "message": "Invalid password" }
            }));
        })
        .await;

    let result = Wallet::initialize(client(&server), "wallet-a", false).await;
    match result.err() {
        Some(error @ WalletError::Rpc { .. }) => {
            assert!(error.is_service_rejection());
            assert!(error.to_string().contains("Invalid password"));
        }
        other => panic!("Expected an RPC error, got {:?}", other),
    }
}

/// Tests that a proxy error page on submission surfaces as a refusal, not a broken response
#[tokio::test]
async fn test_non_json_submission_answer_is_a_rejection() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc").json_body_partial(r#"{"method": "getAddresses"}"#);
            then.status(200).json_body(ok(json!({ "addresses": ["addr-one"] })));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc").json_body_partial(r#"{"method": "getBalance"}"#);
            then.status(200)
                .json_body(ok(json!({ "available_balance": 0u64, "locked_amount": 0u64 })));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/json_rpc")
                .json_body_partial(r#"{"method": "sendFusionTransaction"}"#);
            then.status(503).body("Service Unavailable");
        })
        .await;

    let wallet = Wallet::initialize(client(&server), "wallet-a", false)
        .await
        .expect("Failed to initialize wallet");
    let result = wallet
        .submit_fusion(&FusionTransaction { threshold: 10, anonymity: 0 })
        .await;
    match result {
        Err(error @ WalletError::Rpc { source: RpcError::MalformedBody { .. }, .. }) => {
            assert!(error.is_submission_rejection());
            assert!(!error.is_service_rejection());
        }
        other => panic!("Expected a malformed body, got {:?}", other),
    }
}
