use std::time::Duration;
use httpmock::prelude::*;
use serde_json::json;
use crate::rpc::{
    BlockExplorer, ExplorerClient, RpcError, RpcWalletClient, SendFusionTransactionParams,
    SendTransactionParams, TransferOrder, WalletService,
};
use crate::types::Endpoint;

const TIMEOUT: Duration = Duration::from_secs(5);

fn wallet_client(server: &MockServer) -> RpcWalletClient {
    let endpoint = Endpoint::new(server.host(), server.port());
    RpcWalletClient::new(&endpoint, "secret", TIMEOUT).expect("Failed to build wallet client")
}

fn transaction_params() -> SendTransactionParams {
    SendTransactionParams {
        transfers: vec![TransferOrder {
            address: "receiver".to_string(),
            amount: 100,
        }],
        anonymity: 2,
        fee: 1,
        unlock_time: 0,
    }
}

/// Tests that the envelope carries version, id, method, password and params
#[tokio::test]
async fn test_get_balance_sends_envelope_and_decodes_result() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc").json_body(json!({
                "jsonrpc": "2.0",
                "method": "getBalance",
                "id": "test",
                "password": "secret",
                "params": {}
            }));
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": "test",
                "result": { "available_balance": 5_000_000u64, "locked_amount": 20u64 }
            }));
        })
        .await;

    let balance = wallet_client(&server).get_balance().await.expect("getBalance failed");
    mock.assert_async().await;
    assert_eq!(balance.available_balance, 5_000_000);
    assert_eq!(balance.locked_amount, 20);
}

#[tokio::test]
async fn test_send_transaction_serializes_transfers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc").json_body_partial(
                r#"{
                    "method": "sendTransaction",
                    "params": {
                        "transfers": [{ "address": "receiver", "amount": 100 }],
                        "anonymity": 2,
                        "fee": 1,
                        "unlock_time": 0
                    }
                }"#,
            );
            then.status(200)
                .json_body(json!({ "result": { "transaction_hash": "abc123" } }));
        })
        .await;

    let result = wallet_client(&server)
        .send_transaction(&transaction_params())
        .await
        .expect("sendTransaction failed");
    mock.assert_async().await;
    assert_eq!(result.transaction_hash, "abc123");
}

#[tokio::test]
async fn test_send_fusion_transaction_serializes_threshold() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc").json_body_partial(
                r#"{
                    "method": "sendFusionTransaction",
                    "params": { "threshold": 1000000, "anonymity": 0 }
                }"#,
            );
            then.status(200)
                .json_body(json!({ "result": { "transaction_hash": "fusion1" } }));
        })
        .await;

    let params = SendFusionTransactionParams {
        threshold: 1_000_000,
        anonymity: 0,
    };
    let result = wallet_client(&server)
        .send_fusion_transaction(&params)
        .await
        .expect("sendFusionTransaction failed");
    mock.assert_async().await;
    assert_eq!(result.transaction_hash, "fusion1");
}

/// Tests that an `error` member fails every wallet method with a service rejection
#[tokio::test]
async fn test_error_envelope_fails_every_method() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": "test",
                "error": { "code": -32000, "message": "Wrong amount" }
            }));
        })
        .await;
    let client = wallet_client(&server);

    let errors = vec![
        client.get_addresses().await.err(),
        client.get_balance().await.err(),
        client.reset().await.err(),
        client.send_transaction(&transaction_params()).await.err(),
        client
            .send_fusion_transaction(&SendFusionTransactionParams {
                threshold: 10,
                anonymity: 0,
            })
            .await
            .err(),
    ];
    let methods = [
        "getAddresses",
        "getBalance",
        "reset",
        "sendTransaction",
        "sendFusionTransaction",
    ];

    for (error, expected_method) in errors.into_iter().zip(methods) {
        match error {
            Some(RpcError::Service { method, code, message }) => {
                assert_eq!(method, expected_method);
                assert_eq!(code, Some(-32000));
                assert_eq!(message, "Wrong amount");
            }
            other => panic!("Expected service rejection for {}, got {:?}", expected_method, other),
        }
    }
    assert_eq!(mock.hits_async().await, 5);
}

#[tokio::test]
async fn test_plain_error_value_is_kept_as_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc");
            then.status(500).json_body(json!({ "error": "wallet is locked" }));
        })
        .await;

    let error = wallet_client(&server).get_balance().await.unwrap_err();
    assert!(error.is_service_rejection());
    assert_eq!(error.to_string(), "getBalance rejected by service: wallet is locked");
}

#[tokio::test]
async fn test_missing_result_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/json_rpc");
            then.status(200).json_body(json!({ "jsonrpc": "2.0", "id": "test" }));
        })
        .await;

    let client = wallet_client(&server);
    let error = client.get_addresses().await.unwrap_err();
    assert!(matches!(error, RpcError::Decode { .. }));
    assert!(!error.is_service_rejection());
    assert!(!error.is_submission_rejection());

    // reset does not need a result member
    client.reset().await.expect("reset should ignore the payload");
}

/// Tests that a body which is not JSON is told apart from a JSON body without a result
#[tokio::test]
async fn test_non_json_body_is_malformed_body_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/json_rpc")
                .json_body_partial(r#"{"method": "sendTransaction"}"#);
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/json_rpc")
                .json_body_partial(r#"{"method": "getAddresses"}"#);
            then.status(200).json_body(json!(["not", "an", "envelope"]));
        })
        .await;

    let client = wallet_client(&server);
    let error = client.send_transaction(&transaction_params()).await.unwrap_err();
    assert!(matches!(error, RpcError::MalformedBody { .. }));
    assert!(error.is_submission_rejection());
    assert!(!error.is_service_rejection());

    let error = client.get_addresses().await.unwrap_err();
    assert!(matches!(error, RpcError::Decode { .. }));
    assert!(!error.is_submission_rejection());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let endpoint = Endpoint::new("127.0.0.1", 1);
    let client =
        RpcWalletClient::new(&endpoint, "secret", TIMEOUT).expect("Failed to build client");
    let error = client.get_balance().await.unwrap_err();
    assert!(matches!(error, RpcError::Transport { .. }));
}

#[tokio::test]
async fn test_explorer_client_queries_block_by_height() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/rpc").json_body(json!({
                "jsonrpc": "2.0",
                "method": "explorer.block.detailed",
                "id": "test",
                "params": { "type": "height", "value": 7 }
            }));
            then.status(200)
                .json_body(json!({ "result": { "height": 7, "hash": "h7" } }));
        })
        .await;

    let endpoint = Endpoint::new(server.host(), server.port());
    let explorer =
        ExplorerClient::new(&endpoint, TIMEOUT).expect("Failed to build explorer client");
    let block = explorer.block_detailed(7).await.expect("block query failed");
    mock.assert_async().await;
    assert_eq!(block, json!({ "height": 7, "hash": "h7" }));
}
