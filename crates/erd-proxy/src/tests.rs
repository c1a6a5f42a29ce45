//! Tests for the proxy provider.

use std::time::Duration;

use num_bigint::BigInt;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use erd_network::{HttpMethod, Provider, ProviderError, VmQuery};
use erd_primitives::{Address, SecretKey};
use erd_transaction::{Transaction, TransactionHash};

use crate::client::ProxyProvider;
use crate::types::ProxyConfig;

const ALICE_BECH32: &str = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";

fn test_provider(server: &MockServer) -> ProxyProvider {
    ProxyProvider::new(ProxyConfig::new(server.uri()))
}

fn alice() -> Address {
    Address::from_bech32(ALICE_BECH32).unwrap()
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "data": data,
        "error": "",
        "code": "successful"
    }))
}

#[tokio::test]
async fn test_get_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/address/{ALICE_BECH32}")))
        .respond_with(ok(serde_json::json!({
            "account": {
                "address": ALICE_BECH32,
                "nonce": 12,
                "balance": "2500000000000000000",
                "code": "",
                "username": ""
            }
        })))
        .mount(&server)
        .await;

    let account = test_provider(&server).get_account(&alice()).await.unwrap();
    assert_eq!(account.address, alice());
    assert_eq!(account.nonce, 12);
    assert_eq!(account.balance.to_currency_string(), "2.5 eGLD");
}

#[tokio::test]
async fn test_get_balance_and_nonce() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/address/{ALICE_BECH32}/balance")))
        .respond_with(ok(serde_json::json!({ "balance": "1000" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/address/{ALICE_BECH32}/nonce")))
        .respond_with(ok(serde_json::json!({ "nonce": 3 })))
        .mount(&server)
        .await;

    let provider = test_provider(&server);
    assert_eq!(provider.get_balance(&alice()).await.unwrap().to_string(), "1000");
    assert_eq!(provider.get_nonce(&alice()).await.unwrap(), 3);
}

#[tokio::test]
async fn test_vm_values() {
    let server = MockServer::start().await;
    let expected_body = serde_json::json!({
        "scAddress": ALICE_BECH32,
        "funcName": "getSum",
        "args": ["05"]
    });

    Mock::given(method("POST"))
        .and(path("/vm-values/int"))
        .and(body_json(&expected_body))
        .respond_with(ok(serde_json::json!({ "data": "-42" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vm-values/string"))
        .respond_with(ok(serde_json::json!({ "data": "hello" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vm-values/hex"))
        .respond_with(ok(serde_json::json!({ "data": "68656c6c6f" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vm-values/query"))
        .respond_with(ok(serde_json::json!({
            "data": {
                "returnData": ["Kg=="],
                "returnCode": "ok",
                "returnMessage": "",
                "gasRemaining": 100
            }
        })))
        .mount(&server)
        .await;

    let provider = test_provider(&server);
    let query = VmQuery::new(alice(), "getSum").arg(&[5]);

    assert_eq!(provider.get_vm_value_int(&query).await.unwrap(), BigInt::from(-42));
    assert_eq!(provider.get_vm_value_string(&query).await.unwrap(), "hello");
    assert_eq!(provider.get_vm_value_hex(&query).await.unwrap(), "68656c6c6f");

    let output = provider.query_vm(&query).await.unwrap();
    assert_eq!(output.return_data, vec!["Kg==".to_string()]);
    assert_eq!(output.gas_remaining, 100);
}

#[tokio::test]
async fn test_send_transaction() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transaction/send"))
        .and(body_partial_json(serde_json::json!({
            "nonce": 4,
            "sender": ALICE_BECH32,
            "chainID": "T",
            "version": 1
        })))
        .respond_with(ok(serde_json::json!({ "txHash": "ab".repeat(32) })))
        .expect(1)
        .mount(&server)
        .await;

    let key = SecretKey::from_hex(
        "413f42575f7f26fad3317a778771212fdb80245850981e48b58a4f25e344e8f9",
    )
    .unwrap();
    let mut tx = Transaction::new(alice(), alice());
    tx.nonce = 4;
    tx.apply_signature(key.sign(&tx.serialize_for_signing().unwrap()));

    let hash = test_provider(&server).send_transaction(&tx).await.unwrap();
    assert_eq!(hash, TransactionHash::new("ab".repeat(32)));
}

#[tokio::test]
async fn test_unsigned_transaction_is_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transaction/send"))
        .respond_with(ok(serde_json::json!({ "txHash": "00" })))
        .expect(0)
        .mount(&server)
        .await;

    let tx = Transaction::new(alice(), alice());
    let err = test_provider(&server).send_transaction(&tx).await.unwrap_err();
    assert!(matches!(
        err,
        ProviderError::RequestFailed { method: HttpMethod::Post, .. }
    ));
}

#[tokio::test]
async fn test_status_and_network_config() {
    let server = MockServer::start().await;
    let hash = TransactionHash::new("cd".repeat(32));

    Mock::given(method("GET"))
        .and(path(format!("/transaction/{hash}/status")))
        .respond_with(ok(serde_json::json!({ "status": "Executed" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/network/config"))
        .respond_with(ok(serde_json::json!({
            "config": {
                "erd_chain_id": "D",
                "erd_gas_per_data_byte": 1500,
                "erd_min_gas_limit": 50000,
                "erd_min_gas_price": 1000000000,
                "erd_min_transaction_version": 1
            }
        })))
        .mount(&server)
        .await;

    let provider = test_provider(&server);
    let status = provider.get_transaction_status(&hash).await.unwrap();
    assert!(status.is_executed());
    assert_eq!(status.as_str(), "executed");

    let config = provider.get_network_config().await.unwrap();
    assert_eq!(config.chain_id, "D");
}

#[tokio::test]
async fn test_error_envelope_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/address/{ALICE_BECH32}/nonce")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": null,
            "error": "account not found",
            "code": "internal_issue"
        })))
        .mount(&server)
        .await;

    let err = test_provider(&server).get_nonce(&alice()).await.unwrap_err();
    match err {
        ProviderError::RequestFailed {
            method, url, message, ..
        } => {
            assert_eq!(method, HttpMethod::Get);
            assert!(url.ends_with("/nonce"));
            assert_eq!(message, "account not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_http_error_status_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/network/config"))
        .respond_with(ResponseTemplate::new(500).set_body_string("gateway down"))
        .mount(&server)
        .await;

    let err = test_provider(&server).get_network_config().await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_malformed_body_is_unexpected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/network/config"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_provider(&server).get_network_config().await.unwrap_err();
    assert!(matches!(err, ProviderError::UnexpectedResponse { .. }));
}

#[tokio::test]
async fn test_request_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/address/{ALICE_BECH32}/nonce")))
        .respond_with(ok(serde_json::json!({ "nonce": 1 })).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let provider = ProxyProvider::new(ProxyConfig {
        base_url: server.uri(),
        timeout: Duration::from_millis(100),
    });
    let err = provider.get_nonce(&alice()).await.unwrap_err();
    assert!(matches!(err, ProviderError::RequestFailed { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_default_config() {
    let config = ProxyConfig::default();
    assert_eq!(config.base_url, crate::TESTNET_GATEWAY);
    assert_eq!(config.timeout, Duration::from_millis(1000));
}
