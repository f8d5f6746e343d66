//! Card charge, status and refund flows against a mocked gateway.

mod common;

use payaza::{Card, ChargeAuth, ChargeOptions, Currency, PayazaError, TransactionState};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_card() -> Card {
    Card::new("4242424242424242", 12, 27, "123")
}

#[tokio::test]
async fn charge_with_outstanding_3ds_challenge_is_pending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/card_charge/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "do3dsAuth": true,
            "transaction": {"transaction_status": "pending"},
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let status = client
        .cards()
        .charge(100.0, &test_card(), "TEST123", Currency::Usd, ChargeOptions::default())
        .await
        .unwrap();

    assert_eq!(status.state, TransactionState::Pending);
    assert_eq!(status.transaction_id, "TEST123");
}

#[tokio::test]
async fn charge_without_3ds_reports_terminal_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/card_charge/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "do3dsAuth": false,
            "transaction": {"transaction_status": "successful"},
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let status = client
        .cards()
        .charge(50.0, &test_card(), "CHARGE-123", Currency::Usd, ChargeOptions::default())
        .await
        .unwrap();

    assert_eq!(status.state, TransactionState::Successful);
}

#[tokio::test]
async fn charge_without_3ds_but_nonterminal_status_stays_pending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/card_charge/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "do3dsAuth": false,
            "transaction": {"transaction_status": "processing"},
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let status = client
        .cards()
        .charge(50.0, &test_card(), "CHARGE-124", Currency::Usd, ChargeOptions::default())
        .await
        .unwrap();

    assert_eq!(status.state, TransactionState::Pending);
}

#[tokio::test]
async fn two_ds_charge_reads_the_nested_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cards/mpgs/v1/2ds/card_charge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response_content": {
                "do3dsAuth": false,
                "transaction": {"transaction_status": "successful"},
            },
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let options = ChargeOptions {
        auth: ChargeAuth::TwoDs,
        ..ChargeOptions::default()
    };
    let status = client
        .cards()
        .charge(50.0, &test_card(), "CHARGE-2DS", Currency::Usd, options)
        .await
        .unwrap();

    assert_eq!(status.state, TransactionState::Successful);
}

#[tokio::test]
async fn charge_sends_credential_and_tenant_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/card_charge/"))
        .and(header("Authorization", "Payaza cHJpbWFyeS10ZXN0LWtleQ=="))
        .and(header("x-TenantID", "test"))
        .and(body_partial_json(json!({
            "service_payload": {
                "transaction_reference": "HDR-1",
                "currency": "USD",
                "card": {"expiryMonth": "12", "expiryYear": "27"},
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "do3dsAuth": true,
            "transaction": {"transaction_status": "pending"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    client
        .cards()
        .charge(10.0, &test_card(), "HDR-1", Currency::Usd, ChargeOptions::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn charge_failure_raises_with_upstream_message_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/card_charge/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "statusOk": false,
            "message": "Transaction Failed",
            "debugMessage": "Invalid credentials.",
            "do3dsAuth": false,
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let err = client
        .cards()
        .charge(100.0, &test_card(), "FAIL-TEST-123", Currency::Usd, ChargeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PayazaError::Gateway { .. }));
    assert_eq!(err.to_string(), "Transaction Failed");
    assert_eq!(err.status_code(), Some(400));
    let body = err.response_body().unwrap();
    assert_eq!(body["debugMessage"], "Invalid credentials.");
}

#[tokio::test]
async fn declined_card_is_a_failed_status_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/card_charge/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "statusOk": false,
            "message": "Transaction Failed",
            "debugMessage": "Insufficient funds",
            "do3dsAuth": false,
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let status = client
        .cards()
        .charge(100.0, &test_card(), "INSUFFICIENT-123", Currency::Usd, ChargeOptions::default())
        .await
        .unwrap();

    assert_eq!(status.state, TransactionState::Failed);
    assert_eq!(status.raw["debugMessage"], "Insufficient funds");
}

#[tokio::test]
async fn issuer_decline_is_a_failed_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/card_charge/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "statusOk": false,
            "message": "Transaction Failed",
            "debugMessage": "Card declined by issuer",
            "do3dsAuth": false,
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let status = client
        .cards()
        .charge(100.0, &test_card(), "DECLINED-123", Currency::Usd, ChargeOptions::default())
        .await
        .unwrap();

    assert_eq!(status.state, TransactionState::Failed);
}

#[tokio::test]
async fn server_error_still_raises() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/card_charge/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Internal server error",
            "message": "Database connection failed",
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let err = client
        .cards()
        .charge(100.0, &test_card(), "ERROR-TEST-123", Currency::Usd, ChargeOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Database connection failed");
}

#[tokio::test]
async fn connection_failure_names_the_card_issuer() {
    let client = common::unreachable_client();

    let err = client
        .cards()
        .charge(100.0, &test_card(), "NETWORK-TIMEOUT-123", Currency::Usd, ChargeOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PayazaError::Connection { .. }));
    assert_eq!(
        err.to_string(),
        "Connection timeout - card issuer not responding"
    );
}

#[tokio::test]
async fn status_maps_the_generic_vocabulary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/test/card/card_charge/transaction_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response_content": {"transaction_status": "successful"},
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let status = client.cards().status("TEST123").await.unwrap();

    assert_eq!(status.state, TransactionState::Successful);
    assert_eq!(status.transaction_id, "TEST123");
}

#[tokio::test]
async fn status_failure_carries_the_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/test/card/card_charge/transaction_status"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Invalid transaction reference",
            "error_code": "INVALID_REF",
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let err = client.cards().status("INVALID-REF-123").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid transaction reference");
}

#[tokio::test]
async fn refund_reports_gateway_acceptance() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/card_charge/refund"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    assert!(client.cards().refund("TEST123", 50.0).await.unwrap());
}

#[tokio::test]
async fn refund_failure_raises() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/card_charge/refund"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Refund failed",
            "debugMessage": "Transaction cannot be refunded after 90 days",
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let err = client.cards().refund("OLD-TXN-123", 50.0).await.unwrap_err();

    assert_eq!(err.to_string(), "Refund failed");
}

#[tokio::test]
async fn refund_status_maps_the_generic_vocabulary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/card_charge/refund_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response_content": {"transaction_status": "processing"},
        })))
        .mount(&server)
        .await;

    let client = common::test_client(&server);
    let status = client.cards().refund_status("REFUND-1").await.unwrap();

    assert_eq!(status.state, TransactionState::Processing);
}
