/*
[INPUT]:  Mock provider responses
[OUTPUT]: Test results for the session token exchange
[POS]:    Integration tests - HTTP token exchange
[UPDATE]: When the token endpoint or failure mapping changes
*/

mod common;

use std::time::Duration;

use chrono::Utc;
use common::{TEST_ADDRESS, client_for, generate_test_key, setup_mock_server};
use swaphub_onramp::{ClientConfig, CredentialSigner, Network, OnrampClient, OnrampError};
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_exchange_sends_single_authenticated_request() {
    let server = setup_mock_server().await;
    let client = client_for(&server);
    let (key, _) = generate_test_key();
    let assertion = assert_ok!(CredentialSigner::default().sign(&key, Utc::now()));

    Mock::given(method("POST"))
        .and(path("/onramp/v1/token"))
        .and(header(
            "authorization",
            format!("Bearer {}", assertion.as_str()).as_str(),
        ))
        .and(body_json(serde_json::json!({
            "addresses": [{ "address": TEST_ADDRESS, "blockchains": ["base"] }],
            "assets": ["USDC"],
            "clientIp": "203.0.113.7",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "tok_abc",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = assert_ok!(
        client
            .request_session_token(&assertion, TEST_ADDRESS, &[Network::Base], "USDC", "203.0.113.7")
            .await
    );
    assert_eq!(token.as_str(), "tok_abc");
}

#[tokio::test]
async fn test_provider_error_carries_status_and_body() {
    let server = setup_mock_server().await;
    let client = client_for(&server);
    let (key, _) = generate_test_key();
    let assertion = assert_ok!(CredentialSigner::default().sign(&key, Utc::now()));

    Mock::given(method("POST"))
        .and(path("/onramp/v1/token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("rate limited"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .request_session_token(&assertion, TEST_ADDRESS, &[Network::Base], "USDC", "127.0.0.1")
        .await
        .unwrap_err();

    match err {
        OnrampError::Provider { status, ref body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "rate limited");
        }
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unauthorized_is_configuration_not_retryable() {
    let server = setup_mock_server().await;
    let client = client_for(&server);
    let (key, _) = generate_test_key();
    let assertion = assert_ok!(CredentialSigner::default().sign(&key, Utc::now()));

    Mock::given(method("POST"))
        .and(path("/onramp/v1/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid jwt"))
        .mount(&server)
        .await;

    let err = client
        .request_session_token(&assertion, TEST_ADDRESS, &[Network::Base], "USDC", "127.0.0.1")
        .await
        .unwrap_err();

    assert!(err.is_configuration_error());
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_invalid_address_is_rejected_before_any_request() {
    let server = setup_mock_server().await;
    let client = client_for(&server);
    let (key, _) = generate_test_key();
    let assertion = assert_ok!(CredentialSigner::default().sign(&key, Utc::now()));

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .request_session_token(&assertion, "0x1234", &[Network::Base], "USDC", "127.0.0.1")
        .await
        .unwrap_err();
    assert!(matches!(err, OnrampError::Validation(_)));
}

#[tokio::test]
async fn test_missing_token_field_is_parse_error() {
    let server = setup_mock_server().await;
    let client = client_for(&server);
    let (key, _) = generate_test_key();
    let assertion = assert_ok!(CredentialSigner::default().sign(&key, Utc::now()));

    Mock::given(method("POST"))
        .and(path("/onramp/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "session": "nope" },
        })))
        .mount(&server)
        .await;

    let err = client
        .request_session_token(&assertion, TEST_ADDRESS, &[Network::Base], "USDC", "127.0.0.1")
        .await
        .unwrap_err();
    assert!(matches!(err, OnrampError::Parse(_)));
    assert!(!err.to_string().contains("nope"));
}

#[tokio::test]
async fn test_slow_provider_times_out_as_transport_error() {
    let server = setup_mock_server().await;
    let config = ClientConfig {
        timeout: Duration::from_millis(200),
        connect_timeout: Duration::from_millis(200),
    };
    let client = assert_ok!(OnrampClient::with_config_and_base_url(config, &server.uri()));
    let (key, _) = generate_test_key();
    let assertion = assert_ok!(CredentialSigner::default().sign(&key, Utc::now()));

    Mock::given(method("POST"))
        .and(path("/onramp/v1/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "token": "late" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client
        .request_session_token(&assertion, TEST_ADDRESS, &[Network::Base], "USDC", "127.0.0.1")
        .await
        .unwrap_err();

    match &err {
        OnrampError::Transport(inner) => assert!(inner.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_multiple_networks_are_forwarded() {
    let server = setup_mock_server().await;
    let client = client_for(&server);
    let (key, _) = generate_test_key();
    let assertion = assert_ok!(CredentialSigner::default().sign(&key, Utc::now()));

    Mock::given(method("POST"))
        .and(path("/onramp/v1/token"))
        .and(body_json(serde_json::json!({
            "addresses": [{ "address": TEST_ADDRESS, "blockchains": ["base", "ethereum"] }],
            "assets": ["USDC"],
            "clientIp": "127.0.0.1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "tok_multi",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = assert_ok!(
        client
            .request_session_token(
                &assertion,
                TEST_ADDRESS,
                &[Network::Base, Network::Ethereum],
                "USDC",
                "127.0.0.1",
            )
            .await
    );
    assert_eq!(token.as_str(), "tok_multi");
}

#[tokio::test]
async fn test_exchange_honours_base_url_path_prefix() {
    let server = setup_mock_server().await;
    let client = assert_ok!(OnrampClient::with_config_and_base_url(
        ClientConfig::default(),
        &format!("{}/sandbox/v2", server.uri()),
    ));
    let (key, _) = generate_test_key();
    let assertion = assert_ok!(CredentialSigner::default().sign(&key, Utc::now()));

    Mock::given(method("POST"))
        .and(path("/sandbox/v2/onramp/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "tok_sandbox",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = assert_ok!(
        client
            .request_session_token(&assertion, TEST_ADDRESS, &[Network::Base], "USDC", "127.0.0.1")
            .await
    );
    assert_eq!(token.as_str(), "tok_sandbox");
}
