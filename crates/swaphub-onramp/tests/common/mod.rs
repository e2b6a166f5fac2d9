/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for swaphub-onramp tests

use p256::SecretKey;
use p256::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rand::rngs::OsRng;
use swaphub_onramp::{ApiKey, ClientConfig, OnrampClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client whose API base points at the mock server
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> OnrampClient {
    OnrampClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Fresh P-256 API key plus its public key PEM for verification
#[allow(dead_code)]
pub fn generate_test_key() -> (ApiKey, String) {
    let secret = SecretKey::random(&mut OsRng);
    let private_pem = secret.to_pkcs8_pem(LineEnding::LF).unwrap();
    let public_pem = secret.public_key().to_public_key_pem(LineEnding::LF).unwrap();
    (
        ApiKey::new("organizations/test-org/apiKeys/test-key", &private_pem),
        public_pem,
    )
}

/// Checksum-free EVM address used across tests
#[allow(dead_code)]
pub const TEST_ADDRESS: &str = "0xABC0000000000000000000000000000000000001";
