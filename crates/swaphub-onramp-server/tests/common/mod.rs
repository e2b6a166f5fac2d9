/*
[INPUT]:  Mock provider server and generated credentials
[OUTPUT]: Running server instances and fixtures for API tests
[POS]:    Test infrastructure - shared across server test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for swaphub-onramp-server tests

use std::net::SocketAddr;
use std::sync::Arc;

use p256::SecretKey;
use p256::pkcs8::{EncodePrivateKey, LineEnding};
use rand::rngs::OsRng;
use swaphub_onramp::ApiKey;
use swaphub_onramp_server::{AppState, ServerConfig, build_router};
use tokio::net::TcpListener;
use wiremock::MockServer;

/// Checksum-free EVM address used across tests
#[allow(dead_code)]
pub const TEST_ADDRESS: &str = "0xABC0000000000000000000000000000000000001";

/// Fresh P-256 API key in PKCS#8 PEM form
#[allow(dead_code)]
pub fn generate_test_key() -> ApiKey {
    let secret = SecretKey::random(&mut OsRng);
    let pem = secret.to_pkcs8_pem(LineEnding::LF).unwrap();
    ApiKey::new("organizations/test-org/apiKeys/test-key", &pem)
}

/// Server configuration whose provider API points at the mock server
#[allow(dead_code)]
pub fn config_for(provider: &MockServer) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.provider.api_base_url = provider.uri();
    config.provider.timeout_secs = 5;
    config
}

/// Serve the app on an ephemeral port and return its base URL
#[allow(dead_code)]
pub async fn spawn_app(config: ServerConfig, api_key: Option<ApiKey>) -> String {
    let state = AppState::from_config(&config, api_key).expect("app state");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(
            listener,
            build_router(Arc::new(state)).into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("serve");
    });

    format!("http://{addr}")
}
