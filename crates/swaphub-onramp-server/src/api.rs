/*
[INPUT]:  HTTP requests from the UI collaborator
[OUTPUT]: JSON responses for session creation, chain listing and health
[POS]:    HTTP API layer - axum router, handlers and error mapping
[UPDATE]: When adding endpoints or changing the error body contract
*/

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{ConnectInfo, State, rejection::JsonRejection},
    http::{Extensions, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use swaphub_onramp::{
    ApiKey, ChainMapping, ChainRegistry, CredentialSigner, OnrampClient, OnrampError, client_ip,
};
use tracing::{Instrument, error, info_span, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::service::{CreateSessionRequest, CreateSessionResponse, SessionService};

/// Shared application state for axum handlers.
pub struct AppState {
    pub service: SessionService,
    pub registry: Arc<ChainRegistry>,
}

impl AppState {
    /// Wire the provider client, signer and chain table from configuration
    pub fn from_config(
        config: &ServerConfig,
        api_key: Option<ApiKey>,
    ) -> anyhow::Result<Self> {
        let client = OnrampClient::with_config_and_base_url(
            config.client_config(),
            &config.provider.api_base_url,
        )
        .context("build provider HTTP client")?;

        let registry = match &config.chains_file {
            Some(path) => ChainRegistry::from_file(path),
            None => ChainRegistry::builtin(),
        }
        .context("load chain registry")?;

        let service = SessionService::new(
            Arc::new(client),
            CredentialSigner::new(config.signer_config()),
            api_key,
            config.purchase.clone(),
            config.url_config(),
        );

        Ok(Self {
            service,
            registry: Arc::new(registry),
        })
    }
}

/// Build the axum router with all endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/onramp-session",
            post(handle_create_session).fallback(handle_method_not_allowed),
        )
        .route("/api/chains", get(handle_chains))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// JSON error body: `{ error, hint?, message? }`
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Error response for the HTTP surface
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                hint: None,
                message: None,
            },
        }
    }

    fn with_hint(mut self, hint: Option<String>) -> Self {
        self.body.hint = hint;
        self
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

const SESSION_FAILED: &str = "Failed to create session token";

impl From<OnrampError> for ApiError {
    fn from(err: OnrampError) -> Self {
        let retryable = err.is_retryable();
        let misconfigured = err.is_configuration_error();

        match err {
            OnrampError::Validation(message) => ApiError::new(StatusCode::BAD_REQUEST, message),
            OnrampError::Configuration { message, hint } => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message).with_hint(hint)
            }
            OnrampError::Signing(_) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error: Coinbase API key could not be used for signing",
            )
            .with_hint(Some(
                "Check that COINBASE_API_KEY_PRIVATE_KEY holds an EC P-256 private key in PEM format"
                    .to_string(),
            )),
            OnrampError::Provider { status, .. } => {
                let message = if misconfigured {
                    "Payment provider rejected the server credentials".to_string()
                } else if retryable {
                    "Payment provider is temporarily unavailable, please try again".to_string()
                } else {
                    format!("Payment provider rejected the request (status {status})")
                };
                ApiError::new(StatusCode::BAD_GATEWAY, SESSION_FAILED).with_message(message)
            }
            OnrampError::Transport(_) => ApiError::new(StatusCode::BAD_GATEWAY, SESSION_FAILED)
                .with_message("Could not reach the payment provider, please try again"),
            OnrampError::Parse(_) => ApiError::new(StatusCode::BAD_GATEWAY, SESSION_FAILED)
                .with_message("Unexpected response from the payment provider"),
            OnrampError::UrlParse(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, SESSION_FAILED)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// POST /api/onramp-session
async fn handle_create_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    extensions: Extensions,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("create_session", %request_id);

    async move {
        let Json(request) = payload.map_err(|rejection| {
            warn!(error = %rejection, "rejected createSession body");
            ApiError::new(
                StatusCode::BAD_REQUEST,
                "Request body must be a JSON object with an address field",
            )
        })?;

        let peer = extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        let ip = client_ip(&headers, peer);

        match state.service.create_session(&request, &ip).await {
            Ok(response) => Ok(Json(response)),
            Err(err) => {
                match &err {
                    OnrampError::Validation(_) => warn!(error = %err, "invalid createSession input"),
                    _ => error!(error = %err, retryable = err.is_retryable(), "createSession failed"),
                }
                Err(ApiError::from(err))
            }
        }
    }
    .instrument(span)
    .await
}

async fn handle_method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// GET /api/chains - chains offered to users
async fn handle_chains(State(state): State<Arc<AppState>>) -> Json<Vec<ChainMapping>> {
    Json(state.registry.selectable().cloned().collect())
}

/// GET /health
async fn handle_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "credentials": state.service.has_credentials(),
        "chains": state.registry.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let api = ApiError::from(OnrampError::Validation("Address is required".to_string()));
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.body.error, "Address is required");
    }

    #[test]
    fn test_configuration_keeps_hint() {
        let api = ApiError::from(OnrampError::configuration("missing", "set the vars"));
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.body.hint.as_deref(), Some("set the vars"));
    }

    #[test]
    fn test_provider_body_is_not_exposed() {
        let api = ApiError::from(OnrampError::provider_error(
            StatusCode::BAD_REQUEST,
            "internal provider trace id=42",
        ));
        assert_eq!(api.status(), StatusCode::BAD_GATEWAY);
        let rendered = serde_json::to_string(&api.body).unwrap();
        assert!(!rendered.contains("trace id"));
        assert!(rendered.contains("status 400"));
    }

    #[test]
    fn test_app_state_uses_configured_chains_file() {
        let dir = std::env::temp_dir().join(format!("swaphub-api-chains-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("chains.yaml");
        std::fs::write(
            &path,
            "chains:\n  - wallet_chain_id: 31337\n    aggregator_chain_id: 9031337\n    name: Devnet\n    native_currency_symbol: ETH\n",
        )
        .unwrap();

        let config = ServerConfig {
            chains_file: Some(path),
            ..ServerConfig::default()
        };
        let state = AppState::from_config(&config, None).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(state.registry.len(), 1);
        assert_eq!(state.registry.to_aggregator_id(31337), Some(9_031_337));
        assert_eq!(state.registry.to_aggregator_id(8453), None);
    }

    #[test]
    fn test_app_state_rejects_missing_chains_file() {
        let config = ServerConfig {
            chains_file: Some(std::env::temp_dir().join(format!("absent-{}.yaml", Uuid::new_v4()))),
            ..ServerConfig::default()
        };
        assert!(AppState::from_config(&config, None).is_err());
    }

    #[test]
    fn test_retryable_provider_error_says_try_again() {
        let api = ApiError::from(OnrampError::provider_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "",
        ));
        assert!(api.body.message.unwrap().contains("try again"));
    }
}
