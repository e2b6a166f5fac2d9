/*
[INPUT]:  Signed assertion, destination address, networks, asset, client IP
[OUTPUT]: Provider-issued session token or typed failure
[POS]:    HTTP layer - session token exchange (requires signed assertion)
[UPDATE]: When the token endpoint, body schema or failure mapping changes
*/

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use tracing::{debug, warn};

use crate::auth::SignedAssertion;
use crate::http::{OnrampClient, OnrampError, Result};
use crate::types::{
    Network, SessionToken, SessionTokenRequest, SessionTokenResponse, validate_destination,
};

const TOKEN_ENDPOINT: &str = "onramp/v1/token";

/// Anything that can trade a signed assertion for a session token.
///
/// Implemented by [`OnrampClient`]; the seam lets callers swap in
/// [`MockSessionTokenExchange`] in tests.
#[async_trait]
pub trait SessionTokenExchange: Send + Sync {
    async fn request_session_token(
        &self,
        assertion: &SignedAssertion,
        destination_address: &str,
        supported_networks: &[Network],
        supported_asset: &str,
        client_ip: &str,
    ) -> Result<SessionToken>;
}

impl OnrampClient {
    /// Exchange a signed assertion for a session token
    ///
    /// POST /onramp/v1/token
    /// Requires: `Authorization: Bearer <assertion>`
    ///
    /// Exactly one request is made; retrying is the caller's decision and
    /// needs a freshly signed assertion.
    pub async fn request_session_token(
        &self,
        assertion: &SignedAssertion,
        destination_address: &str,
        supported_networks: &[Network],
        supported_asset: &str,
        client_ip: &str,
    ) -> Result<SessionToken> {
        validate_destination(destination_address, supported_networks)?;

        let body = SessionTokenRequest::new(
            destination_address,
            supported_networks,
            supported_asset,
            client_ip,
        );

        debug!(
            networks = ?supported_networks,
            asset = supported_asset,
            "requesting onramp session token"
        );

        let response = self
            .api_request(Method::POST, TOKEN_ENDPOINT)?
            .bearer_auth(assertion.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "provider rejected session token request");
            return Err(OnrampError::provider_error(status, text));
        }

        parse_token_response(status, &text)
    }
}

fn parse_token_response(status: StatusCode, text: &str) -> Result<SessionToken> {
    let parsed: SessionTokenResponse = serde_json::from_str(text).map_err(|err| {
        warn!(
            status = status.as_u16(),
            body = text,
            error = %err,
            "provider returned an unreadable session token response"
        );
        OnrampError::Parse("response body is missing the token field".to_string())
    })?;

    if parsed.token.is_empty() {
        warn!(status = status.as_u16(), body = text, "provider returned an empty session token");
        return Err(OnrampError::Parse("response token is empty".to_string()));
    }

    Ok(SessionToken::new(parsed.token))
}

#[async_trait]
impl SessionTokenExchange for OnrampClient {
    async fn request_session_token(
        &self,
        assertion: &SignedAssertion,
        destination_address: &str,
        supported_networks: &[Network],
        supported_asset: &str,
        client_ip: &str,
    ) -> Result<SessionToken> {
        OnrampClient::request_session_token(
            self,
            assertion,
            destination_address,
            supported_networks,
            supported_asset,
            client_ip,
        )
        .await
    }
}

/// Canned outcome for [`MockSessionTokenExchange`]
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Token(String),
    Provider { status: u16, body: String },
}

/// Mock token exchange for testing
///
/// Records every request body it receives and answers with a fixed outcome.
#[derive(Debug, Clone)]
pub struct MockSessionTokenExchange {
    outcome: MockOutcome,
    requests: Arc<Mutex<Vec<SessionTokenRequest>>>,
}

impl MockSessionTokenExchange {
    /// Always succeed with `token`
    pub fn returning(token: &str) -> Self {
        Self::with_outcome(MockOutcome::Token(token.to_string()))
    }

    /// Always fail as if the provider answered `status` with `body`
    pub fn failing(status: u16, body: &str) -> Self {
        Self::with_outcome(MockOutcome::Provider {
            status,
            body: body.to_string(),
        })
    }

    pub fn with_outcome(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Request bodies seen so far
    pub fn requests(&self) -> Vec<SessionTokenRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl SessionTokenExchange for MockSessionTokenExchange {
    async fn request_session_token(
        &self,
        _assertion: &SignedAssertion,
        destination_address: &str,
        supported_networks: &[Network],
        supported_asset: &str,
        client_ip: &str,
    ) -> Result<SessionToken> {
        validate_destination(destination_address, supported_networks)?;

        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(SessionTokenRequest::new(
                destination_address,
                supported_networks,
                supported_asset,
                client_ip,
            ));

        match &self.outcome {
            MockOutcome::Token(token) => Ok(SessionToken::new(token.clone())),
            MockOutcome::Provider { status, body } => Err(OnrampError::Provider {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
