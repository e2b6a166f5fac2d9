/*
[INPUT]:  createSession requests (address, optional return URL) and client IP
[OUTPUT]: Session token (and prebuilt purchase URL) or typed failure
[POS]:    Service layer - sign -> exchange -> redirect pipeline per request
[UPDATE]: When the createSession contract or pipeline steps change
*/

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use swaphub_onramp::{
    ApiKey, CredentialSigner, OnrampError, OnrampUrlConfig, Result, SessionTokenExchange,
    validate_destination,
};
use tracing::{error, info};
use url::Url;

use crate::config::{API_KEY_NAME_ENV, API_KEY_PRIVATE_KEY_ENV, PurchaseConfig};

/// Body of `POST /api/onramp-session`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub address: Option<String>,
    /// Page to come back to; when set the response carries `onrampUrl`
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onramp_url: Option<String>,
}

/// Stateless per-request pipeline from signing to redirect URL
pub struct SessionService {
    exchange: Arc<dyn SessionTokenExchange>,
    signer: CredentialSigner,
    api_key: Option<ApiKey>,
    purchase: PurchaseConfig,
    url_config: OnrampUrlConfig,
}

impl SessionService {
    pub fn new(
        exchange: Arc<dyn SessionTokenExchange>,
        signer: CredentialSigner,
        api_key: Option<ApiKey>,
        purchase: PurchaseConfig,
        url_config: OnrampUrlConfig,
    ) -> Self {
        Self {
            exchange,
            signer,
            api_key,
            purchase,
            url_config,
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Mint a session token for `request.address`.
    ///
    /// Inputs are validated before any key material is touched; the assertion
    /// is signed immediately before the provider call.
    pub async fn create_session(
        &self,
        request: &CreateSessionRequest,
        client_ip: &str,
    ) -> Result<CreateSessionResponse> {
        let address = request
            .address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .ok_or_else(|| OnrampError::Validation("Address is required".to_string()))?;

        let return_url = request
            .redirect_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|_| {
                    OnrampError::Validation("redirectUrl must be an absolute URL".to_string())
                })
            })
            .transpose()?;

        validate_destination(address, &self.purchase.networks)?;

        let api_key = self.api_key.as_ref().ok_or_else(|| {
            error!("missing provider API credentials");
            OnrampError::configuration(
                "Server configuration error: Coinbase API credentials not configured",
                format!(
                    "Please set {API_KEY_NAME_ENV} and {API_KEY_PRIVATE_KEY_ENV} environment variables"
                ),
            )
        })?;

        let assertion = self.signer.sign(api_key, Utc::now()).inspect_err(|err| {
            error!(error = %err, key = api_key.name(), "failed to sign provider assertion");
        })?;

        let token = self
            .exchange
            .request_session_token(
                &assertion,
                address,
                &self.purchase.networks,
                &self.purchase.asset,
                client_ip,
            )
            .await?;

        let onramp_url = return_url
            .map(|url| {
                self.url_config.build(
                    &token,
                    &self.purchase.asset,
                    self.purchase.default_network,
                    &url,
                )
            })
            .transpose()?
            .map(String::from);

        info!(
            asset = %self.purchase.asset,
            with_redirect = onramp_url.is_some(),
            "session token issued"
        );

        Ok(CreateSessionResponse {
            token: token.into_inner(),
            onramp_url,
        })
    }
}
