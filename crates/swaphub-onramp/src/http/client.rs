/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for provider calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};

use crate::http::Result;

/// Base URL for the provider's developer API
pub const API_BASE_URL: &str = "https://api.developer.coinbase.com";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the payment provider's token exchange
#[derive(Debug, Clone)]
pub struct OnrampClient {
    http_client: Client,
    api_base_url: Url,
}

impl OnrampClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, API_BASE_URL)
    }

    /// Create a client pointed at a different API host (tests, sandboxes)
    pub fn with_config_and_base_url(config: ClientConfig, api_base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_base_url: base_url_as_directory(Url::parse(api_base_url)?),
        })
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    /// Build full URL for API endpoints, nested under the base path
    fn api_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.api_base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build request builder for API endpoints
    pub(crate) fn api_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.api_url(endpoint)?;
        Ok(self.http_client.request(method, url))
    }
}

/// Trailing slash so relative joins keep every base path segment
fn base_url_as_directory(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
