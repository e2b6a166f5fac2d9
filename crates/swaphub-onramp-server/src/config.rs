/*
[INPUT]:  Optional YAML configuration file, ONRAMP__* and COINBASE_* environment
[OUTPUT]: Parsed and validated server configuration, API key
[POS]:    Configuration layer - server setup
[UPDATE]: When adding new configuration options
*/

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use config::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};
use swaphub_onramp::http::client::API_BASE_URL;
use swaphub_onramp::redirect::onramp_url::{DEFAULT_EXPERIENCE, PAY_BASE_URL};
use swaphub_onramp::{ApiKey, ClientConfig, Network, OnrampUrlConfig, SignerConfig};
use url::Url;

/// Environment variable holding the provider API key identifier
pub const API_KEY_NAME_ENV: &str = "COINBASE_API_KEY_NAME";
/// Environment variable holding the PEM private key (`\n`-escaped is fine)
pub const API_KEY_PRIVATE_KEY_ENV: &str = "COINBASE_API_KEY_PRIVATE_KEY";

/// Prefix of environment overrides, e.g. `ONRAMP__PROVIDER__TIMEOUT_SECS`
pub const ENV_PREFIX: &str = "ONRAMP";

/// Top-level configuration for the session server
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub purchase: PurchaseConfig,
    /// Replaces the built-in chain table when set
    #[serde(default)]
    pub chains_file: Option<PathBuf>,
}

/// Payment provider endpoints, assertion claims and HTTP budget
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_pay_base_url")]
    pub pay_base_url: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// What the user may buy and where it is delivered
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PurchaseConfig {
    #[serde(default = "default_asset")]
    pub asset: String,
    #[serde(default = "default_networks")]
    pub networks: Vec<Network>,
    #[serde(default = "default_network")]
    pub default_network: Network,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            provider: ProviderConfig::default(),
            purchase: PurchaseConfig::default(),
            chains_file: None,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let signer = SignerConfig::default();
        Self {
            api_base_url: default_api_base_url(),
            pay_base_url: default_pay_base_url(),
            issuer: signer.issuer,
            audience: signer.audience,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        Self {
            asset: default_asset(),
            networks: default_networks(),
            default_network: default_network(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_api_base_url() -> String {
    API_BASE_URL.to_string()
}

fn default_pay_base_url() -> String {
    PAY_BASE_URL.to_string()
}

fn default_issuer() -> String {
    SignerConfig::default().issuer
}

fn default_audience() -> String {
    SignerConfig::default().audience
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_asset() -> String {
    "USDC".to_string()
}

fn default_networks() -> Vec<Network> {
    vec![Network::Base]
}

fn default_network() -> Network {
    Network::Base
}

impl ServerConfig {
    /// Load configuration: defaults, then the YAML file, then `ONRAMP__*`
    /// environment overrides (e.g. `ONRAMP__PROVIDER__TIMEOUT_SECS=5`).
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`ServerConfig::load`], reading overrides from `env` instead
    /// of the process environment when it is `Some`.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("purchase.networks")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that could only fail at request time
    pub fn validate(&self) -> anyhow::Result<()> {
        self.socket_addr()?;

        Url::parse(&self.provider.api_base_url).context("provider.api_base_url is not a URL")?;
        Url::parse(&self.provider.pay_base_url).context("provider.pay_base_url is not a URL")?;

        if self.provider.timeout_secs == 0 || self.provider.connect_timeout_secs == 0 {
            bail!("provider timeouts must be greater than zero");
        }
        if self.purchase.asset.trim().is_empty() {
            bail!("purchase.asset must not be empty");
        }
        if self.purchase.networks.is_empty() {
            bail!("purchase.networks must list at least one network");
        }
        if !self.purchase.networks.contains(&self.purchase.default_network) {
            bail!(
                "purchase.default_network {} is not in purchase.networks",
                self.purchase.default_network
            );
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("invalid bind_address: {}", self.bind_address))
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.provider.timeout_secs),
            connect_timeout: Duration::from_secs(self.provider.connect_timeout_secs),
        }
    }

    pub fn signer_config(&self) -> SignerConfig {
        SignerConfig {
            issuer: self.provider.issuer.clone(),
            audience: self.provider.audience.clone(),
        }
    }

    pub fn url_config(&self) -> OnrampUrlConfig {
        OnrampUrlConfig {
            base_url: self.provider.pay_base_url.clone(),
            default_experience: DEFAULT_EXPERIENCE.to_string(),
        }
    }
}

/// Read the provider API key from the environment.
///
/// `None` when either variable is unset or blank; requests then fail with a
/// configuration error instead of the server refusing to start.
pub fn api_key_from_env() -> Option<ApiKey> {
    let name = non_blank_env(API_KEY_NAME_ENV)?;
    let private_key = non_blank_env(API_KEY_PRIVATE_KEY_ENV)?;
    Some(ApiKey::new(name, &private_key))
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
