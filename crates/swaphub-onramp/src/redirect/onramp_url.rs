/*
[INPUT]:  Session token, default asset/network, return URL
[OUTPUT]: Purchase-flow URL and completion-marker helpers
[POS]:    Redirect layer - outbound URL construction (pure, no network)
[UPDATE]: When the provider's query parameter contract changes
*/

use url::Url;

use crate::http::Result;
use crate::types::{Network, SessionToken};

/// Provider purchase-flow entry point
pub const PAY_BASE_URL: &str = "https://pay.coinbase.com/buy";
/// Query parameter carried back on the return URL
pub const COMPLETION_PARAM: &str = "onramp";
pub const COMPLETION_VALUE: &str = "success";
pub const DEFAULT_EXPERIENCE: &str = "buy";

/// Fixed parts of the purchase URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnrampUrlConfig {
    pub base_url: String,
    pub default_experience: String,
}

impl Default for OnrampUrlConfig {
    fn default() -> Self {
        Self {
            base_url: PAY_BASE_URL.to_string(),
            default_experience: DEFAULT_EXPERIENCE.to_string(),
        }
    }
}

impl OnrampUrlConfig {
    /// Build the purchase URL the browser is sent to.
    ///
    /// `return_url` gets the completion marker added when it is missing.
    pub fn build(
        &self,
        session_token: &SessionToken,
        default_asset: &str,
        default_network: Network,
        return_url: &Url,
    ) -> Result<Url> {
        let redirect_url = with_completion_marker(return_url);
        let url = Url::parse_with_params(
            &self.base_url,
            [
                ("sessionToken", session_token.as_str()),
                ("defaultAsset", default_asset),
                ("defaultNetwork", default_network.as_str()),
                ("redirectUrl", redirect_url.as_str()),
                ("defaultExperience", self.default_experience.as_str()),
            ],
        )?;
        Ok(url)
    }
}

/// [`OnrampUrlConfig::build`] against the provider's production base URL
pub fn build_onramp_url(
    session_token: &SessionToken,
    default_asset: &str,
    default_network: Network,
    return_url: &Url,
) -> Result<Url> {
    OnrampUrlConfig::default().build(session_token, default_asset, default_network, return_url)
}

pub fn has_completion_marker(url: &Url) -> bool {
    url.query_pairs()
        .any(|(key, value)| key == COMPLETION_PARAM && value == COMPLETION_VALUE)
}

/// `url` with `onramp=success` set exactly once.
pub fn with_completion_marker(url: &Url) -> Url {
    if has_completion_marker(url) {
        return url.clone();
    }
    rewrite_query(url, |key, _| key != COMPLETION_PARAM, Some((COMPLETION_PARAM, COMPLETION_VALUE)))
}

/// `url` without the completion marker; other parameters and the fragment
/// are kept.
pub fn strip_completion_marker(url: &Url) -> Url {
    rewrite_query(
        url,
        |key, value| !(key == COMPLETION_PARAM && value == COMPLETION_VALUE),
        None,
    )
}

fn rewrite_query(
    url: &Url,
    keep: impl Fn(&str, &str) -> bool,
    extra: Option<(&str, &str)>,
) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, value)| keep(key, value))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut rewritten = url.clone();
    rewritten.set_query(None);

    if !pairs.is_empty() || extra.is_some() {
        let mut query = rewritten.query_pairs_mut();
        for (key, value) in &pairs {
            query.append_pair(key, value);
        }
        if let Some((key, value)) = extra {
            query.append_pair(key, value);
        }
    }

    rewritten
}
