/*
[INPUT]:  Registry table rows and provider-issued credentials
[OUTPUT]: Domain models shared across the crate
[POS]:    Data layer - core domain models
[UPDATE]: When registry schema or credential handling changes
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the chain registry: the same network seen from the wallet
/// layer and from the swap aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainMapping {
    pub wallet_chain_id: u64,
    pub aggregator_chain_id: u64,
    pub name: String,
    pub native_currency_symbol: String,
    /// RPC endpoint for chains the wallet layer does not ship with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
    /// Offered to users for selection; unselectable chains still resolve ids
    #[serde(default = "default_selectable")]
    pub selectable: bool,
}

fn default_selectable() -> bool {
    true
}

/// Opaque session token issued by the payment provider.
///
/// Bearer credential: only ever placed into the outbound purchase URL.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}
