/*
[INPUT]:  Provider network names and serde requirements
[OUTPUT]: Typed network enum with serialization support
[POS]:    Data layer - network selection for purchases
[UPDATE]: When onboarding a new purchase network
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Network names understood by the payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Base,
    Ethereum,
    Arbitrum,
    Optimism,
    Polygon,
    AvalancheCChain,
    Solana,
}

/// How destination addresses are encoded on a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFormat {
    /// `0x` followed by 20 hex-encoded bytes
    Evm,
    /// base58-encoded 32-byte public key
    Solana,
}

impl Network {
    /// Provider wire name, e.g. `"base"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Base => "base",
            Network::Ethereum => "ethereum",
            Network::Arbitrum => "arbitrum",
            Network::Optimism => "optimism",
            Network::Polygon => "polygon",
            Network::AvalancheCChain => "avalanche-c-chain",
            Network::Solana => "solana",
        }
    }

    pub fn address_format(&self) -> AddressFormat {
        match self {
            Network::Solana => AddressFormat::Solana,
            _ => AddressFormat::Evm,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(Network::Base),
            "ethereum" => Ok(Network::Ethereum),
            "arbitrum" => Ok(Network::Arbitrum),
            "optimism" => Ok(Network::Optimism),
            "polygon" => Ok(Network::Polygon),
            "avalanche-c-chain" | "avalanche" => Ok(Network::AvalancheCChain),
            "solana" => Ok(Network::Solana),
            other => Err(format!("unknown network: {other}")),
        }
    }
}
