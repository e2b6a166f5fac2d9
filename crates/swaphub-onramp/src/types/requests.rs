/*
[INPUT]:  Destination address, network selection, asset and client IP
[OUTPUT]: Serializable token-exchange request body
[POS]:    Data layer - outbound request models
[UPDATE]: When the provider's token endpoint schema changes
*/

use serde::{Deserialize, Serialize};

use super::enums::Network;

/// Body of `POST /onramp/v1/token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenRequest {
    pub addresses: Vec<DestinationAddress>,
    pub assets: Vec<String>,
    pub client_ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationAddress {
    pub address: String,
    pub blockchains: Vec<Network>,
}

impl SessionTokenRequest {
    /// Single destination address receiving a single asset.
    pub fn new(address: &str, networks: &[Network], asset: &str, client_ip: &str) -> Self {
        Self {
            addresses: vec![DestinationAddress {
                address: address.trim().to_string(),
                blockchains: networks.to_vec(),
            }],
            assets: vec![asset.to_string()],
            client_ip: client_ip.to_string(),
        }
    }
}
