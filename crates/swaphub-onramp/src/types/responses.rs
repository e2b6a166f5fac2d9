/*
[INPUT]:  Provider JSON responses
[OUTPUT]: Deserialized response structs
[POS]:    Data layer - inbound response models
[UPDATE]: When the provider's token endpoint schema changes
*/

use serde::Deserialize;

/// Success body of `POST /onramp/v1/token`; unknown fields are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct SessionTokenResponse {
    pub token: String,
}
