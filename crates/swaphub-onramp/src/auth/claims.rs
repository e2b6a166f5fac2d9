/*
[INPUT]:  Key identifier, issuer, audience and signing time
[OUTPUT]: Claim set for the provider assertion
[POS]:    Auth layer - assertion claims
[UPDATE]: When the provider requires additional claims
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validity window of every assertion, in seconds
pub const ASSERTION_LIFETIME_SECS: i64 = 120;

/// Claims embedded in the signed assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningClaims {
    /// API key identifier
    pub sub: String,
    pub iss: String,
    /// Not before (epoch seconds)
    pub nbf: i64,
    /// Expiry (epoch seconds), always `nbf + ASSERTION_LIFETIME_SECS`
    pub exp: i64,
    pub aud: String,
}

impl SigningClaims {
    pub fn new(subject: &str, issuer: &str, audience: &str, now: DateTime<Utc>) -> Self {
        let nbf = now.timestamp();
        Self {
            sub: subject.to_string(),
            iss: issuer.to_string(),
            nbf,
            exp: nbf + ASSERTION_LIFETIME_SECS,
            aud: audience.to_string(),
        }
    }

    /// Whether `at` falls inside `[nbf, exp]`
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        let ts = at.timestamp();
        self.nbf <= ts && ts <= self.exp
    }
}
