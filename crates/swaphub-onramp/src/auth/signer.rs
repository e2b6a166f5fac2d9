/*
[INPUT]:  API key (identifier + P-256 private key) and the signing time
[OUTPUT]: ES256-signed compact JWT assertions
[POS]:    Auth layer - cryptographic signing for provider authentication
[UPDATE]: When changing signing algorithm, header fields or claim set
*/

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, Header, encode};
use tracing::debug;

use crate::auth::{ApiKey, SigningClaims, key::encoding_key};
use crate::http::{OnrampError, Result};

/// Default `iss` claim expected by the provider
pub const DEFAULT_ISSUER: &str = "coinbase-cloud";
/// Default `aud` claim expected by the provider
pub const DEFAULT_AUDIENCE: &str = "https://api.developer.coinbase.com";

/// Issuer/audience pair stamped on every assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerConfig {
    pub issuer: String,
    pub audience: String,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }
}

/// Compact signed assertion plus the claims it carries.
///
/// Single use; the token text is redacted from `Debug`.
#[derive(Clone)]
pub struct SignedAssertion {
    token: String,
    claims: SigningClaims,
}

impl SignedAssertion {
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &SigningClaims {
        &self.claims
    }
}

impl fmt::Debug for SignedAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedAssertion")
            .field("token", &"<redacted>")
            .field("claims", &self.claims)
            .finish()
    }
}

/// Mints short-lived ES256 assertions
#[derive(Debug, Clone, Default)]
pub struct CredentialSigner {
    config: SignerConfig,
}

impl CredentialSigner {
    pub fn new(config: SignerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Sign a fresh claim set for `key`.
    ///
    /// `now` must be the wall clock at the moment of signing; the assertion
    /// is valid for `[now, now + 120s]`.
    pub fn sign(&self, key: &ApiKey, now: DateTime<Utc>) -> Result<SignedAssertion> {
        self.sign_with(key.name(), key.private_key_pem(), now)
    }

    /// Same as [`CredentialSigner::sign`] with the raw key parts.
    pub fn sign_with(
        &self,
        key_identifier: &str,
        private_key_pem: &str,
        now: DateTime<Utc>,
    ) -> Result<SignedAssertion> {
        if key_identifier.trim().is_empty() {
            return Err(OnrampError::Signing("key identifier is empty".to_string()));
        }

        let encoding_key = encoding_key(private_key_pem)?;
        let claims = SigningClaims::new(
            key_identifier,
            &self.config.issuer,
            &self.config.audience,
            now,
        );

        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(key_identifier.to_string());

        let token = encode(&header, &claims, &encoding_key)
            .map_err(|err| OnrampError::Signing(format!("ES256 signing failed: {:?}", err.kind())))?;

        debug!(nbf = claims.nbf, exp = claims.exp, "signed provider assertion");

        Ok(SignedAssertion { token, claims })
    }
}
