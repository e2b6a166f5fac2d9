/*
[INPUT]:  API key identifier and PEM private key
[OUTPUT]: Short-lived signed assertions for the provider API
[POS]:    Auth layer - server-to-provider authentication
[UPDATE]: When the assertion format or key handling changes
*/

pub mod claims;
pub mod key;
pub mod signer;

pub use claims::{ASSERTION_LIFETIME_SECS, SigningClaims};
pub use key::ApiKey;
pub use signer::{CredentialSigner, SignedAssertion, SignerConfig};
