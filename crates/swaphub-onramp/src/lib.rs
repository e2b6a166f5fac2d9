/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public SwapHub on-ramp crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod chains;
pub mod http;
pub mod redirect;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{ApiKey, CredentialSigner, SignedAssertion, SignerConfig, SigningClaims};

// Re-export the chain registry
pub use chains::{ChainRegistry, RegistryError};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    MockSessionTokenExchange,
    OnrampClient,
    OnrampError,
    Result,
    SessionTokenExchange,
    client_ip,
};

// Re-export redirect handshake types
pub use redirect::{
    CompletionListener,
    HandshakeState,
    MemoryLocation,
    OnrampUrlConfig,
    PageLocation,
    RedirectHandshake,
    build_onramp_url,
    with_completion_marker,
};

// Re-export all types
pub use types::*;
