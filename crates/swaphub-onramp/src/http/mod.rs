/*
[INPUT]:  HTTP client configuration and provider endpoints
[OUTPUT]: HTTP responses and typed provider results
[POS]:    HTTP layer - provider API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod client_ip;
pub mod error;
pub mod session;

pub use error::{OnrampError, Result};

pub use client::{ClientConfig, OnrampClient};
pub use client_ip::client_ip;
pub use session::{MockSessionTokenExchange, SessionTokenExchange};
