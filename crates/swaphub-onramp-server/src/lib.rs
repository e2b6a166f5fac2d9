/*
[INPUT]:  Public API exports for swaphub-onramp-server crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod api;
pub mod config;
pub mod service;

// Re-export main types for convenience
pub use api::{AppState, build_router};
pub use config::ServerConfig;
pub use service::{CreateSessionRequest, CreateSessionResponse, SessionService};
