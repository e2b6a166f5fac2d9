/*
[INPUT]:  Session token, purchase defaults, page URLs
[OUTPUT]: Outbound purchase URL and one-shot completion detection
[POS]:    Redirect layer - provider round trip through the browser
[UPDATE]: When the provider's URL contract or the marker changes
*/

pub mod handshake;
pub mod onramp_url;

pub use handshake::{
    CompletionListener,
    HandshakeState,
    MemoryLocation,
    PageLocation,
    RedirectHandshake,
};
pub use onramp_url::{
    COMPLETION_PARAM,
    COMPLETION_VALUE,
    OnrampUrlConfig,
    build_onramp_url,
    has_completion_marker,
    strip_completion_marker,
    with_completion_marker,
};
