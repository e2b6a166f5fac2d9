/*
[INPUT]:  Current page URL (injected) and a completion listener
[OUTPUT]: One completion notification per marked page load; stripped URL
[POS]:    Redirect layer - inbound completion detection state machine
[UPDATE]: When the completion signal or location capabilities change
*/

use tracing::{debug, info};
use url::Url;

use super::onramp_url::{has_completion_marker, strip_completion_marker};

/// Read and rewrite the page address without navigating.
///
/// In a browser this is `location.href` plus `history.replaceState`.
pub trait PageLocation {
    fn current(&self) -> Url;

    /// Swap the visible URL in place; must not reload the page.
    fn replace(&mut self, url: Url);
}

/// Receives the completion signal
pub trait CompletionListener {
    fn on_complete(&mut self);
}

impl<F: FnMut()> CompletionListener for F {
    fn on_complete(&mut self) {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandshakeState {
    #[default]
    Pending,
    /// Terminal for the current page load
    Completed,
}

/// Per-page-load detector for the provider's redirect back.
///
/// Create one per page load. The marker is stripped as it is consumed, so a
/// later reload starts `Pending` again with nothing to observe.
#[derive(Debug, Default)]
pub struct RedirectHandshake {
    state: HandshakeState,
}

impl RedirectHandshake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// Check the page URL for the completion marker.
    ///
    /// On first sight the marker is removed via [`PageLocation::replace`] and
    /// `listener` is notified once. Calls after completion are no-ops.
    pub fn observe<L, C>(&mut self, location: &mut L, listener: &mut C) -> HandshakeState
    where
        L: PageLocation + ?Sized,
        C: CompletionListener + ?Sized,
    {
        if self.state == HandshakeState::Completed {
            return self.state;
        }

        let current = location.current();
        if !has_completion_marker(&current) {
            debug!("no onramp completion marker on page load");
            return self.state;
        }

        location.replace(strip_completion_marker(&current));
        self.state = HandshakeState::Completed;
        info!("onramp purchase completed");
        listener.on_complete();

        self.state
    }
}

/// In-memory [`PageLocation`] with a history stack.
///
/// Stands in for the browser in tests and non-browser hosts.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    history: Vec<Url>,
}

impl MemoryLocation {
    pub fn new(url: Url) -> Self {
        Self { history: vec![url] }
    }

    /// Push a new entry, as a link click or redirect would
    pub fn navigate(&mut self, url: Url) {
        self.history.push(url);
    }

    pub fn history(&self) -> &[Url] {
        &self.history
    }
}

impl PageLocation for MemoryLocation {
    fn current(&self) -> Url {
        // history is never empty: `new` seeds it and nothing pops
        self.history[self.history.len() - 1].clone()
    }

    fn replace(&mut self, url: Url) {
        if let Some(last) = self.history.last_mut() {
            *last = url;
        }
    }
}
