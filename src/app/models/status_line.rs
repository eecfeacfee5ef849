//! # Status Line Model
//!
//! Encapsulates the status message and result count shown above the map.
//!
//! Every message gets a fresh [`MessageToken`]. Transient messages schedule an
//! expiry carrying that token, and an expiry only clears the message when the
//! token still matches, so an old "loaded!" can never wipe a newer message.

use std::time::{Duration, Instant};

/// Shown while a location fetch is in flight
pub const LOADING_MESSAGE: &str = "loading...";

/// Shown after a location fetch succeeds
pub const LOADED_MESSAGE: &str = "loaded!";

/// The one failure text for every kind of fetch error
pub const FETCH_FAILED_MESSAGE: &str = "failed to fetch data :(";

/// Identity of a message instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageToken(u64);

#[derive(Debug, Clone, Copy)]
struct PendingExpiry {
    token: MessageToken,
    at: Instant,
}

/// Status line model containing the message and count display state
#[derive(Debug, Clone)]
pub struct StatusLine {
    /// Message to display, if any
    status_message: Option<String>,

    /// Token of the message currently displayed
    active_token: Option<MessageToken>,

    next_token: u64,

    /// Fire-once expiries, independent of each other
    pending_expiries: Vec<PendingExpiry>,

    /// Number of locations in the current result set
    count: Option<usize>,
}

impl StatusLine {
    /// Create a new StatusLine with no message and no count
    pub fn new() -> Self {
        Self {
            status_message: None,
            active_token: None,
            next_token: 0,
            pending_expiries: Vec::new(),
            count: None,
        }
    }

    // === Status Message Methods ===

    /// Set a message that stays until replaced
    pub fn set_status_message<S: Into<String>>(&mut self, message: S) -> MessageToken {
        let token = MessageToken(self.next_token);
        self.next_token += 1;
        self.status_message = Some(message.into());
        self.active_token = Some(token);
        token
    }

    /// Set a message that clears itself after `ttl`
    pub fn set_transient_message<S: Into<String>>(
        &mut self,
        message: S,
        now: Instant,
        ttl: Duration,
    ) -> MessageToken {
        let token = self.set_status_message(message);
        self.pending_expiries.push(PendingExpiry {
            token,
            at: now + ttl,
        });
        token
    }

    /// Clear the status message
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
        self.active_token = None;
    }

    /// Get the current status message
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Token of the message on display
    pub fn active_token(&self) -> Option<MessageToken> {
        self.active_token
    }

    /// Fire every expiry due at `now`. Returns true when the message was cleared.
    pub fn expire_messages(&mut self, now: Instant) -> bool {
        let mut cleared = false;
        let active = self.active_token;

        self.pending_expiries.retain(|expiry| {
            if expiry.at > now {
                return true;
            }
            if Some(expiry.token) == active {
                cleared = true;
            } else {
                tracing::debug!("Dropping stale message expiry {:?}", expiry.token);
            }
            false
        });

        if cleared {
            self.clear_status_message();
        }
        cleared
    }

    /// Earliest pending expiry, if any
    pub fn next_expiry(&self) -> Option<Instant> {
        self.pending_expiries.iter().map(|expiry| expiry.at).min()
    }

    // === Count Methods ===

    pub fn set_count(&mut self, count: usize) {
        self.count = Some(count);
    }

    pub fn count(&self) -> Option<usize> {
        self.count
    }

    /// Text of the count view, e.g. "3 location(s) found."
    pub fn count_text(&self) -> Option<String> {
        self.count.map(|count| format!("{count} location(s) found."))
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}
