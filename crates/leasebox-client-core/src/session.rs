use std::cell::RefCell;

/// Durable storage for the single bearer token that authorizes API calls.
///
/// The contract encodes how the widget degrades: storage that is missing or
/// inaccessible reads as the empty token ("signed out") and writes are
/// best-effort no-ops. Implementations must never surface storage errors.
pub trait SessionTokenStore {
    /// Current token, or the empty string when signed out or when storage
    /// is unavailable.
    fn token(&self) -> String;

    /// Replaces the stored token. Storing the empty string signs out.
    fn set_token(&self, token: &str);

    fn is_signed_in(&self) -> bool {
        !self.token().is_empty()
    }
}

/// In-memory store for native callers and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RefCell<String>,
}

impl SessionTokenStore for MemorySessionStore {
    fn token(&self) -> String {
        self.token.borrow().clone()
    }

    fn set_token(&self, token: &str) {
        *self.token.borrow_mut() = token.to_string();
    }
}
