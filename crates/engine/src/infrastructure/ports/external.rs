//! External service port traits (auth session).

use kindness_domain::UserId;
use tokio::sync::watch;

// =============================================================================
// Session
// =============================================================================

/// Identity of the current caller, owned by the external auth service.
pub trait SessionPort: Send + Sync {
    /// Authenticated user, or `None` for anonymous callers.
    fn current_caller(&self) -> Option<UserId>;

    /// Change feed for the caller identity. Each sign-in, sign-out or account
    /// switch publishes the new value.
    fn subscribe(&self) -> watch::Receiver<Option<UserId>>;
}
