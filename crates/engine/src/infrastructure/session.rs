//! In-process session provider.
//!
//! Stands in for the external auth service when the engine is embedded:
//! the host signs readers in and out, and subscribers see every change.

use kindness_domain::UserId;
use tokio::sync::watch;

use crate::infrastructure::ports::SessionPort;

pub struct LocalSession {
    caller: watch::Sender<Option<UserId>>,
}

impl LocalSession {
    pub fn new(initial: Option<UserId>) -> Self {
        let (caller, _) = watch::channel(initial);
        Self { caller }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn signed_in(user_id: UserId) -> Self {
        Self::new(Some(user_id))
    }

    pub fn sign_in(&self, user_id: UserId) {
        self.set(Some(user_id));
    }

    pub fn sign_out(&self) {
        self.set(None);
    }

    /// Publish only real identity changes.
    fn set(&self, next: Option<UserId>) {
        let changed = self.caller.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        if changed {
            tracing::info!(user_id = ?next, "Session identity changed");
        }
    }
}

impl Default for LocalSession {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl SessionPort for LocalSession {
    fn current_caller(&self) -> Option<UserId> {
        *self.caller.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserId>> {
        self.caller.subscribe()
    }
}
