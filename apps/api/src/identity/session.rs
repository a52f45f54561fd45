use tokio::sync::watch;
use tracing::info;

use crate::models::user::UserIdentity;

/// The process-wide "who is signed in" cell.
///
/// Backed by a `watch` channel so subscribers observe every sign-in,
/// sign-out and user switch without polling.
#[derive(Debug)]
pub struct IdentitySession {
    tx: watch::Sender<Option<UserIdentity>>,
}

impl Default for IdentitySession {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentitySession {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn current(&self) -> Option<UserIdentity> {
        self.tx.borrow().clone()
    }

    pub fn signed_in(&self, user: UserIdentity) {
        info!("Signed in as {}", user.uid);
        self.tx.send_replace(Some(user));
    }

    /// Clears the identity. Returns whether anyone was signed in.
    pub fn signed_out(&self) -> bool {
        let previous = self.tx.send_replace(None);
        if let Some(user) = &previous {
            info!("Signed out {}", user.uid);
        }
        previous.is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.tx.subscribe()
    }
}
