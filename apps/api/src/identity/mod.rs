//! Identity provider seam.
//!
//! Authentication is delegated: this module only defines the contract the
//! rest of the service relies on, plus the Firebase implementation and the
//! HTTP surface that drives it.

pub mod firebase;
pub mod handlers;
pub mod middleware;
pub mod session;

#[cfg(test)]
pub mod stub;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

use crate::models::user::UserIdentity;

pub use firebase::FirebaseIdentity;
pub use session::IdentitySession;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account already exists for this email")]
    EmailInUse,

    #[error("Password is too weak: {0}")]
    WeakPassword(String),

    #[error("Email address is malformed")]
    InvalidEmail,

    #[error("This account has been disabled")]
    UserDisabled,

    #[error("Too many attempts, try again later")]
    TooManyAttempts,

    #[error("Federated sign-in needs an id token or an access token")]
    MissingFederatedToken,

    #[error("No user is signed in")]
    NotSignedIn,

    #[error("Identity provider error ({code}): {message}")]
    Provider { code: String, message: String },

    #[error("Identity provider unreachable: {0}")]
    Http(#[from] reqwest::Error),
}

/// Email/password pair. `Debug` never prints the password.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Third-party identity providers accepted for federated sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FederatedProvider {
    #[serde(rename = "google.com")]
    Google,
    #[serde(rename = "github.com")]
    GitHub,
    #[serde(rename = "microsoft.com")]
    Microsoft,
    #[serde(rename = "apple.com")]
    Apple,
}

impl FederatedProvider {
    pub fn provider_id(&self) -> &'static str {
        match self {
            FederatedProvider::Google => "google.com",
            FederatedProvider::GitHub => "github.com",
            FederatedProvider::Microsoft => "microsoft.com",
            FederatedProvider::Apple => "apple.com",
        }
    }
}

/// A credential already obtained from the third-party provider's own flow.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedCredential {
    pub provider: FederatedProvider,
    pub id_token: Option<String>,
    pub access_token: Option<String>,
}

impl fmt::Debug for FederatedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FederatedCredential")
            .field("provider", &self.provider)
            .field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// The contract every identity backend fulfils.
///
/// Calls are one-shot and never retried. A failed call leaves the current
/// identity unchanged.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserIdentity, AuthError>;

    async fn sign_up(&self, credentials: &Credentials) -> Result<UserIdentity, AuthError>;

    async fn sign_in_federated(
        &self,
        credential: &FederatedCredential,
    ) -> Result<UserIdentity, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    fn current_user(&self) -> Option<UserIdentity>;

    /// Identity-change stream. The receiver starts at the current identity.
    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>>;
}
