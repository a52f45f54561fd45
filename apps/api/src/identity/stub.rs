//! In-process identity provider for tests: accepts any password except "wrong".

use async_trait::async_trait;
use tokio::sync::watch;

use crate::identity::{
    AuthError, Credentials, FederatedCredential, IdentityProvider, IdentitySession,
};
use crate::models::user::UserIdentity;

#[derive(Default)]
pub struct StubIdentity {
    session: IdentitySession,
}

impl StubIdentity {
    pub fn user(uid: &str) -> UserIdentity {
        UserIdentity {
            uid: uid.to_string(),
            email: Some(format!("{uid}@example.com")),
            display_name: None,
            photo_url: None,
            id_token: format!("token-{uid}"),
        }
    }

    pub fn signed_in_as(uid: &str) -> Self {
        let stub = Self::default();
        stub.session.signed_in(Self::user(uid));
        stub
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserIdentity, AuthError> {
        if credentials.password == "wrong" {
            return Err(AuthError::InvalidCredentials);
        }
        let uid = credentials.email.split('@').next().unwrap_or_default();
        let user = Self::user(uid);
        self.session.signed_in(user.clone());
        Ok(user)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<UserIdentity, AuthError> {
        if credentials.password.len() < 6 {
            return Err(AuthError::WeakPassword(
                "Password should be at least 6 characters".to_string(),
            ));
        }
        self.sign_in(credentials).await
    }

    async fn sign_in_federated(
        &self,
        credential: &FederatedCredential,
    ) -> Result<UserIdentity, AuthError> {
        if credential.id_token.is_none() && credential.access_token.is_none() {
            return Err(AuthError::MissingFederatedToken);
        }
        let user = Self::user(credential.provider.provider_id());
        self.session.signed_in(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.session.signed_out() {
            Ok(())
        } else {
            Err(AuthError::NotSignedIn)
        }
    }

    fn current_user(&self) -> Option<UserIdentity> {
        self.session.current()
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.session.subscribe()
    }
}
