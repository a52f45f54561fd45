//! Firebase Authentication over the Identity Toolkit REST API.
//!
//! Only the three sign-in flows are called remotely. Sign-out is local: the
//! held id token is dropped and the identity stream reports `None`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::identity::{
    AuthError, Credentials, FederatedCredential, IdentityProvider, IdentitySession,
};
use crate::models::user::UserIdentity;

pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Redirect URI sent with `signInWithIdp`; the provider flow already happened client-side.
const IDP_REQUEST_URI: &str = "http://localhost";

/// Base URL for the Auth emulator running at `host` (e.g. `127.0.0.1:9099`).
pub fn emulator_url(host: &str) -> String {
    format!("http://{host}/identitytoolkit.googleapis.com/v1")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest<'a> {
    post_body: String,
    request_uri: &'a str,
    return_idp_credential: bool,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    id_token: String,
    email: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
}

impl From<SignInResponse> for UserIdentity {
    fn from(r: SignInResponse) -> Self {
        UserIdentity {
            uid: r.local_id,
            email: r.email.filter(|e| !e.is_empty()),
            display_name: r.display_name.filter(|n| !n.is_empty()),
            photo_url: r.photo_url.filter(|p| !p.is_empty()),
            id_token: r.id_token,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FirebaseError {
    error: FirebaseErrorBody,
}

#[derive(Debug, Deserialize)]
struct FirebaseErrorBody {
    message: String,
}

/// Maps an Identity Toolkit error message such as
/// `"WEAK_PASSWORD : Password should be at least 6 characters"` to an [`AuthError`].
fn map_error_message(message: &str) -> AuthError {
    let (code, detail) = match message.split_once(" : ") {
        Some((code, detail)) => (code.trim(), detail.trim()),
        None => (message.trim(), ""),
    };

    match code {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "EMAIL_EXISTS" => AuthError::EmailInUse,
        "WEAK_PASSWORD" => AuthError::WeakPassword(if detail.is_empty() {
            "Password should be at least 6 characters".to_string()
        } else {
            detail.to_string()
        }),
        "INVALID_EMAIL" | "MISSING_EMAIL" => AuthError::InvalidEmail,
        "USER_DISABLED" => AuthError::UserDisabled,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
        other => AuthError::Provider {
            code: other.to_string(),
            message: detail.to_string(),
        },
    }
}

fn idp_post_body(credential: &FederatedCredential) -> Result<String, AuthError> {
    let provider = credential.provider.provider_id();
    let token = match (&credential.id_token, &credential.access_token) {
        (Some(id_token), _) if !id_token.is_empty() => {
            format!("id_token={}", urlencoding::encode(id_token))
        }
        (_, Some(access_token)) if !access_token.is_empty() => {
            format!("access_token={}", urlencoding::encode(access_token))
        }
        _ => return Err(AuthError::MissingFederatedToken),
    };
    Ok(format!("{token}&providerId={provider}"))
}

/// Firebase-backed identity provider. Holds the signed-in identity for the process.
pub struct FirebaseIdentity {
    client: Client,
    base_url: String,
    api_key: String,
    session: IdentitySession,
}

impl FirebaseIdentity {
    pub fn new(api_key: String, base_url: String) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            session: IdentitySession::new(),
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/accounts:{method}", self.base_url)
    }

    /// One POST to the Identity Toolkit. No retries: auth errors are final.
    async fn call<B: Serialize>(&self, method: &str, body: &B) -> Result<UserIdentity, AuthError> {
        let response = self
            .client
            .post(self.endpoint(method))
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<FirebaseError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Identity Toolkit {method} returned {status}: {message}");
            return Err(map_error_message(&message));
        }

        let parsed: SignInResponse = response.json().await?;
        debug!("Identity Toolkit {method} succeeded for {}", parsed.local_id);

        let user = UserIdentity::from(parsed);
        self.session.signed_in(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_in(&self, credentials: &Credentials) -> Result<UserIdentity, AuthError> {
        let body = PasswordRequest {
            email: &credentials.email,
            password: &credentials.password,
            return_secure_token: true,
        };
        self.call("signInWithPassword", &body).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<UserIdentity, AuthError> {
        let body = PasswordRequest {
            email: &credentials.email,
            password: &credentials.password,
            return_secure_token: true,
        };
        self.call("signUp", &body).await
    }

    async fn sign_in_federated(
        &self,
        credential: &FederatedCredential,
    ) -> Result<UserIdentity, AuthError> {
        let body = IdpRequest {
            post_body: idp_post_body(credential)?,
            request_uri: IDP_REQUEST_URI,
            return_idp_credential: true,
            return_secure_token: true,
        };
        self.call("signInWithIdp", &body).await
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::FederatedProvider;

    #[test]
    fn test_error_codes_map_to_auth_errors() {
        assert!(matches!(
            map_error_message("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(map_error_message("EMAIL_NOT_FOUND"), AuthError::InvalidCredentials));
        assert!(matches!(map_error_message("EMAIL_EXISTS"), AuthError::EmailInUse));
        assert!(matches!(map_error_message("USER_DISABLED"), AuthError::UserDisabled));
        assert!(matches!(
            map_error_message("TOO_MANY_ATTEMPTS_TRY_LATER : Access temporarily disabled"),
            AuthError::TooManyAttempts
        ));
    }

    #[test]
    fn test_weak_password_keeps_detail() {
        match map_error_message("WEAK_PASSWORD : Password should be at least 6 characters") {
            AuthError::WeakPassword(detail) => {
                assert_eq!(detail, "Password should be at least 6 characters")
            }
            other => panic!("expected WeakPassword, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_code_is_passed_through() {
        match map_error_message("OPERATION_NOT_ALLOWED : Password sign-in is disabled") {
            AuthError::Provider { code, message } => {
                assert_eq!(code, "OPERATION_NOT_ALLOWED");
                assert_eq!(message, "Password sign-in is disabled");
            }
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn test_idp_post_body_prefers_id_token() {
        let cred = FederatedCredential {
            provider: FederatedProvider::Google,
            id_token: Some("a.b+c".to_string()),
            access_token: Some("ignored".to_string()),
        };
        assert_eq!(
            idp_post_body(&cred).unwrap(),
            "id_token=a.b%2Bc&providerId=google.com"
        );
    }

    #[test]
    fn test_idp_post_body_requires_a_token() {
        let cred = FederatedCredential {
            provider: FederatedProvider::Apple,
            id_token: None,
            access_token: Some(String::new()),
        };
        assert!(matches!(
            idp_post_body(&cred),
            Err(AuthError::MissingFederatedToken)
        ));
    }

    #[test]
    fn test_endpoint_and_emulator_urls() {
        let firebase =
            FirebaseIdentity::new("key".to_string(), emulator_url("127.0.0.1:9099") + "/")
                .unwrap();
        assert_eq!(
            firebase.endpoint("signUp"),
            "http://127.0.0.1:9099/identitytoolkit.googleapis.com/v1/accounts:signUp"
        );
    }

    #[test]
    fn test_response_maps_to_identity() {
        let parsed: SignInResponse = serde_json::from_value(serde_json::json!({
            "localId": "uid-1",
            "idToken": "tok",
            "email": "jane@example.com",
            "displayName": "",
            "refreshToken": "r",
            "expiresIn": "3600"
        }))
        .unwrap();
        let user = UserIdentity::from(parsed);
        assert_eq!(user.uid, "uid-1");
        assert_eq!(user.display_name, None);
        assert_eq!(user.greeting_name(), "jane@example.com");
        assert_eq!(user.id_token, "tok");
    }

    #[tokio::test]
    async fn test_sign_out_without_user_is_an_error() {
        let firebase =
            FirebaseIdentity::new("key".to_string(), DEFAULT_AUTH_URL.to_string()).unwrap();
        assert!(firebase.current_user().is_none());
        assert!(matches!(firebase.sign_out().await, Err(AuthError::NotSignedIn)));
    }
}
