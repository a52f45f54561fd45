use serde::{Deserialize, Serialize};

/// The signed-in identity as reported by the identity provider.
///
/// `id_token` is the provider's bearer credential for the session. It is
/// never serialized with the identity; sign-in hands it out separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    #[serde(skip)]
    pub id_token: String,
}

impl UserIdentity {
    /// Name shown in greetings: display name, then email, then a generic fallback.
    pub fn greeting_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.email.as_deref())
            .unwrap_or("User")
    }
}
