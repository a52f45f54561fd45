use std::sync::Arc;

use crate::identity::IdentityProvider;
use crate::store::DocumentStore;
use crate::suggestions::SuggestionVocabulary;
use crate::wizard::WizardSessions;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable document store. Default: PgDocumentStore.
    pub store: Arc<dyn DocumentStore>,
    /// Pluggable identity provider. Default: FirebaseIdentity.
    pub identity: Arc<dyn IdentityProvider>,
    pub sessions: WizardSessions,
    /// Critique word lists, loaded once at startup.
    pub vocabulary: Arc<SuggestionVocabulary>,
}
