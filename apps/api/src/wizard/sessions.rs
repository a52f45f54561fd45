use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::resume::ResumeRecord;
use crate::models::user::UserIdentity;
use crate::suggestions::SuggestionVocabulary;
use crate::wizard::manager::{FormStateManager, SubmitError};

/// Sessions untouched for this long are dropped the next time a wizard opens.
const IDLE_LIMIT_HOURS: i64 = 24;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("Wizard session {0} not found")]
    NotFound(Uuid),

    #[error("Wizard session {0} is being submitted")]
    Submitting(Uuid),
}

/// One open wizard, owned by the user who opened it.
pub struct WizardSession {
    pub owner_uid: String,
    pub manager: FormStateManager,
    pub opened_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    /// Set while the submitted record is on its way to the store.
    pub submitting: bool,
}

/// Registry of open wizards. Cheap to clone; all clones share one map.
#[derive(Clone)]
pub struct WizardSessions {
    inner: Arc<RwLock<HashMap<Uuid, WizardSession>>>,
    idle_limit: Duration,
}

impl Default for WizardSessions {
    fn default() -> Self {
        Self {
            inner: Arc::default(),
            idle_limit: Duration::hours(IDLE_LIMIT_HOURS),
        }
    }
}

impl WizardSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, owner_uid: &str, vocabulary: Arc<SuggestionVocabulary>) -> Uuid {
        let now = Utc::now();
        self.prune_idle(now).await;

        let id = Uuid::new_v4();
        let session = WizardSession {
            owner_uid: owner_uid.to_string(),
            manager: FormStateManager::new(vocabulary),
            opened_at: now,
            last_active: now,
            submitting: false,
        };
        self.inner.write().await.insert(id, session);
        debug!("Opened wizard {id} for {owner_uid}");
        id
    }

    /// Runs `f` against the session's manager while holding the write lock.
    /// Sessions that are being submitted refuse edits.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        owner_uid: &str,
        f: impl FnOnce(&mut FormStateManager) -> T,
    ) -> Result<T, SessionError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&id)
            .filter(|s| s.owner_uid == owner_uid)
            .ok_or(SessionError::NotFound(id))?;
        if session.submitting {
            return Err(SessionError::Submitting(id));
        }
        session.last_active = Utc::now();
        Ok(f(&mut session.manager))
    }

    /// Read-only access under the read lock.
    pub async fn view<T>(
        &self,
        id: Uuid,
        owner_uid: &str,
        f: impl FnOnce(&FormStateManager) -> T,
    ) -> Result<T, SessionError> {
        let sessions = self.inner.read().await;
        sessions
            .get(&id)
            .filter(|s| s.owner_uid == owner_uid)
            .map(|s| f(&s.manager))
            .ok_or(SessionError::NotFound(id))
    }

    /// Validates the record for submission and, when it passes, marks the
    /// session as submitting until [`finish_submit`](Self::finish_submit) or
    /// [`abort_submit`](Self::abort_submit).
    pub async fn begin_submit(
        &self,
        id: Uuid,
        owner_uid: &str,
    ) -> Result<Result<ResumeRecord, SubmitError>, SessionError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&id)
            .filter(|s| s.owner_uid == owner_uid)
            .ok_or(SessionError::NotFound(id))?;
        if session.submitting {
            return Err(SessionError::Submitting(id));
        }
        let outcome = session.manager.submit();
        session.submitting = outcome.is_ok();
        session.last_active = Utc::now();
        Ok(outcome)
    }

    /// The record was stored; the session is gone.
    pub async fn finish_submit(&self, id: Uuid) {
        self.inner.write().await.remove(&id);
    }

    /// The store refused the record; the session takes edits again.
    pub async fn abort_submit(&self, id: Uuid) {
        if let Some(session) = self.inner.write().await.get_mut(&id) {
            session.submitting = false;
        }
    }

    pub async fn close(&self, id: Uuid, owner_uid: &str) -> Result<(), SessionError> {
        let mut sessions = self.inner.write().await;
        match sessions.get(&id) {
            Some(s) if s.owner_uid == owner_uid && s.submitting => {
                Err(SessionError::Submitting(id))
            }
            Some(s) if s.owner_uid == owner_uid => {
                let open_for = Utc::now() - s.opened_at;
                sessions.remove(&id);
                debug!("Closed wizard {id} after {}s", open_for.num_seconds());
                Ok(())
            }
            _ => Err(SessionError::NotFound(id)),
        }
    }

    /// Drops sessions idle for longer than the limit. This also reclaims a
    /// session left submitting by a request that was dropped mid-store.
    pub async fn prune_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now - s.last_active <= self.idle_limit);
        let pruned = before - sessions.len();
        if pruned > 0 {
            info!("Dropped {pruned} idle wizard session(s)");
        }
        pruned
    }

    /// Drops every open session. Returns how many were discarded.
    pub async fn clear(&self) -> usize {
        let mut sessions = self.inner.write().await;
        let count = sessions.len();
        sessions.clear();
        count
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Discards all open wizards whenever the signed-in user signs out or changes.
///
/// The starting identity is read when this is called, not when the returned
/// future is first polled. Runs until the identity stream closes.
pub fn discard_on_identity_change(
    sessions: WizardSessions,
    mut identity: watch::Receiver<Option<UserIdentity>>,
) -> impl Future<Output = ()> {
    let mut current = identity.borrow_and_update().as_ref().map(|u| u.uid.clone());

    async move {
        while identity.changed().await.is_ok() {
            let next = identity.borrow_and_update().as_ref().map(|u| u.uid.clone());
            if next == current {
                continue;
            }
            let discarded = sessions.clear().await;
            if discarded > 0 {
                info!("Identity changed, discarded {discarded} open wizard session(s)");
            }
            current = next;
        }
    }
}
