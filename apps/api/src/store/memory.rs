//! In-memory document store for handler tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::resume::{ResumeRecord, StoredResume};
use crate::store::{DocumentStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<Vec<StoredResume>>,
    fail_writes: AtomicBool,
    yield_on_create: AtomicBool,
}

impl MemoryStore {
    /// Makes every subsequent `create` fail with a database error.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Makes `create` yield to the scheduler before storing, so concurrent
    /// requests interleave around the store call.
    pub fn yield_on_create(&self) {
        self.yield_on_create.store(true, Ordering::SeqCst);
    }

    pub async fn insert(&self, doc: StoredResume) {
        self.docs.write().await.push(doc);
    }

    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, owner_id: &str, record: &ResumeRecord) -> Result<Uuid, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        if self.yield_on_create.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.docs.write().await.push(StoredResume {
            id,
            owner_id: owner_id.to_string(),
            record: record.clone(),
            created_at: now,
            updated_at: Some(now),
        });
        Ok(id)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<StoredResume>, StoreError> {
        let mut docs: Vec<StoredResume> = self
            .docs
            .read()
            .await
            .iter()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs)
    }

    async fn get_by_id(&self, owner_id: &str, id: Uuid) -> Result<StoredResume, StoreError> {
        self.docs
            .read()
            .await
            .iter()
            .find(|d| d.id == id && d.owner_id == owner_id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete_by_id(&self, owner_id: &str, id: Uuid) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|d| !(d.id == id && d.owner_id == owner_id));
        if docs.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_other_owners_records_are_invisible() {
        let store = MemoryStore::default();
        let id = store.create("alice", &ResumeRecord::default()).await.unwrap();

        assert!(store.get_by_id("alice", id).await.is_ok());
        assert!(matches!(
            store.get_by_id("bob", id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_by_id("bob", id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(store.list_by_owner("bob").await.unwrap().is_empty());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = MemoryStore::default();
        let id = store.create("alice", &ResumeRecord::default()).await.unwrap();
        store.delete_by_id("alice", id).await.unwrap();
        assert!(matches!(
            store.get_by_id("alice", id).await,
            Err(StoreError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_failing_writes_store_nothing() {
        let store = MemoryStore::default();
        store.fail_writes();
        assert!(store.create("alice", &ResumeRecord::default()).await.is_err());
        assert_eq!(store.len().await, 0);
    }
}
