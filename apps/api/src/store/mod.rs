pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::{ResumeRecord, StoredResume};

pub use postgres::PgDocumentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Resume {0} not found")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored record could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence seam for submitted resumes.
///
/// Every record belongs to exactly one owner. Reads and deletes scoped to the
/// wrong owner answer [`StoreError::NotFound`], never a permission error.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(&self, owner_id: &str, record: &ResumeRecord) -> Result<Uuid, StoreError>;

    /// Newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<StoredResume>, StoreError>;

    async fn get_by_id(&self, owner_id: &str, id: Uuid) -> Result<StoredResume, StoreError>;

    async fn delete_by_id(&self, owner_id: &str, id: Uuid) -> Result<(), StoreError>;
}
