use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::resume::{ResumeRecord, StoredResume};
use crate::store::{DocumentStore, StoreError};

#[derive(Debug, FromRow)]
struct ResumeRow {
    id: Uuid,
    owner_id: String,
    record: Json<ResumeRecord>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<ResumeRow> for StoredResume {
    fn from(row: ResumeRow) -> Self {
        StoredResume {
            id: row.id,
            owner_id: row.owner_id,
            record: row.record.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Resumes stored one row per document, the record itself as JSONB.
#[derive(Clone)]
pub struct PgDocumentStore {
    db: PgPool,
}

impl PgDocumentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, owner_id: &str, record: &ResumeRecord) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let document = serde_json::to_value(record)?;

        sqlx::query(
            r#"
            INSERT INTO resumes (id, owner_id, record, created_at, updated_at)
            VALUES ($1, $2, $3, now(), now())
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(document)
        .execute(&self.db)
        .await?;

        info!("Stored resume {id} for {owner_id}");
        Ok(id)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<StoredResume>, StoreError> {
        let rows: Vec<ResumeRow> = sqlx::query_as(
            "SELECT id, owner_id, record, created_at, updated_at FROM resumes WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(StoredResume::from).collect())
    }

    async fn get_by_id(&self, owner_id: &str, id: Uuid) -> Result<StoredResume, StoreError> {
        let row: Option<ResumeRow> = sqlx::query_as(
            "SELECT id, owner_id, record, created_at, updated_at FROM resumes WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await?;

        row.map(StoredResume::from).ok_or(StoreError::NotFound(id))
    }

    async fn delete_by_id(&self, owner_id: &str, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        info!("Deleted resume {id}");
        Ok(())
    }
}
