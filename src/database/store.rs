use async_trait::async_trait;
use thiserror::Error;

use crate::database::manager::DatabaseError;
use crate::database::models::TodoItem;

/// Errors surfaced by an item store backend.
///
/// `NotFound` is the only variant callers are expected to branch on; the rest
/// are passed up unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("row not found".to_string()),
            e @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)) => {
                StoreError::Unavailable(e.to_string())
            }
            e @ (sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_)) => {
                StoreError::Malformed(e.to_string())
            }
            other => StoreError::Database(DatabaseError::Sqlx(other)),
        }
    }
}

/// Document collection holding todo items, keyed by `id`.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Backend name for logs and the health endpoint
    fn name(&self) -> &'static str;

    /// Create the document, or replace it entirely if the id already exists
    async fn upsert(&self, item: &TodoItem) -> Result<(), StoreError>;

    /// All documents whose `itemOwner` equals `owner`, in store order
    async fn query_by_owner(&self, owner: &str) -> Result<Vec<TodoItem>, StoreError>;

    /// Point read. Fails with `StoreError::NotFound` when absent.
    async fn read(&self, id: &str) -> Result<TodoItem, StoreError>;

    /// Point delete of a document still owned by `owner`. Fails with
    /// `StoreError::NotFound` when absent or owned by someone else.
    async fn delete(&self, id: &str, owner: &str) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
