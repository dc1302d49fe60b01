use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::TodoItem;
use crate::database::store::{ItemStore, StoreError};

/// Item store keeping each todo as a JSONB document in a single table
pub struct PgItemStore {
    pool: PgPool,
    collection: String,
    table: String,
}

impl PgItemStore {
    /// Connect using the store section of the app config and make sure the
    /// collection table exists.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = DatabaseManager::connect(&config.database_name, config.max_connections).await?;
        let store = Self::new(pool, &config.collection)?;
        store.ensure_collection().await?;
        Ok(store)
    }

    pub fn new(pool: PgPool, collection: &str) -> Result<Self, DatabaseError> {
        if !DatabaseManager::is_valid_identifier(collection) {
            return Err(DatabaseError::InvalidIdentifier(collection.to_string()));
        }
        Ok(Self {
            pool,
            collection: collection.to_string(),
            table: DatabaseManager::quote_identifier(collection),
        })
    }

    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        let create_table = format!(
            "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, document JSONB NOT NULL)",
            self.table
        );
        sqlx::query(&create_table).execute(&self.pool).await?;

        // The owner query is the only non-key lookup
        let create_index = format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ((document->>'itemOwner'))",
            DatabaseManager::quote_identifier(&format!("{}_owner_idx", self.collection)),
            self.table
        );
        sqlx::query(&create_index).execute(&self.pool).await?;

        info!("Collection ready: {}", self.collection);
        Ok(())
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn upsert(&self, item: &TodoItem) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {} (id, document) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET document = EXCLUDED.document",
            self.table
        );
        sqlx::query(&sql)
            .bind(&item.id)
            .bind(Json(item))
            .execute(&self.pool)
            .await?;
        debug!("Upserted document {} into {}", item.id, self.collection);
        Ok(())
    }

    async fn query_by_owner(&self, owner: &str) -> Result<Vec<TodoItem>, StoreError> {
        let sql = format!(
            "SELECT document FROM {} WHERE document->>'itemOwner' = $1",
            self.table
        );
        let rows: Vec<Json<TodoItem>> = sqlx::query_scalar(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(item)| item).collect())
    }

    async fn read(&self, id: &str) -> Result<TodoItem, StoreError> {
        let sql = format!("SELECT document FROM {} WHERE id = $1", self.table);
        let row: Option<Json<TodoItem>> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|Json(item)| item)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str, owner: &str) -> Result<(), StoreError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = $1 AND document->>'itemOwner' = $2",
            self.table
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
