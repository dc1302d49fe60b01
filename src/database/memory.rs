use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::TodoItem;
use crate::database::store::{ItemStore, StoreError};

/// Process-local item store used for development and tests
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    documents: RwLock<HashMap<String, TodoItem>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn upsert(&self, item: &TodoItem) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        documents.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn query_by_owner(&self, owner: &str) -> Result<Vec<TodoItem>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .values()
            .filter(|item| item.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn read(&self, id: &str) -> Result<TodoItem, StoreError> {
        let documents = self.documents.read().await;
        documents
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str, owner: &str) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        match documents.get(id) {
            Some(item) if item.is_owned_by(owner) => {
                documents.remove(id);
                Ok(())
            }
            _ => Err(StoreError::NotFound(id.to_string())),
        }
    }
}
