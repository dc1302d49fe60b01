use std::sync::Arc;

use async_trait::async_trait;

use crate::app::AppState;
use crate::auth::HeaderIdentityProvider;
use crate::config::{AppConfig, ForbiddenDeletePolicy, UpsertPolicy};
use crate::database::{ItemStore, MemoryItemStore, StoreError, TodoItem};
use crate::services::TodoService;

/// Store whose every call fails with `StoreError::Unavailable`
pub struct FailingStore {
    message: String,
}

impl FailingStore {
    pub fn unavailable() -> Self {
        Self {
            message: "connection refused".to_string(),
        }
    }
}

#[async_trait]
impl ItemStore for FailingStore {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn upsert(&self, _item: &TodoItem) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(self.message.clone()))
    }

    async fn query_by_owner(&self, _owner: &str) -> Result<Vec<TodoItem>, StoreError> {
        Err(StoreError::Unavailable(self.message.clone()))
    }

    async fn read(&self, _id: &str) -> Result<TodoItem, StoreError> {
        Err(StoreError::Unavailable(self.message.clone()))
    }

    async fn delete(&self, _id: &str, _owner: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(self.message.clone()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(self.message.clone()))
    }
}

/// Reads find the item, but it is gone or reassigned by the time delete runs
pub struct VanishingStore {
    item: TodoItem,
}

impl VanishingStore {
    pub fn new(item: TodoItem) -> Self {
        Self { item }
    }
}

#[async_trait]
impl ItemStore for VanishingStore {
    fn name(&self) -> &'static str {
        "vanishing"
    }

    async fn upsert(&self, _item: &TodoItem) -> Result<(), StoreError> {
        Ok(())
    }

    async fn query_by_owner(&self, _owner: &str) -> Result<Vec<TodoItem>, StoreError> {
        Ok(vec![])
    }

    async fn read(&self, _id: &str) -> Result<TodoItem, StoreError> {
        Ok(self.item.clone())
    }

    async fn delete(&self, id: &str, _owner: &str) -> Result<(), StoreError> {
        Err(StoreError::NotFound(id.to_string()))
    }
}

/// Development config with the policies under test swapped in
pub fn test_config(forbidden_delete: ForbiddenDeletePolicy, upsert: UpsertPolicy) -> AppConfig {
    let mut config = AppConfig::development();
    config.policy.forbidden_delete = forbidden_delete;
    config.policy.upsert = upsert;
    config
}

/// App state over the given store, using header identity from `config`
pub fn test_state(config: &AppConfig, store: Arc<dyn ItemStore>) -> AppState {
    AppState {
        service: Arc::new(TodoService::new(store, config.policy.upsert)),
        identity: Arc::new(HeaderIdentityProvider::from_config(&config.identity)),
        forbidden_delete: config.policy.forbidden_delete,
    }
}

/// Default development state backed by a fresh in-memory store
pub fn memory_state() -> (Arc<MemoryItemStore>, AppState) {
    let store = Arc::new(MemoryItemStore::new());
    let state = test_state(&AppConfig::development(), store.clone());
    (store, state)
}
