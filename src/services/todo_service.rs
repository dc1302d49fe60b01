use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthorizedUser;
use crate::config::UpsertPolicy;
use crate::database::{ItemCollector, ItemStore, StoreError, TodoItem, TodoList};

#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Item {id} belongs to another user")]
    Forbidden { id: String },
}

/// Result of a delete request that did not fail outright
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Nothing stored under that id, or it was removed or reassigned concurrently
    NotFound,
    /// Stored item belongs to someone else and was left in place
    Forbidden,
}

/// Ownership rules around the item store
pub struct TodoService {
    store: Arc<dyn ItemStore>,
    upsert_policy: UpsertPolicy,
}

impl TodoService {
    pub fn new(store: Arc<dyn ItemStore>, upsert_policy: UpsertPolicy) -> Self {
        Self { store, upsert_policy }
    }

    pub fn store(&self) -> &dyn ItemStore {
        self.store.as_ref()
    }

    /// Create a new item or upsert an existing one.
    ///
    /// An item without an id gets a fresh id, the current time and the
    /// caller as owner, whatever the payload said. An item with an id is
    /// written as given under `UpsertPolicy::PassThrough`, which lets a caller
    /// who knows another user's id overwrite that document, owner included.
    /// `UpsertPolicy::EnforceOwner` closes that gap with a read before write.
    pub async fn add(&self, user: &AuthorizedUser, mut item: TodoItem) -> Result<TodoItem, TodoError> {
        info!("Upserting item: {}", item.item_name);

        if item.is_new() {
            info!("Item is new.");
            item.id = Uuid::new_v4().to_string();
            item.item_create_date = Some(Utc::now());
            item.item_owner = user.unique_name.clone();
        } else if self.upsert_policy == UpsertPolicy::EnforceOwner {
            self.check_upsert_owner(user, &item).await?;
        }

        let mut collector = ItemCollector::new(self.store.as_ref());
        collector.add(item.clone());
        collector.flush().await?;

        Ok(item)
    }

    async fn check_upsert_owner(&self, user: &AuthorizedUser, item: &TodoItem) -> Result<(), TodoError> {
        if !item.is_owned_by(&user.unique_name) {
            warn!(
                "Refusing upsert of {}: payload owner {} is not {}",
                item.id, item.item_owner, user.unique_name
            );
            return Err(TodoError::Forbidden { id: item.id.clone() });
        }

        match self.store.read(&item.id).await {
            Ok(existing) if !existing.is_owned_by(&user.unique_name) => {
                warn!("Document with ID: {} does not belong to user {}", item.id, user.unique_name);
                Err(TodoError::Forbidden { id: item.id.clone() })
            }
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Every item owned by the caller, in whatever order the store returns them
    pub async fn list(&self, user: &AuthorizedUser) -> Result<TodoList, StoreError> {
        info!("Getting all Todo items for user: {}", user.unique_name);

        let items = self.store.query_by_owner(&user.unique_name).await?;
        Ok(TodoList {
            user_name: user.display_name.clone(),
            items,
        })
    }

    /// Delete an item the caller owns. Missing ids and foreign items are not errors.
    pub async fn delete(&self, user: &AuthorizedUser, id: &str) -> Result<DeleteOutcome, StoreError> {
        info!("Deleting document with ID {} for user {}", id, user.unique_name);

        let item = match self.store.read(id).await {
            Ok(item) => item,
            Err(e) if e.is_not_found() => {
                warn!("Document with ID: {} not found.", id);
                return Ok(DeleteOutcome::NotFound);
            }
            Err(e) => return Err(e),
        };

        if !item.is_owned_by(&user.unique_name) {
            warn!("Document with ID: {} does not belong to user {}", id, user.unique_name);
            return Ok(DeleteOutcome::Forbidden);
        }

        match self.store.delete(id, &user.unique_name).await {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(e) if e.is_not_found() => {
                warn!("Document with ID: {} was deleted or reassigned concurrently.", id);
                Ok(DeleteOutcome::NotFound)
            }
            Err(e) => Err(e),
        }
    }
}
