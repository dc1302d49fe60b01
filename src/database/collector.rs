use crate::database::models::TodoItem;
use crate::database::store::{ItemStore, StoreError};

/// Buffers writes for a single request and pushes them to the store on `flush`.
///
/// Items are written in the order they were added. A failed write leaves that
/// item and everything after it queued.
pub struct ItemCollector<'a> {
    store: &'a dyn ItemStore,
    pending: Vec<TodoItem>,
}

impl<'a> ItemCollector<'a> {
    pub fn new(store: &'a dyn ItemStore) -> Self {
        Self {
            store,
            pending: Vec::new(),
        }
    }

    pub fn add(&mut self, item: TodoItem) {
        self.pending.push(item);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Write every queued item, returning how many were written
    pub async fn flush(&mut self) -> Result<usize, StoreError> {
        let mut written = 0;
        while let Some(item) = self.pending.first() {
            self.store.upsert(item).await?;
            self.pending.remove(0);
            written += 1;
        }
        Ok(written)
    }
}
