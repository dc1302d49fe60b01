pub mod collector;
pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use collector::ItemCollector;
pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryItemStore;
pub use models::{TodoItem, TodoList};
pub use postgres::PgItemStore;
pub use store::{ItemStore, StoreError};
