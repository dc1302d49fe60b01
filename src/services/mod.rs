pub mod todo_service;

pub use todo_service::{DeleteOutcome, TodoError, TodoService};
