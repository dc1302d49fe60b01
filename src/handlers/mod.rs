// Public endpoints need no identity; todo item endpoints run behind identity_middleware
pub mod public;
pub mod todo_item;
