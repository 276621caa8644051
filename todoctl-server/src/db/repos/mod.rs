//! Todo store trait and its sqlx-backed implementations

pub mod postgres;
pub mod sqlite;

use async_trait::async_trait;

use crate::models::{Todo, TodoFields, TodoId};

pub use postgres::PgTodoStore;
pub use sqlite::SqliteTodoStore;

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("todo {id} was not found after it was written")]
    MissingAfterWrite { id: TodoId },

    #[error("unsupported database url scheme: {0}")]
    UnsupportedUrl(String),
}

/// CRUD operations over the todo table (testable)
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos in insertion order.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// A single todo, or `None` if the id does not exist.
    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError>;

    /// Insert a todo and return the row as stored.
    async fn create(&self, fields: &TodoFields) -> Result<Todo, StoreError>;

    /// Overwrite all mutable fields, then re-read the row.
    ///
    /// Updating an id that does not exist is not an error here; the
    /// re-read simply yields `None`.
    async fn update(&self, id: TodoId, fields: &TodoFields) -> Result<Option<Todo>, StoreError>;

    /// Delete a todo. Returns whether a row was removed.
    async fn delete(&self, id: TodoId) -> Result<bool, StoreError>;
}
