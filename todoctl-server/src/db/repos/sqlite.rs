//! SQLite todo store
//!
//! Used for local runs (`--database-url sqlite://todos.db`) and the test
//! suite (`sqlite::memory:`). Same statements as the PostgreSQL store; the
//! new id comes from `last_insert_rowid`.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{StoreError, TodoStore};
use crate::config::DEFAULT_STORE_TIMEOUT;
use crate::db::pool::create_sqlite_pool;
use crate::models::{Todo, TodoFields, TodoId};

/// SQLite-backed store
#[derive(Clone)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
}

impl SqliteTodoStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a fresh in-memory store with the schema in place.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = create_sqlite_pool("sqlite::memory:", 1, DEFAULT_STORE_TIMEOUT).await?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Create the todo table if it does not exist yet.
    ///
    /// AUTOINCREMENT keeps ids from being reused after a delete.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todo (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT '',
                state TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, title, category, state FROM todo ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, title, category, state FROM todo WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn create(&self, fields: &TodoFields) -> Result<Todo, StoreError> {
        let result = sqlx::query("INSERT INTO todo (title, category, state) VALUES (?, ?, ?)")
            .bind(&fields.title)
            .bind(&fields.category)
            .bind(&fields.state)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get(id)
            .await?
            .ok_or(StoreError::MissingAfterWrite { id })
    }

    async fn update(&self, id: TodoId, fields: &TodoFields) -> Result<Option<Todo>, StoreError> {
        sqlx::query("UPDATE todo SET title = ?, category = ?, state = ? WHERE id = ?")
            .bind(&fields.title)
            .bind(&fields.category)
            .bind(&fields.state)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get(id).await
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
