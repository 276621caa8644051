//! PostgreSQL todo store
//!
//! - create: INSERT ... RETURNING id, then re-read by id
//! - update: UPDATE by id, then re-read by id

use async_trait::async_trait;
use sqlx::PgPool;

use super::{StoreError, TodoStore};
use crate::models::{Todo, TodoFields, TodoId};

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the todo table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todo (
                id BIGSERIAL PRIMARY KEY,
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
impl TodoStore for PgTodoStore {
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
            "SELECT id, title, category, state FROM todo WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn create(&self, fields: &TodoFields) -> Result<Todo, StoreError> {
        let id: TodoId = sqlx::query_scalar(
            "INSERT INTO todo (title, category, state) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&fields.title)
        .bind(&fields.category)
        .bind(&fields.state)
        .fetch_one(&self.pool)
        .await?;

        self.get(id)
            .await?
            .ok_or(StoreError::MissingAfterWrite { id })
    }

    async fn update(&self, id: TodoId, fields: &TodoFields) -> Result<Option<Todo>, StoreError> {
        sqlx::query("UPDATE todo SET title = $1, category = $2, state = $3 WHERE id = $4")
            .bind(&fields.title)
            .bind(&fields.category)
            .bind(&fields.state)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get(id).await
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todo WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
