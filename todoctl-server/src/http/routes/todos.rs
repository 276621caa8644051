//! Todo endpoints
//!
//! One store call per request. Writes answer with the row as re-read from
//! the store, and a missing id is a 404 for read, update and delete alike.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{TodoBody, TodoIdParam};
use crate::http::response::JsonResponse;
use crate::http::server::AppState;
use crate::models::Todo;

/// GET /todos/ - list all todos
async fn list_todos(
    State(state): State<Arc<AppState>>,
) -> Result<JsonResponse<Vec<Todo>>, ApiError> {
    let todos = state.with_deadline(state.store().list()).await?;
    tracing::debug!(count = todos.len(), "Listed todos");

    Ok(JsonResponse(todos))
}

/// POST /todos/ - create a todo
async fn create_todo(
    State(state): State<Arc<AppState>>,
    TodoBody(fields): TodoBody,
) -> Result<JsonResponse<Todo>, ApiError> {
    let todo = state.with_deadline(state.store().create(&fields)).await?;
    tracing::info!(id = todo.id, "Created todo");

    Ok(JsonResponse(todo))
}

/// GET /todos/{id} - get a single todo
async fn get_todo(
    State(state): State<Arc<AppState>>,
    TodoIdParam(id): TodoIdParam,
) -> Result<JsonResponse<Todo>, ApiError> {
    let todo = state
        .with_deadline(state.store().get(id))
        .await?
        .ok_or(ApiError::NotFound { id })?;
    tracing::debug!(id, "Fetched todo");

    Ok(JsonResponse(todo))
}

/// PUT /todos/{id} - overwrite title, category and state
///
/// The path id wins over any `Id` in the body.
async fn update_todo(
    State(state): State<Arc<AppState>>,
    TodoIdParam(id): TodoIdParam,
    TodoBody(fields): TodoBody,
) -> Result<JsonResponse<Todo>, ApiError> {
    let todo = state
        .with_deadline(state.store().update(id, &fields))
        .await?
        .ok_or(ApiError::NotFound { id })?;
    tracing::info!(id, state = %todo.state, "Updated todo");

    Ok(JsonResponse(todo))
}

/// DELETE /todos/{id} - delete a todo (empty body)
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    TodoIdParam(id): TodoIdParam,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .with_deadline(state.store().delete(id))
        .await
        .map_err(ApiError::redacted)?;

    if !removed {
        return Err(ApiError::NotFound { id });
    }

    tracing::info!(id, "Deleted todo");
    Ok(StatusCode::OK)
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos/", get(list_todos).post(create_todo))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
