//! Route handlers for `/api/todos`.
//!
//! # Design
//! Request bodies are taken as raw `Bytes` and decoded here rather than
//! through axum's `Json` extractor: clients get `{"error": ...}` with 400 on
//! any decode failure regardless of `Content-Type`, and the update route
//! must look up the existing row before it parses the body.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::model::{CreateTodo, Todo, UpdateTodo};
use crate::store::TodoStore;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

pub async fn list_todos<S: TodoStore>(
    State(store): State<Arc<S>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    tracing::debug!("listing todos");
    let todos = store.list_todos().await.map_err(|e| {
        ApiError::internal(format!("Failed to fetch todos: {e}")).with_source(e)
    })?;
    tracing::info!(count = todos.len(), "retrieved todos");
    Ok(Json(todos))
}

pub async fn create_todo<S: TodoStore>(
    State(store): State<Arc<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let input: CreateTodo = serde_json::from_slice::<Option<CreateTodo>>(&body)
        .map_err(|e| ApiError::bad_request(format!("Cannot parse JSON: {e}")))?
        .unwrap_or_default();
    tracing::debug!(?input, "parsed create request");

    if input.body.is_empty() {
        return Err(ApiError::bad_request("Body is required"));
    }

    let todo = store.create_todo(&input.body, false).await.map_err(|e| {
        ApiError::internal(format!("Failed to create todo: {e}")).with_source(e)
    })?;
    tracing::info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Toggles `completed` unless the body says otherwise.
///
/// The existing row supplies the defaults (`body` unchanged, `completed`
/// negated) and any non-null field in the request overwrites them. An empty
/// body or a bare `null` keeps the defaults. A missing row is reported as a
/// fetch failure (500), not 404.
pub async fn update_todo<S: TodoStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;

    let existing = store
        .get_todo_by_id(id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch existing todo").with_source(e))?;
    let defaults = (existing.body, !existing.completed);

    let (new_body, completed) = if body.trim_ascii().is_empty() {
        defaults
    } else {
        let input: Option<UpdateTodo> = serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request("Cannot parse JSON").with_source(e))?;
        input.unwrap_or_default().apply(defaults)
    };

    let todo = store
        .update_todo(id, &new_body, completed)
        .await
        .map_err(|e| ApiError::internal("Failed to update todo").with_source(e))?;
    tracing::info!(id, completed = todo.completed, "updated todo");
    Ok(Json(todo))
}

/// Always reports success once the statement runs, whether or not a row
/// was removed.
pub async fn delete_todo<S: TodoStore>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;

    store
        .delete_todo(id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete todo").with_source(e))?;
    tracing::info!(id, "deleted todo");
    Ok(Json(DeleteResponse { success: true }))
}

fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::bad_request("Invalid ID"))
}
