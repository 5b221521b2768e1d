use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use super::TodoStore;
use crate::error::StoreError;
use crate::model::Todo;

/// In-process store backed by a `BTreeMap`, so listing follows id order.
///
/// Ids start at 1 and are never reused, matching a `SERIAL` column.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i32,
    todos: BTreeMap<i32, Todo>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoStore for MemoryStore {
    async fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.todos.values().cloned().collect())
    }

    async fn create_todo(&self, body: &str, completed: bool) -> Result<Todo, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let todo = Todo {
            id: inner.last_id,
            body: body.to_string(),
            completed,
            created_at: Some(Utc::now()),
        };
        inner.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn get_todo_by_id(&self, id: i32) -> Result<Todo, StoreError> {
        let inner = self.inner.read().await;
        inner.todos.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn update_todo(&self, id: i32, body: &str, completed: bool) -> Result<Todo, StoreError> {
        let mut inner = self.inner.write().await;
        let todo = inner.todos.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        todo.body = body.to_string();
        todo.completed = completed;
        Ok(todo.clone())
    }

    async fn delete_todo(&self, id: i32) -> Result<(), StoreError> {
        self.inner.write().await.todos.remove(&id);
        Ok(())
    }
}
