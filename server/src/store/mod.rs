//! Persistence boundary for todos.
//!
//! # Design
//! Handlers are generic over `TodoStore` and receive the store through
//! router state, so the backing database is chosen once in `main` and tests
//! can substitute an in-memory or failing store. Methods return `Send`
//! futures because axum runs each request on its own task.

mod memory;
mod postgres;

use std::future::Future;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use crate::error::StoreError;
use crate::model::Todo;

pub trait TodoStore: Send + Sync + 'static {
    /// All todos, ordered by id.
    fn list_todos(&self) -> impl Future<Output = Result<Vec<Todo>, StoreError>> + Send;

    /// Insert a new row. The store assigns `id` and `created_at`.
    fn create_todo(
        &self,
        body: &str,
        completed: bool,
    ) -> impl Future<Output = Result<Todo, StoreError>> + Send;

    /// # Errors
    /// `StoreError::NotFound` when no row has this id.
    fn get_todo_by_id(&self, id: i32) -> impl Future<Output = Result<Todo, StoreError>> + Send;

    /// Overwrite `body` and `completed` of an existing row.
    ///
    /// # Errors
    /// `StoreError::NotFound` when no row has this id.
    fn update_todo(
        &self,
        id: i32,
        body: &str,
        completed: bool,
    ) -> impl Future<Output = Result<Todo, StoreError>> + Send;

    /// Remove the row if present. Deleting a missing id is not an error.
    fn delete_todo(&self, id: i32) -> impl Future<Output = Result<(), StoreError>> + Send;
}
