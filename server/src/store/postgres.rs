//! `PostgreSQL` store.
//!
//! Every operation is a single parameterized statement against the `todos`
//! table. `RETURNING` hands back the row as the database stored it, so
//! `id` and `created_at` always come from Postgres.

use sqlx::PgPool;

use super::TodoStore;
use crate::error::StoreError;
use crate::model::Todo;

/// Creates the `todos` table if it does not exist yet.
const CREATE_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS todos (
        id SERIAL PRIMARY KEY,
        body TEXT NOT NULL,
        completed BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ DEFAULT now()
    )
";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent schema setup, run once at startup.
    ///
    /// # Errors
    /// Returns the database error if the statement fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TodoStore for PostgresStore {
    async fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT id, body, completed, created_at FROM todos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn create_todo(&self, body: &str, completed: bool) -> Result<Todo, StoreError> {
        let todo = sqlx::query_as::<_, Todo>(
            r"
            INSERT INTO todos (body, completed)
            VALUES ($1, $2)
            RETURNING id, body, completed, created_at
            ",
        )
        .bind(body)
        .bind(completed)
        .fetch_one(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn get_todo_by_id(&self, id: i32) -> Result<Todo, StoreError> {
        sqlx::query_as::<_, Todo>(
            "SELECT id, body, completed, created_at FROM todos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))
    }

    async fn update_todo(&self, id: i32, body: &str, completed: bool) -> Result<Todo, StoreError> {
        sqlx::query_as::<_, Todo>(
            r"
            UPDATE todos SET body = $2, completed = $3
            WHERE id = $1
            RETURNING id, body, completed, created_at
            ",
        )
        .bind(id)
        .bind(body)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))
    }

    async fn delete_todo(&self, id: i32) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
