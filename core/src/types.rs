//! Wire types for the todo API.
//!
//! # Design
//! Defined independently of the server crate so a client build never pulls
//! in axum or sqlx. The integration test runs this client against the real
//! server and catches any schema drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i32,
    pub body: String,
    pub completed: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for `POST /api/todos`. The server always stores new todos as
/// incomplete, so there is no `completed` field to send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub body: String,
}

/// Payload for `PATCH /api/todos/{id}`.
///
/// The server first negates `completed`, then applies whatever is present
/// here. Sending `completed` pins the value instead of toggling it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Body of a successful `DELETE /api/todos/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResult {
    pub success: bool,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
