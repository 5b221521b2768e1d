//! Todo record and the per-route input payloads.
//!
//! # Design
//! `CreateTodo` and `UpdateTodo` differ in what a missing field means. On
//! create an absent field falls back to its default (empty body, incomplete);
//! on update an absent field keeps the value the handler computed from the
//! existing row. Unknown fields are ignored by both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    pub id: i32,
    pub body: String,
    pub completed: bool,
    /// `None` for rows written without a timestamp; serialized as `null`.
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTodo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    /// Accepted for compatibility with older clients, always overridden.
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

/// `null` reads as the type's default, same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodo {
    pub body: Option<String>,
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// Overlay the fields present in this payload on top of `defaults`.
    pub fn apply(self, defaults: (String, bool)) -> (String, bool) {
        let (body, completed) = defaults;
        (
            self.body.unwrap_or(body),
            self.completed.unwrap_or(completed),
        )
    }
}
