//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, DeleteResult, ErrorBody, Todo, UpdateTodo};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    /// `base_url` is the server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection(&self) -> String {
        format!("{}/api/todos", self.base_url)
    }

    fn item(&self, id: i32) -> String {
        format!("{}/api/todos/{id}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_todo(&self, id: i32, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            path: self.item(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    /// A body-less PATCH: the server flips `completed` and keeps the body.
    pub fn build_toggle_todo(&self, id: i32) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Patch,
            path: self.item(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_delete_todo(&self, id: i32) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        decode(&response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(&response, 201)
    }

    /// Parses the response of both `build_update_todo` and `build_toggle_todo`.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(&response, 200)
    }

    /// Returns the server's `success` flag. The server reports success
    /// whether or not the todo existed.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<bool, ApiError> {
        let result: DeleteResult = decode(&response, 200)?;
        Ok(result.success)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn decode<T: DeserializeOwned>(response: &HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to `ApiError::HttpError`, preferring the
/// server's `{"error": ...}` message over the raw body.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|body| body.error)
        .unwrap_or_else(|_| response.body.clone());
    Err(ApiError::HttpError {
        status: response.status,
        message,
    })
}
