//! HTTP backend for a single todo list.
//!
//! # Overview
//! Four routes under `/api/todos` translate requests into one store call
//! each and map the result to JSON. The store is built by the caller and
//! injected into the router, so the same handlers run against Postgres in
//! production and an in-memory map in tests.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod store;

use std::{future::Future, sync::Arc};

use axum::{
    http::{header, Method},
    routing::{get, patch},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::{Config, StoreKind};
pub use error::{ApiError, ConfigError, StoreError};
pub use model::{CreateTodo, Todo, UpdateTodo};
pub use store::{MemoryStore, PostgresStore, TodoStore};

/// Build the router over `store`.
pub fn app<S: TodoStore>(store: Arc<S>) -> Router {
    Router::new()
        .route(
            "/api/todos",
            get(handlers::list_todos::<S>).post(handlers::create_todo::<S>),
        )
        .route(
            "/api/todos/{id}",
            patch(handlers::update_todo::<S>).delete(handlers::delete_todo::<S>),
        )
        .with_state(store)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

/// Any origin may call the API with the headers a browser form sends.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::HEAD,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn run<S, F>(listener: TcpListener, store: Arc<S>, shutdown: F) -> Result<(), std::io::Error>
where
    S: TodoStore,
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}
