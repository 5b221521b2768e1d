use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use todo_server::{Config, MemoryStore, PostgresStore, StoreKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(?config, "loaded configuration");

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    match (config.store, &config.database) {
        (StoreKind::Postgres, Some(database)) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect_with(database.connect_options()?)
                .await?;
            let store = PostgresStore::new(pool);
            store.migrate().await?;
            tracing::info!(%addr, "listening with postgres store");
            todo_server::run(listener, Arc::new(store), shutdown_signal()).await?;
        }
        _ => {
            tracing::info!(%addr, "listening with in-memory store");
            todo_server::run(listener, Arc::new(MemoryStore::new()), shutdown_signal()).await?;
        }
    }

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
