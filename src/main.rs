//! Server entrypoint: reads config from env, ensures the guests table, and
//! serves the API.

use rsvp_backend::{app, ensure_guests_table, AppState, DbConfig, HttpDatabase};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rsvp_backend=info".parse()?))
        .init();

    let config = DbConfig::from_env()?;
    let db = HttpDatabase::new(config);
    ensure_guests_table(&db).await?;

    let state = AppState { db: Arc::new(db) };
    let router = app(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
