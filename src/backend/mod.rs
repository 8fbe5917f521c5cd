mod handlers;
mod routes;

use axum::{routing::get, Router};
use sqlx::{Pool, Sqlite};
use std::net::SocketAddr;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
}

/// Build the full router with state applied. Exposed so tests can serve
/// the real application on an ephemeral port.
pub fn app(pool: Pool<Sqlite>) -> Router {
    let state = AppState { db: pool };

    Router::new()
        .route("/health", get(|| async { "Backend is running" }))
        .merge(routes::api_routes())
        .with_state(state)
}

pub async fn run_server(pool: Pool<Sqlite>) -> anyhow::Result<()> {
    let app = app(pool);

    let addr = bind_addr();
    log::info!("server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn bind_addr() -> SocketAddr {
    std::env::var("BIND_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8080)))
}
