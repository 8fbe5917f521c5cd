use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::backend::{handlers, AppState};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        .route("/api/fire", post(handlers::fire_projection))
        .route(
            "/api/savings",
            get(handlers::list_savings).post(handlers::create_savings),
        )
        .route("/api/savings/:id", delete(handlers::delete_saving))
}
