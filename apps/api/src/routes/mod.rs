pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/screenings", post(handlers::handle_screen))
        .route(
            "/api/v1/screenings/upload",
            post(handlers::handle_screen_upload),
        )
        .with_state(state)
}
