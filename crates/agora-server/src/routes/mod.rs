//! Router assembly for the JSON API.

pub mod agents;
pub mod reviews;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Minimal health-check handler for container / load-balancer probes.
async fn health() -> StatusCode {
    StatusCode::OK
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/agents", get(agents::list).post(agents::create))
        .route(
            "/agents/{id}",
            get(agents::get).put(agents::update).delete(agents::remove),
        )
        .route("/agents/slug/{slug}", get(agents::get_by_slug))
        .route("/agents/{id}/share", post(agents::share))
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
