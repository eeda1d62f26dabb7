use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/stats", get(handlers::stats_page))
        .route("/healthz", get(handlers::healthz))
        .route("/api/links", post(handlers::shorten))
        .route("/api/history/:short_code", get(handlers::history))
        .route("/api/lookup", get(handlers::lookup))
        .fallback(handlers::not_found)
        .with_state(state)
}
