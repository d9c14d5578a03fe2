use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// DNS-over-HTTPS endpoints plus a health probe.
pub fn create_doh_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::dns_query))
        .route("/dns-query", post(handlers::dns_query))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
