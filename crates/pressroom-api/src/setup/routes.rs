//! Route wiring.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::request_id_middleware;
use crate::state::AppState;
use crate::API_PREFIX;

/// Intake payloads are JSON; anything above this is a client error.
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(&format!("{}/health", API_PREFIX), get(handlers::health))
        .route(
            &format!("{}/intake/ticket", API_PREFIX),
            post(handlers::ticket_intake),
        )
        .route(
            &format!("{}/intake/process", API_PREFIX),
            post(handlers::start_process).get(handlers::process_status),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
