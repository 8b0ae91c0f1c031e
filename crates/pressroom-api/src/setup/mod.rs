//! Application setup and initialization
//!
//! All startup logic lives here: client construction, dependency injection,
//! route wiring, and server start.

pub mod routes;
pub mod server;
pub mod services;

use std::sync::Arc;

use anyhow::Result;
use pressroom_core::Config;

use crate::state::AppState;

/// Initialize the application: build all collaborator clients and the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let state = services::initialize_services(config).await?;
    let router = routes::build_router(state.clone());
    Ok((state, router))
}
