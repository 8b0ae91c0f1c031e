//! HTTP intake surface for the pipeline.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use setup::routes::build_router;
pub use state::AppState;

/// Versioned API prefix for all routes.
pub const API_PREFIX: &str = "/api/v0";
