//! Application state for handler dependency injection.

use std::sync::Arc;

use pressroom_core::Config;
use pressroom_pipeline::IntakePipeline;

/// Main application state. All collaborator clients live inside the
/// pipeline; handlers only see this aggregate.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<IntakePipeline>,
    pub config: Config,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
