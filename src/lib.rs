pub mod config;
pub mod rest;
pub mod store;

use std::sync::Arc;

use config::ServiceConfig;
use store::TaskStore;

/// Shared application state passed to every route handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServiceConfig>,
    pub store: Arc<TaskStore>,
    pub started_at: std::time::Instant,
}
