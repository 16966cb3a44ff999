pub mod analysis;
pub mod config;
pub mod detector;
pub mod rest;
pub mod storage;

use std::sync::Arc;

use config::DaemonConfig;
use storage::Storage;

/// Shared application state passed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<DaemonConfig>,
    pub storage: Arc<Storage>,
    pub started_at: std::time::Instant,
}
