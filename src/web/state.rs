//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::client::Backend;
use crate::config::Config;
use crate::doctors::Directory;
use crate::session::SessionStore;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Auth, prediction and maps config backend
    pub backend: Arc<dyn Backend>,
    /// Doctor directory, loaded once at startup
    pub directory: Arc<Directory>,
    pub sessions: Arc<SessionStore>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn Backend>, directory: Directory) -> Self {
        Self {
            config: Arc::new(config),
            backend,
            directory: Arc::new(directory),
            sessions: Arc::new(SessionStore::new()),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
