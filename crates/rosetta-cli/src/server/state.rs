//! Application state for the web server.

use std::sync::Arc;

use rosetta::Settings;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Environment settings, used when a request leaves out an API key.
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create new application state.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}
