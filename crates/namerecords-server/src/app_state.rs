// ABOUTME: Shared application state for the namerecords HTTP server.
// ABOUTME: Owns the record store and the configuration snapshot, built once in main and passed to the router.

use std::sync::Arc;

use namerecords_store::NameRecordStore;
use tokio::sync::Mutex;

use crate::config::ServiceConfig;

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    /// The single database connection. Handlers lock it for the duration of one query.
    pub store: Mutex<NameRecordStore>,
    pub config: ServiceConfig,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(store: NameRecordStore, config: ServiceConfig) -> Self {
        Self {
            store: Mutex::new(store),
            config,
        }
    }
}
