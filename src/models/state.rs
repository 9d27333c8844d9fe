use std::sync::Arc;

use axum::extract::FromRef;
use tracing::{debug, info};

use crate::services::validation::Registry;

/// Application state shared across requests. Needs to be thread-safe.
#[derive(Debug, Clone, FromRef)]
pub struct AppState {
    /// Custom validation rules consulted by the `Bind` extractor.
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        info!("Initializing application state");
        debug!(?registry, "Registered validation rules");

        Self {
            registry: Arc::new(registry),
        }
    }
}
