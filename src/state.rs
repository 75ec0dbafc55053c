use std::sync::Arc;

use crate::middleware::AdminGate;
use crate::store::CatalogStore;

/// Per-process handler state. Both collaborators are injected so tests can
/// swap in the in-memory store or a stub gate.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub gate: Arc<dyn AdminGate>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, gate: Arc<dyn AdminGate>) -> Self {
        Self { store, gate }
    }
}
