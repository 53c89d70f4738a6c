//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::registry::FlightRegistry;
use crate::store::FlightStore;

/// Shared application state.
///
/// The registry lock serializes all mutating operations, which is what
/// keeps the seat-count invariants safe once requests arrive
/// concurrently.
#[derive(Clone)]
pub struct AppState {
    /// The flight registry, behind a single writer lock.
    pub registry: Arc<RwLock<FlightRegistry>>,

    /// The flights file store, rewritten after every mutation.
    pub store: Arc<FlightStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(registry: FlightRegistry, store: FlightStore) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            store: Arc::new(store),
        }
    }
}
