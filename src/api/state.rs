use std::sync::Arc;

use tokio::sync::RwLock;

use crate::store::Store;

/// Shared application state.
///
/// One lock over the whole store: mutating handlers hold the write guard for
/// the full operation (including multi-step cascades), read handlers compute
/// their result from a single read guard.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a new empty application state
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::new())),
        }
    }
}
