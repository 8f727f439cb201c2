//! Application state for the web layer.

use std::sync::Arc;

use crate::handler::Handler;

/// Shared application state.
///
/// Contains the request handler every route dispatches to.
#[derive(Clone)]
pub struct AppState {
    /// Routing request handler
    pub handler: Arc<Handler>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(handler: Handler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}
