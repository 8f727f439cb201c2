//! Web layer for the routing adapter.
//!
//! Provides HTTP endpoints for direct-path and matrix requests.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
