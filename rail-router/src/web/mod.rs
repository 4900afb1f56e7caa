//! HTTP layer for the rail router.
//!
//! Exposes station search and route planning as JSON endpoints.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
