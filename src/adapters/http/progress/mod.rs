//! Progress HTTP adapter module.
//!
//! Provides REST API endpoints for progress analytics.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::ProgressAppState;
pub use routes::progress_routes;
