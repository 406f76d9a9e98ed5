//! HTTP adapters - REST API implementations.

pub mod progress;

pub use progress::{progress_routes, ProgressAppState};
