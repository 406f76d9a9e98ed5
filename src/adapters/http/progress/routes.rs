//! HTTP routes for progress endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    generate_session_title, get_activity, get_assessment, get_progress, ProgressAppState,
};

/// Creates the progress router with all routes.
pub fn progress_routes(state: ProgressAppState) -> Router {
    Router::new()
        // GET /api/progress
        .route("/api/progress", get(get_progress))
        // GET /api/progress/activity
        .route("/api/progress/activity", get(get_activity))
        // GET /api/assessments/:record_id
        .route("/api/assessments/:record_id", get(get_assessment))
        // POST /api/sessions/title
        .route("/api/sessions/title", post(generate_session_title))
        .with_state(state)
}
