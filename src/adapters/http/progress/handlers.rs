//! HTTP handlers for progress endpoints.
//!
//! These handlers connect Axum routes to application layer query handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    ComputeActivityCalendarHandler, ComputeActivityCalendarQuery, ComputeProgressMetricsHandler,
    ComputeProgressMetricsQuery, GenerateSessionTitleCommand, GenerateSessionTitleHandler,
    GetAssessmentRecordHandler, GetAssessmentRecordQuery,
};
use crate::domain::foundation::{RecordId, UserId};
use crate::domain::progress::{AnalyticsReadiness, DailyActivity, MIN_SESSIONS_FOR_ANALYTICS};
use crate::ports::{AIProvider, AssessmentReader, AssessmentReaderError, ProgressNarrator};

use super::dto::{
    AssessmentRecordView, ConsistencyView, ErrorResponse, ProgressResponse, SessionTitleRequest,
    SessionTitleResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Progress API error that implements IntoResponse.
#[derive(Debug)]
pub enum ProgressApiError {
    BadRequest(String),
    NotFound(String),
    Forbidden(String),
    ServiceUnavailable(String),
}

impl IntoResponse for ProgressApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ProgressApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            ProgressApiError::NotFound(id) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found("Assessment", &id))
            }
            ProgressApiError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, ErrorResponse::forbidden(msg))
            }
            ProgressApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::service_unavailable(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<AssessmentReaderError> for ProgressApiError {
    fn from(error: AssessmentReaderError) -> Self {
        match error {
            AssessmentReaderError::Unavailable(reason) => {
                tracing::error!(reason = %reason, "Assessment store unavailable");
                ProgressApiError::ServiceUnavailable(
                    "Assessment history is temporarily unavailable".to_string(),
                )
            }
            AssessmentReaderError::NotFound(id) => ProgressApiError::NotFound(id.to_string()),
            AssessmentReaderError::Forbidden(_) => ProgressApiError::Forbidden(
                "You do not have access to this assessment".to_string(),
            ),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing progress dependencies.
#[derive(Clone)]
pub struct ProgressAppState {
    pub assessment_reader: Arc<dyn AssessmentReader>,
    /// `None` when no generative provider is configured.
    pub narrator: Option<Arc<dyn ProgressNarrator>>,
    pub ai_provider: Option<Arc<dyn AIProvider>>,
    pub narrative_deadline: Option<Duration>,
    pub min_sessions_for_analytics: u32,
}

impl ProgressAppState {
    /// State with only a store; every analysis takes the fallback path.
    pub fn new(assessment_reader: Arc<dyn AssessmentReader>) -> Self {
        Self {
            assessment_reader,
            narrator: None,
            ai_provider: None,
            narrative_deadline: None,
            min_sessions_for_analytics: MIN_SESSIONS_FOR_ANALYTICS,
        }
    }

    pub fn compute_progress_metrics_handler(&self) -> ComputeProgressMetricsHandler {
        ComputeProgressMetricsHandler::new(self.assessment_reader.clone(), self.narrator.clone())
            .with_narrative_deadline(self.narrative_deadline)
    }

    pub fn compute_activity_calendar_handler(&self) -> ComputeActivityCalendarHandler {
        ComputeActivityCalendarHandler::new(self.assessment_reader.clone())
    }

    pub fn get_assessment_record_handler(&self) -> GetAssessmentRecordHandler {
        GetAssessmentRecordHandler::new(self.assessment_reader.clone())
    }

    pub fn generate_session_title_handler(&self) -> GenerateSessionTitleHandler {
        GenerateSessionTitleHandler::new(self.ai_provider.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated user context extracted from request.
///
/// The identity provider's gateway sets `x-user-id` after verifying the caller.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::unauthorized("Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get("x-user-id")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| UserId::new(s).ok())
                .ok_or(AuthenticationRequired)?;

            Ok(AuthenticatedUser { user_id })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/progress
///
/// Returns progress metrics, analytics readiness and the consistency band.
pub async fn get_progress(
    State(state): State<ProgressAppState>,
    user: AuthenticatedUser,
) -> Result<Json<ProgressResponse>, ProgressApiError> {
    let handler = state.compute_progress_metrics_handler();
    let metrics = handler
        .handle(ComputeProgressMetricsQuery {
            user_id: user.user_id,
        })
        .await?;

    let readiness =
        AnalyticsReadiness::evaluate(metrics.total_sessions, state.min_sessions_for_analytics);
    let consistency = ConsistencyView::from_score(metrics.consistency_score);

    Ok(Json(ProgressResponse {
        metrics,
        readiness,
        consistency,
    }))
}

/// GET /api/progress/activity
///
/// Returns per-day session counts and mean scores, oldest day first.
pub async fn get_activity(
    State(state): State<ProgressAppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<DailyActivity>>, ProgressApiError> {
    let handler = state.compute_activity_calendar_handler();
    let calendar = handler
        .handle(ComputeActivityCalendarQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(calendar))
}

/// GET /api/assessments/:record_id
///
/// Returns one assessment record owned by the caller.
pub async fn get_assessment(
    State(state): State<ProgressAppState>,
    Path(record_id_str): Path<String>,
    user: AuthenticatedUser,
) -> Result<Json<AssessmentRecordView>, ProgressApiError> {
    let record_id: RecordId = record_id_str
        .parse()
        .map_err(|_| ProgressApiError::BadRequest("Invalid assessment ID format".to_string()))?;

    let handler = state.get_assessment_record_handler();
    let record = handler
        .handle(GetAssessmentRecordQuery {
            record_id,
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(record.into()))
}

/// POST /api/sessions/title
///
/// Suggests a short title for a practice transcript. Always succeeds.
pub async fn generate_session_title(
    State(state): State<ProgressAppState>,
    user: AuthenticatedUser,
    Json(request): Json<SessionTitleRequest>,
) -> Json<SessionTitleResponse> {
    let handler = state.generate_session_title_handler();
    let title = handler
        .handle(GenerateSessionTitleCommand {
            user_id: user.user_id,
            transcript: request.transcript,
        })
        .await;

    Json(SessionTitleResponse { title })
}
