//! Data Transfer Objects for progress endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::assessment::{AssessmentRecord, SkillAssessment};
use crate::domain::foundation::{RecordId, Score, Timestamp};
use crate::domain::progress::{AnalyticsReadiness, ConsistencyRating, ProgressMetrics};

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `GET /api/progress`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub metrics: ProgressMetrics,
    pub readiness: AnalyticsReadiness,
    pub consistency: ConsistencyView,
}

/// Consistency score with its verbal band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyView {
    pub score: Score,
    pub rating: ConsistencyRating,
    pub label: String,
}

impl ConsistencyView {
    pub fn from_score(score: Score) -> Self {
        let rating = ConsistencyRating::from_score(score);
        Self {
            score,
            rating,
            label: rating.label().to_string(),
        }
    }
}

/// One stored session as shown to its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecordView {
    pub id: RecordId,
    pub created_at: Timestamp,
    pub date: NaiveDate,
    pub session_label: String,
    pub assessment: SkillAssessment,
}

impl From<AssessmentRecord> for AssessmentRecordView {
    fn from(record: AssessmentRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            date: record.date(),
            session_label: record.session_label,
            assessment: record.assessment,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Session titles
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct SessionTitleRequest {
    pub transcript: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTitleResponse {
    pub title: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn with_code(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::with_code("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_code("FORBIDDEN", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_code("UNAUTHORIZED", message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::with_code("SERVICE_UNAVAILABLE", message)
    }
}
