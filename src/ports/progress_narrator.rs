//! Progress narrator port - generative analysis of an assessment history.

use async_trait::async_trait;
use thiserror::Error;

use super::AIError;
use crate::domain::assessment::AssessmentRecord;
use crate::domain::foundation::UserId;
use crate::domain::progress::{NarrativeRejection, ProgressMetrics};

/// Produces progress metrics from a generative model.
///
/// Implementations must only return metrics that passed full validation.
/// Callers treat every error as a signal to use the deterministic fallback.
#[async_trait]
pub trait ProgressNarrator: Send + Sync {
    async fn narrate(
        &self,
        owner: &UserId,
        records: &[AssessmentRecord],
    ) -> Result<ProgressMetrics, NarrativeError>;
}

/// Why the narrative path produced nothing usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    #[error("provider failed: {0}")]
    Provider(#[from] AIError),

    #[error("response rejected: {0}")]
    Rejected(#[from] NarrativeRejection),

    #[error("narrative deadline of {secs}s elapsed")]
    DeadlineElapsed { secs: u64 },
}

impl NarrativeError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            NarrativeError::Provider(_) => "provider",
            NarrativeError::Rejected(_) => "rejected",
            NarrativeError::DeadlineElapsed { .. } => "deadline",
        }
    }
}
