//! ComputeProgressMetricsHandler - Query handler assembling progress metrics.
//!
//! Chooses a calculation path by history size, asks the narrator when one is
//! configured, and falls back to the deterministic calculator on any
//! narrative failure. The activity calendar is always computed here and
//! attached last, whichever path produced the rest.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::assessment::{sort_chronologically, AssessmentRecord};
use crate::domain::foundation::UserId;
use crate::domain::progress::{ActivityCalendar, FallbackCalculator, ProgressMetrics};
use crate::ports::{AssessmentReader, AssessmentReaderError, NarrativeError, ProgressNarrator};

/// Query to compute progress metrics for a learner.
#[derive(Debug, Clone)]
pub struct ComputeProgressMetricsQuery {
    pub user_id: UserId,
}

/// Which calculation produced a metrics object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsSource {
    NoData,
    SingleSession,
    Narrative,
    Fallback,
}

impl MetricsSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricsSource::NoData => "no_data",
            MetricsSource::SingleSession => "single_session",
            MetricsSource::Narrative => "narrative",
            MetricsSource::Fallback => "fallback",
        }
    }
}

/// Handler for computing progress metrics.
pub struct ComputeProgressMetricsHandler {
    reader: Arc<dyn AssessmentReader>,
    narrator: Option<Arc<dyn ProgressNarrator>>,
    narrative_deadline: Option<Duration>,
}

impl ComputeProgressMetricsHandler {
    /// `narrator` is `None` when no generative provider is configured.
    pub fn new(
        reader: Arc<dyn AssessmentReader>,
        narrator: Option<Arc<dyn ProgressNarrator>>,
    ) -> Self {
        Self {
            reader,
            narrator,
            narrative_deadline: None,
        }
    }

    /// Treats a narrative call that outlives `deadline` as failed.
    pub fn with_narrative_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.narrative_deadline = deadline;
        self
    }

    /// Fails only if the history cannot be read.
    pub async fn handle(
        &self,
        query: ComputeProgressMetricsQuery,
    ) -> Result<ProgressMetrics, AssessmentReaderError> {
        let (metrics, _) = self.handle_with_source(query).await?;
        Ok(metrics)
    }

    /// Like [`handle`](Self::handle), also reporting the calculation path.
    pub async fn handle_with_source(
        &self,
        query: ComputeProgressMetricsQuery,
    ) -> Result<(ProgressMetrics, MetricsSource), AssessmentReaderError> {
        let mut records = self.reader.list_by_owner(&query.user_id).await?;
        sort_chronologically(&mut records);

        let (metrics, source) = match records.as_slice() {
            [] => (ProgressMetrics::no_data(), MetricsSource::NoData),
            [only] => (ProgressMetrics::single_session(only), MetricsSource::SingleSession),
            _ => match self.narrate(&query.user_id, &records).await {
                Some(metrics) => (metrics, MetricsSource::Narrative),
                None => (FallbackCalculator::calculate(&records), MetricsSource::Fallback),
            },
        };

        tracing::info!(
            user_id = %query.user_id,
            record_count = records.len(),
            path = source.as_str(),
            "Progress metrics computed"
        );

        Ok((metrics.with_activity(ActivityCalendar::build(&records)), source))
    }

    async fn narrate(
        &self,
        user_id: &UserId,
        records: &[AssessmentRecord],
    ) -> Option<ProgressMetrics> {
        let Some(narrator) = &self.narrator else {
            tracing::info!(user_id = %user_id, "No narrator configured, using fallback");
            return None;
        };

        let result = match self.narrative_deadline {
            Some(deadline) => tokio::time::timeout(deadline, narrator.narrate(user_id, records))
                .await
                .unwrap_or(Err(NarrativeError::DeadlineElapsed {
                    secs: deadline.as_secs(),
                })),
            None => narrator.narrate(user_id, records).await,
        };

        match result {
            Ok(metrics) => Some(metrics),
            Err(err) => {
                tracing::warn!(
                    user_id = %user_id,
                    record_count = records.len(),
                    kind = err.kind(),
                    reason = %err,
                    "Narrative analysis failed, using fallback"
                );
                None
            }
        }
    }
}
