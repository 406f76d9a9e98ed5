//! AI-powered ProgressNarrator implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::assessment::AssessmentRecord;
use crate::domain::foundation::UserId;
use crate::domain::progress::{
    NarrativeOutcome, NarrativePrompt, NarrativeValidator, ProgressMetrics,
};
use crate::ports::{
    AIProvider, CompletionRequest, MessageRole, NarrativeError, ProgressNarrator, RequestMetadata,
};

const NARRATIVE_TEMPERATURE: f32 = 0.3;
const NARRATIVE_MAX_TOKENS: u32 = 4096;

/// Asks a generative model for progress metrics and validates the answer.
pub struct LlmProgressNarrator {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmProgressNarrator {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }
}

#[async_trait]
impl ProgressNarrator for LlmProgressNarrator {
    async fn narrate(
        &self,
        owner: &UserId,
        records: &[AssessmentRecord],
    ) -> Result<ProgressMetrics, NarrativeError> {
        let request = CompletionRequest::new(RequestMetadata::new(
            owner.clone(),
            "progress_narrative",
            format!("progress-narrative-{}", uuid::Uuid::new_v4()),
        ))
        .with_message(MessageRole::User, NarrativePrompt::build(records))
        .with_temperature(NARRATIVE_TEMPERATURE)
        .with_max_tokens(NARRATIVE_MAX_TOKENS);

        let response = self.ai_provider.complete(request).await?;

        tracing::debug!(
            user_id = %owner,
            model = %response.model,
            finish_reason = ?response.finish_reason,
            total_tokens = response.usage.total_tokens,
            "Narrative response received"
        );

        match NarrativeValidator::validate(&response.content, records.len()) {
            NarrativeOutcome::Parsed(metrics) => Ok(*metrics),
            NarrativeOutcome::Rejected(rejection) => Err(rejection.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::domain::assessment::SkillAssessment;
    use crate::domain::foundation::{Score, Timestamp};
    use crate::domain::progress::{FallbackCalculator, NarrativeRejection};
    use crate::ports::AIError;

    fn records() -> Vec<AssessmentRecord> {
        (1..=3)
            .map(|day| {
                AssessmentRecord::new(
                    UserId::new("learner").unwrap(),
                    Timestamp::from_ymd(2024, 2, day).unwrap(),
                    "Job interview",
                    SkillAssessment {
                        overall_score: Score::new(60 + day as u8 * 5),
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    fn owner() -> UserId {
        UserId::new("learner").unwrap()
    }

    #[tokio::test]
    async fn returns_validated_metrics() {
        let records = records();
        let mut expected = FallbackCalculator::calculate(&records);
        expected.detailed_analysis = "Steady gains in every skill.".to_string();
        let body = serde_json::to_string(&expected).unwrap();

        let provider =
            Arc::new(MockAIProvider::new().with_response(format!("```json\n{body}\n```")));
        let narrator = LlmProgressNarrator::new(provider.clone());

        let metrics = narrator.narrate(&owner(), &records).await.unwrap();

        assert_eq!(metrics.detailed_analysis, "Steady gains in every skill.");
        assert!(metrics.activity_by_day.is_empty());
        assert_eq!(metrics.with_activity(expected.activity_by_day.clone()), expected);
    }

    #[tokio::test]
    async fn sends_prompt_with_narrative_parameters() {
        let provider = Arc::new(MockAIProvider::new());
        let narrator = LlmProgressNarrator::new(provider.clone());

        let _ = narrator.narrate(&owner(), &records()).await;

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, Some(0.3));
        assert_eq!(calls[0].max_tokens, Some(4096));
        assert_eq!(calls[0].metadata.operation, "progress_narrative");
        assert!(calls[0].messages[0].content.contains("Session 3 (2024-02-03)"));
    }

    #[tokio::test]
    async fn prose_answer_is_rejected() {
        let provider = Arc::new(MockAIProvider::new().with_response("Great progress overall!"));
        let narrator = LlmProgressNarrator::new(provider);

        let err = narrator.narrate(&owner(), &records()).await.unwrap_err();

        assert_eq!(err, NarrativeError::Rejected(NarrativeRejection::NoJsonObject));
        assert_eq!(err.kind(), "rejected");
    }

    #[tokio::test]
    async fn provider_failure_is_reported() {
        let provider = Arc::new(MockAIProvider::new().with_error(AIError::AuthenticationFailed));
        let narrator = LlmProgressNarrator::new(provider);

        let err = narrator.narrate(&owner(), &records()).await.unwrap_err();

        assert_eq!(err, NarrativeError::Provider(AIError::AuthenticationFailed));
    }
}
