//! Narrative analysis: prompt construction and response validation.
//!
//! The generative model's answer is untrusted text. It is accepted only if it
//! repairs into a JSON object that deserializes into the complete
//! [`ProgressMetrics`] shape and passes the range checks below; anything else
//! is a [`NarrativeRejection`] and the caller falls back to the
//! deterministic calculator.

use serde_json::Value;
use std::fmt::Write;
use thiserror::Error;

use super::metrics::ProgressMetrics;
use crate::domain::assessment::{sort_chronologically, AssessmentRecord, SkillArea};

/// Why a narrative response was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeRejection {
    #[error("response contains no JSON object")]
    NoJsonObject,

    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response does not match the metrics shape: {0}")]
    InvalidShape(String),

    #[error("field '{field}' is out of range: {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("response reports {actual} sessions, expected {expected}")]
    SessionCountMismatch { expected: u32, actual: u32 },
}

/// Result of validating a narrative response.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeOutcome {
    Parsed(Box<ProgressMetrics>),
    Rejected(NarrativeRejection),
}

impl NarrativeOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, NarrativeOutcome::Parsed(_))
    }
}

/// Builds the analysis prompt for a record history.
pub struct NarrativePrompt;

impl NarrativePrompt {
    /// Prompt embedding every session in chronological order.
    pub fn build(records: &[AssessmentRecord]) -> String {
        let mut sorted = records.to_vec();
        sort_chronologically(&mut sorted);

        let sessions = sorted
            .iter()
            .enumerate()
            .map(|(index, record)| Self::session_block(index + 1, record))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"You are a language learning analytics expert specializing in English speaking practice. Analyze the learner's progress across the practice sessions below.

SESSION DATA (chronological order):
{sessions}

ANALYSIS APPROACH:
1. Identify progression patterns across all skill areas
2. Identify persistent error patterns that need focused attention
3. Consider the relationship between practice frequency and skill development
4. Prioritize high-impact, actionable recommendations

OUTPUT REQUIREMENTS:
Return ONLY a JSON object with exactly this structure:

{{
  "totalSessions": <integer: number of sessions analyzed ({count})>,
  "averageScore": <integer 0-100: average of all overall scores>,
  "progressTrend": <"improving" | "steady" | "declining" | "insufficient-data">,
  "mostImprovedArea": <string>,
  "areaNeededFocus": <string>,
  "recentStrengths": [<string>],
  "recentWeaknesses": [<string>],
  "proficiencyLevel": <string: current CEFR level>,
  "progressPercentage": <integer: ((latestScore - firstScore) / firstScore) * 100>,
  "insightSummary": <string: 2-3 sentences>,
  "skillProgress": {{
{skills}
  }},
  "consistencyScore": <integer 0-100>,
  "studyHabits": {{
    "averageSessionsPerWeek": <number >= 0>,
    "mostActiveDay": <string>
  }},
  "learningInsights": [
    {{ "title": <string>, "description": <string>, "impact": <"high" | "medium" | "low"> }}
  ],
  "predictedTimeToNextLevel": <string>,
  "recommendedFocus": {{
    "shortTerm": [<string>],
    "longTerm": [<string>]
  }},
  "detailedAnalysis": <string>
}}

Return only the JSON object, starting with {{ and ending with }}, with no other text."#,
            count = sorted.len(),
            skills = Self::skill_schema(),
        )
    }

    fn session_block(number: usize, record: &AssessmentRecord) -> String {
        let assessment = &record.assessment;
        let mut block = format!(
            "Session {number} ({date}): \"{label}\"\nProficiency: {proficiency}\nOverall Score: {score}\n",
            date = record.date(),
            label = record.session_label,
            proficiency = assessment.proficiency_label,
            score = assessment.overall_score,
        );

        for area in SkillArea::ALL {
            let detail = assessment.skill(area);
            let _ = writeln!(block, "{area} Score: {}", detail.score);
            let _ = writeln!(block, "{area} Feedback: {}", detail.feedback);
            let _ = writeln!(block, "{area} Examples: {}", detail.examples.join(", "));
            let _ = writeln!(block, "{area} Tips: {}", detail.tips.join(", "));
        }
        let _ = writeln!(block, "Strengths: {}", assessment.strengths.join(", "));
        let _ = write!(block, "Weaknesses: {}", assessment.weaknesses.join(", "));
        block
    }

    fn skill_schema() -> String {
        SkillArea::ALL
            .iter()
            .map(|area| {
                format!(
                    r#"    "{key}": {{
      "currentScore": <integer 0-100>,
      "initialScore": <integer 0-100>,
      "improvementPercentage": <integer>,
      "trend": <"improving" | "steady" | "declining">,
      "commonErrors": [<string>],
      "recommendedExercises": [<string>],
      "detailedFeedback": <string>
    }}"#,
                    key = area.key()
                )
            })
            .collect::<Vec<_>>()
            .join(",\n")
    }
}

/// Slices the first `{` through the last `}` inclusive.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Validates narrative responses against the metrics shape.
pub struct NarrativeValidator;

impl NarrativeValidator {
    /// Validates `text` as the metrics for `expected_sessions` records.
    ///
    /// `activityByDay` in the response is discarded; it is never trusted.
    pub fn validate(text: &str, expected_sessions: usize) -> NarrativeOutcome {
        match Self::parse(text, expected_sessions) {
            Ok(metrics) => NarrativeOutcome::Parsed(Box::new(metrics)),
            Err(rejection) => NarrativeOutcome::Rejected(rejection),
        }
    }

    fn parse(text: &str, expected_sessions: usize) -> Result<ProgressMetrics, NarrativeRejection> {
        let unfenced = text.replace("```json", "").replace("```", "");
        let json = extract_json_object(unfenced.trim()).ok_or(NarrativeRejection::NoJsonObject)?;

        let mut value: Value = serde_json::from_str(json)
            .map_err(|e| NarrativeRejection::InvalidJson(e.to_string()))?;
        if let Some(object) = value.as_object_mut() {
            object.remove("activityByDay");
        }

        let metrics: ProgressMetrics = serde_json::from_value(value)
            .map_err(|e| NarrativeRejection::InvalidShape(e.to_string()))?;

        let per_week = metrics.study_habits.average_sessions_per_week;
        if !per_week.is_finite() || per_week < 0.0 {
            return Err(NarrativeRejection::OutOfRange {
                field: "studyHabits.averageSessionsPerWeek".to_string(),
                reason: format!("expected a finite, non-negative number, got {per_week}"),
            });
        }
        if let Some(duration) = metrics.study_habits.average_session_duration {
            if !duration.is_finite() || duration < 0.0 {
                return Err(NarrativeRejection::OutOfRange {
                    field: "studyHabits.averageSessionDuration".to_string(),
                    reason: format!("expected a finite, non-negative number, got {duration}"),
                });
            }
        }

        let expected = u32::try_from(expected_sessions).unwrap_or(u32::MAX);
        if metrics.total_sessions != expected {
            return Err(NarrativeRejection::SessionCountMismatch {
                expected,
                actual: metrics.total_sessions,
            });
        }

        Ok(metrics)
    }
}
