//! The progress metrics aggregate and its static constructors.

use serde::{Deserialize, Deserializer, Serialize};
use std::slice;

use super::calendar::{ActivityCalendar, DailyActivity};
use super::skill_trend::{SkillProgress, SkillProgressMap};
use super::trend::ProgressTrend;
use crate::domain::assessment::AssessmentRecord;
use crate::domain::foundation::Score;

/// Longitudinal analytics for one learner.
///
/// Always fully populated: fields a calculation path cannot derive carry
/// empty or zero values rather than being omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressMetrics {
    pub total_sessions: u32,
    pub average_score: Score,
    pub progress_trend: ProgressTrend,
    pub most_improved_area: String,
    pub area_needed_focus: String,
    pub recent_strengths: Vec<String>,
    pub recent_weaknesses: Vec<String>,
    pub proficiency_level: String,
    pub progress_percentage: i32,
    pub insight_summary: String,

    pub skill_progress: SkillProgressMap,
    pub consistency_score: Score,
    pub study_habits: StudyHabits,
    pub learning_insights: Vec<LearningInsight>,
    pub predicted_time_to_next_level: String,
    pub recommended_focus: RecommendedFocus,
    pub detailed_analysis: String,

    /// Always recomputed locally; any incoming value is replaced.
    #[serde(default)]
    pub activity_by_day: Vec<DailyActivity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyHabits {
    pub average_sessions_per_week: f64,
    pub most_active_day: String,
    /// Minutes. Only ever supplied by the narrative path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_session_duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningInsight {
    pub title: String,
    pub description: String,
    pub impact: InsightImpact,
}

/// How much acting on an insight is expected to help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightImpact {
    High,
    Medium,
    Low,
}

// Generated insights often append a justification ("high - because ...");
// the leading word decides.
impl<'de> Deserialize<'de> for InsightImpact {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let normalized = raw.trim().to_lowercase();
        if normalized.starts_with("high") {
            Ok(InsightImpact::High)
        } else if normalized.starts_with("medium") {
            Ok(InsightImpact::Medium)
        } else if normalized.starts_with("low") {
            Ok(InsightImpact::Low)
        } else {
            Err(serde::de::Error::unknown_variant(
                &raw,
                &["high", "medium", "low"],
            ))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedFocus {
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

impl ProgressMetrics {
    /// Metrics for a learner with no sessions yet.
    pub fn no_data() -> Self {
        Self {
            total_sessions: 0,
            average_score: Score::ZERO,
            progress_trend: ProgressTrend::InsufficientData,
            most_improved_area: "No data available".to_string(),
            area_needed_focus: "Start with regular speaking practice".to_string(),
            recent_strengths: Vec::new(),
            recent_weaknesses: Vec::new(),
            proficiency_level: "Not determined".to_string(),
            progress_percentage: 0,
            insight_summary: "You haven't completed any practice sessions yet. \
                              Start practicing to track your progress!"
                .to_string(),
            skill_progress: SkillProgressMap::from_fn(|_| SkillProgress::unchanged(Score::ZERO)),
            consistency_score: Score::ZERO,
            study_habits: StudyHabits::default(),
            learning_insights: Vec::new(),
            predicted_time_to_next_level: String::new(),
            recommended_focus: RecommendedFocus::default(),
            detailed_analysis: String::new(),
            activity_by_day: Vec::new(),
        }
    }

    /// Metrics synthesized directly from a learner's only session.
    ///
    /// No trend or percentage can be derived from one data point.
    pub fn single_session(record: &AssessmentRecord) -> Self {
        let assessment = &record.assessment;

        Self {
            total_sessions: 1,
            average_score: assessment.overall_score,
            progress_trend: ProgressTrend::InsufficientData,
            most_improved_area: "Need more sessions to determine".to_string(),
            area_needed_focus: assessment
                .weaknesses
                .first()
                .cloned()
                .unwrap_or_else(|| "General practice".to_string()),
            recent_strengths: assessment.strengths.clone(),
            recent_weaknesses: assessment.weaknesses.clone(),
            proficiency_level: assessment.proficiency_label.clone(),
            progress_percentage: 0,
            insight_summary: format!(
                "Based on your first session, your current proficiency level is {} \
                 with an overall score of {}. Continue practicing to track your \
                 progress over time.",
                assessment.proficiency_label, assessment.overall_score
            ),
            skill_progress: SkillProgressMap::from_fn(|area| {
                SkillProgress::unchanged(assessment.skill(area).score)
            }),
            consistency_score: Score::ZERO,
            study_habits: StudyHabits::default(),
            learning_insights: Vec::new(),
            predicted_time_to_next_level: String::new(),
            recommended_focus: RecommendedFocus::default(),
            detailed_analysis: String::new(),
            activity_by_day: ActivityCalendar::build(slice::from_ref(record)),
        }
    }

    /// Replaces the activity calendar with `calendar`.
    pub fn with_activity(mut self, calendar: Vec<DailyActivity>) -> Self {
        self.activity_by_day = calendar;
        self
    }
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;
