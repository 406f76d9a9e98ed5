//! Deterministic fallback calculator.
//!
//! Re-derives every metric from the record history without external calls,
//! so analytics render even when the narrative collaborator is down.

use super::arithmetic::rounded_mean;
use super::calendar::ActivityCalendar;
use super::metrics::{ProgressMetrics, RecommendedFocus, StudyHabits};
use super::skill_trend::SkillTrendCalculator;
use super::trend::ProgressTrend;
use crate::domain::assessment::{sort_chronologically, AssessmentRecord};
use crate::domain::foundation::Score;

pub struct FallbackCalculator;

impl FallbackCalculator {
    /// Computes metrics for a history of any size.
    ///
    /// Empty and single-record histories delegate to the static
    /// constructors so the result is always fully populated.
    pub fn calculate(records: &[AssessmentRecord]) -> ProgressMetrics {
        let mut sorted = records.to_vec();
        sort_chronologically(&mut sorted);

        let (first, last) = match (sorted.first(), sorted.last()) {
            (Some(first), Some(last)) if sorted.len() > 1 => (first, last),
            (Some(only), _) => return ProgressMetrics::single_session(only),
            _ => return ProgressMetrics::no_data(),
        };

        let calc = SkillTrendCalculator::new(first, last);
        let progress_percentage = calc.progress_percentage();
        let progress_trend = calc.progress_trend(sorted.len());
        let most_improved = calc.most_improved();
        let needs_focus = calc.needs_focus();
        let latest = &last.assessment;

        ProgressMetrics {
            total_sessions: sorted.len() as u32,
            average_score: rounded_mean(sorted.iter().map(|r| r.assessment.overall_score)),
            progress_trend,
            most_improved_area: most_improved.label().to_string(),
            area_needed_focus: needs_focus.label().to_string(),
            recent_strengths: latest.strengths.clone(),
            recent_weaknesses: latest.weaknesses.clone(),
            proficiency_level: latest.proficiency_label.clone(),
            progress_percentage,
            insight_summary: Self::insight_summary(
                sorted.len(),
                progress_trend,
                &latest.proficiency_label,
                most_improved.label(),
                needs_focus.label(),
            ),
            skill_progress: calc.skill_progress(progress_trend),
            consistency_score: Score::ZERO,
            study_habits: StudyHabits::default(),
            learning_insights: Vec::new(),
            predicted_time_to_next_level: String::new(),
            recommended_focus: RecommendedFocus::default(),
            detailed_analysis: String::new(),
            activity_by_day: ActivityCalendar::build(&sorted),
        }
    }

    fn insight_summary(
        session_count: usize,
        trend: ProgressTrend,
        proficiency: &str,
        most_improved: &str,
        needs_focus: &str,
    ) -> String {
        let direction = match trend {
            ProgressTrend::Improving => "progress shows improvement",
            ProgressTrend::Declining => "progress needs attention",
            ProgressTrend::Steady | ProgressTrend::InsufficientData => "progress remains steady",
        };

        format!(
            "Based on your {session_count} sessions, your {direction}. Your current \
             proficiency level is {proficiency} with {most_improved} as your most \
             improved area. Focus on improving your {needs_focus} skills for better results."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{SkillAssessment, SkillDetail};
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::progress::SkillTrend;

    fn record(day: u32, score: u8) -> AssessmentRecord {
        AssessmentRecord::new(
            UserId::new("learner").unwrap(),
            Timestamp::from_ymd(2024, 1, day).unwrap(),
            format!("Session on day {day}"),
            SkillAssessment {
                overall_score: Score::new(score),
                proficiency_label: "Intermediate".to_string(),
                strengths: vec![format!("strength {day}")],
                weaknesses: vec![format!("weakness {day}")],
                pronunciation: SkillDetail::with_score(score),
                fluency: SkillDetail::with_score(score),
                grammar: SkillDetail::with_score(score),
                vocabulary: SkillDetail::with_score(score),
            },
        )
    }

    #[test]
    fn three_improving_sessions() {
        let records = vec![record(1, 60), record(10, 80), record(20, 84)];
        let metrics = FallbackCalculator::calculate(&records);

        assert_eq!(metrics.total_sessions, 3);
        assert_eq!(metrics.average_score.value(), 75);
        assert_eq!(metrics.progress_percentage, 40);
        assert_eq!(metrics.progress_trend, ProgressTrend::Improving);
        for (_, skill) in metrics.skill_progress.iter() {
            assert_eq!(skill.improvement_percentage, 40);
            assert_eq!(skill.trend, SkillTrend::Improving);
            assert_eq!(skill.initial_score.value(), 60);
            assert_eq!(skill.current_score.value(), 84);
        }
    }

    #[test]
    fn input_order_does_not_matter() {
        let records = vec![record(20, 84), record(1, 60), record(10, 80)];
        let metrics = FallbackCalculator::calculate(&records);

        assert_eq!(metrics.progress_percentage, 40);
        assert_eq!(metrics.recent_strengths, vec!["strength 20"]);
        assert_eq!(metrics.recent_weaknesses, vec!["weakness 20"]);
        assert_eq!(
            metrics,
            FallbackCalculator::calculate(&[
                records[1].clone(),
                records[2].clone(),
                records[0].clone()
            ])
        );
    }

    #[test]
    fn two_sessions_are_insufficient_for_a_trend() {
        let records = vec![record(1, 40), record(2, 90)];
        let metrics = FallbackCalculator::calculate(&records);

        assert_eq!(metrics.progress_percentage, 125);
        assert_eq!(metrics.progress_trend, ProgressTrend::InsufficientData);
        assert!(metrics
            .skill_progress
            .iter()
            .all(|(_, p)| p.trend == SkillTrend::Steady));
    }

    #[test]
    fn insight_summary_uses_fixed_template() {
        let records = vec![record(1, 80), record(2, 70), record(3, 60)];
        let metrics = FallbackCalculator::calculate(&records);

        assert_eq!(metrics.progress_trend, ProgressTrend::Declining);
        assert_eq!(
            metrics.insight_summary,
            "Based on your 3 sessions, your progress needs attention. Your current \
             proficiency level is Intermediate with Pronunciation as your most improved \
             area. Focus on improving your Pronunciation skills for better results."
        );
    }

    #[test]
    fn advanced_fields_default_to_empty() {
        let metrics = FallbackCalculator::calculate(&[record(1, 60), record(2, 62)]);

        assert_eq!(metrics.consistency_score, Score::ZERO);
        assert_eq!(metrics.study_habits, StudyHabits::default());
        assert!(metrics.learning_insights.is_empty());
        assert!(metrics.predicted_time_to_next_level.is_empty());
        assert!(metrics.recommended_focus.short_term.is_empty());
        assert!(metrics.detailed_analysis.is_empty());
    }

    #[test]
    fn zero_first_score_never_leaks_non_finite_values() {
        let metrics = FallbackCalculator::calculate(&[record(1, 0), record(2, 0), record(3, 90)]);

        assert_eq!(metrics.progress_percentage, 0);
        assert_eq!(metrics.progress_trend, ProgressTrend::Steady);
        assert!(metrics.skill_progress.iter().all(|(_, p)| p.improvement_percentage == 0));
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(!json.contains("NaN") && !json.contains("null"));
    }

    #[test]
    fn degenerate_histories_use_static_constructors() {
        assert_eq!(FallbackCalculator::calculate(&[]), ProgressMetrics::no_data());

        let only = record(5, 55);
        assert_eq!(
            FallbackCalculator::calculate(std::slice::from_ref(&only)),
            ProgressMetrics::single_session(&only)
        );
    }

    #[test]
    fn attaches_calendar() {
        let records = vec![record(1, 60), record(1, 70), record(3, 90)];
        let metrics = FallbackCalculator::calculate(&records);
        assert_eq!(metrics.activity_by_day, ActivityCalendar::build(&records));
    }
}
