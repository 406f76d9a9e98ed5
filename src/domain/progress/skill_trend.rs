//! Skill trend calculator - first/last comparison per tracked skill.
//!
//! Shared by the deterministic fallback and the single-session path so the
//! per-skill arithmetic exists exactly once.

use serde::{Deserialize, Serialize};

use super::arithmetic::percentage_change;
use super::trend::{ProgressTrend, SkillTrend};
use crate::domain::assessment::{AssessmentRecord, SkillArea, SkillAssessment};
use crate::domain::foundation::Score;

/// Progress of one skill between the earliest and latest session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProgress {
    pub current_score: Score,
    pub initial_score: Score,
    pub improvement_percentage: i32,
    pub trend: SkillTrend,
    pub common_errors: Vec<String>,
    pub recommended_exercises: Vec<String>,
    pub detailed_feedback: String,
}

impl SkillProgress {
    /// Progress for a skill that has only been assessed once.
    pub fn unchanged(score: Score) -> Self {
        Self {
            current_score: score,
            initial_score: score,
            improvement_percentage: 0,
            trend: SkillTrend::Steady,
            common_errors: Vec::new(),
            recommended_exercises: Vec::new(),
            detailed_feedback: String::new(),
        }
    }
}

/// The four tracked skills, keyed by name on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProgressMap {
    pub pronunciation: SkillProgress,
    pub fluency: SkillProgress,
    pub grammar: SkillProgress,
    pub vocabulary: SkillProgress,
}

impl SkillProgressMap {
    /// Builds the map by evaluating `f` once per skill in enumeration order.
    pub fn from_fn(mut f: impl FnMut(SkillArea) -> SkillProgress) -> Self {
        Self {
            pronunciation: f(SkillArea::Pronunciation),
            fluency: f(SkillArea::Fluency),
            grammar: f(SkillArea::Grammar),
            vocabulary: f(SkillArea::Vocabulary),
        }
    }

    pub fn get(&self, area: SkillArea) -> &SkillProgress {
        match area {
            SkillArea::Pronunciation => &self.pronunciation,
            SkillArea::Fluency => &self.fluency,
            SkillArea::Grammar => &self.grammar,
            SkillArea::Vocabulary => &self.vocabulary,
        }
    }

    /// Iterates skills in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (SkillArea, &SkillProgress)> {
        SkillArea::ALL.into_iter().map(move |area| (area, self.get(area)))
    }
}

/// Compares the earliest and latest assessments of a history.
pub struct SkillTrendCalculator<'a> {
    first: &'a SkillAssessment,
    last: &'a SkillAssessment,
}

impl<'a> SkillTrendCalculator<'a> {
    /// `first` and `last` must be the chronological endpoints of the history.
    pub fn new(first: &'a AssessmentRecord, last: &'a AssessmentRecord) -> Self {
        Self {
            first: &first.assessment,
            last: &last.assessment,
        }
    }

    /// Overall score change in whole percent.
    pub fn progress_percentage(&self) -> i32 {
        percentage_change(
            self.first.overall_score.as_i64(),
            self.last.overall_score.as_i64(),
        )
    }

    /// Overall trend for a history of `record_count` sessions.
    pub fn progress_trend(&self, record_count: usize) -> ProgressTrend {
        ProgressTrend::classify(record_count, self.progress_percentage())
    }

    /// Per-skill progress. Skill trends follow the overall trend.
    pub fn skill_progress(&self, overall: ProgressTrend) -> SkillProgressMap {
        let trend = SkillTrend::from(overall);
        SkillProgressMap::from_fn(|area| {
            let initial = self.first.skill(area).score;
            let latest = self.last.skill(area);
            SkillProgress {
                current_score: latest.score,
                initial_score: initial,
                improvement_percentage: percentage_change(
                    initial.as_i64(),
                    latest.score.as_i64(),
                ),
                trend,
                common_errors: latest.examples.clone(),
                recommended_exercises: latest.tips.clone(),
                detailed_feedback: latest.feedback.clone(),
            }
        })
    }

    /// Skill with the greatest absolute score gain.
    ///
    /// Ties go to the earlier skill in enumeration order.
    pub fn most_improved(&self) -> SkillArea {
        let gain = |area: SkillArea| {
            self.last.skill(area).score.as_i64() - self.first.skill(area).score.as_i64()
        };

        let mut best = SkillArea::ALL[0];
        for area in SkillArea::ALL.into_iter().skip(1) {
            if gain(area) > gain(best) {
                best = area;
            }
        }
        best
    }

    /// Skill with the lowest latest score.
    ///
    /// Ties go to the earlier skill in enumeration order.
    pub fn needs_focus(&self) -> SkillArea {
        let latest = |area: SkillArea| self.last.skill(area).score;

        let mut lowest = SkillArea::ALL[0];
        for area in SkillArea::ALL.into_iter().skip(1) {
            if latest(area) < latest(lowest) {
                lowest = area;
            }
        }
        lowest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::SkillDetail;
    use crate::domain::foundation::{Timestamp, UserId};

    fn record(day: u32, overall: u8, skills: [u8; 4]) -> AssessmentRecord {
        let [p, f, g, v] = skills;
        AssessmentRecord::new(
            UserId::new("learner").unwrap(),
            Timestamp::from_ymd(2024, 1, day).unwrap(),
            "Session",
            SkillAssessment {
                overall_score: Score::new(overall),
                pronunciation: SkillDetail::with_score(p),
                fluency: SkillDetail::with_score(f),
                grammar: SkillDetail::with_score(g),
                vocabulary: SkillDetail::with_score(v),
                ..Default::default()
            },
        )
    }

    #[test]
    fn progress_percentage_uses_overall_scores() {
        let first = record(1, 60, [60; 4]);
        let last = record(20, 84, [84; 4]);
        let calc = SkillTrendCalculator::new(&first, &last);

        assert_eq!(calc.progress_percentage(), 40);
        assert_eq!(calc.progress_trend(3), ProgressTrend::Improving);
        assert_eq!(calc.progress_trend(2), ProgressTrend::InsufficientData);
    }

    #[test]
    fn zero_initial_skill_score_yields_zero_improvement() {
        let first = record(1, 0, [0, 50, 50, 50]);
        let last = record(2, 90, [95, 50, 50, 50]);
        let calc = SkillTrendCalculator::new(&first, &last);
        let progress = calc.skill_progress(ProgressTrend::Improving);

        assert_eq!(calc.progress_percentage(), 0);
        assert_eq!(progress.pronunciation.improvement_percentage, 0);
        assert_eq!(progress.pronunciation.current_score.value(), 95);
    }

    #[test]
    fn skill_trend_follows_overall_trend() {
        let first = record(1, 60, [80, 60, 60, 60]);
        let last = record(3, 84, [40, 84, 84, 84]);
        let calc = SkillTrendCalculator::new(&first, &last);

        let progress = calc.skill_progress(ProgressTrend::Improving);
        // Pronunciation dropped, but skill trends are not computed independently.
        assert_eq!(progress.pronunciation.trend, SkillTrend::Improving);
        assert_eq!(progress.pronunciation.improvement_percentage, -50);

        let progress = calc.skill_progress(ProgressTrend::InsufficientData);
        assert!(progress.iter().all(|(_, p)| p.trend == SkillTrend::Steady));
    }

    #[test]
    fn latest_record_supplies_errors_exercises_and_feedback() {
        let first = record(1, 60, [60; 4]);
        let mut last = record(2, 70, [70; 4]);
        last.assessment.grammar = SkillDetail {
            score: Score::new(70),
            feedback: "Tense agreement slips".to_string(),
            examples: vec![
                "Nonetheless he go to school".to_string(),
                "No specific examples".to_string(),
            ],
            tips: vec!["Practice third person -s".to_string()],
        };

        let calc = SkillTrendCalculator::new(&first, &last);
        let grammar = calc.skill_progress(ProgressTrend::Steady).grammar;

        assert_eq!(
            grammar.common_errors,
            vec!["Nonetheless he go to school", "No specific examples"]
        );
        assert_eq!(grammar.recommended_exercises, vec!["Practice third person -s"]);
        assert_eq!(grammar.detailed_feedback, "Tense agreement slips");
    }

    #[test]
    fn most_improved_picks_largest_gain() {
        let first = record(1, 60, [60, 50, 70, 65]);
        let last = record(2, 70, [65, 72, 75, 70]);
        let calc = SkillTrendCalculator::new(&first, &last);
        assert_eq!(calc.most_improved(), SkillArea::Fluency);
    }

    #[test]
    fn most_improved_ties_go_to_enumeration_order() {
        let first = record(1, 60, [60, 60, 60, 60]);
        let last = record(2, 70, [60, 70, 70, 70]);
        let calc = SkillTrendCalculator::new(&first, &last);
        assert_eq!(calc.most_improved(), SkillArea::Fluency);

        let last = record(2, 70, [55, 55, 55, 55]);
        let calc = SkillTrendCalculator::new(&first, &last);
        assert_eq!(calc.most_improved(), SkillArea::Pronunciation);
    }

    #[test]
    fn needs_focus_uses_lowest_latest_score_not_lowest_gain() {
        // Vocabulary regressed most, but grammar is lowest now.
        let first = record(1, 60, [60, 60, 40, 90]);
        let last = record(2, 70, [70, 70, 45, 60]);
        let calc = SkillTrendCalculator::new(&first, &last);
        assert_eq!(calc.needs_focus(), SkillArea::Grammar);
    }

    #[test]
    fn needs_focus_ties_go_to_enumeration_order() {
        let first = record(1, 60, [60; 4]);
        let last = record(2, 70, [80, 50, 50, 80]);
        let calc = SkillTrendCalculator::new(&first, &last);
        assert_eq!(calc.needs_focus(), SkillArea::Fluency);

        let last = record(2, 100, [100; 4]);
        let calc = SkillTrendCalculator::new(&first, &last);
        assert_eq!(calc.needs_focus(), SkillArea::Pronunciation);
    }

    #[test]
    fn skill_progress_map_serializes_by_skill_key() {
        let map = SkillProgressMap::from_fn(|_| SkillProgress::unchanged(Score::new(40)));
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["vocabulary"]["currentScore"], 40);
        assert_eq!(json["fluency"]["trend"], "steady");
        assert_eq!(json["grammar"]["improvementPercentage"], 0);
    }
}
