//! Analytics readiness and consistency rating.

use serde::{Deserialize, Serialize};

use super::arithmetic::round_half_up;
use crate::domain::foundation::Score;

/// Default number of sessions before advanced analytics unlock.
pub const MIN_SESSIONS_FOR_ANALYTICS: u32 = 5;

/// How close a learner is to unlocking advanced analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReadiness {
    pub session_count: u32,
    pub minimum_sessions: u32,
    pub sessions_needed: u32,
    pub has_enough_sessions: bool,
    pub completion_percentage: u8,
}

impl AnalyticsReadiness {
    /// Computes readiness. A zero minimum is treated as one.
    pub fn evaluate(session_count: u32, minimum_sessions: u32) -> Self {
        let minimum = minimum_sessions.max(1);
        let completion = round_half_up(f64::from(session_count) / f64::from(minimum) * 100.0);

        Self {
            session_count,
            minimum_sessions: minimum,
            sessions_needed: minimum.saturating_sub(session_count),
            has_enough_sessions: session_count >= minimum,
            completion_percentage: completion.clamp(0, 100) as u8,
        }
    }
}

/// Verbal band for a consistency score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsistencyRating {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
    Inconsistent,
}

impl ConsistencyRating {
    pub fn from_score(score: Score) -> Self {
        match score.value() {
            80..=u8::MAX => ConsistencyRating::Excellent,
            60..=79 => ConsistencyRating::Good,
            40..=59 => ConsistencyRating::Average,
            20..=39 => ConsistencyRating::NeedsImprovement,
            _ => ConsistencyRating::Inconsistent,
        }
    }

    /// Text shown next to the score.
    pub fn label(&self) -> &'static str {
        match self {
            ConsistencyRating::Excellent => "Excellent consistency!",
            ConsistencyRating::Good => "Good consistency",
            ConsistencyRating::Average => "Average consistency",
            ConsistencyRating::NeedsImprovement => "Needs improvement",
            ConsistencyRating::Inconsistent => "Inconsistent practice",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_counts_down_to_minimum() {
        let readiness = AnalyticsReadiness::evaluate(2, MIN_SESSIONS_FOR_ANALYTICS);
        assert_eq!(readiness.sessions_needed, 3);
        assert!(!readiness.has_enough_sessions);
        assert_eq!(readiness.completion_percentage, 40);
    }

    #[test]
    fn readiness_caps_at_complete() {
        let readiness = AnalyticsReadiness::evaluate(12, 5);
        assert_eq!(readiness.sessions_needed, 0);
        assert!(readiness.has_enough_sessions);
        assert_eq!(readiness.completion_percentage, 100);
    }

    #[test]
    fn readiness_rounds_half_up() {
        // 1/8 = 12.5%
        assert_eq!(AnalyticsReadiness::evaluate(1, 8).completion_percentage, 13);
        assert_eq!(AnalyticsReadiness::evaluate(0, 5).completion_percentage, 0);
    }

    #[test]
    fn zero_minimum_is_treated_as_one() {
        let readiness = AnalyticsReadiness::evaluate(0, 0);
        assert_eq!(readiness.minimum_sessions, 1);
        assert_eq!(readiness.sessions_needed, 1);
    }

    #[test]
    fn consistency_bands() {
        let rate = |v| ConsistencyRating::from_score(Score::new(v));
        assert_eq!(rate(100), ConsistencyRating::Excellent);
        assert_eq!(rate(80), ConsistencyRating::Excellent);
        assert_eq!(rate(79), ConsistencyRating::Good);
        assert_eq!(rate(60), ConsistencyRating::Good);
        assert_eq!(rate(59), ConsistencyRating::Average);
        assert_eq!(rate(40), ConsistencyRating::Average);
        assert_eq!(rate(39), ConsistencyRating::NeedsImprovement);
        assert_eq!(rate(20), ConsistencyRating::NeedsImprovement);
        assert_eq!(rate(19), ConsistencyRating::Inconsistent);
        assert_eq!(rate(0).label(), "Inconsistent practice");
        assert_eq!(rate(85).label(), "Excellent consistency!");
    }
}
