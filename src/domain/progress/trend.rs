//! Coarse trend classification with a noise dead-band.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fewest sessions that can carry a trend.
pub const MIN_RECORDS_FOR_TREND: usize = 3;

/// Changes strictly inside ±this many percent read as steady.
pub const TREND_DEAD_BAND_PERCENT: i32 = 5;

/// Direction of the overall score across a session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressTrend {
    Improving,
    Steady,
    Declining,
    InsufficientData,
}

impl ProgressTrend {
    /// Classifies a percentage change over `record_count` sessions.
    pub fn classify(record_count: usize, progress_percentage: i32) -> Self {
        if record_count < MIN_RECORDS_FOR_TREND {
            return ProgressTrend::InsufficientData;
        }
        if progress_percentage >= TREND_DEAD_BAND_PERCENT {
            ProgressTrend::Improving
        } else if progress_percentage <= -TREND_DEAD_BAND_PERCENT {
            ProgressTrend::Declining
        } else {
            ProgressTrend::Steady
        }
    }

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressTrend::Improving => "improving",
            ProgressTrend::Steady => "steady",
            ProgressTrend::Declining => "declining",
            ProgressTrend::InsufficientData => "insufficient-data",
        }
    }
}

impl fmt::Display for ProgressTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-skill trend. Has no "insufficient data" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillTrend {
    Improving,
    Steady,
    Declining,
}

impl From<ProgressTrend> for SkillTrend {
    /// Both `Steady` and `InsufficientData` collapse to `Steady`.
    fn from(trend: ProgressTrend) -> Self {
        match trend {
            ProgressTrend::Improving => SkillTrend::Improving,
            ProgressTrend::Declining => SkillTrend::Declining,
            ProgressTrend::Steady | ProgressTrend::InsufficientData => SkillTrend::Steady,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_flip_exactly_at_five_percent() {
        assert_eq!(ProgressTrend::classify(3, 5), ProgressTrend::Improving);
        assert_eq!(ProgressTrend::classify(3, 4), ProgressTrend::Steady);
        assert_eq!(ProgressTrend::classify(3, -4), ProgressTrend::Steady);
        assert_eq!(ProgressTrend::classify(3, -5), ProgressTrend::Declining);
    }

    #[test]
    fn fewer_than_three_records_is_insufficient() {
        for count in 0..MIN_RECORDS_FOR_TREND {
            assert_eq!(ProgressTrend::classify(count, 90), ProgressTrend::InsufficientData);
            assert_eq!(ProgressTrend::classify(count, -90), ProgressTrend::InsufficientData);
        }
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&ProgressTrend::InsufficientData).unwrap();
        assert_eq!(json, "\"insufficient-data\"");
        let parsed: ProgressTrend = serde_json::from_str("\"improving\"").unwrap();
        assert_eq!(parsed, ProgressTrend::Improving);
    }

    #[test]
    fn skill_trend_rejects_insufficient_data() {
        assert!(serde_json::from_str::<SkillTrend>("\"insufficient-data\"").is_err());
    }

    #[test]
    fn skill_trend_coerces_from_overall() {
        assert_eq!(SkillTrend::from(ProgressTrend::Improving), SkillTrend::Improving);
        assert_eq!(SkillTrend::from(ProgressTrend::Declining), SkillTrend::Declining);
        assert_eq!(SkillTrend::from(ProgressTrend::Steady), SkillTrend::Steady);
        assert_eq!(SkillTrend::from(ProgressTrend::InsufficientData), SkillTrend::Steady);
    }

    proptest! {
        #[test]
        fn dead_band_reads_steady(pct in -4i32..=4, count in 3usize..50) {
            prop_assert_eq!(ProgressTrend::classify(count, pct), ProgressTrend::Steady);
        }

        #[test]
        fn outside_dead_band_has_direction(pct in 5i32..10_000, count in 3usize..50) {
            prop_assert_eq!(ProgressTrend::classify(count, pct), ProgressTrend::Improving);
            prop_assert_eq!(ProgressTrend::classify(count, -pct), ProgressTrend::Declining);
        }
    }
}
