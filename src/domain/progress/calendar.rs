//! Activity calendar - per-day session counts and average scores.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::arithmetic::rounded_mean;
use crate::domain::assessment::AssessmentRecord;
use crate::domain::foundation::Score;

/// Practice activity on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    /// `YYYY-MM-DD`, UTC.
    pub date: NaiveDate,
    #[serde(alias = "count")]
    pub session_count: u32,
    pub average_score: Score,
}

/// Builds the activity calendar from an assessment history.
pub struct ActivityCalendar;

impl ActivityCalendar {
    /// Buckets records by UTC date.
    ///
    /// Only dates that have at least one record appear; gaps are not filled.
    /// Output is sorted ascending by date and does not depend on the input
    /// order.
    pub fn build(records: &[AssessmentRecord]) -> Vec<DailyActivity> {
        let mut days: BTreeMap<NaiveDate, Vec<Score>> = BTreeMap::new();
        for record in records {
            days.entry(record.date())
                .or_default()
                .push(record.assessment.overall_score);
        }

        days.into_iter()
            .map(|(date, scores)| DailyActivity {
                date,
                session_count: scores.len() as u32,
                average_score: rounded_mean(scores),
            })
            .collect()
    }
}
