//! Stored assessment history entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SkillAssessment;
use crate::domain::foundation::{RecordId, Timestamp, UserId};

/// One completed practice session and its frozen assessment.
///
/// Records are append-only: written once when a session ends and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: RecordId,
    pub owner_id: UserId,
    pub created_at: Timestamp,
    /// Short display title. Not used by any calculation.
    pub session_label: String,
    pub assessment: SkillAssessment,
}

impl AssessmentRecord {
    /// Creates a record with a fresh identifier.
    pub fn new(
        owner_id: UserId,
        created_at: Timestamp,
        session_label: impl Into<String>,
        assessment: SkillAssessment,
    ) -> Self {
        Self {
            id: RecordId::new(),
            owner_id,
            created_at,
            session_label: session_label.into(),
            assessment,
        }
    }

    /// Calendar day the session belongs to (UTC truncation).
    pub fn date(&self) -> NaiveDate {
        self.created_at.utc_date()
    }

    /// Returns true if the record belongs to the given user.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}

/// Sorts records oldest first.
///
/// Ties on `created_at` fall back to the record id so the order is total and
/// independent of the order the store returned.
pub fn sort_chronologically(records: &mut [AssessmentRecord]) {
    records.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });
}
