//! GetAssessmentRecordHandler - Query handler for a single owned record.

use std::sync::Arc;

use crate::domain::assessment::AssessmentRecord;
use crate::domain::foundation::{RecordId, UserId};
use crate::ports::{AssessmentReader, AssessmentReaderError};

/// Query for one assessment record.
#[derive(Debug, Clone)]
pub struct GetAssessmentRecordQuery {
    pub record_id: RecordId,
    pub user_id: UserId,
}

/// Handler for reading a record the caller owns.
pub struct GetAssessmentRecordHandler {
    reader: Arc<dyn AssessmentReader>,
}

impl GetAssessmentRecordHandler {
    pub fn new(reader: Arc<dyn AssessmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetAssessmentRecordQuery,
    ) -> Result<AssessmentRecord, AssessmentReaderError> {
        let result = self.reader.get_by_id(&query.record_id, &query.user_id).await;

        if let Err(AssessmentReaderError::Forbidden(id)) = &result {
            tracing::warn!(
                user_id = %query.user_id,
                record_id = %id,
                "Access to foreign assessment record denied"
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAssessmentReader;
    use crate::domain::assessment::SkillAssessment;
    use crate::domain::foundation::{Score, Timestamp};

    fn owned_by(owner: &str) -> AssessmentRecord {
        AssessmentRecord::new(
            UserId::new(owner).unwrap(),
            Timestamp::from_ymd(2024, 2, 14).unwrap(),
            "Job interview",
            SkillAssessment {
                overall_score: Score::new(77),
                ..Default::default()
            },
        )
    }

    async fn handler_with(record: AssessmentRecord) -> GetAssessmentRecordHandler {
        let reader = InMemoryAssessmentReader::with_records(vec![record]).await;
        GetAssessmentRecordHandler::new(Arc::new(reader))
    }

    #[tokio::test]
    async fn owner_reads_record() {
        let record = owned_by("alice");
        let id = record.id;
        let handler = handler_with(record).await;

        let found = handler
            .handle(GetAssessmentRecordQuery {
                record_id: id,
                user_id: UserId::new("alice").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(found.session_label, "Job interview");
        assert_eq!(found.assessment.overall_score.value(), 77);
    }

    #[tokio::test]
    async fn other_user_is_forbidden() {
        let record = owned_by("alice");
        let id = record.id;
        let handler = handler_with(record).await;

        let err = handler
            .handle(GetAssessmentRecordQuery {
                record_id: id,
                user_id: UserId::new("mallory").unwrap(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, AssessmentReaderError::Forbidden(id));
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let handler = handler_with(owned_by("alice")).await;
        let missing = RecordId::new();

        let err = handler
            .handle(GetAssessmentRecordQuery {
                record_id: missing,
                user_id: UserId::new("alice").unwrap(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, AssessmentReaderError::NotFound(missing));
    }
}
