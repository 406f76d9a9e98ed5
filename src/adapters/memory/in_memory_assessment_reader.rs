//! In-Memory Assessment Reader
//!
//! Holds assessment records in memory. Backs tests and local development
//! when no database is configured.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::assessment::{sort_chronologically, AssessmentRecord};
use crate::domain::foundation::{RecordId, UserId};
use crate::ports::{AssessmentReader, AssessmentReaderError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentReader {
    records: Arc<RwLock<HashMap<RecordId, AssessmentRecord>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryAssessmentReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader pre-loaded with `records`.
    pub async fn with_records(records: impl IntoIterator<Item = AssessmentRecord>) -> Self {
        let reader = Self::new();
        for record in records {
            reader.insert(record).await;
        }
        reader
    }

    /// Stores a record, replacing any with the same id.
    pub async fn insert(&self, record: AssessmentRecord) {
        self.records.write().await.insert(record.id, record);
    }

    /// Makes every read fail as if the store were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    fn check_available(&self) -> Result<(), AssessmentReaderError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AssessmentReaderError::unavailable("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl AssessmentReader for InMemoryAssessmentReader {
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<AssessmentRecord>, AssessmentReaderError> {
        self.check_available()?;

        let mut owned: Vec<_> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.is_owned_by(owner))
            .cloned()
            .collect();
        sort_chronologically(&mut owned);
        Ok(owned)
    }

    async fn get_by_id(
        &self,
        id: &RecordId,
        owner: &UserId,
    ) -> Result<AssessmentRecord, AssessmentReaderError> {
        self.check_available()?;

        let records = self.records.read().await;
        let record = records
            .get(id)
            .ok_or(AssessmentReaderError::NotFound(*id))?;
        if !record.is_owned_by(owner) {
            return Err(AssessmentReaderError::Forbidden(*id));
        }
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::SkillAssessment;
    use crate::domain::foundation::Timestamp;

    fn record(owner: &str, day: u32) -> AssessmentRecord {
        AssessmentRecord::new(
            UserId::new(owner).unwrap(),
            Timestamp::from_ymd(2024, 5, day).unwrap(),
            "Small talk",
            SkillAssessment::default(),
        )
    }

    #[tokio::test]
    async fn lists_only_owned_records_oldest_first() {
        let reader = InMemoryAssessmentReader::with_records(vec![
            record("alice", 9),
            record("bob", 1),
            record("alice", 2),
        ])
        .await;

        let listed = reader.list_by_owner(&UserId::new("alice").unwrap()).await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].date().to_string(), "2024-05-02");
        assert_eq!(listed[1].date().to_string(), "2024-05-09");
    }

    #[tokio::test]
    async fn unknown_owner_gets_empty_list() {
        let reader = InMemoryAssessmentReader::with_records(vec![record("alice", 1)]).await;
        let listed = reader.list_by_owner(&UserId::new("carol").unwrap()).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn get_by_id_checks_ownership() {
        let owned = record("alice", 1);
        let id = owned.id;
        let reader = InMemoryAssessmentReader::with_records(vec![owned]).await;

        let found = reader.get_by_id(&id, &UserId::new("alice").unwrap()).await.unwrap();
        assert_eq!(found.id, id);

        let err = reader.get_by_id(&id, &UserId::new("bob").unwrap()).await.unwrap_err();
        assert_eq!(err, AssessmentReaderError::Forbidden(id));

        let missing = RecordId::new();
        let err = reader.get_by_id(&missing, &UserId::new("alice").unwrap()).await.unwrap_err();
        assert_eq!(err, AssessmentReaderError::NotFound(missing));
    }

    #[tokio::test]
    async fn unavailable_store_fails_reads() {
        let reader = InMemoryAssessmentReader::with_records(vec![record("alice", 1)]).await;
        reader.set_unavailable(true);

        let err = reader.list_by_owner(&UserId::new("alice").unwrap()).await.unwrap_err();
        assert!(matches!(err, AssessmentReaderError::Unavailable(_)));
        assert_eq!(reader.record_count().await, 1);
    }
}
