//! Assessment reader port (read side).
//!
//! The store of assessment records is owned elsewhere; analytics only ever
//! read it. Every query is scoped to an owner.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::assessment::AssessmentRecord;
use crate::domain::foundation::{RecordId, UserId};

/// Reader port for a learner's assessment history.
#[async_trait]
pub trait AssessmentReader: Send + Sync {
    /// All records owned by `owner`, oldest first.
    ///
    /// An owner with no sessions yields an empty list, not an error.
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<AssessmentRecord>, AssessmentReaderError>;

    /// One record, checked against `owner`.
    ///
    /// Returns `Forbidden` if the record exists but belongs to someone else.
    async fn get_by_id(
        &self,
        id: &RecordId,
        owner: &UserId,
    ) -> Result<AssessmentRecord, AssessmentReaderError>;
}

/// Errors from the assessment store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentReaderError {
    /// The store could not be read.
    #[error("assessment store unavailable: {0}")]
    Unavailable(String),

    #[error("assessment record {0} not found")]
    NotFound(RecordId),

    #[error("assessment record {0} belongs to another user")]
    Forbidden(RecordId),
}

impl AssessmentReaderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}
