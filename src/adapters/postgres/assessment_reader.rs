//! PostgreSQL implementation of AssessmentReader.
//!
//! Reads the append-only `assessment_records` table. Stored assessment JSON
//! is normalized on the way out, never rejected.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::assessment::{AssessmentRecord, SkillAssessment};
use crate::domain::foundation::{RecordId, Timestamp, UserId};
use crate::ports::{AssessmentReader, AssessmentReaderError};

/// PostgreSQL implementation of AssessmentReader.
#[derive(Clone)]
pub struct PostgresAssessmentReader {
    pool: PgPool,
}

impl PostgresAssessmentReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentReader for PostgresAssessmentReader {
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<AssessmentRecord>, AssessmentReaderError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, session_label, assessment, created_at
            FROM assessment_records
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AssessmentReaderError::unavailable(format!("Failed to list assessments: {}", e))
        })?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn get_by_id(
        &self,
        id: &RecordId,
        owner: &UserId,
    ) -> Result<AssessmentRecord, AssessmentReaderError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, session_label, assessment, created_at
            FROM assessment_records
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AssessmentReaderError::unavailable(format!("Failed to fetch assessment: {}", e))
        })?
        .ok_or(AssessmentReaderError::NotFound(*id))?;

        let record = row_to_record(row)?;
        if !record.is_owned_by(owner) {
            return Err(AssessmentReaderError::Forbidden(*id));
        }
        Ok(record)
    }
}

fn column_error(column: &str, e: impl std::fmt::Display) -> AssessmentReaderError {
    AssessmentReaderError::unavailable(format!("Failed to get {}: {}", column, e))
}

fn row_to_record(row: sqlx::postgres::PgRow) -> Result<AssessmentRecord, AssessmentReaderError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| column_error("user_id", e))?;
    let session_label: Option<String> = row
        .try_get("session_label")
        .map_err(|e| column_error("session_label", e))?;
    let assessment: Option<serde_json::Value> = row
        .try_get("assessment")
        .map_err(|e| column_error("assessment", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;

    Ok(AssessmentRecord {
        id: RecordId::from_uuid(id),
        owner_id: UserId::new(user_id).map_err(|e| column_error("user_id", e))?,
        created_at: Timestamp::from_datetime(created_at),
        session_label: session_label.unwrap_or_default(),
        assessment: SkillAssessment::from_untrusted(assessment.unwrap_or_default()),
    })
}
