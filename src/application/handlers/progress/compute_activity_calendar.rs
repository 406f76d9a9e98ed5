//! ComputeActivityCalendarHandler - Query handler for the per-day activity view.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::progress::{ActivityCalendar, DailyActivity};
use crate::ports::{AssessmentReader, AssessmentReaderError};

/// Query for a learner's activity calendar.
#[derive(Debug, Clone)]
pub struct ComputeActivityCalendarQuery {
    pub user_id: UserId,
}

/// Handler for computing the activity calendar on its own.
pub struct ComputeActivityCalendarHandler {
    reader: Arc<dyn AssessmentReader>,
}

impl ComputeActivityCalendarHandler {
    pub fn new(reader: Arc<dyn AssessmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: ComputeActivityCalendarQuery,
    ) -> Result<Vec<DailyActivity>, AssessmentReaderError> {
        let records = self.reader.list_by_owner(&query.user_id).await?;
        Ok(ActivityCalendar::build(&records))
    }
}
