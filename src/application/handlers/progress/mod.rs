//! Progress analytics query handlers.

mod compute_activity_calendar;
mod compute_progress_metrics;
mod get_assessment_record;

pub use compute_activity_calendar::{ComputeActivityCalendarHandler, ComputeActivityCalendarQuery};
pub use compute_progress_metrics::{
    ComputeProgressMetricsHandler, ComputeProgressMetricsQuery, MetricsSource,
};
pub use get_assessment_record::{GetAssessmentRecordHandler, GetAssessmentRecordQuery};
