//! Application handlers.
//!
//! Query and command handlers that orchestrate domain operations over ports.

pub mod progress;
pub mod session;

pub use progress::{
    ComputeActivityCalendarHandler, ComputeActivityCalendarQuery, ComputeProgressMetricsHandler,
    ComputeProgressMetricsQuery, GetAssessmentRecordHandler, GetAssessmentRecordQuery,
    MetricsSource,
};
pub use session::{GenerateSessionTitleCommand, GenerateSessionTitleHandler, DEFAULT_SESSION_TITLE};
