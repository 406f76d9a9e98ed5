//! Application layer - Queries, Commands, and Handlers.
//!
//! This layer orchestrates domain calculations and coordinates between ports.
//! Query handlers read the assessment history; the only command produces a
//! session title and writes nothing.

pub mod handlers;

pub use handlers::{
    ComputeActivityCalendarHandler, ComputeActivityCalendarQuery, ComputeProgressMetricsHandler,
    ComputeProgressMetricsQuery, GenerateSessionTitleCommand, GenerateSessionTitleHandler,
    GetAssessmentRecordHandler, GetAssessmentRecordQuery, MetricsSource, DEFAULT_SESSION_TITLE,
};
