//! Progress analytics - pure calculators over an assessment history.
//!
//! Nothing in this module performs I/O. The narrative path's network call
//! lives behind the `ProgressNarrator` port; here are only its prompt and
//! response validation.

mod arithmetic;
mod calendar;
mod fallback;
mod metrics;
mod narrative;
mod readiness;
mod skill_trend;
mod trend;

pub use arithmetic::{percentage_change, round_half_up, rounded_mean};
pub use calendar::{ActivityCalendar, DailyActivity};
pub use fallback::FallbackCalculator;
pub use metrics::{InsightImpact, LearningInsight, ProgressMetrics, RecommendedFocus, StudyHabits};
pub use narrative::{
    extract_json_object, NarrativeOutcome, NarrativePrompt, NarrativeRejection, NarrativeValidator,
};
pub use readiness::{AnalyticsReadiness, ConsistencyRating, MIN_SESSIONS_FOR_ANALYTICS};
pub use skill_trend::{SkillProgress, SkillProgressMap, SkillTrendCalculator};
pub use trend::{ProgressTrend, SkillTrend, MIN_RECORDS_FOR_TREND, TREND_DEAD_BAND_PERCENT};
