//! Progress analytics configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Progress analytics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Sessions required before advanced analytics unlock
    #[serde(default = "default_min_sessions")]
    pub min_sessions_for_analytics: u32,

    /// Upper bound on the narrative call, in seconds
    pub narrative_deadline_secs: Option<u64>,

    /// Use the generative narrative when a provider is configured
    #[serde(default = "default_narrative_enabled")]
    pub narrative_enabled: bool,
}

impl AnalyticsConfig {
    pub fn narrative_deadline(&self) -> Option<Duration> {
        self.narrative_deadline_secs.map(Duration::from_secs)
    }

    /// Validate analytics configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_sessions_for_analytics == 0 {
            return Err(ValidationError::InvalidMinimumSessions);
        }
        if self.narrative_deadline_secs == Some(0) {
            return Err(ValidationError::InvalidNarrativeDeadline);
        }
        Ok(())
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            min_sessions_for_analytics: default_min_sessions(),
            narrative_deadline_secs: None,
            narrative_enabled: default_narrative_enabled(),
        }
    }
}

fn default_min_sessions() -> u32 {
    5
}

fn default_narrative_enabled() -> bool {
    true
}
