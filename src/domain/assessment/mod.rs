//! Assessment module - Per-session skill evaluations and their history.
//!
//! Assessments are produced by an external generative assessor and stored
//! by an external document store. This module owns only their shape and the
//! normalization applied when reading them back.

mod record;
mod skill;
mod skill_assessment;

pub use record::{sort_chronologically, AssessmentRecord};
pub use skill::SkillArea;
pub use skill_assessment::{SkillAssessment, SkillDetail};
