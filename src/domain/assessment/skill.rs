//! The four tracked speaking skills.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked speaking skill.
///
/// Declaration order is the canonical enumeration order. Every tie-break in
/// the progress calculators resolves in favour of the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillArea {
    Pronunciation,
    Fluency,
    Grammar,
    Vocabulary,
}

impl SkillArea {
    /// All skills in canonical order.
    pub const ALL: [SkillArea; 4] = [
        SkillArea::Pronunciation,
        SkillArea::Fluency,
        SkillArea::Grammar,
        SkillArea::Vocabulary,
    ];

    /// Wire key used in assessment and metrics payloads.
    pub fn key(&self) -> &'static str {
        match self {
            SkillArea::Pronunciation => "pronunciation",
            SkillArea::Fluency => "fluency",
            SkillArea::Grammar => "grammar",
            SkillArea::Vocabulary => "vocabulary",
        }
    }

    /// Capitalized display label.
    pub fn label(&self) -> &'static str {
        match self {
            SkillArea::Pronunciation => "Pronunciation",
            SkillArea::Fluency => "Fluency",
            SkillArea::Grammar => "Grammar",
            SkillArea::Vocabulary => "Vocabulary",
        }
    }
}

impl fmt::Display for SkillArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
