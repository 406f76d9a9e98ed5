//! Per-session skill assessment produced by the generative assessor.
//!
//! Assessments arrive as loosely-shaped JSON written by a language model and
//! are frozen once stored. Deserialization therefore never fails on content:
//! missing or mistyped fields collapse to neutral values (see
//! [`Score::from_untrusted`]) so one malformed historical record cannot take
//! the whole analytics view down.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::SkillArea;
use crate::domain::foundation::{deserialize_untrusted_score, Score};

/// Assessment of a single skill within a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDetail {
    #[serde(default, deserialize_with = "deserialize_untrusted_score")]
    pub score: Score,
    #[serde(default, deserialize_with = "lenient_string")]
    pub feedback: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub examples: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tips: Vec<String>,
}

impl SkillDetail {
    /// Creates a detail with only a score set.
    pub fn with_score(score: u8) -> Self {
        Self {
            score: Score::new(score),
            ..Default::default()
        }
    }
}

/// Structured evaluation of one practice session.
///
/// Deserialization goes through [`SkillAssessment::from_untrusted`], so it
/// accepts any JSON value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAssessment {
    pub overall_score: Score,
    /// CEFR-like label. Free text at this boundary.
    pub proficiency_label: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub pronunciation: SkillDetail,
    pub fluency: SkillDetail,
    pub grammar: SkillDetail,
    pub vocabulary: SkillDetail,
}

impl SkillAssessment {
    /// Returns the detail for one skill.
    pub fn skill(&self, area: SkillArea) -> &SkillDetail {
        match area {
            SkillArea::Pronunciation => &self.pronunciation,
            SkillArea::Fluency => &self.fluency,
            SkillArea::Grammar => &self.grammar,
            SkillArea::Vocabulary => &self.vocabulary,
        }
    }

    /// Normalizes an arbitrary JSON value into an assessment.
    ///
    /// Non-object input yields the all-zero assessment. The current keys
    /// (`overallScore`, `proficiencyLabel`) win over the legacy ones
    /// (`score`, `proficiencyLevel`) when both are present.
    pub fn from_untrusted(value: Value) -> Self {
        let Value::Object(fields) = value else {
            return Self::default();
        };
        let field = |current: &str, legacy: Option<&str>| pick(&fields, current, legacy);

        Self {
            overall_score: field("overallScore", Some("score"))
                .map(Score::from_untrusted)
                .unwrap_or_default(),
            proficiency_label: string_from(field("proficiencyLabel", Some("proficiencyLevel"))),
            strengths: strings_from(field("strengths", None)),
            weaknesses: strings_from(field("weaknesses", None)),
            pronunciation: skill_from(field("pronunciation", None)),
            fluency: skill_from(field("fluency", None)),
            grammar: skill_from(field("grammar", None)),
            vocabulary: skill_from(field("vocabulary", None)),
        }
    }
}

impl<'de> Deserialize<'de> for SkillAssessment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_untrusted)
    }
}

fn pick<'a>(
    fields: &'a Map<String, Value>,
    current: &str,
    legacy: Option<&str>,
) -> Option<&'a Value> {
    fields
        .get(current)
        .filter(|v| !v.is_null())
        .or_else(|| legacy.and_then(|key| fields.get(key)))
}

fn string_from(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn strings_from(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

// Older assessments stored each skill as a bare feedback string.
fn skill_from(value: Option<&Value>) -> SkillDetail {
    match value {
        Some(object @ Value::Object(_)) => {
            serde_json::from_value(object.clone()).unwrap_or_default()
        }
        Some(Value::String(feedback)) => SkillDetail {
            feedback: feedback.clone(),
            ..Default::default()
        },
        _ => SkillDetail::default(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(string_from(value.as_ref()))
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(strings_from(value.as_ref()))
}
