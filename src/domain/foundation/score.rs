//! Score value object (0-100 scale).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use super::ValidationError;

/// An assessment score between 0 and 100 inclusive.
///
/// Deserializing with the derived impl is strict: the value must be an
/// integer in range. Scores coming from generated assessments go through
/// [`Score::from_untrusted`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Zero points.
    pub const ZERO: Self = Self(0);

    /// Maximum score.
    pub const MAX: Self = Self(100);

    /// Creates a new Score, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Creates a Score, returning error if out of range.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::out_of_range(
                "score",
                0,
                100,
                value.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            ));
        }
        Ok(Self(value as u8))
    }

    /// Normalizes an arbitrary JSON value into a score.
    ///
    /// Numbers (integral or fractional) and numeric strings are rounded half
    /// up and clamped to 0-100. Anything else, including `null`, booleans and
    /// non-finite values, reads as zero.
    pub fn from_untrusted(value: &Value) -> Self {
        let raw = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match raw {
            Some(v) if v.is_finite() => Self((v + 0.5).floor().clamp(0.0, 100.0) as u8),
            _ => Self::ZERO,
        }
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value widened for arithmetic.
    pub fn as_i64(&self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<i64> for Score {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// `deserialize_with` helper for fields holding generated, unvalidated scores.
pub fn deserialize_untrusted_score<'de, D>(deserializer: D) -> Result<Score, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(Score::from_untrusted).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn score_new_clamps_to_100() {
        assert_eq!(Score::new(50).value(), 50);
        assert_eq!(Score::new(101).value(), 100);
        assert_eq!(Score::new(255).value(), 100);
    }

    #[test]
    fn score_try_new_rejects_out_of_range() {
        assert!(Score::try_new(0).is_ok());
        assert!(Score::try_new(100).is_ok());

        match Score::try_new(101) {
            Err(ValidationError::OutOfRange { field, min, max, actual }) => {
                assert_eq!(field, "score");
                assert_eq!(min, 0);
                assert_eq!(max, 100);
                assert_eq!(actual, 101);
            }
            _ => panic!("Expected OutOfRange error"),
        }
        assert!(Score::try_new(-1).is_err());
    }

    #[test]
    fn untrusted_numbers_are_rounded_and_clamped() {
        assert_eq!(Score::from_untrusted(&json!(72)).value(), 72);
        assert_eq!(Score::from_untrusted(&json!(72.5)).value(), 73);
        assert_eq!(Score::from_untrusted(&json!(72.4)).value(), 72);
        assert_eq!(Score::from_untrusted(&json!(140)).value(), 100);
        assert_eq!(Score::from_untrusted(&json!(-12)).value(), 0);
    }

    #[test]
    fn untrusted_strings_parse_when_numeric() {
        assert_eq!(Score::from_untrusted(&json!("85")).value(), 85);
        assert_eq!(Score::from_untrusted(&json!(" 61.6 ")).value(), 62);
        assert_eq!(Score::from_untrusted(&json!("eighty")).value(), 0);
    }

    #[test]
    fn untrusted_garbage_reads_as_zero() {
        assert_eq!(Score::from_untrusted(&Value::Null), Score::ZERO);
        assert_eq!(Score::from_untrusted(&json!(true)), Score::ZERO);
        assert_eq!(Score::from_untrusted(&json!([80])), Score::ZERO);
        assert_eq!(Score::from_untrusted(&json!({"score": 80})), Score::ZERO);
    }

    #[test]
    fn strict_deserialize_accepts_integers_in_range() {
        let score: Score = serde_json::from_str("75").unwrap();
        assert_eq!(score.value(), 75);
    }

    #[test]
    fn strict_deserialize_rejects_fractions_and_overflow() {
        assert!(serde_json::from_str::<Score>("75.5").is_err());
        assert!(serde_json::from_str::<Score>("101").is_err());
        assert!(serde_json::from_str::<Score>("\"75\"").is_err());
    }

    #[test]
    fn score_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Score::new(42)).unwrap(), "42");
    }

    #[test]
    fn score_displays_out_of_hundred() {
        assert_eq!(Score::new(55).to_string(), "55/100");
    }
}
