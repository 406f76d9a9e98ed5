//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the SpeakWell domain.

mod errors;
mod ids;
mod score;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{RecordId, UserId};
pub use score::{deserialize_untrusted_score, Score};
pub use timestamp::Timestamp;
