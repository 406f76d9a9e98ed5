//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `assessment` - Per-session skill assessments and stored records
//! - `progress` - Pure calculators turning an assessment history into metrics

pub mod assessment;
pub mod foundation;
pub mod progress;
