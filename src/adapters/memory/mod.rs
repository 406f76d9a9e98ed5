//! In-memory adapters for tests and local development.

mod in_memory_assessment_reader;

pub use in_memory_assessment_reader::InMemoryAssessmentReader;
