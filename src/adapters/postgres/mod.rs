//! PostgreSQL adapters.

mod assessment_reader;

pub use assessment_reader::PostgresAssessmentReader;
