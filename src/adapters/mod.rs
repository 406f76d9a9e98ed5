//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generative text providers (Gemini, mock)
//! - `http` - Axum REST endpoints
//! - `memory` - In-memory assessment store
//! - `postgres` - PostgreSQL assessment store
//! - `progress` - Narrative analysis over an `AIProvider`

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod progress;

pub use ai::{GeminiConfig, GeminiProvider, MockAIProvider};
pub use memory::InMemoryAssessmentReader;
pub use postgres::PostgresAssessmentReader;
pub use progress::LlmProgressNarrator;
