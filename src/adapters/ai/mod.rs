//! AI Provider Adapters.
//!
//! - `GeminiProvider` - Google Generative Language API
//! - `MockAIProvider` - Scripted provider for tests and local development

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{
    GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
};
pub use mock_provider::{MockAIProvider, MockResponse, DEFAULT_MOCK_RESPONSE};
