//! Progress adapters.

mod llm_narrator;

pub use llm_narrator::LlmProgressNarrator;
