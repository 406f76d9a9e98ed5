//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AssessmentReader` - Read access to a learner's assessment history
//! - `AIProvider` - Single-shot generative text completion
//! - `ProgressNarrator` - Generative progress analysis with validated output

mod ai_provider;
mod assessment_reader;
mod progress_narrator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use assessment_reader::{AssessmentReader, AssessmentReaderError};
pub use progress_narrator::{NarrativeError, ProgressNarrator};
