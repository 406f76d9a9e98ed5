//! GenerateSessionTitleHandler - Names a practice session after its topic.
//!
//! Title generation never fails from the caller's point of view: every
//! problem collapses to [`DEFAULT_SESSION_TITLE`].

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Title used whenever generation is unavailable or fails.
pub const DEFAULT_SESSION_TITLE: &str = "English Practice Session";

const MAX_TRANSCRIPT_CHARS: usize = 2000;
const MAX_TITLE_CHARS: usize = 40;
const TITLE_MAX_TOKENS: u32 = 32;

/// Command to title a finished conversation.
#[derive(Debug, Clone)]
pub struct GenerateSessionTitleCommand {
    pub user_id: UserId,
    pub transcript: String,
}

/// Handler producing a short, topic-specific session title.
pub struct GenerateSessionTitleHandler {
    ai_provider: Option<Arc<dyn AIProvider>>,
}

impl GenerateSessionTitleHandler {
    pub fn new(ai_provider: Option<Arc<dyn AIProvider>>) -> Self {
        Self { ai_provider }
    }

    pub async fn handle(&self, cmd: GenerateSessionTitleCommand) -> String {
        let Some(provider) = &self.ai_provider else {
            tracing::info!(
                user_id = %cmd.user_id,
                "No AI provider configured, using default title"
            );
            return DEFAULT_SESSION_TITLE.to_string();
        };

        let request = CompletionRequest::new(RequestMetadata::new(
            cmd.user_id.clone(),
            "session_title",
            format!("session-title-{}", uuid::Uuid::new_v4()),
        ))
        .with_message(MessageRole::User, title_prompt(&cmd.transcript))
        .with_max_tokens(TITLE_MAX_TOKENS);

        match provider.complete(request).await {
            Ok(response) => {
                let title = response.content.trim();
                if title.is_empty() {
                    tracing::warn!(user_id = %cmd.user_id, "Empty title generated, using default");
                    return DEFAULT_SESSION_TITLE.to_string();
                }
                truncate_chars(title, MAX_TITLE_CHARS)
            }
            Err(err) => {
                tracing::warn!(
                    user_id = %cmd.user_id,
                    reason = %err,
                    "Session title generation failed, using default"
                );
                DEFAULT_SESSION_TITLE.to_string()
            }
        }
    }
}

fn title_prompt(transcript: &str) -> String {
    format!(
        "Task: Create a descriptive title for an English learning conversation between a student and an AI coach.\n\
         \n\
         REQUIREMENTS:\n\
         - The title must be concise (3-5 words maximum)\n\
         - The title should reflect the MAIN TOPIC discussed, not generic descriptions\n\
         - Focus on specific themes, vocabulary domains, or skills practiced\n\
         - Use engaging, descriptive language that would help the user recognize this session later\n\
         - Avoid generic titles like \"English Practice\" or \"Conversation Practice\"\n\
         \n\
         TRANSCRIPT EXCERPT:\n\
         {}\n\
         \n\
         TITLE (3-5 words only):",
        truncate_chars(transcript, MAX_TRANSCRIPT_CHARS)
    )
}

/// Keeps at most `max` characters, marking the cut with "...".
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::ports::AIError;

    fn command(transcript: &str) -> GenerateSessionTitleCommand {
        GenerateSessionTitleCommand {
            user_id: UserId::new("learner-1").unwrap(),
            transcript: transcript.to_string(),
        }
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_chars("Ordering Coffee", 40), "Ordering Coffee");
        assert_eq!(truncate_chars(&"a".repeat(40), 40), "a".repeat(40));
    }

    #[test]
    fn truncate_cuts_on_char_boundaries() {
        assert_eq!(truncate_chars("ééééé", 3), "ééé...");
        assert_eq!(truncate_chars(&"b".repeat(41), 40), format!("{}...", "b".repeat(40)));
    }

    #[tokio::test]
    async fn returns_trimmed_generated_title() {
        let provider = MockAIProvider::new().with_response("  Planning a Trip to Lisbon \n");
        let handler = GenerateSessionTitleHandler::new(Some(Arc::new(provider.clone())));

        let title = handler.handle(command("We talked about travel.")).await;

        assert_eq!(title, "Planning a Trip to Lisbon");
        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].messages[0].content.contains("We talked about travel."));
        assert!(calls[0].messages[0].content.ends_with("TITLE (3-5 words only):"));
    }

    #[tokio::test]
    async fn long_title_is_truncated() {
        let long = "A Very Long Title About Negotiating Salaries In Interviews";
        let handler = GenerateSessionTitleHandler::new(Some(Arc::new(
            MockAIProvider::new().with_response(long),
        )));

        let title = handler.handle(command("...")).await;

        assert_eq!(title, format!("{}...", &long[..40]));
    }

    #[tokio::test]
    async fn long_transcript_is_truncated_in_prompt() {
        let provider = MockAIProvider::new().with_response("Weather Small Talk");
        let handler = GenerateSessionTitleHandler::new(Some(Arc::new(provider.clone())));
        let transcript = format!("{}{}", "x".repeat(2000), "TAIL");

        handler.handle(command(&transcript)).await;

        let calls = provider.get_calls();
        let prompt = &calls[0].messages[0].content;
        assert!(prompt.contains(&format!("{}...", "x".repeat(2000))));
        assert!(!prompt.contains("TAIL"));
    }

    #[tokio::test]
    async fn missing_provider_uses_default() {
        let handler = GenerateSessionTitleHandler::new(None);
        assert_eq!(handler.handle(command("hello")).await, DEFAULT_SESSION_TITLE);
    }

    #[tokio::test]
    async fn provider_failure_uses_default() {
        let handler = GenerateSessionTitleHandler::new(Some(Arc::new(
            MockAIProvider::new().with_error(AIError::network("connection reset")),
        )));
        assert_eq!(handler.handle(command("hello")).await, DEFAULT_SESSION_TITLE);
    }

    #[tokio::test]
    async fn blank_answer_uses_default() {
        let handler = GenerateSessionTitleHandler::new(Some(Arc::new(
            MockAIProvider::new().with_response("   \n"),
        )));
        assert_eq!(handler.handle(command("hello")).await, DEFAULT_SESSION_TITLE);
    }
}
