//! Remote responder - the caller side of the LLM-backed variant.
//!
//! The text generator itself is an external collaborator behind `TextGenerator`.
//! This module owns what surrounds it: the conversation history, the timeout, the
//! apology fallback and parsing of the trailing `LOG_CARD:{...}` tag.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::log_card::{LogCard, ResponseResult};
use crate::error::AppError;

/// Shown whenever the generator fails or times out.
pub const APOLOGY_TEXT: &str =
    "I'm having trouble connecting right now. Please try again in a moment.";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const SYSTEM_PROMPT: &str = r#"You are DigestiBot, the gut health assistant inside the DigestiGo app.
You help users track diet, physical activity, digestive symptoms and energy levels through natural conversation.

When the user reports food, activity, symptoms or energy, reply with brief gut-health insight and finish with a log card on its own line, no markdown fences:
LOG_CARD:{"type":"food|activity|symptom|energy","title":"emoji Title","data":{"Key":"Value"}}

Rules:
- type is one of: food, activity, symptom, energy
- food data: Item(s), Est. Calories, Fiber, Portion
- activity data: Activity, Duration, Gut Benefit
- symptom data: Symptom, Severity, Tip
- energy data: Level, Score, Linked to
- Greetings and questions get no LOG_CARD line.
- Keep replies to 2-4 sentences focused on digestive health.
- Use **bold** for key terms."#;

static CARD_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"LOG_CARD:(\{.+\})").expect("Invalid regex: card tag pattern"));

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation sent to the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Defines the interface for a remote chat-completion backend.
///
/// Implementations map transport failures to `AppError::Generation`.
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    /// Generates the assistant reply for the conversation so far.
    async fn generate(&self, system_prompt: &str, history: &[ChatTurn]) -> Result<String, AppError>;
}

/// Split a generator reply into display text and an optional card.
///
/// The tag is always stripped from the text. The card is kept only when it parses,
/// has a tracked type and carries at least one data row.
pub fn parse_tagged_reply(raw: &str) -> ResponseResult {
    let Some(caps) = CARD_TAG.captures(raw) else {
        return ResponseResult::text_only(raw.trim());
    };

    let card = match serde_json::from_str::<LogCard>(&caps[1]) {
        Ok(card) if card.data.is_empty() => {
            warn!("Dropping log card with empty data");
            None
        }
        Ok(card) => Some(card),
        Err(e) => {
            warn!("Dropping malformed log card: {}", e);
            None
        }
    };

    ResponseResult {
        text: CARD_TAG.replace(raw, "").trim().to_string(),
        card,
    }
}

/// Wraps a `TextGenerator` with history, timeout and fallback handling.
///
/// Calls are serialized: one request is in flight at a time.
pub struct RemoteResponder<G: TextGenerator> {
    generator: G,
    history: Mutex<Vec<ChatTurn>>,
    timeout: Duration,
}

impl<G: TextGenerator> RemoteResponder<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            history: Mutex::new(Vec::new()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send one user message. Never fails: errors become the apology text.
    ///
    /// Cancel-safe: both turns are committed to the history only once the
    /// generator call has finished, so a dropped future leaves it untouched.
    pub async fn generate_response(&self, text: &str) -> ResponseResult {
        let mut history = self.history.lock().await;
        let mut turns = history.clone();
        turns.push(ChatTurn::user(text));

        let raw = match timeout(self.timeout, self.generator.generate(SYSTEM_PROMPT, &turns)).await
        {
            Ok(Ok(reply)) => reply.trim().to_string(),
            Ok(Err(e)) => {
                warn!("Text generation failed: {}", e);
                APOLOGY_TEXT.to_string()
            }
            Err(elapsed) => {
                warn!("{}", AppError::from(elapsed));
                APOLOGY_TEXT.to_string()
            }
        };

        history.push(ChatTurn::user(text));
        history.push(ChatTurn::assistant(raw.clone()));
        debug!(turns = history.len(), "Remote reply received");

        parse_tagged_reply(&raw)
    }

    /// Snapshot of the conversation so far
    pub async fn history(&self) -> Vec<ChatTurn> {
        self.history.lock().await.clone()
    }

    pub async fn clear_history(&self) {
        self.history.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::log_card::CardType;

    #[test]
    fn test_plain_reply_has_no_card() {
        let result = parse_tagged_reply("  Hi! How can I help?  ");
        assert_eq!(result.text, "Hi! How can I help?");
        assert!(result.card.is_none());
    }

    #[test]
    fn test_tagged_reply_parsed_and_stripped() {
        let raw = "Nice **walk**!\nLOG_CARD:{\"type\":\"activity\",\"title\":\"🏃 Walk\",\"data\":{\"Activity\":\"walk\",\"Duration\":\"20 min\"}}";
        let result = parse_tagged_reply(raw);

        assert_eq!(result.text, "Nice **walk**!");
        let card = result.card.unwrap();
        assert_eq!(card.card_type, CardType::Activity);
        assert_eq!(card.data.get("Duration"), Some("20 min"));
    }

    #[test]
    fn test_malformed_tag_is_stripped_without_card() {
        let result = parse_tagged_reply("Logged it. LOG_CARD:{\"type\":\"food\",\"data\":{oops}}");
        assert_eq!(result.text, "Logged it.");
        assert!(result.card.is_none());
    }

    #[test]
    fn test_empty_data_rejected() {
        let result =
            parse_tagged_reply("Ok LOG_CARD:{\"type\":\"energy\",\"title\":\"⚡\",\"data\":{}}");
        assert!(result.card.is_none());
    }

    #[test]
    fn test_untracked_type_rejected() {
        let result = parse_tagged_reply(
            "Ok LOG_CARD:{\"type\":\"water\",\"title\":\"💧\",\"data\":{\"Glasses\":\"8\"}}",
        );
        assert!(result.card.is_none());
    }
}
