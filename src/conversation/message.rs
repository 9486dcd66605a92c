//! Conversation messages and the append-only log
//!
//! A [`Message`] is one turn, authored either by the user or by the bot.
//! [`MessageLog`] owns the turns of a session; it only ever grows, and it
//! hands out shared references so that logged messages cannot be edited.

use crate::agent::AgentAnswer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::{Generator, Ulid};

/// Bot text used when the agent's reply carries no usable `response`
pub const EMPTY_REPLY_FALLBACK: &str = "I'm not sure how to respond to that.";

/// Bot text appended when a request fails
pub const APOLOGY_TEXT: &str =
    "Sorry, I encountered an error while processing your message. Please try again.";

/// Identifier of a logged message; sorts in creation order
pub type MessageId = Ulid;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed by the person at the keyboard
    User,
    /// Produced by the agent, or synthesized on failure
    Bot,
}

impl Role {
    /// Label used in transcripts and on screen
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Bot => "Bot",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One conversational turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique, creation-ordered identifier
    pub id: MessageId,
    /// Author of the turn
    pub role: Role,
    /// Display text
    pub content: String,
    /// Capture time; informational only
    pub created_at: DateTime<Utc>,
    /// Citation labels returned by the agent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    /// Opaque confidence score returned by the agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Follow-up question suggested by the agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_followup: Option<String>,
}

impl Message {
    fn new(role: Role, content: String) -> Self {
        Self {
            id: Ulid::new(),
            role,
            content,
            created_at: Utc::now(),
            sources: Vec::new(),
            confidence: None,
            suggested_followup: None,
        }
    }

    /// A user turn carrying `content` verbatim
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content.into())
    }

    /// A plain bot turn
    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content.into())
    }

    /// Bot turn built from an agent answer
    ///
    /// Empty or missing reply text becomes [`EMPTY_REPLY_FALLBACK`]; missing
    /// sources become an empty list; an empty follow-up is treated as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use agentchat::agent::AgentAnswer;
    /// use agentchat::conversation::message::{Message, EMPTY_REPLY_FALLBACK};
    ///
    /// let message = Message::from_answer(&AgentAnswer::default());
    /// assert_eq!(message.content, EMPTY_REPLY_FALLBACK);
    /// assert!(message.sources.is_empty());
    /// ```
    pub fn from_answer(answer: &AgentAnswer) -> Self {
        let content = answer
            .response
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(EMPTY_REPLY_FALLBACK);

        Self {
            sources: answer.sources.clone().unwrap_or_default(),
            confidence: answer.confidence,
            suggested_followup: answer
                .suggested_followup()
                .filter(|hint| !hint.trim().is_empty())
                .map(str::to_string),
            ..Self::bot(content)
        }
    }

    /// Placeholder bot turn left in the log after a failed request
    pub fn apology() -> Self {
        Self::bot(APOLOGY_TEXT)
    }

    /// Whether the user authored this turn
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Append-only, ordered record of a session's messages
pub struct MessageLog {
    messages: Vec<Message>,
    ids: Generator,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageLog")
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

impl MessageLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            ids: Generator::new(),
        }
    }

    /// Append a message, stamping it with the next id in creation order
    pub fn push(&mut self, mut message: Message) -> &Message {
        message.id = self.ids.generate().unwrap_or_else(|_| Ulid::new());
        let index = self.messages.len();
        self.messages.push(message);
        &self.messages[index]
    }

    /// All messages in send order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no message has been logged yet
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AnswerMetadata;

    #[test]
    fn test_user_message_keeps_content_verbatim() {
        let message = Message::user("  spaced out  ");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "  spaced out  ");
        assert!(message.is_user());
    }

    #[test]
    fn test_from_answer_maps_all_fields() {
        let answer = AgentAnswer {
            response: Some("The answer".to_string()),
            confidence: Some(0.9),
            sources: Some(vec!["doc1".to_string()]),
            metadata: Some(AnswerMetadata {
                conversation_context: None,
                suggested_followup: Some("Want more?".to_string()),
            }),
        };
        let message = Message::from_answer(&answer);
        assert_eq!(message.role, Role::Bot);
        assert_eq!(message.content, "The answer");
        assert_eq!(message.sources, vec!["doc1".to_string()]);
        assert_eq!(message.confidence, Some(0.9));
        assert_eq!(message.suggested_followup.as_deref(), Some("Want more?"));
    }

    #[test]
    fn test_from_answer_empty_response_falls_back() {
        let message = Message::from_answer(&AgentAnswer::text(""));
        assert_eq!(message.content, EMPTY_REPLY_FALLBACK);
    }

    #[test]
    fn test_from_answer_blank_followup_is_absent() {
        let answer = AgentAnswer {
            metadata: Some(AnswerMetadata {
                conversation_context: None,
                suggested_followup: Some(" ".to_string()),
            }),
            ..AgentAnswer::text("ok")
        };
        assert_eq!(Message::from_answer(&answer).suggested_followup, None);
    }

    #[test]
    fn test_apology_has_no_extras() {
        let message = Message::apology();
        assert_eq!(message.role, Role::Bot);
        assert_eq!(message.content, APOLOGY_TEXT);
        assert!(message.sources.is_empty());
        assert!(message.confidence.is_none());
        assert!(message.suggested_followup.is_none());
    }

    #[test]
    fn test_log_ids_follow_creation_order() {
        let mut log = MessageLog::new();
        for i in 0..50 {
            log.push(Message::user(format!("m{}", i)));
        }
        let ids: Vec<Ulid> = log.messages().iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_log_push_returns_appended() {
        let mut log = MessageLog::new();
        assert!(log.is_empty());
        let id = log.push(Message::user("hi")).id;
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().map(|m| m.id), Some(id));
    }

    #[test]
    fn test_message_serializes_camel_case_and_skips_absent() {
        let message = Message::user("hi");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "user");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("sources").is_none());
        assert!(value.get("suggestedFollowup").is_none());
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::User.to_string(), "User");
        assert_eq!(Role::Bot.label(), "Bot");
    }
}
