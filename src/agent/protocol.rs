//! Wire types for the agent endpoint
//!
//! Request:
//!
//! ```json
//! { "message": "...", "agent_id": "...", "conversation_context": "User: hi\nBot: hello" }
//! ```
//!
//! Response, on success:
//!
//! ```json
//! { "success": true,
//!   "response": {
//!     "response": "...", "confidence": 0.9, "sources": ["doc1"],
//!     "metadata": { "conversation_context": "...", "suggested_followup": "..." } } }
//! ```
//!
//! and on failure `{ "success": false, "error": "..." }`.
//!
//! Every field of the answer is optional on the way in; the controller
//! applies the fallbacks.

use crate::error::AgentChatError;
use serde::{Deserialize, Serialize};

/// Body of the outbound POST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRequest {
    /// The new user text, exactly as typed
    pub message: String,
    /// Fixed agent identifier from configuration
    pub agent_id: String,
    /// Transcript of the turns preceding `message`
    pub conversation_context: String,
}

/// Top-level response envelope
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentEnvelope {
    /// Application-level success flag
    #[serde(default)]
    pub success: bool,
    /// Answer payload, present on success
    #[serde(default)]
    pub response: Option<AgentAnswer>,
    /// Failure reason, present on `success: false`
    #[serde(default)]
    pub error: Option<String>,
}

/// The agent's answer to one message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentAnswer {
    /// Reply text
    #[serde(default)]
    pub response: Option<String>,
    /// Opaque confidence score
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Citation labels
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    /// Extra data returned alongside the reply
    #[serde(default)]
    pub metadata: Option<AnswerMetadata>,
}

/// `response.metadata`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMetadata {
    /// The agent's own view of the conversation context
    #[serde(default)]
    pub conversation_context: Option<String>,
    /// A follow-up question the user might ask next
    #[serde(default)]
    pub suggested_followup: Option<String>,
}

impl AgentAnswer {
    /// Answer carrying only reply text
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            ..Self::default()
        }
    }

    /// Suggested follow-up, if the agent returned one
    pub fn suggested_followup(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.suggested_followup.as_deref())
    }
}

impl AgentEnvelope {
    /// Resolve the envelope into an answer or an application-level failure
    ///
    /// A `success: true` envelope without a `response` object still counts
    /// as a success; the missing fields fall back downstream.
    pub fn into_result(self) -> Result<AgentAnswer, AgentChatError> {
        if self.success {
            Ok(self.response.unwrap_or_default())
        } else {
            Err(AgentChatError::Rejected(self.error))
        }
    }
}

/// Body shape used to extract `error` from non-2xx responses
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
