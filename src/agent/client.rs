//! HTTP client for the agent endpoint
//!
//! [`AgentClient`] is the seam between the conversation runtime and the
//! network. [`HttpAgentClient`] is the production implementation: one POST
//! per message, JSON in and out, with every failure mode folded into an
//! [`AgentChatError`] the controller can turn into a notice.

use crate::agent::protocol::{AgentAnswer, AgentEnvelope, AgentRequest, ErrorBody};
use crate::config::AgentConfig;
use crate::error::AgentChatError;

use async_trait::async_trait;
use reqwest::Client;

/// Sends one message to the agent and returns its answer
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Perform a single request/response exchange
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, non-2xx statuses,
    /// undecodable bodies and `success: false` envelopes
    async fn send(&self, request: &AgentRequest) -> Result<AgentAnswer, AgentChatError>;
}

/// Agent client backed by `reqwest`
///
/// # Examples
///
/// ```no_run
/// use agentchat::agent::{AgentClient, AgentRequest, HttpAgentClient};
/// use agentchat::config::AgentConfig;
///
/// # async fn example() -> Result<(), agentchat::error::AgentChatError> {
/// let client = HttpAgentClient::new(&AgentConfig::default())?;
/// let answer = client
///     .send(&AgentRequest {
///         message: "Hello!".to_string(),
///         agent_id: "default-agent".to_string(),
///         conversation_context: String::new(),
///     })
///     .await?;
/// println!("{:?}", answer.response);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    client: Client,
    endpoint: String,
}

impl HttpAgentClient {
    /// Create a client for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(config: &AgentConfig) -> Result<Self, AgentChatError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("agentchat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::info!(
            "Initialized agent client: endpoint={}, timeout={}s",
            config.endpoint,
            config.request_timeout_seconds
        );

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// One-line description of an outbound request for debug logs
fn request_summary(endpoint: &str, request: &AgentRequest) -> String {
    format!(
        "POST {} (message {} chars, context {} chars)",
        endpoint,
        request.message.chars().count(),
        request.conversation_context.chars().count()
    )
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn send(&self, request: &AgentRequest) -> Result<AgentAnswer, AgentChatError> {
        tracing::debug!("{}", request_summary(&self.endpoint, request));

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Agent request failed: {}", e);
                AgentChatError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!("Failed to read agent response body: {}", e);
            AgentChatError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            tracing::warn!("Agent returned error {}: {}", status, body);
            return Err(AgentChatError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: AgentEnvelope = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse agent response: {}", e);
            AgentChatError::Decode(e.to_string())
        })?;

        let answer = envelope.into_result()?;
        if let Some(context) = answer
            .metadata
            .as_ref()
            .and_then(|m| m.conversation_context.as_deref())
        {
            tracing::debug!("Agent conversation context: {}", context);
        }

        Ok(answer)
    }
}
