//! Test utilities for agentchat
//!
//! This module provides a scripted agent client, configuration fixtures and
//! assertion helpers shared by the unit tests.

use crate::agent::{AgentAnswer, AgentClient, AgentRequest};
use crate::config::Config;
use crate::error::AgentChatError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Requests seen by a [`ScriptedAgentClient`]
///
/// Cloned handles share the same record, so a test can keep one after the
/// client has been moved into a session.
#[derive(Debug, Clone, Default)]
pub struct RequestRecorder {
    requests: Arc<Mutex<Vec<AgentRequest>>>,
}

impl RequestRecorder {
    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<AgentRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: &AgentRequest) {
        self.requests.lock().unwrap().push(request.clone());
    }
}

/// Agent client that replays a fixed script of outcomes
///
/// Each call to `send` pops the next outcome. Once the script is exhausted
/// every call fails with a transport error.
#[derive(Debug, Default)]
pub struct ScriptedAgentClient {
    script: Mutex<VecDeque<Result<AgentAnswer, AgentChatError>>>,
    recorder: RequestRecorder,
}

impl ScriptedAgentClient {
    /// Create a client with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a successful answer to the script
    pub fn with_answer(self, answer: AgentAnswer) -> Self {
        self.script.lock().unwrap().push_back(Ok(answer));
        self
    }

    /// Append a failure to the script
    pub fn with_error(self, error: AgentChatError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Handle onto the requests this client receives
    pub fn recorder(&self) -> RequestRecorder {
        self.recorder.clone()
    }
}

#[async_trait]
impl AgentClient for ScriptedAgentClient {
    async fn send(&self, request: &AgentRequest) -> Result<AgentAnswer, AgentChatError> {
        self.recorder.record(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentChatError::Transport("script exhausted".to_string())))
    }
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: crate::error::Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Create a test configuration YAML string
pub fn test_config_yaml() -> String {
    r#"
agent:
  endpoint: http://localhost:8080/api/agent
  agent_id: support-bot
  request_timeout_seconds: 10
ui:
  dark_mode: true
  notice_ttl_seconds: 3
  viewport_height: 12
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config_yaml_parses() {
        let config: Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert_eq!(config.agent.agent_id, "support-bot");
        assert_eq!(config.ui.viewport_height, 12);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_scripted_client_replays_in_order() {
        let client = ScriptedAgentClient::new()
            .with_answer(AgentAnswer::text("one"))
            .with_error(AgentChatError::Rejected(None));
        let recorder = client.recorder();
        let request = AgentRequest {
            message: "hi".to_string(),
            agent_id: "a".to_string(),
            conversation_context: String::new(),
        };

        assert!(client.send(&request).await.is_ok());
        assert!(client.send(&request).await.is_err());
        assert_error_contains(
            client.send(&request).await.map_err(anyhow::Error::from),
            "script exhausted",
        );
        assert_eq!(recorder.requests().len(), 3);
    }
}
