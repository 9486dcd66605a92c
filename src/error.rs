//! Error types for agentchat
//!
//! This module defines the error types used throughout the application,
//! using `thiserror` for ergonomic error handling.
//!
//! Agent failures carry enough information to produce the short,
//! human-readable notice shown to the user (see [`AgentChatError::notice_text`]).

use thiserror::Error;

/// Notice text used when the agent service gives no reason of its own.
pub const GENERIC_FAILURE_NOTICE: &str = "Failed to get a response from the agent";

/// Main error type for agentchat operations
///
/// Covers configuration loading, communication with the agent endpoint,
/// and terminal input handling.
#[derive(Error, Debug)]
pub enum AgentChatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request could not be completed (connection refused, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The agent endpoint answered with a non-success HTTP status
    #[error("Agent returned HTTP {status}{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Status {
        /// HTTP status code
        status: u16,
        /// `error` field of the response body, when one was present
        message: Option<String>,
    },

    /// The agent answered but signaled `success: false`
    #[error("Agent rejected the request{}", .0.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Rejected(Option<String>),

    /// The response body could not be decoded
    #[error("Failed to decode agent response: {0}")]
    Decode(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client errors outside of a request (client construction)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

impl AgentChatError {
    /// Human-readable reason for the transient error notice
    ///
    /// Returns the server-provided message when the agent supplied one,
    /// otherwise [`GENERIC_FAILURE_NOTICE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use agentchat::error::{AgentChatError, GENERIC_FAILURE_NOTICE};
    ///
    /// let err = AgentChatError::Rejected(Some("Agent not found".to_string()));
    /// assert_eq!(err.notice_text(), "Agent not found");
    ///
    /// let err = AgentChatError::Transport("connection refused".to_string());
    /// assert_eq!(err.notice_text(), GENERIC_FAILURE_NOTICE);
    /// ```
    pub fn notice_text(&self) -> String {
        let server_message = match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Rejected(message) => message.as_deref(),
            _ => None,
        };

        server_message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_FAILURE_NOTICE.to_string())
    }
}

/// Result type alias for agentchat operations
///
/// Uses `anyhow::Error` so that application plumbing can attach context.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = AgentChatError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_status_error_display_with_message() {
        let error = AgentChatError::Status {
            status: 500,
            message: Some("boom".to_string()),
        };
        assert_eq!(error.to_string(), "Agent returned HTTP 500: boom");
    }

    #[test]
    fn test_status_error_display_without_message() {
        let error = AgentChatError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(error.to_string(), "Agent returned HTTP 502");
    }

    #[test]
    fn test_rejected_error_display() {
        let error = AgentChatError::Rejected(Some("quota".to_string()));
        assert_eq!(error.to_string(), "Agent rejected the request: quota");
        let error = AgentChatError::Rejected(None);
        assert_eq!(error.to_string(), "Agent rejected the request");
    }

    #[test]
    fn test_notice_text_prefers_server_message() {
        let error = AgentChatError::Status {
            status: 500,
            message: Some("Internal agent failure".to_string()),
        };
        assert_eq!(error.notice_text(), "Internal agent failure");
    }

    #[test]
    fn test_notice_text_falls_back_to_generic() {
        assert_eq!(
            AgentChatError::Rejected(None).notice_text(),
            GENERIC_FAILURE_NOTICE
        );
        assert_eq!(
            AgentChatError::Rejected(Some("   ".to_string())).notice_text(),
            GENERIC_FAILURE_NOTICE
        );
        assert_eq!(
            AgentChatError::Decode("expected value".to_string()).notice_text(),
            GENERIC_FAILURE_NOTICE
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: AgentChatError = io_error.into();
        assert!(matches!(error, AgentChatError::Io(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: AgentChatError = yaml_error.into();
        assert!(matches!(error, AgentChatError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AgentChatError>();
    }
}
