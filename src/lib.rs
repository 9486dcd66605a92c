//! agentchat - terminal chat client for a conversational agent
//!
//! This library provides the conversation controller, the HTTP client for
//! the agent endpoint, configuration, and terminal rendering used by the
//! `agentchat` binary.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `agent`: Wire types and the client for the agent endpoint
//! - `conversation`: Message log, notices, the controller state machine and
//!   the session runtime that executes its effects
//! - `view`: Viewport and text rendering
//! - `theme`: Light and dark palettes
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Handlers for the CLI commands
//!
//! # Example
//!
//! ```no_run
//! use agentchat::agent::HttpAgentClient;
//! use agentchat::conversation::{ChatSession, ConversationController};
//! use agentchat::Config;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None, &Default::default())?;
//!     config.validate()?;
//!
//!     let client = Arc::new(HttpAgentClient::new(&config.agent)?);
//!     let controller = ConversationController::from_config(&config);
//!     let mut session = ChatSession::new(controller, client, config.ui.viewport_height);
//!     session.submit_and_wait("Hello!").await;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod theme;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use conversation::{ChatSession, ConversationController};
pub use error::{AgentChatError, Result};
pub use theme::Theme;

#[cfg(test)]
pub mod test_utils;
