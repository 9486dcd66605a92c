//! Configuration management for agentchat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//!
//! Precedence, highest first: CLI flags, environment variables, the YAML
//! file, built-in defaults.

use crate::error::{AgentChatError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

/// Agent identifier baked in at build time, if one was provided
const BUILD_AGENT_ID: Option<&str> = option_env!("AGENTCHAT_AGENT_ID");

/// Main configuration structure for agentchat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Agent endpoint settings
    #[serde(default)]
    pub agent: AgentConfig,
    /// Presentation settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Agent endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// URL the chat requests are POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Fixed agent identifier sent as `agent_id` with every request
    #[serde(default = "default_agent_id")]
    pub agent_id: String,

    /// Client-side timeout for a single request (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_endpoint() -> String {
    "http://localhost:3000/api/agent".to_string()
}

fn default_agent_id() -> String {
    BUILD_AGENT_ID.unwrap_or("default-agent").to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            agent_id: default_agent_id(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl AgentConfig {
    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Presentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Start sessions with the dark palette
    #[serde(default)]
    pub dark_mode: bool,

    /// How long an error notice stays visible (seconds)
    #[serde(default = "default_notice_ttl")]
    pub notice_ttl_seconds: u64,

    /// Number of message lines shown when the view re-renders
    #[serde(default = "default_viewport_height")]
    pub viewport_height: usize,
}

fn default_notice_ttl() -> u64 {
    5
}

fn default_viewport_height() -> usize {
    20
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notice_ttl_seconds: default_notice_ttl(),
            viewport_height: default_viewport_height(),
        }
    }
}

impl UiConfig {
    /// Notice lifetime as a [`Duration`]
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_seconds)
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// When `path` is `None` the default locations are tried in order:
    /// `config/config.yaml`, then the platform configuration directory.
    /// If no file exists the built-in defaults are used.
    ///
    /// # Arguments
    ///
    /// * `path` - Explicit path to the configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if an explicitly named file is missing, or if a file
    /// cannot be read or parsed
    pub fn load(path: Option<&str>, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = match path {
            Some(explicit) => {
                if !Path::new(explicit).exists() {
                    return Err(AgentChatError::Config(format!(
                        "Config file not found: {}",
                        explicit
                    ))
                    .into());
                }
                Self::from_file(Path::new(explicit))?
            }
            None => match Self::discover() {
                Some(found) => Self::from_file(&found)?,
                None => {
                    tracing::warn!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    /// Locate a configuration file in the default locations
    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(DEFAULT_CONFIG_PATH);
        if local.exists() {
            return Some(local);
        }

        directories::ProjectDirs::from("", "", "agentchat")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .filter(|p| p.exists())
    }

    fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AgentChatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| AgentChatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(endpoint) = std::env::var("AGENTCHAT_ENDPOINT") {
            self.agent.endpoint = endpoint;
        }

        if let Ok(agent_id) = std::env::var("AGENTCHAT_AGENT_ID") {
            self.agent.agent_id = agent_id;
        }

        if let Ok(timeout) = std::env::var("AGENTCHAT_TIMEOUT_SECONDS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.agent.request_timeout_seconds = secs,
                Err(_) => tracing::warn!(
                    "Ignoring invalid AGENTCHAT_TIMEOUT_SECONDS value: {}",
                    timeout
                ),
            }
        }

        if let Ok(dark) = std::env::var("AGENTCHAT_DARK_MODE") {
            match dark.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.ui.dark_mode = true,
                "0" | "false" | "no" | "off" => self.ui.dark_mode = false,
                other => tracing::warn!("Ignoring invalid AGENTCHAT_DARK_MODE value: {}", other),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.agent.endpoint = endpoint.clone();
        }

        if let Some(agent_id) = &cli.agent_id {
            self.agent.agent_id = agent_id.clone();
        }

        if cli.dark_requested() {
            self.ui.dark_mode = true;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is not an http(s) URL or any limit is zero
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.agent.endpoint).map_err(|e| {
            AgentChatError::Config(format!(
                "Invalid agent endpoint '{}': {}",
                self.agent.endpoint, e
            ))
        })?;

        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(AgentChatError::Config(format!(
                "Agent endpoint must use http or https, got: {}",
                endpoint.scheme()
            ))
            .into());
        }

        if self.agent.agent_id.trim().is_empty() {
            return Err(AgentChatError::Config("agent_id cannot be empty".to_string()).into());
        }

        if self.agent.request_timeout_seconds == 0 {
            return Err(AgentChatError::Config(
                "request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.ui.notice_ttl_seconds == 0 {
            return Err(AgentChatError::Config(
                "ui.notice_ttl_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.ui.viewport_height == 0 {
            return Err(AgentChatError::Config(
                "ui.viewport_height must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
