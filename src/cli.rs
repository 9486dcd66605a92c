//! Command-line interface definition for agentchat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing an interactive `chat` command and a one-shot `ask` command.

use clap::{Parser, Subcommand};

/// agentchat - terminal chat client for a conversational agent
///
/// Sends each message to the configured agent endpoint together with a
/// transcript of the conversation so far, and renders the reply.
#[derive(Parser, Debug, Clone)]
#[command(name = "agentchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "AGENTCHAT_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the agent endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Override the agent identifier sent with each request
    #[arg(long, global = true)]
    pub agent_id: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for agentchat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session with the agent
    Chat {
        /// Start with the dark palette
        #[arg(short, long)]
        dark: bool,
    },

    /// Send a single message and print the agent's reply
    Ask {
        /// Message to send
        message: String,

        /// Print the reply as a JSON message record
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether the dark palette was requested on the command line
    pub fn dark_requested(&self) -> bool {
        matches!(self.command, Commands::Chat { dark: true })
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: None,
            verbose: false,
            endpoint: None,
            agent_id: None,
            command: Commands::Chat { dark: false },
        }
    }
}
