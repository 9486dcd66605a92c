//! agentchat - terminal chat client for a conversational agent
//!
#![doc = "agentchat - terminal chat client for a conversational agent"]
#![doc = "Main entry point for the agentchat application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use agentchat::cli::{Cli, Commands};
use agentchat::commands;
use agentchat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load(cli.config.as_deref(), &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { dark } => {
            if dark {
                tracing::debug!("Dark palette requested on the command line");
            }
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Ask { message, json } => {
            tracing::debug!("One-shot message, json output: {}", json);
            commands::ask::run_ask(config, message, json).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they stay out of the conversation and out of
/// `ask --json` output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "agentchat=debug"
    } else {
        "agentchat=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
