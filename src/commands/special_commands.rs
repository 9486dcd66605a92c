//! Special commands parser for interactive chat mode
//!
//! This module parses special commands entered during an interactive chat
//! session. Special commands let users:
//! - Toggle the dark palette
//! - Dismiss the error notice
//! - Show the full history or session status
//! - Display help information
//! - Exit the session
//!
//! Commands are prefixed with `/` and are case-insensitive. Anything else
//! is sent to the agent.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands act on the local session rather than being sent to the
/// agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Flip between the light and dark palettes
    ToggleDark,

    /// Close the active error notice
    DismissNotice,

    /// Print every message, ignoring the viewport
    ShowHistory,

    /// Display session status
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be sent to the agent.
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is
/// not a known command, and `CommandError::UnsupportedArgument` if a known
/// command is given an argument.
///
/// # Examples
///
/// ```
/// use agentchat::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/dark").unwrap(), SpecialCommand::ToggleDark);
/// assert_eq!(parse_special_command("quit").unwrap(), SpecialCommand::Exit);
/// assert_eq!(parse_special_command("hello agent").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let mut parts = lower.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    let parsed = match command {
        "/dark" | "/theme" => SpecialCommand::ToggleDark,
        "/dismiss" => SpecialCommand::DismissNotice,
        "/history" => SpecialCommand::ShowHistory,
        "/status" => SpecialCommand::ShowStatus,
        "/help" | "/?" => SpecialCommand::Help,
        "exit" | "quit" | "/exit" | "/quit" => SpecialCommand::Exit,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };

    if !rest.is_empty() {
        return Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: rest.join(" "),
        });
    }

    Ok(parsed)
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

APPEARANCE:
  /dark           - Toggle between the light and dark palettes
  /theme          - Same as /dark

NOTICES:
  /dismiss        - Close the current error notice

SESSION INFORMATION:
  /history        - Show every message in this session
  /status         - Show agent, message count, state and theme
  /help           - Show this help message
  /?              - Same as /help

SESSION CONTROL:
  exit            - Exit interactive mode
  quit            - Same as exit

NOTES:
  - Commands are case-insensitive
  - Regular text (not starting with /) is sent to the agent
  - Input is refused while the agent is still replying
  - Error notices close by themselves after a few seconds
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dark_toggle() {
        assert_eq!(
            parse_special_command("/dark").unwrap(),
            SpecialCommand::ToggleDark
        );
        assert_eq!(
            parse_special_command("/THEME").unwrap(),
            SpecialCommand::ToggleDark
        );
    }

    #[test]
    fn test_parse_dismiss() {
        assert_eq!(
            parse_special_command("/dismiss").unwrap(),
            SpecialCommand::DismissNotice
        );
    }

    #[test]
    fn test_parse_history_and_status() {
        assert_eq!(
            parse_special_command("/history").unwrap(),
            SpecialCommand::ShowHistory
        );
        assert_eq!(
            parse_special_command("  /status  ").unwrap(),
            SpecialCommand::ShowStatus
        );
    }

    #[test]
    fn test_parse_help_aliases() {
        assert_eq!(parse_special_command("/help").unwrap(), SpecialCommand::Help);
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
    }

    #[test]
    fn test_parse_exit_aliases() {
        for input in ["exit", "QUIT", "/exit", "/quit"] {
            assert_eq!(parse_special_command(input).unwrap(), SpecialCommand::Exit);
        }
    }

    #[test]
    fn test_parse_regular_text_is_none() {
        assert_eq!(
            parse_special_command("what is the refund policy?").unwrap(),
            SpecialCommand::None
        );
        assert_eq!(
            parse_special_command("exit the building").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_parse_unknown_command_returns_error() {
        let err = parse_special_command("/frobnicate now").unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("/frobnicate".to_string()));
        assert!(err.to_string().contains("/help"));
    }

    #[test]
    fn test_parse_unexpected_argument_returns_error() {
        let err = parse_special_command("/dark please").unwrap_err();
        assert_eq!(
            err,
            CommandError::UnsupportedArgument {
                command: "/dark".to_string(),
                arg: "please".to_string(),
            }
        );
    }
}
