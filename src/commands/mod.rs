/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat` - Interactive chat session
- `ask`  - Send one message and print the reply

Both drive a [`ChatSession`] backed by the HTTP agent client.
*/

use crate::agent::{AgentClient, HttpAgentClient};
use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::config::Config;
use crate::conversation::{ChatSession, ConversationController, SessionEvent};
use crate::error::Result;
use crate::view::Renderer;
use colored::Colorize;
use std::sync::Arc;

// Special commands parser for the interactive session
pub mod special_commands;

/// Build a session for `config` talking to the configured endpoint
fn open_session(config: &Config) -> Result<ChatSession<HttpAgentClient>> {
    let client = Arc::new(HttpAgentClient::new(&config.agent)?);
    let controller = ConversationController::from_config(config);
    Ok(ChatSession::new(
        controller,
        client,
        config.ui.viewport_height,
    ))
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Line editing runs on a dedicated thread that owns the `rustyline`
    //! editor. The async side asks it for one line at a time by sending a
    //! prompt, and meanwhile keeps applying session events, so replies and
    //! notice expiry are handled even while the user is typing. Output that
    //! arrives while a line is being read goes through the editor's
    //! external printer so it lands above the prompt.

    use super::*;
    use rustyline::error::ReadlineError;
    use rustyline::{DefaultEditor, ExternalPrinter};
    use std::io::Write;
    use std::sync::mpsc as std_mpsc;
    use tokio::sync::{mpsc, oneshot};

    /// Hint shown when input arrives while a reply is still pending
    pub const PENDING_HINT: &str = "Still waiting for the agent's reply; try again in a moment.";

    type Printer = Box<dyn ExternalPrinter + Send>;

    enum InputEvent {
        Line(String),
        Interrupted,
        Eof,
        Failed(String),
    }

    struct LineReader {
        prompts: std_mpsc::Sender<String>,
        lines: mpsc::UnboundedReceiver<InputEvent>,
    }

    impl LineReader {
        /// Start the editor thread
        ///
        /// The returned receiver yields the editor's external printer, or
        /// `None` when the terminal does not support one.
        fn spawn() -> (Self, oneshot::Receiver<Option<Printer>>) {
            let (prompt_tx, prompt_rx) = std_mpsc::channel::<String>();
            let (line_tx, line_rx) = mpsc::unbounded_channel();
            let (printer_tx, printer_rx) = oneshot::channel();

            std::thread::spawn(move || {
                let mut rl = match DefaultEditor::new() {
                    Ok(rl) => rl,
                    Err(e) => {
                        let _ = printer_tx.send(None);
                        let _ = line_tx.send(InputEvent::Failed(e.to_string()));
                        return;
                    }
                };

                let printer = rl
                    .create_external_printer()
                    .ok()
                    .map(|p| Box::new(p) as Printer);
                let _ = printer_tx.send(printer);

                for prompt in prompt_rx {
                    let event = match rl.readline(&prompt) {
                        Ok(line) => {
                            if !line.trim().is_empty() {
                                let _ = rl.add_history_entry(line.as_str());
                            }
                            InputEvent::Line(line)
                        }
                        Err(ReadlineError::Interrupted) => InputEvent::Interrupted,
                        Err(ReadlineError::Eof) => InputEvent::Eof,
                        Err(err) => InputEvent::Failed(err.to_string()),
                    };

                    let last = !matches!(event, InputEvent::Line(_));
                    if line_tx.send(event).is_err() || last {
                        break;
                    }
                }
            });

            (
                Self {
                    prompts: prompt_tx,
                    lines: line_rx,
                },
                printer_rx,
            )
        }

        /// Ask the editor thread to read one line with `prompt`
        fn request(&self, prompt: String) -> bool {
            self.prompts.send(prompt).is_ok()
        }
    }

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let mut session = open_session(&config)?;
        let mut renderer = Renderer::new(session.theme());
        let agent_id = session.controller().agent_id().to_string();

        let (mut reader, printer_rx) = LineReader::spawn();
        let mut printer = printer_rx.await.unwrap_or(None);

        print_welcome_banner(&renderer, &config);
        println!(
            "{}\n",
            renderer.window(session.state().messages(), session.viewport())
        );

        loop {
            if !reader.request(renderer.prompt()) {
                break;
            }

            let input = loop {
                tokio::select! {
                    input = reader.lines.recv() => break input,
                    Some(event) = session.next_event() => {
                        let update = apply_event(&mut session, &renderer, event);
                        for line in update.lines {
                            print_while_reading(&mut printer, line);
                        }
                        if update.refocus {
                            restore_prompt(&printer, &renderer);
                        }
                    }
                }
            };

            let line = match input {
                Some(InputEvent::Line(line)) => line,
                Some(InputEvent::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Some(InputEvent::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Some(InputEvent::Failed(err)) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
                None => break,
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match parse_special_command(trimmed) {
                Ok(SpecialCommand::ToggleDark) => {
                    session.toggle_dark();
                    renderer.set_theme(session.theme());
                    println!("Switched to {} theme\n", session.theme().colored_tag());
                    println!(
                        "{}\n",
                        renderer.window(session.state().messages(), session.viewport())
                    );
                    continue;
                }
                Ok(SpecialCommand::DismissNotice) => {
                    if session.state().last_error().is_some() {
                        session.dismiss_notice();
                        println!("Notice dismissed\n");
                    } else {
                        println!("No active notice\n");
                    }
                    continue;
                }
                Ok(SpecialCommand::ShowHistory) => {
                    println!("{}\n", renderer.history(session.state().messages()));
                    continue;
                }
                Ok(SpecialCommand::ShowStatus) => {
                    println!("{}\n", renderer.status(session.state(), &agent_id));
                    continue;
                }
                Ok(SpecialCommand::Help) => {
                    print_help();
                    continue;
                }
                Ok(SpecialCommand::Exit) => break,
                Ok(SpecialCommand::None) => {}
                Err(e) => {
                    println!("{}\n", e.to_string().red());
                    continue;
                }
            }

            session.set_draft(line.as_str());
            if session.state().is_pending() {
                println!("{}", PENDING_HINT.yellow());
                continue;
            }

            if session.submit(&line) {
                println!("{}", renderer.typing_indicator());
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Screen changes caused by one session event
    pub(super) struct ScreenUpdate {
        /// Rendered messages and notice banner to print
        pub lines: Vec<String>,
        /// The controller handed input focus back to the user
        pub refocus: bool,
    }

    /// Apply a session event and collect what it changes on screen
    pub(super) fn apply_event<C: AgentClient + 'static>(
        session: &mut ChatSession<C>,
        renderer: &Renderer,
        event: SessionEvent,
    ) -> ScreenUpdate {
        let before = session.state().messages().len();
        let previous_notice = session.state().notice().map(|n| n.generation);

        session.apply(event);
        let refocus = session.take_focus_request();

        let state = session.state();
        let mut lines: Vec<String> = state.messages()[before..]
            .iter()
            .map(|m| renderer.message(m))
            .collect();

        if let Some(notice) = state.notice() {
            if Some(notice.generation) != previous_notice {
                lines.push(renderer.notice(&notice.text));
            }
        }

        ScreenUpdate { lines, refocus }
    }

    /// Show the prompt again after a reply was printed over it
    ///
    /// The external printer redraws the prompt itself; plain `println!`
    /// output does not.
    fn restore_prompt(printer: &Option<Printer>, renderer: &Renderer) {
        if printer.is_none() {
            print!("{}", renderer.prompt());
            let _ = std::io::stdout().flush();
        }
    }

    fn print_while_reading(printer: &mut Option<Printer>, line: String) {
        match printer {
            Some(p) => {
                if let Err(e) = p.print(line.clone()) {
                    tracing::warn!("External printer failed: {}", e);
                    println!("{}", line);
                }
            }
            None => println!("{}", line),
        }
    }

    /// Display welcome banner at the start of interactive chat mode
    fn print_welcome_banner(renderer: &Renderer, config: &Config) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║            agentchat Interactive Chat - Welcome!             ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Agent:    {}", config.agent.agent_id);
        println!("Endpoint: {}", config.agent.endpoint);
        println!("Theme:    {}\n", renderer.theme().colored_tag());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }
}

// One-shot command handler
pub mod ask {
    //! Send a single message and print the reply.

    use super::*;

    /// Submit `message` and print the bot reply
    ///
    /// With `json` the reply is printed as a serialized message record.
    ///
    /// # Errors
    ///
    /// Returns error if `message` is blank or the agent request failed; in
    /// the latter case the apology and notice are printed first
    pub async fn run_ask(config: Config, message: String, json: bool) -> Result<()> {
        tracing::info!("Sending one-shot message to {}", config.agent.endpoint);

        let mut session = open_session(&config)?;
        if !session.submit_and_wait(&message).await {
            anyhow::bail!("Message cannot be empty");
        }

        let state = session.state();
        let reply = state
            .messages()
            .last()
            .ok_or_else(|| anyhow::anyhow!("Agent produced no reply"))?;

        if json {
            println!("{}", serde_json::to_string_pretty(reply)?);
        } else {
            println!("{}", Renderer::new(session.theme()).message(reply));
        }

        if let Some(notice) = state.last_error() {
            eprintln!("{}", format!("! {}", notice).red().bold());
            anyhow::bail!("Agent request failed: {}", notice);
        }

        Ok(())
    }
}
