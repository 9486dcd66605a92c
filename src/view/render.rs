//! Text rendering of the conversation
//!
//! Everything is rendered with the palette of the current [`Theme`]. The
//! renderer is stateless apart from the theme; callers pass it the state to
//! draw.

use crate::conversation::message::{Message, Role};
use crate::conversation::SessionState;
use crate::theme::Theme;
use crate::view::viewport::Viewport;
use colored::Colorize;

/// Shown in place of the log before the first message
pub const EMPTY_STATE_TEXT: &str = "Start a conversation by typing a message below.";

/// Shown while a reply is pending
pub const TYPING_TEXT: &str = "Bot is typing...";

/// Renders session state as terminal text
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    /// Create a renderer for `theme`
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Active theme
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch the palette used for subsequent output
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Render one message with its label and any agent extras
    pub fn message(&self, message: &Message) -> String {
        let palette = self.theme.palette();
        let label_color = match message.role {
            Role::User => palette.user,
            Role::Bot => palette.bot,
        };

        let mut out = format!(
            "{} {}",
            format!("{}:", message.role.label()).color(label_color).bold(),
            message.content.color(palette.body)
        );

        if !message.sources.is_empty() {
            let line = format!("Sources: {}", message.sources.join(", "));
            out.push_str(&format!("\n  {}", line.color(palette.muted)));
        }

        if let Some(confidence) = message.confidence {
            let line = format!("Confidence: {}", format_confidence(confidence));
            out.push_str(&format!("\n  {}", line.color(palette.muted)));
        }

        if let Some(hint) = &message.suggested_followup {
            let line = format!("Try asking: {}", hint);
            out.push_str(&format!("\n  {}", line.color(palette.muted).italic()));
        }

        out
    }

    /// Render the messages inside `viewport`, or the empty state
    pub fn window(&self, messages: &[Message], viewport: &Viewport) -> String {
        if messages.is_empty() {
            return self.empty_state();
        }

        let range = viewport.visible(messages.len());
        let hidden = range.start;
        let mut lines: Vec<String> = Vec::with_capacity(range.len() + 1);
        if hidden > 0 {
            let note = format!("({} earlier messages, /history to show all)", hidden);
            lines.push(note.color(self.theme.palette().muted).to_string());
        }
        lines.extend(messages[range].iter().map(|m| self.message(m)));
        lines.join("\n")
    }

    /// Render every message
    pub fn history(&self, messages: &[Message]) -> String {
        if messages.is_empty() {
            return self.empty_state();
        }
        messages
            .iter()
            .map(|m| self.message(m))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Placeholder shown before the first message
    pub fn empty_state(&self) -> String {
        EMPTY_STATE_TEXT
            .color(self.theme.palette().muted)
            .italic()
            .to_string()
    }

    /// Indicator shown while a reply is pending
    pub fn typing_indicator(&self) -> String {
        TYPING_TEXT
            .color(self.theme.palette().muted)
            .italic()
            .to_string()
    }

    /// Banner for the active error notice
    pub fn notice(&self, text: &str) -> String {
        format!(
            "{} {}",
            format!("! {}", text).color(self.theme.palette().error).bold(),
            "(/dismiss to close)".color(self.theme.palette().muted)
        )
    }

    /// Input prompt; shows the theme tag
    pub fn prompt(&self) -> String {
        format!("{} >> ", self.theme.colored_tag())
    }

    /// Multi-line session summary for `/status`
    pub fn status(&self, state: &SessionState, agent_id: &str) -> String {
        format!(
            "Agent: {}\nMessages: {}\nState: {}\nTheme: {}\nNotice: {}",
            agent_id,
            state.messages().len(),
            state.phase(),
            state.theme(),
            state.last_error().unwrap_or("none")
        )
    }
}

/// Format an opaque confidence score for display
///
/// Scores in `0.0..=1.0` are shown as percentages; anything else is shown
/// as the raw number.
///
/// # Examples
///
/// ```
/// use agentchat::view::render::format_confidence;
///
/// assert_eq!(format_confidence(0.9), "90%");
/// assert_eq!(format_confidence(42.0), "42");
/// ```
pub fn format_confidence(score: f64) -> String {
    if (0.0..=1.0).contains(&score) {
        format!("{:.0}%", score * 100.0)
    } else {
        format!("{}", score)
    }
}
