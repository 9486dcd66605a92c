//! Conversation controller state machine
//!
//! The controller owns the session state and is the only thing that
//! mutates it. Every input is a discrete [`Event`]; handling one updates the
//! state synchronously and returns the [`Effect`]s the runtime must carry
//! out (dispatch a request, arm or cancel the notice timer, scroll, focus,
//! restyle). The controller itself never performs I/O.
//!
//! ```text
//!            submit(text), text.trim() != ""
//!   Idle  ------------------------------------>  Awaiting
//!    ^                                              |
//!    +---------- success(answer) | failure(err) ----+
//! ```

use crate::agent::{AgentAnswer, AgentRequest};
use crate::config::Config;
use crate::conversation::message::{Message, MessageLog};
use crate::conversation::notice::{Notice, NoticeBoard};
use crate::conversation::transcript::render_transcript;
use crate::error::AgentChatError;
use crate::theme::Theme;
use std::fmt;
use std::time::Duration;

/// Request lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No request in flight
    #[default]
    Idle,
    /// Exactly one request in flight
    Awaiting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Awaiting => write!(f, "awaiting reply"),
        }
    }
}

/// Inputs to the controller
#[derive(Debug)]
pub enum Event {
    /// The input field's text changed
    DraftChanged(String),
    /// The user submitted text
    Submit(String),
    /// The in-flight request produced an answer
    AgentReplied(AgentAnswer),
    /// The in-flight request failed
    AgentFailed(AgentChatError),
    /// The user flipped the theme
    ToggleDark,
    /// The user closed the notice
    DismissNotice,
    /// A notice timer armed for `generation` ran out
    NoticeExpired {
        /// Generation the timer was armed for
        generation: u64,
    },
}

/// Work the runtime performs after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send this request to the agent and report the outcome back
    Dispatch(AgentRequest),
    /// Arm the one-shot timer for the notice with this generation,
    /// replacing any armed timer
    ScheduleNoticeExpiry {
        /// Notice generation
        generation: u64,
        /// Delay before expiry
        after: Duration,
    },
    /// Disarm the notice timer
    CancelNoticeExpiry,
    /// The log grew; move the message view to the bottom
    ScrollToBottom,
    /// Give input focus back to the user
    FocusInput,
    /// Restyle the whole view
    ApplyTheme(Theme),
}

/// Everything a session knows
#[derive(Debug, Default)]
pub struct SessionState {
    log: MessageLog,
    draft: String,
    phase: Phase,
    notices: NoticeBoard,
    dark_mode: bool,
}

impl SessionState {
    /// Messages in send order
    pub fn messages(&self) -> &[Message] {
        self.log.messages()
    }

    /// The message log
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Unsent input text
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a request is in flight
    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Awaiting
    }

    /// Text of the active error notice
    pub fn last_error(&self) -> Option<&str> {
        self.notices.text()
    }

    /// The active error notice
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current()
    }

    /// Dark-mode flag
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Theme derived from the dark-mode flag
    pub fn theme(&self) -> Theme {
        Theme::from(self.dark_mode)
    }
}

/// Owns the session state and applies events to it
#[derive(Debug)]
pub struct ConversationController {
    state: SessionState,
    agent_id: String,
    notice_ttl: Duration,
}

impl ConversationController {
    /// Create a controller for `agent_id` whose notices live for `notice_ttl`
    ///
    /// # Examples
    ///
    /// ```
    /// use agentchat::conversation::{ConversationController, Effect};
    /// use std::time::Duration;
    ///
    /// let mut controller = ConversationController::new("support-bot", Duration::from_secs(5));
    /// let effects = controller.submit("hello");
    /// assert!(controller.state().is_pending());
    /// assert!(effects.iter().any(|e| matches!(e, Effect::Dispatch(_))));
    /// ```
    pub fn new(agent_id: impl Into<String>, notice_ttl: Duration) -> Self {
        Self {
            state: SessionState::default(),
            agent_id: agent_id.into(),
            notice_ttl,
        }
    }

    /// Create a controller from configuration
    pub fn from_config(config: &Config) -> Self {
        let mut controller = Self::new(config.agent.agent_id.clone(), config.ui.notice_ttl());
        controller.state.dark_mode = config.ui.dark_mode;
        controller
    }

    /// Read-only view of the session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Agent identifier sent with each request
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Apply one event
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::DraftChanged(text) => {
                self.set_draft(text);
                Vec::new()
            }
            Event::Submit(text) => self.submit(&text),
            Event::AgentReplied(answer) => self.succeed(answer),
            Event::AgentFailed(error) => self.fail(error),
            Event::ToggleDark => self.toggle_dark(),
            Event::DismissNotice => self.dismiss_notice(),
            Event::NoticeExpired { generation } => self.expire_notice(generation),
        }
    }

    /// Replace the unsent input text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.draft = text.into();
    }

    /// Submit `text` as the next user turn
    ///
    /// Blank input and submissions while a request is in flight leave the
    /// state untouched and produce no effects. Otherwise the user message is
    /// appended, the draft and notice are cleared, and a request carrying
    /// the transcript of the earlier turns is dispatched.
    pub fn submit(&mut self, text: &str) -> Vec<Effect> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        if self.state.is_pending() {
            tracing::debug!("Ignoring submit while a request is in flight");
            return Vec::new();
        }

        let request = AgentRequest {
            message: text.to_string(),
            agent_id: self.agent_id.clone(),
            conversation_context: render_transcript(self.state.messages()),
        };

        let mut effects = Vec::with_capacity(3);
        if self.state.notices.dismiss().is_some() {
            effects.push(Effect::CancelNoticeExpiry);
        }

        self.state.log.push(Message::user(text));
        self.state.draft.clear();
        self.state.phase = Phase::Awaiting;
        tracing::info!(
            "Dispatching message {} to agent {}",
            self.state.log.len(),
            self.agent_id
        );

        effects.push(Effect::ScrollToBottom);
        effects.push(Effect::Dispatch(request));
        effects
    }

    /// Apply a successful reply
    pub fn succeed(&mut self, answer: AgentAnswer) -> Vec<Effect> {
        if !self.state.is_pending() {
            tracing::warn!("Dropping agent reply received with no request in flight");
            return Vec::new();
        }

        self.state.log.push(Message::from_answer(&answer));
        self.state.phase = Phase::Idle;
        vec![Effect::ScrollToBottom, Effect::FocusInput]
    }

    /// Apply a failed request
    ///
    /// Raises a notice with the failure's reason and appends the apology
    /// placeholder so every user turn is answered.
    pub fn fail(&mut self, error: AgentChatError) -> Vec<Effect> {
        if !self.state.is_pending() {
            tracing::warn!(
                "Dropping agent failure received with no request in flight: {}",
                error
            );
            return Vec::new();
        }

        tracing::warn!("Agent request failed: {}", error);
        let generation = self.state.notices.raise(error.notice_text());
        self.state.log.push(Message::apology());
        self.state.phase = Phase::Idle;
        vec![
            Effect::ScheduleNoticeExpiry {
                generation,
                after: self.notice_ttl,
            },
            Effect::ScrollToBottom,
            Effect::FocusInput,
        ]
    }

    /// Flip the dark-mode flag
    pub fn toggle_dark(&mut self) -> Vec<Effect> {
        self.state.dark_mode = !self.state.dark_mode;
        vec![Effect::ApplyTheme(self.state.theme())]
    }

    /// Close the active notice immediately
    pub fn dismiss_notice(&mut self) -> Vec<Effect> {
        match self.state.notices.dismiss() {
            Some(_) => vec![Effect::CancelNoticeExpiry],
            None => Vec::new(),
        }
    }

    /// Expire the notice armed as `generation`, unless it was superseded
    pub fn expire_notice(&mut self, generation: u64) -> Vec<Effect> {
        if self.state.notices.expire(generation) {
            tracing::debug!("Notice {} expired", generation);
        }
        Vec::new()
    }
}
