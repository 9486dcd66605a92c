//! Session runtime
//!
//! [`ChatSession`] drives a [`ConversationController`] on the tokio event
//! loop. It turns controller effects into work: requests are sent on a
//! spawned task, notice timers are one-shot sleeps, and both report back
//! through a single channel as [`SessionEvent`]s. Callers feed those events
//! back with [`ChatSession::apply`], so every state change still happens on
//! the caller's task, one event at a time.

use crate::agent::{AgentAnswer, AgentClient};
use crate::conversation::controller::{ConversationController, Effect, Event, SessionState};
use crate::error::AgentChatError;
use crate::theme::Theme;
use crate::view::Viewport;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Completion reported by background work
#[derive(Debug)]
pub enum SessionEvent {
    /// The in-flight request finished
    Settled(Result<AgentAnswer, AgentChatError>),
    /// The notice timer armed for `generation` ran out
    NoticeExpired(u64),
}

/// A running chat session
pub struct ChatSession<C: AgentClient + 'static> {
    controller: ConversationController,
    client: Arc<C>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    notice_timer: Option<JoinHandle<()>>,
    viewport: Viewport,
    theme: Theme,
    focus_requested: bool,
}

impl<C: AgentClient + 'static> ChatSession<C> {
    /// Create a session around `controller`, sending requests through `client`
    pub fn new(controller: ConversationController, client: Arc<C>, viewport_height: usize) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let theme = controller.state().theme();
        Self {
            controller,
            client,
            events_tx,
            events_rx,
            notice_timer: None,
            viewport: Viewport::new(viewport_height),
            theme,
            focus_requested: false,
        }
    }

    /// Current session state
    pub fn state(&self) -> &SessionState {
        self.controller.state()
    }

    /// The controller driving this session
    pub fn controller(&self) -> &ConversationController {
        &self.controller
    }

    /// Theme currently applied to the view
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Scroll position of the message view
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Returns and clears the pending request to refocus the input
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Replace the unsent input text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.dispatch(Event::DraftChanged(text.into()));
    }

    /// Submit `text`; returns whether a request was dispatched
    pub fn submit(&mut self, text: &str) -> bool {
        let before = self.state().messages().len();
        self.dispatch(Event::Submit(text.to_string()));
        self.state().messages().len() > before
    }

    /// Flip the theme
    pub fn toggle_dark(&mut self) {
        self.dispatch(Event::ToggleDark);
    }

    /// Close the active notice
    pub fn dismiss_notice(&mut self) {
        self.dispatch(Event::DismissNotice);
    }

    /// Wait for the next completion from background work
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.recv().await
    }

    /// Take a completion if one is already queued
    pub fn try_next_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Feed a completion back into the controller
    pub fn apply(&mut self, event: SessionEvent) {
        let event = match event {
            SessionEvent::Settled(Ok(answer)) => Event::AgentReplied(answer),
            SessionEvent::Settled(Err(error)) => Event::AgentFailed(error),
            SessionEvent::NoticeExpired(generation) => Event::NoticeExpired { generation },
        };
        self.dispatch(event);
    }

    /// Apply every completion that is already queued
    pub fn drain_events(&mut self) {
        while let Some(event) = self.try_next_event() {
            self.apply(event);
        }
    }

    /// Process completions until no request is in flight
    pub async fn wait_settled(&mut self) {
        while self.state().is_pending() {
            match self.next_event().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }

    /// Submit `text` and wait for its outcome to be applied
    ///
    /// Returns whether a request was dispatched.
    pub async fn submit_and_wait(&mut self, text: &str) -> bool {
        let dispatched = self.submit(text);
        self.wait_settled().await;
        dispatched
    }

    fn dispatch(&mut self, event: Event) {
        let effects = self.controller.handle(event);
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Dispatch(request) => {
                let client = Arc::clone(&self.client);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let outcome = client.send(&request).await;
                    if tx.send(SessionEvent::Settled(outcome)).is_err() {
                        tracing::debug!("Session closed before the agent replied");
                    }
                });
            }
            Effect::ScheduleNoticeExpiry { generation, after } => {
                self.cancel_notice_timer();
                let tx = self.events_tx.clone();
                // Deadline is fixed now, not when the task is first polled.
                let expiry = tokio::time::sleep(after);
                self.notice_timer = Some(tokio::spawn(async move {
                    expiry.await;
                    let _ = tx.send(SessionEvent::NoticeExpired(generation));
                }));
            }
            Effect::CancelNoticeExpiry => self.cancel_notice_timer(),
            Effect::ScrollToBottom => {
                self.viewport.scroll_to_bottom(self.state().messages().len());
            }
            Effect::FocusInput => self.focus_requested = true,
            Effect::ApplyTheme(theme) => {
                tracing::debug!("Applying theme {}", theme);
                self.theme = theme;
            }
        }
    }

    fn cancel_notice_timer(&mut self) {
        if let Some(timer) = self.notice_timer.take() {
            timer.abort();
        }
    }
}

impl<C: AgentClient + 'static> Drop for ChatSession<C> {
    fn drop(&mut self) {
        self.cancel_notice_timer();
    }
}
