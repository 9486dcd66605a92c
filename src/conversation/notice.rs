//! Transient error notice
//!
//! At most one notice is active. Each raised notice gets a fresh
//! generation number; an expiry timer carries the generation it was armed
//! for, so a timer that outlives its notice cannot clear a newer one.

/// A user-visible error notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Text shown to the user
    pub text: String,
    /// Identifies this notice among all notices raised in the session
    pub generation: u64,
}

/// Holder of the single active notice
#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<Notice>,
    next_generation: u64,
}

impl NoticeBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text`, replacing any active notice
    ///
    /// Returns the generation of the new notice.
    pub fn raise(&mut self, text: impl Into<String>) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        if let Some(previous) = self.current.replace(Notice {
            text: text.into(),
            generation,
        }) {
            tracing::debug!("Notice {} superseded by {}", previous.generation, generation);
        }
        generation
    }

    /// Clear the active notice, returning it
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.current.take()
    }

    /// Clear the active notice only if it is the one armed as `generation`
    ///
    /// Returns whether a notice was cleared.
    pub fn expire(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(notice) if notice.generation == generation => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// The active notice, if any
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Text of the active notice, if any
    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.text.as_str())
    }
}
