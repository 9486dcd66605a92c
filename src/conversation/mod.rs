//! Conversation state and the runtime that drives it
//!
//! - `message`: chat messages and the ordered message log
//! - `transcript`: flattening prior turns into the request context
//! - `notice`: the transient error notice
//! - `controller`: the synchronous state machine
//! - `session`: the tokio runtime executing controller effects

pub mod controller;
pub mod message;
pub mod notice;
pub mod session;
pub mod transcript;

pub use controller::{ConversationController, Effect, Event, Phase, SessionState};
pub use message::{Message, MessageId, MessageLog, Role};
pub use session::{ChatSession, SessionEvent};
