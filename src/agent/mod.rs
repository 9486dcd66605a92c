//! Agent endpoint access
//!
//! This module contains the request/response types exchanged with the
//! conversational agent service and the client that performs the exchange.

pub mod client;
pub mod protocol;

pub use client::{AgentClient, HttpAgentClient};
pub use protocol::{AgentAnswer, AgentEnvelope, AgentRequest, AnswerMetadata};
