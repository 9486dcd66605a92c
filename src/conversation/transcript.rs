//! Transcript serialization
//!
//! The agent receives the prior turns as plain text, one line per message:
//!
//! ```text
//! User: hi
//! Bot: hello
//! ```
//!
//! Nothing is truncated or summarized, and multi-line content is passed
//! through unchanged.

use crate::conversation::message::Message;

/// Render `messages` as a role-prefixed transcript
///
/// # Examples
///
/// ```
/// use agentchat::conversation::message::Message;
/// use agentchat::conversation::transcript::render_transcript;
///
/// let log = vec![Message::user("hi"), Message::bot("hello")];
/// assert_eq!(render_transcript(&log), "User: hi\nBot: hello");
/// assert_eq!(render_transcript(&[]), "");
/// ```
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.label(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let log = vec![
            Message::user("one"),
            Message::bot("two"),
            Message::user("three"),
            Message::bot("four"),
        ];
        assert_eq!(
            render_transcript(&log),
            "User: one\nBot: two\nUser: three\nBot: four"
        );
    }

    #[test]
    fn test_content_is_not_trimmed() {
        let log = vec![Message::user("  padded  ")];
        assert_eq!(render_transcript(&log), "User:   padded  ");
    }

    #[test]
    fn test_long_transcript_is_not_truncated() {
        let log: Vec<Message> = (0..500).map(|i| Message::user(format!("m{}", i))).collect();
        let transcript = render_transcript(&log);
        assert_eq!(transcript.lines().count(), 500);
        assert!(transcript.ends_with("User: m499"));
    }
}
