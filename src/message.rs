// SPDX-License-Identifier: GPL-3.0-only

//! The normalized conversation data model.
//!
//! Every input format — the structured JSON export and the four markdown
//! transcript conventions — is reduced to an ordered sequence of [`Message`]
//! values. Messages are constructed once, already sanitized, and never
//! mutated afterwards; a new parse replaces the whole sequence.

/// The author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// The person driving the conversation.
    Human,
    /// The chat assistant.
    Assistant,
}

impl Sender {
    /// Maps a role label from a transcript to a sender.
    ///
    /// `human` and `user` become [`Sender::Human`]; `assistant` and `claude`
    /// become [`Sender::Assistant`]. Matching is case-insensitive. Labels
    /// outside the known set return `None`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "human" | "user" => Some(Self::Human),
            "assistant" | "claude" => Some(Self::Assistant),
            _ => None,
        }
    }
}

/// One turn of a normalized conversation.
///
/// `text` has already passed through the content sanitizer and is non-empty;
/// the parsers drop turns that sanitize to nothing. `timestamp` is the raw
/// timestamp string from the source when one exists, or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Who authored this turn.
    pub sender: Sender,
    /// The sanitized turn text.
    pub text: String,
    /// Source timestamp (RFC 3339 in JSON exports), possibly empty.
    pub timestamp: String,
}

impl Message {
    /// Creates a message with no timestamp.
    #[must_use]
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_human_labels() {
        assert_eq!(Sender::from_label("human"), Some(Sender::Human));
        assert_eq!(Sender::from_label("User"), Some(Sender::Human));
        assert_eq!(Sender::from_label("  HUMAN "), Some(Sender::Human));
    }

    #[test]
    fn maps_assistant_labels() {
        assert_eq!(Sender::from_label("assistant"), Some(Sender::Assistant));
        assert_eq!(Sender::from_label("Claude"), Some(Sender::Assistant));
    }

    #[test]
    fn rejects_unknown_labels() {
        assert_eq!(Sender::from_label("narrator"), None);
        assert_eq!(Sender::from_label(""), None);
    }
}
