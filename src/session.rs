// SPDX-License-Identifier: GPL-3.0-only

//! The conversation session controller.
//!
//! Owns the one piece of mutable state in the crate: the currently loaded
//! message sequence and the display-name preference. Render and export
//! operations read from here instead of any process-wide state.

use crate::message::Message;
use crate::parser::parse_transcript;
use crate::renderer::{self, RenderOptions};

/// Holds the currently loaded conversation and its render settings.
///
/// Loading new input replaces the whole message sequence; there is no
/// incremental merge. Input that matches no known format leaves the previous
/// sequence untouched so an earlier successful parse is not lost to a bad
/// paste.
#[derive(Debug, Default)]
pub struct Session {
    messages: Vec<Message>,
    options: RenderOptions,
}

impl Session {
    /// Creates an empty session with the given render options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            messages: Vec::new(),
            options,
        }
    }

    /// Parses raw input and replaces the current conversation with the
    /// result.
    ///
    /// Returns `false` when the input matched no known format; the previous
    /// messages are kept in that case and the caller should surface a
    /// "could not parse" status.
    pub fn load(&mut self, input: &str) -> bool {
        let messages = parse_transcript(input);
        if messages.is_empty() {
            return false;
        }
        self.messages = messages;
        true
    }

    /// The currently loaded conversation, in transcript order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The active render options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders the current conversation as HTML preview fragments.
    #[must_use]
    pub fn render_html(&self) -> String {
        renderer::render_html(&self.messages, &self.options)
    }

    /// Serializes the current conversation as canonical markdown quotes.
    #[must_use]
    pub fn export_markdown(&self) -> String {
        renderer::export_markdown(&self.messages, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;

    #[test]
    fn load_replaces_previous_conversation() {
        let mut session = Session::default();
        assert!(session.load("Human:\nfirst\nAssistant:\nreply"));
        assert_eq!(session.messages().len(), 2);

        assert!(session.load("## Human\nonly one turn"));
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].text, "only one turn");
    }

    #[test]
    fn failed_load_keeps_previous_conversation() {
        let mut session = Session::default();
        assert!(session.load("Human:\nkept\nAssistant:\nalso kept"));

        assert!(!session.load("nothing recognizable here"));
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].text, "kept");
    }

    #[test]
    fn export_uses_session_options() {
        let mut session = Session::new(RenderOptions {
            display_name: Some("Ada".into()),
            ..Default::default()
        });
        session.load("Human:\nhello\nAssistant:\nhi");

        let markdown = session.export_markdown();
        assert!(markdown.starts_with("> **Ada**: hello"));
    }

    #[test]
    fn empty_session_renders_empty() {
        let session = Session::default();
        assert_eq!(session.render_html(), "");
        assert_eq!(session.export_markdown(), "");
        assert_eq!(session.messages().first().map(|m| m.sender), None::<Sender>);
    }
}
