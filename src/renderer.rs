// SPDX-License-Identifier: GPL-3.0-only

//! Rendering for normalized conversations.
//!
//! Two outputs: HTML preview fragments (one per message, sender-tagged for
//! styling) and the canonical markdown quote export, one blockquote per
//! message. The markdown output uses role labels the blockquote parser
//! recognizes, so an exported conversation re-imports with senders and text
//! intact.
//!
//! # Example
//!
//! ```
//! use chat2quote::message::{Message, Sender};
//! use chat2quote::renderer::{RenderOptions, export_markdown};
//!
//! let messages = vec![
//!     Message::new(Sender::Human, "Tell me a joke"),
//!     Message::new(Sender::Assistant, "Why did the chicken cross the road?"),
//! ];
//!
//! let markdown = export_markdown(&messages, &RenderOptions::default());
//! assert!(markdown.starts_with("> **Human**: Tell me a joke"));
//! ```

use crate::message::{Message, Sender};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Label used for the human sender when no display name is configured.
const DEFAULT_HUMAN_LABEL: &str = "Human";

/// Fixed label for the assistant sender.
///
/// Kept inside the blockquote-label role set so the canonical export
/// re-parses under that convention.
const ASSISTANT_LABEL: &str = "Claude";

/// Configuration options for rendering and export.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Display name for the human sender. Blank or unset falls back to a
    /// fixed default label. The assistant label is fixed.
    pub display_name: Option<String>,

    /// Whether the HTML preview includes a timestamp line for messages that
    /// carry a parseable RFC 3339 timestamp.
    pub show_timestamps: bool,
}

impl RenderOptions {
    /// The label to use for a sender under these options.
    #[must_use]
    pub fn label(&self, sender: Sender) -> &str {
        match sender {
            Sender::Human => self
                .display_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_HUMAN_LABEL),
            Sender::Assistant => ASSISTANT_LABEL,
        }
    }
}

/// Renders the message sequence as HTML preview fragments.
///
/// Each message becomes a `div.message.human` or `div.message.assistant`
/// block with an escaped sender label and the message body. Triple-backtick
/// code fences in the body become `<pre><code>` blocks (with a language
/// class when the fence names one); newlines elsewhere become `<br>`.
#[must_use]
pub fn render_html(messages: &[Message], opts: &RenderOptions) -> String {
    let mut out = String::new();
    for message in messages {
        let class = match message.sender {
            Sender::Human => "human",
            Sender::Assistant => "assistant",
        };
        writeln!(out, "<div class=\"message {class}\">").unwrap();
        writeln!(
            out,
            "<div class=\"sender\">{}</div>",
            escape_html(opts.label(message.sender))
        )
        .unwrap();
        if opts.show_timestamps
            && let Some(formatted) = format_timestamp(&message.timestamp)
        {
            writeln!(out, "<div class=\"timestamp\">{formatted}</div>").unwrap();
        }
        writeln!(out, "<div class=\"text\">{}</div>", render_body(&message.text)).unwrap();
        writeln!(out, "</div>").unwrap();
    }
    out
}

/// Serializes the message sequence as canonical markdown quotes.
///
/// One message per blockquote: `> **Name**: text`, with additional text
/// lines continued as `> `-prefixed lines and a blank line between messages.
#[must_use]
pub fn export_markdown(messages: &[Message], opts: &RenderOptions) -> String {
    let mut blocks = Vec::with_capacity(messages.len());
    for message in messages {
        let mut block = String::new();
        let mut lines = message.text.lines();
        write!(
            block,
            "> **{}**: {}",
            opts.label(message.sender),
            lines.next().unwrap_or_default()
        )
        .unwrap();
        for line in lines {
            write!(block, "\n> {line}").unwrap();
        }
        blocks.push(block);
    }
    blocks.join("\n\n")
}

/// Formats an RFC 3339 timestamp for display; `None` when absent or
/// unparseable.
fn format_timestamp(timestamp: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
}

/// A region of message text: either prose or a fenced code block.
enum Region<'a> {
    Prose(Vec<&'a str>),
    Code { lang: &'a str, lines: Vec<&'a str> },
}

/// Splits text on triple-backtick fences.
///
/// An unterminated fence runs to the end of the text. The fence lines
/// themselves are not part of any region.
fn split_fences(text: &str) -> Vec<Region<'_>> {
    let mut regions = Vec::new();
    let mut prose: Vec<&str> = Vec::new();
    let mut code: Option<(&str, Vec<&str>)> = None;

    for line in text.lines() {
        match &mut code {
            Some((lang, lines)) => {
                if line.trim() == "```" {
                    let region = Region::Code {
                        lang: *lang,
                        lines: std::mem::take(lines),
                    };
                    regions.push(region);
                    code = None;
                } else {
                    lines.push(line);
                }
            }
            None => {
                if let Some(lang) = line.trim().strip_prefix("```") {
                    if !prose.is_empty() {
                        regions.push(Region::Prose(std::mem::take(&mut prose)));
                    }
                    code = Some((lang.trim(), Vec::new()));
                } else {
                    prose.push(line);
                }
            }
        }
    }
    if let Some((lang, lines)) = code {
        regions.push(Region::Code { lang, lines });
    }
    if !prose.is_empty() {
        regions.push(Region::Prose(prose));
    }
    regions
}

/// Renders message text as HTML: escaped prose with `<br>` line breaks and
/// `<pre><code>` blocks for fenced code.
fn render_body(text: &str) -> String {
    let mut out = String::new();
    for region in split_fences(text) {
        match region {
            Region::Prose(lines) => {
                let escaped: Vec<String> = lines.iter().map(|l| escape_html(l)).collect();
                out.push_str(&escaped.join("<br>"));
            }
            Region::Code { lang, lines } => {
                if lang.is_empty() {
                    out.push_str("<pre><code>");
                } else {
                    write!(out, "<pre><code class=\"language-{}\">", escape_html(lang)).unwrap();
                }
                out.push_str(&escape_html(&lines.join("\n")));
                out.push_str("</code></pre>");
            }
        }
    }
    out
}

/// Escapes text for safe inclusion in HTML content and attribute values.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Message> {
        vec![
            Message::new(Sender::Human, "Tell me a joke"),
            Message::new(Sender::Assistant, "Why?\nBecause."),
        ]
    }

    #[test]
    fn exports_blockquote_per_message() {
        let markdown = export_markdown(&sample(), &RenderOptions::default());
        assert_eq!(
            markdown,
            "> **Human**: Tell me a joke\n\n> **Claude**: Why?\n> Because."
        );
    }

    #[test]
    fn export_uses_configured_display_name() {
        let opts = RenderOptions {
            display_name: Some("Ada".into()),
            ..Default::default()
        };
        let markdown = export_markdown(&sample(), &opts);
        assert!(markdown.starts_with("> **Ada**: Tell me a joke"));
        assert!(markdown.contains("> **Claude**: Why?"));
    }

    #[test]
    fn blank_display_name_falls_back() {
        let opts = RenderOptions {
            display_name: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(opts.label(Sender::Human), "Human");
    }

    #[test]
    fn html_has_sender_tagged_fragments() {
        let html = render_html(&sample(), &RenderOptions::default());
        assert!(html.contains("<div class=\"message human\">"));
        assert!(html.contains("<div class=\"message assistant\">"));
        assert!(html.contains("<div class=\"sender\">Human</div>"));
        assert!(html.contains("<div class=\"sender\">Claude</div>"));
    }

    #[test]
    fn html_escapes_text() {
        let messages = vec![Message::new(Sender::Human, "<script>alert('&')</script>")];
        let html = render_html(&messages, &RenderOptions::default());
        assert!(html.contains("&lt;script&gt;alert(&#39;&amp;&#39;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn html_converts_newlines_to_breaks() {
        let messages = vec![Message::new(Sender::Assistant, "one\ntwo")];
        let html = render_html(&messages, &RenderOptions::default());
        assert!(html.contains("one<br>two"));
    }

    #[test]
    fn html_renders_code_fences_as_pre_blocks() {
        let messages = vec![Message::new(
            Sender::Assistant,
            "look:\n```rust\nfn main() {}\n```\ndone",
        )];
        let html = render_html(&messages, &RenderOptions::default());
        assert!(html.contains("<pre><code class=\"language-rust\">fn main() {}</code></pre>"));
        assert!(html.contains("look:"));
        assert!(html.contains("done"));
    }

    #[test]
    fn html_code_fence_without_language() {
        let messages = vec![Message::new(Sender::Assistant, "```\nplain\n```")];
        let html = render_html(&messages, &RenderOptions::default());
        assert!(html.contains("<pre><code>plain</code></pre>"));
    }

    #[test]
    fn html_escapes_inside_code_blocks() {
        let messages = vec![Message::new(Sender::Assistant, "```html\n<b>bold</b>\n```")];
        let html = render_html(&messages, &RenderOptions::default());
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn html_handles_unterminated_fence() {
        let messages = vec![Message::new(Sender::Assistant, "```rust\nfn main() {}")];
        let html = render_html(&messages, &RenderOptions::default());
        assert!(html.contains("<pre><code class=\"language-rust\">fn main() {}</code></pre>"));
    }

    #[test]
    fn html_shows_parseable_timestamps_when_enabled() {
        let mut message = Message::new(Sender::Human, "hi");
        message.timestamp = "2024-12-05T00:00:00Z".into();
        let opts = RenderOptions {
            show_timestamps: true,
            ..Default::default()
        };
        let html = render_html(&[message], &opts);
        assert!(html.contains("<div class=\"timestamp\">2024-12-05 00:00 UTC</div>"));
    }

    #[test]
    fn html_hides_timestamps_by_default() {
        let mut message = Message::new(Sender::Human, "hi");
        message.timestamp = "2024-12-05T00:00:00Z".into();
        let html = render_html(&[message], &RenderOptions::default());
        assert!(!html.contains("timestamp"));
    }

    #[test]
    fn html_skips_unparseable_timestamps() {
        let mut message = Message::new(Sender::Human, "hi");
        message.timestamp = "yesterday-ish".into();
        let opts = RenderOptions {
            show_timestamps: true,
            ..Default::default()
        };
        let html = render_html(&[message], &opts);
        assert!(!html.contains("timestamp"));
    }

    #[test]
    fn export_round_trips_through_blockquote_parser() {
        let original = sample();
        let markdown = export_markdown(&original, &RenderOptions::default());
        let reparsed = crate::parser::parse_transcript(&markdown);

        assert_eq!(reparsed.len(), original.len());
        for (a, b) in original.iter().zip(&reparsed) {
            assert_eq!(a.sender, b.sender);
            assert_eq!(a.text, b.text);
        }
    }

    #[test]
    fn empty_sequence_renders_empty() {
        assert_eq!(render_html(&[], &RenderOptions::default()), "");
        assert_eq!(export_markdown(&[], &RenderOptions::default()), "");
    }
}
