// SPDX-License-Identifier: GPL-3.0-only

//! Markdown transcript parsing.
//!
//! Freeform transcripts arrive in several quoting conventions depending on
//! where they were copied from. This module segments raw text into speaker
//! turns by trying four strategies in a fixed priority order and accepting
//! the first one that yields at least one message:
//!
//! 1. Session transcripts pasted from a terminal session, marked with
//!    distinguished glyphs per turn.
//! 2. `## Human` / `## Assistant` markdown headers.
//! 3. `> **Human**: ...` blockquote labels (the same shape this crate
//!    exports, so exported quotes re-import cleanly).
//! 4. Bare `Human:` / `Assistant:` label lines.
//!
//! The ordering matters: later conventions can spuriously match fragments of
//! earlier ones (a header inside a terminal transcript turn must not split
//! it), so the most visually distinctive convention is tried first. A
//! strategy that produces zero non-empty messages is skipped and the next one
//! is tried; if all four fail the result is empty and the caller reports the
//! input as unparseable.
//!
//! Every candidate turn passes through [`sanitize`] before it becomes a
//! [`Message`]; turns that sanitize to nothing are dropped silently.

use crate::message::{Message, Sender};
use crate::sanitize::sanitize;
use regex::Regex;
use std::sync::LazyLock;

// Session-transcript glyphs. These mirror one specific terminal session
// format and are deliberately kept as named constants; do not infer
// additional glyphs beyond this set.

/// Marks a human turn at the start of a line in a session transcript.
const HUMAN_MARKER: char = '>';
/// Marks an assistant turn at the start of a line in a session transcript.
const ASSISTANT_MARKER: char = '⏺';
/// Marks a tool-result decoration line (usually indented); dropped entirely.
const TOOL_RESULT_MARKER: char = '⎿';
/// Box-drawing characters; a line consisting only of these is decoration.
const BORDER_CHARS: &str = "─│┌┐└┘├┤┬┴┼╭╮╰╯═║";
/// Block-drawing bullets; a line led by one of these is decoration.
const BULLET_CHARS: &str = "▐█▌";

/// `## Role` or `### Role` header line whose entire content is a role label.
static HEADER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#{2,3}[ \t]+(human|assistant|user)[ \t]*$").unwrap());

/// `> **Role**:` blockquote label, with optional trailing text on the line.
static BLOCKQUOTE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^>\s*\*\*(human|assistant|user|claude)\*\*\s*:\s?(.*)$").unwrap()
});

/// Standalone `Role:` label line with nothing after the colon.
static PLAIN_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(human|assistant|user|claude):\s*$").unwrap());

/// The segmentation strategies, in priority order.
const STRATEGIES: &[fn(&str) -> Vec<Message>] = &[
    parse_session_transcript,
    parse_role_headers,
    parse_blockquote_labels,
    parse_plain_labels,
];

/// Parses a freeform transcript into an ordered message sequence.
///
/// Tries each convention in priority order and returns the first non-empty
/// result. An empty `Vec` means no convention matched; the caller is
/// responsible for surfacing that as a diagnostic.
#[must_use]
pub fn parse_markdown(text: &str) -> Vec<Message> {
    for strategy in STRATEGIES {
        let messages = strategy(text);
        if !messages.is_empty() {
            return messages;
        }
    }
    Vec::new()
}

/// Accumulates turn lines and emits sanitized messages in order.
#[derive(Default)]
struct TurnBuilder {
    messages: Vec<Message>,
    current: Option<(Sender, Vec<String>)>,
}

impl TurnBuilder {
    /// Closes the open turn (if any) and opens a new one.
    fn start(&mut self, sender: Sender) {
        self.flush();
        self.current = Some((sender, Vec::new()));
    }

    /// Opens a turn, continuing the open one when the sender is unchanged.
    ///
    /// Session transcripts repeat the turn glyph on every output burst; a
    /// same-glyph marker is not a new turn there.
    fn start_or_continue(&mut self, sender: Sender) {
        match &self.current {
            Some((open, _)) if *open == sender => {}
            _ => self.start(sender),
        }
    }

    /// Appends a continuation line to the open turn; lines before the first
    /// marker are dropped.
    fn push_line(&mut self, line: &str) {
        if let Some((_, lines)) = &mut self.current {
            lines.push(line.to_owned());
        }
    }

    /// Sanitizes and emits the open turn; turns that sanitize to nothing are
    /// dropped without affecting neighbors.
    fn flush(&mut self) {
        if let Some((sender, lines)) = self.current.take() {
            let text = sanitize(&lines.join("\n"));
            if !text.is_empty() {
                self.messages.push(Message::new(sender, text));
            }
        }
    }

    fn finish(mut self) -> Vec<Message> {
        self.flush();
        self.messages
    }
}

/// Returns `true` for decorative border lines in session transcripts.
fn is_border_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.chars().all(|c| BORDER_CHARS.contains(c))
        || trimmed.starts_with(|c| BULLET_CHARS.contains(c))
}

/// Strategy 1: session transcripts with per-turn glyphs.
///
/// Only attempted when the assistant glyph opens a line somewhere in the
/// input — the glyph is what distinguishes this convention. Without that
/// gate a pure blockquote-label transcript (all `> ` lines) would be claimed
/// here as a run of human turns and never reach strategy 3.
fn parse_session_transcript(text: &str) -> Vec<Message> {
    if !text.lines().any(|l| l.starts_with(ASSISTANT_MARKER)) {
        return Vec::new();
    }

    let mut builder = TurnBuilder::default();
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(ASSISTANT_MARKER) {
            builder.start_or_continue(Sender::Assistant);
            let rest = rest.trim_start();
            if !rest.is_empty() {
                builder.push_line(rest);
            }
        } else if line.trim_start().starts_with(TOOL_RESULT_MARKER) {
            // Tool-result decoration: neither starts nor ends a turn.
        } else if is_border_line(line) {
            // Dropped even mid-turn.
        } else if let Some(rest) = line.strip_prefix(HUMAN_MARKER) {
            builder.start_or_continue(Sender::Human);
            let rest = rest.trim_start();
            if !rest.is_empty() {
                builder.push_line(rest);
            }
        } else {
            builder.push_line(line);
        }
    }
    builder.finish()
}

/// Strategy 2: `##`/`###` headers naming a role.
fn parse_role_headers(text: &str) -> Vec<Message> {
    let mut builder = TurnBuilder::default();
    for line in text.lines() {
        if let Some(caps) = HEADER_LINE.captures(line) {
            // The regex only admits labels Sender::from_label accepts.
            if let Some(sender) = Sender::from_label(&caps[1]) {
                builder.start(sender);
                continue;
            }
        }
        builder.push_line(line);
    }
    builder.finish()
}

/// Strategy 3: `> **Role**:` blockquote labels.
///
/// Continuation lines lose a single leading `> ` prefix when they carry one;
/// anything else is appended as-is until the next label line.
fn parse_blockquote_labels(text: &str) -> Vec<Message> {
    let mut builder = TurnBuilder::default();
    for line in text.lines() {
        if let Some(caps) = BLOCKQUOTE_LABEL.captures(line) {
            if let Some(sender) = Sender::from_label(&caps[1]) {
                builder.start(sender);
                let rest = &caps[2];
                if !rest.is_empty() {
                    builder.push_line(rest);
                }
                continue;
            }
        }
        let unquoted = line
            .strip_prefix("> ")
            .or_else(|| line.strip_prefix('>'))
            .unwrap_or(line);
        builder.push_line(unquoted);
    }
    builder.finish()
}

/// Strategy 4: bare `Role:` lines, the least structured fallback.
fn parse_plain_labels(text: &str) -> Vec<Message> {
    let mut builder = TurnBuilder::default();
    for line in text.lines() {
        if let Some(caps) = PLAIN_LABEL.captures(line) {
            if let Some(sender) = Sender::from_label(&caps[1]) {
                builder.start(sender);
                continue;
            }
        }
        builder.push_line(line);
    }
    builder.finish()
}
