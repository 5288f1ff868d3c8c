// SPDX-License-Identifier: GPL-3.0-only

//! Input format detection and JSON export parsing.
//!
//! Two source formats are accepted: the structured JSON conversation export
//! and freeform markdown transcripts. [`parse_transcript`] is the single
//! entry point — it sniffs the input, tries the JSON schema first when the
//! input looks like JSON, and falls back to the markdown parser on any
//! deserialization failure or schema mismatch. It never returns an error; an
//! empty result means no format matched and the caller reports the input as
//! unparseable.
//!
//! # Export format
//!
//! A JSON export is an object with `uuid`, `name`, `created_at`,
//! `updated_at`, and a `chat_messages` array. Each entry carries a `sender`
//! (`human` or `assistant`), a `created_at` timestamp, an optional top-level
//! `text`, and a `content` array of typed segments; only `text`-typed
//! segments contribute to the message text.
//!
//! # Example
//!
//! ```
//! use chat2quote::parser::parse_transcript;
//!
//! let json = r#"{
//!     "name": "Greetings",
//!     "chat_messages": [
//!         { "sender": "human", "text": "hi", "content": [] },
//!         { "sender": "assistant", "content": [{ "type": "text", "text": "hello" }] }
//!     ]
//! }"#;
//!
//! let messages = parse_transcript(json);
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[1].text, "hello");
//! ```

use crate::markdown::parse_markdown;
use crate::message::{Message, Sender};
use crate::sanitize::sanitize;
use serde::Deserialize;

/// The root structure of a JSON conversation export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConversationExport {
    /// Export identifier.
    #[serde(default, alias = "id")]
    pub uuid: String,

    /// Conversation title.
    #[serde(default)]
    pub name: String,

    /// When the conversation was created (RFC 3339).
    #[serde(default)]
    pub created_at: String,

    /// When the conversation was last updated (RFC 3339).
    #[serde(default)]
    pub updated_at: String,

    /// The conversation turns, in transcript order.
    ///
    /// Required: an export without this array is not recognized as the JSON
    /// format and falls through to markdown parsing.
    pub chat_messages: Vec<ExportTurn>,
}

/// One raw turn from a JSON export.
///
/// Deserialization is deliberately permissive: missing or oddly-typed fields
/// degrade to empty values rather than failing the whole export, matching
/// how real exports drift over time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTurn {
    /// Who authored the turn. Anything other than `human`/`user` is treated
    /// as the assistant.
    pub sender: Sender,

    /// The turn's `created_at` timestamp, empty when absent.
    pub timestamp: String,

    /// The turn's top-level `text` field, possibly empty.
    pub text: String,

    /// Text extracted from `text`-typed content segments, in order.
    /// `tool_use` and `tool_result` segments are skipped here.
    pub segments: Vec<String>,
}

impl<'de> Deserialize<'de> for ExportTurn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        let sender = get_str(&value, &["sender"])
            .and_then(Sender::from_label)
            .unwrap_or(Sender::Assistant);

        let segments = value
            .get("content")
            .and_then(serde_json::Value::as_array)
            .into_iter()
            .flatten()
            .filter(|seg| get_str(seg, &["type"]) == Some("text"))
            .filter_map(|seg| get_string(seg, &["text"]))
            .collect();

        Ok(Self {
            sender,
            timestamp: get_string(&value, &["created_at"]).unwrap_or_default(),
            text: get_string(&value, &["text"]).unwrap_or_default(),
            segments,
        })
    }
}

/// Navigates a JSON path and returns the string value at the end.
fn get_str<'a>(value: &'a serde_json::Value, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for key in path {
        current = current.get(*key)?;
    }
    current.as_str()
}

/// Like [`get_str`] but returns an owned `String`.
fn get_string(value: &serde_json::Value, path: &[&str]) -> Option<String> {
    get_str(value, path).map(str::to_owned)
}

/// Converts a parsed JSON export into the normalized message sequence.
///
/// Per turn: all `text`-typed segment strings in order, then the top-level
/// `text` field (when non-blank) as one more line, joined with newlines and
/// sanitized. Turns whose sanitized text is empty are dropped silently.
#[must_use]
pub fn import_export(export: &ConversationExport) -> Vec<Message> {
    export
        .chat_messages
        .iter()
        .filter_map(|turn| {
            let mut parts: Vec<&str> = turn.segments.iter().map(String::as_str).collect();
            if !turn.text.trim().is_empty() {
                parts.push(&turn.text);
            }
            let text = sanitize(&parts.join("\n"));
            (!text.is_empty()).then(|| Message {
                sender: turn.sender,
                text,
                timestamp: turn.timestamp.clone(),
            })
        })
        .collect()
}

/// Parses raw input in either supported format.
///
/// Input whose first non-whitespace character is `{` is tried as a JSON
/// export; a parse failure or missing `chat_messages` array falls through to
/// the markdown strategies. This function never fails — an empty `Vec` means
/// the input matched no known format.
#[must_use]
pub fn parse_transcript(input: &str) -> Vec<Message> {
    if input.trim_start().starts_with('{')
        && let Ok(export) = serde_json::from_str::<ConversationExport>(input)
    {
        return import_export(&export);
    }
    parse_markdown(input)
}
