// SPDX-License-Identifier: GPL-3.0-only

//! System clipboard access.
//!
//! Thin wrapper over `arboard` behind a provider trait so tests run without
//! a real clipboard. Failures here are expected in headless environments and
//! are always surfaced as a status rather than aborting anything.

use arboard::Clipboard;
use snafu::prelude::*;

/// Error type for clipboard operations.
#[derive(Debug, Snafu)]
pub enum ClipboardError {
    /// The system clipboard could not be opened.
    #[snafu(display("clipboard unavailable: {source}"))]
    Unavailable {
        /// The underlying clipboard error.
        source: arboard::Error,
    },

    /// Reading the clipboard failed.
    #[snafu(display("failed to read clipboard: {source}"))]
    ReadFailed {
        /// The underlying clipboard error.
        source: arboard::Error,
    },

    /// Writing the clipboard failed.
    #[snafu(display("failed to write clipboard: {source}"))]
    WriteFailed {
        /// The underlying clipboard error.
        source: arboard::Error,
    },

    /// The clipboard held no usable text.
    #[snafu(display("clipboard is empty"))]
    Empty,
}

/// Clipboard operations, abstracted for testing.
trait ClipboardProvider {
    fn get_text(&mut self) -> Result<String, ClipboardError>;
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self, ClipboardError> {
        let clipboard = Clipboard::new().context(UnavailableSnafu)?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.clipboard.get_text().context(ReadFailedSnafu)
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard.set_text(text).context(WriteFailedSnafu)
    }
}

fn read_with(provider: &mut dyn ClipboardProvider) -> Result<String, ClipboardError> {
    let text = provider.get_text()?;
    ensure!(!text.trim().is_empty(), EmptySnafu);
    Ok(text)
}

/// Reads text from the system clipboard.
///
/// # Errors
///
/// Fails when the clipboard is unavailable, access is denied, or it holds no
/// non-blank text.
pub fn read_text() -> Result<String, ClipboardError> {
    read_with(&mut SystemClipboard::new()?)
}

/// Writes text to the system clipboard.
///
/// # Errors
///
/// Fails when the clipboard is unavailable or the write is rejected.
pub fn write_text(text: &str) -> Result<(), ClipboardError> {
    SystemClipboard::new()?.set_text(text)
}
