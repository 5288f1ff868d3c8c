// SPDX-License-Identifier: GPL-3.0-only

//! Convert chat assistant transcripts to shareable Markdown quotes.
//!
//! This crate normalizes exported conversations — either the structured JSON
//! export or a freeform markdown/plain-text transcript — into an ordered
//! sequence of `{sender, text, timestamp}` messages, then renders them as
//! HTML preview fragments or serializes them back to a canonical blockquote
//! markdown format.
//!
//! # Pipeline
//!
//! 1. [`parser::parse_transcript`] sniffs the input format and produces
//!    normalized [`message::Message`] records, delegating freeform text to
//!    the [`markdown`] strategies.
//! 2. [`sanitize`] strips embedded tool-invocation noise from every turn.
//! 3. [`renderer`] produces the HTML preview and the markdown quote export.
//!
//! # Example
//!
//! ```
//! use chat2quote::renderer::RenderOptions;
//! use chat2quote::session::Session;
//!
//! let mut session = Session::new(RenderOptions::default());
//! session.load("## Human\nTell me a joke\n## Assistant\nWhy did the chicken cross the road?");
//!
//! let markdown = session.export_markdown();
//! assert!(markdown.starts_with("> **Human**: Tell me a joke"));
//! ```
//!
//! # Modules
//!
//! - [`message`]: the normalized conversation data model
//! - [`parser`]: format detection and JSON export parsing
//! - [`markdown`]: the four freeform transcript conventions
//! - [`sanitize`]: tool-noise stripping
//! - [`renderer`]: HTML preview and markdown quote export
//! - [`session`]: controller owning the loaded conversation
//! - [`clipboard`]: system clipboard collaborator
//! - [`config`]: display-name preference persistence

#![deny(missing_docs)]

pub mod clipboard;
pub mod config;
pub mod markdown;
pub mod message;
pub mod parser;
pub mod renderer;
pub mod sanitize;
pub mod session;
