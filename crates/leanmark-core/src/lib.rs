//! leanmark-core - document tree, export context and generic Markdown
//!
//! This crate provides the data structures shared by the `leanmark`
//! exporter and the parsers that feed it: the parsed document tree, the
//! read-only export context handed to every rule, the footnote index and
//! the generic Markdown conversion used for node kinds without an override.
//!
//! # Architecture
//!
//! ```text
//!                          ┌──────────────────┐
//! Parsed Document ───────▶ │    Rule table    │ ──▶ Leanpub Markdown
//!                          │    (leanmark)    │
//!                          └────────┬─────────┘
//!                                   │ no override
//!                                   ▼
//!                          ┌──────────────────┐
//!                          │ MarkdownFallback │
//!                          └──────────────────┘
//! ```

mod ast;
mod context;
mod fallback;
mod footnotes;
mod options;

pub use ast::{Document, LinkType, Node, NodeKind, NodeRef};
pub use context::{ExportContext, Fallback, Transcode};
pub use fallback::{escape_markdown, MarkdownFallback};
pub use footnotes::{Footnote, FootnoteIndex};
pub use options::{HeadingStyle, Options};
