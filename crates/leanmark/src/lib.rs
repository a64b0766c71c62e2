//! # leanmark
//!
//! Convert parsed Org-style documents to Leanpub-flavored Markdown.
//!
//! The exporter is a table of per-node-kind rules layered over a generic
//! Markdown conversion. Most node kinds use the generic conversion; a
//! curated subset is overridden to produce Leanpub syntax: fenced code
//! blocks with `{lang=...}` headers, `A> ` asides, `{#id}` heading anchors,
//! `[^n]` footnotes, `{$$}...{/$$}` math and image/link forms.
//!
//! ## Design
//!
//! - **No parsing**: the document tree comes from the host parser
//! - **Pure rules**: each rule sees the node, its rendered children and a
//!   read-only [`ExportContext`]; footnote numbers are looked up, not counted
//! - **Delegation**: kinds without an override go to the host [`Fallback`]
//!
//! ## Example
//!
//! ```rust
//! use leanmark::{Document, LeanpubService, Node};
//!
//! let service = LeanpubService::new();
//!
//! let doc = Document::new(vec![
//!     Node::Headline {
//!         level: 1,
//!         title: vec![Node::text("Intro")],
//!         id: Some("sec1".to_string()),
//!         children: vec![],
//!     },
//!     Node::src_block(Some("python"), "print(1)\n"),
//! ]);
//!
//! let markdown = service.export(&doc).unwrap();
//! assert!(markdown.starts_with("{#sec1}\n# Intro"));
//! assert!(markdown.contains("{lang=\"python\"}\n~~~~~~~~\nprint(1)\n~~~~~~~~"));
//! ```

mod rules;
mod service;
pub mod utilities;

pub use leanmark_core::{
    Document, ExportContext, Fallback, HeadingStyle, LinkType, MarkdownFallback, Node, NodeKind,
    NodeRef, Options, Transcode,
};
pub use rules::{inner_template, leanpub_rules, ReplacementFn, Rule, Rules};
pub use service::{LeanpubService, OUTPUT_EXTENSION};

/// Error type for leanmark operations
#[derive(Debug, thiserror::Error)]
pub enum LeanmarkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, LeanmarkError>;
