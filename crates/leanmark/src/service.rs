//! LeanpubService - the main entry point for document to Leanpub Markdown
//! conversion.

use std::fs;
use std::path::{Path, PathBuf};

use leanmark_core::{
    Document, ExportContext, Fallback, MarkdownFallback, Node, NodeKind, NodeRef, Options,
    Transcode,
};

use crate::rules::{inner_template, Rule, Rules};
use crate::{LeanmarkError, Result};

/// Extension of exported files
pub const OUTPUT_EXTENSION: &str = "md";

/// The main service for converting documents to Leanpub Markdown
pub struct LeanpubService {
    options: Options,
    rules: Rules,
    fallback: Box<dyn Fallback>,
}

impl LeanpubService {
    /// Create a new LeanpubService with default options
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create a LeanpubService with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            rules: Rules::new(),
            fallback: Box::new(MarkdownFallback),
        }
    }

    /// Replace the generic conversion used for kinds without an override
    pub fn with_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fallback + 'static,
    {
        self.fallback = Box::new(fallback);
        self
    }

    /// Convert a document to Leanpub Markdown
    pub fn export(&self, document: &Document) -> Result<String> {
        let ctx = ExportContext::new(document, &self.options, self.fallback.as_ref(), self);
        tracing::debug!(
            nodes = document.node_count(),
            footnotes = ctx.footnotes().len(),
            "Exporting document"
        );

        let body = ctx.export_data(&document.children, None);
        let result = post_process(&inner_template(&body, &ctx));

        tracing::debug!(bytes = result.len(), "Export finished");
        Ok(result)
    }

    /// Export next to `source`, with the extension swapped to `.md`.
    /// Returns the path written.
    pub fn export_to_file(&self, document: &Document, source: &Path) -> Result<PathBuf> {
        let target = Self::output_path(source)?;
        let markdown = self.export(document)?;
        fs::write(&target, markdown)?;
        tracing::info!(path = %target.display(), "Wrote Leanpub Markdown");
        Ok(target)
    }

    /// Output file name derived from the source document's name
    pub fn output_path(source: &Path) -> Result<PathBuf> {
        if source.file_name().is_none() {
            return Err(LeanmarkError::InvalidInput(format!(
                "source path has no file name: {}",
                source.display()
            )));
        }
        Ok(source.with_extension(OUTPUT_EXTENSION))
    }

    /// Install a rule for a node kind, replacing the built-in override
    pub fn add_rule(&mut self, kind: NodeKind, rule: Rule) -> &mut Self {
        self.rules.add(kind, rule);
        self
    }

    /// Send a node kind back to the generic conversion
    pub fn remove_rule(&mut self, kind: NodeKind) -> &mut Self {
        self.rules.remove(kind);
        self
    }

    /// Get the rule table
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Get mutable access to the rule table
    pub fn rules_mut(&mut self) -> &mut Rules {
        &mut self.rules
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

impl Default for LeanpubService {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcode for LeanpubService {
    /// Depth-first fold: children first, then the override or the fallback.
    /// Non-empty block output is followed by exactly one blank line.
    fn transcode(
        &self,
        nodes: &[Node],
        parent: Option<&NodeRef<'_>>,
        ctx: &ExportContext<'_>,
    ) -> String {
        let mut output = String::new();

        for node in nodes {
            let node_ref = NodeRef::within(node, parent);
            let contents = self.transcode(node.contents(), Some(&node_ref), ctx);

            let rendered = match self.rules.for_node(&node_ref) {
                Some(rule) => rule.replace(&node_ref, &contents, ctx),
                None => ctx.fallback(&node_ref, &contents),
            };
            if rendered.is_empty() {
                continue;
            }

            output.push_str(&rendered);
            if node.kind().is_block() {
                output.truncate(output.trim_end_matches('\n').len());
                output.push_str("\n\n");
            }
        }

        output
    }
}

/// Trim only leading/trailing newlines, not all whitespace
/// (code blocks and asides keep their indentation)
fn post_process(output: &str) -> String {
    output.trim_matches('\n').to_string()
}
