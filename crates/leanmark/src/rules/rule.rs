//! Rule type for node conversion.

use leanmark_core::{ExportContext, NodeRef};

/// Type alias for replacement functions
pub type ReplacementFn =
    Box<dyn Fn(&NodeRef<'_>, &str, &ExportContext<'_>) -> String + Send + Sync>;

/// A rule defines how to convert one node kind to Markdown.
///
/// The replacement receives the node (with its parent), the already
/// rendered contents and the export context. It must not depend on anything
/// but those three.
pub struct Rule {
    /// Replacement function that generates Markdown
    pub replacement: ReplacementFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(replacement: F) -> Self
    where
        F: Fn(&NodeRef<'_>, &str, &ExportContext<'_>) -> String + Send + Sync + 'static,
    {
        Self {
            replacement: Box::new(replacement),
        }
    }

    /// Apply this rule's replacement
    pub fn replace(&self, node: &NodeRef<'_>, content: &str, ctx: &ExportContext<'_>) -> String {
        (self.replacement)(node, content, ctx)
    }
}
