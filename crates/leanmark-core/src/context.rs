//! Read-only state shared by every rule during one export

use crate::ast::{Document, LinkType, Node, NodeRef};
use crate::footnotes::FootnoteIndex;
use crate::options::Options;

/// Host-supplied conversion for node kinds without an override
pub trait Fallback: Send + Sync {
    /// Convert a node whose children are already rendered into `contents`
    fn convert(&self, node: &NodeRef<'_>, contents: &str, ctx: &ExportContext<'_>) -> String;
}

/// Renders a run of sibling nodes through the full rule table.
///
/// Rules use this (via [`ExportContext::export_data`]) for content that is
/// not part of a node's `contents`: headline titles, captions, footnote
/// bodies.
pub trait Transcode {
    fn transcode(
        &self,
        nodes: &[Node],
        parent: Option<&NodeRef<'_>>,
        ctx: &ExportContext<'_>,
    ) -> String;
}

/// Document-wide data available to every rule
pub struct ExportContext<'a> {
    document: &'a Document,
    options: &'a Options,
    footnotes: FootnoteIndex<'a>,
    fallback: &'a dyn Fallback,
    transcoder: &'a dyn Transcode,
}

impl<'a> ExportContext<'a> {
    pub fn new(
        document: &'a Document,
        options: &'a Options,
        fallback: &'a dyn Fallback,
        transcoder: &'a dyn Transcode,
    ) -> Self {
        Self {
            document,
            options,
            footnotes: FootnoteIndex::build(document),
            fallback,
            transcoder,
        }
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    pub fn footnotes(&self) -> &FootnoteIndex<'a> {
        &self.footnotes
    }

    /// Render nodes that are not part of the current node's contents
    pub fn export_data(&self, nodes: &[Node], parent: Option<&NodeRef<'_>>) -> String {
        self.transcoder.transcode(nodes, parent, self)
    }

    /// Run the generic conversion for a node
    pub fn fallback(&self, node: &NodeRef<'_>, contents: &str) -> String {
        self.fallback.convert(node, contents, self)
    }

    /// Check if a link points at an image that should be shown inline.
    ///
    /// A link with description text is a plain link, even to an image file.
    pub fn is_inline_image(&self, node: &Node) -> bool {
        match node {
            Node::Link {
                link_type: LinkType::File | LinkType::Http | LinkType::Https,
                path,
                description,
            } => {
                description.as_ref().map_or(true, Vec::is_empty)
                    && self.options.is_image_path(path)
            }
            _ => false,
        }
    }
}
