//! Document tree
//!
//! This module defines the parsed document tree handed to the exporter.
//! The tree is built by the host parser and is never mutated during export.

use std::fmt;

/// A parsed document: top-level nodes plus document metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Document title (`#+TITLE`), if any
    pub title: Option<String>,

    /// Top-level nodes in document order
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            title: None,
            children,
        }
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.children.iter().map(Node::node_count).sum()
    }
}

/// Link target types as named by the source parser
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkType {
    Id,
    CustomId,
    Http,
    Https,
    Ftp,
    File,
    Fuzzy,
    Other(String),
}

impl LinkType {
    /// Parse an Org link type string (`"custom-id"`, `"https"`, ...)
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "id" => LinkType::Id,
            "custom-id" => LinkType::CustomId,
            "http" => LinkType::Http,
            "https" => LinkType::Https,
            "ftp" => LinkType::Ftp,
            "file" => LinkType::File,
            "fuzzy" => LinkType::Fuzzy,
            _ => LinkType::Other(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LinkType::Id => "id",
            LinkType::CustomId => "custom-id",
            LinkType::Http => "http",
            LinkType::Https => "https",
            LinkType::Ftp => "ftp",
            LinkType::File => "file",
            LinkType::Fuzzy => "fuzzy",
            LinkType::Other(name) => name.as_str(),
        }
    }

    /// Internal cross-reference (`id` or `custom-id`)
    pub fn is_cross_reference(&self) -> bool {
        matches!(self, LinkType::Id | LinkType::CustomId)
    }

    /// External URL scheme the target platform links to directly
    pub fn is_url_scheme(&self) -> bool {
        matches!(self, LinkType::Http | LinkType::Https | LinkType::Ftp)
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminant of [`Node`], used as the rule table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Section,
    Headline,
    Paragraph,
    Text,
    Bold,
    Italic,
    Code,
    Verbatim,
    LineBreak,
    HorizontalRule,
    QuoteBlock,
    PlainList,
    Item,
    Link,
    SrcBlock,
    ExampleBlock,
    FixedWidth,
    FootnoteReference,
    FootnoteDefinition,
    LatexFragment,
    Table,
    ExportBlock,
}

/// A node of the parsed document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Content container directly below a headline (or before the first one)
    Section(Vec<Node>),

    /// Headline with level, title objects, optional cross-reference id and
    /// the nested section/sub-headlines
    Headline {
        level: u8,
        title: Vec<Node>,
        id: Option<String>,
        children: Vec<Node>,
    },

    /// Paragraph, optionally captioned (`#+CAPTION:`)
    Paragraph {
        caption: Option<Vec<Node>>,
        children: Vec<Node>,
    },

    /// Plain text run
    Text(String),

    Bold(Vec<Node>),

    Italic(Vec<Node>),

    /// `~code~`
    Code(String),

    /// `=verbatim=`
    Verbatim(String),

    LineBreak,

    HorizontalRule,

    QuoteBlock(Vec<Node>),

    PlainList {
        ordered: bool,
        items: Vec<Node>,
    },

    /// List item containing blocks
    Item(Vec<Node>),

    /// Link with target type, raw path (without the type prefix) and
    /// optional description objects
    Link {
        link_type: LinkType,
        path: String,
        description: Option<Vec<Node>>,
    },

    /// Source block with optional language and raw (possibly indented) value
    SrcBlock {
        language: Option<String>,
        value: String,
    },

    ExampleBlock {
        value: String,
    },

    /// `: ` prefixed fixed-width lines
    FixedWidth {
        value: String,
    },

    /// Footnote reference with optional label and optional inline definition
    FootnoteReference {
        label: Option<String>,
        definition: Option<Vec<Node>>,
    },

    /// Standalone footnote definition (`[fn:label] body`)
    FootnoteDefinition {
        label: String,
        children: Vec<Node>,
    },

    /// Inline math (`\(...\)`, `\[...\]`, `$...$`) with its raw value
    LatexFragment {
        value: String,
    },

    /// Table rows of cells of objects
    Table {
        rows: Vec<Vec<Vec<Node>>>,
    },

    /// Raw block for another backend (`#+BEGIN_EXPORT html`)
    ExportBlock {
        backend: String,
        value: String,
    },
}

impl Node {
    pub fn text(content: &str) -> Self {
        Node::Text(content.to_string())
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph {
            caption: None,
            children,
        }
    }

    pub fn headline(level: u8, title: &str, children: Vec<Node>) -> Self {
        Node::Headline {
            level,
            title: vec![Node::text(title)],
            id: None,
            children,
        }
    }

    pub fn link(link_type: &str, path: &str, description: Option<&str>) -> Self {
        Node::Link {
            link_type: LinkType::parse(link_type),
            path: path.to_string(),
            description: description.map(|d| vec![Node::text(d)]),
        }
    }

    pub fn src_block(language: Option<&str>, value: &str) -> Self {
        Node::SrcBlock {
            language: language.map(str::to_string),
            value: value.to_string(),
        }
    }

    pub fn footnote(label: Option<&str>, definition: Option<Vec<Node>>) -> Self {
        Node::FootnoteReference {
            label: label.map(str::to_string),
            definition,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Section(_) => NodeKind::Section,
            Node::Headline { .. } => NodeKind::Headline,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::Text(_) => NodeKind::Text,
            Node::Bold(_) => NodeKind::Bold,
            Node::Italic(_) => NodeKind::Italic,
            Node::Code(_) => NodeKind::Code,
            Node::Verbatim(_) => NodeKind::Verbatim,
            Node::LineBreak => NodeKind::LineBreak,
            Node::HorizontalRule => NodeKind::HorizontalRule,
            Node::QuoteBlock(_) => NodeKind::QuoteBlock,
            Node::PlainList { .. } => NodeKind::PlainList,
            Node::Item(_) => NodeKind::Item,
            Node::Link { .. } => NodeKind::Link,
            Node::SrcBlock { .. } => NodeKind::SrcBlock,
            Node::ExampleBlock { .. } => NodeKind::ExampleBlock,
            Node::FixedWidth { .. } => NodeKind::FixedWidth,
            Node::FootnoteReference { .. } => NodeKind::FootnoteReference,
            Node::FootnoteDefinition { .. } => NodeKind::FootnoteDefinition,
            Node::LatexFragment { .. } => NodeKind::LatexFragment,
            Node::Table { .. } => NodeKind::Table,
            Node::ExportBlock { .. } => NodeKind::ExportBlock,
        }
    }

    /// Child nodes rendered into the `contents` string passed to rules.
    ///
    /// Headline titles, link descriptions, captions and footnote definitions
    /// are not contents; rules render them on demand.
    pub fn contents(&self) -> &[Node] {
        match self {
            Node::Section(children)
            | Node::Bold(children)
            | Node::Italic(children)
            | Node::QuoteBlock(children)
            | Node::Item(children) => children.as_slice(),
            Node::Headline { children, .. } | Node::Paragraph { children, .. } => {
                children.as_slice()
            }
            Node::PlainList { items, .. } => items.as_slice(),
            Node::Link {
                description: Some(description),
                ..
            } => description.as_slice(),
            _ => &[],
        }
    }

    /// Every list of child nodes this node owns, including titles,
    /// descriptions, captions, table cells and footnote bodies
    pub fn child_lists(&self) -> Vec<&[Node]> {
        match self {
            Node::Headline { title, children, .. } => vec![title.as_slice(), children.as_slice()],
            Node::Paragraph { caption, children } => match caption {
                Some(caption) => vec![caption.as_slice(), children.as_slice()],
                None => vec![children.as_slice()],
            },
            Node::FootnoteReference {
                definition: Some(definition),
                ..
            } => vec![definition.as_slice()],
            Node::FootnoteDefinition { children, .. } => vec![children.as_slice()],
            Node::Table { rows } => rows.iter().flatten().map(Vec::as_slice).collect(),
            other => vec![other.contents()],
        }
    }

    fn node_count(&self) -> usize {
        let nested: usize = self
            .child_lists()
            .into_iter()
            .flatten()
            .map(Node::node_count)
            .sum();
        1 + nested
    }
}

impl NodeKind {
    /// Block-level kinds are separated from their siblings by a blank line
    pub fn is_block(self) -> bool {
        matches!(
            self,
            NodeKind::Section
                | NodeKind::Headline
                | NodeKind::Paragraph
                | NodeKind::HorizontalRule
                | NodeKind::QuoteBlock
                | NodeKind::PlainList
                | NodeKind::SrcBlock
                | NodeKind::ExampleBlock
                | NodeKind::FixedWidth
                | NodeKind::FootnoteDefinition
                | NodeKind::Table
                | NodeKind::ExportBlock
        )
    }
}

/// A reference to a node with its parent and nearest block-level ancestor.
/// This allows rules to look at the enclosing element without storing parent
/// pointers in the tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    /// The node itself
    pub node: &'a Node,
    parent: Option<&'a Node>,
    block: Option<&'a Node>,
}

impl<'a> NodeRef<'a> {
    /// Create a new NodeRef without parent context
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
            parent: None,
            block: None,
        }
    }

    /// Create a NodeRef for a child of `parent`.
    ///
    /// Inline parents pass their own enclosing block down unchanged.
    pub fn within(node: &'a Node, parent: Option<&NodeRef<'a>>) -> Self {
        let Some(parent) = parent else {
            return Self::new(node);
        };
        let block = if parent.kind().is_block() {
            Some(parent.node)
        } else {
            parent.block
        };
        Self {
            node,
            parent: Some(parent.node),
            block,
        }
    }

    pub fn parent(&self) -> Option<&'a Node> {
        self.parent
    }

    /// Nearest block-level ancestor
    pub fn enclosing_block(&self) -> Option<&'a Node> {
        self.block
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// Caption of the enclosing block, if it carries one
    pub fn enclosing_caption(&self) -> Option<&'a [Node]> {
        match self.block? {
            Node::Paragraph {
                caption: Some(caption),
                ..
            } => Some(caption),
            _ => None,
        }
    }
}
