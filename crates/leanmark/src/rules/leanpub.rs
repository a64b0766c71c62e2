//! Leanpub overrides on top of the generic Markdown conversion.

use leanmark_core::{ExportContext, Node, NodeKind};

use super::Rule;
use crate::utilities::{fenced, prefix_lines, resolve_image_path, strip_math_brackets, ASIDE_MARKER};

/// Create all Leanpub rules, keyed by the kind they override
pub fn leanpub_rules() -> Vec<(NodeKind, Rule)> {
    vec![
        (NodeKind::SrcBlock, src_block_rule()),
        (NodeKind::ExampleBlock, aside_block_rule()),
        (NodeKind::FixedWidth, aside_block_rule()),
        (NodeKind::Headline, headline_rule()),
        (NodeKind::Link, link_rule()),
        (NodeKind::FootnoteReference, footnote_reference_rule()),
        (NodeKind::LatexFragment, latex_fragment_rule()),
        // Leanpub has no table or raw-block syntax we can target; drop them
        // rather than leak source markup.
        (NodeKind::Table, suppress_rule()),
        (NodeKind::ExportBlock, suppress_rule()),
        (NodeKind::Text, plain_text_rule()),
    ]
}

fn src_block_rule() -> Rule {
    Rule::new(|node, _, _| {
        let Node::SrcBlock { language, value } = node.node else {
            return String::new();
        };
        format!(
            "{{lang=\"{}\"}}\n{}",
            language.as_deref().unwrap_or(""),
            fenced(value)
        )
    })
}

fn aside_block_rule() -> Rule {
    Rule::new(|node, _, _| {
        let value = match node.node {
            Node::ExampleBlock { value } | Node::FixedWidth { value } => value,
            _ => return String::new(),
        };
        let block = format!("{{linenos=off}}\n{}", fenced(value));
        prefix_lines(&block, ASIDE_MARKER)
    })
}

fn headline_rule() -> Rule {
    Rule::new(|node, content, ctx| {
        let anchor = match node.node {
            Node::Headline { id: Some(id), .. } if !id.is_empty() => format!("{{#{}}}\n", id),
            _ => String::new(),
        };
        anchor + &ctx.fallback(node, content)
    })
}

/// Cross-references, inline images and URL links.
///
/// Image paths with a URL scheme keep their `scheme:` prefix so the target
/// stays a working URL; relative file paths are kept as authored.
fn link_rule() -> Rule {
    Rule::new(|node, content, ctx| {
        let Node::Link { link_type, path, .. } = node.node else {
            return String::new();
        };

        if link_type.is_cross_reference() {
            let text = if content.is_empty() {
                path.as_str()
            } else {
                content
            };
            return format!("[{}](#{})", text, path);
        }

        if ctx.is_inline_image(node.node) {
            let target = if link_type.is_url_scheme() {
                format!("{}:{}", link_type, path)
            } else {
                resolve_image_path(path)
            };
            let caption = node
                .enclosing_caption()
                .map(|caption| ctx.export_data(caption, None))
                .unwrap_or_default();
            return format!("![{}]({})", caption.trim(), target);
        }

        if link_type.is_url_scheme() {
            let target = format!("{}:{}", link_type, path);
            return if content.is_empty() {
                format!("<{}>", target)
            } else {
                format!("[{}]({})", content, target)
            };
        }

        tracing::debug!(link_type = %link_type, path = %path, "Dropping unsupported link");
        String::new()
    })
}

fn footnote_reference_rule() -> Rule {
    Rule::new(|node, _, ctx| {
        let Node::FootnoteReference { label, .. } = node.node else {
            return String::new();
        };
        let marker = match (label, ctx.footnotes().number_of(node.node)) {
            (Some(label), _) => label.clone(),
            (None, Some(number)) => number.to_string(),
            (None, None) => {
                tracing::warn!("Anonymous footnote reference is not part of the document");
                String::new()
            }
        };
        format!("[^{}]", marker)
    })
}

fn latex_fragment_rule() -> Rule {
    Rule::new(|node, _, _| {
        let Node::LatexFragment { value } = node.node else {
            return String::new();
        };
        format!("{{$$}}{}{{/$$}}", strip_math_brackets(value))
    })
}

fn suppress_rule() -> Rule {
    Rule::new(|_, _, _| String::new())
}

/// Text is emitted as-is so the generic escaping cannot mangle the markup
/// the other rules produce
fn plain_text_rule() -> Rule {
    Rule::new(|node, _, _| match node.node {
        Node::Text(text) => text.clone(),
        _ => String::new(),
    })
}

/// Append the footnote definitions to the rendered body.
///
/// With no footnotes the body is returned unchanged.
pub fn inner_template(contents: &str, ctx: &ExportContext<'_>) -> String {
    let definitions: Vec<String> = ctx
        .footnotes()
        .definitions()
        .filter_map(|footnote| {
            let body = ctx.export_data(footnote.body?, None);
            Some(format!("[^{}]: {}", footnote.marker(), body.trim()))
        })
        .collect();

    if definitions.is_empty() {
        return contents.to_string();
    }

    format!(
        "{}\n\n{}",
        contents.trim_end_matches('\n'),
        definitions.join("\n\n")
    )
}
