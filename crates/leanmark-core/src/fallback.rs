//! Generic Markdown conversion
//!
//! Plain Markdown for every node kind. Platform-specific rules override a
//! subset of these and delegate back here for the rest.

use crate::ast::{Node, NodeRef};
use crate::context::{ExportContext, Fallback};
use crate::options::HeadingStyle;

/// Plain Markdown conversion used for kinds without an override
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFallback;

impl Fallback for MarkdownFallback {
    fn convert(&self, node: &NodeRef<'_>, contents: &str, ctx: &ExportContext<'_>) -> String {
        let options = ctx.options();

        match node.node {
            Node::Section(_) | Node::Paragraph { .. } => contents.to_string(),

            Node::Headline { level, title, .. } => {
                let title = ctx.export_data(title, Some(node));
                headline(*level, title.trim(), options.heading_style) + contents
            }

            Node::Text(text) => escape_markdown(text),

            Node::Bold(_) => delimit(contents, &options.strong_delimiter),

            Node::Italic(_) => delimit(contents, &options.em_delimiter.to_string()),

            Node::Code(code) | Node::Verbatim(code) => inline_code(code),

            Node::LineBreak => "  \n".to_string(),

            Node::HorizontalRule => options.hr.clone(),

            Node::QuoteBlock(_) => {
                let content = contents.trim();
                if content.is_empty() {
                    return String::new();
                }
                content
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {}", line)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }

            Node::PlainList { .. } => contents.trim_end().to_string() + "\n",

            Node::Item(_) => list_item(node, contents, options.bullet_list_marker),

            Node::Link { link_type, path, .. } => {
                let target = format!("{}:{}", link_type, path);
                if contents.is_empty() {
                    format!("<{}>", target)
                } else {
                    format!("[{}]({})", contents, target)
                }
            }

            Node::SrcBlock { value, .. }
            | Node::ExampleBlock { value }
            | Node::FixedWidth { value } => value
                .lines()
                .map(|line| format!("    {}", line))
                .collect::<Vec<_>>()
                .join("\n"),

            Node::FootnoteReference { .. } => ctx
                .footnotes()
                .number_of(node.node)
                .map(|n| format!("[{}]", n))
                .unwrap_or_default(),

            // Collected once at the end of the export
            Node::FootnoteDefinition { .. } => String::new(),

            Node::LatexFragment { value } => value.clone(),

            Node::Table { rows } => table(rows, node, ctx),

            Node::ExportBlock { backend, value } => {
                if backend.eq_ignore_ascii_case("md") || backend.eq_ignore_ascii_case("markdown") {
                    value.clone()
                } else {
                    String::new()
                }
            }
        }
    }
}

fn headline(level: u8, title: &str, style: HeadingStyle) -> String {
    if title.is_empty() {
        return String::new();
    }
    match style {
        HeadingStyle::Setext if level <= 2 => {
            let underline = if level == 1 { "=" } else { "-" };
            format!(
                "{}\n{}\n\n",
                title,
                underline.repeat(title.chars().count())
            )
        }
        _ => format!("{} {}\n\n", "#".repeat(usize::from(level.max(1))), title),
    }
}

fn delimit(contents: &str, delimiter: &str) -> String {
    if contents.trim().is_empty() {
        return String::new();
    }
    format!("{}{}{}", delimiter, contents, delimiter)
}

fn inline_code(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }

    // Count backticks needed
    let max_consecutive_backticks = code
        .chars()
        .fold((0, 0), |(max, current), c| {
            if c == '`' {
                (max.max(current + 1), current + 1)
            } else {
                (max, 0)
            }
        })
        .0;

    let backticks = "`".repeat(max_consecutive_backticks + 1);

    if max_consecutive_backticks > 0 && (code.starts_with('`') || code.ends_with('`')) {
        format!("{} {} {}", backticks, code, backticks)
    } else {
        format!("{}{}{}", backticks, code, backticks)
    }
}

fn list_item(node: &NodeRef<'_>, contents: &str, bullet: char) -> String {
    let (ordered, position) = match node.parent() {
        Some(Node::PlainList { ordered, items }) => (
            *ordered,
            items
                .iter()
                .position(|item| std::ptr::eq(item, node.node))
                .unwrap_or(0),
        ),
        _ => (false, 0),
    };

    let prefix = if ordered {
        format!("{}. ", position + 1)
    } else {
        format!("{} ", bullet)
    };
    let continuation = " ".repeat(prefix.len());

    let mut out = prefix;
    for (i, line) in contents.trim().lines().enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&continuation);
            }
        }
        out.push_str(line);
    }
    out.push('\n');
    out
}

fn table(rows: &[Vec<Vec<Node>>], parent: &NodeRef<'_>, ctx: &ExportContext<'_>) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };

    let render_row = |row: &Vec<Vec<Node>>| {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| ctx.export_data(cell, Some(parent)).trim().to_string())
            .collect();
        format!("| {} |", cells.join(" | "))
    };

    let mut lines = vec![render_row(header)];
    lines.push(format!("|{}", " --- |".repeat(header.len())));
    lines.extend(rows[1..].iter().map(render_row));
    lines.join("\n")
}

/// Escape markdown special characters
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' | '*' | '_' | '[' | ']' | '#' | '`' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Document;
    use crate::options::Options;
    use pretty_assertions::assert_eq;

    /// Renders every node through the fallback, children first
    struct FallbackOnly;

    impl crate::context::Transcode for FallbackOnly {
        fn transcode(
            &self,
            nodes: &[Node],
            parent: Option<&NodeRef<'_>>,
            ctx: &ExportContext<'_>,
        ) -> String {
            let mut out = String::new();
            for node in nodes {
                let node_ref = NodeRef::within(node, parent);
                let contents = ctx.export_data(node.contents(), Some(&node_ref));
                let rendered = ctx.fallback(&node_ref, &contents);
                out.push_str(&rendered);
                if node.kind().is_block() && !rendered.is_empty() {
                    out.truncate(out.trim_end_matches('\n').len());
                    out.push_str("\n\n");
                }
            }
            out
        }
    }

    fn render(nodes: Vec<Node>, options: Options) -> String {
        let doc = Document::new(nodes);
        let ctx = ExportContext::new(&doc, &options, &MarkdownFallback, &FallbackOnly);
        ctx.export_data(&doc.children, None).trim().to_string()
    }

    #[test]
    fn test_atx_headline() {
        let result = render(
            vec![Node::headline(2, "Title", vec![Node::paragraph(vec![Node::text("Body")])])],
            Options::default(),
        );
        assert_eq!(result, "## Title\n\nBody");
    }

    #[test]
    fn test_setext_headline() {
        let options = Options {
            heading_style: HeadingStyle::Setext,
            ..Default::default()
        };
        let result = render(vec![Node::headline(1, "Title", vec![])], options);
        assert_eq!(result, "Title\n=====");
    }

    #[test]
    fn test_text_is_escaped() {
        let result = render(
            vec![Node::paragraph(vec![Node::text("a_b *c*")])],
            Options::default(),
        );
        assert_eq!(result, "a\\_b \\*c\\*");
    }

    #[test]
    fn test_emphasis_and_strong() {
        let result = render(
            vec![Node::paragraph(vec![
                Node::Bold(vec![Node::text("bold")]),
                Node::text(" and "),
                Node::Italic(vec![Node::text("it")]),
            ])],
            Options::default(),
        );
        assert_eq!(result, "**bold** and *it*");
    }

    #[test]
    fn test_inline_code_with_backticks() {
        assert_eq!(inline_code("code"), "`code`");
        assert_eq!(inline_code("a`b"), "``a`b``");
        assert_eq!(inline_code("`x"), "`` `x ``");
    }

    #[test]
    fn test_ordered_list() {
        let list = Node::PlainList {
            ordered: true,
            items: vec![
                Node::Item(vec![Node::paragraph(vec![Node::text("One")])]),
                Node::Item(vec![Node::paragraph(vec![Node::text("Two")])]),
            ],
        };
        assert_eq!(render(vec![list], Options::default()), "1. One\n2. Two");
    }

    #[test]
    fn test_quote_block() {
        let quote = Node::QuoteBlock(vec![
            Node::paragraph(vec![Node::text("One")]),
            Node::paragraph(vec![Node::text("Two")]),
        ]);
        assert_eq!(render(vec![quote], Options::default()), "> One\n>\n> Two");
    }

    #[test]
    fn test_generic_link() {
        let result = render(
            vec![Node::paragraph(vec![Node::link("mailto", "me@example.com", Some("mail"))])],
            Options::default(),
        );
        assert_eq!(result, "[mail](mailto:me@example.com)");
    }

    #[test]
    fn test_table() {
        let table = Node::Table {
            rows: vec![
                vec![vec![Node::text("a")], vec![Node::text("b")]],
                vec![vec![Node::text("1")], vec![Node::text("2")]],
            ],
        };
        assert_eq!(
            render(vec![table], Options::default()),
            "| a | b |\n| --- | --- |\n| 1 | 2 |"
        );
    }

    #[test]
    fn test_footnote_definition_not_rendered_in_place() {
        let result = render(
            vec![
                Node::paragraph(vec![Node::text("Body")]),
                Node::FootnoteDefinition {
                    label: "x".to_string(),
                    children: vec![Node::paragraph(vec![Node::text("def")])],
                },
            ],
            Options::default(),
        );
        assert_eq!(result, "Body");
    }

    #[test]
    fn test_inline_image_detection() {
        let doc = Document::default();
        let options = Options::default();
        let ctx = ExportContext::new(&doc, &options, &MarkdownFallback, &FallbackOnly);

        assert!(ctx.is_inline_image(&Node::link("file", "img/a.png", None)));
        assert!(ctx.is_inline_image(&Node::link("https", "//example.com/a.SVG", None)));
        assert!(!ctx.is_inline_image(&Node::link("ftp", "//example.com/a.png", None)));
        assert!(!ctx.is_inline_image(&Node::link("file", "notes.org", None)));
        assert!(!ctx.is_inline_image(&Node::link("file", "img/a.png", Some("diagram"))));
    }
}
