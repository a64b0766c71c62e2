use leanmark::{Document, LeanpubService, Node};
use pretty_assertions::assert_eq;

fn export(children: Vec<Node>) -> String {
    LeanpubService::new()
        .export(&Document::new(children))
        .unwrap()
}

fn para(children: Vec<Node>) -> Node {
    Node::paragraph(children)
}

#[test]
fn heading_with_cross_reference_id() {
    let headline = Node::Headline {
        level: 1,
        title: vec![Node::text("Intro")],
        id: Some("sec1".to_string()),
        children: vec![],
    };
    assert_eq!(export(vec![headline]), "{#sec1}\n# Intro");
}

#[test]
fn python_code_block() {
    assert_eq!(
        export(vec![Node::src_block(Some("python"), "print(1)\n")]),
        "{lang=\"python\"}\n~~~~~~~~\nprint(1)\n~~~~~~~~"
    );
}

#[test]
fn external_links() {
    assert_eq!(
        export(vec![para(vec![Node::link("https", "//example.com", None)])]),
        "<https://example.com>"
    );
    assert_eq!(
        export(vec![para(vec![Node::link("https", "//example.com", Some("site"))])]),
        "[site](https://example.com)"
    );
}

#[test]
fn nested_code_block_is_dedented() {
    let headline = Node::headline(
        1,
        "Build",
        vec![Node::Section(vec![Node::src_block(
            Some("sh"),
            "    make\n      make install\n",
        )])],
    );
    assert_eq!(
        export(vec![headline]),
        "# Build\n\n{lang=\"sh\"}\n~~~~~~~~\nmake\n  make install\n~~~~~~~~"
    );
}

#[test]
fn every_aside_line_is_marked() {
    let result = export(vec![
        para(vec![Node::text("Output:")]),
        Node::ExampleBlock {
            value: "  first\n\n  second\n".to_string(),
        },
    ]);
    let aside: Vec<&str> = result.lines().skip(2).collect();
    assert_eq!(aside.first(), Some(&"A> {linenos=off}"));
    assert_eq!(aside.last(), Some(&"A> ~~~~~~~~"));
    assert!(aside.iter().all(|line| line.starts_with("A> ")));
}

#[test]
fn footnotes_are_numbered_and_collected() {
    let doc = vec![
        Node::headline(
            1,
            "Chapter",
            vec![Node::Section(vec![para(vec![
                Node::text("Claim"),
                Node::footnote(None, Some(vec![Node::text("Source one.")])),
                Node::text(" and another"),
                Node::footnote(Some("ref"), None),
                Node::text(" and a third"),
                Node::footnote(None, Some(vec![Node::text("Source three.")])),
            ])])],
        ),
        Node::FootnoteDefinition {
            label: "ref".to_string(),
            children: vec![para(vec![Node::text("Labeled source.")])],
        },
    ];

    assert_eq!(
        export(doc),
        "# Chapter\n\n\
         Claim[^1] and another[^ref] and a third[^3]\n\n\
         [^1]: Source one.\n\n\
         [^ref]: Labeled source.\n\n\
         [^3]: Source three."
    );
}

#[test]
fn no_footnotes_leaves_body_unchanged() {
    assert_eq!(export(vec![para(vec![Node::text("Plain")])]), "Plain");
}

#[test]
fn captioned_image_in_document() {
    let doc = vec![Node::Paragraph {
        caption: Some(vec![Node::text("The cover")]),
        children: vec![Node::link("file", "images/cover.png", None)],
    }];
    assert_eq!(export(doc), "![The cover](images/cover.png)");
}

#[test]
fn math_and_unsupported_links_inline() {
    let doc = vec![para(vec![
        Node::text("Area "),
        Node::LatexFragment {
            value: r"\[\pi r^2\]".to_string(),
        },
        Node::text(", see "),
        Node::link("mailto", "author@example.com", Some("the author")),
        Node::text("."),
    ])];
    assert_eq!(export(doc), r"Area {$$}\pi r^2{/$$}, see .");
}

#[test]
fn cross_reference_to_heading() {
    let doc = vec![
        Node::Headline {
            level: 2,
            title: vec![Node::text("Setup")],
            id: Some("setup".to_string()),
            children: vec![Node::Section(vec![para(vec![Node::text("Steps.")])])],
        },
        para(vec![
            Node::text("Go back to "),
            Node::link("custom-id", "setup", Some("Setup")),
        ]),
    ];
    assert_eq!(
        export(doc),
        "{#setup}\n## Setup\n\nSteps.\n\nGo back to [Setup](#setup)"
    );
}

#[test]
fn caption_reaches_image_inside_emphasis() {
    let doc = vec![Node::Paragraph {
        caption: Some(vec![Node::text("The cover")]),
        children: vec![Node::Italic(vec![Node::link("file", "cover.png", None)])],
    }];
    assert_eq!(export(doc), "*![The cover](cover.png)*");
}

#[test]
fn described_image_link_keeps_its_text() {
    let doc = vec![para(vec![Node::link("https", "//example.com/logo.png", Some("Our logo"))])];
    assert_eq!(export(doc), "[Our logo](https://example.com/logo.png)");
}
