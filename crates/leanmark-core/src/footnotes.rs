//! Footnote numbering and definition collection
//!
//! Numbers are derived from the whole tree in one pass before export starts,
//! so rules only ever query them.

use std::collections::HashMap;

use crate::ast::{Document, Node};

/// A footnote as seen from the document: its number, optional label and the
/// definition body, if one could be found
#[derive(Debug, Clone, Copy)]
pub struct Footnote<'a> {
    pub number: usize,
    pub label: Option<&'a str>,
    pub body: Option<&'a [Node]>,
}

impl Footnote<'_> {
    /// The label used in `[^...]` markers: explicit label, else the number
    pub fn marker(&self) -> String {
        match self.label {
            Some(label) => label.to_string(),
            None => self.number.to_string(),
        }
    }
}

/// Footnote numbers by reference, in order of first reference
#[derive(Debug, Default)]
pub struct FootnoteIndex<'a> {
    footnotes: Vec<Footnote<'a>>,
    by_label: HashMap<&'a str, usize>,
    by_reference: HashMap<usize, usize>,
}

impl<'a> FootnoteIndex<'a> {
    /// Walk the document and number every footnote reference
    pub fn build(document: &'a Document) -> Self {
        let mut labeled = HashMap::new();
        collect_labeled_definitions(&document.children, &mut labeled);

        let mut index = Self::default();
        index.walk(&document.children, &labeled);

        for footnote in index.footnotes.iter().filter(|f| f.body.is_none()) {
            tracing::warn!(
                label = footnote.label.unwrap_or_default(),
                number = footnote.number,
                "Footnote has no definition"
            );
        }

        index
    }

    fn walk(&mut self, nodes: &'a [Node], labeled: &HashMap<&'a str, &'a [Node]>) {
        for node in nodes {
            match node {
                Node::FootnoteReference { label, definition } => {
                    let label = label.as_deref();
                    let known = label.and_then(|l| self.by_label.get(l).copied());
                    let number = match known {
                        Some(number) => number,
                        None => {
                            let number = self.footnotes.len() + 1;
                            let body = definition
                                .as_deref()
                                .or_else(|| label.and_then(|l| labeled.get(l).copied()));
                            self.footnotes.push(Footnote {
                                number,
                                label,
                                body,
                            });
                            if let Some(label) = label {
                                self.by_label.insert(label, number);
                            }
                            // References inside the definition come right after it
                            if let Some(body) = body {
                                self.walk(body, labeled);
                            }
                            number
                        }
                    };
                    self.by_reference.insert(address(node), number);
                }
                // Reached through their references
                Node::FootnoteDefinition { .. } => {}
                other => {
                    for children in other.child_lists() {
                        self.walk(children, labeled);
                    }
                }
            }
        }
    }

    /// Number of the footnote a reference node points to
    pub fn number_of(&self, reference: &Node) -> Option<usize> {
        self.by_reference.get(&address(reference)).copied()
    }

    /// All footnotes in order of first reference
    pub fn footnotes(&self) -> &[Footnote<'a>] {
        &self.footnotes
    }

    /// Footnotes that have a definition body, in order of first reference
    pub fn definitions(&self) -> impl Iterator<Item = &Footnote<'a>> {
        self.footnotes.iter().filter(|f| f.body.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.footnotes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.footnotes.len()
    }
}

/// Nodes are borrowed for the whole export, so their address identifies them
fn address(node: &Node) -> usize {
    node as *const Node as usize
}

fn collect_labeled_definitions<'a>(nodes: &'a [Node], out: &mut HashMap<&'a str, &'a [Node]>) {
    for node in nodes {
        match node {
            Node::FootnoteDefinition { label, children } => {
                out.entry(label.as_str()).or_insert(children.as_slice());
            }
            Node::FootnoteReference {
                label: Some(label),
                definition: Some(definition),
            } => {
                out.entry(label.as_str()).or_insert(definition.as_slice());
            }
            _ => {}
        }
        for children in node.child_lists() {
            collect_labeled_definitions(children, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(children: Vec<Node>) -> Node {
        Node::paragraph(children)
    }

    fn anonymous(text: &str) -> Node {
        Node::footnote(None, Some(vec![Node::text(text)]))
    }

    fn reference<'a>(doc: &'a Document, path: &[usize]) -> &'a Node {
        let mut node = &doc.children[path[0]];
        for &i in &path[1..] {
            node = &node.contents()[i];
        }
        node
    }

    #[test]
    fn test_anonymous_numbers_follow_document_order() {
        let doc = Document::new(vec![
            para(vec![Node::text("a"), anonymous("one")]),
            para(vec![anonymous("two"), anonymous("three")]),
        ]);
        let index = FootnoteIndex::build(&doc);

        assert_eq!(index.number_of(reference(&doc, &[0, 1])), Some(1));
        assert_eq!(index.number_of(reference(&doc, &[1, 0])), Some(2));
        assert_eq!(index.number_of(reference(&doc, &[1, 1])), Some(3));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_labeled_reference_reuses_number() {
        let doc = Document::new(vec![
            para(vec![
                Node::footnote(Some("x"), None),
                anonymous("anon"),
                Node::footnote(Some("x"), None),
            ]),
            Node::FootnoteDefinition {
                label: "x".to_string(),
                children: vec![para(vec![Node::text("ex")])],
            },
        ]);
        let index = FootnoteIndex::build(&doc);

        assert_eq!(index.number_of(reference(&doc, &[0, 0])), Some(1));
        assert_eq!(index.number_of(reference(&doc, &[0, 1])), Some(2));
        assert_eq!(index.number_of(reference(&doc, &[0, 2])), Some(1));

        let markers: Vec<String> = index.definitions().map(Footnote::marker).collect();
        assert_eq!(markers, vec!["x", "2"]);
    }

    #[test]
    fn test_nested_reference_numbered_after_parent() {
        let doc = Document::new(vec![
            para(vec![
                Node::footnote(Some("outer"), None),
                anonymous("last"),
            ]),
            Node::FootnoteDefinition {
                label: "outer".to_string(),
                children: vec![para(vec![Node::text("see"), anonymous("inner")])],
            },
        ]);
        let index = FootnoteIndex::build(&doc);

        let numbers: Vec<(usize, String)> = index
            .footnotes()
            .iter()
            .map(|f| (f.number, f.marker()))
            .collect();
        assert_eq!(
            numbers,
            vec![
                (1, "outer".to_string()),
                (2, "2".to_string()),
                (3, "3".to_string())
            ]
        );
        assert_eq!(index.number_of(reference(&doc, &[0, 1])), Some(3));
    }

    #[test]
    fn test_missing_definition_keeps_number() {
        let doc = Document::new(vec![para(vec![Node::footnote(Some("ghost"), None)])]);
        let index = FootnoteIndex::build(&doc);

        assert_eq!(index.len(), 1);
        assert_eq!(index.definitions().count(), 0);
    }

    #[test]
    fn test_unreferenced_definition_ignored() {
        let doc = Document::new(vec![Node::FootnoteDefinition {
            label: "lonely".to_string(),
            children: vec![para(vec![Node::text("nobody cites me")])],
        }]);
        let index = FootnoteIndex::build(&doc);

        assert!(index.is_empty());
    }
}
