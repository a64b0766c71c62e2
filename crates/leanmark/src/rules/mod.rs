//! Rule table for Leanpub Markdown conversion.

mod leanpub;
mod rule;

pub use leanpub::{inner_template, leanpub_rules};
pub use rule::{ReplacementFn, Rule};

use indexmap::IndexMap;
use leanmark_core::{NodeKind, NodeRef};

/// Mapping from node kind to its override.
///
/// Kinds without an entry are converted by the host fallback.
pub struct Rules {
    overrides: IndexMap<NodeKind, Rule>,
}

impl Rules {
    /// Create a new Rules instance with the Leanpub overrides installed
    pub fn new() -> Self {
        Self {
            overrides: leanpub_rules().into_iter().collect(),
        }
    }

    /// Create a table with no overrides: everything goes to the fallback
    pub fn empty() -> Self {
        Self {
            overrides: IndexMap::new(),
        }
    }

    /// Install a rule for a kind, replacing any existing override.
    /// Returns the replaced rule.
    pub fn add(&mut self, kind: NodeKind, rule: Rule) -> Option<Rule> {
        self.overrides.insert(kind, rule)
    }

    /// Drop the override for a kind so it falls back to the generic conversion
    pub fn remove(&mut self, kind: NodeKind) -> Option<Rule> {
        self.overrides.shift_remove(&kind)
    }

    /// Find the override for a node
    pub fn for_node(&self, node: &NodeRef<'_>) -> Option<&Rule> {
        self.overrides.get(&node.kind())
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.overrides.contains_key(&kind)
    }

    /// Overridden kinds in installation order
    pub fn kinds(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.overrides.keys().copied()
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
