//! Mapping between pattern placeholders and host nodes.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use contracts::*;

use crate::{NodeIdx, Placeholder};

/// A (possibly partial) assignment of placeholders to host node indices.
///
/// The binding keeps a reverse index so that injectivity can be checked
/// without scanning. A complete, injective binding that satisfies every
/// pattern edge is a match.
#[derive(Clone, Debug, Default)]
pub struct Binding {
    /// Placeholder to host node mapping
    placeholder_to_node: BTreeMap<Placeholder, NodeIdx>,
    /// Host node to placeholder mapping
    node_to_placeholders: BTreeMap<NodeIdx, Vec<Placeholder>>,
}

impl Binding {
    /// Creates a new, empty binding.
    #[debug_ensures(ret.is_consistent())]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a binding from raw `(placeholder, node)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        pairs
            .into_iter()
            .map(|(p, n)| (Placeholder::new(p), NodeIdx::new(n)))
            .collect()
    }

    /// Checks that the forward and reverse maps describe the same relation.
    pub fn is_consistent(&self) -> bool {
        let reverse_total: usize = self.node_to_placeholders.values().map(Vec::len).sum();
        if reverse_total != self.placeholder_to_node.len() {
            return false;
        }
        self.placeholder_to_node.iter().all(|(p, n)| {
            self.node_to_placeholders
                .get(n)
                .is_some_and(|ps| ps.contains(p))
        })
    }

    /// Binds `placeholder` to `node`, returning the node it was previously bound to.
    #[debug_ensures(self.is_consistent())]
    #[debug_ensures(self.get(placeholder) == Some(node))]
    pub fn bind(&mut self, placeholder: Placeholder, node: NodeIdx) -> Option<NodeIdx> {
        let previous = self.unbind(placeholder);
        self.placeholder_to_node.insert(placeholder, node);
        self.node_to_placeholders
            .entry(node)
            .or_default()
            .push(placeholder);
        previous
    }

    /// Removes the entry for `placeholder`, returning the node it was bound to.
    #[debug_ensures(self.is_consistent())]
    #[debug_ensures(!self.contains(placeholder))]
    pub fn unbind(&mut self, placeholder: Placeholder) -> Option<NodeIdx> {
        let node = self.placeholder_to_node.remove(&placeholder)?;
        if let Some(placeholders) = self.node_to_placeholders.get_mut(&node) {
            placeholders.retain(|&p| p != placeholder);
            if placeholders.is_empty() {
                self.node_to_placeholders.remove(&node);
            }
        }
        Some(node)
    }

    /// Resolves a placeholder to its host node.
    #[must_use]
    pub fn get(&self, placeholder: Placeholder) -> Option<NodeIdx> {
        self.placeholder_to_node.get(&placeholder).copied()
    }

    /// Returns true if the placeholder is bound.
    #[must_use]
    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.placeholder_to_node.contains_key(&placeholder)
    }

    /// Returns all placeholders bound to a specific host node.
    #[must_use]
    pub fn placeholders_for(&self, node: NodeIdx) -> &[Placeholder] {
        self.node_to_placeholders
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns true if no placeholder is bound to `node`.
    #[must_use]
    pub fn node_is_free(&self, node: NodeIdx) -> bool {
        !self.node_to_placeholders.contains_key(&node)
    }

    /// Returns true if no two placeholders share a host node.
    #[must_use]
    pub fn is_injective(&self) -> bool {
        self.node_to_placeholders.len() == self.placeholder_to_node.len()
    }

    /// Number of bound placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placeholder_to_node.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placeholder_to_node.is_empty()
    }

    /// Iterates `(placeholder, node)` pairs in placeholder order.
    pub fn iter(&self) -> impl Iterator<Item = (Placeholder, NodeIdx)> + '_ {
        self.placeholder_to_node.iter().map(|(&p, &n)| (p, n))
    }

    /// The sorted, deduplicated set of host nodes touched by this binding.
    #[must_use]
    pub fn signature(&self) -> Vec<NodeIdx> {
        // BTreeMap keys are already sorted and unique.
        self.node_to_placeholders.keys().copied().collect()
    }
}

// The reverse index is derived from the forward map, so only the latter takes
// part in comparisons.
impl PartialEq for Binding {
    fn eq(&self, other: &Self) -> bool {
        self.placeholder_to_node == other.placeholder_to_node
    }
}

impl Eq for Binding {}

impl Hash for Binding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.placeholder_to_node.hash(state);
    }
}

impl PartialOrd for Binding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Binding {
    fn cmp(&self, other: &Self) -> Ordering {
        self.placeholder_to_node.cmp(&other.placeholder_to_node)
    }
}

impl FromIterator<(Placeholder, NodeIdx)> for Binding {
    fn from_iter<I: IntoIterator<Item = (Placeholder, NodeIdx)>>(iter: I) -> Self {
        let mut binding = Self::new();
        for (p, n) in iter {
            binding.bind(p, n);
        }
        binding
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (p, n)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p} -> {n}")?;
        }
        write!(f, "}}")
    }
}
