//! Entry points of the subgraph search.

use std::collections::{BTreeSet, HashSet};

use dracula_common::{Binding, NodeIdx};
use dracula_graph::LabeledGraph;
use tracing::debug;

use crate::candidates::CandidateSets;
use crate::search::backtrack;
use crate::{Config, Pattern};

/// The matches found by one search.
///
/// Items are in discovery order, which is deterministic but not part of the
/// contract; compare results with [`MatchSet::to_set`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchSet {
    /// The bindings found in the host graph.
    pub items: Vec<Binding>,
}

impl MatchSet {
    /// Creates a set from a list of bindings.
    #[must_use]
    pub const fn new(items: Vec<Binding>) -> Self {
        Self { items }
    }

    /// Returns true if no matches were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the count of found matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The `i`-th match in discovery order.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&Binding> {
        self.items.get(i)
    }

    /// Iterates the matches in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.items.iter()
    }

    /// The matches as an order-independent set.
    #[must_use]
    pub fn to_set(&self) -> BTreeSet<Binding> {
        self.items.iter().cloned().collect()
    }
}

impl IntoIterator for MatchSet {
    type Item = Binding;
    type IntoIter = std::vec::IntoIter<Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Finds the bindings of a pattern in a host graph.
pub struct SubgraphMatcher<'p, 'g, 'cfg, N, E> {
    pattern: &'p Pattern<N>,
    graph: &'g LabeledGraph<N, E>,
    config: &'cfg Config,
}

impl<'p, 'g, 'cfg, N: PartialEq, E> SubgraphMatcher<'p, 'g, 'cfg, N, E> {
    /// Enumerates every match of `pattern` in `graph`.
    pub fn search_all(
        pattern: &'p Pattern<N>,
        graph: &'g LabeledGraph<N, E>,
        config: &'cfg Config,
    ) -> MatchSet {
        let matcher = SubgraphMatcher {
            pattern,
            graph,
            config,
        };
        matcher.enumerate_matches()
    }

    fn enumerate_matches(&self) -> MatchSet {
        let candidates = CandidateSets::build(self.pattern, self.graph);
        debug!(
            "Candidate set sizes per placeholder: {:?}",
            candidates.sizes()
        );

        if candidates.any_empty() {
            debug!("A placeholder has no candidates, skipping search");
            return MatchSet::default();
        }

        let mut results = backtrack(self.pattern, self.graph, &candidates);
        debug!("Search returned {} matches", results.len());

        if self.config.dedupe.collapses() {
            let mut seen: HashSet<Vec<NodeIdx>> = HashSet::new();
            results.retain(|m| seen.insert(m.signature()));
            debug!("{} matches left after node-set dedupe", results.len());
        }

        MatchSet::new(results)
    }
}

impl<N: PartialEq, E> SubgraphMatcher<'_, '_, '_, N, E> {
    /// Checks that `binding` is a match of `pattern` in `graph`.
    ///
    /// The binding must bind exactly the pattern's placeholders, injectively,
    /// to live nodes whose labels satisfy the specs, and every required edge
    /// must be connected in the host.
    pub fn verify(pattern: &Pattern<N>, graph: &LabeledGraph<N, E>, binding: &Binding) -> bool {
        if binding.len() != pattern.placeholder_count() || !binding.is_injective() {
            return false;
        }

        let labels_ok = pattern.nodes().all(|(p, spec)| {
            binding
                .get(p)
                .and_then(|idx| graph.label(idx))
                .is_some_and(|label| spec.matches(label))
        });
        if !labels_ok {
            return false;
        }

        pattern.edges().iter().all(|&(src, dst)| {
            match (binding.get(src), binding.get(dst)) {
                (Some(s), Some(t)) => graph.is_connected(s, t),
                _ => false,
            }
        })
    }
}
