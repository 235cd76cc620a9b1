use dracula_common::{Binding, NodeIdx, Placeholder};
use dracula_graph::LabeledGraph;

use crate::state::State;

pub(crate) trait Constraint {
    fn candidate_is_valid(&self, node: NodeIdx) -> bool;
}

/// Rejects host nodes already bound to an earlier placeholder.
pub(crate) struct NotAlreadyMappedConstraint<'a> {
    state: &'a State,
}

impl<'a> NotAlreadyMappedConstraint<'a> {
    pub(crate) const fn new(state: &'a State) -> Self {
        Self { state }
    }
}

impl Constraint for NotAlreadyMappedConstraint<'_> {
    fn candidate_is_valid(&self, node: NodeIdx) -> bool {
        !self.state.is_used(node)
    }
}

/// Requires the host edges for every pattern edge between the placeholder
/// being bound and the placeholders bound before it.
pub(crate) struct ConnectivityConstraint<'a, N, E> {
    graph: &'a LabeledGraph<N, E>,
    binding: &'a Binding,
    placeholder: Placeholder,
    closing_edges: &'a [(Placeholder, Placeholder)],
}

impl<'a, N, E> ConnectivityConstraint<'a, N, E> {
    pub(crate) const fn new(
        graph: &'a LabeledGraph<N, E>,
        binding: &'a Binding,
        placeholder: Placeholder,
        closing_edges: &'a [(Placeholder, Placeholder)],
    ) -> Self {
        Self {
            graph,
            binding,
            placeholder,
            closing_edges,
        }
    }

    fn resolve(&self, p: Placeholder, candidate: NodeIdx) -> Option<NodeIdx> {
        if p == self.placeholder {
            Some(candidate)
        } else {
            self.binding.get(p)
        }
    }
}

impl<N, E> Constraint for ConnectivityConstraint<'_, N, E> {
    fn candidate_is_valid(&self, node: NodeIdx) -> bool {
        self.closing_edges.iter().all(|&(src, dst)| {
            match (self.resolve(src, node), self.resolve(dst, node)) {
                (Some(s), Some(t)) => self.graph.is_connected(s, t),
                // Unbound endpoints are checked when they are bound.
                _ => true,
            }
        })
    }
}
