use dracula_common::{NodeIdx, Placeholder};
use dracula_graph::LabeledGraph;

use crate::Pattern;

/// Per-placeholder host candidates, pruned by label and degree.
///
/// A node is admitted for placeholder `p` if its label satisfies `p`'s spec
/// and its in/out degree covers `p`'s degree requirement. This never drops a
/// node that could fill `p` in a valid match; it may keep nodes that later
/// fail the connectivity or injectivity checks.
#[derive(Clone, Debug, Default)]
pub(crate) struct CandidateSets {
    per_placeholder: Vec<Vec<NodeIdx>>,
}

impl CandidateSets {
    pub(crate) fn build<N: PartialEq, E>(pattern: &Pattern<N>, graph: &LabeledGraph<N, E>) -> Self {
        let per_placeholder = pattern
            .nodes()
            .map(|(p, spec)| {
                let required = pattern.degree_requirement(p);
                graph
                    .nodes()
                    .filter(|&(idx, label)| graph.degree(idx).covers(&required) && spec.matches(label))
                    .map(|(idx, _)| idx)
                    .collect()
            })
            .collect();
        Self { per_placeholder }
    }

    /// Candidates of `p`, in ascending node order.
    pub(crate) fn of(&self, p: Placeholder) -> &[NodeIdx] {
        self.per_placeholder
            .get(p.as_usize())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns true if some placeholder has no candidate at all.
    pub(crate) fn any_empty(&self) -> bool {
        self.per_placeholder.iter().any(Vec::is_empty)
    }

    pub(crate) fn sizes(&self) -> Vec<usize> {
        self.per_placeholder.iter().map(Vec::len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dracula_common::{DUNGEON_EDGES, DUNGEON_NODES, DungeonNode};
    use dracula_graph::{DEFAULT_CAPACITY, StandardGraph};

    fn dungeon() -> StandardGraph<DungeonNode> {
        LabeledGraph::from_parts(
            DEFAULT_CAPACITY,
            DUNGEON_NODES.iter().copied(),
            DUNGEON_EDGES
                .iter()
                .map(|&(s, t)| (NodeIdx::new(s), NodeIdx::new(t), ())),
        )
        .unwrap()
    }

    #[test]
    fn degree_and_label_pruning() {
        let graph = dungeon();
        let pattern = Pattern::builder()
            .any(0)
            .node(1, DungeonNode::TaskProgress)
            .any(2)
            .edge(0, 1)
            .edge(1, 2)
            .build()
            .unwrap();

        let sets = CandidateSets::build(&pattern, &graph);
        let ids = |v: &[u32]| v.iter().copied().map(NodeIdx::new).collect::<Vec<_>>();

        // #0 needs out >= 1: Start, Entrance, both TaskProgress.
        assert_eq!(sets.of(Placeholder::new(0)), ids(&[0, 1, 3, 4]).as_slice());
        // #1 needs TaskProgress with in >= 1 and out >= 1: n3 and n4.
        assert_eq!(sets.of(Placeholder::new(1)), ids(&[3, 4]).as_slice());
        // #2 needs in >= 1: everything but Start.
        assert_eq!(sets.of(Placeholder::new(2)), ids(&[1, 2, 3, 4]).as_slice());
        assert!(!sets.any_empty());
    }

    #[test]
    fn removed_nodes_are_never_candidates() {
        let mut graph = dungeon();
        graph.remove_node(NodeIdx::new(3)).unwrap();
        let pattern = Pattern::builder()
            .node(0, DungeonNode::TaskProgress)
            .build()
            .unwrap();

        let sets = CandidateSets::build(&pattern, &graph);
        assert_eq!(sets.of(Placeholder::new(0)), &[NodeIdx::new(4)]);
        assert_eq!(sets.sizes(), vec![1]);
    }
}
