use std::collections::BTreeMap;
use std::fmt;

use contracts::*;
use dracula_common::NodeIdx;
use itertools::iproduct;
use tracing::{debug, trace};

use crate::GraphError;

/// Capacity of a graph built with [`LabeledGraph::new`].
pub const DEFAULT_CAPACITY: usize = 32;

/// A graph whose edges carry no information beyond their presence.
pub type StandardGraph<N> = LabeledGraph<N, ()>;

/// In/out degree of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Degree {
    /// Number of connected incoming edges.
    pub in_degree: u32,
    /// Number of connected outgoing edges.
    pub out_degree: u32,
}

impl Degree {
    /// Returns true if this degree is at least `required` in both directions.
    pub const fn covers(&self, required: &Self) -> bool {
        self.in_degree >= required.in_degree && self.out_degree >= required.out_degree
    }
}

/// A directed graph over a fixed-capacity node arena.
///
/// Node labels are `N`; edge labels are `E` (`()` when only connectivity
/// matters). The adjacency is a dense `capacity × capacity` matrix and the
/// per-node in/out degree counters are kept equal to the number of present
/// entries in the matching column/row.
#[derive(Clone, Debug)]
pub struct LabeledGraph<N, E = ()> {
    capacity: usize,
    /// Allocated slots; its length is the allocation cursor, so slots are
    /// handed out in order and never reissued.
    nodes: Vec<Option<N>>,
    /// Row-major `capacity × capacity` adjacency.
    adjacency: Vec<Option<E>>,
    in_degree: Vec<u32>,
    out_degree: Vec<u32>,
    edge_count: usize,
}

/// Result of [`LabeledGraph::compact`].
#[derive(Clone, Debug)]
pub struct Compacted<N, E> {
    /// The rebuilt graph, holding only the live nodes.
    pub graph: LabeledGraph<N, E>,
    /// Old index to new index, for every live node of the source graph.
    pub remap: BTreeMap<NodeIdx, NodeIdx>,
}

impl<N, E> LabeledGraph<N, E> {
    /// Creates an empty graph with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty graph with `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            nodes: Vec::with_capacity(capacity),
            adjacency: (0..capacity * capacity).map(|_| None).collect(),
            in_degree: vec![0; capacity],
            out_degree: vec![0; capacity],
            edge_count: 0,
        }
    }

    /// Total number of slots.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots ever allocated, live or removed.
    pub fn allocated(&self) -> usize {
        self.nodes.len()
    }

    /// Number of slots still available to [`Self::add_node`].
    pub fn remaining(&self) -> usize {
        self.capacity - self.nodes.len()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of connected edges.
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if `idx` was allocated and has not been removed.
    pub fn is_live(&self, idx: NodeIdx) -> bool {
        self.nodes
            .get(idx.as_usize())
            .is_some_and(|slot| slot.is_some())
    }

    /// The label of a live node.
    pub fn label(&self, idx: NodeIdx) -> Option<&N> {
        self.nodes.get(idx.as_usize()).and_then(Option::as_ref)
    }

    /// The label of the edge `src -> dst`, if connected.
    pub fn edge(&self, src: NodeIdx, dst: NodeIdx) -> Option<&E> {
        if src.as_usize() >= self.capacity || dst.as_usize() >= self.capacity {
            return None;
        }
        self.adjacency[self.slot(src, dst)].as_ref()
    }

    /// Returns true if `src -> dst` is connected.
    pub fn is_connected(&self, src: NodeIdx, dst: NodeIdx) -> bool {
        self.edge(src, dst).is_some()
    }

    /// Number of connected incoming edges of `idx` (zero for unknown indices).
    pub fn in_degree(&self, idx: NodeIdx) -> u32 {
        self.in_degree.get(idx.as_usize()).copied().unwrap_or(0)
    }

    /// Number of connected outgoing edges of `idx` (zero for unknown indices).
    pub fn out_degree(&self, idx: NodeIdx) -> u32 {
        self.out_degree.get(idx.as_usize()).copied().unwrap_or(0)
    }

    /// In and out degree of `idx`.
    pub fn degree(&self, idx: NodeIdx) -> Degree {
        Degree {
            in_degree: self.in_degree(idx),
            out_degree: self.out_degree(idx),
        }
    }

    /// Live nodes with their labels, in index order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &N)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|label| (NodeIdx::new(i as u32), label)))
    }

    /// Connected edges with their labels, ordered by source then target.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIdx, NodeIdx, &E)> + '_ {
        let allocated = self.nodes.len();
        iproduct!(0..allocated, 0..allocated).filter_map(move |(s, t)| {
            self.adjacency[s * self.capacity + t]
                .as_ref()
                .map(|label| (NodeIdx::new(s as u32), NodeIdx::new(t as u32), label))
        })
    }

    /// Allocates a new node labeled `label`.
    ///
    /// The returned index has never been issued by this graph before. Fails
    /// with [`GraphError::CapacityExceeded`] once every slot has been used,
    /// even if some of them have since been removed.
    pub fn add_node(&mut self, label: N) -> Result<NodeIdx, GraphError> {
        if self.nodes.len() >= self.capacity {
            return Err(GraphError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let idx = NodeIdx::new(self.nodes.len() as u32);
        self.nodes.push(Some(label));
        trace!("Allocated node {}", idx);
        Ok(idx)
    }

    /// Connects `src -> dst` with `label`.
    #[debug_ensures(self.check_invariants())]
    pub fn link(&mut self, src: NodeIdx, dst: NodeIdx, label: E) -> Result<(), GraphError> {
        self.ensure_live(src)?;
        self.ensure_live(dst)?;
        let slot = self.slot(src, dst);
        if self.adjacency[slot].is_some() {
            return Err(GraphError::DuplicateEdge { src, dst });
        }
        self.adjacency[slot] = Some(label);
        self.out_degree[src.as_usize()] += 1;
        self.in_degree[dst.as_usize()] += 1;
        self.edge_count += 1;
        trace!("Linked {} -> {}", src, dst);
        Ok(())
    }

    /// Disconnects `src -> dst`, returning the edge label.
    #[debug_ensures(self.check_invariants())]
    pub fn unlink(&mut self, src: NodeIdx, dst: NodeIdx) -> Result<E, GraphError> {
        self.ensure_live(src)?;
        self.ensure_live(dst)?;
        let slot = self.slot(src, dst);
        let Some(label) = self.adjacency[slot].take() else {
            return Err(GraphError::MissingEdge { src, dst });
        };
        self.out_degree[src.as_usize()] -= 1;
        self.in_degree[dst.as_usize()] -= 1;
        self.edge_count -= 1;
        trace!("Unlinked {} -> {}", src, dst);
        Ok(label)
    }

    /// Removes a node together with every edge touching it.
    ///
    /// The slot stays allocated: `idx` becomes invalid for every operation
    /// and is never handed out again. Returns the removed label.
    #[debug_ensures(self.check_invariants())]
    pub fn remove_node(&mut self, idx: NodeIdx) -> Result<N, GraphError> {
        self.ensure_live(idx)?;

        let mut dropped = 0usize;
        for other in (0..self.nodes.len()).map(|i| NodeIdx::new(i as u32)) {
            if self.is_connected(idx, other) {
                self.unlink(idx, other)?;
                dropped += 1;
            }
            if other != idx && self.is_connected(other, idx) {
                self.unlink(other, idx)?;
                dropped += 1;
            }
        }
        debug_assert_eq!(self.degree(idx), Degree::default());

        let Some(label) = self.nodes[idx.as_usize()].take() else {
            return Err(GraphError::InvalidNodeIndex(idx));
        };
        debug!("Removed node {} and {} incident edges", idx, dropped);
        Ok(label)
    }

    /// Replaces the label of a live node, returning the old one.
    pub fn change_label(&mut self, idx: NodeIdx, label: N) -> Result<N, GraphError> {
        self.ensure_live(idx)?;
        match self.nodes[idx.as_usize()].as_mut() {
            Some(slot) => Ok(std::mem::replace(slot, label)),
            None => Err(GraphError::InvalidNodeIndex(idx)),
        }
    }

    /// Recomputes the bookkeeping from the adjacency matrix.
    ///
    /// Checks that every degree counter equals the number of present entries
    /// in its row or column, that the edge count matches, and that no edge
    /// touches an empty slot.
    pub fn check_invariants(&self) -> bool {
        let mut in_degree = vec![0u32; self.capacity];
        let mut out_degree = vec![0u32; self.capacity];
        let mut edges = 0usize;

        for (s, t) in iproduct!(0..self.capacity, 0..self.capacity) {
            if self.adjacency[s * self.capacity + t].is_none() {
                continue;
            }
            let live = |i: usize| self.nodes.get(i).is_some_and(Option::is_some);
            if !live(s) || !live(t) {
                return false;
            }
            out_degree[s] += 1;
            in_degree[t] += 1;
            edges += 1;
        }

        edges == self.edge_count && in_degree == self.in_degree && out_degree == self.out_degree
    }

    fn ensure_live(&self, idx: NodeIdx) -> Result<(), GraphError> {
        if self.is_live(idx) {
            Ok(())
        } else {
            Err(GraphError::InvalidNodeIndex(idx))
        }
    }

    const fn slot(&self, src: NodeIdx, dst: NodeIdx) -> usize {
        src.as_usize() * self.capacity + dst.as_usize()
    }
}

impl<N: Clone, E: Clone> LabeledGraph<N, E> {
    /// Builds a graph from node labels (node `i` gets index `i`) and edges.
    pub fn from_parts(
        capacity: usize,
        labels: impl IntoIterator<Item = N>,
        edges: impl IntoIterator<Item = (NodeIdx, NodeIdx, E)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::with_capacity(capacity);
        for label in labels {
            graph.add_node(label)?;
        }
        for (src, dst, label) in edges {
            graph.link(src, dst, label)?;
        }
        Ok(graph)
    }

    /// Rebuilds the graph without its removed slots.
    ///
    /// Live nodes are renumbered densely in index order; labels, edges and
    /// capacity carry over. The returned remap translates old indices.
    pub fn compact(&self) -> Result<Compacted<N, E>, GraphError> {
        let mut graph = Self::with_capacity(self.capacity);
        let mut remap = BTreeMap::new();
        for (old, label) in self.nodes() {
            remap.insert(old, graph.add_node(label.clone())?);
        }
        for (src, dst, label) in self.edges() {
            graph.link(remap[&src], remap[&dst], label.clone())?;
        }
        debug!(
            "Compacted graph from {} allocated slots to {}",
            self.allocated(),
            graph.allocated()
        );
        Ok(Compacted { graph, remap })
    }
}

impl<N, E> Default for LabeledGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: fmt::Debug, E: fmt::Debug> fmt::Display for LabeledGraph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, label) in self.nodes() {
            writeln!(f, "{idx}: {label:?}")?;
        }
        for (src, dst, label) in self.edges() {
            writeln!(f, "{src} -> {dst} [{label:?}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dracula_common::{DUNGEON_EDGES, DUNGEON_NODES, DungeonNode};

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
    fn degrees_track_links() {
        let g = dungeon();
        assert_eq!(g.degree(NodeIdx::new(0)), Degree { in_degree: 0, out_degree: 3 });
        assert_eq!(g.degree(NodeIdx::new(3)), Degree { in_degree: 2, out_degree: 1 });
        assert_eq!(g.degree(NodeIdx::new(2)), Degree { in_degree: 2, out_degree: 0 });
        assert_eq!(g.edge_count(), 6);
        assert!(g.check_invariants());
    }

    #[test]
    fn add_node_fails_when_full() {
        let mut g: StandardGraph<u8> = LabeledGraph::with_capacity(2);
        g.add_node(1).unwrap();
        g.add_node(2).unwrap();
        assert_eq!(g.add_node(3), Err(GraphError::CapacityExceeded { capacity: 2 }));
    }

    #[test]
    fn duplicate_and_missing_edges_are_rejected() {
        let mut g = dungeon();
        let (a, b) = (NodeIdx::new(0), NodeIdx::new(1));
        assert_eq!(g.link(a, b, ()), Err(GraphError::DuplicateEdge { src: a, dst: b }));
        assert_eq!(g.unlink(b, a), Err(GraphError::MissingEdge { src: b, dst: a }));
        assert_eq!(g.unlink(a, b), Ok(()));
        assert_eq!(g.out_degree(a), 2);
        assert_eq!(g.in_degree(b), 0);
    }

    #[test]
    fn links_to_unallocated_slots_are_rejected() {
        let mut g = dungeon();
        let ghost = NodeIdx::new(9);
        assert_eq!(
            g.link(NodeIdx::new(0), ghost, ()),
            Err(GraphError::InvalidNodeIndex(ghost))
        );
        assert_eq!(g.change_label(ghost, DungeonNode::Key), Err(GraphError::InvalidNodeIndex(ghost)));
    }

    #[test]
    fn remove_node_drops_incident_edges_and_never_reissues() {
        let mut g = dungeon();
        let victim = NodeIdx::new(3);
        assert_eq!(g.remove_node(victim), Ok(DungeonNode::TaskProgress));

        assert!(!g.is_live(victim));
        assert_eq!(g.degree(victim), Degree::default());
        assert!(g.edges().all(|(s, t, _)| s != victim && t != victim));
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.out_degree(NodeIdx::new(4)), 0);
        assert_eq!(g.in_degree(NodeIdx::new(2)), 1);

        let fresh = g.add_node(DungeonNode::Key).unwrap();
        assert_eq!(fresh, NodeIdx::new(5));
        assert_eq!(g.remove_node(victim), Err(GraphError::InvalidNodeIndex(victim)));
    }

    #[test]
    fn remove_node_with_self_loop() {
        let mut g: StandardGraph<char> = LabeledGraph::new();
        let a = g.add_node('a').unwrap();
        let b = g.add_node('b').unwrap();
        g.link(a, a, ()).unwrap();
        g.link(a, b, ()).unwrap();
        g.link(b, a, ()).unwrap();
        assert_eq!(g.degree(a), Degree { in_degree: 2, out_degree: 2 });

        g.remove_node(a).unwrap();
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.degree(b), Degree::default());
        assert!(g.check_invariants());
    }

    #[test]
    fn change_label_keeps_adjacency() {
        let mut g = dungeon();
        let idx = NodeIdx::new(4);
        let before = g.degree(idx);
        assert_eq!(g.change_label(idx, DungeonNode::Task), Ok(DungeonNode::TaskProgress));
        assert_eq!(g.label(idx), Some(&DungeonNode::Task));
        assert_eq!(g.degree(idx), before);
    }

    #[test]
    fn independent_graphs_allocate_independently() {
        let mut first: StandardGraph<u8> = LabeledGraph::new();
        let mut second: StandardGraph<u8> = LabeledGraph::new();
        assert_eq!(first.add_node(0).unwrap(), NodeIdx::new(0));
        assert_eq!(first.add_node(0).unwrap(), NodeIdx::new(1));
        assert_eq!(second.add_node(0).unwrap(), NodeIdx::new(0));
    }

    #[test]
    fn compact_renumbers_live_nodes() {
        let mut g = dungeon();
        g.remove_node(NodeIdx::new(1)).unwrap();

        let Compacted { graph, remap } = g.compact().unwrap();
        assert_eq!(graph.allocated(), 4);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), g.edge_count());
        assert_eq!(remap[&NodeIdx::new(4)], NodeIdx::new(3));
        assert!(!remap.contains_key(&NodeIdx::new(1)));
        for (src, dst, _) in g.edges() {
            assert!(graph.is_connected(remap[&src], remap[&dst]));
        }
        for (old, new) in &remap {
            assert_eq!(g.label(*old), graph.label(*new));
        }
    }

    #[test]
    fn display_lists_nodes_then_edges() {
        let mut g: StandardGraph<char> = LabeledGraph::with_capacity(4);
        let a = g.add_node('a').unwrap();
        let b = g.add_node('b').unwrap();
        g.link(a, b, ()).unwrap();
        assert_eq!(g.to_string(), "n0: 'a'\nn1: 'b'\nn0 -> n1 [()]\n");
    }
}
