use dracula_common::NodeIdx;
use thiserror::Error;

/// Errors raised by structural edits on a [`crate::LabeledGraph`].
///
/// None of these are transient; each one is a violated precondition of the
/// operation that returned it, and the graph is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Every slot of the arena has been allocated.
    #[error("Graph capacity of {capacity} nodes exhausted")]
    CapacityExceeded { capacity: usize },

    /// The index was never allocated, or refers to a removed node.
    #[error("Invalid node index: {0}")]
    InvalidNodeIndex(NodeIdx),

    /// The pair is already connected.
    #[error("Edge {src} -> {dst} already exists")]
    DuplicateEdge { src: NodeIdx, dst: NodeIdx },

    /// The pair is not connected.
    #[error("Edge {src} -> {dst} does not exist")]
    MissingEdge { src: NodeIdx, dst: NodeIdx },
}
