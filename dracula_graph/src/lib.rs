//! Fixed-capacity labeled directed graphs with degree bookkeeping.
//!
//! The host graph of the rewriting system. Nodes live in an arena of a
//! capacity chosen at construction; every slot is either live (carrying a
//! label) or empty. Slots are allocated monotonically and never reissued,
//! so a [`NodeIdx`] stays meaningful across removals. Use
//! [`LabeledGraph::compact`] to rebuild a graph without its dead slots.

mod error;
mod graph;

pub use dracula_common::NodeIdx;
pub use error::GraphError;
pub use graph::{Compacted, DEFAULT_CAPACITY, Degree, LabeledGraph, StandardGraph};
