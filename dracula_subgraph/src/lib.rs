//! Subgraph pattern matching over labeled host graphs.
//!
//! A [`Pattern`] declares placeholders `0..k`, each with a required label or
//! wildcard, and the directed edges that must connect them. The matcher
//! enumerates every injective [`Binding`] of placeholders to live host nodes
//! such that all required edges are present.
//!
//! The search first prunes a candidate set per placeholder by label and by
//! in/out degree (a host node must have at least as many incoming and
//! outgoing edges as the placeholder has in the pattern), then backtracks
//! over placeholders in increasing order with an explicit stack.

mod candidates;
mod config;
mod constraints;
mod error;
mod matcher;
mod pattern;
mod search;
mod state;

pub use config::{Config, DedupeMode};
pub use dracula_common::{Binding, LabelSpec, NodeIdx, Placeholder};
pub use error::PatternError;
pub use matcher::{MatchSet, SubgraphMatcher};
pub use pattern::{Pattern, PatternBuilder};

use dracula_graph::LabeledGraph;

/// Finds every match of `pattern` in `graph` using the default [`Config`].
pub fn find<N: PartialEq, E>(pattern: &Pattern<N>, graph: &LabeledGraph<N, E>) -> MatchSet {
    SubgraphMatcher::search_all(pattern, graph, &Config::default())
}
