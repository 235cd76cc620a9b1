//! Configuration for the subgraph search.
//!
//! The only knob is how results are deduplicated after the search:
//! - None: every injective binding is reported, so a pattern with
//!   automorphisms (for example two interchangeable wildcards) yields one
//!   match per permutation.
//! - NodeSet: matches binding the same SET of host nodes are collapsed to the
//!   first one found.
//!
//! Quick examples
//!
//! ```ignore
//! use dracula_subgraph::{Config, DedupeMode};
//! let all = Config::default();
//! let collapsed = Config::new(DedupeMode::NodeSet);
//! ```

/// Global search configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// How to deduplicate matches after search.
    pub dedupe: DedupeMode,
}

impl Config {
    /// Create a new configuration.
    pub const fn new(dedupe: DedupeMode) -> Self {
        Self { dedupe }
    }
}

/// Control how matches are deduplicated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DedupeMode {
    /// Keep every binding.
    #[default]
    None,
    /// Collapse bindings that map to the same set of host nodes.
    NodeSet,
}

impl DedupeMode {
    /// Returns true if the mode collapses any matches.
    pub const fn collapses(self) -> bool {
        matches!(self, Self::NodeSet)
    }
}
