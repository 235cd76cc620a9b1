//! Configuration for rewriting.
//!
//! Two things can be tuned:
//! - selection: rewrite every match found, or a single match picked by an
//!   injected selector. The selector receives the number of matches and
//!   returns the index of the one to rewrite, which makes the choice
//!   reproducible in tests and pluggable for generators that want
//!   randomness.
//! - matching: the [`Config`] handed to the subgraph search, for example to
//!   collapse matches that cover the same node set before rewriting.
//!
//! Quick examples
//!
//! ```ignore
//! use dracula_rewrite::{RewriteConfig, Selection};
//! let everywhere = RewriteConfig::default();
//! let first = RewriteConfig::new(Selection::first());
//! let last = RewriteConfig::new(Selection::one(|n| n - 1));
//! ```

use std::fmt;
use std::sync::Arc;

use dracula_common::Binding;
use dracula_subgraph::{Config, MatchSet};

use crate::RewriteError;

/// Picks one match index given the number of matches.
pub type Selector = Arc<dyn Fn(usize) -> usize + Send + Sync>;

/// Which matches a rewrite is applied to.
#[derive(Clone, Default)]
pub enum Selection {
    /// Every match, in discovery order.
    #[default]
    All,
    /// The single match chosen by the selector.
    One(Selector),
}

impl Selection {
    /// Selects the match returned by `selector`.
    pub fn one(selector: impl Fn(usize) -> usize + Send + Sync + 'static) -> Self {
        Self::One(Arc::new(selector))
    }

    /// Always selects the first match found.
    pub fn first() -> Self {
        Self::one(|_| 0)
    }

    /// Narrows `matches` down to the ones to rewrite, paired with their index
    /// in `matches`.
    pub(crate) fn select(&self, matches: MatchSet) -> Result<Vec<(usize, Binding)>, RewriteError> {
        match self {
            Self::All => Ok(matches.into_iter().enumerate().collect()),
            Self::One(selector) => {
                let match_count = matches.len();
                let chosen = selector(match_count);
                matches
                    .into_iter()
                    .nth(chosen)
                    .map(|binding| vec![(chosen, binding)])
                    .ok_or(RewriteError::SelectorOutOfRange {
                        chosen,
                        match_count,
                    })
            }
        }
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::One(_) => f.write_str("One(<selector>)"),
        }
    }
}

/// Global rewrite configuration.
#[derive(Clone, Debug, Default)]
pub struct RewriteConfig {
    /// Which matches to rewrite.
    pub selection: Selection,
    /// Configuration of the underlying subgraph search.
    pub matching: Config,
}

impl RewriteConfig {
    /// Create a new configuration with the default search settings.
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            matching: Config::default(),
        }
    }

    /// Replaces the search configuration.
    #[must_use]
    pub fn with_matching(mut self, matching: Config) -> Self {
        self.matching = matching;
        self
    }
}
