use std::collections::BTreeSet;
use std::fmt;

use dracula_common::Placeholder;
use dracula_subgraph::Pattern;
use tracing::debug;

use crate::{RewriteAction, RewriteError};

/// A pattern together with the actions to run on each of its matches.
///
/// Construction checks that the actions only read placeholders the pattern
/// declares or an earlier `AddNode` introduces, that no `AddNode` rebinds a
/// placeholder, and that no action reads a placeholder after its node was
/// removed. A rule that passes these checks can still fail at rewrite time,
/// for example when the host runs out of capacity or an `AddEdge` duplicates
/// an existing edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteRule<N> {
    pattern: Pattern<N>,
    actions: Vec<RewriteAction<N>>,
}

impl<N> RewriteRule<N> {
    /// Validates and builds a rule.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::UnknownPlaceholder`],
    /// [`RewriteError::RedefinedPlaceholder`] or
    /// [`RewriteError::RemovedPlaceholder`] naming the first offending action.
    pub fn new(pattern: Pattern<N>, actions: Vec<RewriteAction<N>>) -> Result<Self, RewriteError> {
        validate(&pattern, &actions)?;
        debug!(
            "Built rewrite rule with {} placeholders and {} actions",
            pattern.placeholder_count(),
            actions.len()
        );
        Ok(Self { pattern, actions })
    }

    /// The pattern whose matches are rewritten.
    pub const fn pattern(&self) -> &Pattern<N> {
        &self.pattern
    }

    /// The actions, in application order.
    pub fn actions(&self) -> &[RewriteAction<N>] {
        &self.actions
    }
}

fn validate<N>(pattern: &Pattern<N>, actions: &[RewriteAction<N>]) -> Result<(), RewriteError> {
    let mut defined: BTreeSet<Placeholder> = pattern.nodes().map(|(p, _)| p).collect();
    let mut removed: BTreeSet<Placeholder> = BTreeSet::new();

    for (action_index, action) in actions.iter().enumerate() {
        for placeholder in action.reads() {
            if removed.contains(&placeholder) {
                return Err(RewriteError::RemovedPlaceholder {
                    action_index,
                    placeholder,
                });
            }
            if !defined.contains(&placeholder) {
                return Err(RewriteError::UnknownPlaceholder {
                    action_index,
                    placeholder,
                });
            }
        }
        if let Some(placeholder) = action.defines() {
            if !defined.insert(placeholder) {
                return Err(RewriteError::RedefinedPlaceholder {
                    action_index,
                    placeholder,
                });
            }
        }
        if let Some(placeholder) = action.removes() {
            removed.insert(placeholder);
        }
    }
    Ok(())
}

impl<N: fmt::Debug> fmt::Display for RewriteRule<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} =>", self.pattern)?;
        for action in &self.actions {
            write!(f, " {action};")?;
        }
        Ok(())
    }
}
