//! Drives a rewrite: search, select, then apply actions match by match.

use dracula_common::Binding;
use dracula_graph::LabeledGraph;
use dracula_subgraph::{Pattern, SubgraphMatcher};
use tracing::{debug, trace};

use crate::{RewriteAction, RewriteConfig, RewriteError, RewriteRule};

/// What a rewrite did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// Number of matches the search found, before selection.
    pub matches_found: usize,
    /// Final binding of every rewritten match, in application order. Each
    /// binding includes the placeholders introduced by `AddNode`.
    pub applied: Vec<Binding>,
}

impl RewriteOutcome {
    /// Returns true if the graph was left untouched because nothing matched.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.matches_found == 0
    }
}

/// Applies rewrite rules to host graphs.
#[derive(Clone, Debug, Default)]
pub struct RewriteEngine {
    config: RewriteConfig,
}

impl RewriteEngine {
    /// Creates an engine with the given configuration.
    pub const fn new(config: RewriteConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub const fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Rewrites the matches of a validated rule.
    ///
    /// # Errors
    ///
    /// See [`RewriteEngine::rewrite`].
    pub fn apply_rule<N: Clone + PartialEq, E: Default>(
        &self,
        graph: &mut LabeledGraph<N, E>,
        rule: &RewriteRule<N>,
    ) -> Result<RewriteOutcome, RewriteError> {
        self.rewrite(graph, rule.pattern(), rule.actions())
    }

    /// Finds the matches of `pattern` in `graph` and runs `actions` on the
    /// selected ones.
    ///
    /// Matches are computed once up front. Each selected match gets its own
    /// copy of its binding, which the actions extend as they run, in order.
    /// When nothing matches the graph is not touched.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::SelectorOutOfRange`] before any edit when the
    /// selector picks an index past the last match. Returns
    /// [`RewriteError::ActionFailed`] for the first action that fails; edits
    /// made by earlier actions and earlier matches are kept. This happens
    /// when rewriting several matches and one application removes a node or
    /// edge that a later, precomputed match still relies on.
    pub fn rewrite<N: Clone + PartialEq, E: Default>(
        &self,
        graph: &mut LabeledGraph<N, E>,
        pattern: &Pattern<N>,
        actions: &[RewriteAction<N>],
    ) -> Result<RewriteOutcome, RewriteError> {
        let matches = SubgraphMatcher::search_all(pattern, graph, &self.config.matching);
        let matches_found = matches.len();
        if matches.is_empty() {
            debug!("No matches, graph left unchanged");
            return Ok(RewriteOutcome::default());
        }

        let targets = self.config.selection.select(matches)?;
        debug!(
            "Rewriting {} of {} matches with {} actions",
            targets.len(),
            matches_found,
            actions.len()
        );

        let mut applied = Vec::with_capacity(targets.len());
        for (match_index, mut binding) in targets {
            trace!("Rewriting match {}: {}", match_index, binding);
            Self::apply_actions(graph, &mut binding, actions).map_err(
                |(action_index, source)| {
                    debug!(
                        "Action {} failed on match {}: {}",
                        action_index, match_index, source
                    );
                    RewriteError::ActionFailed {
                        match_index,
                        action_index,
                        source,
                    }
                },
            )?;
            applied.push(binding);
        }

        Ok(RewriteOutcome {
            matches_found,
            applied,
        })
    }

    fn apply_actions<N: Clone, E: Default>(
        graph: &mut LabeledGraph<N, E>,
        binding: &mut Binding,
        actions: &[RewriteAction<N>],
    ) -> Result<(), (usize, crate::ActionError)> {
        for (action_index, action) in actions.iter().enumerate() {
            trace!("Applying {} (action {})", action.kind(), action_index);
            action
                .apply(graph, binding)
                .map_err(|err| (action_index, err))?;
        }
        Ok(())
    }
}
