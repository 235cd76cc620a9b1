use dracula_common::{NodeIdx, Placeholder};
use dracula_graph::GraphError;
use dracula_subgraph::PatternError;
use thiserror::Error;

/// Failure of a single action against a binding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The action reads a placeholder the binding does not contain.
    #[error("Placeholder {0} is not bound")]
    UnboundPlaceholder(Placeholder),

    /// `AddNode` targets a placeholder that is already bound.
    #[error("Placeholder {placeholder} is already bound to {node}")]
    AlreadyBoundPlaceholder {
        placeholder: Placeholder,
        node: NodeIdx,
    },

    /// The underlying graph edit was rejected.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors produced while validating or running a rewrite.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// An action failed while rewriting a match. Matches rewritten before it,
    /// and earlier actions of the same match, remain applied.
    #[error("Action {action_index} failed on match {match_index}: {source}")]
    ActionFailed {
        match_index: usize,
        action_index: usize,
        #[source]
        source: ActionError,
    },

    /// The injected selector picked an index outside `0..match_count`.
    #[error("Selector chose match {chosen} out of {match_count}")]
    SelectorOutOfRange { chosen: usize, match_count: usize },

    /// A rule action reads a placeholder that neither the pattern nor an
    /// earlier `AddNode` provides.
    #[error("Action {action_index} reads unknown placeholder {placeholder}")]
    UnknownPlaceholder {
        action_index: usize,
        placeholder: Placeholder,
    },

    /// A rule action reads a placeholder whose node an earlier action removed.
    #[error("Action {action_index} reads placeholder {placeholder} after its node was removed")]
    RemovedPlaceholder {
        action_index: usize,
        placeholder: Placeholder,
    },

    /// A rule `AddNode` targets a placeholder that is already defined.
    #[error("Action {action_index} redefines placeholder {placeholder}")]
    RedefinedPlaceholder {
        action_index: usize,
        placeholder: Placeholder,
    },

    /// The rule's pattern is malformed.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}
