//! Rewrite rules over labeled host graphs.
//!
//! A rewrite rule pairs a [`Pattern`] with an ordered list of
//! [`RewriteAction`]s. The [`RewriteEngine`] finds the pattern's matches,
//! selects one or all of them according to its [`RewriteConfig`], and runs
//! the actions against each selected match in turn. Actions share one
//! mutable [`Binding`] per match, so a node created by `AddNode` can be
//! referenced by the actions that follow it.
//!
//! Matches are computed once, before the first edit. When several matches
//! are rewritten and an earlier application invalidates a node a later match
//! still refers to, the later application fails with
//! [`RewriteError::ActionFailed`]; edits already performed stay in place.

mod action;
mod config;
mod engine;
mod error;
mod rule;

pub use action::RewriteAction;
pub use config::{RewriteConfig, Selection, Selector};
pub use dracula_common::{Binding, NodeIdx, Placeholder};
pub use dracula_subgraph::Pattern;
pub use engine::{RewriteEngine, RewriteOutcome};
pub use error::{ActionError, RewriteError};
pub use rule::RewriteRule;
