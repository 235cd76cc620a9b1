//! Common utilities and shared types for the dracula workspace.
//!
//! This crate provides the identifier newtypes, label specifications and
//! placeholder bindings shared by the graph, matcher and rewrite crates, as
//! well as the common test cases used across the project.

mod binding;
mod ids;
mod label;
mod logging;
mod test_cases;

pub use crate::binding::*;
pub use crate::ids::*;
pub use crate::label::*;
pub use crate::logging::*;
pub use crate::test_cases::*;
