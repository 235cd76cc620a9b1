//! Label requirements for pattern placeholders.

use std::fmt;

/// The label a pattern placeholder requires of the host node it binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelSpec<N> {
    /// Wildcard: any host label is accepted.
    Any,
    /// Only host nodes carrying exactly this label are accepted.
    Exact(N),
}

impl<N: PartialEq> LabelSpec<N> {
    /// Returns true if a host node labeled `label` satisfies this spec.
    pub fn matches(&self, label: &N) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(required) => required == label,
        }
    }
}

impl<N> LabelSpec<N> {
    /// Returns true for the wildcard spec.
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// The required label, if any.
    pub const fn label(&self) -> Option<&N> {
        match self {
            Self::Any => None,
            Self::Exact(label) => Some(label),
        }
    }
}

impl<N> Default for LabelSpec<N> {
    fn default() -> Self {
        Self::Any
    }
}

impl<N> From<N> for LabelSpec<N> {
    fn from(label: N) -> Self {
        Self::Exact(label)
    }
}

impl<N: fmt::Debug> fmt::Display for LabelSpec<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "*"),
            Self::Exact(label) => write!(f, "{label:?}"),
        }
    }
}
