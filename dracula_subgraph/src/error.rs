use dracula_common::Placeholder;
use thiserror::Error;

/// A malformed pattern, rejected at construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// An edge names a placeholder that was never declared.
    #[error("Edge {src} -> {dst} references undeclared placeholder {missing}")]
    UndeclaredPlaceholder {
        src: Placeholder,
        dst: Placeholder,
        missing: Placeholder,
    },

    /// The same placeholder was declared twice.
    #[error("Placeholder {0} declared more than once")]
    DuplicatePlaceholder(Placeholder),

    /// Placeholders must be numbered `0..k` without gaps.
    #[error("Placeholders are not contiguous: expected {expected}, found {found}")]
    NonContiguousPlaceholders {
        expected: Placeholder,
        found: Placeholder,
    },
}
