use std::fmt;
use std::hash::Hash;

/// Index of a node slot inside a host graph.
///
/// Indices are handed out monotonically by the graph that owns them and are
/// never reissued, so a `NodeIdx` keeps identifying the same slot for the
/// lifetime of that graph even after the node has been removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx {
    /// The underlying raw integer index.
    inner: u32,
}

impl NodeIdx {
    /// Creates a node index from a raw integer.
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the index as a usize for array access.
    pub const fn as_usize(self) -> usize {
        self.inner as usize
    }

    /// Returns the raw integer.
    pub const fn raw(self) -> u32 {
        self.inner
    }
}

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.inner)
    }
}

impl From<u32> for NodeIdx {
    #[inline]
    fn from(id: u32) -> Self {
        Self { inner: id }
    }
}

impl From<NodeIdx> for usize {
    #[inline]
    fn from(id: NodeIdx) -> Self {
        id.inner as Self
    }
}

impl From<NodeIdx> for u32 {
    #[inline]
    fn from(id: NodeIdx) -> Self {
        id.inner
    }
}

/// A pattern variable, later bound to a concrete host node.
///
/// Placeholders of one pattern are numbered contiguously from zero; rewrite
/// actions may introduce further placeholders past the pattern's range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placeholder {
    inner: u32,
}

impl Placeholder {
    /// Creates a placeholder from a raw integer.
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the placeholder as a usize for array access.
    pub const fn as_usize(self) -> usize {
        self.inner as usize
    }

    /// Returns the raw integer.
    pub const fn raw(self) -> u32 {
        self.inner
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.inner)
    }
}

impl From<u32> for Placeholder {
    #[inline]
    fn from(id: u32) -> Self {
        Self { inner: id }
    }
}

impl From<Placeholder> for usize {
    #[inline]
    fn from(p: Placeholder) -> Self {
        p.inner as Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes() {
        assert_eq!(NodeIdx::new(3).to_string(), "n3");
        assert_eq!(Placeholder::new(0).to_string(), "#0");
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(NodeIdx::new(1) < NodeIdx::new(2));
        assert!(Placeholder::new(4) > Placeholder::new(0));
        assert_eq!(usize::from(NodeIdx::from(7)), 7);
    }
}
