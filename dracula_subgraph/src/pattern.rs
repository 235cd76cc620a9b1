//! Immutable search patterns.

use std::collections::BTreeMap;
use std::fmt;

use dracula_common::{LabelSpec, Placeholder};
use dracula_graph::Degree;

use crate::PatternError;

/// A template graph of placeholders and required directed edges.
///
/// Placeholders are numbered `0..k`; placeholder `i` carries the label spec at
/// position `i`. Repeated edge constraints are collapsed, since requiring the
/// same edge twice is the same requirement as requiring it once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern<N> {
    nodes: Vec<LabelSpec<N>>,
    edges: Vec<(Placeholder, Placeholder)>,
    /// Minimum in/out degree of a host node filling each placeholder.
    requirements: Vec<Degree>,
    /// Per placeholder, the edges whose larger endpoint it is. These become
    /// checkable as soon as that placeholder is bound.
    closing_edges: Vec<Vec<(Placeholder, Placeholder)>>,
}

impl<N> Pattern<N> {
    /// Builds and validates a pattern.
    ///
    /// Fails if a placeholder is declared twice, if the declared placeholders
    /// are not exactly `0..k`, or if an edge names an undeclared placeholder.
    pub fn new(
        nodes: impl IntoIterator<Item = (Placeholder, LabelSpec<N>)>,
        edges: impl IntoIterator<Item = (Placeholder, Placeholder)>,
    ) -> Result<Self, PatternError> {
        let mut declared: BTreeMap<Placeholder, LabelSpec<N>> = BTreeMap::new();
        for (p, spec) in nodes {
            if declared.insert(p, spec).is_some() {
                return Err(PatternError::DuplicatePlaceholder(p));
            }
        }

        for (expected, &found) in declared.keys().enumerate() {
            let expected = Placeholder::new(expected as u32);
            if found != expected {
                return Err(PatternError::NonContiguousPlaceholders { expected, found });
            }
        }
        let nodes: Vec<LabelSpec<N>> = declared.into_values().collect();
        let count = nodes.len();

        let mut unique: Vec<(Placeholder, Placeholder)> = Vec::new();
        for (src, dst) in edges {
            if let Some(missing) = [src, dst].into_iter().find(|p| p.as_usize() >= count) {
                return Err(PatternError::UndeclaredPlaceholder { src, dst, missing });
            }
            if !unique.contains(&(src, dst)) {
                unique.push((src, dst));
            }
        }

        let mut requirements = vec![Degree::default(); count];
        let mut closing_edges = vec![Vec::new(); count];
        for &(src, dst) in &unique {
            requirements[src.as_usize()].out_degree += 1;
            requirements[dst.as_usize()].in_degree += 1;
            closing_edges[src.max(dst).as_usize()].push((src, dst));
        }

        Ok(Self {
            nodes,
            edges: unique,
            requirements,
            closing_edges,
        })
    }

    /// Starts a [`PatternBuilder`].
    pub fn builder() -> PatternBuilder<N> {
        PatternBuilder::default()
    }

    /// Builds a pattern from specs listed in placeholder order and raw edges.
    pub fn from_specs(
        specs: impl IntoIterator<Item = LabelSpec<N>>,
        edges: impl IntoIterator<Item = (u32, u32)>,
    ) -> Result<Self, PatternError> {
        Self::new(
            specs
                .into_iter()
                .enumerate()
                .map(|(i, spec)| (Placeholder::new(i as u32), spec)),
            edges
                .into_iter()
                .map(|(s, t)| (Placeholder::new(s), Placeholder::new(t))),
        )
    }

    /// Number of placeholders.
    pub fn placeholder_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if `p` is declared by this pattern.
    pub fn contains(&self, p: Placeholder) -> bool {
        p.as_usize() < self.nodes.len()
    }

    /// Placeholders with their label specs, in increasing order.
    pub fn nodes(&self) -> impl Iterator<Item = (Placeholder, &LabelSpec<N>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, spec)| (Placeholder::new(i as u32), spec))
    }

    /// The label spec of `p`.
    pub fn spec(&self, p: Placeholder) -> Option<&LabelSpec<N>> {
        self.nodes.get(p.as_usize())
    }

    /// Required edges, without duplicates, in declaration order.
    pub fn edges(&self) -> &[(Placeholder, Placeholder)] {
        &self.edges
    }

    /// Minimum in/out degree a host node needs to fill `p`.
    pub fn degree_requirement(&self, p: Placeholder) -> Degree {
        self.requirements
            .get(p.as_usize())
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn closing_edges(&self, p: Placeholder) -> &[(Placeholder, Placeholder)] {
        self.closing_edges
            .get(p.as_usize())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl<N: fmt::Debug> fmt::Display for Pattern<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (p, spec)) in self.nodes().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}: {spec}")?;
        }
        write!(f, "}}")?;
        for (src, dst) in &self.edges {
            write!(f, " {src}->{dst}")?;
        }
        Ok(())
    }
}

/// Incremental construction of a [`Pattern`].
#[derive(Clone, Debug)]
pub struct PatternBuilder<N> {
    nodes: Vec<(Placeholder, LabelSpec<N>)>,
    edges: Vec<(Placeholder, Placeholder)>,
}

impl<N> Default for PatternBuilder<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<N> PatternBuilder<N> {
    /// Declares placeholder `p` with a label requirement.
    #[must_use]
    pub fn node(mut self, p: u32, spec: impl Into<LabelSpec<N>>) -> Self {
        self.nodes.push((Placeholder::new(p), spec.into()));
        self
    }

    /// Declares placeholder `p` as a wildcard.
    #[must_use]
    pub fn any(mut self, p: u32) -> Self {
        self.nodes.push((Placeholder::new(p), LabelSpec::Any));
        self
    }

    /// Requires an edge `src -> dst`.
    #[must_use]
    pub fn edge(mut self, src: u32, dst: u32) -> Self {
        self.edges
            .push((Placeholder::new(src), Placeholder::new(dst)));
        self
    }

    /// Validates and builds the pattern.
    pub fn build(self) -> Result<Pattern<N>, PatternError> {
        Pattern::new(self.nodes, self.edges)
    }
}
