use std::fmt;

use dracula_common::{Binding, NodeIdx, Placeholder};
use dracula_graph::LabeledGraph;
use tracing::trace;

use crate::ActionError;

/// One edit of a rewrite rule, expressed in terms of placeholders.
///
/// Placeholders are resolved through the binding of the match being
/// rewritten. `AddNode` extends that binding, so later actions of the same
/// rule can refer to the node it created.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RewriteAction<N> {
    /// Adds a node with the given label and binds it to a fresh placeholder.
    AddNode(Placeholder, N),
    /// Connects two bound nodes with a default edge label.
    AddEdge(Placeholder, Placeholder),
    /// Removes a bound node and every edge touching it.
    RemoveNode(Placeholder),
    /// Removes the edge between two bound nodes.
    RemoveEdge(Placeholder, Placeholder),
    /// Replaces the label of a bound node.
    ChangeLabel(Placeholder, N),
}

impl<N> RewriteAction<N> {
    /// Placeholders the action resolves through the binding.
    pub fn reads(&self) -> Vec<Placeholder> {
        match self {
            Self::AddNode(..) => Vec::new(),
            Self::AddEdge(s, t) | Self::RemoveEdge(s, t) => vec![*s, *t],
            Self::RemoveNode(p) | Self::ChangeLabel(p, _) => vec![*p],
        }
    }

    /// The placeholder the action binds, if any.
    pub const fn defines(&self) -> Option<Placeholder> {
        match self {
            Self::AddNode(p, _) => Some(*p),
            _ => None,
        }
    }

    /// The placeholder whose node the action deletes, if any.
    pub const fn removes(&self) -> Option<Placeholder> {
        match self {
            Self::RemoveNode(p) => Some(*p),
            _ => None,
        }
    }

    /// Short name of the action kind, for logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddNode(..) => "AddNode",
            Self::AddEdge(..) => "AddEdge",
            Self::RemoveNode(..) => "RemoveNode",
            Self::RemoveEdge(..) => "RemoveEdge",
            Self::ChangeLabel(..) => "ChangeLabel",
        }
    }
}

fn resolve(binding: &Binding, placeholder: Placeholder) -> Result<NodeIdx, ActionError> {
    binding
        .get(placeholder)
        .ok_or(ActionError::UnboundPlaceholder(placeholder))
}

impl<N: Clone> RewriteAction<N> {
    /// Runs the action against `graph`, resolving placeholders via `binding`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::UnboundPlaceholder`] when a read placeholder is
    /// missing from the binding, [`ActionError::AlreadyBoundPlaceholder`] when
    /// `AddNode` targets a bound placeholder, and [`ActionError::Graph`] when
    /// the graph rejects the edit. On error neither the graph nor the binding
    /// is modified.
    pub fn apply<E: Default>(
        &self,
        graph: &mut LabeledGraph<N, E>,
        binding: &mut Binding,
    ) -> Result<(), ActionError> {
        match self {
            Self::AddNode(p, label) => {
                if let Some(node) = binding.get(*p) {
                    return Err(ActionError::AlreadyBoundPlaceholder {
                        placeholder: *p,
                        node,
                    });
                }
                let node = graph.add_node(label.clone())?;
                binding.bind(*p, node);
                trace!("AddNode bound {} to new node {}", p, node);
            }
            Self::AddEdge(s, t) => {
                let (src, dst) = (resolve(binding, *s)?, resolve(binding, *t)?);
                graph.link(src, dst, E::default())?;
                trace!("AddEdge {} -> {}", src, dst);
            }
            Self::RemoveNode(p) => {
                let node = resolve(binding, *p)?;
                graph.remove_node(node)?;
                trace!("RemoveNode {}", node);
            }
            Self::RemoveEdge(s, t) => {
                let (src, dst) = (resolve(binding, *s)?, resolve(binding, *t)?);
                graph.unlink(src, dst)?;
                trace!("RemoveEdge {} -> {}", src, dst);
            }
            Self::ChangeLabel(p, label) => {
                let node = resolve(binding, *p)?;
                graph.change_label(node, label.clone())?;
                trace!("ChangeLabel {}", node);
            }
        }
        Ok(())
    }
}

impl<N: fmt::Debug> fmt::Display for RewriteAction<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddNode(p, label) => write!(f, "AddNode({p}, {label:?})"),
            Self::AddEdge(s, t) => write!(f, "AddEdge({s}, {t})"),
            Self::RemoveNode(p) => write!(f, "RemoveNode({p})"),
            Self::RemoveEdge(s, t) => write!(f, "RemoveEdge({s}, {t})"),
            Self::ChangeLabel(p, label) => write!(f, "ChangeLabel({p}, {label:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use dracula_graph::{GraphError, StandardGraph};

    use super::*;

    fn p(i: u32) -> Placeholder {
        Placeholder::new(i)
    }

    fn two_nodes() -> (StandardGraph<char>, Binding) {
        let mut graph = StandardGraph::new();
        let a = graph.add_node('a').unwrap();
        let b = graph.add_node('b').unwrap();
        graph.link(a, b, ()).unwrap();
        (graph, Binding::from_pairs([(0, 0), (1, 1)]))
    }

    #[test]
    fn add_node_extends_the_binding() {
        let (mut graph, mut binding) = two_nodes();
        RewriteAction::AddNode(p(2), 'c')
            .apply(&mut graph, &mut binding)
            .unwrap();

        let node = binding.get(p(2)).unwrap();
        assert_eq!(node, NodeIdx::new(2));
        assert_eq!(graph.label(node), Some(&'c'));
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn add_node_rejects_bound_placeholder() {
        let (mut graph, mut binding) = two_nodes();
        let err = RewriteAction::AddNode(p(1), 'c')
            .apply(&mut graph, &mut binding)
            .unwrap_err();

        assert_eq!(
            err,
            ActionError::AlreadyBoundPlaceholder {
                placeholder: p(1),
                node: NodeIdx::new(1),
            }
        );
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.allocated(), 2);
    }

    #[test]
    fn add_edge_uses_default_label() {
        let mut graph: dracula_graph::LabeledGraph<char, u8> = dracula_graph::LabeledGraph::new();
        graph.add_node('a').unwrap();
        graph.add_node('b').unwrap();
        let mut binding = Binding::from_pairs([(0, 1), (1, 0)]);

        RewriteAction::AddEdge(p(0), p(1))
            .apply(&mut graph, &mut binding)
            .unwrap();
        assert_eq!(graph.edge(NodeIdx::new(1), NodeIdx::new(0)), Some(&0));
    }

    #[test]
    fn duplicate_edge_is_a_graph_error() {
        let (mut graph, mut binding) = two_nodes();
        let err = RewriteAction::AddEdge(p(0), p(1))
            .apply(&mut graph, &mut binding)
            .unwrap_err();
        assert!(matches!(
            err,
            ActionError::Graph(GraphError::DuplicateEdge { .. })
        ));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn remove_edge_then_remove_again_fails() {
        let (mut graph, mut binding) = two_nodes();
        let action = RewriteAction::<char>::RemoveEdge(p(0), p(1));
        action.apply(&mut graph, &mut binding).unwrap();
        assert_eq!(graph.edge_count(), 0);

        let err = action.apply(&mut graph, &mut binding).unwrap_err();
        assert!(matches!(
            err,
            ActionError::Graph(GraphError::MissingEdge { .. })
        ));
    }

    #[test]
    fn remove_node_keeps_binding_entry() {
        let (mut graph, mut binding) = two_nodes();
        RewriteAction::<char>::RemoveNode(p(0))
            .apply(&mut graph, &mut binding)
            .unwrap();

        assert!(!graph.is_live(NodeIdx::new(0)));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(binding.get(p(0)), Some(NodeIdx::new(0)));

        let err = RewriteAction::ChangeLabel(p(0), 'z')
            .apply(&mut graph, &mut binding)
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::Graph(GraphError::InvalidNodeIndex(NodeIdx::new(0)))
        );
    }

    #[test]
    fn change_label_replaces_label() {
        let (mut graph, mut binding) = two_nodes();
        RewriteAction::ChangeLabel(p(1), 'q')
            .apply(&mut graph, &mut binding)
            .unwrap();
        assert_eq!(graph.label(NodeIdx::new(1)), Some(&'q'));
    }

    #[test]
    fn unbound_reads_fail_without_side_effects() {
        let (mut graph, mut binding) = two_nodes();
        for action in [
            RewriteAction::AddEdge(p(0), p(7)),
            RewriteAction::RemoveEdge(p(7), p(1)),
            RewriteAction::RemoveNode(p(7)),
            RewriteAction::ChangeLabel(p(7), 'x'),
        ] {
            let err = action.apply(&mut graph, &mut binding).unwrap_err();
            assert_eq!(err, ActionError::UnboundPlaceholder(p(7)), "{action}");
        }
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(binding.len(), 2);
    }

    #[test]
    fn reads_and_defines() {
        let add = RewriteAction::AddNode(p(3), 'k');
        assert!(add.reads().is_empty());
        assert_eq!(add.defines(), Some(p(3)));
        assert_eq!(add.removes(), None);

        let edge = RewriteAction::<char>::AddEdge(p(1), p(3));
        assert_eq!(edge.reads(), vec![p(1), p(3)]);
        assert_eq!(edge.defines(), None);

        assert_eq!(RewriteAction::<char>::RemoveNode(p(2)).removes(), Some(p(2)));
    }

    #[test]
    fn display() {
        assert_eq!(RewriteAction::AddNode(p(3), 'k').to_string(), "AddNode(#3, 'k')");
        assert_eq!(
            RewriteAction::<char>::RemoveEdge(p(0), p(1)).to_string(),
            "RemoveEdge(#0, #1)"
        );
    }
}
