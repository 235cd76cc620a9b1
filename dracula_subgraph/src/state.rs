use contracts::*;
use dracula_common::{Binding, NodeIdx, Placeholder};

/// Mutable search state: the partial binding under construction.
pub(crate) struct State {
    binding: Binding,
    target_placeholder_count: usize,
}

impl State {
    pub(crate) fn new(target_placeholder_count: usize) -> Self {
        Self {
            binding: Binding::new(),
            target_placeholder_count,
        }
    }

    pub(crate) fn is_mapped(&self, p: Placeholder) -> bool {
        self.binding.contains(p)
    }

    pub(crate) fn mapped_to(&self, p: Placeholder) -> Option<NodeIdx> {
        self.binding.get(p)
    }

    pub(crate) fn is_used(&self, d: NodeIdx) -> bool {
        !self.binding.node_is_free(d)
    }

    #[debug_requires(!self.is_mapped(p))]
    #[debug_requires(!self.is_used(d))]
    #[debug_ensures(self.is_mapped(p) && self.is_used(d))]
    pub(crate) fn map(&mut self, p: Placeholder, d: NodeIdx) {
        self.binding.bind(p, d);
    }

    #[debug_requires(self.mapped_to(p) == Some(d))]
    #[debug_ensures(!self.is_mapped(p) && !self.is_used(d))]
    pub(crate) fn unmap(&mut self, p: Placeholder, d: NodeIdx) {
        self.binding.unbind(p);
    }

    pub(crate) fn done(&self) -> bool {
        self.binding.len() == self.target_placeholder_count
    }

    pub(crate) const fn binding(&self) -> &Binding {
        &self.binding
    }
}
