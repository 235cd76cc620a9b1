use dracula_common::{Binding, NodeIdx, Placeholder};
use dracula_graph::LabeledGraph;
use tracing::trace;

use crate::candidates::CandidateSets;
use crate::constraints::{Constraint, ConnectivityConstraint, NotAlreadyMappedConstraint};
use crate::matcher::SubgraphMatcher;
use crate::state::State;
use crate::Pattern;

/// One level of the backtracking stack.
#[derive(Clone, Copy, Debug)]
struct Frame {
    placeholder: Placeholder,
    /// Position of the next untried candidate.
    cursor: usize,
}

impl Frame {
    const fn new(placeholder: Placeholder) -> Self {
        Self {
            placeholder,
            cursor: 0,
        }
    }
}

/// Enumerates every binding of `pattern` into `graph` over the given
/// candidate sets, visiting placeholders in increasing order.
pub(crate) fn backtrack<N: PartialEq, E>(
    pattern: &Pattern<N>,
    graph: &LabeledGraph<N, E>,
    candidates: &CandidateSets,
) -> Vec<Binding> {
    let count = pattern.placeholder_count();
    let mut out = Vec::new();
    let mut st = State::new(count);

    if count == 0 {
        // The empty pattern is realised exactly once, by the empty binding.
        out.push(st.binding().clone());
        return out;
    }

    let mut stack: Vec<Frame> = Vec::with_capacity(count);
    stack.push(Frame::new(Placeholder::new(0)));

    while let Some(frame) = stack.last_mut() {
        let p = frame.placeholder;
        if let Some(previous) = st.mapped_to(p) {
            st.unmap(p, previous);
        }

        let Some(chosen) = next_candidate(frame, pattern, graph, candidates.of(p), &st) else {
            stack.pop();
            continue;
        };

        st.map(p, chosen);
        if !st.done() {
            stack.push(Frame::new(Placeholder::new(p.raw() + 1)));
            continue;
        }

        if SubgraphMatcher::verify(pattern, graph, st.binding()) {
            trace!("Found match {}", st.binding());
            out.push(st.binding().clone());
        }
    }

    out
}

/// Advances `frame` past the next admissible candidate and returns it.
fn next_candidate<N, E>(
    frame: &mut Frame,
    pattern: &Pattern<N>,
    graph: &LabeledGraph<N, E>,
    candidates: &[NodeIdx],
    st: &State,
) -> Option<NodeIdx> {
    let already_mapped = NotAlreadyMappedConstraint::new(st);
    let connectivity = ConnectivityConstraint::new(
        graph,
        st.binding(),
        frame.placeholder,
        pattern.closing_edges(frame.placeholder),
    );

    while let Some(&d) = candidates.get(frame.cursor) {
        frame.cursor += 1;
        if already_mapped.candidate_is_valid(d) && connectivity.candidate_is_valid(d) {
            return Some(d);
        }
    }
    None
}
