#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

//! Cross-checks the matcher against brute-force enumeration on small graphs.

use std::collections::BTreeSet;

use dracula_graph::{LabeledGraph, NodeIdx, StandardGraph};
use dracula_subgraph::{Binding, LabelSpec, Pattern, Placeholder, SubgraphMatcher, find};
use itertools::Itertools;
use quickcheck::{Arbitrary, Gen, quickcheck};

const MAX_HOST: u32 = 6;
const LABELS: u8 = 3;

#[derive(Clone, Debug)]
struct ArbitraryHost(StandardGraph<u8>);

impl Arbitrary for ArbitraryHost {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = u32::arbitrary(g) % (MAX_HOST + 1);
        let mut graph = LabeledGraph::with_capacity(MAX_HOST as usize);
        for _ in 0..size {
            let _ = graph.add_node(u8::arbitrary(g) % LABELS);
        }
        if size > 0 {
            for _ in 0..u32::arbitrary(g) % (size * size + 1) {
                let src = NodeIdx::new(u32::arbitrary(g) % size);
                let dst = NodeIdx::new(u32::arbitrary(g) % size);
                let _ = graph.link(src, dst, ());
            }
            // Leave some dead slots behind, as rewriting does.
            if bool::arbitrary(g) {
                let _ = graph.remove_node(NodeIdx::new(u32::arbitrary(g) % size));
            }
        }
        Self(graph)
    }
}

#[derive(Clone, Debug)]
struct ArbitraryPattern(Pattern<u8>);

impl Arbitrary for ArbitraryPattern {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = u32::arbitrary(g) % 4;
        let specs: Vec<LabelSpec<u8>> = (0..count)
            .map(|_| match u8::arbitrary(g) % (LABELS + 1) {
                LABELS => LabelSpec::Any,
                label => LabelSpec::Exact(label),
            })
            .collect();
        let mut edges = Vec::new();
        if count > 0 {
            for _ in 0..u32::arbitrary(g) % (count * count + 1) {
                edges.push((u32::arbitrary(g) % count, u32::arbitrary(g) % count));
            }
        }
        Self(Pattern::from_specs(specs, edges).expect("generated pattern is contiguous"))
    }
}

/// Every injective placeholder -> live node map that satisfies the pattern.
fn brute_force(pattern: &Pattern<u8>, graph: &StandardGraph<u8>) -> BTreeSet<Binding> {
    let live: Vec<NodeIdx> = graph.nodes().map(|(idx, _)| idx).collect();
    live.into_iter()
        .permutations(pattern.placeholder_count())
        .map(|nodes| {
            nodes
                .into_iter()
                .enumerate()
                .map(|(p, n)| (Placeholder::new(p as u32), n))
                .collect::<Binding>()
        })
        .filter(|binding| {
            let labels_ok = pattern.nodes().all(|(p, spec)| {
                binding
                    .get(p)
                    .and_then(|n| graph.label(n))
                    .is_some_and(|l| spec.matches(l))
            });
            labels_ok
                && pattern.edges().iter().all(|&(s, t)| {
                    graph.is_connected(binding.get(s).unwrap(), binding.get(t).unwrap())
                })
        })
        .collect()
}

quickcheck! {
    fn prop_find_equals_brute_force(host: ArbitraryHost, pattern: ArbitraryPattern) -> bool {
        find(&pattern.0, &host.0).to_set() == brute_force(&pattern.0, &host.0)
    }

    fn prop_every_match_is_injective_and_connected(host: ArbitraryHost, pattern: ArbitraryPattern) -> bool {
        find(&pattern.0, &host.0).iter().all(|m| {
            m.is_injective()
                && m.len() == pattern.0.placeholder_count()
                && pattern.0.edges().iter().all(|&(s, t)| match (m.get(s), m.get(t)) {
                    (Some(a), Some(b)) => host.0.is_connected(a, b),
                    _ => false,
                })
        })
    }

    fn prop_find_is_idempotent(host: ArbitraryHost, pattern: ArbitraryPattern) -> bool {
        find(&pattern.0, &host.0).to_set() == find(&pattern.0, &host.0).to_set()
    }

    fn prop_matches_verify(host: ArbitraryHost, pattern: ArbitraryPattern) -> bool {
        find(&pattern.0, &host.0)
            .iter()
            .all(|m| SubgraphMatcher::verify(&pattern.0, &host.0, m))
    }

    fn prop_matches_have_no_duplicates(host: ArbitraryHost, pattern: ArbitraryPattern) -> bool {
        let found = find(&pattern.0, &host.0);
        found.to_set().len() == found.len()
    }
}
