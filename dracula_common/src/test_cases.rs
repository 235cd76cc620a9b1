//! Common test cases and definitions for the dracula workspace.
//!
//! Test cases are plain data: host node labels and edges, a pattern's
//! placeholder specs and edges, and the number of matches the matcher must
//! report. Crates further up the stack turn them into graphs and patterns.

use crate::LabelSpec;

/// Node alphabet of the dungeon-generation grammar used throughout the tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DungeonNode {
    /// Dungeon entry point.
    Start,
    /// Corridor leading towards the goal.
    Entrance,
    /// A task the player must complete.
    Task,
    /// A partially refined task.
    TaskProgress,
    /// The final room.
    Goal,
    /// A locked door.
    Lock,
    /// A key opening some lock.
    Key,
}

impl DungeonNode {
    /// Every label, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Start,
        Self::Entrance,
        Self::Task,
        Self::TaskProgress,
        Self::Goal,
        Self::Lock,
        Self::Key,
    ];
}

/// A complete test case definition.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// The name of the test case.
    pub name: &'static str,
    /// Host node labels; node `i` gets index `i`.
    pub host_nodes: &'static [DungeonNode],
    /// Host edges as `(source, target)` node indices.
    pub host_edges: &'static [(u32, u32)],
    /// Placeholder specs; placeholder `i` gets spec `i`.
    pub pattern_nodes: &'static [LabelSpec<DungeonNode>],
    /// Required edges as `(source, target)` placeholders.
    pub pattern_edges: &'static [(u32, u32)],
    /// The expected number of matches.
    pub expected_matches: usize,
}

use DungeonNode::*;
use LabelSpec::{Any, Exact};

/*
    Start n0 ------> Entrance n1 -----> Goal n2
     | |                                  ^
     | |                                  |
     | \----> TaskProgress n3 ------------/
     |                ^
     v                |
     TaskProgress n4 --/
*/
/// Host labels of the reference dungeon.
pub const DUNGEON_NODES: &[DungeonNode] = &[Start, Entrance, Goal, TaskProgress, TaskProgress];
/// Host edges of the reference dungeon.
pub const DUNGEON_EDGES: &[(u32, u32)] = &[(0, 1), (0, 3), (0, 4), (1, 2), (3, 2), (4, 3)];

// #####################
// TEST CASES
// #####################
/// Matcher cases over the reference dungeon.
pub const BASIC_TEST_CASES: &[TestCase] = &[
    TestCase {
        name: "task_progress_chain",
        host_nodes: DUNGEON_NODES,
        host_edges: DUNGEON_EDGES,
        pattern_nodes: &[Any, Exact(TaskProgress), Any],
        pattern_edges: &[(0, 1), (1, 2)],
        expected_matches: 3,
    },
    TestCase {
        name: "single_wildcard",
        host_nodes: DUNGEON_NODES,
        host_edges: DUNGEON_EDGES,
        pattern_nodes: &[Any],
        pattern_edges: &[],
        expected_matches: 5,
    },
    TestCase {
        name: "start_fanout",
        host_nodes: DUNGEON_NODES,
        host_edges: DUNGEON_EDGES,
        pattern_nodes: &[Exact(Start), Exact(TaskProgress)],
        pattern_edges: &[(0, 1)],
        expected_matches: 2,
    },
    TestCase {
        name: "goal_fanin",
        host_nodes: DUNGEON_NODES,
        host_edges: DUNGEON_EDGES,
        pattern_nodes: &[Any, Exact(Goal)],
        pattern_edges: &[(0, 1)],
        expected_matches: 2,
    },
    TestCase {
        name: "any_edge",
        host_nodes: DUNGEON_NODES,
        host_edges: DUNGEON_EDGES,
        pattern_nodes: &[Any, Any],
        pattern_edges: &[(0, 1)],
        expected_matches: 6,
    },
    TestCase {
        name: "transitive_triangle",
        host_nodes: DUNGEON_NODES,
        host_edges: DUNGEON_EDGES,
        pattern_nodes: &[Any, Any, Any],
        pattern_edges: &[(0, 1), (1, 2), (0, 2)],
        expected_matches: 1,
    },
    TestCase {
        name: "absent_label",
        host_nodes: DUNGEON_NODES,
        host_edges: DUNGEON_EDGES,
        pattern_nodes: &[Exact(Lock)],
        pattern_edges: &[],
        expected_matches: 0,
    },
    TestCase {
        name: "two_cycle",
        host_nodes: DUNGEON_NODES,
        host_edges: DUNGEON_EDGES,
        pattern_nodes: &[Any, Any],
        pattern_edges: &[(0, 1), (1, 0)],
        expected_matches: 0,
    },
    TestCase {
        name: "disconnected_pair",
        host_nodes: DUNGEON_NODES,
        host_edges: DUNGEON_EDGES,
        pattern_nodes: &[Exact(TaskProgress), Exact(TaskProgress)],
        pattern_edges: &[],
        expected_matches: 2,
    },
    TestCase {
        name: "self_loop_absent",
        host_nodes: DUNGEON_NODES,
        host_edges: DUNGEON_EDGES,
        pattern_nodes: &[Any],
        pattern_edges: &[(0, 0)],
        expected_matches: 0,
    },
    TestCase {
        name: "empty_pattern",
        host_nodes: DUNGEON_NODES,
        host_edges: DUNGEON_EDGES,
        pattern_nodes: &[],
        pattern_edges: &[],
        expected_matches: 1,
    },
    TestCase {
        name: "empty_host",
        host_nodes: &[],
        host_edges: &[],
        pattern_nodes: &[Any],
        pattern_edges: &[],
        expected_matches: 0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_names_are_unique() {
        let mut names: Vec<_> = BASIC_TEST_CASES.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BASIC_TEST_CASES.len());
    }

    #[test]
    fn case_edges_reference_declared_nodes() {
        for case in BASIC_TEST_CASES {
            let hosts = case.host_nodes.len() as u32;
            assert!(
                case.host_edges.iter().all(|&(s, t)| s < hosts && t < hosts),
                "host edge out of range in {}",
                case.name
            );
            let placeholders = case.pattern_nodes.len() as u32;
            assert!(
                case.pattern_edges
                    .iter()
                    .all(|&(s, t)| s < placeholders && t < placeholders),
                "pattern edge out of range in {}",
                case.name
            );
        }
    }
}
