// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! TTGCondenser (C7, §4.3), a BFS fold of a TTT into a [`TemporalTraceGraph`],
//! grounded in shape on the teacher's `engine::level_by_level`
//! BFS-with-counter leveling (`compute_topological_levels`), here carrying a
//! monotonic `step` timestamp instead of a level number.

use crate::model::ttg::{TemporalTraceGraph, TtgEdge};
use crate::model::ttt::TemporalTraceTree;
use crate::observability::messages::analysis::TtgCondensed;
use crate::observability::messages::StructuredLog;
use std::collections::VecDeque;

/// Condense a TTT into its TTG by walking parent/child pairs breadth-first
/// and emitting one labeled edge per pair with a non-null id on both ends.
pub fn condense(tree: &TemporalTraceTree) -> TemporalTraceGraph {
    let mut ttg = TemporalTraceGraph::new();
    if tree.is_empty() {
        return ttg;
    }

    let root = tree.root();
    if let Some(root_id) = tree.get(root).idx {
        ttg.add_node(root_id);
    }

    // (ttt_node_idx, step)
    let mut queue: VecDeque<(usize, u64)> = VecDeque::new();
    queue.push_back((root, 0));
    let mut edge_count = 0usize;

    while let Some((idx, step)) = queue.pop_front() {
        let node = tree.get(idx);
        let parent_id = match node.idx {
            Some(id) => id,
            None => continue, // terminal nodes contribute no edges
        };

        for &child_idx in &node.conditional_children {
            if emit_edge(tree, &mut ttg, parent_id, child_idx, false, step, &mut queue) {
                edge_count += 1;
            }
        }
        for &child_idx in &node.parallel_children {
            if emit_edge(tree, &mut ttg, parent_id, child_idx, true, step, &mut queue) {
                edge_count += 1;
            }
        }
    }

    TtgCondensed {
        node_count: ttg.node_count(),
        edge_count,
    }
    .log();

    ttg
}

fn emit_edge(
    tree: &TemporalTraceTree,
    ttg: &mut TemporalTraceGraph,
    parent_id: crate::model::graph::NodeId,
    child_idx: usize,
    is_parallel: bool,
    step: u64,
    queue: &mut VecDeque<(usize, u64)>,
) -> bool {
    let child = tree.get(child_idx);
    let emitted = if let Some(child_id) = child.idx {
        ttg.add_edge(
            parent_id,
            TtgEdge {
                target: child_id,
                is_parallel,
                timestamp: step,
            },
        );
        true
    } else {
        false
    };
    queue.push_back((child_idx, step + 1));
    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ttt::TemporalTraceTreeNode;

    #[test]
    fn condenses_linear_chain() {
        let (mut tree, root) = TemporalTraceTree::with_root(0);
        let child = tree.add_conditional_child(root, TemporalTraceTreeNode::new(Some(1)));
        tree.add_conditional_child(child, TemporalTraceTreeNode::new(None));

        let ttg = condense(&tree);
        assert_eq!(ttg.node_count(), 2);
        let edges = ttg.edges_from(0, false);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].target, 1);
        assert!(!edges[0].is_parallel);
    }

    #[test]
    fn terminal_node_contributes_no_edges() {
        let (mut tree, root) = TemporalTraceTree::with_root(0);
        tree.add_conditional_child(root, TemporalTraceTreeNode::new(None));
        let ttg = condense(&tree);
        assert_eq!(ttg.edges_from(0, false).len(), 0);
    }
}
