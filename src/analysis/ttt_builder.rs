// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! TTTBuilder (C6, §4.2), grounded on
//! `original_source/.../jacpim_mapping_analysis/temporal_trace_graph.py`'s
//! `get_access_pattern_single_walker` / `get_new_walker_states` /
//! `exec_sync_visit_sequence`.
//!
//! Per §9's "open question — async visit semantics" decision, async visits
//! always spawn one parallel child per filtered neighbor with
//! `container=[neighbor]`; §9's "insertion index" decision performs batch
//! insertion at `visit.index` (negative-from-end, clamped to 0) rather than
//! the source's plain append.

use crate::analysis::visit_analyzer::VisitAnalysis;
use crate::model::graph::{NodeId, StaticContext};
use crate::model::ttt::{TemporalTraceTree, TemporalTraceTreeNode, WalkerState};
use crate::model::visit::VisitSequence;
use crate::observability::messages::StructuredLog;
use std::collections::VecDeque;

/// Insert `items` into `container` at `index`, with negative indexes
/// counting from the end and clamped to `0` (§4.2, §9).
fn insert_at(container: &mut Vec<NodeId>, index: i64, items: &[NodeId]) {
    let len = container.len() as i64;
    let pos = if index < 0 { len + index } else { index };
    let pos = pos.clamp(0, len) as usize;
    for (offset, item) in items.iter().enumerate() {
        container.insert(pos + offset, *item);
    }
}

fn filter_neighbors(
    ctx: &StaticContext,
    node_id: NodeId,
    edge_type: Option<&str>,
) -> Vec<NodeId> {
    ctx.neighbors(node_id, edge_type)
}

/// Build the Temporal Trace Tree for one walker spawn starting at `start`.
///
/// `visit_sequences` maps node-type -> candidate visit sequences (the
/// output of [`crate::analysis::visit_analyzer::analyze_walker`]).
/// `target_node_count` bounds the number of frontier states processed
/// (§4.2's termination cap, default [`crate::config::consts::DEFAULT_TARGET_NODE_COUNT`]).
pub fn build_ttt(
    ctx: &StaticContext,
    start: NodeId,
    visit_sequences: &VisitAnalysis,
    target_node_count: u64,
) -> TemporalTraceTree {
    let (mut tree, root) = TemporalTraceTree::with_root(start);
    let mut frontier: VecDeque<WalkerState> = VecDeque::new();
    frontier.push_back(WalkerState {
        container: vec![start],
        ttt_node: root,
    });

    let mut processed: u64 = 0;
    while let Some(state) = frontier.pop_front() {
        if processed >= target_node_count {
            crate::observability::messages::analysis::TttExpansionBounded {
                target_node_count,
                nodes_built: tree.len(),
            }
            .log();
            break;
        }
        processed += 1;

        let location = match state.location() {
            Some(id) => id,
            None => continue,
        };
        let node_type = match ctx.node_type(location) {
            Ok(ty) => ty,
            Err(_) => continue,
        };
        let sequences = match visit_sequences.get(node_type) {
            Some(seqs) if !seqs.is_empty() => seqs,
            _ => continue, // no matching visit sequence -> immediate terminus (§4.2)
        };

        for sequence in sequences {
            let new_state = exec_sync_visit_sequence(ctx, &state, sequence, &mut tree);
            if new_state.location().is_some() {
                frontier.push_back(new_state);
            }
            spawn_async_children(ctx, &state, sequence, &mut tree, &mut frontier);
        }
    }

    tree
}

/// Synchronous expansion of one visit sequence (§4.2): fold the sync visits
/// in order, producing one conditional TTT child.
fn exec_sync_visit_sequence(
    ctx: &StaticContext,
    state: &WalkerState,
    sequence: &VisitSequence,
    tree: &mut TemporalTraceTree,
) -> WalkerState {
    let mut new_container = state.container.clone();
    new_container.remove(0); // consume the current location

    for visit in sequence.iter().filter(|v| !v.is_async) {
        let filtered = filter_neighbors(ctx, state.container[0], visit.edge_type.as_deref());
        insert_at(&mut new_container, visit.index, &filtered);
    }

    let new_idx = new_container.first().copied();
    let child = TemporalTraceTreeNode::new(new_idx);
    let child_node_idx = tree.add_conditional_child(state.ttt_node, child);

    WalkerState {
        container: new_container,
        ttt_node: child_node_idx,
    }
}

/// Asynchronous expansion (§4.2): one parallel TTT child per filtered
/// neighbor of an async visit, each spawning its own single-node `WalkerState`.
fn spawn_async_children(
    ctx: &StaticContext,
    state: &WalkerState,
    sequence: &VisitSequence,
    tree: &mut TemporalTraceTree,
    frontier: &mut VecDeque<WalkerState>,
) {
    for visit in sequence.iter().filter(|v| v.is_async) {
        let filtered = filter_neighbors(ctx, state.container[0], visit.edge_type.as_deref());
        for neighbor in filtered {
            let child = TemporalTraceTreeNode::new(Some(neighbor));
            let child_idx = tree.add_parallel_child(state.ttt_node, child);
            frontier.push_back(WalkerState {
                container: vec![neighbor],
                ttt_node: child_idx,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::{EdgeArchetype, NodeArchetype};
    use std::collections::HashMap;

    fn single_node_ctx() -> StaticContext {
        let mut ctx = StaticContext::new();
        ctx.add_node(NodeArchetype::new(0, "A", vec![0; 8]));
        ctx
    }

    fn two_node_ctx() -> StaticContext {
        let mut ctx = StaticContext::new();
        ctx.add_node(NodeArchetype::new(0, "A", vec![0; 8]));
        ctx.add_node(NodeArchetype::new(1, "A", vec![0; 8]));
        ctx.add_edge(EdgeArchetype {
            source: 0,
            target: 1,
            type_name: "e".to_string(),
        });
        ctx
    }

    #[test]
    fn s1_single_node_no_visits_is_one_leaf_end() {
        let ctx = single_node_ctx();
        let tree = build_ttt(&ctx, 0, &HashMap::new(), 100_000);
        let paths = tree.paths();
        assert_eq!(paths, vec![vec![0]]);
    }

    #[test]
    fn s2_two_nodes_one_sync_visit_produces_conditional_child() {
        let ctx = two_node_ctx();
        let mut analysis: VisitAnalysis = HashMap::new();
        analysis.insert(
            "A".to_string(),
            vec![vec![crate::model::visit::VisitInfo {
                from_node_type: "A".to_string(),
                walker_type: "W".to_string(),
                edge_type: None,
                is_async: false,
                index: 0,
            }]],
        );
        let tree = build_ttt(&ctx, 0, &analysis, 100_000);
        let paths = tree.paths();
        assert!(paths.contains(&vec![0, 1]));
    }

    #[test]
    fn insert_at_negative_index_matches_list_insert_semantics() {
        // Python: l=[1,2,3]; l.insert(-1,99) -> [1, 2, 99, 3]
        let mut container = vec![1, 2, 3];
        insert_at(&mut container, -1, &[99]);
        assert_eq!(container, vec![1, 2, 99, 3]);
    }

    #[test]
    fn target_node_count_bounds_expansion() {
        let ctx = two_node_ctx();
        let mut analysis: VisitAnalysis = HashMap::new();
        analysis.insert(
            "A".to_string(),
            vec![vec![crate::model::visit::VisitInfo {
                from_node_type: "A".to_string(),
                walker_type: "W".to_string(),
                edge_type: None,
                is_async: false,
                index: 0,
            }]],
        );
        let tree = build_ttt(&ctx, 0, &analysis, 1);
        // Only the root state is processed; its child is materialized but not expanded further.
        assert!(tree.len() >= 1);
    }
}
