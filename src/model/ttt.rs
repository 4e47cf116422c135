// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Temporal Trace Tree (TTT) arena (C6, §3), grounded on
//! `original_source/.../jacpim_mapping_analysis/temporal_trace_graph.py`'s
//! `TemporalTraceTreeNode` / `WalkerState`.
//!
//! Per §9's design note ("TTT nodes form a shared-child DAG in condensed
//! form"), this is an owned arena of indexed tree nodes rather than
//! reference-counted/cyclic tree links: each node's children are indices
//! into the same `Vec`, never pointers.

use crate::model::graph::NodeId;

/// Index of a [`TemporalTraceTreeNode`] within its owning arena (a `Vec`).
pub type TttNodeIdx = usize;

/// One node of the TTT. `idx = None` marks a path terminus (the `end` marker, §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalTraceTreeNode {
    pub idx: Option<NodeId>,
    pub conditional_children: Vec<TttNodeIdx>,
    pub parallel_children: Vec<TttNodeIdx>,
}

impl TemporalTraceTreeNode {
    pub fn new(idx: Option<NodeId>) -> Self {
        Self {
            idx,
            conditional_children: Vec::new(),
            parallel_children: Vec::new(),
        }
    }

    pub fn is_terminus(&self) -> bool {
        self.idx.is_none()
    }
}

/// An owned arena of [`TemporalTraceTreeNode`]s, rooted at index `0`.
///
/// Invariant (§3): the root has a non-null `idx`.
#[derive(Debug, Clone, Default)]
pub struct TemporalTraceTree {
    nodes: Vec<TemporalTraceTreeNode>,
}

impl TemporalTraceTree {
    /// Create a new arena with a root node at the given start node id.
    pub fn with_root(start: NodeId) -> (Self, TttNodeIdx) {
        let tree = Self {
            nodes: vec![TemporalTraceTreeNode::new(Some(start))],
        };
        (tree, 0)
    }

    pub fn root(&self) -> TttNodeIdx {
        0
    }

    pub fn get(&self, idx: TttNodeIdx) -> &TemporalTraceTreeNode {
        &self.nodes[idx]
    }

    pub fn push(&mut self, node: TemporalTraceTreeNode) -> TttNodeIdx {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn add_conditional_child(&mut self, parent: TttNodeIdx, child: TemporalTraceTreeNode) -> TttNodeIdx {
        let child_idx = self.push(child);
        self.nodes[parent].conditional_children.push(child_idx);
        child_idx
    }

    pub fn add_parallel_child(&mut self, parent: TttNodeIdx, child: TemporalTraceTreeNode) -> TttNodeIdx {
        let child_idx = self.push(child);
        self.nodes[parent].parallel_children.push(child_idx);
        child_idx
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every root-to-leaf path, as a sequence of node ids, for invariant/test
    /// checking (§8 invariant 6, "every root-to-leaf path ends in `end` or a
    /// terminus with no matching visit sequences").
    pub fn paths(&self) -> Vec<Vec<NodeId>> {
        let mut out = Vec::new();
        self.collect_paths(self.root(), &mut Vec::new(), &mut out);
        out
    }

    fn collect_paths(&self, idx: TttNodeIdx, current: &mut Vec<NodeId>, out: &mut Vec<Vec<NodeId>>) {
        let node = self.get(idx);
        if let Some(id) = node.idx {
            current.push(id);
        }
        if node.conditional_children.is_empty() && node.parallel_children.is_empty() {
            out.push(current.clone());
        } else {
            for &child in node.conditional_children.iter().chain(node.parallel_children.iter()) {
                self.collect_paths(child, current, out);
            }
        }
        if node.idx.is_some() {
            current.pop();
        }
    }
}

/// Symbolic walker state during TTT expansion (§3, §4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkerState {
    /// Pending tail of node ids; `container[0]` is the current location.
    pub container: Vec<NodeId>,
    pub ttt_node: TttNodeIdx,
}

impl WalkerState {
    pub fn location(&self) -> Option<NodeId> {
        self.container.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_non_null_idx() {
        let (tree, root) = TemporalTraceTree::with_root(0);
        assert!(tree.get(root).idx.is_some());
    }

    #[test]
    fn single_terminus_path() {
        let (mut tree, root) = TemporalTraceTree::with_root(0);
        tree.add_conditional_child(root, TemporalTraceTreeNode::new(None));
        let paths = tree.paths();
        assert_eq!(paths, vec![vec![0]]);
    }

    #[test]
    fn conditional_and_parallel_children_both_walked() {
        let (mut tree, root) = TemporalTraceTree::with_root(0);
        tree.add_conditional_child(root, TemporalTraceTreeNode::new(Some(1)));
        tree.add_parallel_child(root, TemporalTraceTreeNode::new(Some(2)));
        let paths = tree.paths();
        assert_eq!(paths.len(), 2);
    }
}
