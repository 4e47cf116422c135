// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Temporal Trace Graph (TTG) (C7, §3): a labeled directed multigraph on
//! node-ids, derived from a TTT by collapsing shared ids. Generalizes the
//! teacher's `DependencyGraph` forward adjacency map to carry a multi-edge
//! label (`is_parallel`, `timestamp`) per edge instead of a bare successor list.

use crate::model::graph::NodeId;
use std::collections::{HashMap, HashSet};

/// One labeled edge of the TTG (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtgEdge {
    pub target: NodeId,
    pub is_parallel: bool,
    pub timestamp: u64,
}

/// Labeled multigraph on node-ids sharing the original node set (§4.3).
#[derive(Debug, Clone, Default)]
pub struct TemporalTraceGraph {
    nodes: HashSet<NodeId>,
    adjacency: HashMap<NodeId, Vec<TtgEdge>>,
}

impl TemporalTraceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: NodeId) {
        self.nodes.insert(id);
        self.adjacency.entry(id).or_default();
    }

    pub fn add_edge(&mut self, from: NodeId, edge: TtgEdge) {
        self.nodes.insert(from);
        self.nodes.insert(edge.target);
        self.adjacency.entry(from).or_default().push(edge);
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Edges out of `node`, optionally restricted to non-parallel edges
    /// (the partitioner's DFS restriction, §4.4).
    pub fn edges_from(&self, node: NodeId, non_parallel_only: bool) -> Vec<&TtgEdge> {
        self.adjacency
            .get(&node)
            .into_iter()
            .flatten()
            .filter(|e| !non_parallel_only || !e.is_parallel)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_parallel_filter_excludes_parallel_edges() {
        let mut ttg = TemporalTraceGraph::new();
        ttg.add_edge(
            0,
            TtgEdge {
                target: 1,
                is_parallel: false,
                timestamp: 0,
            },
        );
        ttg.add_edge(
            0,
            TtgEdge {
                target: 2,
                is_parallel: true,
                timestamp: 0,
            },
        );
        assert_eq!(ttg.edges_from(0, false).len(), 2);
        assert_eq!(ttg.edges_from(0, true).len(), 1);
    }
}
