// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! `StaticContext` (C4): the canonical indexed node/edge store and its
//! adjacency view, generalizing the teacher's `DependencyGraph` forward
//! adjacency map (`config::dependency_graph`) from a string-keyed DAG to a
//! typed, multi-edge property graph.

use crate::errors::LookupError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable node identity. Dense and zero-based by loader convention, but the
/// store does not require density.
pub type NodeId = u64;

/// A domain node: a type name, a stable identity, and an opaque payload (§3).
///
/// Invariant: `type_name` is non-empty. Created externally by the
/// `GraphInstance` collaborator and immutable for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeArchetype {
    pub id: NodeId,
    pub type_name: String,
    pub payload: Vec<u8>,
}

impl NodeArchetype {
    pub fn new(id: NodeId, type_name: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            payload,
        }
    }

    /// Size in bytes of this node's byte stream, deterministic from the payload (§3).
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }
}

/// A typed directed edge between two nodes (§3).
///
/// Invariants: `source`/`target` must be valid node ids in the owning
/// `StaticContext`; self-reference is permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeArchetype {
    pub source: NodeId,
    pub target: NodeId,
    pub type_name: String,
}

/// Canonical indexed list of all nodes/edges, with adjacency exposed as a
/// labeled directed multigraph (C4).
///
/// Internally a forward adjacency map `node -> [(neighbor, edge_type)]`,
/// mirroring the teacher's `DependencyGraph(HashMap<String, Vec<String>>)`
/// but carrying the edge's type name alongside each target.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    nodes: HashMap<NodeId, NodeArchetype>,
    edges: Vec<EdgeArchetype>,
    adjacency: HashMap<NodeId, Vec<(NodeId, String)>>,
}

impl StaticContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: NodeArchetype) {
        self.adjacency.entry(node.id).or_default();
        self.nodes.insert(node.id, node);
    }

    pub fn add_edge(&mut self, edge: EdgeArchetype) {
        self.adjacency
            .entry(edge.source)
            .or_default()
            .push((edge.target, edge.type_name.clone()));
        self.edges.push(edge);
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeArchetype> {
        self.nodes.get(&id)
    }

    pub fn node_type(&self, id: NodeId) -> Result<&str, LookupError> {
        self.nodes
            .get(&id)
            .map(|n| n.type_name.as_str())
            .ok_or(LookupError::UnknownNodeId(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeArchetype> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeArchetype> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Neighbors of `node_id` reachable by an edge whose type name matches
    /// `edge_type` (`None` matches every edge type), in adjacency-insertion
    /// order (§4.2's filtered-neighbor computation).
    pub fn neighbors(&self, node_id: NodeId, edge_type: Option<&str>) -> Vec<NodeId> {
        self.adjacency
            .get(&node_id)
            .into_iter()
            .flatten()
            .filter(|(_, ty)| edge_type.map_or(true, |want| want == ty))
            .map(|(target, _)| *target)
            .collect()
    }
}

/// On-disk form of a `StaticContext`: a flat node/edge list, the shape a
/// graph-loader collaborator would hand the pipeline (§3). Deserialized with
/// serde, the way the teacher's config layer deserializes its processor list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphInstance {
    pub nodes: Vec<NodeArchetype>,
    pub edges: Vec<EdgeArchetype>,
}

impl GraphInstance {
    pub fn into_context(self) -> StaticContext {
        let mut ctx = StaticContext::new();
        for node in self.nodes {
            ctx.add_node(node);
        }
        for edge in self.edges {
            ctx.add_edge(edge);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> StaticContext {
        let mut ctx = StaticContext::new();
        ctx.add_node(NodeArchetype::new(0, "A", vec![0; 8]));
        ctx.add_node(NodeArchetype::new(1, "A", vec![0; 8]));
        ctx.add_node(NodeArchetype::new(2, "B", vec![0; 8]));
        ctx.add_edge(EdgeArchetype {
            source: 0,
            target: 1,
            type_name: "likes".to_string(),
        });
        ctx.add_edge(EdgeArchetype {
            source: 0,
            target: 2,
            type_name: "knows".to_string(),
        });
        ctx
    }

    #[test]
    fn neighbors_unfiltered_returns_all() {
        let ctx = ctx();
        let mut n = ctx.neighbors(0, None);
        n.sort();
        assert_eq!(n, vec![1, 2]);
    }

    #[test]
    fn neighbors_filtered_by_edge_type() {
        let ctx = ctx();
        assert_eq!(ctx.neighbors(0, Some("likes")), vec![1]);
        assert_eq!(ctx.neighbors(0, Some("unknown_type")), Vec::<NodeId>::new());
    }

    #[test]
    fn node_type_lookup_fails_on_unknown_id() {
        let ctx = ctx();
        assert!(matches!(
            ctx.node_type(999),
            Err(LookupError::UnknownNodeId(999))
        ));
    }

    #[test]
    fn node_size_is_payload_length() {
        let node = NodeArchetype::new(0, "A", vec![0; 16]);
        assert_eq!(node.size(), 16);
    }
}
