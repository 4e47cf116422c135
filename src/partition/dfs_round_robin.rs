// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! DFSRoundRobin partitioner (C8, §4.4, default strategy).
//!
//! **Decision (§9 Open Question, DESIGN.md)**: this implements the spec's
//! literal rotating-offset reading (`partitions[offset mod len(partitions)]`,
//! a fresh partition picked each step) rather than the simpler
//! first-available behavior actually present in
//! `original_source/.../data_mapper/partitioner.py::round_robin_partition`
//! (`available_partitions[0]`). The spec is explicit, not silent, here.

use crate::errors::CapacityError;
use crate::model::graph::{NodeId, StaticContext};
use crate::model::ttg::TemporalTraceGraph;
use crate::partition::node_distribution::{DpuId, NodeDistribution};
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet, VecDeque};

pub fn partition(
    ctx: &StaticContext,
    ttg: &TemporalTraceGraph,
    starts: &[NodeId],
    dpu_count: u32,
    capacity: u64,
) -> Result<HashMap<NodeId, DpuId>, CapacityError> {
    let mut dist = NodeDistribution::new(dpu_count, capacity);
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut offset: usize = 0;

    for &start in starts {
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        queue.push_back(start);
        while let Some(node_id) = queue.pop_front() {
            if visited.contains(&node_id) {
                continue;
            }
            visited.insert(node_id);
            assign_round_robin(ctx, &mut dist, node_id, &mut offset)?;

            for edge in ttg.edges_from(node_id, true) {
                if !visited.contains(&edge.target) {
                    queue.push_back(edge.target);
                }
            }
        }
    }

    // Unvisited nodes (never touched by the TTG walk) get a random available partition.
    let mut rng = rand::thread_rng();
    for node in ctx.nodes() {
        if dist.is_assigned(node.id) {
            continue;
        }
        let available = dist.available_partitions(node.size());
        let dpu = *available.choose(&mut rng).ok_or(CapacityError::NoCapacity {
            node_id: node.id,
            needed: node.size(),
            dpu_count: dpu_count as usize,
        })?;
        dist.add_node(node.id, dpu, node.size())?;
    }

    Ok(dist.into_assignment())
}

fn assign_round_robin(
    ctx: &StaticContext,
    dist: &mut NodeDistribution,
    node_id: NodeId,
    offset: &mut usize,
) -> Result<(), CapacityError> {
    let node = ctx.node(node_id).ok_or(CapacityError::NoCapacity {
        node_id,
        needed: 0,
        dpu_count: 0,
    })?;
    let available = dist.available_partitions(node.size());
    if available.is_empty() {
        return Err(CapacityError::NoCapacity {
            node_id,
            needed: node.size(),
            dpu_count: 0,
        });
    }
    let dpu = available[*offset % available.len()];
    *offset += 1;
    dist.add_node(node_id, dpu, node.size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::NodeArchetype;

    #[test]
    fn s3_capacity_exact_partition() {
        let mut ctx = StaticContext::new();
        for i in 0..4 {
            ctx.add_node(NodeArchetype::new(i, "A", vec![0; 128]));
        }
        let ttg = TemporalTraceGraph::new();
        let result = partition(&ctx, &ttg, &[0, 1, 2, 3], 2, 256).unwrap();
        assert_eq!(result.len(), 4);

        let mut per_dpu = [0u64; 2];
        for (_, dpu) in &result {
            per_dpu[*dpu as usize] += 128;
        }
        assert_eq!(per_dpu[0], 256);
        assert_eq!(per_dpu[1], 256);
    }

    #[test]
    fn s3_fifth_node_triggers_capacity_error() {
        let mut ctx = StaticContext::new();
        for i in 0..5 {
            ctx.add_node(NodeArchetype::new(i, "A", vec![0; 128]));
        }
        let ttg = TemporalTraceGraph::new();
        let err = partition(&ctx, &ttg, &[0, 1, 2, 3, 4], 2, 256).unwrap_err();
        assert!(matches!(err, CapacityError::NoCapacity { .. }));
    }
}
