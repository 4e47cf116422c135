// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Fennel streaming partitioner (§4.4), grounded on
//! `original_source/.../data_mapper/partitioner.py::fennel_partition`.

use crate::config::consts::{FENNEL_BETA, FENNEL_LAMBDA};
use crate::errors::CapacityError;
use crate::model::graph::{NodeId, StaticContext};
use crate::partition::node_distribution::{DpuId, NodeDistribution};
use rand::seq::SliceRandom;
use std::collections::HashMap;

pub fn partition(
    ctx: &StaticContext,
    dpu_count: u32,
    capacity: u64,
) -> Result<HashMap<NodeId, DpuId>, CapacityError> {
    let n = ctx.node_count() as f64;
    let alpha = n / (dpu_count as f64).powf(FENNEL_BETA);

    let mut dist = NodeDistribution::new(dpu_count, capacity);

    let mut nodes: Vec<NodeId> = ctx.nodes().map(|n| n.id).collect();
    nodes.shuffle(&mut rand::thread_rng()); // random streaming order

    for node_id in nodes {
        let node = ctx.node(node_id).expect("node id came from this context");

        let mut neighbor_counts = vec![0u64; dpu_count as usize];
        for neighbor in ctx.neighbors(node_id, None) {
            if let Some(&assigned) = dist.assignment().get(&neighbor) {
                neighbor_counts[assigned as usize] += 1;
            }
        }

        let occupancy = dist.occupancy();
        let mut best: Option<(DpuId, f64)> = None;
        for dpu in 0..dpu_count {
            if occupancy[dpu as usize] + node.size() > capacity {
                continue; // score is effectively +infinity
            }
            let score = -FENNEL_LAMBDA * neighbor_counts[dpu as usize] as f64
                + alpha * (occupancy[dpu as usize] as f64).powf(FENNEL_BETA);
            if best.is_none() || score < best.unwrap().1 {
                best = Some((dpu, score));
            }
        }

        let (chosen, _) = best.ok_or(CapacityError::NoCapacity {
            node_id,
            needed: node.size(),
            dpu_count: dpu_count as usize,
        })?;
        dist.add_node(node_id, chosen, node.size())?;
    }

    Ok(dist.into_assignment())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::NodeArchetype;

    #[test]
    fn every_node_gets_assigned_under_capacity() {
        let mut ctx = StaticContext::new();
        for i in 0..6 {
            ctx.add_node(NodeArchetype::new(i, "A", vec![0; 8]));
        }
        let result = partition(&ctx, 2, 1024).unwrap();
        assert_eq!(result.len(), 6);
    }

    #[test]
    fn fails_when_no_partition_has_room() {
        let mut ctx = StaticContext::new();
        for i in 0..2 {
            ctx.add_node(NodeArchetype::new(i, "A", vec![0; 200]));
        }
        let err = partition(&ctx, 1, 250).unwrap_err();
        assert!(matches!(err, CapacityError::NoCapacity { .. }));
    }
}
