// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Random partitioner (§4.4), grounded on
//! `original_source/.../data_mapper/partitioner.py::random_partition`.

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
    let mut dist = NodeDistribution::new(dpu_count, capacity);
    let mut rng = rand::thread_rng();

    for node in ctx.nodes() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::NodeArchetype;

    #[test]
    fn every_node_gets_assigned() {
        let mut ctx = StaticContext::new();
        for i in 0..10 {
            ctx.add_node(NodeArchetype::new(i, "A", vec![0; 8]));
        }
        let result = partition(&ctx, 4, 1024).unwrap();
        assert_eq!(result.len(), 10);
    }

    #[test]
    fn fails_when_capacity_exhausted() {
        let mut ctx = StaticContext::new();
        for i in 0..3 {
            ctx.add_node(NodeArchetype::new(i, "A", vec![0; 100]));
        }
        let err = partition(&ctx, 1, 150).unwrap_err();
        assert!(matches!(err, CapacityError::NoCapacity { .. }));
    }
}
