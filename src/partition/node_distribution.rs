// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! `NodeDistribution` (§4.4), grounded on
//! `original_source/.../data_mapper/partitioner.py::NodeDistribution`: tracks
//! per-DPU byte occupancy and exposes `available_partitions`.

use crate::errors::CapacityError;
use crate::model::graph::NodeId;
use std::collections::HashMap;

pub type DpuId = u32;

/// Tracks per-DPU byte occupancy against a shared capacity and the
/// resulting node -> DPU assignment (§4.4).
#[derive(Debug, Clone)]
pub struct NodeDistribution {
    capacity: u64,
    dpu_count: u32,
    occupancy: Vec<u64>,
    assignment: HashMap<NodeId, DpuId>,
}

impl NodeDistribution {
    pub fn new(dpu_count: u32, capacity: u64) -> Self {
        Self {
            capacity,
            dpu_count,
            occupancy: vec![0; dpu_count as usize],
            assignment: HashMap::new(),
        }
    }

    pub fn is_assigned(&self, node: NodeId) -> bool {
        self.assignment.contains_key(&node)
    }

    /// DPUs with at least `node_size` free bytes, in ascending id order (§4.4).
    pub fn available_partitions(&self, node_size: u64) -> Vec<DpuId> {
        (0..self.dpu_count)
            .filter(|&dpu| self.occupancy[dpu as usize] + node_size <= self.capacity)
            .collect()
    }

    /// Assign `node` to `dpu`, failing if that would overflow capacity (§4.4, §8 invariant 1).
    pub fn add_node(&mut self, node: NodeId, dpu: DpuId, node_size: u64) -> Result<(), CapacityError> {
        let slot = &mut self.occupancy[dpu as usize];
        if *slot + node_size > self.capacity {
            return Err(CapacityError::NoCapacity {
                node_id: node,
                needed: node_size,
                dpu_count: self.dpu_count as usize,
            });
        }
        *slot += node_size;
        self.assignment.insert(node, dpu);
        Ok(())
    }

    pub fn occupancy(&self) -> &[u64] {
        &self.occupancy
    }

    pub fn into_assignment(self) -> HashMap<NodeId, DpuId> {
        self.assignment
    }

    pub fn assignment(&self) -> &HashMap<NodeId, DpuId> {
        &self.assignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_partitions_respects_capacity() {
        let dist = NodeDistribution::new(2, 256);
        assert_eq!(dist.available_partitions(256), vec![0, 1]);
        assert_eq!(dist.available_partitions(257), Vec::<DpuId>::new());
    }

    #[test]
    fn add_node_rejects_overflow() {
        let mut dist = NodeDistribution::new(1, 128);
        dist.add_node(0, 0, 100).unwrap();
        let err = dist.add_node(1, 0, 100).unwrap_err();
        assert!(matches!(err, CapacityError::NoCapacity { .. }));
    }
}
