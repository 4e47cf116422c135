// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Partitioner strategy trait + factory (C8), grounded on the teacher's
//! `engine::factory::ExecutorFactory::from_config` match-on-strategy shape.

use crate::config::{Mapping, PipelineConfig};
use crate::errors::CapacityError;
use crate::model::graph::{NodeId, StaticContext};
use crate::model::ttg::TemporalTraceGraph;
use crate::observability::messages::partition::{CapacityExhausted, PartitioningCompleted};
use crate::observability::messages::StructuredLog;
use crate::partition::node_distribution::DpuId;
use crate::partition::{dfs_round_robin, fennel, random};
use std::collections::HashMap;

/// A node-id -> DPU-id total function satisfying the capacity invariant (§3, §8.1).
pub type Partitioning = HashMap<NodeId, DpuId>;

/// Run the partitioner selected by `config.mapping` against `ctx`/`ttg`.
pub fn partition(
    config: &PipelineConfig,
    ctx: &StaticContext,
    ttg: &TemporalTraceGraph,
    starts: &[NodeId],
) -> Result<Partitioning, CapacityError> {
    let capacity = config.usable_capacity();
    let strategy = match config.mapping {
        Mapping::Round => "DFSRoundRobin",
        Mapping::Random => "Random",
        Mapping::Fennel => "Fennel",
    };
    let result = match config.mapping {
        Mapping::Round => dfs_round_robin::partition(ctx, ttg, starts, config.dpu_num, capacity),
        Mapping::Random => random::partition(ctx, config.dpu_num, capacity),
        Mapping::Fennel => fennel::partition(ctx, config.dpu_num, capacity),
    };

    match &result {
        Ok(mapping) => PartitioningCompleted {
            strategy,
            node_count: mapping.len(),
            dpu_count: config.dpu_num,
        }
        .log(),
        Err(CapacityError::NoCapacity {
            node_id,
            needed,
            dpu_count,
        }) => CapacityExhausted {
            node_id: *node_id,
            needed: *needed,
            dpu_count: *dpu_count,
        }
        .log(),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::NodeArchetype;

    #[test]
    fn every_strategy_covers_every_node_under_capacity() {
        let mut ctx = StaticContext::new();
        for i in 0..4 {
            ctx.add_node(NodeArchetype::new(i, "A", vec![0; 8]));
        }
        let ttg = TemporalTraceGraph::new();
        for mapping in [Mapping::Round, Mapping::Random, Mapping::Fennel] {
            let config = PipelineConfig {
                mapping,
                dpu_num: 2,
                ..PipelineConfig::default()
            };
            let result = partition(&config, &ctx, &ttg, &[0, 1, 2, 3]).unwrap();
            assert_eq!(result.len(), 4, "mapping {:?} must assign every node", mapping);
        }
    }
}
