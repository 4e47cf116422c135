// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! PerfMeter (C12, §4.8): a cheap analytic performance model, not a cycle-
//! accurate simulator. Grounded on
//! `original_source/.../data_mapper/partitioner.py::calculate_performance`
//! for the cross-DPU jump count; `transfer_time`/`compute_time` follow
//! §4.8's formulas directly, with bandwidth/clock carried as configuration
//! parameters (`config::consts::DEFAULT_DPU_BANDWIDTH`/`DEFAULT_DPU_CLOCK`)
//! rather than inlined constants.

use crate::model::graph::NodeId;
use crate::model::program::{Cfg, Walker};
use crate::partition::Partitioning;

/// `|{(a,b): consecutive in a trace, mapping[a] != mapping[b]}|` (§4.8).
pub fn cross_dpu_jumps(mapping: &Partitioning, traces: &[Vec<NodeId>]) -> u64 {
    let mut jumps = 0;
    for trace in traces {
        for pair in trace.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if mapping.get(&a) != mapping.get(&b) {
                jumps += 1;
            }
        }
    }
    jumps
}

/// `2 * jumps * walker_size / bandwidth` (§4.8).
pub fn transfer_time(jumps: u64, walker_size: u64, bandwidth: f64) -> f64 {
    2.0 * jumps as f64 * walker_size as f64 / bandwidth
}

/// Longest path length (edge count) through one ability's CFG, used as a
/// stand-in for instruction-cycle count (§4.8's `num_cycles` proxy). The CFG
/// is acyclic within one firing (VisitAnalyzer's invariant), so a single
/// reverse topological DP suffices.
pub fn num_cycles(cfg: &Cfg) -> u64 {
    let n = cfg.blocks.len();
    if n == 0 {
        return 0;
    }
    let mut longest = vec![0u64; n];
    for idx in (0..n).rev() {
        let block = &cfg.blocks[idx];
        let best_successor = block
            .bb_out
            .iter()
            .filter(|&&succ| succ < n)
            .map(|&succ| longest[succ] + 1)
            .max()
            .unwrap_or(0);
        longest[idx] = best_successor;
    }
    longest[0]
}

/// `sum over traces, sum over nodes, num_cycles(ability(node_type)) / clock` (§4.8).
/// A node contributes zero cycles if the walker has no ability for its type
/// (it would not have been visited in practice, but PerfMeter tolerates it).
pub fn compute_time(
    traces: &[Vec<NodeId>],
    walker: &Walker,
    node_type_of: impl Fn(NodeId) -> Option<String>,
    clock: f64,
) -> f64 {
    let mut total_cycles = 0u64;
    for trace in traces {
        for &node_id in trace {
            let Some(node_type) = node_type_of(node_id) else {
                continue;
            };
            if let Some(ability) = walker.abilities.iter().find(|a| a.node_type == node_type) {
                total_cycles += num_cycles(&ability.cfg);
            }
        }
    }
    total_cycles as f64 / clock
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::program::{Ability, BasicBlock, VisitStmt};
    use std::collections::HashMap;

    #[test]
    fn jumps_count_only_boundary_crossings() {
        let mapping: Partitioning = HashMap::from([(0u64, 0u32), (1u64, 0u32), (2u64, 1u32)]);
        let traces = vec![vec![0, 1, 2]];
        assert_eq!(cross_dpu_jumps(&mapping, &traces), 1);
    }

    #[test]
    fn transfer_time_scales_linearly() {
        assert_eq!(transfer_time(2, 100, 1000.0), 0.4);
    }

    #[test]
    fn num_cycles_is_longest_path_through_branching_cfg() {
        let cfg = Cfg {
            blocks: vec![
                BasicBlock {
                    visits: vec![VisitStmt {
                        edge_type: "e".into(),
                        index: -1,
                        is_async: false,
                    }],
                    bb_out: vec![1, 2],
                },
                BasicBlock {
                    visits: vec![],
                    bb_out: vec![2],
                },
                BasicBlock {
                    visits: vec![],
                    bb_out: vec![],
                },
            ],
        };
        assert_eq!(num_cycles(&cfg), 2);
    }

    #[test]
    fn compute_time_sums_cycles_across_traces() {
        let cfg = Cfg {
            blocks: vec![BasicBlock {
                visits: vec![],
                bb_out: vec![],
            }],
        };
        let walker = Walker {
            name: "w".into(),
            abilities: vec![Ability {
                node_type: "A".into(),
                cfg,
            }],
        };
        let traces = vec![vec![0, 1]];
        let node_type_of = |_id: NodeId| Some("A".to_string());
        let time = compute_time(&traces, &walker, node_type_of, 1.0);
        assert_eq!(time, 0.0); // single-block CFG has zero edges, so zero cycles
    }
}
