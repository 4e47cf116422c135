// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the top-level pipeline run (C13).

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// One of the six ability-dispatch phases fired for a walker at a node (§4.5).
pub struct AbilityPhaseFired<'a> {
    pub walker_id: u64,
    pub node_id: u64,
    pub phase: &'a str,
}

impl Display for AbilityPhaseFired<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "walker {} node {}: {}",
            self.walker_id, self.node_id, self.phase
        )
    }
}

impl StructuredLog for AbilityPhaseFired<'_> {
    fn log(&self) {
        tracing::trace!(
            walker_id = self.walker_id,
            node_id = self.node_id,
            phase = self.phase,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "ability_dispatch",
            span_name = name,
            walker_id = self.walker_id,
            node_id = self.node_id,
            phase = self.phase,
        )
    }
}

/// One full `run_pipeline` call finished: every round scheduled and every
/// DPU snapshot built (§6 Outputs).
pub struct PipelineCompleted {
    pub round_count: usize,
    pub cross_dpu_jumps: u64,
    pub compute_time: f64,
    pub max_round_time: f64,
}

impl Display for PipelineCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "pipeline completed: {} round(s), {} cross-DPU jump(s), compute_time={:.6}s, max_round_time={:.6}s",
            self.round_count, self.cross_dpu_jumps, self.compute_time, self.max_round_time
        )
    }
}

impl StructuredLog for PipelineCompleted {
    fn log(&self) {
        tracing::info!(
            round_count = self.round_count,
            cross_dpu_jumps = self.cross_dpu_jumps,
            compute_time = self.compute_time,
            max_round_time = self.max_round_time,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("pipeline", span_name = name, round_count = self.round_count)
    }
}
