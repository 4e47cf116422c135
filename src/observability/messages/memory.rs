// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for DPUMemoryLayout snapshot construction (C11).

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// One DPU's per-round byte image was built and its offsets resolved (§4.7).
pub struct DpuSnapshotBuilt {
    pub dpu_id: u32,
    pub round: usize,
    pub byte_len: u64,
    pub walker_count: usize,
}

impl Display for DpuSnapshotBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "DPU {} round {}: snapshot built, {} bytes, {} active walker(s)",
            self.dpu_id, self.round, self.byte_len, self.walker_count
        )
    }
}

impl StructuredLog for DpuSnapshotBuilt {
    fn log(&self) {
        tracing::debug!(
            dpu_id = self.dpu_id,
            round = self.round,
            byte_len = self.byte_len,
            walker_count = self.walker_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("dpu_snapshot", span_name = name, dpu_id = self.dpu_id, round = self.round)
    }
}
