// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the Partitioner (C8).

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Partitioning finished: every node was assigned a DPU under capacity.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use dagwood_pim::observability::messages::partition::PartitioningCompleted;
///
/// let msg = PartitioningCompleted {
///     strategy: "DFSRoundRobin",
///     node_count: 128,
///     dpu_count: 4,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PartitioningCompleted<'a> {
    pub strategy: &'a str,
    pub node_count: usize,
    pub dpu_count: u32,
}

impl Display for PartitioningCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} partitioning completed: {} nodes across {} DPUs",
            self.strategy, self.node_count, self.dpu_count
        )
    }
}

impl StructuredLog for PartitioningCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            strategy = self.strategy,
            node_count = self.node_count,
            dpu_count = self.dpu_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "partition",
            span_name = name,
            strategy = self.strategy,
            node_count = self.node_count,
        )
    }
}

/// No DPU had room for a node; partitioning aborted (§4.4, `CapacityError`).
///
/// # Log Level
/// `error!` - Fatal condition, pipeline cannot proceed
pub struct CapacityExhausted {
    pub node_id: u64,
    pub needed: u64,
    pub dpu_count: usize,
}

impl Display for CapacityExhausted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "no DPU among {} had {} free bytes for node {}",
            self.dpu_count, self.needed, self.node_id
        )
    }
}

impl StructuredLog for CapacityExhausted {
    fn log(&self) {
        tracing::error!(
            node_id = self.node_id,
            needed = self.needed,
            dpu_count = self.dpu_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("partition", span_name = name, node_id = self.node_id)
    }
}
