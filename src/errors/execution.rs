// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while resolving names against the graph program (C5, analysis phase).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("node type '{0}' is not known to the graph program")]
    UnknownNodeType(String),

    #[error("edge type '{0}' referenced by a visit filter does not exist")]
    UnknownEdgeType(String),

    #[error("node id {0} has no entry in the static context")]
    UnknownNodeId(u64),

    #[error("walker '{0}' is not defined by the graph program")]
    UnknownWalker(String),
}

/// Raised when the partitioner cannot place a node under the capacity invariant (C8).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapacityError {
    #[error("no DPU has {needed} free bytes for node {node_id} (checked {dpu_count} DPUs)")]
    NoCapacity {
        node_id: u64,
        needed: u64,
        dpu_count: usize,
    },
}

/// Raised by TaskMgr when a scheduling round makes zero progress (C10).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulingError {
    #[error("dependency cycle detected: {} tasks remain ready but unschedulable: {remaining:?}", remaining.len())]
    CycleDetected { remaining: Vec<u64> },
}

/// Bugs: a runtime invariant assumed by the walker runner was violated (C9).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeInvariant {
    #[error("walker {walker_id} was promoted with an empty container")]
    EmptyContainerOnPromotion { walker_id: u64 },

    #[error("DPU {dpu_id} active bag exceeded MAX_DPU_THREAD_NUM ({limit})")]
    ActiveBagOverflow { dpu_id: u64, limit: usize },
}

/// Raised when the bounded `N_SIM` simulator worker pool aborts (§5).
#[derive(Error, Debug)]
pub enum WorkerFailure {
    #[error("simulator worker for task set {task_set_id} failed: {source}")]
    WorkerPanicked {
        task_set_id: u64,
        #[source]
        source: anyhow::Error,
    },

    #[error("simulator worker pool shut down before task set {task_set_id} could run")]
    PoolShutDown { task_set_id: u64 },
}

/// Top-level execution error, the union of every fatal failure mode in §7.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Scheduling(#[from] SchedulingError),

    #[error(transparent)]
    Invariant(#[from] RuntimeInvariant),

    #[error(transparent)]
    Worker(#[from] WorkerFailure),

    #[error(transparent)]
    Configuration(#[from] crate::errors::config::ConfigurationError),
}
