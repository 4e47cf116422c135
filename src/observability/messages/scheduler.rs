// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for TaskMgr scheduling (C10) and cooperative walker
//! execution (C9).

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// One scheduling round was created.
///
/// # Example
/// ```
/// use dagwood_pim::observability::messages::scheduler::RoundScheduled;
///
/// let msg = RoundScheduled { round: 1, task_set_count: 3, tasks_scheduled: 7 };
/// tracing::info!("{}", msg);
/// ```
pub struct RoundScheduled {
    pub round: usize,
    pub task_set_count: usize,
    pub tasks_scheduled: usize,
}

impl Display for RoundScheduled {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "round {}: {} taskset(s), {} task(s) scheduled",
            self.round, self.task_set_count, self.tasks_scheduled
        )
    }
}

impl StructuredLog for RoundScheduled {
    fn log(&self) {
        tracing::info!(
            round = self.round,
            task_set_count = self.task_set_count,
            tasks_scheduled = self.tasks_scheduled,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("schedule_round", span_name = name, round = self.round)
    }
}

/// `schedule_all` made zero progress with tasks still unscheduled: a
/// dependency cycle (§4.6, `SchedulingError::CycleDetected`).
pub struct SchedulingDeadlocked {
    pub remaining_task_count: usize,
}

impl Display for SchedulingDeadlocked {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "scheduling deadlocked: {} task(s) remain unscheduled with an empty ready set",
            self.remaining_task_count
        )
    }
}

impl StructuredLog for SchedulingDeadlocked {
    fn log(&self) {
        tracing::error!(remaining_task_count = self.remaining_task_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("schedule_round", span_name = name)
    }
}

/// A walker's head location maps to a different DPU than the one it is
/// currently executing on; it was suspended back to pending (§4.5).
pub struct WalkerSuspended {
    pub walker_id: u64,
    pub from_dpu: u32,
}

impl Display for WalkerSuspended {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "walker {} suspended at DPU {} boundary, re-queued as pending",
            self.walker_id, self.from_dpu
        )
    }
}

impl StructuredLog for WalkerSuspended {
    fn log(&self) {
        tracing::debug!(walker_id = self.walker_id, from_dpu = self.from_dpu, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("walker_runner", span_name = name, walker_id = self.walker_id)
    }
}
