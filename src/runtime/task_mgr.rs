// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! TaskMgr (C10, §4.6): turns a per-task dependency DAG into rounds of
//! per-DPU `TaskSet`s, honoring `MAX_DPU_THREAD_NUM`. Grounded on
//! `original_source/.../test_task_mgr.py` / `test_task_mgr_simple.py` for
//! the API shape, and on the teacher's
//! `engine::level_by_level::LevelByLevelExecutor::compute_topological_levels`
//! for the Kahn's-algorithm leveling style.

use crate::errors::SchedulingError;
use crate::observability::messages::scheduler::{RoundScheduled, SchedulingDeadlocked};
use crate::observability::messages::StructuredLog;
use crate::partition::DpuId;
use std::collections::{HashMap, HashSet};

pub type TaskId = u64;

/// A unit of work scheduled onto one DPU, with at most one predecessor (§4.6).
///
/// §3 also attributes a `start_mem_ctx` snapshot and a node-id `trace` to
/// `Task`. `TaskMgr` deliberately carries neither: it is a pure
/// dependency/capacity scheduler (grounded on `original_source`'s
/// `test_task_mgr.py`, which drives `TaskMgr` with bare `(id, dpu_id)` pairs)
/// and never needs to read a task's memory contents to decide round
/// membership. The orchestrator keeps `trace`/memory data in its own
/// `Segment`/`DpuMemoryCtx` types instead, keyed by the same `id` this struct
/// carries, and joins them back to rounds by that id once scheduling is
/// done. Same information, split across the two collaborators that actually
/// use it.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub dpu_id: DpuId,
}

/// A bag of tasks belonging to one DPU for one round; `len() <= MAX_DPU_THREAD_NUM` (§3).
pub type TaskSet = Vec<TaskId>;

/// One round: the tasksets that became schedulable together, one per DPU.
pub type Round = Vec<TaskSet>;

/// Dependency-aware scheduler producing rounds of `TaskSet`s (§4.6).
pub struct TaskMgr {
    tasks: HashMap<TaskId, Task>,
    deps: HashMap<TaskId, Option<TaskId>>,
    reverse_deps: HashMap<TaskId, Vec<TaskId>>,
    scheduled: HashSet<TaskId>,
    ready: HashSet<TaskId>,
    rounds: Vec<Round>,
    max_dpu_thread_num: usize,
}

impl TaskMgr {
    pub fn new(max_dpu_thread_num: usize) -> Self {
        Self {
            tasks: HashMap::new(),
            deps: HashMap::new(),
            reverse_deps: HashMap::new(),
            scheduled: HashSet::new(),
            ready: HashSet::new(),
            rounds: Vec::new(),
            max_dpu_thread_num,
        }
    }

    /// Register `task`, optionally depending on `dependency_task_id` (§4.6).
    pub fn add_task(&mut self, task: Task, dependency_task_id: Option<TaskId>) {
        let id = task.id;
        self.deps.insert(id, dependency_task_id);
        if let Some(dep) = dependency_task_id {
            self.reverse_deps.entry(dep).or_default().push(id);
        }
        if dependency_task_id.is_none() {
            self.ready.insert(id);
        }
        self.tasks.insert(id, task);
    }

    /// Group `ready` by DPU; take up to `max_dpu_thread_num` tasks per DPU into a
    /// fresh `TaskSet`, moving the selected tasks from `ready` into `scheduled` (§4.6).
    fn create_round(&mut self) -> Round {
        let mut by_dpu: HashMap<DpuId, Vec<TaskId>> = HashMap::new();
        for &task_id in &self.ready {
            let dpu = self.tasks[&task_id].dpu_id;
            by_dpu.entry(dpu).or_default().push(task_id);
        }

        let mut round = Vec::new();
        let mut dpus: Vec<DpuId> = by_dpu.keys().copied().collect();
        dpus.sort_unstable();

        for dpu in dpus {
            let mut candidates = by_dpu.remove(&dpu).unwrap();
            candidates.sort_unstable();
            let take = candidates.len().min(self.max_dpu_thread_num);
            let task_set: TaskSet = candidates.drain(..take).collect();
            for &task_id in &task_set {
                self.ready.remove(&task_id);
                self.scheduled.insert(task_id);
            }
            round.push(task_set);
            // Leftover candidates beyond the thread cap stay in `ready` for next round.
            for task_id in candidates {
                self.ready.insert(task_id);
            }
        }

        round
    }

    /// Move every not-yet-ready, unscheduled task whose dependency just
    /// finished into `ready` (§4.6).
    fn complete_round(&mut self) {
        for (&task_id, dep) in &self.deps {
            if self.scheduled.contains(&task_id) || self.ready.contains(&task_id) {
                continue;
            }
            if let Some(dep_id) = dep {
                if self.scheduled.contains(dep_id) {
                    self.ready.insert(task_id);
                }
            }
        }
    }

    /// Iterate create/complete until every task has been scheduled. A round
    /// that schedules nothing while tasks remain unscheduled is a dependency
    /// cycle (§4.6, scenario S6).
    pub fn schedule_all(&mut self) -> Result<&[Round], SchedulingError> {
        while !self.ready.is_empty() || self.unscheduled_remaining() {
            if self.ready.is_empty() {
                let remaining: Vec<TaskId> = self
                    .tasks
                    .keys()
                    .copied()
                    .filter(|id| !self.scheduled.contains(id))
                    .collect();
                SchedulingDeadlocked {
                    remaining_task_count: remaining.len(),
                }
                .log();
                return Err(SchedulingError::CycleDetected { remaining });
            }
            let round = self.create_round();
            RoundScheduled {
                round: self.rounds.len(),
                task_set_count: round.len(),
                tasks_scheduled: round.iter().map(|ts| ts.len()).sum(),
            }
            .log();
            self.rounds.push(round);
            self.complete_round();
        }
        Ok(&self.rounds)
    }

    fn unscheduled_remaining(&self) -> bool {
        self.scheduled.len() < self.tasks.len()
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// `[{round, dpus: {dpu_id -> [task_id, ...]}}, ...]` for the textual report (§6).
    pub fn scheduling_plan(&self) -> Vec<(usize, HashMap<DpuId, Vec<TaskId>>)> {
        self.rounds
            .iter()
            .enumerate()
            .map(|(round_idx, round)| {
                let mut by_dpu = HashMap::new();
                for task_set in round {
                    for &task_id in task_set {
                        let dpu = self.tasks[&task_id].dpu_id;
                        by_dpu.entry(dpu).or_insert_with(Vec::new).push(task_id);
                    }
                }
                (round_idx, by_dpu)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s4_fan_out_dependency_schedule() {
        let mut mgr = TaskMgr::new(4);
        mgr.add_task(Task { id: 0, dpu_id: 10 }, None);
        mgr.add_task(Task { id: 1, dpu_id: 20 }, Some(0));
        mgr.add_task(Task { id: 2, dpu_id: 30 }, Some(0));
        mgr.add_task(Task { id: 3, dpu_id: 40 }, Some(0));

        let rounds = mgr.schedule_all().unwrap();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0], vec![vec![0]]);

        let mut round1_flat: Vec<TaskId> = rounds[1].iter().flatten().copied().collect();
        round1_flat.sort_unstable();
        assert_eq!(round1_flat, vec![1, 2, 3]);
    }

    #[test]
    fn s5_thread_cap_overflow_spills_to_a_third_round() {
        let mut mgr = TaskMgr::new(4);
        mgr.add_task(Task { id: 0, dpu_id: 10 }, None);
        for i in 1..=5 {
            mgr.add_task(Task { id: i, dpu_id: 20 }, Some(0));
        }

        let rounds = mgr.schedule_all().unwrap();
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[0], vec![vec![0]]);
        assert_eq!(rounds[1][0].len(), 4);
        assert_eq!(rounds[2][0].len(), 1);
    }

    #[test]
    fn s6_dependency_cycle_is_reported() {
        let mut mgr = TaskMgr::new(4);
        mgr.add_task(Task { id: 1, dpu_id: 10 }, Some(2));
        mgr.add_task(Task { id: 2, dpu_id: 10 }, Some(1));

        let err = mgr.schedule_all().unwrap_err();
        match err {
            SchedulingError::CycleDetected { remaining } => {
                let mut remaining = remaining;
                remaining.sort_unstable();
                assert_eq!(remaining, vec![1, 2]);
            }
        }
    }

    #[test]
    fn linear_chain_respects_topological_round_order() {
        let mut mgr = TaskMgr::new(4);
        mgr.add_task(Task { id: 0, dpu_id: 26 }, None);
        mgr.add_task(Task { id: 1, dpu_id: 23 }, Some(0));
        mgr.add_task(Task { id: 2, dpu_id: 25 }, Some(1));

        let rounds = mgr.schedule_all().unwrap();
        assert_eq!(rounds, vec![vec![vec![0]], vec![vec![1]], vec![vec![2]]]);
    }
}
