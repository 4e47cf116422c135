// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! WalkerRunner (C9, §4.5): execute a walker stepwise; stop on DPU-boundary
//! or disengage. Per §9's "coroutine-like walker suspension" design note,
//! this is an explicit `{Pending, Active[dpu], Done}` state machine rather
//! than a host coroutine/future suspension point.

use crate::errors::RuntimeInvariant;
use crate::model::graph::NodeId;
use crate::model::program::AbilityDispatcher;
use crate::observability::messages::scheduler::WalkerSuspended;
use crate::observability::messages::StructuredLog;
use crate::partition::{DpuId, Partitioning};
use std::collections::{HashMap, VecDeque};

/// One location the walker still needs to visit; an edge resolves to its
/// target node (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Node(NodeId),
    Edge { source: NodeId, target: NodeId },
}

impl Anchor {
    pub fn resolve(&self) -> NodeId {
        match self {
            Anchor::Node(id) => *id,
            Anchor::Edge { target, .. } => *target,
        }
    }
}

/// A walker's mutable state: the sequence of locations it still owes a visit,
/// and the trace of nodes it has already visited this run (for snapshotting, §4.7).
#[derive(Debug, Clone)]
pub struct WalkerHandle {
    pub id: u64,
    pub next: VecDeque<Anchor>,
    pub trace: Vec<NodeId>,
}

impl WalkerHandle {
    pub fn new(id: u64, start: NodeId) -> Self {
        Self {
            id,
            next: VecDeque::from([Anchor::Node(start)]),
            trace: Vec::new(),
        }
    }
}

/// Outcome of one [`WalkerRunner::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The walker's head location is on a different DPU; it was re-queued as pending.
    WouldCross,
    /// `next` emptied, or the dispatcher flagged the walker disengaged (the normal terminus).
    Done,
}

/// Advances one walker at a time against a frozen partitioning, firing the
/// six-phase ability sequence through an [`AbilityDispatcher`] (§4.5).
pub struct WalkerRunner<'a> {
    mapping: &'a Partitioning,
    cross_dpu_jumps: u64,
}

impl<'a> WalkerRunner<'a> {
    pub fn new(mapping: &'a Partitioning) -> Self {
        Self {
            mapping,
            cross_dpu_jumps: 0,
        }
    }

    pub fn cross_dpu_jumps(&self) -> u64 {
        self.cross_dpu_jumps
    }

    fn dpu_of(&self, node_id: NodeId) -> Option<DpuId> {
        self.mapping.get(&node_id).copied()
    }

    /// Advance `walker` until it would cross a DPU boundary or finishes (§4.5).
    pub async fn step(
        &mut self,
        walker: &mut WalkerHandle,
        dispatcher: &dyn AbilityDispatcher,
    ) -> Result<StepOutcome, RuntimeInvariant> {
        let mut current_dpu: Option<DpuId> = None;

        loop {
            let head = match walker.next.front() {
                Some(anchor) => *anchor,
                None => return Ok(StepOutcome::Done),
            };
            let node_id = head.resolve();
            let dpu = self.dpu_of(node_id);

            match current_dpu {
                None => current_dpu = dpu,
                Some(current) if dpu != Some(current) => {
                    self.cross_dpu_jumps += 1;
                    WalkerSuspended {
                        walker_id: walker.id,
                        from_dpu: current,
                    }
                    .log();
                    return Ok(StepOutcome::WouldCross);
                }
                _ => {}
            }

            walker.next.pop_front();
            walker.trace.push(node_id);

            dispatcher.walker_on_entry(walker.id, node_id).await;
            dispatcher.node_on_entry_any(walker.id, node_id).await;
            dispatcher.node_on_entry_walker_typed(walker.id, node_id).await;
            dispatcher.node_on_exit_walker_typed(walker.id, node_id).await;
            dispatcher.node_on_exit_any(walker.id, node_id).await;
            dispatcher.walker_on_exit(walker.id, node_id).await;

            if dispatcher.is_disengaged(walker.id) {
                return Ok(StepOutcome::Done);
            }
        }
    }
}

/// The pending/active/done bookkeeping a cooperative run needs across
/// multiple rounds (§4.5): `pending` (not yet placed), `active[dpu]`
/// (running this round), and the lifetime roster implicit in `completed`.
pub struct WalkerEngine {
    pub pending: Vec<WalkerHandle>,
    pub active: HashMap<DpuId, Vec<WalkerHandle>>,
    pub completed: Vec<WalkerHandle>,
    max_dpu_thread_num: usize,
    cross_dpu_jumps: u64,
}

impl WalkerEngine {
    pub fn new(max_dpu_thread_num: usize) -> Self {
        Self {
            pending: Vec::new(),
            active: HashMap::new(),
            completed: Vec::new(),
            max_dpu_thread_num,
            cross_dpu_jumps: 0,
        }
    }

    pub fn cross_dpu_jumps(&self) -> u64 {
        self.cross_dpu_jumps
    }

    pub fn spawn(&mut self, walker: WalkerHandle) {
        self.pending.push(walker);
    }

    fn target_dpu(&self, walker: &WalkerHandle, mapping: &Partitioning) -> Option<DpuId> {
        walker.next.front().and_then(|a| mapping.get(&a.resolve())).copied()
    }

    /// Move pending walkers into `active[dpu]` while that bag has room (§4.5).
    pub fn promote_pending(&mut self, mapping: &Partitioning) {
        let mut still_pending = Vec::new();
        for walker in self.pending.drain(..) {
            match self.target_dpu(&walker, mapping) {
                Some(dpu) => {
                    let bag = self.active.entry(dpu).or_default();
                    if bag.len() < self.max_dpu_thread_num {
                        bag.push(walker);
                    } else {
                        still_pending.push(walker);
                    }
                }
                None => still_pending.push(walker), // empty next: nothing to promote
            }
        }
        self.pending = still_pending;
    }

    pub fn has_work(&self) -> bool {
        !self.pending.is_empty() || self.active.values().any(|bag| !bag.is_empty())
    }

    /// Fire every active walker once. Walkers reporting `WouldCross` go back
    /// to pending; walkers reporting `Done` move to `completed` (§4.5).
    pub async fn run_round(
        &mut self,
        mapping: &Partitioning,
        dispatcher: &dyn AbilityDispatcher,
    ) -> Result<(), RuntimeInvariant> {
        let mut runner = WalkerRunner::new(mapping);
        let dpus: Vec<DpuId> = self.active.keys().copied().collect();

        for dpu in dpus {
            let walkers = self.active.remove(&dpu).unwrap_or_default();
            for mut walker in walkers {
                match runner.step(&mut walker, dispatcher).await? {
                    StepOutcome::WouldCross => self.pending.push(walker),
                    StepOutcome::Done => self.completed.push(walker),
                }
            }
        }

        self.cross_dpu_jumps += runner.cross_dpu_jumps();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct CountingDispatcher {
        visits: Mutex<Vec<(u64, NodeId)>>,
        disengage_after: AtomicUsize,
    }

    impl CountingDispatcher {
        fn new(disengage_after: usize) -> Self {
            Self {
                visits: Mutex::new(Vec::new()),
                disengage_after: AtomicUsize::new(disengage_after),
            }
        }
    }

    #[async_trait]
    impl AbilityDispatcher for CountingDispatcher {
        async fn walker_on_entry(&self, walker_id: u64, node_id: NodeId) {
            self.visits.lock().unwrap().push((walker_id, node_id));
        }
        async fn node_on_entry_any(&self, _walker_id: u64, _node_id: NodeId) {}
        async fn node_on_entry_walker_typed(&self, _walker_id: u64, _node_id: NodeId) {}
        async fn node_on_exit_walker_typed(&self, _walker_id: u64, _node_id: NodeId) {}
        async fn node_on_exit_any(&self, _walker_id: u64, _node_id: NodeId) {}
        async fn walker_on_exit(&self, _walker_id: u64, _node_id: NodeId) {}

        fn is_disengaged(&self, _walker_id: u64) -> bool {
            let remaining = self.disengage_after.load(Ordering::SeqCst);
            if remaining == 0 {
                return false;
            }
            self.disengage_after.fetch_sub(1, Ordering::SeqCst);
            false
        }
    }

    #[tokio::test]
    async fn s1_single_node_no_visits_zero_jumps_done() {
        let mapping: Partitioning = HashMap::from([(0u64, 0u32)]);
        let mut walker = WalkerHandle::new(1, 0);
        let dispatcher = CountingDispatcher::new(0);
        let mut runner = WalkerRunner::new(&mapping);
        let outcome = runner.step(&mut walker, &dispatcher).await.unwrap();
        assert_eq!(outcome, StepOutcome::Done);
        assert_eq!(runner.cross_dpu_jumps(), 0);
        assert_eq!(walker.trace, vec![0]);
    }

    #[tokio::test]
    async fn s2_cross_dpu_segment_stops_and_counts_one_jump() {
        let mapping: Partitioning = HashMap::from([(0u64, 0u32), (1u64, 1u32)]);
        let mut walker = WalkerHandle::new(1, 0);
        walker.next.push_back(Anchor::Node(1));
        let dispatcher = CountingDispatcher::new(0);
        let mut runner = WalkerRunner::new(&mapping);

        let first = runner.step(&mut walker, &dispatcher).await.unwrap();
        assert_eq!(first, StepOutcome::WouldCross);
        assert_eq!(runner.cross_dpu_jumps(), 1);
        assert_eq!(walker.trace, vec![0]);

        let second = runner.step(&mut walker, &dispatcher).await.unwrap();
        assert_eq!(second, StepOutcome::Done);
        assert_eq!(walker.trace, vec![0, 1]);
    }

    #[tokio::test]
    async fn same_dpu_segment_runs_to_completion_without_crossing() {
        let mapping: Partitioning = HashMap::from([(0u64, 0u32), (1u64, 0u32)]);
        let mut walker = WalkerHandle::new(1, 0);
        walker.next.push_back(Anchor::Node(1));
        let dispatcher = CountingDispatcher::new(0);
        let mut runner = WalkerRunner::new(&mapping);
        let outcome = runner.step(&mut walker, &dispatcher).await.unwrap();
        assert_eq!(outcome, StepOutcome::Done);
        assert_eq!(runner.cross_dpu_jumps(), 0);
        assert_eq!(walker.trace, vec![0, 1]);
    }
}
