// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Bounded simulator worker pool (§5): dispatches one external simulator
//! invocation per `TaskSet`, from a pool of `N_SIM` concurrent workers.
//! Tasksets within one round are mutually independent and may run in any
//! order; round R+1 starts only after every taskset in round R completes.
//! Any worker failure aborts the whole pipeline (fail-fast), mirroring the
//! teacher's `engine::work_queue` `FailureStrategy::FailFast` short-circuit,
//! here expressed with a `tokio::sync::Semaphore` instead of a hand-rolled
//! active-task counter since there is no cross-taskset dependency graph to
//! track mid-round.

use crate::errors::WorkerFailure;
use crate::runtime::task_mgr::{Round, TaskId, TaskSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// One external simulator invocation for a single `TaskSet`. Implementations
/// call out to the DPU simulator binary/library; errors are wrapped into
/// [`WorkerFailure::WorkerPanicked`] by the pool.
#[async_trait::async_trait]
pub trait TaskSetInvoker: Send + Sync {
    async fn invoke(&self, task_set_id: u64, tasks: &TaskSet) -> anyhow::Result<()>;
}

/// Runs every `TaskSet` in `round` against `invoker`, bounded to `n_sim`
/// concurrent workers; returns as soon as every taskset in the round
/// finishes or the first failure is observed.
pub async fn run_round(
    round: &Round,
    invoker: Arc<dyn TaskSetInvoker>,
    n_sim: usize,
) -> Result<(), WorkerFailure> {
    let semaphore = Arc::new(Semaphore::new(n_sim.max(1)));
    let mut joins = JoinSet::new();

    for (task_set_id, task_set) in round.iter().enumerate() {
        let permit_source = semaphore.clone();
        let invoker = invoker.clone();
        let task_set = task_set.clone();
        let task_set_id = task_set_id as u64;

        joins.spawn(async move {
            let _permit = permit_source
                .acquire_owned()
                .await
                .expect("semaphore is never closed");
            invoker
                .invoke(task_set_id, &task_set)
                .await
                .map_err(|source| WorkerFailure::WorkerPanicked { task_set_id, source })
        });
    }

    while let Some(outcome) = joins.join_next().await {
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(failure)) => {
                joins.abort_all();
                return Err(failure);
            }
            Err(join_error) => {
                joins.abort_all();
                return Err(WorkerFailure::WorkerPanicked {
                    task_set_id: 0,
                    source: anyhow::anyhow!(join_error),
                });
            }
        }
    }

    Ok(())
}

/// A no-op invoker used when the pipeline runs without the optional
/// external simulator (§6): it just records which tasksets it saw.
pub struct RecordingInvoker {
    pub seen: tokio::sync::Mutex<Vec<(u64, Vec<TaskId>)>>,
}

impl RecordingInvoker {
    pub fn new() -> Self {
        Self {
            seen: tokio::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for RecordingInvoker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TaskSetInvoker for RecordingInvoker {
    async fn invoke(&self, task_set_id: u64, tasks: &TaskSet) -> anyhow::Result<()> {
        self.seen.lock().await.push((task_set_id, tasks.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingInvoker;

    #[async_trait::async_trait]
    impl TaskSetInvoker for FailingInvoker {
        async fn invoke(&self, task_set_id: u64, _tasks: &TaskSet) -> anyhow::Result<()> {
            if task_set_id == 1 {
                anyhow::bail!("simulated worker crash");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn every_taskset_is_recorded_on_success() {
        let round: Round = vec![vec![0, 1], vec![2]];
        let invoker = Arc::new(RecordingInvoker::new());
        run_round(&round, invoker.clone(), 2).await.unwrap();
        assert_eq!(invoker.seen.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn a_failing_taskset_aborts_the_round() {
        let round: Round = vec![vec![0], vec![1], vec![2]];
        let invoker = Arc::new(FailingInvoker);
        let err = run_round(&round, invoker, 2).await.unwrap_err();
        assert!(matches!(err, WorkerFailure::WorkerPanicked { .. }));
    }
}
