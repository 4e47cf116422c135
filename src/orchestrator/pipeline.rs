// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Orchestrator (C13): wires analyze -> partition -> run -> schedule ->
//! snapshot -> (emit), per §4's data-flow line
//! `GraphProgram + GraphInstance -> C4 -> C5/C6 -> C7 -> C8 -> C9 -> C10 -> C11 -> C12`.
//! Grounded on the teacher's `main.rs::run_single_config` wiring shape
//! (load config, build components, run, report) generalized from a single
//! linear DAG pass to this pipeline's round-based walker execution.

use crate::analysis::{analyze_walker, build_ttt, condense};
use crate::config::PipelineConfig;
use crate::errors::ExecutionError;
use crate::memory::{DpuMemoryCtx, WalkerSnapshot};
use crate::model::graph::{NodeId, StaticContext};
use crate::model::program::{AbilityDispatcher, GraphProgram};
use crate::observability::messages::orchestrator::PipelineCompleted;
use crate::observability::messages::StructuredLog;
use crate::partition::{self, DpuId, Partitioning};
use crate::perf;
use crate::runtime::task_mgr::{Round, Task, TaskMgr};
use crate::runtime::{StepOutcome, WalkerHandle, WalkerRunner};
use std::collections::{HashMap, HashSet};

/// Everything the pipeline produced for one run: the frozen partitioning,
/// the per-round DPU byte images, the scheduling plan, and the performance
/// report (§6 Outputs).
pub struct PipelineOutput {
    pub partitioning: Partitioning,
    pub rounds: Vec<Round>,
    pub dpu_images: Vec<HashMap<DpuId, Vec<u8>>>,
    pub cross_dpu_jumps: u64,
    pub compute_time: f64,
    pub transfer_time: f64,
    /// Estimated compute time of the slowest single round (§6 Outputs).
    pub max_round_time: f64,
}

/// One walker segment: the DPU it ran on and the nodes it visited there
/// before crossing or finishing (§4.6's single-predecessor `Task`).
struct Segment {
    dpu_id: DpuId,
    trace: Vec<NodeId>,
    walker_id: u64,
}

type TaskId = u64;

/// Run the full pipeline for one walker over one or more start nodes.
pub async fn run_pipeline(
    ctx: &StaticContext,
    program: &GraphProgram,
    walker_name: &str,
    starts: &[NodeId],
    config: &PipelineConfig,
    dispatcher: &dyn AbilityDispatcher,
) -> Result<PipelineOutput, ExecutionError> {
    let walker = program
        .walker(walker_name)
        .ok_or_else(|| crate::errors::LookupError::UnknownWalker(walker_name.to_string()))?;

    let known_edge_types: HashSet<String> = ctx.edges().map(|e| e.type_name.clone()).collect();
    let visit_sequences = analyze_walker(walker, &known_edge_types)?;

    let mut ttg_nodes = crate::model::ttg::TemporalTraceGraph::new();
    let mut concrete_paths: Vec<Vec<NodeId>> = Vec::with_capacity(starts.len());
    for &start in starts {
        let tree = build_ttt(ctx, start, &visit_sequences, config.target_node_count);
        let condensed = condense(&tree);
        for &node in condensed.nodes() {
            ttg_nodes.add_node(node);
        }
        for &node in condensed.nodes() {
            for edge in condensed.edges_from(node, false) {
                ttg_nodes.add_edge(node, *edge);
            }
        }
        // One concrete root-to-leaf path seeds this walker's queued locations;
        // the TTT's other branches describe paths other walker instances could take.
        let path = tree.paths().into_iter().next().unwrap_or_else(|| vec![start]);
        concrete_paths.push(path);
    }

    let partitioning = partition::partition(config, ctx, &ttg_nodes, starts)?;

    let mut task_mgr = TaskMgr::new(config.max_dpu_thread_num as usize);
    let mut segments: Vec<Segment> = Vec::new();
    let mut next_task_id: TaskId = 0;
    let mut total_jumps = 0u64;

    for (walker_idx, path) in concrete_paths.iter().enumerate() {
        let walker_id = walker_idx as u64;
        let start = path[0];
        let mut handle = WalkerHandle::new(walker_id, start);
        for &node_id in &path[1..] {
            handle.next.push_back(crate::runtime::Anchor::Node(node_id));
        }
        let mut runner = WalkerRunner::new(&partitioning);
        let mut current_trace: Vec<NodeId> = Vec::new();
        let mut last_task_id: Option<TaskId> = None;

        loop {
            let before_len = handle.trace.len();
            let outcome = runner.step(&mut handle, dispatcher).await?;
            current_trace.extend_from_slice(&handle.trace[before_len..]);

            let finished = matches!(outcome, StepOutcome::Done);
            if !current_trace.is_empty() {
                let dpu_id = partitioning
                    .get(current_trace.last().unwrap())
                    .copied()
                    .unwrap_or(0);
                let task_id = next_task_id;
                next_task_id += 1;

                task_mgr.add_task(Task { id: task_id, dpu_id }, last_task_id);
                segments.push(Segment {
                    dpu_id,
                    trace: std::mem::take(&mut current_trace),
                    walker_id,
                });
                last_task_id = Some(task_id);
            }

            if finished {
                break;
            }
        }
        total_jumps += runner.cross_dpu_jumps();
    }

    let rounds = task_mgr.schedule_all()?.to_vec();
    let node_type_of = |id: NodeId| ctx.node_type(id).ok().map(|s| s.to_string());

    let mut dpu_images = Vec::with_capacity(rounds.len());
    let mut max_round_time = 0.0f64;
    for (round_idx, round) in rounds.iter().enumerate() {
        let task_ids: HashSet<TaskId> = round.iter().flatten().copied().collect();
        let mut by_dpu: HashMap<DpuId, Vec<&Segment>> = HashMap::new();
        for (id, segment) in segments.iter().enumerate() {
            if task_ids.contains(&(id as TaskId)) {
                by_dpu.entry(segment.dpu_id).or_default().push(segment);
            }
        }

        let mut images = HashMap::new();
        for (&dpu_id, dpu_segments) in &by_dpu {
            let node_ids: Vec<NodeId> = dpu_segments
                .iter()
                .flat_map(|s| s.trace.iter().copied())
                .collect();
            let snapshots: Vec<WalkerSnapshot> = dpu_segments
                .iter()
                .map(|s| WalkerSnapshot {
                    walker_id: s.walker_id,
                    trace: s.trace.clone(),
                })
                .collect();
            let layout = DpuMemoryCtx::build(
                ctx,
                dpu_id,
                round_idx,
                &node_ids,
                &snapshots,
                config.max_dpu_thread_num as usize,
            );
            images.insert(dpu_id, layout.dump());
        }
        dpu_images.push(images);

        let round_traces: Vec<Vec<NodeId>> = segments
            .iter()
            .enumerate()
            .filter(|(id, _)| task_ids.contains(&(*id as TaskId)))
            .map(|(_, segment)| segment.trace.clone())
            .collect();
        let round_time = perf::compute_time(
            &round_traces,
            walker,
            node_type_of,
            crate::config::consts::DEFAULT_DPU_CLOCK,
        );
        max_round_time = max_round_time.max(round_time);
    }

    let traces: Vec<Vec<NodeId>> = segments.iter().map(|s| s.trace.clone()).collect();
    let compute_time = perf::compute_time(
        &traces,
        walker,
        node_type_of,
        crate::config::consts::DEFAULT_DPU_CLOCK,
    );
    // Mean container length (nodes visited past the start) across this run's
    // walkers, the real per-walker figure `walker_size` needs — not a stand-in.
    let total_trace_nodes: u64 = concrete_paths
        .iter()
        .map(|path| path.len().saturating_sub(1) as u64)
        .sum();
    let mean_container_len = total_trace_nodes / concrete_paths.len().max(1) as u64;
    let transfer_time = perf::transfer_time(
        total_jumps,
        crate::memory::size_calculator::walker_size(mean_container_len),
        crate::config::consts::DEFAULT_DPU_BANDWIDTH,
    );

    PipelineCompleted {
        round_count: rounds.len(),
        cross_dpu_jumps: total_jumps,
        compute_time,
        max_round_time,
    }
    .log();

    Ok(PipelineOutput {
        partitioning,
        rounds,
        dpu_images,
        cross_dpu_jumps: total_jumps,
        compute_time,
        transfer_time,
        max_round_time,
    })
}
