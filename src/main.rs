// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::sync::Arc;
use std::time::Instant;

use dagwood_pim::config::load_and_validate_config;
use dagwood_pim::model::graph::{GraphInstance, NodeId};
use dagwood_pim::model::program::{AbilityDispatcher, GraphProgram};
use dagwood_pim::observability::messages::orchestrator::AbilityPhaseFired;
use dagwood_pim::observability::messages::StructuredLog;
use dagwood_pim::orchestrator::{run_pipeline, run_round, RecordingInvoker};

/// A dispatcher that logs every phase and never disengages early: the
/// walker always runs its full queued path. Stands in for the application-
/// specific ability bodies a real embedding would provide (§4.5).
struct TracingDispatcher;

#[async_trait::async_trait]
impl AbilityDispatcher for TracingDispatcher {
    async fn walker_on_entry(&self, walker_id: u64, node_id: NodeId) {
        AbilityPhaseFired { walker_id, node_id, phase: "walker_on_entry" }.log();
    }
    async fn node_on_entry_any(&self, walker_id: u64, node_id: NodeId) {
        AbilityPhaseFired { walker_id, node_id, phase: "node_on_entry_any" }.log();
    }
    async fn node_on_entry_walker_typed(&self, walker_id: u64, node_id: NodeId) {
        AbilityPhaseFired { walker_id, node_id, phase: "node_on_entry_walker_typed" }.log();
    }
    async fn node_on_exit_walker_typed(&self, walker_id: u64, node_id: NodeId) {
        AbilityPhaseFired { walker_id, node_id, phase: "node_on_exit_walker_typed" }.log();
    }
    async fn node_on_exit_any(&self, walker_id: u64, node_id: NodeId) {
        AbilityPhaseFired { walker_id, node_id, phase: "node_on_exit_any" }.log();
    }
    async fn walker_on_exit(&self, walker_id: u64, node_id: NodeId) {
        AbilityPhaseFired { walker_id, node_id, phase: "walker_on_exit" }.log();
    }

    fn is_disengaged(&self, _walker_id: u64) -> bool {
        false
    }
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <config.yaml> <graph.json> <program.json> <walker> <start_node_id> [start_node_id ...]"
    )
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 6 {
        eprintln!("{}", usage(&args[0]));
        std::process::exit(1);
    }

    let config_file = &args[1];
    let graph_file = &args[2];
    let program_file = &args[3];
    let walker_name = &args[4];
    let starts: Vec<NodeId> = match args[5..].iter().map(|s| s.parse()).collect() {
        Ok(ids) => ids,
        Err(e) => {
            eprintln!("invalid start node id: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config_file, graph_file, program_file, walker_name, &starts).await {
        eprintln!("pipeline failed: {e}");
        std::process::exit(1);
    }
}

async fn run(
    config_file: &str,
    graph_file: &str,
    program_file: &str,
    walker_name: &str,
    starts: &[NodeId],
) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    let config = load_and_validate_config(config_file)?;

    let graph_raw = fs::read_to_string(graph_file)?;
    let graph_instance: GraphInstance = serde_json::from_str(&graph_raw)?;
    let ctx = graph_instance.into_context();

    let program_raw = fs::read_to_string(program_file)?;
    let program: GraphProgram = serde_json::from_str(&program_raw)?;

    let dispatcher = TracingDispatcher;
    let output = run_pipeline(&ctx, &program, walker_name, starts, &config, &dispatcher).await?;

    let invoker = Arc::new(RecordingInvoker::new());
    for round in &output.rounds {
        run_round(round, invoker.clone(), config.n_sim as usize).await?;
    }

    println!("Config: {config_file}");
    println!("DPUs used: {}", output.partitioning.values().collect::<std::collections::HashSet<_>>().len());
    println!("Rounds: {}", output.rounds.len());
    println!("Cross-DPU jumps: {}", output.cross_dpu_jumps);
    println!("Estimated compute time: {:.6}s", output.compute_time);
    println!("Estimated transfer time: {:.6}s", output.transfer_time);
    println!("Max per-round time: {:.6}s", output.max_round_time);
    println!("Wall clock: {:?}", start_time.elapsed());

    Ok(())
}
