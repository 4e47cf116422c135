// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Orchestrator (C13): pipeline wiring and the bounded simulator worker pool.

pub mod pipeline;
pub mod simulator;

pub use pipeline::{run_pipeline, PipelineOutput};
pub use simulator::{run_round, RecordingInvoker, TaskSetInvoker};
