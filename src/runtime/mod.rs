// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cooperative walker execution (C9) and dependency scheduling (C10), §4.5-4.6.

pub mod task_mgr;
pub mod walker_runner;

pub use task_mgr::{Round, Task, TaskId, TaskMgr, TaskSet};
pub use walker_runner::{Anchor, StepOutcome, WalkerEngine, WalkerHandle, WalkerRunner};
