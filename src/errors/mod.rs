// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod execution;

pub use config::ConfigurationError;
pub use execution::{
    CapacityError, ExecutionError, LookupError, RuntimeInvariant, SchedulingError, WorkerFailure,
};
