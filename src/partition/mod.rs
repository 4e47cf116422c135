// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Partitioner (C8, §4.4): assign node-id -> DPU-id under capacity limits.

pub mod dfs_round_robin;
pub mod fennel;
pub mod node_distribution;
pub mod partitioner;
pub mod random;

pub use node_distribution::{DpuId, NodeDistribution};
pub use partitioner::{partition, Partitioning};
