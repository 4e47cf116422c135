// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and distributed tracing.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging throughout the pipeline. Message types follow a
//! struct-based pattern with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Enable future internationalization without code changes
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::analysis` - VisitAnalyzer / TTTBuilder / TTGCondenser events
//! * `messages::partition` - Partitioner strategy and capacity events
//! * `messages::scheduler` - TaskMgr rounds and walker suspension events
//! * `messages::memory` - DPUMemoryLayout snapshot construction events
//!
//! # Usage
//!
//! ```rust
//! use dagwood_pim::observability::messages::partition::CapacityExhausted;
//!
//! let msg = CapacityExhausted { node_id: 42, needed: 256, dpu_count: 4 };
//! tracing::error!("{}", msg);
//! ```

pub mod messages;
