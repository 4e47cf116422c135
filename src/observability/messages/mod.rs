// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging and distributed tracing.
//!
//! Each message type implements:
//!
//! * `Display` - Human-readable output (supports future i18n)
//! * `StructuredLog` - Machine-readable fields + OpenTelemetry span creation
//!
//! # Organization
//!
//! * `analysis` - VisitAnalyzer / TTTBuilder / TTGCondenser events
//! * `partition` - Partitioner strategy selection and capacity events
//! * `scheduler` - TaskMgr scheduling rounds and walker suspension events
//! * `memory` - DPUMemoryLayout snapshot construction events
//! * `orchestrator` - top-level pipeline run completion events
//!
//! # Usage
//!
//! ```rust
//! use dagwood_pim::observability::messages::partition::PartitioningCompleted;
//!
//! let msg = PartitioningCompleted {
//!     strategy: "DFSRoundRobin",
//!     node_count: 128,
//!     dpu_count: 4,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod analysis;
pub mod memory;
pub mod orchestrator;
pub mod partition;
pub mod scheduler;

use tracing::Span;

/// Trait for messages that support structured logging and distributed tracing.
///
/// # Example
/// ```rust
/// use dagwood_pim::observability::messages::{StructuredLog, partition::PartitioningCompleted};
///
/// let msg = PartitioningCompleted {
///     strategy: "DFSRoundRobin",
///     node_count: 128,
///     dpu_count: 4,
/// };
///
/// msg.log();
/// let span = msg.span("partition");
/// let _guard = span.enter();
/// ```
pub trait StructuredLog {
    /// Emit a log event with structured fields, at whatever level the
    /// message's semantic meaning calls for.
    fn log(&self);

    /// Create an OpenTelemetry span named `name` with this message's fields
    /// as attributes.
    fn span(&self, name: &str) -> Span;
}
