// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod analysis; // VisitAnalyzer / TTTBuilder / TTGCondenser (C5-C7)
pub mod config; // process-wide configuration (§6A)
pub mod errors; // typed error hierarchy (§7)
pub mod memory; // ByteImage / Serializer / SizeCalculator / DPUMemoryLayout (C1-C3, C11)
pub mod model; // graph/program/visit/TTT/TTG data model (§3)
pub mod observability; // StructuredLog messages (§6B)
pub mod orchestrator; // pipeline wiring + simulator worker pool (C13)
pub mod partition; // Partitioner strategies (C8)
pub mod perf; // PerfMeter (C12)
pub mod runtime; // WalkerRunner / TaskMgr (C9, C10)
