// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Data model for graphs, walker programs, and symbolic traversal (§3).

pub mod graph;
pub mod program;
pub mod ttg;
pub mod ttt;
pub mod visit;

pub use graph::{EdgeArchetype, NodeArchetype, NodeId, StaticContext};
pub use program::{Ability, BasicBlock, Cfg, GraphProgram, VisitStmt, Walker};
pub use ttg::TemporalTraceGraph;
pub use ttt::{TemporalTraceTree, TemporalTraceTreeNode, TttNodeIdx, WalkerState};
pub use visit::{VisitInfo, VisitSequence};
