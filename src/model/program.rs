// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! `GraphProgram` collaborator interface (§3, §6): a static, read-only
//! description of walker types, the per-node-type control-flow graphs their
//! abilities run, and the `VisitStmt`s those control-flow graphs contain.
//!
//! Shaped like the teacher's `traits::processor::Processor` /
//! `traits::executor::DagExecutor` collaborator traits: the pipeline only
//! ever reads through this interface, never owns how it was built.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A directive, attached to a basic block, to enqueue neighbors into the
/// walker's container (§3, GLOSSARY).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitStmt {
    pub edge_type: Option<String>,
    /// Insertion position into the walker's container; negative counts from the end (§4.2).
    pub index: i64,
    pub is_async: bool,
}

/// One node in an ability's control-flow graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BasicBlock {
    pub visits: Vec<VisitStmt>,
    pub bb_out: Vec<usize>,
}

/// Control-flow graph of one ability, indexed by basic-block id; block `0`
/// is the entry block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cfg {
    pub blocks: Vec<BasicBlock>,
}

impl Cfg {
    pub fn entry(&self) -> usize {
        0
    }

    pub fn block(&self, id: usize) -> Option<&BasicBlock> {
        self.blocks.get(id)
    }
}

/// A procedure attached to a (walker-type, node-type) pair (GLOSSARY).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub node_type: String,
    pub cfg: Cfg,
}

/// Static description of one walker type: its abilities, keyed by the node
/// type they fire on (§3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walker {
    pub name: String,
    pub abilities: Vec<Ability>,
}

/// Static description of all walker types known to a run (§6 Inputs).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphProgram {
    pub walkers: Vec<Walker>,
}

impl GraphProgram {
    pub fn walker(&self, name: &str) -> Option<&Walker> {
        self.walkers.iter().find(|w| w.name == name)
    }
}

/// The six-phase ability firing sequence a `WalkerRunner` invokes at each
/// step (§4.5). Implementations carry whatever side effects the embedding
/// application wants a walker's arrival/departure at a node to have; the
/// runner treats this purely as an opaque callback boundary.
#[async_trait]
pub trait AbilityDispatcher: Send + Sync {
    async fn walker_on_entry(&self, walker_id: u64, node_id: crate::model::graph::NodeId);
    async fn node_on_entry_any(&self, walker_id: u64, node_id: crate::model::graph::NodeId);
    async fn node_on_entry_walker_typed(
        &self,
        walker_id: u64,
        node_id: crate::model::graph::NodeId,
    );
    async fn node_on_exit_walker_typed(
        &self,
        walker_id: u64,
        node_id: crate::model::graph::NodeId,
    );
    async fn node_on_exit_any(&self, walker_id: u64, node_id: crate::model::graph::NodeId);
    async fn walker_on_exit(&self, walker_id: u64, node_id: crate::model::graph::NodeId);

    /// Whether the walker should stop (the normal terminal state, §7).
    fn is_disengaged(&self, walker_id: u64) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cfg_entry_is_block_zero() {
        let cfg = Cfg {
            blocks: vec![BasicBlock::default(), BasicBlock::default()],
        };
        assert_eq!(cfg.entry(), 0);
        assert!(cfg.block(0).is_some());
        assert!(cfg.block(2).is_none());
    }
}
