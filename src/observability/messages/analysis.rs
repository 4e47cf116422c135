// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for VisitAnalyzer / TTTBuilder / TTGCondenser events (C5-C7).

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A walker's visit sequences were enumerated for one node type.
///
/// # Log Level
/// `debug!` - Per-walker analysis detail
///
/// # Example
/// ```
/// use dagwood_pim::observability::messages::analysis::VisitSequencesEnumerated;
///
/// let msg = VisitSequencesEnumerated {
///     walker: "Traverser",
///     node_type: "Person",
///     sequence_count: 3,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct VisitSequencesEnumerated<'a> {
    pub walker: &'a str,
    pub node_type: &'a str,
    pub sequence_count: usize,
}

impl Display for VisitSequencesEnumerated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "walker '{}' on node type '{}': {} visit sequence(s) enumerated",
            self.walker, self.node_type, self.sequence_count
        )
    }
}

impl StructuredLog for VisitSequencesEnumerated<'_> {
    fn log(&self) {
        tracing::debug!(
            walker = self.walker,
            node_type = self.node_type,
            sequence_count = self.sequence_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "visit_analysis",
            span_name = name,
            walker = self.walker,
            node_type = self.node_type,
        )
    }
}

/// The TTT expansion hit `TARGET_NODE_COUNT` before the frontier emptied (§4.2).
///
/// # Log Level
/// `warn!` - Expansion was truncated, results are a partial trace tree
pub struct TttExpansionBounded {
    pub target_node_count: u64,
    pub nodes_built: usize,
}

impl Display for TttExpansionBounded {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "TTT expansion stopped at target_node_count={} ({} nodes built, frontier not exhausted)",
            self.target_node_count, self.nodes_built
        )
    }
}

impl StructuredLog for TttExpansionBounded {
    fn log(&self) {
        tracing::warn!(
            target_node_count = self.target_node_count,
            nodes_built = self.nodes_built,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("ttt_builder", span_name = name, nodes_built = self.nodes_built)
    }
}

/// TTG condensation completed.
pub struct TtgCondensed {
    pub node_count: usize,
    pub edge_count: usize,
}

impl Display for TtgCondensed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "TTG condensed: {} nodes, {} edges", self.node_count, self.edge_count)
    }
}

impl StructuredLog for TtgCondensed {
    fn log(&self) {
        tracing::info!(node_count = self.node_count, edge_count = self.edge_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("ttg_condense", span_name = name, node_count = self.node_count)
    }
}
