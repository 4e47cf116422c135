// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! `VisitInfo` / `VisitSequence` (§3), grounded on
//! `original_source/.../data_mapper/visit_sequence.py`'s `VisitInfo` dataclass.

/// One visit directive: "at a node of `from_node_type`, while running
/// `walker_type`, enqueue neighbors reachable by `edge_type` (or all
/// neighbors, if `None`) at container position `index`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitInfo {
    pub from_node_type: String,
    pub walker_type: String,
    pub edge_type: Option<String>,
    pub is_async: bool,
    pub index: i64,
}

/// Ordered list of [`VisitInfo`], the effects executed in one arrival of a
/// walker at a node of a given type (§3).
pub type VisitSequence = Vec<VisitInfo>;
