// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Symbolic walker expansion: VisitAnalyzer (C5), TTTBuilder (C6), TTGCondenser (C7).

pub mod ttg_condenser;
pub mod ttt_builder;
pub mod visit_analyzer;

pub use ttg_condenser::condense;
pub use ttt_builder::build_ttt;
pub use visit_analyzer::{analyze_walker, VisitAnalysis};
