// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! PerfMeter (C12): analytic cross-DPU jump count, transfer time, and
//! compute time estimate (§4.8).

pub mod perf_meter;

pub use perf_meter::{compute_time, cross_dpu_jumps, num_cycles, transfer_time};
