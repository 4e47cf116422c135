/// Default number of DPU cores (§6 `DPU_NUM`).
pub const DEFAULT_DPU_NUM: u32 = 50;
/// Default per-DPU capacity in bytes (§6 `DPU_SIZE_LIMIT`).
pub const DEFAULT_DPU_SIZE_LIMIT: u64 = 1024;
/// Default reserved bytes subtracted from DPU capacity (§6 `RESERVED_SIZE`).
pub const DEFAULT_RESERVED_SIZE: u64 = 128;
/// Default per-DPU parallelism cap (§6 `MAX_DPU_THREAD_NUM`).
pub const DEFAULT_MAX_DPU_THREAD_NUM: u32 = 4;
/// Default simulator worker pool size (§6 `N_SIM`).
pub const DEFAULT_N_SIM: u32 = 4;
/// Default TTT expansion cap (§6 `TARGET_NODE_COUNT`, §4.2).
pub const DEFAULT_TARGET_NODE_COUNT: u64 = 100_000;

/// Fennel partitioner exponent (§4.4).
pub const FENNEL_BETA: f64 = 1.5;
/// Fennel partitioner neighbor-affinity weight (§4.4).
pub const FENNEL_LAMBDA: f64 = 1.0;

/// Default inter-DPU transfer bandwidth, bytes/sec, used by PerfMeter's
/// `transfer_time` (§4.8). A configuration parameter, not a magic number.
pub const DEFAULT_DPU_BANDWIDTH: f64 = 1_000_000.0;
/// Default DPU clock rate, cycles/sec, used by PerfMeter's `compute_time` (§4.8).
pub const DEFAULT_DPU_CLOCK: f64 = 350_000_000.0;
