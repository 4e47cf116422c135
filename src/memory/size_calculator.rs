// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! SizeCalculator (C3): explicit, per-type byte sizes for everything the
//! memory layout serializes. Deliberately NOT the source's dynamic
//! attribute-name introspection (`original_source/.../size_calc.py` infers
//! sizes from trailing digits in `dir()`-discovered attribute names); §9
//! flags that pattern for replacement with a schema attached by the loader.
//! Each function here names the field count and width it is computing from,
//! so sizes stay a compile-time fact rather than a runtime guess.

/// Width of one wire `u64` field.
pub const WORD: u64 = 8;

/// `ContainerObject` (§3): `walker_ptr, walker_size, node_ptr, node_size, edge_num`.
pub const CONTAINER_OBJECT_FIELDS: u64 = 5;

pub fn container_object_size() -> u64 {
    CONTAINER_OBJECT_FIELDS * WORD
}

/// `Metadata` (§3): `extra_mram_space_ptr, walker_num` plus two
/// `MAX_DPU_THREAD_NUM`-length arrays (`walker_container_ptrs`, `trace_lengths`).
pub fn metadata_size(max_dpu_thread_num: u64) -> u64 {
    2 * WORD + 2 * max_dpu_thread_num * WORD
}

/// A node's serialized size is exactly its archetype payload length (§3) —
/// the loader is the sole authority on node byte width.
pub fn node_size(payload_len: u64) -> u64 {
    payload_len
}

/// A walker's serialized size: one `u64` location pointer plus one `u64`
/// per container-slot entry, mirroring the walker's own `ContainerObject` shape.
pub fn walker_size(container_len: u64) -> u64 {
    WORD + container_len * WORD
}

/// Total bytes a container region needs for one walker's trace of `trace_len`
/// visited nodes.
pub fn container_region_size(trace_len: u64) -> u64 {
    trace_len * container_object_size()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_object_is_five_words() {
        assert_eq!(container_object_size(), 40);
    }

    #[test]
    fn metadata_scales_with_thread_cap() {
        assert_eq!(metadata_size(4), 2 * 8 + 2 * 4 * 8);
    }

    #[test]
    fn container_region_scales_with_trace_length() {
        assert_eq!(container_region_size(3), 3 * 40);
    }
}
