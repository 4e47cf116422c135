// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! ByteImage / MemoryRange (C1): an append-only byte buffer with an
//! object-id -> (ptr, size) index. Grounded on
//! `original_source/.../jacpim_simulation_runtime/dpu_mem_layout.py`'s
//! `DPUObjMemoryCtx` (renamed in Rust's idiom: no `obj_memory`/`download_obj`
//! Python-ism, same append/index/offset behavior).

use std::collections::HashMap;

/// A `(ptr, size)` pair naming where one object's bytes sit inside a byte image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRange {
    pub ptr: u64,
    pub size: u64,
}

impl MemoryRange {
    pub fn new(ptr: u64, size: u64) -> Self {
        Self { ptr, size }
    }

    /// Shift this range by `offset`, producing the range's absolute address
    /// once its owning region is placed inside a larger concatenated image (§4.7).
    pub fn add_offset(&self, offset: u64) -> Self {
        Self {
            ptr: self.ptr + offset,
            size: self.size,
        }
    }
}

/// Append-only byte buffer carrying an id -> range index for every object written (§3).
#[derive(Debug, Clone, Default)]
pub struct ByteImage {
    bytes: Vec<u8>,
    ranges: HashMap<u64, MemoryRange>,
}

impl ByteImage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `data` under `id`, returning the range it was written to.
    pub fn append(&mut self, id: u64, data: &[u8]) -> MemoryRange {
        let range = MemoryRange::new(self.bytes.len() as u64, data.len() as u64);
        self.bytes.extend_from_slice(data);
        self.ranges.insert(id, range);
        range
    }

    pub fn range(&self, id: u64) -> Option<MemoryRange> {
        self.ranges.get(&id).copied()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_tracks_growing_offsets() {
        let mut image = ByteImage::new();
        let r0 = image.append(0, &[1, 2, 3]);
        let r1 = image.append(1, &[4, 5]);
        assert_eq!(r0, MemoryRange::new(0, 3));
        assert_eq!(r1, MemoryRange::new(3, 2));
        assert_eq!(image.len(), 5);
        assert_eq!(image.bytes(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn add_offset_shifts_ptr_only() {
        let range = MemoryRange::new(10, 4);
        let shifted = range.add_offset(100);
        assert_eq!(shifted.ptr, 110);
        assert_eq!(shifted.size, 4);
    }

    #[test]
    fn unknown_id_has_no_range() {
        let image = ByteImage::new();
        assert!(image.range(42).is_none());
    }
}
