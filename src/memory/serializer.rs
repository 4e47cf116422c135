// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Serializer (C2): fixed little-endian `u64` wire encoding for
//! `ContainerObject` and `Metadata` (§3). Byte-exact: encode then decode at
//! the same fixed layout yields the original struct (§8 round-trip invariant).

/// One entry of a walker's container: `walker_ptr, walker_size, node_ptr,
/// node_size, edge_num` (§3, wire layout, little-endian, five `u64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerObject {
    pub walker_ptr: u64,
    pub walker_size: u64,
    pub node_ptr: u64,
    pub node_size: u64,
    pub edge_num: u64,
}

impl ContainerObject {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(40);
        out.extend_from_slice(&self.walker_ptr.to_le_bytes());
        out.extend_from_slice(&self.walker_size.to_le_bytes());
        out.extend_from_slice(&self.node_ptr.to_le_bytes());
        out.extend_from_slice(&self.node_size.to_le_bytes());
        out.extend_from_slice(&self.edge_num.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 40 {
            return None;
        }
        let word = |i: usize| u64::from_le_bytes(bytes[i * 8..i * 8 + 8].try_into().unwrap());
        Some(Self {
            walker_ptr: word(0),
            walker_size: word(1),
            node_ptr: word(2),
            node_size: word(3),
            edge_num: word(4),
        })
    }
}

/// Per-DPU fixed-width header (§3): extra scratch pointer, active walker
/// count, and one container-pointer/trace-length pair per thread slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub extra_mram_space_ptr: u64,
    pub walker_num: u64,
    pub walker_container_ptrs: Vec<u64>,
    pub trace_lengths: Vec<u64>,
}

impl Metadata {
    pub fn new(max_dpu_thread_num: usize) -> Self {
        Self {
            extra_mram_space_ptr: 0,
            walker_num: 0,
            walker_container_ptrs: vec![0; max_dpu_thread_num],
            trace_lengths: vec![0; max_dpu_thread_num],
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 * (2 + self.walker_container_ptrs.len() + self.trace_lengths.len()));
        out.extend_from_slice(&self.extra_mram_space_ptr.to_le_bytes());
        out.extend_from_slice(&self.walker_num.to_le_bytes());
        for ptr in &self.walker_container_ptrs {
            out.extend_from_slice(&ptr.to_le_bytes());
        }
        for len in &self.trace_lengths {
            out.extend_from_slice(&len.to_le_bytes());
        }
        out
    }

    pub fn from_bytes(bytes: &[u8], max_dpu_thread_num: usize) -> Option<Self> {
        let expected = 8 * (2 + 2 * max_dpu_thread_num);
        if bytes.len() < expected {
            return None;
        }
        let word = |i: usize| u64::from_le_bytes(bytes[i * 8..i * 8 + 8].try_into().unwrap());
        let extra_mram_space_ptr = word(0);
        let walker_num = word(1);
        let walker_container_ptrs = (0..max_dpu_thread_num).map(|i| word(2 + i)).collect();
        let trace_lengths = (0..max_dpu_thread_num)
            .map(|i| word(2 + max_dpu_thread_num + i))
            .collect();
        Some(Self {
            extra_mram_space_ptr,
            walker_num,
            walker_container_ptrs,
            trace_lengths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_object_round_trips() {
        let obj = ContainerObject {
            walker_ptr: 10,
            walker_size: 20,
            node_ptr: 30,
            node_size: 40,
            edge_num: 2,
        };
        let bytes = obj.to_bytes();
        assert_eq!(bytes.len(), 40);
        assert_eq!(ContainerObject::from_bytes(&bytes), Some(obj));
    }

    #[test]
    fn metadata_round_trips() {
        let mut meta = Metadata::new(4);
        meta.walker_num = 2;
        meta.walker_container_ptrs[0] = 128;
        meta.trace_lengths[0] = 3;

        let bytes = meta.to_bytes();
        assert_eq!(bytes.len(), 8 * (2 + 2 * 4));
        assert_eq!(Metadata::from_bytes(&bytes, 4), Some(meta));
    }

    #[test]
    fn truncated_bytes_fail_to_parse() {
        assert_eq!(ContainerObject::from_bytes(&[0u8; 10]), None);
        assert_eq!(Metadata::from_bytes(&[0u8; 4], 4), None);
    }
}
