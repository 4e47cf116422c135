// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Byte-exact DPU memory layout (C1-C3, C11): ByteImage/MemoryRange, the
//! ContainerObject/Metadata wire serializer, the explicit size schema, and
//! the per-DPU per-round snapshot builder (§3, §4.7).

pub mod byte_image;
pub mod layout;
pub mod serializer;
pub mod size_calculator;

pub use byte_image::{ByteImage, MemoryRange};
pub use layout::{DpuMemoryCtx, WalkerSnapshot};
pub use serializer::{ContainerObject, Metadata};
