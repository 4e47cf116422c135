// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod consts;
pub mod env;
pub mod validation;

pub use env::{load_and_validate_config, load_config, Mapping, PipelineConfig};
