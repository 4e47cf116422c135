// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Process-wide pipeline configuration (§6A).
//!
//! A `PipelineConfig` is loaded once from an optional YAML file and then
//! overlaid with the six environment variables in §6's configuration table.
//! Environment variables win over the file; both are optional and fall back
//! to the defaults in [`crate::config::consts`].

use crate::config::consts::{
    DEFAULT_DPU_NUM, DEFAULT_DPU_SIZE_LIMIT, DEFAULT_MAX_DPU_THREAD_NUM, DEFAULT_N_SIM,
    DEFAULT_RESERVED_SIZE, DEFAULT_TARGET_NODE_COUNT,
};
use crate::errors::ConfigurationError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Partitioner strategy selected by `MAPPING` (§4.4, §6).
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mapping {
    Round,
    Random,
    Fennel,
}

impl std::str::FromStr for Mapping {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROUND" => Ok(Mapping::Round),
            "RANDOM" => Ok(Mapping::Random),
            "FENNEL" => Ok(Mapping::Fennel),
            other => Err(ConfigurationError::UnknownMapping {
                value: other.to_string(),
            }),
        }
    }
}

/// Process-wide pipeline configuration (§6's configuration environment table).
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_mapping")]
    pub mapping: Mapping,
    #[serde(default = "default_dpu_num")]
    pub dpu_num: u32,
    #[serde(default = "default_dpu_size_limit")]
    pub dpu_size_limit: u64,
    #[serde(default = "default_reserved_size")]
    pub reserved_size: u64,
    #[serde(default = "default_max_dpu_thread_num")]
    pub max_dpu_thread_num: u32,
    #[serde(default = "default_n_sim")]
    pub n_sim: u32,
    #[serde(default = "default_target_node_count")]
    pub target_node_count: u64,
}

fn default_mapping() -> Mapping {
    Mapping::Round
}
fn default_dpu_num() -> u32 {
    DEFAULT_DPU_NUM
}
fn default_dpu_size_limit() -> u64 {
    DEFAULT_DPU_SIZE_LIMIT
}
fn default_reserved_size() -> u64 {
    DEFAULT_RESERVED_SIZE
}
fn default_max_dpu_thread_num() -> u32 {
    DEFAULT_MAX_DPU_THREAD_NUM
}
fn default_n_sim() -> u32 {
    DEFAULT_N_SIM
}
fn default_target_node_count() -> u64 {
    DEFAULT_TARGET_NODE_COUNT
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mapping: default_mapping(),
            dpu_num: default_dpu_num(),
            dpu_size_limit: default_dpu_size_limit(),
            reserved_size: default_reserved_size(),
            max_dpu_thread_num: default_max_dpu_thread_num(),
            n_sim: default_n_sim(),
            target_node_count: default_target_node_count(),
        }
    }
}

impl PipelineConfig {
    /// Per-DPU usable capacity after reserving `reserved_size` bytes (§4.4).
    pub fn usable_capacity(&self) -> u64 {
        self.dpu_size_limit.saturating_sub(self.reserved_size)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigurationError> {
        if let Ok(value) = std::env::var("MAPPING") {
            self.mapping = value.parse()?;
        }
        if let Ok(value) = std::env::var("DPU_NUM") {
            self.dpu_num = parse_positive(&value, "DPU_NUM")? as u32;
        }
        if let Ok(value) = std::env::var("DPU_SIZE_LIMIT") {
            self.dpu_size_limit = parse_positive(&value, "DPU_SIZE_LIMIT")? as u64;
        }
        if let Ok(value) = std::env::var("RESERVED_SIZE") {
            self.reserved_size = value.parse::<u64>().map_err(|_| ConfigurationError::MalformedConfig {
                reason: "RESERVED_SIZE is not a valid non-negative integer".to_string(),
            })?;
        }
        if let Ok(value) = std::env::var("MAX_DPU_THREAD_NUM") {
            self.max_dpu_thread_num = parse_positive(&value, "MAX_DPU_THREAD_NUM")? as u32;
        }
        if let Ok(value) = std::env::var("N_SIM") {
            self.n_sim = parse_positive(&value, "N_SIM")? as u32;
        }
        if let Ok(value) = std::env::var("TARGET_NODE_COUNT") {
            self.target_node_count = parse_positive(&value, "TARGET_NODE_COUNT")? as u64;
        }
        Ok(())
    }
}

fn parse_positive(value: &str, field: &'static str) -> Result<i64, ConfigurationError> {
    let parsed: i64 = value
        .parse()
        .map_err(|_| ConfigurationError::MalformedConfig {
            reason: format!("'{}' is not a valid integer", field),
        })?;
    if parsed <= 0 {
        return Err(ConfigurationError::NonPositiveValue {
            field,
            value: parsed,
        });
    }
    Ok(parsed)
}

/// Load a `PipelineConfig` from an optional YAML file, falling back to defaults
/// when `path` does not exist.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig, ConfigurationError> {
    let path = path.as_ref();
    let mut config = if path.exists() {
        let content = fs::read_to_string(path).map_err(|e| ConfigurationError::MalformedConfig {
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigurationError::MalformedConfig {
            reason: e.to_string(),
        })?
    } else {
        PipelineConfig::default()
    };
    config.apply_env_overrides()?;
    Ok(config)
}

/// Load and validate a `PipelineConfig`, running the staged pipeline in
/// [`crate::config::validation`].
pub fn load_and_validate_config<P: AsRef<Path>>(
    path: P,
) -> Result<PipelineConfig, ConfigurationError> {
    let config = load_config(path)?;
    crate::config::validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_absent() {
        let config = load_config("/nonexistent/path.yaml").unwrap();
        assert_eq!(config.dpu_num, DEFAULT_DPU_NUM);
        assert_eq!(config.mapping, Mapping::Round);
    }

    #[test]
    fn parses_mapping_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.yaml");
        fs::write(&path, "mapping: FENNEL\ndpu_num: 10\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.mapping, Mapping::Fennel);
        assert_eq!(config.dpu_num, 10);
    }

    #[test]
    fn env_override_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.yaml");
        fs::write(&path, "dpu_num: 10\n").unwrap();
        std::env::set_var("DPU_NUM", "7");
        let config = load_config(&path).unwrap();
        std::env::remove_var("DPU_NUM");
        assert_eq!(config.dpu_num, 7);
    }

    #[test]
    fn rejects_unknown_mapping() {
        let err = "BOGUS".parse::<Mapping>().unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownMapping { .. }));
    }

    #[test]
    fn usable_capacity_subtracts_reserved() {
        let config = PipelineConfig {
            dpu_size_limit: 1024,
            reserved_size: 128,
            ..PipelineConfig::default()
        };
        assert_eq!(config.usable_capacity(), 896);
    }
}
