// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Staged validation pipeline for [`PipelineConfig`](crate::config::env::PipelineConfig),
//! adapted from the teacher's three-stage validation shape (uniqueness →
//! references → cycles) onto the numeric/enum sanity checks this config
//! actually needs: capacity headroom, positivity of the DPU/thread/worker
//! counts, and a non-zero expansion cap.

use crate::config::env::PipelineConfig;
use crate::errors::ConfigurationError;

/// Run every validation stage in order, stopping at the first failure.
pub fn validate(config: &PipelineConfig) -> Result<(), ConfigurationError> {
    validate_dpu_num(config)?;
    validate_capacity(config)?;
    validate_thread_cap(config)?;
    validate_sim_workers(config)?;
    validate_target_node_count(config)?;
    Ok(())
}

fn validate_dpu_num(config: &PipelineConfig) -> Result<(), ConfigurationError> {
    if config.dpu_num == 0 {
        return Err(ConfigurationError::NonPositiveValue {
            field: "DPU_NUM",
            value: 0,
        });
    }
    Ok(())
}

fn validate_capacity(config: &PipelineConfig) -> Result<(), ConfigurationError> {
    if config.reserved_size >= config.dpu_size_limit {
        return Err(ConfigurationError::MalformedConfig {
            reason: format!(
                "RESERVED_SIZE ({}) must be smaller than DPU_SIZE_LIMIT ({})",
                config.reserved_size, config.dpu_size_limit
            ),
        });
    }
    Ok(())
}

fn validate_thread_cap(config: &PipelineConfig) -> Result<(), ConfigurationError> {
    if config.max_dpu_thread_num == 0 {
        return Err(ConfigurationError::NonPositiveValue {
            field: "MAX_DPU_THREAD_NUM",
            value: 0,
        });
    }
    Ok(())
}

fn validate_sim_workers(config: &PipelineConfig) -> Result<(), ConfigurationError> {
    if config.n_sim == 0 {
        return Err(ConfigurationError::NonPositiveValue {
            field: "N_SIM",
            value: 0,
        });
    }
    Ok(())
}

fn validate_target_node_count(config: &PipelineConfig) -> Result<(), ConfigurationError> {
    if config.target_node_count == 0 {
        return Err(ConfigurationError::NonPositiveValue {
            field: "TARGET_NODE_COUNT",
            value: 0,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_defaults() {
        assert!(validate(&PipelineConfig::default()).is_ok());
    }

    #[test]
    fn rejects_reserved_size_overflowing_capacity() {
        let config = PipelineConfig {
            dpu_size_limit: 128,
            reserved_size: 128,
            ..PipelineConfig::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn rejects_zero_dpu_num() {
        let config = PipelineConfig {
            dpu_num: 0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            validate(&config),
            Err(ConfigurationError::NonPositiveValue {
                field: "DPU_NUM",
                ..
            })
        ));
    }
}
