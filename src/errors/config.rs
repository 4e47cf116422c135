// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors raised while loading and validating the process-wide configuration (§6A, §7).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// `MAPPING` named a partitioner strategy this build doesn't recognize.
    UnknownMapping { value: String },
    /// A numeric config field that must be positive was zero or negative.
    NonPositiveValue { field: &'static str, value: i64 },
    /// A required environment variable was absent and the config file supplied no default.
    MissingRequired { field: &'static str },
    /// The YAML config file could not be parsed.
    MalformedConfig { reason: String },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::UnknownMapping { value } => {
                write!(f, "MAPPING '{}' is not one of ROUND, RANDOM, FENNEL", value)
            }
            ConfigurationError::NonPositiveValue { field, value } => {
                write!(f, "'{}' must be positive, got {}", field, value)
            }
            ConfigurationError::MissingRequired { field } => {
                write!(f, "required configuration value '{}' is missing", field)
            }
            ConfigurationError::MalformedConfig { reason } => {
                write!(f, "configuration file could not be parsed: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
