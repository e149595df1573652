// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Errors that can occur while loading a catalog configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config file extension for '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors found while validating catalog and global connector entries
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A catalog or global connector has an empty name
    EmptyConnectorId {
        /// Position of the entry in its list
        index: usize,
    },
    /// An entry does not name a connector type
    EmptyConnectorType {
        /// The connector id of the entry
        connector_id: String,
    },
    /// Two entries share the same connector id
    DuplicateConnectorId {
        /// The duplicate connector id
        connector_id: String,
    },
    /// An id collides with the namespace reserved for information schema connectors
    ReservedPrefix {
        /// The offending connector id
        connector_id: String,
        /// The reserved prefix
        prefix: &'static str,
    },
    /// The record set adapter page size is zero
    InvalidPageSize,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyConnectorId { index } => {
                write!(f, "Entry #{} has an empty name", index)
            }
            ValidationError::EmptyConnectorType { connector_id } => {
                write!(f, "Connector '{}' does not name a connector type", connector_id)
            }
            ValidationError::DuplicateConnectorId { connector_id } => {
                write!(f, "Duplicate connector id: '{}'", connector_id)
            }
            ValidationError::ReservedPrefix {
                connector_id,
                prefix,
            } => {
                write!(
                    f,
                    "Connector id '{}' uses the reserved prefix '{}'",
                    connector_id, prefix
                )
            }
            ValidationError::InvalidPageSize => {
                write!(f, "coordinator.page_size must be at least 1")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
