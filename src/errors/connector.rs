// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised by connector factories and connector internals.
///
/// The coordinator passes factory errors through unchanged inside
/// [`OnboardError::Construction`](super::OnboardError::Construction).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Missing required property '{0}'")]
    MissingProperty(String),

    #[error("Invalid value '{value}' for property '{name}': {reason}")]
    InvalidProperty {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Unknown table '{0}'")]
    UnknownTable(String),

    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("Connector error: {0}")]
    Internal(String),
}
