// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::SubsystemKind;
use thiserror::Error;

/// An insert rejected by a subsystem registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("{subsystem} registry already holds a provider for '{connector_id}'")]
    DuplicateEntry {
        subsystem: SubsystemKind,
        connector_id: String,
    },

    #[error("{subsystem} registry rejected '{connector_id}': {reason}")]
    Rejected {
        subsystem: SubsystemKind,
        connector_id: String,
        reason: String,
    },
}
