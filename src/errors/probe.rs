// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::CapabilityKind;
use thiserror::Error;

/// Capability probe failures. Each one aborts onboarding before any registry
/// is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Connector '{connector_id}' can not provide metadata")]
    MissingMetadata { connector_id: String },

    #[error("Connector '{connector_id}' does not have a split provider")]
    MissingSplitProvider { connector_id: String },

    #[error("Connector '{connector_id}' does not have a data stream or record set provider")]
    MissingStreamCapability { connector_id: String },

    #[error("Connector '{connector_id}' does not have a handle resolver")]
    MissingHandleResolver { connector_id: String },

    /// The accessor reported success but handed back nothing.
    #[error("Connector '{connector_id}' returned an empty {capability}")]
    MalformedConnector {
        connector_id: String,
        capability: CapabilityKind,
    },
}
