// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by the factory and connector instance registries.

use thiserror::Error;

/// Rejections from the factory and instance registries.
///
/// All of these are raised before anything is published, so the caller can
/// fix the request and try again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A factory is already registered under this connector type name.
    #[error("Connector type '{type_name}' is already registered")]
    DuplicateFactory { type_name: String },

    /// No factory is registered under this connector type name.
    #[error("No factory for connector type '{type_name}'")]
    UnknownConnectorType { type_name: String },

    /// A connector instance already exists (or is being created) under this id.
    #[error("A connector '{connector_id}' already exists")]
    DuplicateConnectorId { connector_id: String },

    /// The instance is already live under another connector id.
    #[error("Connector '{connector_id}' reuses the instance already registered as '{existing}'")]
    InstanceAlreadyRegistered {
        connector_id: String,
        existing: String,
    },

    /// The catalog is already served by another connector.
    #[error("Catalog '{catalog}' is already bound to a connector")]
    DuplicateCatalog { catalog: String },

    /// The id falls in the namespace reserved for derived connectors.
    #[error("Connector id '{connector_id}' uses the reserved prefix '{prefix}'")]
    ReservedConnectorId {
        connector_id: String,
        prefix: &'static str,
    },

    /// No live connector instance exists under this id.
    #[error("Connector '{connector_id}' not found")]
    NotFound { connector_id: String },
}
