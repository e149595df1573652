// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for factory registration and provider publication.

use crate::model::SubsystemKind;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A connector factory was registered.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchyard::observability::messages::registry::FactoryRegistered;
///
/// let msg = FactoryRegistered { type_name: "memory" };
/// assert_eq!(msg.to_string(), "Registered connector factory 'memory'");
/// ```
pub struct FactoryRegistered<'a> {
    pub type_name: &'a str,
}

impl Display for FactoryRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Registered connector factory '{}'", self.type_name)
    }
}

impl StructuredLog for FactoryRegistered<'_> {
    fn log(&self) {
        tracing::info!(type_name = self.type_name, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("factory_registered", span_name = name, type_name = self.type_name)
    }
}

/// A provider was inserted into a subsystem registry.
///
/// # Log Level
/// `debug!` - One event per registry per connector
pub struct ProviderPublished<'a> {
    pub subsystem: SubsystemKind,
    pub connector_id: &'a str,
}

impl Display for ProviderPublished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Published {} provider for connector '{}'",
            self.subsystem, self.connector_id
        )
    }
}

impl StructuredLog for ProviderPublished<'_> {
    fn log(&self) {
        tracing::debug!(
            subsystem = self.subsystem.as_str(),
            connector_id = self.connector_id,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "provider_published",
            span_name = name,
            subsystem = self.subsystem.as_str(),
            connector_id = self.connector_id,
        )
    }
}
