// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for onboarding attempts.
//!
//! This module contains message types for logging events related to:
//! * Onboarding attempt lifecycle (start, completion, abort)
//! * State machine transitions
//! * Capability probe outcomes
//! * Publication faults

use crate::engine::OnboardingState;
use crate::model::SubsystemKind;
use crate::observability::messages::StructuredLog;
use crate::traits::CapabilityKind;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Onboarding of a connector was requested.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_switchyard::observability::messages::onboarding::OnboardingStarted;
///
/// let msg = OnboardingStarted {
///     connector_id: "sales",
///     catalog: Some("sales"),
///     source: "memory",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct OnboardingStarted<'a> {
    pub connector_id: &'a str,
    pub catalog: Option<&'a str>,
    pub source: &'a str,
}

impl Display for OnboardingStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.catalog {
            Some(catalog) => write!(
                f,
                "Onboarding connector '{}' ({}) for catalog '{}'",
                self.connector_id, self.source, catalog
            ),
            None => write!(
                f,
                "Onboarding global connector '{}' ({})",
                self.connector_id, self.source
            ),
        }
    }
}

impl StructuredLog for OnboardingStarted<'_> {
    fn log(&self) {
        tracing::info!(
            connector_id = self.connector_id,
            catalog = self.catalog,
            source = self.source,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "onboarding",
            span_name = name,
            connector_id = self.connector_id,
            catalog = self.catalog,
            source = self.source,
        )
    }
}

/// The onboarding state machine advanced.
///
/// # Log Level
/// `debug!` - Detailed progress
pub struct StateTransition<'a> {
    pub connector_id: &'a str,
    pub from: OnboardingState,
    pub to: OnboardingState,
}

impl Display for StateTransition<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connector '{}': {} -> {}",
            self.connector_id, self.from, self.to
        )
    }
}

impl StructuredLog for StateTransition<'_> {
    fn log(&self) {
        tracing::debug!(
            connector_id = self.connector_id,
            from = %self.from,
            to = %self.to,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "state_transition",
            span_name = name,
            connector_id = self.connector_id,
            from = %self.from,
            to = %self.to,
        )
    }
}

/// A connector declared an optional capability unsupported.
///
/// # Log Level
/// `debug!` - Expected outcome, not an error
///
/// # Example
/// ```
/// use the_switchyard::observability::messages::onboarding::CapabilityUnsupported;
/// use the_switchyard::traits::CapabilityKind;
///
/// let msg = CapabilityUnsupported {
///     connector_id: "sales",
///     capability: CapabilityKind::IndexResolver,
/// };
/// assert_eq!(msg.to_string(), "Connector 'sales' does not support index resolver");
/// ```
pub struct CapabilityUnsupported<'a> {
    pub connector_id: &'a str,
    pub capability: CapabilityKind,
}

impl Display for CapabilityUnsupported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connector '{}' does not support {}",
            self.connector_id, self.capability
        )
    }
}

impl StructuredLog for CapabilityUnsupported<'_> {
    fn log(&self) {
        tracing::debug!(
            connector_id = self.connector_id,
            capability = %self.capability,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "capability_unsupported",
            span_name = name,
            connector_id = self.connector_id,
            capability = %self.capability,
        )
    }
}

/// No stream provider was declared, so the record set provider was wrapped.
///
/// # Log Level
/// `debug!` - Detailed progress
pub struct RecordSetAdapted<'a> {
    pub connector_id: &'a str,
    pub page_size: usize,
}

impl Display for RecordSetAdapted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connector '{}' streams through its record set provider (page_size={})",
            self.connector_id, self.page_size
        )
    }
}

impl StructuredLog for RecordSetAdapted<'_> {
    fn log(&self) {
        tracing::debug!(
            connector_id = self.connector_id,
            page_size = self.page_size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "record_set_adapted",
            span_name = name,
            connector_id = self.connector_id,
            page_size = self.page_size,
        )
    }
}

/// Onboarding stopped before anything was published.
///
/// # Log Level
/// `warn!` - Rejected request, no side effects
///
/// # Example
/// ```
/// use the_switchyard::engine::OnboardingState;
/// use the_switchyard::observability::messages::onboarding::OnboardingAborted;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "no split provider");
/// let msg = OnboardingAborted {
///     connector_id: "sales",
///     reached: OnboardingState::Instantiated,
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct OnboardingAborted<'a> {
    pub connector_id: &'a str,
    pub reached: OnboardingState,
    pub error: &'a dyn std::error::Error,
}

impl Display for OnboardingAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Onboarding of connector '{}' aborted after {}: {}",
            self.connector_id, self.reached, self.error
        )
    }
}

impl StructuredLog for OnboardingAborted<'_> {
    fn log(&self) {
        tracing::warn!(
            connector_id = self.connector_id,
            reached = %self.reached,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "onboarding_aborted",
            span_name = name,
            connector_id = self.connector_id,
            reached = %self.reached,
            error = %self.error,
        )
    }
}

/// A registry failed an insert mid-publication. The registries are no longer
/// mutually consistent.
///
/// # Log Level
/// `error!` - Requires process-level intervention
pub struct PublicationFault<'a> {
    pub connector_id: &'a str,
    pub subsystem: SubsystemKind,
    pub published: &'a [SubsystemKind],
    pub error: &'a dyn std::error::Error,
}

impl Display for PublicationFault<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "FATAL: publishing connector '{}' to the {} registry failed after {} registries were updated: {}",
            self.connector_id,
            self.subsystem,
            self.published.len(),
            self.error
        )
    }
}

impl StructuredLog for PublicationFault<'_> {
    fn log(&self) {
        tracing::error!(
            connector_id = self.connector_id,
            subsystem = self.subsystem.as_str(),
            published = ?self.published,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "publication_fault",
            span_name = name,
            connector_id = self.connector_id,
            subsystem = self.subsystem.as_str(),
            error = %self.error,
        )
    }
}

/// Onboarding reached `Done`.
///
/// # Log Level
/// `info!` - Important operational event
pub struct OnboardingCompleted<'a> {
    pub connector_id: &'a str,
    pub published: &'a [SubsystemKind],
    pub introspection_id: Option<&'a str>,
    pub duration: std::time::Duration,
}

impl Display for OnboardingCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connector '{}' onboarded into {} registries in {:?}",
            self.connector_id,
            self.published.len(),
            self.duration
        )?;
        if let Some(introspection_id) = self.introspection_id {
            write!(f, " (information schema: '{}')", introspection_id)?;
        }
        Ok(())
    }
}

impl StructuredLog for OnboardingCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            connector_id = self.connector_id,
            published = ?self.published,
            introspection_id = self.introspection_id,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "onboarding_completed",
            span_name = name,
            connector_id = self.connector_id,
            duration = ?self.duration,
        )
    }
}
