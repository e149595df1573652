// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The umbrella error for a single onboarding attempt.

use crate::engine::OnboardingState;
use crate::errors::{ConnectorError, ProbeError, PublishError, RegistrationError};
use crate::model::SubsystemKind;
use thiserror::Error;

/// Why an onboarding attempt did not reach `Done`.
///
/// Every variant except [`OnboardError::PublicationFault`] is raised before
/// any subsystem registry is mutated and leaves no trace of the attempt.
#[derive(Error, Debug)]
pub enum OnboardError {
    /// Duplicate id, unknown type name.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// The factory refused to build the connector.
    #[error("Failed to create connector '{connector_id}': {source}")]
    Construction {
        connector_id: String,
        #[source]
        source: ConnectorError,
    },

    /// A mandatory capability is missing or an accessor misbehaved.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// A registry failed an insert after probing certified the connector.
    ///
    /// Registries published before the failing one keep their entries.
    #[error("Publication of connector '{connector_id}' to the {subsystem} registry failed; registries are no longer consistent: {source}")]
    PublicationFault {
        connector_id: String,
        subsystem: SubsystemKind,
        #[source]
        source: PublishError,
    },
}

impl OnboardError {
    /// True when the registries may be mutually inconsistent and the hosting
    /// process needs intervention.
    pub fn is_fatal(&self) -> bool {
        matches!(self, OnboardError::PublicationFault { .. })
    }

    /// The absorbing state the attempt ended in.
    pub fn state(&self) -> OnboardingState {
        if self.is_fatal() {
            OnboardingState::Fatal
        } else {
            OnboardingState::Aborted
        }
    }
}
