// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Onboarding engine: probe, publication plan, state machine and the
//! coordinator that drives them.

pub mod coordinator;
pub mod probe;
pub(crate) mod publish;
pub mod state;

pub use coordinator::{
    ConnectorSource, CoordinatorOptions, OnboardReport, OnboardRequest, OnboardingCoordinator,
};
pub use probe::{CapabilityProbe, ProbeOutcome, ProbedCapabilities, StreamSource};
pub use state::OnboardingState;
