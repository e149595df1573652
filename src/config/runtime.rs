// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::memory::MemoryConnectorFactory;
use crate::config::Config;
use crate::engine::{CoordinatorOptions, OnboardReport, OnboardRequest, OnboardingCoordinator};
use crate::errors::{OnboardError, RegistrationError};
use crate::registry::{FactoryRegistry, Subsystems};
use serde::Serialize;
use std::sync::Arc;

/// Runtime builder - creates a coordinator with its registries from configuration.
///
/// # Examples
///
/// ```
/// use the_switchyard::config::{parse_yaml, RuntimeBuilder};
///
/// let config = parse_yaml("catalogs:\n  - name: sales\n    connector: memory\n").unwrap();
///
/// let coordinator = RuntimeBuilder::from_config(&config).unwrap();
/// let summary = RuntimeBuilder::onboard_all(&coordinator, &config).unwrap();
///
/// assert_eq!(summary.onboarded.len(), 1);
/// assert!(summary.failed.is_empty());
/// ```
pub struct RuntimeBuilder;

/// Outcome of onboarding every configured entry.
#[derive(Debug, Default, Serialize)]
pub struct OnboardingSummary {
    pub onboarded: Vec<OnboardReport>,
    pub failed: Vec<FailedOnboarding>,
}

#[derive(Debug, Serialize)]
pub struct FailedOnboarding {
    pub connector_id: String,
    pub error: String,
}

impl RuntimeBuilder {
    /// Build fresh in-memory registries and a coordinator with the built-in
    /// connector types registered.
    pub fn from_config(cfg: &Config) -> Result<OnboardingCoordinator, RegistrationError> {
        let factories = Arc::new(FactoryRegistry::new());
        factories.register_factory(Arc::new(MemoryConnectorFactory::new()))?;

        let options = CoordinatorOptions {
            node_id: cfg.coordinator.get_node_id().to_string(),
            page_size: cfg.coordinator.get_page_size(),
        };
        Ok(OnboardingCoordinator::with_options(
            factories,
            Subsystems::in_memory(),
            options,
        ))
    }

    /// Onboard globals first, then catalogs, in file order.
    ///
    /// Entries that abort are recorded in the summary and the rest continue.
    ///
    /// # Errors
    ///
    /// The first fatal [`OnboardError::PublicationFault`]; nothing after it is
    /// attempted.
    pub fn onboard_all(
        coordinator: &OnboardingCoordinator,
        cfg: &Config,
    ) -> Result<OnboardingSummary, OnboardError> {
        let requests = cfg
            .globals
            .iter()
            .map(|g| {
                OnboardRequest::global(g.id.as_str(), g.connector.as_str())
                    .with_properties(g.properties.clone())
            })
            .chain(cfg.catalogs.iter().map(|c| {
                OnboardRequest::catalog(c.name.as_str(), c.connector.as_str())
                    .with_properties(c.properties.clone())
            }));

        let mut summary = OnboardingSummary::default();
        for request in requests {
            let connector_id = request.connector_id.clone();
            match coordinator.onboard(request) {
                Ok(report) => summary.onboarded.push(report),
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => summary.failed.push(FailedOnboarding {
                    connector_id,
                    error: error.to_string(),
                }),
            }
        }
        Ok(summary)
    }
}
