// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The onboarding coordinator.
//!
//! Turns a request (connector id, optional catalog, a way to obtain the
//! connector, properties) into a live connector whose providers sit in every
//! subsystem registry it supports. One attempt runs at a time; each attempt
//! walks the [`OnboardingState`] machine:
//!
//! 1. reserve the id (`DuplicateConnectorId`)
//! 2. resolve the factory (`UnknownConnectorType`)
//! 3. construct the instance (factory errors become `Construction`)
//! 4. probe every capability ([`CapabilityProbe`])
//! 5. publish in a fixed order, then the catalog's information schema
//!
//! Steps 1 to 4 leave no trace on failure. A failure during step 5 is a
//! [`OnboardError::PublicationFault`]: it is logged at error level and the
//! entries already published stay where they are.

use crate::backends::information_schema::{
    information_schema_connector_id, InformationSchemaMetadata, InformationSchemaSplitProvider,
    InformationSchemaStreamProvider,
};
use crate::config::consts::{DEFAULT_NODE_ID, DEFAULT_PAGE_SIZE, INFORMATION_SCHEMA_CONNECTOR_PREFIX};
use crate::engine::probe::{CapabilityProbe, StreamSource};
use crate::engine::publish::{PlanFault, PublicationPlan};
use crate::engine::state::{Attempt, OnboardingState};
use crate::errors::{OnboardError, RegistrationError};
use crate::model::{ConnectorId, SubsystemKind};
use crate::observability::messages::onboarding::{
    OnboardingAborted, OnboardingCompleted, OnboardingStarted, PublicationFault,
};
use crate::observability::messages::StructuredLog;
use crate::registry::{FactoryRegistry, InstanceRegistry, Subsystems};
use crate::traits::{Connector, ConnectorFactory};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Where the connector instance comes from.
#[derive(Clone)]
pub enum ConnectorSource {
    /// Look the factory up in the factory registry.
    TypeName(String),
    /// Use this factory without consulting the registry.
    Factory(Arc<dyn ConnectorFactory>),
    /// An already constructed connector; no factory step.
    Instance(Arc<dyn Connector>),
}

impl ConnectorSource {
    pub fn describe(&self) -> String {
        match self {
            ConnectorSource::TypeName(type_name) => type_name.clone(),
            ConnectorSource::Factory(factory) => format!("factory {}", factory.name()),
            ConnectorSource::Instance(_) => "instance".to_string(),
        }
    }
}

impl fmt::Debug for ConnectorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorSource::TypeName(type_name) => f.debug_tuple("TypeName").field(type_name).finish(),
            ConnectorSource::Factory(factory) => f.debug_tuple("Factory").field(&factory.name()).finish(),
            ConnectorSource::Instance(_) => f.write_str("Instance"),
        }
    }
}

impl From<&str> for ConnectorSource {
    fn from(type_name: &str) -> Self {
        ConnectorSource::TypeName(type_name.to_string())
    }
}

impl From<String> for ConnectorSource {
    fn from(type_name: String) -> Self {
        ConnectorSource::TypeName(type_name)
    }
}

/// One call to [`OnboardingCoordinator::onboard`].
#[derive(Debug, Clone)]
pub struct OnboardRequest {
    pub connector_id: ConnectorId,
    /// `None` onboards a global connector.
    pub catalog: Option<String>,
    pub source: ConnectorSource,
    pub properties: HashMap<String, String>,
}

impl OnboardRequest {
    pub fn new(
        connector_id: impl Into<ConnectorId>,
        catalog: Option<String>,
        source: impl Into<ConnectorSource>,
    ) -> Self {
        Self {
            connector_id: connector_id.into(),
            catalog,
            source: source.into(),
            properties: HashMap::new(),
        }
    }

    /// A catalog connector whose id is the catalog name.
    pub fn catalog(catalog: impl Into<String>, source: impl Into<ConnectorSource>) -> Self {
        let catalog = catalog.into();
        Self::new(catalog.clone(), Some(catalog), source)
    }

    pub fn global(connector_id: impl Into<ConnectorId>, source: impl Into<ConnectorSource>) -> Self {
        Self::new(connector_id, None, source)
    }

    pub fn with_properties(mut self, properties: HashMap<String, String>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// What a successful onboarding published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardReport {
    pub connector_id: ConnectorId,
    pub catalog: Option<String>,
    /// Registries that received a provider for `connector_id`, in order.
    pub published: Vec<SubsystemKind>,
    /// Id of the derived information schema connector, for catalog connectors.
    pub introspection_id: Option<ConnectorId>,
    pub stream_source: StreamSource,
}

/// Knobs that do not change onboarding semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorOptions {
    /// Host named in information schema splits.
    pub node_id: String,
    /// Rows per page when a record set provider is adapted.
    pub page_size: usize,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            node_id: DEFAULT_NODE_ID.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Serializes onboarding attempts and owns the connector instance registry.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use the_switchyard::backends::memory::MemoryConnectorFactory;
/// use the_switchyard::engine::{OnboardRequest, OnboardingCoordinator};
/// use the_switchyard::model::SubsystemKind;
/// use the_switchyard::registry::{FactoryRegistry, Subsystems};
///
/// let coordinator = OnboardingCoordinator::new(Arc::new(FactoryRegistry::new()), Subsystems::in_memory());
/// coordinator
///     .register_connector_type("memory", Arc::new(MemoryConnectorFactory::new()))
///     .unwrap();
///
/// let report = coordinator
///     .onboard(OnboardRequest::catalog("sales", "memory"))
///     .unwrap();
///
/// assert_eq!(report.introspection_id.as_deref(), Some("$info_schema@sales"));
/// assert!(!report.published.contains(&SubsystemKind::RecordSink));
/// ```
pub struct OnboardingCoordinator {
    factories: Arc<FactoryRegistry>,
    instances: InstanceRegistry,
    subsystems: Subsystems,
    probe: CapabilityProbe,
    options: CoordinatorOptions,
    lock: Mutex<()>,
}

impl OnboardingCoordinator {
    pub fn new(factories: Arc<FactoryRegistry>, subsystems: Subsystems) -> Self {
        Self::with_options(factories, subsystems, CoordinatorOptions::default())
    }

    pub fn with_options(
        factories: Arc<FactoryRegistry>,
        subsystems: Subsystems,
        options: CoordinatorOptions,
    ) -> Self {
        Self {
            factories,
            instances: InstanceRegistry::new(),
            subsystems,
            probe: CapabilityProbe::new(options.page_size),
            options,
            lock: Mutex::new(()),
        }
    }

    /// Does not wait for an onboarding attempt in progress.
    ///
    /// # Errors
    ///
    /// `DuplicateFactory` if `type_name` is taken.
    pub fn register_connector_type(
        &self,
        type_name: impl Into<String>,
        factory: Arc<dyn ConnectorFactory>,
    ) -> Result<(), RegistrationError> {
        self.factories.register(type_name, factory)
    }

    /// Onboard a catalog connector whose id is the catalog name.
    pub fn create_connection(
        &self,
        catalog: &str,
        type_name: &str,
        properties: HashMap<String, String>,
    ) -> Result<OnboardReport, OnboardError> {
        self.onboard(OnboardRequest::catalog(catalog, type_name).with_properties(properties))
    }

    /// Onboard a prebuilt connector whose metadata is visible across catalogs.
    pub fn add_global_connector(
        &self,
        connector_id: &str,
        connector: Arc<dyn Connector>,
    ) -> Result<OnboardReport, OnboardError> {
        self.onboard(OnboardRequest::global(
            connector_id,
            ConnectorSource::Instance(connector),
        ))
    }

    /// Run one onboarding attempt to `Done`, `Aborted` or `Fatal`.
    ///
    /// # Errors
    ///
    /// See [`OnboardError`]. Only `PublicationFault` leaves registry entries
    /// behind; check [`OnboardError::is_fatal`].
    ///
    /// The instance is committed before its providers are published, so a
    /// concurrent [`connector`](Self::connector) call can see it live while its
    /// registry entries are still being added.
    pub fn onboard(&self, request: OnboardRequest) -> Result<OnboardReport, OnboardError> {
        let source = request.source.describe();
        let started = OnboardingStarted {
            connector_id: &request.connector_id,
            catalog: request.catalog.as_deref(),
            source: &source,
        };
        started.log();
        let span = started.span("onboard");
        let _entered = span.enter();

        let _guard = self.lock.lock();
        let clock = Instant::now();
        let mut attempt = Attempt::new(&request.connector_id);

        match self.run(&request, &mut attempt) {
            Ok(report) => {
                OnboardingCompleted {
                    connector_id: &report.connector_id,
                    published: &report.published,
                    introspection_id: report.introspection_id.as_deref(),
                    duration: clock.elapsed(),
                }
                .log();
                Ok(report)
            }
            Err(error) => {
                if !error.is_fatal() {
                    OnboardingAborted {
                        connector_id: &request.connector_id,
                        reached: attempt.state(),
                        error: &error,
                    }
                    .log();
                    attempt.advance(OnboardingState::Aborted);
                }
                Err(error)
            }
        }
    }

    fn run(&self, request: &OnboardRequest, attempt: &mut Attempt<'_>) -> Result<OnboardReport, OnboardError> {
        let connector_id = request.connector_id.as_str();
        let catalog = request.catalog.as_deref();

        if connector_id.starts_with(INFORMATION_SCHEMA_CONNECTOR_PREFIX) {
            return Err(RegistrationError::ReservedConnectorId {
                connector_id: connector_id.to_string(),
                prefix: INFORMATION_SCHEMA_CONNECTOR_PREFIX,
            }
            .into());
        }

        let reservation = self.instances.reserve(connector_id)?;

        if let Some(catalog) = catalog {
            if self.subsystems.metadata.catalog_metadata(catalog).is_some() {
                return Err(RegistrationError::DuplicateCatalog {
                    catalog: catalog.to_string(),
                }
                .into());
            }
        }

        let connector = match &request.source {
            ConnectorSource::TypeName(type_name) => {
                let factory = self.factories.lookup(type_name)?;
                attempt.advance(OnboardingState::Resolved);
                instantiate(connector_id, factory.as_ref(), &request.properties)?
            }
            ConnectorSource::Factory(factory) => {
                attempt.advance(OnboardingState::Resolved);
                instantiate(connector_id, factory.as_ref(), &request.properties)?
            }
            ConnectorSource::Instance(connector) => {
                attempt.advance(OnboardingState::Resolved);
                Arc::clone(connector)
            }
        };
        if let Some(existing) = self.instances.holder_of(&connector) {
            return Err(RegistrationError::InstanceAlreadyRegistered {
                connector_id: connector_id.to_string(),
                existing,
            }
            .into());
        }
        attempt.advance(OnboardingState::Instantiated);

        let capabilities = self.probe.probe(connector_id, connector.as_ref())?;
        attempt.advance(OnboardingState::Probed);

        let stream_source = capabilities.stream_source();
        let mut plan = PublicationPlan::for_connector(capabilities, catalog);
        let introspection_id = catalog.map(|catalog| {
            let introspection_id = information_schema_connector_id(connector_id);
            plan.add_information_schema(
                &introspection_id,
                catalog,
                Arc::new(InformationSchemaMetadata::new(catalog)),
                Arc::new(InformationSchemaSplitProvider::new(self.options.node_id.clone())),
                Arc::new(InformationSchemaStreamProvider::new(
                    catalog,
                    Arc::clone(&self.subsystems.metadata),
                    self.options.page_size,
                )),
            );
            introspection_id
        });

        reservation.commit(Arc::clone(&connector));
        attempt.advance(OnboardingState::Published);

        let applied = match plan.apply(&self.subsystems) {
            Ok(applied) => applied,
            Err(fault) => {
                let error = self.fault(connector_id, fault);
                attempt.advance(OnboardingState::Fatal);
                return Err(error);
            }
        };
        attempt.advance(OnboardingState::Done);

        Ok(OnboardReport {
            connector_id: connector_id.to_string(),
            catalog: catalog.map(str::to_string),
            published: published_by(connector_id, &applied),
            introspection_id,
            stream_source,
        })
    }

    fn fault(&self, connector_id: &str, fault: PlanFault) -> OnboardError {
        let published = published_by(connector_id, &fault.applied);
        PublicationFault {
            connector_id: &fault.connector_id,
            subsystem: fault.subsystem,
            published: &published,
            error: &fault.source,
        }
        .log();
        OnboardError::PublicationFault {
            connector_id: fault.connector_id,
            subsystem: fault.subsystem,
            source: fault.source,
        }
    }

    pub fn factories(&self) -> &Arc<FactoryRegistry> {
        &self.factories
    }

    pub fn instances(&self) -> &InstanceRegistry {
        &self.instances
    }

    pub fn subsystems(&self) -> &Subsystems {
        &self.subsystems
    }

    pub fn options(&self) -> &CoordinatorOptions {
        &self.options
    }

    /// A live connector by id.
    pub fn connector(&self, connector_id: &str) -> Result<Arc<dyn Connector>, RegistrationError> {
        self.instances.get(connector_id)
    }
}

fn instantiate(
    connector_id: &str,
    factory: &dyn ConnectorFactory,
    properties: &HashMap<String, String>,
) -> Result<Arc<dyn Connector>, OnboardError> {
    factory
        .create(connector_id, properties)
        .map_err(|source| OnboardError::Construction {
            connector_id: connector_id.to_string(),
            source,
        })
}

fn published_by(connector_id: &str, applied: &[(ConnectorId, SubsystemKind)]) -> Vec<SubsystemKind> {
    applied
        .iter()
        .filter(|(id, _)| id == connector_id)
        .map(|(_, kind)| *kind)
        .collect()
}
