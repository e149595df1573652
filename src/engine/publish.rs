// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Publication: phase two of onboarding.
//!
//! A [`PublicationPlan`] is assembled from [`ProbedCapabilities`] (and, for
//! catalog connectors, the derived information schema providers) before any
//! registry is touched, then applied step by step in a fixed order.

use crate::engine::probe::ProbedCapabilities;
use crate::errors::PublishError;
use crate::model::{ConnectorId, SubsystemKind};
use crate::registry::Subsystems;
use crate::traits::{
    ConnectorMetadata, HandleResolver, IndexResolver, RecordSinkProvider, SplitProvider,
    StreamProvider,
};
use std::sync::Arc;

/// One registry insert.
pub(crate) enum Publication {
    CatalogMetadata {
        connector_id: ConnectorId,
        catalog: String,
        metadata: Arc<dyn ConnectorMetadata>,
    },
    InformationSchemaMetadata {
        connector_id: ConnectorId,
        catalog: String,
        metadata: Arc<dyn ConnectorMetadata>,
    },
    GlobalMetadata {
        connector_id: ConnectorId,
        metadata: Arc<dyn ConnectorMetadata>,
    },
    Split {
        connector_id: ConnectorId,
        provider: Arc<dyn SplitProvider>,
    },
    HandleResolver {
        connector_id: ConnectorId,
        resolver: Arc<dyn HandleResolver>,
    },
    DataStream {
        connector_id: ConnectorId,
        provider: Arc<dyn StreamProvider>,
    },
    RecordSink {
        connector_id: ConnectorId,
        provider: Arc<dyn RecordSinkProvider>,
    },
    Index {
        connector_id: ConnectorId,
        resolver: Arc<dyn IndexResolver>,
    },
}

impl Publication {
    pub(crate) fn connector_id(&self) -> &str {
        match self {
            Publication::CatalogMetadata { connector_id, .. }
            | Publication::InformationSchemaMetadata { connector_id, .. }
            | Publication::GlobalMetadata { connector_id, .. }
            | Publication::Split { connector_id, .. }
            | Publication::HandleResolver { connector_id, .. }
            | Publication::DataStream { connector_id, .. }
            | Publication::RecordSink { connector_id, .. }
            | Publication::Index { connector_id, .. } => connector_id,
        }
    }

    pub(crate) fn subsystem(&self) -> SubsystemKind {
        match self {
            Publication::CatalogMetadata { .. }
            | Publication::InformationSchemaMetadata { .. }
            | Publication::GlobalMetadata { .. } => SubsystemKind::Metadata,
            Publication::Split { .. } => SubsystemKind::Split,
            Publication::HandleResolver { .. } => SubsystemKind::HandleResolver,
            Publication::DataStream { .. } => SubsystemKind::DataStream,
            Publication::RecordSink { .. } => SubsystemKind::RecordSink,
            Publication::Index { .. } => SubsystemKind::Index,
        }
    }

    fn apply(self, subsystems: &Subsystems) -> Result<(), PublishError> {
        match self {
            Publication::CatalogMetadata {
                connector_id,
                catalog,
                metadata,
            } => subsystems
                .metadata
                .add_connector_metadata(&connector_id, &catalog, metadata),
            Publication::InformationSchemaMetadata {
                connector_id,
                catalog,
                metadata,
            } => subsystems
                .metadata
                .add_information_schema_metadata(&connector_id, &catalog, metadata),
            Publication::GlobalMetadata {
                connector_id,
                metadata,
            } => subsystems
                .metadata
                .add_global_schema_metadata(&connector_id, metadata),
            Publication::Split {
                connector_id,
                provider,
            } => subsystems.splits.add_provider(&connector_id, provider),
            Publication::HandleResolver {
                connector_id,
                resolver,
            } => subsystems.handle_resolvers.add_provider(&connector_id, resolver),
            Publication::DataStream {
                connector_id,
                provider,
            } => subsystems.data_streams.add_provider(&connector_id, provider),
            Publication::RecordSink {
                connector_id,
                provider,
            } => subsystems.record_sinks.add_provider(&connector_id, provider),
            Publication::Index {
                connector_id,
                resolver,
            } => subsystems.indexes.add_provider(&connector_id, resolver),
        }
    }
}

/// A registry refused an insert part way through a plan.
pub(crate) struct PlanFault {
    pub connector_id: ConnectorId,
    pub subsystem: SubsystemKind,
    /// Inserts that had already succeeded, in order.
    pub applied: Vec<(ConnectorId, SubsystemKind)>,
    pub source: PublishError,
}

/// Ordered registry inserts for one onboarding attempt.
#[derive(Default)]
pub(crate) struct PublicationPlan {
    steps: Vec<Publication>,
}

impl PublicationPlan {
    /// Metadata (catalog or global), split, handle resolver, data stream,
    /// then record sink and index when present.
    pub(crate) fn for_connector(capabilities: ProbedCapabilities, catalog: Option<&str>) -> Self {
        let parts = capabilities.into_parts();
        let connector_id = parts.connector_id;

        let mut steps = vec![match catalog {
            Some(catalog) => Publication::CatalogMetadata {
                connector_id: connector_id.clone(),
                catalog: catalog.to_string(),
                metadata: parts.metadata,
            },
            None => Publication::GlobalMetadata {
                connector_id: connector_id.clone(),
                metadata: parts.metadata,
            },
        }];

        steps.push(Publication::Split {
            connector_id: connector_id.clone(),
            provider: parts.split_provider,
        });
        steps.push(Publication::HandleResolver {
            connector_id: connector_id.clone(),
            resolver: parts.handle_resolver,
        });
        steps.push(Publication::DataStream {
            connector_id: connector_id.clone(),
            provider: parts.stream_provider,
        });
        if let Some(provider) = parts.record_sink_provider {
            steps.push(Publication::RecordSink {
                connector_id: connector_id.clone(),
                provider,
            });
        }
        if let Some(resolver) = parts.index_resolver {
            steps.push(Publication::Index {
                connector_id,
                resolver,
            });
        }

        Self { steps }
    }

    /// Append the information schema connector derived for `catalog`.
    pub(crate) fn add_information_schema(
        &mut self,
        connector_id: &str,
        catalog: &str,
        metadata: Arc<dyn ConnectorMetadata>,
        split_provider: Arc<dyn SplitProvider>,
        stream_provider: Arc<dyn StreamProvider>,
    ) {
        self.steps.push(Publication::InformationSchemaMetadata {
            connector_id: connector_id.to_string(),
            catalog: catalog.to_string(),
            metadata,
        });
        self.steps.push(Publication::Split {
            connector_id: connector_id.to_string(),
            provider: split_provider,
        });
        self.steps.push(Publication::DataStream {
            connector_id: connector_id.to_string(),
            provider: stream_provider,
        });
    }

    /// Apply every step in order, stopping at the first refusal. Earlier
    /// steps are not undone.
    pub(crate) fn apply(
        self,
        subsystems: &Subsystems,
    ) -> Result<Vec<(ConnectorId, SubsystemKind)>, PlanFault> {
        let mut applied = Vec::with_capacity(self.steps.len());
        for step in self.steps {
            let connector_id = step.connector_id().to_string();
            let subsystem = step.subsystem();
            if let Err(source) = step.apply(subsystems) {
                return Err(PlanFault {
                    connector_id,
                    subsystem,
                    applied,
                    source,
                });
            }
            applied.push((connector_id, subsystem));
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{Accessor, StubConnector, StubMetadata, StubSplitProvider, StubStreamProvider};
    use crate::engine::probe::CapabilityProbe;

    fn capabilities(connector: &StubConnector) -> ProbedCapabilities {
        CapabilityProbe::new(8).probe("sales", connector).unwrap()
    }

    fn order(plan: &PublicationPlan) -> Vec<(String, SubsystemKind)> {
        plan.steps
            .iter()
            .map(|step| (step.connector_id().to_string(), step.subsystem()))
            .collect()
    }

    #[test]
    fn test_plan_order_for_complete_connector() {
        let plan = PublicationPlan::for_connector(capabilities(&StubConnector::complete()), Some("sales"));
        let kinds: Vec<SubsystemKind> = order(&plan).into_iter().map(|(_, kind)| kind).collect();
        assert_eq!(
            kinds,
            vec![
                SubsystemKind::Metadata,
                SubsystemKind::Split,
                SubsystemKind::HandleResolver,
                SubsystemKind::DataStream,
                SubsystemKind::RecordSink,
                SubsystemKind::Index,
            ]
        );
        assert!(matches!(plan.steps[0], Publication::CatalogMetadata { .. }));
    }

    #[test]
    fn test_plan_skips_absent_optional_capabilities() {
        let connector = StubConnector::complete()
            .with_record_sink_provider(Accessor::Unsupported)
            .with_index_resolver(Accessor::Unsupported);
        let plan = PublicationPlan::for_connector(capabilities(&connector), None);
        assert_eq!(plan.steps.len(), 4);
        assert!(matches!(plan.steps[0], Publication::GlobalMetadata { .. }));
    }

    #[test]
    fn test_information_schema_steps_follow_parent() {
        let mut plan = PublicationPlan::for_connector(capabilities(&StubConnector::complete()), Some("sales"));
        plan.add_information_schema(
            "$info_schema@sales",
            "sales",
            Arc::new(StubMetadata::empty()),
            Arc::new(StubSplitProvider::new("$info_schema@sales")),
            Arc::new(StubStreamProvider::default()),
        );

        let tail: Vec<(String, SubsystemKind)> = order(&plan).into_iter().skip(6).collect();
        assert_eq!(
            tail,
            vec![
                ("$info_schema@sales".to_string(), SubsystemKind::Metadata),
                ("$info_schema@sales".to_string(), SubsystemKind::Split),
                ("$info_schema@sales".to_string(), SubsystemKind::DataStream),
            ]
        );
    }

    #[test]
    fn test_apply_reports_fault_and_keeps_earlier_steps() {
        let subsystems = Subsystems::in_memory();
        subsystems
            .handle_resolvers
            .add_provider("sales", Arc::new(crate::backends::stub::StubHandleResolver::new("sales")))
            .unwrap();

        let plan = PublicationPlan::for_connector(capabilities(&StubConnector::complete()), Some("sales"));
        let fault = match plan.apply(&subsystems) {
            Ok(_) => panic!("expected the handle resolver insert to fail"),
            Err(fault) => fault,
        };

        assert_eq!(fault.subsystem, SubsystemKind::HandleResolver);
        assert_eq!(fault.connector_id, "sales");
        assert_eq!(
            fault.applied,
            vec![
                ("sales".to_string(), SubsystemKind::Metadata),
                ("sales".to_string(), SubsystemKind::Split),
            ]
        );
        assert!(subsystems.metadata.contains("sales"));
        assert!(!subsystems.data_streams.contains("sales"));
    }
}
