// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Capability probing: phase one of onboarding.
//!
//! The probe calls every capability accessor of a connector exactly once and
//! folds the answers into an immutable [`ProbedCapabilities`]. Nothing here
//! touches a registry; publication only ever starts from a value this module
//! has produced, so a connector that fails probing can never be half-visible.
//!
//! # Outcomes
//!
//! | Accessor answer   | Mandatory capability     | Optional capability |
//! |-------------------|--------------------------|---------------------|
//! | `Ok(Some(p))`     | kept                     | kept                |
//! | `Err(Unsupported)`| `Missing*` error         | recorded as absent  |
//! | `Ok(None)`        | `MalformedConnector`     | `MalformedConnector`|
//!
//! The data stream capability falls back to the record set provider, wrapped
//! in a [`RecordSetStreamProvider`], when no stream provider is declared.

use crate::backends::record_set::RecordSetStreamProvider;
use crate::errors::ProbeError;
use crate::model::ConnectorId;
use crate::observability::messages::onboarding::{CapabilityUnsupported, RecordSetAdapted};
use crate::observability::messages::StructuredLog;
use crate::traits::{
    CapabilityKind, CapabilityResult, Connector, ConnectorMetadata, HandleResolver, IndexResolver,
    RecordSinkProvider, SplitProvider, StreamProvider,
};
use std::sync::Arc;

/// What a single accessor call amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome<T> {
    Present(T),
    Unsupported,
    /// Success was signalled but no provider came back.
    Malformed,
}

impl<T> From<CapabilityResult<T>> for ProbeOutcome<T> {
    fn from(result: CapabilityResult<T>) -> Self {
        match result {
            Ok(Some(value)) => ProbeOutcome::Present(value),
            Ok(None) => ProbeOutcome::Malformed,
            Err(_) => ProbeOutcome::Unsupported,
        }
    }
}

/// Where the published data stream provider came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamSource {
    /// The connector's own stream provider.
    Native,
    /// A record set provider wrapped into pages.
    RecordSet,
}

/// Every capability of one connector, fetched and certified.
pub struct ProbedCapabilities {
    connector_id: ConnectorId,
    metadata: Arc<dyn ConnectorMetadata>,
    split_provider: Arc<dyn SplitProvider>,
    handle_resolver: Arc<dyn HandleResolver>,
    stream_provider: Arc<dyn StreamProvider>,
    stream_source: StreamSource,
    record_sink_provider: Option<Arc<dyn RecordSinkProvider>>,
    index_resolver: Option<Arc<dyn IndexResolver>>,
}

impl ProbedCapabilities {
    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    pub fn metadata(&self) -> &Arc<dyn ConnectorMetadata> {
        &self.metadata
    }

    pub fn split_provider(&self) -> &Arc<dyn SplitProvider> {
        &self.split_provider
    }

    pub fn handle_resolver(&self) -> &Arc<dyn HandleResolver> {
        &self.handle_resolver
    }

    pub fn stream_provider(&self) -> &Arc<dyn StreamProvider> {
        &self.stream_provider
    }

    pub fn stream_source(&self) -> StreamSource {
        self.stream_source
    }

    pub fn record_sink_provider(&self) -> Option<&Arc<dyn RecordSinkProvider>> {
        self.record_sink_provider.as_ref()
    }

    pub fn index_resolver(&self) -> Option<&Arc<dyn IndexResolver>> {
        self.index_resolver.as_ref()
    }

    pub(crate) fn into_parts(self) -> CapabilityParts {
        CapabilityParts {
            connector_id: self.connector_id,
            metadata: self.metadata,
            split_provider: self.split_provider,
            handle_resolver: self.handle_resolver,
            stream_provider: self.stream_provider,
            record_sink_provider: self.record_sink_provider,
            index_resolver: self.index_resolver,
        }
    }
}

/// Owned fields of a [`ProbedCapabilities`], taken apart for publication.
pub(crate) struct CapabilityParts {
    pub connector_id: ConnectorId,
    pub metadata: Arc<dyn ConnectorMetadata>,
    pub split_provider: Arc<dyn SplitProvider>,
    pub handle_resolver: Arc<dyn HandleResolver>,
    pub stream_provider: Arc<dyn StreamProvider>,
    pub record_sink_provider: Option<Arc<dyn RecordSinkProvider>>,
    pub index_resolver: Option<Arc<dyn IndexResolver>>,
}

/// Runs phase one against a connector instance.
#[derive(Debug, Clone)]
pub struct CapabilityProbe {
    page_size: usize,
}

impl CapabilityProbe {
    /// `page_size` is used when a record set provider has to be adapted.
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    /// # Errors
    ///
    /// A `Missing*` variant for an unsupported mandatory capability, or
    /// `MalformedConnector` for any accessor that returned nothing.
    pub fn probe(
        &self,
        connector_id: &str,
        connector: &dyn Connector,
    ) -> Result<ProbedCapabilities, ProbeError> {
        let metadata = mandatory(
            connector_id,
            CapabilityKind::Metadata,
            connector.metadata(),
            |connector_id| ProbeError::MissingMetadata { connector_id },
        )?;

        let split_provider = mandatory(
            connector_id,
            CapabilityKind::SplitProvider,
            connector.split_provider(),
            |connector_id| ProbeError::MissingSplitProvider { connector_id },
        )?;

        let (stream_provider, stream_source) = self.stream_capability(connector_id, connector)?;

        let handle_resolver = mandatory(
            connector_id,
            CapabilityKind::HandleResolver,
            connector.handle_resolver(),
            |connector_id| ProbeError::MissingHandleResolver { connector_id },
        )?;

        let record_sink_provider = optional(
            connector_id,
            CapabilityKind::RecordSinkProvider,
            connector.record_sink_provider(),
        )?;

        let index_resolver = optional(
            connector_id,
            CapabilityKind::IndexResolver,
            connector.index_resolver(),
        )?;

        Ok(ProbedCapabilities {
            connector_id: connector_id.to_string(),
            metadata,
            split_provider,
            handle_resolver,
            stream_provider,
            stream_source,
            record_sink_provider,
            index_resolver,
        })
    }

    fn stream_capability(
        &self,
        connector_id: &str,
        connector: &dyn Connector,
    ) -> Result<(Arc<dyn StreamProvider>, StreamSource), ProbeError> {
        match ProbeOutcome::from(connector.stream_provider()) {
            ProbeOutcome::Present(provider) => return Ok((provider, StreamSource::Native)),
            ProbeOutcome::Malformed => {
                return Err(malformed(connector_id, CapabilityKind::StreamProvider))
            }
            ProbeOutcome::Unsupported => CapabilityUnsupported {
                connector_id,
                capability: CapabilityKind::StreamProvider,
            }
            .log(),
        }

        match ProbeOutcome::from(connector.record_set_provider()) {
            ProbeOutcome::Present(record_sets) => {
                RecordSetAdapted {
                    connector_id,
                    page_size: self.page_size,
                }
                .log();
                let adapter: Arc<dyn StreamProvider> =
                    Arc::new(RecordSetStreamProvider::new(record_sets, self.page_size));
                Ok((adapter, StreamSource::RecordSet))
            }
            ProbeOutcome::Malformed => Err(malformed(connector_id, CapabilityKind::RecordSetProvider)),
            ProbeOutcome::Unsupported => Err(ProbeError::MissingStreamCapability {
                connector_id: connector_id.to_string(),
            }),
        }
    }
}

fn mandatory<T>(
    connector_id: &str,
    capability: CapabilityKind,
    result: CapabilityResult<T>,
    missing: impl FnOnce(String) -> ProbeError,
) -> Result<T, ProbeError> {
    match ProbeOutcome::from(result) {
        ProbeOutcome::Present(value) => Ok(value),
        ProbeOutcome::Unsupported => Err(missing(connector_id.to_string())),
        ProbeOutcome::Malformed => Err(malformed(connector_id, capability)),
    }
}

fn optional<T>(
    connector_id: &str,
    capability: CapabilityKind,
    result: CapabilityResult<T>,
) -> Result<Option<T>, ProbeError> {
    match ProbeOutcome::from(result) {
        ProbeOutcome::Present(value) => Ok(Some(value)),
        ProbeOutcome::Unsupported => {
            CapabilityUnsupported {
                connector_id,
                capability,
            }
            .log();
            Ok(None)
        }
        ProbeOutcome::Malformed => Err(malformed(connector_id, capability)),
    }
}

fn malformed(connector_id: &str, capability: CapabilityKind) -> ProbeError {
    ProbeError::MalformedConnector {
        connector_id: connector_id.to_string(),
        capability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{Accessor, StubConnector};

    fn probe(connector: &StubConnector) -> Result<ProbedCapabilities, ProbeError> {
        CapabilityProbe::new(16).probe("stub", connector)
    }

    #[test]
    fn test_probe_outcome_from_capability_result() {
        let present: CapabilityResult<i32> = Ok(Some(1));
        let empty: CapabilityResult<i32> = Ok(None);
        let unsupported: CapabilityResult<i32> = Err(crate::traits::Unsupported);

        assert_eq!(ProbeOutcome::from(present), ProbeOutcome::Present(1));
        assert_eq!(ProbeOutcome::from(empty), ProbeOutcome::Malformed);
        assert_eq!(ProbeOutcome::from(unsupported), ProbeOutcome::Unsupported);
    }

    #[test]
    fn test_complete_connector() {
        let capabilities = probe(&StubConnector::complete()).unwrap();
        assert_eq!(capabilities.connector_id(), "stub");
        assert_eq!(capabilities.stream_source(), StreamSource::Native);
        assert!(capabilities.record_sink_provider().is_some());
        assert!(capabilities.index_resolver().is_some());
    }

    #[test]
    fn test_mandatory_capabilities() {
        struct TestCase {
            name: &'static str,
            connector: StubConnector,
            expected: ProbeError,
        }

        let id = || "stub".to_string();
        let cases = vec![
            TestCase {
                name: "metadata unsupported",
                connector: StubConnector::complete().with_metadata(Accessor::Unsupported),
                expected: ProbeError::MissingMetadata { connector_id: id() },
            },
            TestCase {
                name: "split provider unsupported",
                connector: StubConnector::complete().with_split_provider(Accessor::Unsupported),
                expected: ProbeError::MissingSplitProvider { connector_id: id() },
            },
            TestCase {
                name: "handle resolver unsupported",
                connector: StubConnector::complete().with_handle_resolver(Accessor::Unsupported),
                expected: ProbeError::MissingHandleResolver { connector_id: id() },
            },
            TestCase {
                name: "no stream and no record set",
                connector: StubConnector::complete()
                    .with_stream_provider(Accessor::Unsupported)
                    .with_record_set_provider(Accessor::Unsupported),
                expected: ProbeError::MissingStreamCapability { connector_id: id() },
            },
            TestCase {
                name: "metadata empty",
                connector: StubConnector::complete().with_metadata(Accessor::Empty),
                expected: ProbeError::MalformedConnector {
                    connector_id: id(),
                    capability: CapabilityKind::Metadata,
                },
            },
            TestCase {
                name: "stream provider empty",
                connector: StubConnector::complete().with_stream_provider(Accessor::Empty),
                expected: ProbeError::MalformedConnector {
                    connector_id: id(),
                    capability: CapabilityKind::StreamProvider,
                },
            },
            TestCase {
                name: "record set provider empty",
                connector: StubConnector::complete()
                    .with_stream_provider(Accessor::Unsupported)
                    .with_record_set_provider(Accessor::Empty),
                expected: ProbeError::MalformedConnector {
                    connector_id: id(),
                    capability: CapabilityKind::RecordSetProvider,
                },
            },
        ];

        for case in cases {
            match probe(&case.connector) {
                Ok(_) => panic!("Test case '{}': expected {:?}, probe succeeded", case.name, case.expected),
                Err(error) => assert_eq!(error, case.expected, "Test case '{}'", case.name),
            }
        }
    }

    #[test]
    fn test_optional_capabilities() {
        let connector = StubConnector::complete()
            .with_record_sink_provider(Accessor::Unsupported)
            .with_index_resolver(Accessor::Unsupported);
        let capabilities = probe(&connector).unwrap();
        assert!(capabilities.record_sink_provider().is_none());
        assert!(capabilities.index_resolver().is_none());

        let malformed_sink = StubConnector::complete().with_record_sink_provider(Accessor::Empty);
        assert_eq!(
            probe(&malformed_sink).err(),
            Some(ProbeError::MalformedConnector {
                connector_id: "stub".to_string(),
                capability: CapabilityKind::RecordSinkProvider,
            })
        );

        let malformed_index = StubConnector::complete().with_index_resolver(Accessor::Empty);
        assert_eq!(
            probe(&malformed_index).err(),
            Some(ProbeError::MalformedConnector {
                connector_id: "stub".to_string(),
                capability: CapabilityKind::IndexResolver,
            })
        );
    }

    #[test]
    fn test_record_set_fallback() {
        let connector = StubConnector::complete()
            .with_stream_provider(Accessor::Unsupported)
            .with_record_set_provider(Accessor::Present);
        let capabilities = probe(&connector).unwrap();
        assert_eq!(capabilities.stream_source(), StreamSource::RecordSet);
    }

    #[test]
    fn test_stream_provider_preferred_over_record_set() {
        let connector = StubConnector::complete().with_record_set_provider(Accessor::Present);
        let capabilities = probe(&connector).unwrap();
        assert_eq!(capabilities.stream_source(), StreamSource::Native);
        assert_eq!(connector.record_set_calls(), 0);
    }

    #[test]
    fn test_each_accessor_called_once() {
        let connector = StubConnector::complete();
        probe(&connector).unwrap();
        assert_eq!(connector.accessor_calls(), 6);
    }
}
