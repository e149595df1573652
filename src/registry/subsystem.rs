// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::PublishError;
use crate::model::{ConnectorId, SubsystemKind};
use crate::observability::messages::registry::ProviderPublished;
use crate::observability::messages::StructuredLog;
use crate::registry::MetadataManager;
use crate::traits::{
    HandleResolver, IndexResolver, MetadataRegistry, ProviderRegistry, RecordSinkProvider,
    SplitProvider, StreamProvider,
};
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// In-process subsystem registry for one provider kind.
///
/// Reads and inserts are independently thread-safe. A second insert for the
/// same connector id is refused with [`PublishError::DuplicateEntry`].
pub struct InMemoryProviderRegistry<T: ?Sized> {
    kind: SubsystemKind,
    providers: RwLock<HashMap<ConnectorId, Arc<T>>>,
}

impl<T: ?Sized> InMemoryProviderRegistry<T> {
    #[must_use]
    pub fn new(kind: SubsystemKind) -> Self {
        Self {
            kind,
            providers: RwLock::new(HashMap::new()),
        }
    }

    pub fn kind(&self) -> SubsystemKind {
        self.kind
    }
}

impl<T: ?Sized + Send + Sync> ProviderRegistry<T> for InMemoryProviderRegistry<T> {
    fn add_provider(&self, connector_id: &str, provider: Arc<T>) -> Result<(), PublishError> {
        match self.providers.write().entry(connector_id.to_string()) {
            Entry::Occupied(_) => Err(PublishError::DuplicateEntry {
                subsystem: self.kind,
                connector_id: connector_id.to_string(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(provider);
                ProviderPublished {
                    subsystem: self.kind,
                    connector_id,
                }
                .log();
                Ok(())
            }
        }
    }

    fn get(&self, connector_id: &str) -> Option<Arc<T>> {
        self.providers.read().get(connector_id).cloned()
    }

    fn connector_ids(&self) -> Vec<ConnectorId> {
        let mut ids: Vec<ConnectorId> = self.providers.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    fn len(&self) -> usize {
        self.providers.read().len()
    }
}

/// The six subsystem registries a connector is published into.
///
/// The hosting service owns the registries and hands this bundle to the
/// coordinator; everything else reads from the same `Arc`s.
#[derive(Clone)]
pub struct Subsystems {
    pub metadata: Arc<dyn MetadataRegistry>,
    pub splits: Arc<dyn ProviderRegistry<dyn SplitProvider>>,
    pub handle_resolvers: Arc<dyn ProviderRegistry<dyn HandleResolver>>,
    pub data_streams: Arc<dyn ProviderRegistry<dyn StreamProvider>>,
    pub record_sinks: Arc<dyn ProviderRegistry<dyn RecordSinkProvider>>,
    pub indexes: Arc<dyn ProviderRegistry<dyn IndexResolver>>,
}

impl Subsystems {
    /// Fresh, empty in-memory registries.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            metadata: Arc::new(MetadataManager::new()),
            splits: Arc::new(InMemoryProviderRegistry::<dyn SplitProvider>::new(
                SubsystemKind::Split,
            )),
            handle_resolvers: Arc::new(InMemoryProviderRegistry::<dyn HandleResolver>::new(
                SubsystemKind::HandleResolver,
            )),
            data_streams: Arc::new(InMemoryProviderRegistry::<dyn StreamProvider>::new(
                SubsystemKind::DataStream,
            )),
            record_sinks: Arc::new(InMemoryProviderRegistry::<dyn RecordSinkProvider>::new(
                SubsystemKind::RecordSink,
            )),
            indexes: Arc::new(InMemoryProviderRegistry::<dyn IndexResolver>::new(
                SubsystemKind::Index,
            )),
        }
    }

    /// The registries currently holding an entry for `connector_id`.
    pub fn holders_of(&self, connector_id: &str) -> Vec<SubsystemKind> {
        SubsystemKind::ALL
            .into_iter()
            .filter(|kind| self.contains(*kind, connector_id))
            .collect()
    }

    pub fn contains(&self, kind: SubsystemKind, connector_id: &str) -> bool {
        match kind {
            SubsystemKind::Metadata => self.metadata.contains(connector_id),
            SubsystemKind::Split => self.splits.contains(connector_id),
            SubsystemKind::HandleResolver => self.handle_resolvers.contains(connector_id),
            SubsystemKind::DataStream => self.data_streams.contains(connector_id),
            SubsystemKind::RecordSink => self.record_sinks.contains(connector_id),
            SubsystemKind::Index => self.indexes.contains(connector_id),
        }
    }

    /// Connector ids present in the registry of `kind`, sorted.
    pub fn connector_ids(&self, kind: SubsystemKind) -> Vec<ConnectorId> {
        match kind {
            SubsystemKind::Metadata => {
                let mut ids: Vec<ConnectorId> = self
                    .metadata
                    .entries()
                    .into_iter()
                    .map(|entry| entry.connector_id)
                    .collect();
                ids.sort();
                ids
            }
            SubsystemKind::Split => self.splits.connector_ids(),
            SubsystemKind::HandleResolver => self.handle_resolvers.connector_ids(),
            SubsystemKind::DataStream => self.data_streams.connector_ids(),
            SubsystemKind::RecordSink => self.record_sinks.connector_ids(),
            SubsystemKind::Index => self.indexes.connector_ids(),
        }
    }
}

impl Default for Subsystems {
    fn default() -> Self {
        Self::in_memory()
    }
}
