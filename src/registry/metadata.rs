// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::PublishError;
use crate::model::{ConnectorId, SubsystemKind};
use crate::observability::messages::registry::ProviderPublished;
use crate::observability::messages::StructuredLog;
use crate::traits::{ConnectorMetadata, MetadataEntry, MetadataRegistry, MetadataScope};
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// In-process metadata registry.
///
/// Holds catalog, information schema and global entries side by side, keyed
/// by connector id. At most one catalog-scoped entry may exist per catalog.
pub struct MetadataManager {
    entries: RwLock<HashMap<ConnectorId, MetadataEntry>>,
}

impl MetadataManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Ids of global entries, sorted.
    pub fn global_connector_ids(&self) -> Vec<ConnectorId> {
        let mut ids: Vec<ConnectorId> = self
            .entries
            .read()
            .values()
            .filter(|entry| entry.scope == MetadataScope::Global)
            .map(|entry| entry.connector_id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn insert(
        &self,
        connector_id: &str,
        catalog: Option<&str>,
        scope: MetadataScope,
        metadata: Arc<dyn ConnectorMetadata>,
    ) -> Result<(), PublishError> {
        let mut entries = self.entries.write();

        if let (Some(catalog), MetadataScope::Catalog) = (catalog, scope) {
            let taken = entries
                .values()
                .any(|e| e.scope == MetadataScope::Catalog && e.catalog.as_deref() == Some(catalog));
            if taken {
                return Err(PublishError::Rejected {
                    subsystem: SubsystemKind::Metadata,
                    connector_id: connector_id.to_string(),
                    reason: format!("catalog '{}' is already bound", catalog),
                });
            }
        }

        match entries.entry(connector_id.to_string()) {
            Entry::Occupied(_) => Err(PublishError::DuplicateEntry {
                subsystem: SubsystemKind::Metadata,
                connector_id: connector_id.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(MetadataEntry {
                    connector_id: connector_id.to_string(),
                    catalog: catalog.map(str::to_string),
                    scope,
                    metadata,
                });
                ProviderPublished {
                    subsystem: SubsystemKind::Metadata,
                    connector_id,
                }
                .log();
                Ok(())
            }
        }
    }
}

impl Default for MetadataManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataRegistry for MetadataManager {
    fn add_connector_metadata(
        &self,
        connector_id: &str,
        catalog: &str,
        metadata: Arc<dyn ConnectorMetadata>,
    ) -> Result<(), PublishError> {
        self.insert(connector_id, Some(catalog), MetadataScope::Catalog, metadata)
    }

    fn add_information_schema_metadata(
        &self,
        connector_id: &str,
        catalog: &str,
        metadata: Arc<dyn ConnectorMetadata>,
    ) -> Result<(), PublishError> {
        self.insert(
            connector_id,
            Some(catalog),
            MetadataScope::InformationSchema,
            metadata,
        )
    }

    fn add_global_schema_metadata(
        &self,
        connector_id: &str,
        metadata: Arc<dyn ConnectorMetadata>,
    ) -> Result<(), PublishError> {
        self.insert(connector_id, None, MetadataScope::Global, metadata)
    }

    fn entry(&self, connector_id: &str) -> Option<MetadataEntry> {
        self.entries.read().get(connector_id).cloned()
    }

    fn catalog_metadata(&self, catalog: &str) -> Option<Arc<dyn ConnectorMetadata>> {
        self.entries
            .read()
            .values()
            .find(|e| e.scope == MetadataScope::Catalog && e.catalog.as_deref() == Some(catalog))
            .map(|e| Arc::clone(&e.metadata))
    }

    fn entries(&self) -> Vec<MetadataEntry> {
        self.entries.read().values().cloned().collect()
    }
}
