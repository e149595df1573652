// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Seams for the subsystem registries the coordinator publishes into.
//!
//! Registries are owned by the hosting service and handed to the coordinator;
//! the in-memory implementations live in [`crate::registry`].

use crate::errors::PublishError;
use crate::model::ConnectorId;
use crate::traits::providers::ConnectorMetadata;
use std::sync::Arc;

/// A registry mapping connector ids to one kind of provider.
pub trait ProviderRegistry<T: ?Sized>: Send + Sync {
    fn add_provider(&self, connector_id: &str, provider: Arc<T>) -> Result<(), PublishError>;

    fn get(&self, connector_id: &str) -> Option<Arc<T>>;

    fn connector_ids(&self) -> Vec<ConnectorId>;

    fn contains(&self, connector_id: &str) -> bool {
        self.get(connector_id).is_some()
    }

    fn len(&self) -> usize {
        self.connector_ids().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a metadata entry is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataScope {
    /// The connector backing a catalog.
    Catalog,
    /// The information schema connector derived for a catalog.
    InformationSchema,
    /// A connector with no catalog whose schemas are visible everywhere.
    Global,
}

#[derive(Clone)]
pub struct MetadataEntry {
    pub connector_id: ConnectorId,
    pub catalog: Option<String>,
    pub scope: MetadataScope,
    pub metadata: Arc<dyn ConnectorMetadata>,
}

/// The metadata registry has three insert variants instead of one.
pub trait MetadataRegistry: Send + Sync {
    fn add_connector_metadata(
        &self,
        connector_id: &str,
        catalog: &str,
        metadata: Arc<dyn ConnectorMetadata>,
    ) -> Result<(), PublishError>;

    fn add_information_schema_metadata(
        &self,
        connector_id: &str,
        catalog: &str,
        metadata: Arc<dyn ConnectorMetadata>,
    ) -> Result<(), PublishError>;

    fn add_global_schema_metadata(
        &self,
        connector_id: &str,
        metadata: Arc<dyn ConnectorMetadata>,
    ) -> Result<(), PublishError>;

    fn entry(&self, connector_id: &str) -> Option<MetadataEntry>;

    /// Metadata of the connector backing `catalog`, excluding its information schema.
    fn catalog_metadata(&self, catalog: &str) -> Option<Arc<dyn ConnectorMetadata>>;

    fn entries(&self) -> Vec<MetadataEntry>;

    fn contains(&self, connector_id: &str) -> bool {
        self.entry(connector_id).is_some()
    }
}
