// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::memory::connector::{MemoryConnector, MemoryOptions};
use crate::errors::ConnectorError;
use crate::traits::{Connector, ConnectorFactory};
use std::collections::HashMap;
use std::sync::Arc;

pub const MEMORY_CONNECTOR_NAME: &str = "memory";

/// Factory for in-process `memory` connectors.
///
/// Each call to [`create`](ConnectorFactory::create) yields an instance with
/// its own table storage; two catalogs never share rows.
#[derive(Debug, Default, Clone)]
pub struct MemoryConnectorFactory;

impl MemoryConnectorFactory {
    pub fn new() -> Self {
        Self
    }

    /// Property keys understood by this factory.
    pub fn supported_properties() -> Vec<&'static str> {
        MemoryOptions::PROPERTIES.to_vec()
    }
}

impl ConnectorFactory for MemoryConnectorFactory {
    fn name(&self) -> &str {
        MEMORY_CONNECTOR_NAME
    }

    fn create(
        &self,
        connector_id: &str,
        properties: &HashMap<String, String>,
    ) -> Result<Arc<dyn Connector>, ConnectorError> {
        let options = MemoryOptions::from_properties(properties)?;
        Ok(Arc::new(MemoryConnector::new(connector_id, options)?))
    }
}
