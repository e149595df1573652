// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Connector implementations and provider adapters shipped with the crate.
//!
//! # Available Backends
//!
//! ## Memory Backend
//! The `memory` connector type: tables declared through connector properties
//! and held in process. Read through a record set provider, optionally
//! writable through a record sink.
//!
//! ## Information Schema
//! The introspection connector the coordinator derives for every catalog. It
//! is never registered as a factory.
//!
//! ## Record Set Adapter
//! [`record_set::RecordSetStreamProvider`] turns a row-at-a-time record set
//! provider into the page-oriented data stream provider the data stream
//! registry expects.
//!
//! ## Stub Backend (Test-Only)
//! Connectors whose every accessor answer is scripted, plus providers and a
//! registry that refuses inserts. Only available in test builds.
//!
//! # Using the Memory Backend
//! ```rust
//! use std::collections::HashMap;
//! use the_switchyard::backends::memory::MemoryConnectorFactory;
//! use the_switchyard::traits::ConnectorFactory;
//!
//! let mut properties = HashMap::new();
//! properties.insert("memory.tables".to_string(), "orders(id bigint)".to_string());
//!
//! let connector = MemoryConnectorFactory::new().create("sales", &properties)?;
//! assert!(connector.record_set_provider().is_ok());
//! # Ok::<(), the_switchyard::errors::ConnectorError>(())
//! ```

pub mod information_schema;
pub mod memory;
pub mod record_set;
#[cfg(test)]
pub mod stub;

use crate::errors::ConnectorError;
use crate::model::{ColumnMetadata, TableName};

/// Positions of `requested` within `available`. An empty request selects
/// every column in ordinal order.
pub(crate) fn project(
    table: &TableName,
    available: &[ColumnMetadata],
    requested: &[String],
) -> Result<Vec<usize>, ConnectorError> {
    if requested.is_empty() {
        return Ok((0..available.len()).collect());
    }
    requested
        .iter()
        .map(|column| {
            available
                .iter()
                .position(|c| &c.name == column)
                .ok_or_else(|| ConnectorError::UnknownColumn {
                    table: table.to_string(),
                    column: column.clone(),
                })
        })
        .collect()
}
