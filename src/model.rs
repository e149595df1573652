// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Plain data types shared by connectors, registries and the coordinator.

use serde::Serialize;
use std::fmt;

/// Identifier of a configured connector instance.
///
/// Catalog-scoped connectors use their catalog name; global connectors pick
/// an independent id.
pub type ConnectorId = String;

/// A single row of values, one per projected column.
pub type Row = Vec<serde_json::Value>;

/// Schema-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TableName {
    pub schema: String,
    pub table: String,
}

impl TableName {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// Column definition as reported by connector metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub data_type: String,
    pub ordinal: usize,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, ordinal: usize) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            ordinal,
        }
    }
}

/// A table bound to the connector that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableHandle {
    pub connector_id: ConnectorId,
    pub table: TableName,
}

impl TableHandle {
    pub fn new(connector_id: impl Into<ConnectorId>, table: TableName) -> Self {
        Self {
            connector_id: connector_id.into(),
            table,
        }
    }
}

/// A unit of scan work for one table.
///
/// `part` and `part_count` describe which slice of the table the split covers;
/// `hosts` lists the nodes the split prefers to run on (empty means anywhere).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub handle: TableHandle,
    pub part: usize,
    pub part_count: usize,
    pub hosts: Vec<String>,
}

/// A batch of rows produced by a data stream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub rows: Vec<Row>,
}

impl Page {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Sequence of pages returned when a split is opened.
pub type DataStream = Box<dyn Iterator<Item = Page> + Send>;

/// Index chosen by a connector's index resolver for a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHandle {
    pub handle: TableHandle,
    pub columns: Vec<String>,
}

/// The six registries a connector's capabilities are published into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsystemKind {
    Metadata,
    Split,
    HandleResolver,
    DataStream,
    RecordSink,
    Index,
}

impl SubsystemKind {
    pub const ALL: [SubsystemKind; 6] = [
        SubsystemKind::Metadata,
        SubsystemKind::Split,
        SubsystemKind::HandleResolver,
        SubsystemKind::DataStream,
        SubsystemKind::RecordSink,
        SubsystemKind::Index,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubsystemKind::Metadata => "metadata",
            SubsystemKind::Split => "split",
            SubsystemKind::HandleResolver => "handle_resolver",
            SubsystemKind::DataStream => "data_stream",
            SubsystemKind::RecordSink => "record_sink",
            SubsystemKind::Index => "index",
        }
    }
}

impl fmt::Display for SubsystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
