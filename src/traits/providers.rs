// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Provider traits handed out by connector capability accessors.
//!
//! These are the values that end up in the subsystem registries.

use crate::errors::ConnectorError;
use crate::model::{ColumnMetadata, DataStream, IndexHandle, Row, Split, TableHandle, TableName};

/// Schema and table metadata for one connector.
pub trait ConnectorMetadata: Send + Sync {
    fn list_schema_names(&self) -> Vec<String>;

    /// Tables in `schema`, or in every schema when `schema` is `None`.
    fn list_tables(&self, schema: Option<&str>) -> Vec<TableName>;

    /// Columns of `table` ordered by ordinal, or `None` if the table is unknown.
    fn table_columns(&self, table: &TableName) -> Option<Vec<ColumnMetadata>>;
}

/// Splits a table scan into units of work.
pub trait SplitProvider: Send + Sync {
    fn splits(&self, handle: &TableHandle) -> Result<Vec<Split>, ConnectorError>;
}

/// Page-oriented read access to a split.
pub trait StreamProvider: Send + Sync {
    fn open_stream(&self, split: &Split, columns: &[String]) -> Result<DataStream, ConnectorError>;
}

/// Row cursor over a split.
pub type RecordSet = Box<dyn Iterator<Item = Row> + Send>;

/// Row-oriented read access to a split.
pub trait RecordSetProvider: Send + Sync {
    fn record_set(&self, split: &Split, columns: &[String]) -> Result<RecordSet, ConnectorError>;
}

/// Write side of a single table; rows become visible on `commit`.
pub trait RecordSink: Send {
    fn append_row(&mut self, row: Row) -> Result<(), ConnectorError>;

    /// Publishes appended rows and returns how many were written.
    fn commit(self: Box<Self>) -> Result<usize, ConnectorError>;
}

pub trait RecordSinkProvider: Send + Sync {
    fn create_sink(&self, handle: &TableHandle) -> Result<Box<dyn RecordSink>, ConnectorError>;
}

/// Picks an index able to serve lookups on `columns`.
pub trait IndexResolver: Send + Sync {
    fn resolve_index(&self, handle: &TableHandle, columns: &[String]) -> Option<IndexHandle>;
}

/// Tells the engine whether a handle belongs to this connector.
pub trait HandleResolver: Send + Sync {
    fn can_handle(&self, handle: &TableHandle) -> bool;
}
