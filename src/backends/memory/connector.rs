// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::memory::tables::MemoryTables;
use crate::backends::project;
use crate::errors::ConnectorError;
use crate::model::{ColumnMetadata, ConnectorId, Row, Split, TableHandle, TableName};
use crate::traits::{
    CapabilityResult, Connector, ConnectorMetadata, HandleResolver, RecordSet, RecordSetProvider,
    RecordSink, RecordSinkProvider, SplitProvider, Unsupported,
};
use std::collections::HashMap;
use std::sync::Arc;

const SCHEMA: &str = "memory.schema";
const TABLES: &str = "memory.tables";
const SPLITS: &str = "memory.splits";
const WRITABLE: &str = "memory.writable";

/// Parsed `memory.*` connector properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryOptions {
    pub schema: String,
    pub tables: Vec<(TableName, Vec<ColumnMetadata>)>,
    pub splits: usize,
    pub writable: bool,
}

impl Default for MemoryOptions {
    fn default() -> Self {
        Self {
            schema: "default".to_string(),
            tables: Vec::new(),
            splits: 1,
            writable: false,
        }
    }
}

impl MemoryOptions {
    pub const PROPERTIES: [&'static str; 4] = [SCHEMA, TABLES, SPLITS, WRITABLE];

    /// # Errors
    ///
    /// `InvalidProperty` for unknown keys and values that do not parse.
    pub fn from_properties(properties: &HashMap<String, String>) -> Result<Self, ConnectorError> {
        if let Some((key, value)) = properties
            .iter()
            .find(|(key, _)| !Self::PROPERTIES.contains(&key.as_str()))
        {
            return Err(invalid(key, value, "unknown property"));
        }

        let mut options = MemoryOptions::default();

        if let Some(schema) = properties.get(SCHEMA) {
            if schema.trim().is_empty() {
                return Err(invalid(SCHEMA, schema, "schema name must not be empty"));
            }
            options.schema = schema.trim().to_string();
        }

        if let Some(splits) = properties.get(SPLITS) {
            options.splits = match splits.trim().parse::<usize>() {
                Ok(0) => return Err(invalid(SPLITS, splits, "must be at least 1")),
                Ok(n) => n,
                Err(e) => return Err(invalid(SPLITS, splits, &e.to_string())),
            };
        }

        if let Some(writable) = properties.get(WRITABLE) {
            options.writable = writable
                .trim()
                .parse::<bool>()
                .map_err(|e| invalid(WRITABLE, writable, &e.to_string()))?;
        }

        if let Some(tables) = properties.get(TABLES) {
            options.tables = parse_tables(&options.schema, tables)?;
        }

        Ok(options)
    }
}

fn invalid(name: &str, value: &str, reason: &str) -> ConnectorError {
    ConnectorError::InvalidProperty {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// `orders(id bigint, total double); customers(id bigint)`
fn parse_tables(
    schema: &str,
    declaration: &str,
) -> Result<Vec<(TableName, Vec<ColumnMetadata>)>, ConnectorError> {
    declaration
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| parse_table(schema, segment))
        .collect()
}

fn parse_table(schema: &str, segment: &str) -> Result<(TableName, Vec<ColumnMetadata>), ConnectorError> {
    let (name, rest) = segment
        .split_once('(')
        .ok_or_else(|| invalid(TABLES, segment, "expected name(column type, ...)"))?;
    let body = rest
        .strip_suffix(')')
        .ok_or_else(|| invalid(TABLES, segment, "missing closing parenthesis"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid(TABLES, segment, "table name must not be empty"));
    }

    let mut columns = Vec::new();
    for (ordinal, column) in body.split(',').map(str::trim).enumerate() {
        let parts: Vec<&str> = column.split_whitespace().collect();
        match parts.as_slice() {
            [column_name, data_type] => {
                if columns.iter().any(|c: &ColumnMetadata| c.name == *column_name) {
                    return Err(invalid(TABLES, segment, "duplicate column name"));
                }
                columns.push(ColumnMetadata::new(*column_name, *data_type, ordinal));
            }
            _ => return Err(invalid(TABLES, segment, "columns are declared as 'name type'")),
        }
    }

    Ok((TableName::new(schema, name), columns))
}

/// A connector backed by [`MemoryTables`].
///
/// Exposes a record set provider rather than a stream provider, so the
/// coordinator publishes it through the record set adapter.
pub struct MemoryConnector {
    connector_id: ConnectorId,
    options: MemoryOptions,
    tables: Arc<MemoryTables>,
    metadata: Arc<dyn ConnectorMetadata>,
    splits: Arc<dyn SplitProvider>,
    record_sets: Arc<dyn RecordSetProvider>,
    handles: Arc<dyn HandleResolver>,
    sinks: Option<Arc<dyn RecordSinkProvider>>,
}

impl MemoryConnector {
    /// # Errors
    ///
    /// `InvalidProperty` when the declared tables collide.
    pub fn new(connector_id: &str, options: MemoryOptions) -> Result<Self, ConnectorError> {
        let tables = Arc::new(MemoryTables::new());
        tables.create_schema(&options.schema);
        for (name, columns) in &options.tables {
            tables
                .create_table(name.clone(), columns.clone())
                .map_err(|e| invalid(TABLES, &name.to_string(), &e.to_string()))?;
        }

        let sinks = options.writable.then(|| {
            Arc::new(MemoryRecordSinkProvider {
                tables: Arc::clone(&tables),
            }) as Arc<dyn RecordSinkProvider>
        });

        Ok(Self {
            connector_id: connector_id.to_string(),
            metadata: Arc::new(MemoryMetadata {
                tables: Arc::clone(&tables),
            }),
            splits: Arc::new(MemorySplitProvider {
                tables: Arc::clone(&tables),
                splits: options.splits,
            }),
            record_sets: Arc::new(MemoryRecordSetProvider {
                tables: Arc::clone(&tables),
            }),
            handles: Arc::new(MemoryHandleResolver {
                connector_id: connector_id.to_string(),
            }),
            sinks,
            tables,
            options,
        })
    }

    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    pub fn options(&self) -> &MemoryOptions {
        &self.options
    }

    pub fn tables(&self) -> &Arc<MemoryTables> {
        &self.tables
    }
}

impl Connector for MemoryConnector {
    fn metadata(&self) -> CapabilityResult<Arc<dyn ConnectorMetadata>> {
        Ok(Some(self.metadata.clone()))
    }

    fn split_provider(&self) -> CapabilityResult<Arc<dyn SplitProvider>> {
        Ok(Some(self.splits.clone()))
    }

    fn handle_resolver(&self) -> CapabilityResult<Arc<dyn HandleResolver>> {
        Ok(Some(self.handles.clone()))
    }

    fn record_set_provider(&self) -> CapabilityResult<Arc<dyn RecordSetProvider>> {
        Ok(Some(self.record_sets.clone()))
    }

    fn record_sink_provider(&self) -> CapabilityResult<Arc<dyn RecordSinkProvider>> {
        match &self.sinks {
            Some(sinks) => Ok(Some(sinks.clone())),
            None => Err(Unsupported),
        }
    }
}

struct MemoryMetadata {
    tables: Arc<MemoryTables>,
}

impl ConnectorMetadata for MemoryMetadata {
    fn list_schema_names(&self) -> Vec<String> {
        self.tables.schema_names()
    }

    fn list_tables(&self, schema: Option<&str>) -> Vec<TableName> {
        self.tables.table_names(schema)
    }

    fn table_columns(&self, table: &TableName) -> Option<Vec<ColumnMetadata>> {
        self.tables.columns(table)
    }
}

struct MemorySplitProvider {
    tables: Arc<MemoryTables>,
    splits: usize,
}

impl SplitProvider for MemorySplitProvider {
    fn splits(&self, handle: &TableHandle) -> Result<Vec<Split>, ConnectorError> {
        if self.tables.columns(&handle.table).is_none() {
            return Err(ConnectorError::UnknownTable(handle.table.to_string()));
        }
        Ok((0..self.splits)
            .map(|part| Split {
                handle: handle.clone(),
                part,
                part_count: self.splits,
                hosts: Vec::new(),
            })
            .collect())
    }
}

struct MemoryRecordSetProvider {
    tables: Arc<MemoryTables>,
}

impl RecordSetProvider for MemoryRecordSetProvider {
    fn record_set(&self, split: &Split, columns: &[String]) -> Result<RecordSet, ConnectorError> {
        let table = &split.handle.table;
        let available = self
            .tables
            .columns(table)
            .ok_or_else(|| ConnectorError::UnknownTable(table.to_string()))?;
        let projection = project(table, &available, columns)?;
        let rows = self.tables.rows(table, split.part, split.part_count)?;

        Ok(Box::new(rows.into_iter().map(move |row| {
            projection.iter().map(|&i| row[i].clone()).collect::<Row>()
        })))
    }
}

struct MemoryHandleResolver {
    connector_id: ConnectorId,
}

impl HandleResolver for MemoryHandleResolver {
    fn can_handle(&self, handle: &TableHandle) -> bool {
        handle.connector_id == self.connector_id
    }
}

struct MemoryRecordSinkProvider {
    tables: Arc<MemoryTables>,
}

impl RecordSinkProvider for MemoryRecordSinkProvider {
    fn create_sink(&self, handle: &TableHandle) -> Result<Box<dyn RecordSink>, ConnectorError> {
        if self.tables.columns(&handle.table).is_none() {
            return Err(ConnectorError::UnknownTable(handle.table.to_string()));
        }
        Ok(Box::new(MemoryRecordSink {
            tables: Arc::clone(&self.tables),
            table: handle.table.clone(),
            pending: Vec::new(),
        }))
    }
}

/// Buffers rows until commit; an abandoned sink writes nothing.
struct MemoryRecordSink {
    tables: Arc<MemoryTables>,
    table: TableName,
    pending: Vec<Row>,
}

impl RecordSink for MemoryRecordSink {
    fn append_row(&mut self, row: Row) -> Result<(), ConnectorError> {
        self.pending.push(row);
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<usize, ConnectorError> {
        let MemoryRecordSink {
            tables,
            table,
            pending,
        } = *self;
        tables.append(&table, pending)
    }
}
