// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ConnectorError;
use crate::model::{ColumnMetadata, Row, TableName};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};

struct MemoryTable {
    columns: Vec<ColumnMetadata>,
    rows: Vec<Row>,
}

/// Table storage shared by every provider of one memory connector.
pub struct MemoryTables {
    schemas: RwLock<BTreeSet<String>>,
    tables: RwLock<BTreeMap<TableName, MemoryTable>>,
}

impl MemoryTables {
    pub fn new() -> Self {
        Self {
            schemas: RwLock::new(BTreeSet::new()),
            tables: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn create_schema(&self, schema: &str) {
        self.schemas.write().insert(schema.to_string());
    }

    /// # Errors
    ///
    /// `Internal` if the table already exists.
    pub fn create_table(&self, table: TableName, columns: Vec<ColumnMetadata>) -> Result<(), ConnectorError> {
        let mut tables = self.tables.write();
        if tables.contains_key(&table) {
            return Err(ConnectorError::Internal(format!("table '{}' already exists", table)));
        }
        self.schemas.write().insert(table.schema.clone());
        tables.insert(table, MemoryTable { columns, rows: Vec::new() });
        Ok(())
    }

    pub fn schema_names(&self) -> Vec<String> {
        self.schemas.read().iter().cloned().collect()
    }

    pub fn table_names(&self, schema: Option<&str>) -> Vec<TableName> {
        self.tables
            .read()
            .keys()
            .filter(|name| schema.map_or(true, |s| name.schema == s))
            .cloned()
            .collect()
    }

    pub fn columns(&self, table: &TableName) -> Option<Vec<ColumnMetadata>> {
        self.tables.read().get(table).map(|t| t.columns.clone())
    }

    pub fn row_count(&self, table: &TableName) -> Option<usize> {
        self.tables.read().get(table).map(|t| t.rows.len())
    }

    /// Rows at positions `part`, `part + part_count`, ... in insertion order.
    pub fn rows(&self, table: &TableName, part: usize, part_count: usize) -> Result<Vec<Row>, ConnectorError> {
        let tables = self.tables.read();
        let stored = tables
            .get(table)
            .ok_or_else(|| ConnectorError::UnknownTable(table.to_string()))?;
        Ok(stored
            .rows
            .iter()
            .skip(part)
            .step_by(part_count.max(1))
            .cloned()
            .collect())
    }

    /// Append rows atomically; each row must match the table's width.
    pub fn append(&self, table: &TableName, rows: Vec<Row>) -> Result<usize, ConnectorError> {
        let mut tables = self.tables.write();
        let stored = tables
            .get_mut(table)
            .ok_or_else(|| ConnectorError::UnknownTable(table.to_string()))?;
        if let Some(bad) = rows.iter().find(|row| row.len() != stored.columns.len()) {
            return Err(ConnectorError::Internal(format!(
                "row has {} values, table '{}' has {} columns",
                bad.len(),
                table,
                stored.columns.len()
            )));
        }
        let count = rows.len();
        stored.rows.extend(rows);
        Ok(count)
    }
}

impl Default for MemoryTables {
    fn default() -> Self {
        Self::new()
    }
}
