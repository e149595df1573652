// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The information schema connector derived for every catalog.
//!
//! It is never built by a factory. The coordinator creates its three
//! providers when a catalog-scoped connector is onboarded and publishes them
//! under [`information_schema_connector_id`]:
//!
//! * [`InformationSchemaMetadata`] - describes the `schemata`, `tables` and
//!   `columns` tables
//! * [`InformationSchemaSplitProvider`] - one split per scan, pinned to the
//!   local node
//! * [`InformationSchemaStreamProvider`] - reads the catalog's metadata from
//!   the metadata registry at scan time
//!
//! ```
//! use the_switchyard::backends::information_schema::information_schema_connector_id;
//!
//! assert_eq!(information_schema_connector_id("sales"), "$info_schema@sales");
//! ```

use crate::backends::project;
use crate::backends::record_set::Pages;
use crate::config::consts::{INFORMATION_SCHEMA_CONNECTOR_PREFIX, INFORMATION_SCHEMA_NAME};
use crate::errors::ConnectorError;
use crate::model::{ColumnMetadata, ConnectorId, DataStream, Row, Split, TableHandle, TableName};
use crate::traits::{ConnectorMetadata, MetadataRegistry, SplitProvider, StreamProvider};
use serde_json::json;
use std::sync::Arc;

const VARCHAR: &str = "varchar";
const BIGINT: &str = "bigint";

pub fn information_schema_connector_id(connector_id: &str) -> ConnectorId {
    format!("{}{}", INFORMATION_SCHEMA_CONNECTOR_PREFIX, connector_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InformationSchemaTable {
    Schemata,
    Tables,
    Columns,
}

impl InformationSchemaTable {
    pub const ALL: [InformationSchemaTable; 3] = [
        InformationSchemaTable::Schemata,
        InformationSchemaTable::Tables,
        InformationSchemaTable::Columns,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InformationSchemaTable::Schemata => "schemata",
            InformationSchemaTable::Tables => "tables",
            InformationSchemaTable::Columns => "columns",
        }
    }

    pub fn table_name(&self) -> TableName {
        TableName::new(INFORMATION_SCHEMA_NAME, self.name())
    }

    pub fn from_table_name(table: &TableName) -> Option<Self> {
        if table.schema != INFORMATION_SCHEMA_NAME {
            return None;
        }
        Self::ALL.into_iter().find(|t| t.name() == table.table)
    }

    pub fn columns(&self) -> Vec<ColumnMetadata> {
        let definitions: &[(&str, &str)] = match self {
            InformationSchemaTable::Schemata => &[("catalog_name", VARCHAR), ("schema_name", VARCHAR)],
            InformationSchemaTable::Tables => &[
                ("table_catalog", VARCHAR),
                ("table_schema", VARCHAR),
                ("table_name", VARCHAR),
                ("table_type", VARCHAR),
            ],
            InformationSchemaTable::Columns => &[
                ("table_catalog", VARCHAR),
                ("table_schema", VARCHAR),
                ("table_name", VARCHAR),
                ("column_name", VARCHAR),
                ("ordinal_position", BIGINT),
                ("data_type", VARCHAR),
            ],
        };
        definitions
            .iter()
            .enumerate()
            .map(|(ordinal, (name, data_type))| ColumnMetadata::new(*name, *data_type, ordinal))
            .collect()
    }
}

/// Metadata of the information schema itself.
pub struct InformationSchemaMetadata {
    catalog: String,
}

impl InformationSchemaMetadata {
    pub fn new(catalog: impl Into<String>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }
}

impl ConnectorMetadata for InformationSchemaMetadata {
    fn list_schema_names(&self) -> Vec<String> {
        vec![INFORMATION_SCHEMA_NAME.to_string()]
    }

    fn list_tables(&self, schema: Option<&str>) -> Vec<TableName> {
        match schema {
            Some(schema) if schema != INFORMATION_SCHEMA_NAME => vec![],
            _ => InformationSchemaTable::ALL
                .iter()
                .map(|t| t.table_name())
                .collect(),
        }
    }

    fn table_columns(&self, table: &TableName) -> Option<Vec<ColumnMetadata>> {
        InformationSchemaTable::from_table_name(table).map(|t| t.columns())
    }
}

/// Single-split scans on the local node.
pub struct InformationSchemaSplitProvider {
    node_id: String,
}

impl InformationSchemaSplitProvider {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
        }
    }
}

impl SplitProvider for InformationSchemaSplitProvider {
    fn splits(&self, handle: &TableHandle) -> Result<Vec<Split>, ConnectorError> {
        if InformationSchemaTable::from_table_name(&handle.table).is_none() {
            return Err(ConnectorError::UnknownTable(handle.table.to_string()));
        }
        Ok(vec![Split {
            handle: handle.clone(),
            part: 0,
            part_count: 1,
            hosts: vec![self.node_id.clone()],
        }])
    }
}

/// Produces information schema rows from the metadata registry.
pub struct InformationSchemaStreamProvider {
    catalog: String,
    metadata: Arc<dyn MetadataRegistry>,
    page_size: usize,
}

impl InformationSchemaStreamProvider {
    pub fn new(catalog: impl Into<String>, metadata: Arc<dyn MetadataRegistry>, page_size: usize) -> Self {
        Self {
            catalog: catalog.into(),
            metadata,
            page_size: page_size.max(1),
        }
    }

    /// The catalog connector's metadata (if published) followed by the
    /// information schema's own.
    fn sources(&self) -> Vec<Arc<dyn ConnectorMetadata>> {
        let mut sources = Vec::with_capacity(2);
        if let Some(catalog_metadata) = self.metadata.catalog_metadata(&self.catalog) {
            sources.push(catalog_metadata);
        }
        sources.push(Arc::new(InformationSchemaMetadata::new(self.catalog.clone())));
        sources
    }

    fn tables(&self) -> Vec<(Arc<dyn ConnectorMetadata>, TableName)> {
        let mut tables = Vec::new();
        for source in self.sources() {
            let mut names = source.list_tables(None);
            names.sort();
            tables.extend(names.into_iter().map(|name| (Arc::clone(&source), name)));
        }
        tables
    }

    fn rows(&self, table: InformationSchemaTable) -> Vec<Row> {
        let catalog = self.catalog.as_str();
        match table {
            InformationSchemaTable::Schemata => {
                let mut schemas: Vec<String> = self
                    .sources()
                    .iter()
                    .flat_map(|source| source.list_schema_names())
                    .collect();
                schemas.sort();
                schemas.dedup();
                schemas
                    .into_iter()
                    .map(|schema| vec![json!(catalog), json!(schema)])
                    .collect()
            }
            InformationSchemaTable::Tables => self
                .tables()
                .into_iter()
                .map(|(_, name)| {
                    vec![
                        json!(catalog),
                        json!(name.schema),
                        json!(name.table),
                        json!("BASE TABLE"),
                    ]
                })
                .collect(),
            InformationSchemaTable::Columns => self
                .tables()
                .into_iter()
                .flat_map(|(source, name)| {
                    source
                        .table_columns(&name)
                        .unwrap_or_default()
                        .into_iter()
                        .map(move |column| {
                            vec![
                                json!(catalog),
                                json!(name.schema),
                                json!(name.table),
                                json!(column.name),
                                json!(column.ordinal),
                                json!(column.data_type),
                            ]
                        })
                })
                .collect(),
        }
    }
}

impl StreamProvider for InformationSchemaStreamProvider {
    fn open_stream(&self, split: &Split, columns: &[String]) -> Result<DataStream, ConnectorError> {
        let table = InformationSchemaTable::from_table_name(&split.handle.table)
            .ok_or_else(|| ConnectorError::UnknownTable(split.handle.table.to_string()))?;
        let projection = project(&split.handle.table, &table.columns(), columns)?;

        let rows: Vec<Row> = self
            .rows(table)
            .into_iter()
            .map(|row| projection.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Box::new(Pages {
            rows: Box::new(rows.into_iter()),
            page_size: self.page_size,
        }))
    }
}
