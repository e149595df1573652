// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configurable connectors and providers for tests.

use crate::errors::{ConnectorError, PublishError};
use crate::model::{
    ColumnMetadata, ConnectorId, DataStream, IndexHandle, Page, Split, SubsystemKind, TableHandle,
    TableName,
};
use crate::traits::{
    CapabilityResult, Connector, ConnectorFactory, ConnectorMetadata, HandleResolver,
    IndexResolver, ProviderRegistry, RecordSet, RecordSetProvider, RecordSink, RecordSinkProvider,
    SplitProvider, StreamProvider, Unsupported,
};
use serde_json::json;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// How a stub connector answers one capability accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Present,
    Unsupported,
    /// `Ok(None)`: success without a provider.
    Empty,
}

impl Accessor {
    fn answer<T: ?Sized>(self, provider: impl FnOnce() -> Arc<T>) -> CapabilityResult<Arc<T>> {
        match self {
            Accessor::Present => Ok(Some(provider())),
            Accessor::Unsupported => Err(Unsupported),
            Accessor::Empty => Ok(None),
        }
    }
}

/// A connector whose every accessor answer is chosen by the test.
#[derive(Clone)]
pub struct StubConnector {
    metadata: Accessor,
    split_provider: Accessor,
    handle_resolver: Accessor,
    stream_provider: Accessor,
    record_set_provider: Accessor,
    record_sink_provider: Accessor,
    index_resolver: Accessor,
    accessor_calls: Arc<AtomicUsize>,
    record_set_calls: Arc<AtomicUsize>,
}

impl StubConnector {
    /// Every capability present except the record set provider.
    pub fn complete() -> Self {
        Self {
            metadata: Accessor::Present,
            split_provider: Accessor::Present,
            handle_resolver: Accessor::Present,
            stream_provider: Accessor::Present,
            record_set_provider: Accessor::Unsupported,
            record_sink_provider: Accessor::Present,
            index_resolver: Accessor::Present,
            accessor_calls: Arc::new(AtomicUsize::new(0)),
            record_set_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Only the mandatory capabilities and a native stream provider.
    pub fn minimal() -> Self {
        Self::complete()
            .with_record_sink_provider(Accessor::Unsupported)
            .with_index_resolver(Accessor::Unsupported)
    }

    pub fn with_metadata(mut self, accessor: Accessor) -> Self {
        self.metadata = accessor;
        self
    }

    pub fn with_split_provider(mut self, accessor: Accessor) -> Self {
        self.split_provider = accessor;
        self
    }

    pub fn with_handle_resolver(mut self, accessor: Accessor) -> Self {
        self.handle_resolver = accessor;
        self
    }

    pub fn with_stream_provider(mut self, accessor: Accessor) -> Self {
        self.stream_provider = accessor;
        self
    }

    pub fn with_record_set_provider(mut self, accessor: Accessor) -> Self {
        self.record_set_provider = accessor;
        self
    }

    pub fn with_record_sink_provider(mut self, accessor: Accessor) -> Self {
        self.record_sink_provider = accessor;
        self
    }

    pub fn with_index_resolver(mut self, accessor: Accessor) -> Self {
        self.index_resolver = accessor;
        self
    }

    /// Accessor calls across this stub and its clones.
    pub fn accessor_calls(&self) -> usize {
        self.accessor_calls.load(Ordering::SeqCst)
    }

    pub fn record_set_calls(&self) -> usize {
        self.record_set_calls.load(Ordering::SeqCst)
    }

    fn called(&self) {
        self.accessor_calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Connector for StubConnector {
    fn metadata(&self) -> CapabilityResult<Arc<dyn ConnectorMetadata>> {
        self.called();
        self.metadata
            .answer(|| Arc::new(StubMetadata::empty()) as Arc<dyn ConnectorMetadata>)
    }

    fn split_provider(&self) -> CapabilityResult<Arc<dyn SplitProvider>> {
        self.called();
        self.split_provider
            .answer(|| Arc::new(StubSplitProvider::new("stub")) as Arc<dyn SplitProvider>)
    }

    fn handle_resolver(&self) -> CapabilityResult<Arc<dyn HandleResolver>> {
        self.called();
        self.handle_resolver
            .answer(|| Arc::new(StubHandleResolver::new("stub")) as Arc<dyn HandleResolver>)
    }

    fn stream_provider(&self) -> CapabilityResult<Arc<dyn StreamProvider>> {
        self.called();
        self.stream_provider
            .answer(|| Arc::new(StubStreamProvider::default()) as Arc<dyn StreamProvider>)
    }

    fn record_set_provider(&self) -> CapabilityResult<Arc<dyn RecordSetProvider>> {
        self.called();
        self.record_set_calls.fetch_add(1, Ordering::SeqCst);
        self.record_set_provider
            .answer(|| Arc::new(StubRecordSetProvider::with_rows(3)) as Arc<dyn RecordSetProvider>)
    }

    fn record_sink_provider(&self) -> CapabilityResult<Arc<dyn RecordSinkProvider>> {
        self.called();
        self.record_sink_provider
            .answer(|| Arc::new(StubRecordSinkProvider) as Arc<dyn RecordSinkProvider>)
    }

    fn index_resolver(&self) -> CapabilityResult<Arc<dyn IndexResolver>> {
        self.called();
        self.index_resolver
            .answer(|| Arc::new(StubIndexResolver) as Arc<dyn IndexResolver>)
    }
}

enum StubCreation {
    Connector(StubConnector),
    Fail(ConnectorError),
}

/// A factory that hands out clones of one stub connector, or always fails.
pub struct StubFactory {
    name: String,
    creation: StubCreation,
    creations: Arc<AtomicUsize>,
}

impl StubFactory {
    pub fn complete(name: &str) -> Self {
        Self::with_connector(name, StubConnector::complete())
    }

    pub fn with_connector(name: &str, connector: StubConnector) -> Self {
        Self {
            name: name.to_string(),
            creation: StubCreation::Connector(connector),
            creations: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(name: &str, error: ConnectorError) -> Self {
        Self {
            name: name.to_string(),
            creation: StubCreation::Fail(error),
            creations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `create` calls, readable after the factory is registered.
    pub fn creations(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.creations)
    }
}

impl ConnectorFactory for StubFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn create(
        &self,
        _connector_id: &str,
        _properties: &HashMap<String, String>,
    ) -> Result<Arc<dyn Connector>, ConnectorError> {
        self.creations.fetch_add(1, Ordering::SeqCst);
        match &self.creation {
            StubCreation::Connector(connector) => Ok(Arc::new(connector.clone())),
            StubCreation::Fail(error) => Err(error.clone()),
        }
    }
}

/// Metadata over a fixed set of tables.
pub struct StubMetadata {
    tables: Vec<(TableName, Vec<ColumnMetadata>)>,
}

impl StubMetadata {
    pub fn empty() -> Self {
        Self { tables: vec![] }
    }

    pub fn with_table(schema: &str, table: &str, columns: &[(&str, &str)]) -> Self {
        let columns = columns
            .iter()
            .enumerate()
            .map(|(ordinal, (name, data_type))| ColumnMetadata::new(*name, *data_type, ordinal))
            .collect();
        Self {
            tables: vec![(TableName::new(schema, table), columns)],
        }
    }
}

impl ConnectorMetadata for StubMetadata {
    fn list_schema_names(&self) -> Vec<String> {
        let mut schemas: Vec<String> = self.tables.iter().map(|(t, _)| t.schema.clone()).collect();
        schemas.sort();
        schemas.dedup();
        schemas
    }

    fn list_tables(&self, schema: Option<&str>) -> Vec<TableName> {
        self.tables
            .iter()
            .map(|(t, _)| t)
            .filter(|t| schema.map_or(true, |s| t.schema == s))
            .cloned()
            .collect()
    }

    fn table_columns(&self, table: &TableName) -> Option<Vec<ColumnMetadata>> {
        self.tables
            .iter()
            .find(|(t, _)| t == table)
            .map(|(_, columns)| columns.clone())
    }
}

/// One split per table, tagged with the owning connector id.
pub struct StubSplitProvider {
    connector_id: ConnectorId,
}

impl StubSplitProvider {
    pub fn new(connector_id: &str) -> Self {
        Self {
            connector_id: connector_id.to_string(),
        }
    }
}

impl SplitProvider for StubSplitProvider {
    fn splits(&self, handle: &TableHandle) -> Result<Vec<Split>, ConnectorError> {
        Ok(vec![Split {
            handle: handle.clone(),
            part: 0,
            part_count: 1,
            hosts: vec![self.connector_id.clone()],
        }])
    }
}

pub struct StubHandleResolver {
    connector_id: ConnectorId,
}

impl StubHandleResolver {
    pub fn new(connector_id: &str) -> Self {
        Self {
            connector_id: connector_id.to_string(),
        }
    }
}

impl HandleResolver for StubHandleResolver {
    fn can_handle(&self, handle: &TableHandle) -> bool {
        handle.connector_id == self.connector_id
    }
}

/// A stream of `pages` empty-but-one-row pages.
#[derive(Default)]
pub struct StubStreamProvider {
    pub pages: usize,
}

impl StreamProvider for StubStreamProvider {
    fn open_stream(&self, _split: &Split, _columns: &[String]) -> Result<DataStream, ConnectorError> {
        let pages: Vec<Page> = (0..self.pages)
            .map(|i| Page {
                rows: vec![vec![json!(i)]],
            })
            .collect();
        Ok(Box::new(pages.into_iter()))
    }
}

/// Rows `[0]`, `[1]`, ... `[n - 1]`.
pub struct StubRecordSetProvider {
    rows: usize,
}

impl StubRecordSetProvider {
    pub fn with_rows(rows: usize) -> Self {
        Self { rows }
    }
}

impl RecordSetProvider for StubRecordSetProvider {
    fn record_set(&self, _split: &Split, _columns: &[String]) -> Result<RecordSet, ConnectorError> {
        Ok(Box::new((0..self.rows).map(|i| vec![json!(i)])))
    }
}

pub struct StubRecordSinkProvider;

impl RecordSinkProvider for StubRecordSinkProvider {
    fn create_sink(&self, _handle: &TableHandle) -> Result<Box<dyn RecordSink>, ConnectorError> {
        Ok(Box::new(CountingSink::default()))
    }
}

#[derive(Default)]
struct CountingSink {
    rows: usize,
}

impl RecordSink for CountingSink {
    fn append_row(&mut self, _row: crate::model::Row) -> Result<(), ConnectorError> {
        self.rows += 1;
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<usize, ConnectorError> {
        Ok(self.rows)
    }
}

pub struct StubIndexResolver;

impl IndexResolver for StubIndexResolver {
    fn resolve_index(&self, handle: &TableHandle, columns: &[String]) -> Option<IndexHandle> {
        Some(IndexHandle {
            handle: handle.clone(),
            columns: columns.to_vec(),
        })
    }
}

/// A subsystem registry that refuses every insert.
pub struct FailingRegistry<T: ?Sized> {
    kind: SubsystemKind,
    _provider: PhantomData<fn() -> Arc<T>>,
}

impl<T: ?Sized> FailingRegistry<T> {
    pub fn new(kind: SubsystemKind) -> Self {
        Self {
            kind,
            _provider: PhantomData,
        }
    }
}

impl<T: ?Sized + Send + Sync> ProviderRegistry<T> for FailingRegistry<T> {
    fn add_provider(&self, connector_id: &str, _provider: Arc<T>) -> Result<(), PublishError> {
        Err(PublishError::Rejected {
            subsystem: self.kind,
            connector_id: connector_id.to_string(),
            reason: "registry is read-only".to_string(),
        })
    }

    fn get(&self, _connector_id: &str) -> Option<Arc<T>> {
        None
    }

    fn connector_ids(&self) -> Vec<ConnectorId> {
        vec![]
    }
}
