// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod connector;
pub mod providers;
pub mod registry;

pub use connector::{CapabilityKind, CapabilityResult, Connector, ConnectorFactory, Unsupported};
pub use providers::{
    ConnectorMetadata, HandleResolver, IndexResolver, RecordSet, RecordSetProvider, RecordSink,
    RecordSinkProvider, SplitProvider, StreamProvider,
};
pub use registry::{MetadataEntry, MetadataRegistry, MetadataScope, ProviderRegistry};
