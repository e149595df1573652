// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The capability contract every connector implements.
//!
//! Each accessor answers with a [`CapabilityResult`], which keeps three
//! outcomes apart:
//!
//! * `Ok(Some(provider))` - the capability is present
//! * `Err(Unsupported)` - the connector declares it does not implement it
//! * `Ok(None)` - the accessor claimed success but produced nothing, which the
//!   probe treats as a malformed connector
//!
//! ```
//! use std::sync::Arc;
//! use the_switchyard::traits::{CapabilityResult, IndexResolver, Unsupported};
//!
//! fn index_resolver() -> CapabilityResult<Arc<dyn IndexResolver>> {
//!     Err(Unsupported)
//! }
//!
//! assert!(index_resolver().is_err());
//! ```

use crate::errors::ConnectorError;
use crate::traits::providers::{
    ConnectorMetadata, HandleResolver, IndexResolver, RecordSetProvider, RecordSinkProvider,
    SplitProvider, StreamProvider,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Marker returned by an accessor for a capability the connector does not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unsupported;

/// Outcome of a single capability accessor call.
pub type CapabilityResult<T> = Result<Option<T>, Unsupported>;

/// The capability accessors a connector may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Metadata,
    SplitProvider,
    HandleResolver,
    StreamProvider,
    RecordSetProvider,
    RecordSinkProvider,
    IndexResolver,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapabilityKind::Metadata => "metadata",
            CapabilityKind::SplitProvider => "split provider",
            CapabilityKind::HandleResolver => "handle resolver",
            CapabilityKind::StreamProvider => "data stream provider",
            CapabilityKind::RecordSetProvider => "record set provider",
            CapabilityKind::RecordSinkProvider => "record sink provider",
            CapabilityKind::IndexResolver => "index resolver",
        };
        f.write_str(name)
    }
}

/// A configured, live connector instance.
///
/// Metadata, splits and handle resolution have no default; a connector must
/// answer for them (possibly with `Err(Unsupported)`, which fails onboarding).
/// The data access capabilities default to unsupported. At least one of
/// [`stream_provider`](Connector::stream_provider) and
/// [`record_set_provider`](Connector::record_set_provider) must be present.
pub trait Connector: Send + Sync {
    fn metadata(&self) -> CapabilityResult<Arc<dyn ConnectorMetadata>>;

    fn split_provider(&self) -> CapabilityResult<Arc<dyn SplitProvider>>;

    fn handle_resolver(&self) -> CapabilityResult<Arc<dyn HandleResolver>>;

    fn stream_provider(&self) -> CapabilityResult<Arc<dyn StreamProvider>> {
        Err(Unsupported)
    }

    fn record_set_provider(&self) -> CapabilityResult<Arc<dyn RecordSetProvider>> {
        Err(Unsupported)
    }

    fn record_sink_provider(&self) -> CapabilityResult<Arc<dyn RecordSinkProvider>> {
        Err(Unsupported)
    }

    fn index_resolver(&self) -> CapabilityResult<Arc<dyn IndexResolver>> {
        Err(Unsupported)
    }
}

/// Builds connector instances of one connector type.
pub trait ConnectorFactory: Send + Sync {
    /// The connector type name this factory registers under by default.
    fn name(&self) -> &str;

    fn create(
        &self,
        connector_id: &str,
        properties: &HashMap<String, String>,
    ) -> Result<Arc<dyn Connector>, ConnectorError>;
}
