// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The built-in `memory` connector.
//!
//! Tables live in process memory. The connector serves metadata, splits,
//! record sets (streamed through the record set adapter) and handle
//! resolution; with `memory.writable=true` it also offers a record sink.
//!
//! # Properties
//!
//! | Property          | Default   | Meaning                                         |
//! |-------------------|-----------|-------------------------------------------------|
//! | `memory.schema`   | `default` | Schema holding the declared tables              |
//! | `memory.tables`   | none      | `name(col type, ...); name(col type, ...)`      |
//! | `memory.splits`   | `1`       | Splits per table scan                           |
//! | `memory.writable` | `false`   | Publish a record sink provider                  |

mod connector;
mod factory;
mod tables;

pub use connector::{MemoryConnector, MemoryOptions};
pub use factory::{MemoryConnectorFactory, MEMORY_CONNECTOR_NAME};
pub use tables::MemoryTables;
