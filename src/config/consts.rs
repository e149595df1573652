// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Prefix of the connector id derived for a catalog's information schema
pub const INFORMATION_SCHEMA_CONNECTOR_PREFIX: &str = "$info_schema@";
/// Schema name under which information schema tables are exposed
pub const INFORMATION_SCHEMA_NAME: &str = "information_schema";
/// Node id used for information schema splits when none is configured
pub const DEFAULT_NODE_ID: &str = "local";
/// Rows per page when a record set provider is adapted to a data stream
pub const DEFAULT_PAGE_SIZE: usize = 1024;
