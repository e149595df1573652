// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_NODE_ID, DEFAULT_PAGE_SIZE};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Declarative description of the connectors a coordinator should onboard.
///
/// # Fields
/// * `coordinator` - Coordinator options (optional, all fields defaulted)
/// * `catalogs` - Catalog connectors; each entry's name is both catalog and connector id
/// * `globals` - Connectors without a catalog whose metadata is visible everywhere
///
/// # Example
/// ```yaml
/// coordinator:
///   node_id: "coordinator-1"
///   page_size: 512
/// catalogs:
///   - name: sales
///     connector: memory
///     properties:
///       memory.schema: retail
///       memory.tables: "orders(id bigint, total double)"
/// globals:
///   - id: system
///     connector: memory
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub coordinator: CoordinatorConfig,
    #[serde(default)]
    pub catalogs: Vec<CatalogConfig>,
    #[serde(default)]
    pub globals: Vec<GlobalConnectorConfig>,
}

/// Coordinator options. Both fields fall back to built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct CoordinatorConfig {
    pub node_id: Option<String>,
    pub page_size: Option<usize>,
}

impl CoordinatorConfig {
    /// Host named in information schema splits.
    pub fn get_node_id(&self) -> &str {
        self.node_id.as_deref().unwrap_or(DEFAULT_NODE_ID)
    }

    /// Rows per page when a record set provider is adapted.
    pub fn get_page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// A catalog backed by one connector.
///
/// ```yaml
/// name: sales
/// connector: memory
/// properties:
///   memory.splits: "4"
/// ```
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    pub name: String,
    pub connector: String,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

/// A connector onboarded without a catalog.
#[derive(Debug, Deserialize)]
pub struct GlobalConnectorConfig {
    pub id: String,
    pub connector: String,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

pub fn parse_yaml(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

pub fn parse_toml(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load a config file; the format follows the extension (`.yaml`, `.yml`, `.toml`).
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let parse: fn(&str) -> Result<Config, ConfigError> = match extension.as_deref() {
        Some("yaml") | Some("yml") => parse_yaml,
        Some("toml") => parse_toml,
        _ => return Err(ConfigError::UnsupportedFormat(display)),
    };

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display,
        source,
    })?;
    parse(&content)
}

/// Load a config file and validate its entries
///
/// Every validation error is reported, not only the first.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
