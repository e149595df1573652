// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for catalog and global connector entries.
//!
//! Catalog names and global ids become connector ids, so they share one
//! namespace. The checks, run over both lists together:
//!
//! 1. **Non-empty**: every entry has a name and a connector type
//! 2. **Uniqueness**: no id appears twice across catalogs and globals
//! 3. **Reserved prefix**: no id starts with the information schema prefix
//!
//! All problems are collected and returned at once.
//!
//! ```rust
//! use the_switchyard::config::{parse_yaml, validate_config};
//! use the_switchyard::errors::ValidationError;
//!
//! let config = parse_yaml(
//!     "catalogs:\n  - name: sales\n    connector: memory\nglobals:\n  - id: sales\n    connector: memory\n",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     validate_config(&config),
//!     Err(vec![ValidationError::DuplicateConnectorId { connector_id: "sales".to_string() }])
//! );
//! ```

use crate::config::consts::INFORMATION_SCHEMA_CONNECTOR_PREFIX;
use crate::config::Config;
use crate::errors::ValidationError;
use std::collections::HashSet;

/// Validate every entry of `config`.
///
/// # Returns
///
/// * `Ok(())` - every entry can be handed to the coordinator
/// * `Err(Vec<ValidationError>)` - every problem found
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.coordinator.page_size == Some(0) {
        errors.push(ValidationError::InvalidPageSize);
    }

    let entries = config
        .catalogs
        .iter()
        .map(|c| (c.name.as_str(), c.connector.as_str()))
        .chain(config.globals.iter().map(|g| (g.id.as_str(), g.connector.as_str())));

    let mut seen = HashSet::new();
    for (index, (connector_id, connector)) in entries.enumerate() {
        if connector_id.trim().is_empty() {
            errors.push(ValidationError::EmptyConnectorId { index });
            continue;
        }
        if connector.trim().is_empty() {
            errors.push(ValidationError::EmptyConnectorType {
                connector_id: connector_id.to_string(),
            });
        }
        if connector_id.starts_with(INFORMATION_SCHEMA_CONNECTOR_PREFIX) {
            errors.push(ValidationError::ReservedPrefix {
                connector_id: connector_id.to_string(),
                prefix: INFORMATION_SCHEMA_CONNECTOR_PREFIX,
            });
        }
        if !seen.insert(connector_id) {
            errors.push(ValidationError::DuplicateConnectorId {
                connector_id: connector_id.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, CoordinatorConfig, GlobalConnectorConfig};
    use std::collections::HashMap;

    fn catalog(name: &str, connector: &str) -> CatalogConfig {
        CatalogConfig {
            name: name.to_string(),
            connector: connector.to_string(),
            properties: HashMap::new(),
        }
    }

    fn global(id: &str, connector: &str) -> GlobalConnectorConfig {
        GlobalConnectorConfig {
            id: id.to_string(),
            connector: connector.to_string(),
            properties: HashMap::new(),
        }
    }

    #[test]
    fn test_validation() {
        struct TestCase {
            name: &'static str,
            config: Config,
            expected: Result<(), Vec<ValidationError>>,
        }

        let cases = vec![
            TestCase {
                name: "empty config",
                config: Config::default(),
                expected: Ok(()),
            },
            TestCase {
                name: "catalogs and globals",
                config: Config {
                    catalogs: vec![catalog("sales", "memory"), catalog("hr", "memory")],
                    globals: vec![global("system", "memory")],
                    ..Config::default()
                },
                expected: Ok(()),
            },
            TestCase {
                name: "empty names",
                config: Config {
                    catalogs: vec![catalog("", "memory")],
                    globals: vec![global("  ", "memory")],
                    ..Config::default()
                },
                expected: Err(vec![
                    ValidationError::EmptyConnectorId { index: 0 },
                    ValidationError::EmptyConnectorId { index: 1 },
                ]),
            },
            TestCase {
                name: "missing connector type",
                config: Config {
                    catalogs: vec![catalog("sales", "")],
                    ..Config::default()
                },
                expected: Err(vec![ValidationError::EmptyConnectorType {
                    connector_id: "sales".to_string(),
                }]),
            },
            TestCase {
                name: "duplicate across lists",
                config: Config {
                    catalogs: vec![catalog("sales", "memory")],
                    globals: vec![global("sales", "memory")],
                    ..Config::default()
                },
                expected: Err(vec![ValidationError::DuplicateConnectorId {
                    connector_id: "sales".to_string(),
                }]),
            },
            TestCase {
                name: "reserved prefix",
                config: Config {
                    globals: vec![global("$info_schema@sales", "memory")],
                    ..Config::default()
                },
                expected: Err(vec![ValidationError::ReservedPrefix {
                    connector_id: "$info_schema@sales".to_string(),
                    prefix: "$info_schema@",
                }]),
            },
            TestCase {
                name: "zero page size",
                config: Config {
                    coordinator: CoordinatorConfig {
                        node_id: None,
                        page_size: Some(0),
                    },
                    ..Config::default()
                },
                expected: Err(vec![ValidationError::InvalidPageSize]),
            },
        ];

        for case in cases {
            assert_eq!(validate_config(&case.config), case.expected, "Test case '{}'", case.name);
        }
    }
}
