// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::RegistrationError;
use crate::observability::messages::registry::FactoryRegistered;
use crate::observability::messages::StructuredLog;
use crate::traits::ConnectorFactory;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of installable connector types.
///
/// Registration is insert-if-absent and takes only this registry's own lock,
/// so it can run while an onboarding call is in flight.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use the_switchyard::backends::memory::MemoryConnectorFactory;
/// use the_switchyard::registry::FactoryRegistry;
///
/// let factories = FactoryRegistry::new();
/// factories.register_factory(Arc::new(MemoryConnectorFactory::new())).unwrap();
///
/// assert!(factories.lookup("memory").is_ok());
/// assert!(factories.register_factory(Arc::new(MemoryConnectorFactory::new())).is_err());
/// ```
pub struct FactoryRegistry {
    factories: RwLock<HashMap<String, Arc<dyn ConnectorFactory>>>,
}

impl FactoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Register `factory` under `type_name`.
    ///
    /// # Errors
    ///
    /// `DuplicateFactory` if the name is taken; the existing factory is kept.
    pub fn register(
        &self,
        type_name: impl Into<String>,
        factory: Arc<dyn ConnectorFactory>,
    ) -> Result<(), RegistrationError> {
        let type_name = type_name.into();
        match self.factories.write().entry(type_name) {
            Entry::Occupied(entry) => Err(RegistrationError::DuplicateFactory {
                type_name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                FactoryRegistered {
                    type_name: entry.key(),
                }
                .log();
                entry.insert(factory);
                Ok(())
            }
        }
    }

    /// Register `factory` under its own [`ConnectorFactory::name`].
    pub fn register_factory(
        &self,
        factory: Arc<dyn ConnectorFactory>,
    ) -> Result<(), RegistrationError> {
        let type_name = factory.name().to_string();
        self.register(type_name, factory)
    }

    /// # Errors
    ///
    /// `UnknownConnectorType` if nothing is registered under `type_name`.
    pub fn lookup(&self, type_name: &str) -> Result<Arc<dyn ConnectorFactory>, RegistrationError> {
        self.factories
            .read()
            .get(type_name)
            .cloned()
            .ok_or_else(|| RegistrationError::UnknownConnectorType {
                type_name: type_name.to_string(),
            })
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
