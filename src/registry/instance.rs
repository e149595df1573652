// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::RegistrationError;
use crate::model::ConnectorId;
use crate::traits::Connector;
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

enum Slot {
    Reserved,
    Live(Arc<dyn Connector>),
}

/// Live connector instances keyed by connector id.
///
/// An id is claimed with [`reserve`](InstanceRegistry::reserve) before the
/// connector is built, so two callers can never both construct an instance
/// for the same id. The returned [`Reservation`] either commits the finished
/// instance or, when dropped uncommitted, frees the id again.
pub struct InstanceRegistry {
    slots: Mutex<HashMap<ConnectorId, Slot>>,
}

impl InstanceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Claim `connector_id`.
    ///
    /// # Errors
    ///
    /// `DuplicateConnectorId` if the id is live or already reserved.
    pub fn reserve(&self, connector_id: &str) -> Result<Reservation<'_>, RegistrationError> {
        match self.slots.lock().entry(connector_id.to_string()) {
            Entry::Occupied(_) => Err(RegistrationError::DuplicateConnectorId {
                connector_id: connector_id.to_string(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(Slot::Reserved);
                Ok(Reservation {
                    registry: self,
                    connector_id: connector_id.to_string(),
                    committed: false,
                })
            }
        }
    }

    /// # Errors
    ///
    /// `NotFound` if no instance was committed under `connector_id`.
    pub fn get(&self, connector_id: &str) -> Result<Arc<dyn Connector>, RegistrationError> {
        match self.slots.lock().get(connector_id) {
            Some(Slot::Live(connector)) => Ok(Arc::clone(connector)),
            _ => Err(RegistrationError::NotFound {
                connector_id: connector_id.to_string(),
            }),
        }
    }

    /// True if the id is live or reserved.
    pub fn contains(&self, connector_id: &str) -> bool {
        self.slots.lock().contains_key(connector_id)
    }

    /// Id under which this exact instance is live, if any.
    pub fn holder_of(&self, instance: &Arc<dyn Connector>) -> Option<ConnectorId> {
        self.slots.lock().iter().find_map(|(id, slot)| match slot {
            Slot::Live(live) if Arc::ptr_eq(live, instance) => Some(id.clone()),
            _ => None,
        })
    }

    /// Ids of committed instances, sorted.
    pub fn connector_ids(&self) -> Vec<ConnectorId> {
        let mut ids: Vec<ConnectorId> = self
            .slots
            .lock()
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Live(_)))
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn commit(&self, connector_id: &str, instance: Arc<dyn Connector>) {
        self.slots
            .lock()
            .insert(connector_id.to_string(), Slot::Live(instance));
    }

    fn release(&self, connector_id: &str) {
        let mut slots = self.slots.lock();
        if matches!(slots.get(connector_id), Some(Slot::Reserved)) {
            slots.remove(connector_id);
        }
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A claimed connector id awaiting its instance.
#[must_use = "dropping a reservation releases the connector id"]
pub struct Reservation<'a> {
    registry: &'a InstanceRegistry,
    connector_id: ConnectorId,
    committed: bool,
}

impl Reservation<'_> {
    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    /// Store the finished instance under the reserved id.
    pub fn commit(mut self, instance: Arc<dyn Connector>) {
        self.registry.commit(&self.connector_id, instance);
        self.committed = true;
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.registry.release(&self.connector_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::StubConnector;

    #[test]
    fn test_reserve_then_commit() {
        let registry = InstanceRegistry::new();
        let reservation = registry.reserve("sales").unwrap();
        assert_eq!(reservation.connector_id(), "sales");
        assert!(registry.contains("sales"));
        assert!(registry.get("sales").is_err(), "reserved ids are not yet live");

        reservation.commit(Arc::new(StubConnector::complete()));

        assert!(registry.get("sales").is_ok());
        assert_eq!(registry.connector_ids(), vec!["sales".to_string()]);
    }

    #[test]
    fn test_holder_of_matches_identity_not_type() {
        let registry = InstanceRegistry::new();
        let live: Arc<dyn Connector> = Arc::new(StubConnector::complete());
        let other: Arc<dyn Connector> = Arc::new(StubConnector::complete());
        assert_eq!(registry.holder_of(&live), None);

        registry.reserve("sales").unwrap().commit(Arc::clone(&live));

        assert_eq!(registry.holder_of(&live), Some("sales".to_string()));
        assert_eq!(registry.holder_of(&other), None);
    }

    #[test]
    fn test_reserve_rejects_reserved_and_live_ids() {
        let registry = InstanceRegistry::new();
        let pending = registry.reserve("sales").unwrap();

        assert!(matches!(
            registry.reserve("sales"),
            Err(RegistrationError::DuplicateConnectorId { .. })
        ));

        pending.commit(Arc::new(StubConnector::complete()));

        assert!(matches!(
            registry.reserve("sales"),
            Err(RegistrationError::DuplicateConnectorId { .. })
        ));
    }

    #[test]
    fn test_dropped_reservation_frees_the_id() {
        let registry = InstanceRegistry::new();
        {
            let _reservation = registry.reserve("sales").unwrap();
        }

        assert!(!registry.contains("sales"));
        assert!(registry.reserve("sales").is_ok());
    }

    #[test]
    fn test_get_unknown_id() {
        let registry = InstanceRegistry::new();
        assert_eq!(
            registry.get("missing").err(),
            Some(RegistrationError::NotFound {
                connector_id: "missing".to_string()
            })
        );
    }
}
