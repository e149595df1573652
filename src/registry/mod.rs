// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Registries shared by the coordinator and the rest of the engine.
//!
//! * [`FactoryRegistry`] - connector type name to factory
//! * [`InstanceRegistry`] - connector id to live connector instance
//! * [`InMemoryProviderRegistry`] and [`MetadataManager`] - in-process
//!   subsystem registries, bundled by [`Subsystems`]

mod factory;
mod instance;
mod metadata;
mod subsystem;

pub use factory::FactoryRegistry;
pub use instance::{InstanceRegistry, Reservation};
pub use metadata::MetadataManager;
pub use subsystem::{InMemoryProviderRegistry, Subsystems};
