// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // connector implementations + adapters
pub mod config;        // catalog file loading
pub mod engine;        // probe, publication, coordinator
pub mod errors;        // error handling
pub mod model;         // shared data types
pub mod observability;
pub mod registry;      // factory, instance and subsystem registries
pub mod traits;        // connector + provider contracts
