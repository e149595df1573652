// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic event is a small message struct implementing `Display`
//! and [`messages::StructuredLog`], so log text lives in one place and each
//! event carries structured fields alongside its human-readable form.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::onboarding` - onboarding attempt lifecycle and probe outcomes
//! * `messages::registry` - factory registration and provider publication
//!
//! # Usage
//!
//! ```rust
//! use the_switchyard::observability::messages::registry::FactoryRegistered;
//! use the_switchyard::observability::messages::StructuredLog;
//!
//! FactoryRegistered { type_name: "memory" }.log();
//! ```

pub mod messages;
