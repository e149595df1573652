// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `onboarding` - onboarding attempts, state transitions, probe outcomes
//! * `registry` - factory registration and provider publication

use tracing::Span;

pub mod onboarding;
pub mod registry;

/// Emits a message as a `tracing` event with structured fields.
pub trait StructuredLog {
    /// Log the message at its level, with its fields attached.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
