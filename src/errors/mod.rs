// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod connector;
mod onboard;
mod probe;
mod publish;
mod registration;

pub use config::{ConfigError, ValidationError};
pub use connector::ConnectorError;
pub use onboard::OnboardError;
pub use probe::ProbeError;
pub use publish::PublishError;
pub use registration::RegistrationError;
