// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

//! Logging setup built on `tracing-subscriber`.

pub use builder::{Format, TracingBuilder};
pub use error::TracingError;

mod builder;
mod error;

/// Adjusts a [`TracingBuilder`] before it is installed.
pub type TracingConfigurator = Box<dyn FnOnce(TracingBuilder) -> TracingBuilder + Send>;
