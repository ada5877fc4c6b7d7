// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::TracingError;

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
	#[default]
	Compact,
	Pretty,
	Json,
}

/// Builder for the global tracing subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingBuilder {
	filter: String,
	format: Format,
	/// When set, `RUST_LOG` takes precedence over `filter`.
	from_env: bool,
	with_target: bool,
	with_thread_ids: bool,
	with_ansi: bool,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self {
			filter: "info".to_string(),
			format: Format::Compact,
			from_env: true,
			with_target: true,
			with_thread_ids: false,
			with_ansi: true,
		}
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the filter directive, e.g. `"warn,tabula_store=debug"`.
	pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
		self.filter = filter.into();
		self
	}

	pub fn with_format(mut self, format: Format) -> Self {
		self.format = format;
		self
	}

	pub fn with_env(mut self, from_env: bool) -> Self {
		self.from_env = from_env;
		self
	}

	pub fn with_target(mut self, with_target: bool) -> Self {
		self.with_target = with_target;
		self
	}

	pub fn with_thread_ids(mut self, with_thread_ids: bool) -> Self {
		self.with_thread_ids = with_thread_ids;
		self
	}

	pub fn with_ansi(mut self, with_ansi: bool) -> Self {
		self.with_ansi = with_ansi;
		self
	}

	pub fn filter(&self) -> &str {
		&self.filter
	}

	pub fn format(&self) -> Format {
		self.format
	}

	pub fn env_filter(&self) -> Result<EnvFilter, TracingError> {
		if self.from_env {
			if let Ok(filter) = EnvFilter::try_from_default_env() {
				return Ok(filter);
			}
		}

		EnvFilter::try_new(&self.filter).map_err(|err| TracingError::InvalidFilter {
			directive: self.filter.clone(),
			message: err.to_string(),
		})
	}

	/// Installs the subscriber as the global default.
	pub fn try_init(self) -> Result<(), TracingError> {
		let builder = tracing_subscriber::fmt()
			.with_env_filter(self.env_filter()?)
			.with_target(self.with_target)
			.with_thread_ids(self.with_thread_ids)
			.with_ansi(self.with_ansi);

		let result = match self.format {
			Format::Compact => builder.compact().try_init(),
			Format::Pretty => builder.pretty().try_init(),
			Format::Json => builder.json().try_init(),
		};

		result.map_err(|err| TracingError::AlreadyInstalled {
			message: err.to_string(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let builder = TracingBuilder::default();
		assert_eq!(builder.filter(), "info");
		assert_eq!(builder.format(), Format::Compact);
	}

	#[test]
	fn test_invalid_filter() {
		let err = TracingBuilder::new().with_env(false).with_filter("tabula=loud").env_filter().unwrap_err();
		assert!(matches!(err, TracingError::InvalidFilter { .. }));
	}

	#[test]
	fn test_deserialize_partial() {
		let builder: TracingBuilder = serde_json::from_str(r#"{"filter": "debug", "format": "json"}"#).unwrap();
		assert_eq!(builder.filter(), "debug");
		assert_eq!(builder.format(), Format::Json);
	}
}
