// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use tabula_store::{StoreConfig, TableStore};
#[cfg(feature = "sub_tracing")]
use tabula_sub_tracing::{TracingBuilder, TracingConfigurator, TracingError};
use tracing::debug;

use crate::Tabula;

pub struct TabulaBuilder {
	config: StoreConfig,
	#[cfg(feature = "sub_tracing")]
	tracing_configurator: Option<TracingConfigurator>,
}

impl Default for TabulaBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl TabulaBuilder {
	pub fn new() -> Self {
		Self {
			config: StoreConfig::default(),
			#[cfg(feature = "sub_tracing")]
			tracing_configurator: None,
		}
	}

	pub fn with_config(mut self, config: StoreConfig) -> Self {
		self.config = config;
		self
	}

	/// Installs a global tracing subscriber on build, configured by
	/// `configurator`. Without this call no subscriber is installed.
	#[cfg(feature = "sub_tracing")]
	pub fn with_tracing<F>(mut self, configurator: F) -> Self
	where
		F: FnOnce(TracingBuilder) -> TracingBuilder + Send + 'static,
	{
		self.tracing_configurator = Some(Box::new(configurator));
		self
	}

	pub fn build(self) -> crate::Result<Tabula> {
		#[cfg(feature = "sub_tracing")]
		if let Some(configurator) = self.tracing_configurator {
			match configurator(TracingBuilder::new()).try_init() {
				Ok(()) => {}
				// Another component already owns the global subscriber.
				Err(TracingError::AlreadyInstalled {
					message,
				}) => debug!(%message, "keeping existing tracing subscriber"),
				Err(err) => return Err(err.into()),
			}
		}

		debug!(config = ?self.config, "table store started");
		Ok(Tabula::new(TableStore::new(self.config)))
	}
}
