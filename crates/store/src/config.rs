// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use serde::{Deserialize, Serialize};

/// Configuration for a [`TableStore`](crate::TableStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
	/// Maximum number of global secondary indexes per table.
	pub max_global_indexes: usize,
	/// Maximum number of local secondary indexes per table.
	pub max_local_indexes: usize,
	/// Maximum table name length in bytes.
	pub max_table_name_length: usize,
	/// Result limit applied to queries that do not set one (None = unbounded)
	pub default_query_limit: Option<usize>,
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			max_global_indexes: 20,
			max_local_indexes: 5,
			max_table_name_length: 255,
			default_query_limit: None,
		}
	}
}

impl StoreConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_max_global_indexes(mut self, max: usize) -> Self {
		self.max_global_indexes = max;
		self
	}

	pub fn with_max_local_indexes(mut self, max: usize) -> Self {
		self.max_local_indexes = max;
		self
	}

	pub fn with_max_table_name_length(mut self, max: usize) -> Self {
		self.max_table_name_length = max;
		self
	}

	pub fn with_default_query_limit(mut self, limit: usize) -> Self {
		self.default_query_limit = Some(limit);
		self
	}
}
