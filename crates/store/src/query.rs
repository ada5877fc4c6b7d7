// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use crate::condition::KeyCondition;

/// A key-condition query against a table or one of its indexes.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
	pub condition: KeyCondition,
	/// Query this index instead of the table's primary key.
	pub index: Option<String>,
	pub limit: Option<usize>,
	/// Ascending sort order when true.
	pub scan_forward: bool,
}

impl QueryRequest {
	pub fn new(condition: KeyCondition) -> Self {
		Self {
			condition,
			index: None,
			limit: None,
			scan_forward: true,
		}
	}

	pub fn with_index(mut self, index: impl Into<String>) -> Self {
		self.index = Some(index.into());
		self
	}

	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);
		self
	}

	pub fn descending(mut self) -> Self {
		self.scan_forward = false;
		self
	}
}
