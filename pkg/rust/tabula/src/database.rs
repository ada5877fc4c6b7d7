// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use tabula_store::TableStore;
use tabula_wire_format::{ErrorResponse, handle};

/// An in-process table store with a JSON request boundary.
#[derive(Clone)]
pub struct Tabula {
	store: TableStore,
}

/// Outcome of [`Tabula::execute`]. On failure `body` is an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
	pub ok: bool,
	pub body: Json,
}

impl Tabula {
	pub fn new(store: TableStore) -> Self {
		Self {
			store,
		}
	}

	/// The typed store API.
	pub fn store(&self) -> &TableStore {
		&self.store
	}

	/// Runs a named operation on an attribute-value JSON body.
	pub fn execute(&self, operation: &str, body: &str) -> Response {
		match handle(&self.store, operation, body) {
			Ok(body) => Response {
				ok: true,
				body,
			},
			Err(err) => Response {
				ok: false,
				body: serde_json::to_value(ErrorResponse::from(err)).unwrap_or_default(),
			},
		}
	}

	pub fn execute_json(&self, operation: &str, body: &Json) -> Response {
		self.execute(operation, &body.to_string())
	}
}
