// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

//! Replays JSON scenario files against an embedded store.
//!
//! A script is an array of steps. Each step names an operation and its request
//! body; `response` asserts the exact response body and `error` asserts the
//! `__type` of a failed request. A step with neither must succeed.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_json::Value as Json;
use tabula::Tabula;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
	pub operation: String,
	#[serde(default)]
	pub request: Json,
	#[serde(default)]
	pub response: Option<Json>,
	#[serde(default)]
	pub error: Option<String>,
}

pub struct Runner {
	db: Tabula,
}

impl Default for Runner {
	fn default() -> Self {
		Self::new()
	}
}

impl Runner {
	pub fn new() -> Self {
		Self {
			db: tabula::embedded().build().expect("failed to build store"),
		}
	}

	/// Executes one step and panics with the step number when it does not
	/// match its expectation.
	pub fn run(&self, index: usize, step: &Step) {
		let body = if step.request.is_null() {
			"{}".to_string()
		} else {
			step.request.to_string()
		};
		let response = self.db.execute(&step.operation, &body);
		let context = format!("step {index} ({})", step.operation);

		match (&step.error, &step.response) {
			(Some(expected), _) => {
				assert!(!response.ok, "{context}: expected {expected}, got {}", response.body);
				assert_eq!(response.body["__type"], Json::String(expected.clone()), "{context}");
			}
			(None, Some(expected)) => {
				assert!(response.ok, "{context}: {}", response.body);
				assert_eq!(&response.body, expected, "{context}");
			}
			(None, None) => assert!(response.ok, "{context}: {}", response.body),
		}
	}
}

pub fn run_path(path: &Path) {
	let source = fs::read_to_string(path).unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
	let steps: Vec<Step> =
		serde_json::from_str(&source).unwrap_or_else(|err| panic!("malformed script {}: {err}", path.display()));

	let runner = Runner::new();
	for (index, step) in steps.iter().enumerate() {
		runner.run(index, step);
	}
}
