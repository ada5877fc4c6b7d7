// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub mod catalog;
pub mod item;
pub mod query;

/// A user facing rendering of an error: stable code, message and hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "[{}] {}", self.code, self.message)
	}
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Error {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			Error::TableAlreadyExists {
				table,
			} => catalog::table_already_exists(&table),
			Error::TableNotFound {
				table,
			} => catalog::table_not_found(&table),
			Error::IndexNotFound {
				table,
				index,
			} => catalog::index_not_found(&table, &index),
			Error::SchemaInvalid {
				table,
				violation,
			} => catalog::schema_invalid(&table, violation),
			Error::KeyMissing {
				table,
				attribute,
			} => item::key_missing(&table, &attribute),
			Error::TypeMismatch {
				table,
				attribute,
				expected,
				actual,
			} => item::type_mismatch(&table, &attribute, expected, actual),
			Error::ConditionInvalid {
				table,
				violation,
			} => query::condition_invalid(&table, violation),
		}
	}
}

impl Error {
	pub fn diagnostic(&self) -> Diagnostic {
		self.clone().into_diagnostic()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{ConditionViolation, SchemaViolation};

	#[test]
	fn test_codes_are_stable() {
		let cases = vec![
			(
				Error::TableAlreadyExists {
					table: "t".to_string(),
				},
				"TABLE_001",
			),
			(
				Error::TableNotFound {
					table: "t".to_string(),
				},
				"TABLE_002",
			),
			(
				Error::IndexNotFound {
					table: "t".to_string(),
					index: "i".to_string(),
				},
				"INDEX_001",
			),
			(Error::schema("t", SchemaViolation::EmptyTableName), "SCHEMA_001"),
			(
				Error::KeyMissing {
					table: "t".to_string(),
					attribute: "pk".to_string(),
				},
				"KEY_001",
			),
			(
				Error::condition(
					"t",
					ConditionViolation::MissingPartitionCondition {
						attribute: "pk".to_string(),
					},
				),
				"CONDITION_001",
			),
		];

		for (err, code) in cases {
			assert_eq!(err.diagnostic().code, code, "{err}");
		}
	}

	#[test]
	fn test_diagnostic_serializes() {
		let diagnostic = Error::TableNotFound {
			table: "users".to_string(),
		}
		.diagnostic();
		let json = serde_json::to_value(&diagnostic).unwrap();
		assert_eq!(json["code"], "TABLE_002");
		assert_eq!(json["message"], "table 'users' not found");
	}
}
