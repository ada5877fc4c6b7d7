// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use crate::{
	error::diagnostic::Diagnostic,
	value::{ScalarType, ValueKind},
};

pub fn key_missing(table: &str, attribute: &str) -> Diagnostic {
	Diagnostic {
		code: "KEY_001".to_string(),
		message: format!("missing key attribute '{}' for table '{}'", attribute, table),
		label: Some("incomplete primary key".to_string()),
		help: Some(format!("provide a value for '{}'", attribute)),
		notes: vec!["items and keys must carry the partition key and, if declared, the sort key".to_string()],
	}
}

pub fn type_mismatch(table: &str, attribute: &str, expected: ScalarType, actual: ValueKind) -> Diagnostic {
	Diagnostic {
		code: "KEY_002".to_string(),
		message: format!(
			"key attribute '{}' of table '{}' must be of type {}, got {}",
			attribute, table, expected, actual
		),
		label: Some("key value of the wrong type".to_string()),
		help: Some(format!("send '{}' as a {} value", attribute, expected)),
		notes: vec!["key attribute types are fixed by the table's attribute definitions".to_string()],
	}
}
