// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use crate::error::{SchemaViolation, diagnostic::Diagnostic};

pub fn table_already_exists(table: &str) -> Diagnostic {
	Diagnostic {
		code: "TABLE_001".to_string(),
		message: format!("table '{}' already exists", table),
		label: Some("duplicate table definition".to_string()),
		help: Some("choose a different name, or describe the existing table instead".to_string()),
		notes: vec!["table names are unique within a store and cannot be reused".to_string()],
	}
}

pub fn table_not_found(table: &str) -> Diagnostic {
	Diagnostic {
		code: "TABLE_002".to_string(),
		message: format!("table '{}' not found", table),
		label: Some("unknown table".to_string()),
		help: Some("check the table name for typos, or create the table first".to_string()),
		notes: vec![],
	}
}

pub fn index_not_found(table: &str, index: &str) -> Diagnostic {
	Diagnostic {
		code: "INDEX_001".to_string(),
		message: format!("index '{}' not found on table '{}'", index, table),
		label: Some("unknown index".to_string()),
		help: Some("indexes can only be declared when the table is created".to_string()),
		notes: vec![],
	}
}

pub fn schema_invalid(table: &str, violation: SchemaViolation) -> Diagnostic {
	let (code, help) = match &violation {
		SchemaViolation::EmptyTableName => ("SCHEMA_001", "give the table a non-empty name"),
		SchemaViolation::TableNameTooLong {
			..
		} => ("SCHEMA_002", "use a shorter table name"),
		SchemaViolation::MalformedKeySchema {
			..
		} => ("SCHEMA_003", "declare exactly one HASH key and at most one RANGE key"),
		SchemaViolation::MissingAttributeDefinition {
			..
		} => ("SCHEMA_004", "add an attribute definition with type S or N for every key attribute"),
		SchemaViolation::ConflictingAttributeDefinition {
			..
		} => ("SCHEMA_005", "define each attribute exactly once"),
		SchemaViolation::RepeatedKeyAttribute {
			..
		} => ("SCHEMA_006", "use different attributes for the partition and the sort key"),
		SchemaViolation::EmptyIndexName => ("SCHEMA_007", "give every index a non-empty name"),
		SchemaViolation::DuplicateIndexName {
			..
		} => ("SCHEMA_008", "index names must be unique across global and local indexes"),
		SchemaViolation::LocalIndexWithoutTableSortKey {
			..
		} => ("SCHEMA_009", "declare a sort key on the table, or use a global index"),
		SchemaViolation::LocalIndexPartitionKey {
			..
		} => ("SCHEMA_010", "a local index shares the table partition key; use a global index for a different one"),
		SchemaViolation::LocalIndexSortKey {
			..
		} => ("SCHEMA_011", "declare an alternate RANGE key for the local index"),
		SchemaViolation::TooManyGlobalIndexes {
			..
		} => ("SCHEMA_012", "remove some global indexes"),
		SchemaViolation::TooManyLocalIndexes {
			..
		} => ("SCHEMA_013", "remove some local indexes"),
	};

	Diagnostic {
		code: code.to_string(),
		message: format!("invalid schema for table '{}': {}", table, violation),
		label: Some("table definition rejected".to_string()),
		help: Some(help.to_string()),
		notes: vec![],
	}
}
