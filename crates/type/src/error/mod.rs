// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::value::{ScalarType, ValueKind};

pub mod diagnostic;

/// Errors reported by table store operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("table '{table}' already exists")]
	TableAlreadyExists {
		table: String,
	},

	#[error("table '{table}' not found")]
	TableNotFound {
		table: String,
	},

	#[error("index '{index}' not found on table '{table}'")]
	IndexNotFound {
		table: String,
		index: String,
	},

	#[error("invalid schema for table '{table}': {violation}")]
	SchemaInvalid {
		table: String,
		violation: SchemaViolation,
	},

	#[error("missing key attribute '{attribute}' for table '{table}'")]
	KeyMissing {
		table: String,
		attribute: String,
	},

	#[error("key attribute '{attribute}' of table '{table}' must be of type {expected}, got {actual}")]
	TypeMismatch {
		table: String,
		attribute: String,
		expected: ScalarType,
		actual: ValueKind,
	},

	#[error("invalid key condition on table '{table}': {violation}")]
	ConditionInvalid {
		table: String,
		violation: ConditionViolation,
	},
}

/// The error kinds, without their payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
	TableAlreadyExists,
	TableNotFound,
	IndexNotFound,
	SchemaInvalid,
	KeyMissing,
	TypeMismatch,
	ConditionInvalid,
}

impl ErrorKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ErrorKind::TableAlreadyExists => "TableAlreadyExists",
			ErrorKind::TableNotFound => "TableNotFound",
			ErrorKind::IndexNotFound => "IndexNotFound",
			ErrorKind::SchemaInvalid => "SchemaInvalid",
			ErrorKind::KeyMissing => "KeyMissing",
			ErrorKind::TypeMismatch => "TypeMismatch",
			ErrorKind::ConditionInvalid => "ConditionInvalid",
		}
	}
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::TableAlreadyExists {
				..
			} => ErrorKind::TableAlreadyExists,
			Error::TableNotFound {
				..
			} => ErrorKind::TableNotFound,
			Error::IndexNotFound {
				..
			} => ErrorKind::IndexNotFound,
			Error::SchemaInvalid {
				..
			} => ErrorKind::SchemaInvalid,
			Error::KeyMissing {
				..
			} => ErrorKind::KeyMissing,
			Error::TypeMismatch {
				..
			} => ErrorKind::TypeMismatch,
			Error::ConditionInvalid {
				..
			} => ErrorKind::ConditionInvalid,
		}
	}

	pub fn table(&self) -> &str {
		match self {
			Error::TableAlreadyExists {
				table,
			}
			| Error::TableNotFound {
				table,
			}
			| Error::IndexNotFound {
				table,
				..
			}
			| Error::SchemaInvalid {
				table,
				..
			}
			| Error::KeyMissing {
				table,
				..
			}
			| Error::TypeMismatch {
				table,
				..
			}
			| Error::ConditionInvalid {
				table,
				..
			} => table,
		}
	}

	pub fn schema(table: impl Into<String>, violation: SchemaViolation) -> Self {
		Error::SchemaInvalid {
			table: table.into(),
			violation,
		}
	}

	pub fn condition(table: impl Into<String>, violation: ConditionViolation) -> Self {
		Error::ConditionInvalid {
			table: table.into(),
			violation,
		}
	}
}

/// Why a table definition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaViolation {
	#[error("table name must not be empty")]
	EmptyTableName,

	#[error("table name is {length} bytes long, the maximum is {max}")]
	TableNameTooLong {
		length: usize,
		max: usize,
	},

	#[error("malformed key schema for {owner}: {reason}")]
	MalformedKeySchema {
		owner: String,
		reason: String,
	},

	#[error("key attribute '{attribute}' has no attribute definition")]
	MissingAttributeDefinition {
		attribute: String,
	},

	#[error("attribute '{attribute}' is defined more than once with different types")]
	ConflictingAttributeDefinition {
		attribute: String,
	},

	#[error("{owner} uses attribute '{attribute}' as both partition and sort key")]
	RepeatedKeyAttribute {
		owner: String,
		attribute: String,
	},

	#[error("index name must not be empty")]
	EmptyIndexName,

	#[error("index name '{index}' is declared more than once")]
	DuplicateIndexName {
		index: String,
	},

	#[error("local index '{index}' requires the table to declare a sort key")]
	LocalIndexWithoutTableSortKey {
		index: String,
	},

	#[error("local index '{index}' must use the table partition key '{expected}', not '{attribute}'")]
	LocalIndexPartitionKey {
		index: String,
		expected: String,
		attribute: String,
	},

	#[error("local index '{index}' must declare a sort key different from the table sort key")]
	LocalIndexSortKey {
		index: String,
	},

	#[error("{count} global indexes declared, the maximum is {max}")]
	TooManyGlobalIndexes {
		count: usize,
		max: usize,
	},

	#[error("{count} local indexes declared, the maximum is {max}")]
	TooManyLocalIndexes {
		count: usize,
		max: usize,
	},
}

/// Why a key condition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionViolation {
	#[error("no equality condition on partition key '{attribute}'")]
	MissingPartitionCondition {
		attribute: String,
	},

	#[error("partition key '{attribute}' only supports the equality operator")]
	PartitionConditionNotEquality {
		attribute: String,
	},

	#[error("more than one condition on partition key '{attribute}'")]
	MultiplePartitionConditions {
		attribute: String,
	},

	#[error("more than one condition on sort key '{attribute}'")]
	MultipleSortConditions {
		attribute: String,
	},

	#[error("attribute '{attribute}' is not a key attribute of the queried key schema")]
	NotAKeyAttribute {
		attribute: String,
	},

	#[error("begins_with is not supported on number key '{attribute}'")]
	BeginsWithOnNumber {
		attribute: String,
	},

	#[error("lower bound of BETWEEN on '{attribute}' is greater than the upper bound")]
	InvertedRange {
		attribute: String,
	},

	#[error("syntax error at position {position}: {message}")]
	Syntax {
		position: usize,
		message: String,
	},

	#[error("unsupported operator '{operator}'")]
	UnsupportedOperator {
		operator: String,
	},

	#[error("attribute name placeholder '{name}' is not defined")]
	UnboundName {
		name: String,
	},

	#[error("attribute value placeholder '{name}' is not defined")]
	UnboundValue {
		name: String,
	},

	#[error("attribute name placeholder '{name}' is never used")]
	UnusedName {
		name: String,
	},

	#[error("attribute value placeholder '{name}' is never used")]
	UnusedValue {
		name: String,
	},

	#[error("value '{name}' is not a string or a number")]
	NonScalarValue {
		name: String,
	},
}
