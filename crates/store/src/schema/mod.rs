// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use serde::{Deserialize, Serialize};
use tabula_type::ScalarType;

pub use create::{GlobalIndexToCreate, LocalIndexToCreate, TableToCreate};

mod create;

/// An attribute name with its declared scalar type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
	pub name: String,
	pub r#type: ScalarType,
}

impl AttributeDefinition {
	pub fn new(name: impl Into<String>, r#type: ScalarType) -> Self {
		Self {
			name: name.into(),
			r#type,
		}
	}

	pub fn string(name: impl Into<String>) -> Self {
		Self::new(name, ScalarType::String)
	}

	pub fn number(name: impl Into<String>) -> Self {
		Self::new(name, ScalarType::Number)
	}
}

/// A partition key and an optional sort key, with resolved types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySchema {
	pub partition: AttributeDefinition,
	pub sort: Option<AttributeDefinition>,
}

impl KeySchema {
	pub fn partition_name(&self) -> &str {
		&self.partition.name
	}

	pub fn sort_name(&self) -> Option<&str> {
		self.sort.as_ref().map(|s| s.name.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionType {
	#[default]
	All,
	KeysOnly,
	Include,
}

/// Index projection settings. Stored and echoed, but every query returns full
/// items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Projection {
	pub projection_type: ProjectionType,
	pub non_key_attributes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
	Global,
	Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
	pub name: String,
	pub kind: IndexKind,
	/// For local indexes the partition key is the table partition key.
	pub key: KeySchema,
	pub projection: Projection,
}

/// A persisted table descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
	pub name: String,
	pub key: KeySchema,
	pub attributes: Vec<AttributeDefinition>,
	pub indexes: Vec<IndexDef>,
	/// Monotonic creation sequence within the store.
	pub sequence: u64,
}

impl TableDef {
	pub fn find_index(&self, name: &str) -> Option<&IndexDef> {
		self.indexes.iter().find(|index| index.name == name)
	}

	pub fn global_indexes(&self) -> impl Iterator<Item = &IndexDef> {
		self.indexes.iter().filter(|index| index.kind == IndexKind::Global)
	}

	pub fn local_indexes(&self) -> impl Iterator<Item = &IndexDef> {
		self.indexes.iter().filter(|index| index.kind == IndexKind::Local)
	}
}
