// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

//! Request bodies. Unknown fields are ignored so that clients sending
//! capacity or billing settings are accepted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tabula_store::{
	AttributeDefinition, GlobalIndexToCreate, LocalIndexToCreate, Projection, ProjectionType, TableToCreate,
};
use tabula_type::{Error, ScalarType, SchemaViolation};

use crate::value::AttributeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
	Hash,
	Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
	pub attribute_name: String,
	pub key_type: KeyType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinitionElement {
	pub attribute_name: String,
	pub attribute_type: ScalarType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WireProjectionType {
	All,
	KeysOnly,
	Include,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectionElement {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub projection_type: Option<WireProjectionType>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub non_key_attributes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecondaryIndexElement {
	pub index_name: String,
	pub key_schema: Vec<KeySchemaElement>,
	#[serde(default)]
	pub projection: ProjectionElement,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTableRequest {
	pub table_name: String,
	pub key_schema: Vec<KeySchemaElement>,
	#[serde(default)]
	pub attribute_definitions: Vec<AttributeDefinitionElement>,
	#[serde(default)]
	pub global_secondary_indexes: Vec<SecondaryIndexElement>,
	#[serde(default)]
	pub local_secondary_indexes: Vec<SecondaryIndexElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnValues {
	#[default]
	None,
	AllOld,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemRequest {
	pub table_name: String,
	pub item: AttributeMap,
	#[serde(default)]
	pub return_values: ReturnValues,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemRequest {
	pub table_name: String,
	pub key: AttributeMap,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryRequest {
	pub table_name: String,
	#[serde(default)]
	pub index_name: Option<String>,
	pub key_condition_expression: String,
	#[serde(default)]
	pub expression_attribute_names: IndexMap<String, String>,
	#[serde(default)]
	pub expression_attribute_values: AttributeMap,
	#[serde(default)]
	pub limit: Option<usize>,
	#[serde(default)]
	pub scan_index_forward: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableRequest {
	pub table_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTablesRequest {
	#[serde(default)]
	pub exclusive_start_table_name: Option<String>,
	#[serde(default)]
	pub limit: Option<usize>,
}

impl From<ProjectionElement> for Projection {
	fn from(element: ProjectionElement) -> Self {
		Projection {
			projection_type: match element.projection_type {
				None | Some(WireProjectionType::All) => ProjectionType::All,
				Some(WireProjectionType::KeysOnly) => ProjectionType::KeysOnly,
				Some(WireProjectionType::Include) => ProjectionType::Include,
			},
			non_key_attributes: element.non_key_attributes,
		}
	}
}

impl From<&Projection> for ProjectionElement {
	fn from(projection: &Projection) -> Self {
		ProjectionElement {
			projection_type: Some(match projection.projection_type {
				ProjectionType::All => WireProjectionType::All,
				ProjectionType::KeysOnly => WireProjectionType::KeysOnly,
				ProjectionType::Include => WireProjectionType::Include,
			}),
			non_key_attributes: projection.non_key_attributes.clone(),
		}
	}
}

/// The HASH and RANGE attribute names of a key schema.
#[derive(Debug, Default)]
struct SplitKeySchema {
	hash: Option<String>,
	range: Option<String>,
}

fn split_key_schema(table: &str, owner: &str, elements: Vec<KeySchemaElement>) -> tabula_type::Result<SplitKeySchema> {
	let malformed = |reason: &str| {
		Error::schema(
			table,
			SchemaViolation::MalformedKeySchema {
				owner: owner.to_string(),
				reason: reason.to_string(),
			},
		)
	};

	let mut split = SplitKeySchema::default();
	for element in elements {
		let slot = match element.key_type {
			KeyType::Hash => &mut split.hash,
			KeyType::Range => &mut split.range,
		};
		if slot.replace(element.attribute_name).is_some() {
			return Err(malformed(match element.key_type {
				KeyType::Hash => "more than one HASH element",
				KeyType::Range => "more than one RANGE element",
			}));
		}
	}
	Ok(split)
}

fn missing_hash(table: &str, owner: &str) -> Error {
	Error::schema(
		table,
		SchemaViolation::MalformedKeySchema {
			owner: owner.to_string(),
			reason: "a HASH element is required".to_string(),
		},
	)
}

impl CreateTableRequest {
	pub fn into_table(self) -> tabula_type::Result<TableToCreate> {
		let table = self.table_name;
		let owner = "the table";
		let key = split_key_schema(&table, owner, self.key_schema)?;
		let Some(partition_key) = key.hash else {
			return Err(missing_hash(&table, owner));
		};

		let mut global_indexes = Vec::with_capacity(self.global_secondary_indexes.len());
		for index in self.global_secondary_indexes {
			let owner = format!("index '{}'", index.index_name);
			let key = split_key_schema(&table, &owner, index.key_schema)?;
			let Some(hash) = key.hash else {
				return Err(missing_hash(&table, &owner));
			};
			global_indexes.push(GlobalIndexToCreate {
				name: index.index_name,
				partition_key: hash,
				sort_key: key.range,
				projection: index.projection.into(),
			});
		}

		let mut local_indexes = Vec::with_capacity(self.local_secondary_indexes.len());
		for index in self.local_secondary_indexes {
			let owner = format!("index '{}'", index.index_name);
			let key = split_key_schema(&table, &owner, index.key_schema)?;
			if let Some(hash) = key.hash.filter(|hash| *hash != partition_key) {
				return Err(Error::schema(
					&table,
					SchemaViolation::LocalIndexPartitionKey {
						index: index.index_name,
						expected: partition_key,
						attribute: hash,
					},
				));
			}
			let Some(range) = key.range else {
				return Err(Error::schema(
					&table,
					SchemaViolation::MalformedKeySchema {
						owner,
						reason: "a RANGE element is required for a local index".to_string(),
					},
				));
			};
			local_indexes.push(LocalIndexToCreate {
				name: index.index_name,
				sort_key: range,
				projection: index.projection.into(),
			});
		}

		Ok(TableToCreate {
			name: table,
			partition_key,
			sort_key: key.range,
			attribute_definitions: self
				.attribute_definitions
				.into_iter()
				.map(|definition| AttributeDefinition::new(definition.attribute_name, definition.attribute_type))
				.collect(),
			global_indexes,
			local_indexes,
		})
	}
}
