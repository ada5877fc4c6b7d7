// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use serde::{Deserialize, Serialize};
use tabula_store::{IndexDef, IndexKind, KeySchema, TableDef, TableStats};

use crate::{
	request::{AttributeDefinitionElement, KeySchemaElement, KeyType, ProjectionElement},
	value::AttributeMap,
};

const ACTIVE: &str = "ACTIVE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableDescription {
	pub table_name: String,
	pub table_status: String,
	pub key_schema: Vec<KeySchemaElement>,
	pub attribute_definitions: Vec<AttributeDefinitionElement>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub global_secondary_indexes: Vec<IndexDescription>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub local_secondary_indexes: Vec<IndexDescription>,
	pub item_count: usize,
	/// Position of the table in the store's creation order.
	pub creation_sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexDescription {
	pub index_name: String,
	pub index_status: String,
	pub key_schema: Vec<KeySchemaElement>,
	pub projection: ProjectionElement,
	pub item_count: usize,
}

impl TableDescription {
	/// Describes `def`; counts are zero when no statistics are given.
	pub fn new(def: &TableDef, stats: Option<&TableStats>) -> Self {
		let index_count = |index: &IndexDef| {
			stats.and_then(|stats| stats.indexes.iter().find(|s| s.name == index.name)).map_or(0, |s| s.item_count)
		};
		let describe = |kind: IndexKind| -> Vec<IndexDescription> {
			def.indexes
				.iter()
				.filter(|index| index.kind == kind)
				.map(|index| IndexDescription {
					index_name: index.name.clone(),
					index_status: ACTIVE.to_string(),
					key_schema: key_schema(&index.key),
					projection: ProjectionElement::from(&index.projection),
					item_count: index_count(index),
				})
				.collect()
		};

		Self {
			table_name: def.name.clone(),
			table_status: ACTIVE.to_string(),
			key_schema: key_schema(&def.key),
			attribute_definitions: def
				.attributes
				.iter()
				.map(|definition| AttributeDefinitionElement {
					attribute_name: definition.name.clone(),
					attribute_type: definition.r#type,
				})
				.collect(),
			global_secondary_indexes: describe(IndexKind::Global),
			local_secondary_indexes: describe(IndexKind::Local),
			item_count: stats.map_or(0, |stats| stats.item_count),
			creation_sequence: def.sequence,
		}
	}
}

fn key_schema(key: &KeySchema) -> Vec<KeySchemaElement> {
	let mut elements = vec![KeySchemaElement {
		attribute_name: key.partition.name.clone(),
		key_type: KeyType::Hash,
	}];
	if let Some(sort) = &key.sort {
		elements.push(KeySchemaElement {
			attribute_name: sort.name.clone(),
			key_type: KeyType::Range,
		});
	}
	elements
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTableResponse {
	pub table_description: TableDescription,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemResponse {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub attributes: Option<AttributeMap>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemResponse {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub item: Option<AttributeMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryResponse {
	pub items: Vec<AttributeMap>,
	pub count: usize,
	pub scanned_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableResponse {
	pub table: TableDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTablesResponse {
	pub table_names: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_evaluated_table_name: Option<String>,
}

#[cfg(test)]
mod tests {
	use serde_json::json;
	use tabula_store::{AttributeDefinition, Projection, TableDef};

	use super::*;

	#[test]
	fn test_table_description_shape() {
		let def = TableDef {
			name: "t".to_string(),
			key: KeySchema {
				partition: AttributeDefinition::string("pk"),
				sort: None,
			},
			attributes: vec![AttributeDefinition::string("pk"), AttributeDefinition::number("n")],
			indexes: vec![IndexDef {
				name: "by_n".to_string(),
				kind: IndexKind::Global,
				key: KeySchema {
					partition: AttributeDefinition::number("n"),
					sort: None,
				},
				projection: Projection::default(),
			}],
			sequence: 7,
		};

		let json = serde_json::to_value(TableDescription::new(&def, None)).unwrap();
		assert_eq!(
			json,
			json!({
				"TableName": "t",
				"TableStatus": "ACTIVE",
				"KeySchema": [{"AttributeName": "pk", "KeyType": "HASH"}],
				"AttributeDefinitions": [
					{"AttributeName": "pk", "AttributeType": "S"},
					{"AttributeName": "n", "AttributeType": "N"}
				],
				"GlobalSecondaryIndexes": [{
					"IndexName": "by_n",
					"IndexStatus": "ACTIVE",
					"KeySchema": [{"AttributeName": "n", "KeyType": "HASH"}],
					"Projection": {"ProjectionType": "ALL"},
					"ItemCount": 0
				}],
				"ItemCount": 0,
				"CreationSequence": 7
			})
		);
	}

	#[test]
	fn test_empty_get_response() {
		assert_eq!(serde_json::to_value(GetItemResponse::default()).unwrap(), json!({}));
	}
}
