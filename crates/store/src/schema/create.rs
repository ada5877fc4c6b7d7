// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::collections::{HashMap, HashSet};

use tabula_type::{Error, ScalarType, SchemaViolation};

use crate::{
	config::StoreConfig,
	schema::{AttributeDefinition, IndexDef, IndexKind, KeySchema, Projection, TableDef},
};

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalIndexToCreate {
	pub name: String,
	pub partition_key: String,
	pub sort_key: Option<String>,
	pub projection: Projection,
}

impl GlobalIndexToCreate {
	pub fn new(name: impl Into<String>, partition_key: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			partition_key: partition_key.into(),
			sort_key: None,
			projection: Projection::default(),
		}
	}

	pub fn with_sort_key(mut self, sort_key: impl Into<String>) -> Self {
		self.sort_key = Some(sort_key.into());
		self
	}

	pub fn with_projection(mut self, projection: Projection) -> Self {
		self.projection = projection;
		self
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalIndexToCreate {
	pub name: String,
	pub sort_key: String,
	pub projection: Projection,
}

impl LocalIndexToCreate {
	pub fn new(name: impl Into<String>, sort_key: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			sort_key: sort_key.into(),
			projection: Projection::default(),
		}
	}

	pub fn with_projection(mut self, projection: Projection) -> Self {
		self.projection = projection;
		self
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableToCreate {
	pub name: String,
	pub partition_key: String,
	pub sort_key: Option<String>,
	pub attribute_definitions: Vec<AttributeDefinition>,
	pub global_indexes: Vec<GlobalIndexToCreate>,
	pub local_indexes: Vec<LocalIndexToCreate>,
}

impl TableToCreate {
	pub fn new(name: impl Into<String>, partition_key: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			partition_key: partition_key.into(),
			sort_key: None,
			attribute_definitions: vec![],
			global_indexes: vec![],
			local_indexes: vec![],
		}
	}

	pub fn with_sort_key(mut self, sort_key: impl Into<String>) -> Self {
		self.sort_key = Some(sort_key.into());
		self
	}

	pub fn with_attribute(mut self, name: impl Into<String>, r#type: ScalarType) -> Self {
		self.attribute_definitions.push(AttributeDefinition::new(name, r#type));
		self
	}

	pub fn with_global_index(mut self, index: GlobalIndexToCreate) -> Self {
		self.global_indexes.push(index);
		self
	}

	pub fn with_local_index(mut self, index: LocalIndexToCreate) -> Self {
		self.local_indexes.push(index);
		self
	}

	/// Validates the request and resolves every key attribute to its declared
	/// type.
	pub(crate) fn validate(self, config: &StoreConfig, sequence: u64) -> crate::Result<TableDef> {
		let table = self.name.as_str();
		let reject = |violation: SchemaViolation| Error::schema(table, violation);

		if table.is_empty() {
			return Err(reject(SchemaViolation::EmptyTableName));
		}
		if table.len() > config.max_table_name_length {
			return Err(reject(SchemaViolation::TableNameTooLong {
				length: table.len(),
				max: config.max_table_name_length,
			}));
		}

		let mut types: HashMap<&str, ScalarType> = HashMap::new();
		for definition in &self.attribute_definitions {
			match types.get(definition.name.as_str()) {
				Some(existing) if *existing != definition.r#type => {
					return Err(reject(SchemaViolation::ConflictingAttributeDefinition {
						attribute: definition.name.clone(),
					}));
				}
				_ => {
					types.insert(definition.name.as_str(), definition.r#type);
				}
			}
		}

		let resolve = |attribute: &str| -> crate::Result<AttributeDefinition> {
			types.get(attribute)
				.map(|r#type| AttributeDefinition::new(attribute, *r#type))
				.ok_or_else(|| {
					Error::schema(
						table,
						SchemaViolation::MissingAttributeDefinition {
							attribute: attribute.to_string(),
						},
					)
				})
		};

		let key = KeySchema {
			partition: resolve(&self.partition_key)?,
			sort: self.sort_key.as_deref().map(resolve).transpose()?,
		};
		if key.sort_name() == Some(key.partition_name()) {
			return Err(reject(SchemaViolation::RepeatedKeyAttribute {
				owner: "the table".to_string(),
				attribute: self.partition_key.clone(),
			}));
		}

		if self.global_indexes.len() > config.max_global_indexes {
			return Err(reject(SchemaViolation::TooManyGlobalIndexes {
				count: self.global_indexes.len(),
				max: config.max_global_indexes,
			}));
		}
		if self.local_indexes.len() > config.max_local_indexes {
			return Err(reject(SchemaViolation::TooManyLocalIndexes {
				count: self.local_indexes.len(),
				max: config.max_local_indexes,
			}));
		}

		let mut names = HashSet::new();
		let mut check_name = |name: &str| -> crate::Result<()> {
			if name.is_empty() {
				return Err(Error::schema(table, SchemaViolation::EmptyIndexName));
			}
			if !names.insert(name.to_string()) {
				return Err(Error::schema(
					table,
					SchemaViolation::DuplicateIndexName {
						index: name.to_string(),
					},
				));
			}
			Ok(())
		};

		let mut indexes = Vec::with_capacity(self.global_indexes.len() + self.local_indexes.len());

		for index in &self.global_indexes {
			check_name(&index.name)?;
			if index.sort_key.as_deref() == Some(index.partition_key.as_str()) {
				return Err(reject(SchemaViolation::RepeatedKeyAttribute {
					owner: format!("index '{}'", index.name),
					attribute: index.partition_key.clone(),
				}));
			}
			indexes.push(IndexDef {
				name: index.name.clone(),
				kind: IndexKind::Global,
				key: KeySchema {
					partition: resolve(&index.partition_key)?,
					sort: index.sort_key.as_deref().map(resolve).transpose()?,
				},
				projection: index.projection.clone(),
			});
		}

		for index in &self.local_indexes {
			check_name(&index.name)?;
			let Some(table_sort) = key.sort_name() else {
				return Err(reject(SchemaViolation::LocalIndexWithoutTableSortKey {
					index: index.name.clone(),
				}));
			};
			if index.sort_key == table_sort || index.sort_key == key.partition_name() {
				return Err(reject(SchemaViolation::LocalIndexSortKey {
					index: index.name.clone(),
				}));
			}
			indexes.push(IndexDef {
				name: index.name.clone(),
				kind: IndexKind::Local,
				key: KeySchema {
					partition: key.partition.clone(),
					sort: Some(resolve(&index.sort_key)?),
				},
				projection: index.projection.clone(),
			});
		}

		Ok(TableDef {
			name: self.name,
			key,
			attributes: self.attribute_definitions,
			indexes,
			sequence,
		})
	}
}
