// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use tabula_type::{Error, Item, KeyValue, ValueKind};

use crate::schema::{AttributeDefinition, KeySchema};

/// The identity of an item within a table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimaryKey {
	pub partition: KeyValue,
	pub sort: Option<KeyValue>,
}

impl PrimaryKey {
	pub fn new(partition: impl Into<KeyValue>) -> Self {
		Self {
			partition: partition.into(),
			sort: None,
		}
	}

	pub fn with_sort(mut self, sort: impl Into<KeyValue>) -> Self {
		self.sort = Some(sort.into());
		self
	}
}

/// Reads a key attribute from an item.
///
/// A missing attribute is `Ok(None)`; a present attribute of the wrong type is
/// a `TypeMismatch`.
pub(crate) fn read_attribute(
	table: &str,
	definition: &AttributeDefinition,
	item: &Item,
) -> crate::Result<Option<KeyValue>> {
	let Some(value) = item.get(&definition.name) else {
		return Ok(None);
	};

	value.to_key(definition.r#type).map(Some).ok_or_else(|| type_mismatch(table, definition, value.kind()))
}

fn require_attribute(table: &str, definition: &AttributeDefinition, item: &Item) -> crate::Result<KeyValue> {
	read_attribute(table, definition, item)?.ok_or_else(|| Error::KeyMissing {
		table: table.to_string(),
		attribute: definition.name.clone(),
	})
}

/// Extracts the primary key of `item` under `schema`; every key part must be
/// present.
pub(crate) fn extract_primary_key(table: &str, schema: &KeySchema, item: &Item) -> crate::Result<PrimaryKey> {
	let partition = require_attribute(table, &schema.partition, item)?;
	let sort = match &schema.sort {
		Some(sort) => Some(require_attribute(table, sort, item)?),
		None => None,
	};

	Ok(PrimaryKey {
		partition,
		sort,
	})
}

/// Extracts the key of `item` under an index key schema.
///
/// Returns `None` when any index key attribute is absent, which keeps the item
/// out of that index.
pub(crate) fn extract_index_key(table: &str, schema: &KeySchema, item: &Item) -> crate::Result<Option<PrimaryKey>> {
	let Some(partition) = read_attribute(table, &schema.partition, item)? else {
		return Ok(None);
	};

	let sort = match &schema.sort {
		Some(sort) => match read_attribute(table, sort, item)? {
			Some(value) => Some(value),
			None => return Ok(None),
		},
		None => None,
	};

	Ok(Some(PrimaryKey {
		partition,
		sort,
	}))
}

/// Like [`extract_index_key`] but for items already accepted by the table, so
/// type errors cannot occur.
pub(crate) fn stored_index_key(schema: &KeySchema, item: &Item) -> Option<PrimaryKey> {
	let partition = item.get(&schema.partition.name)?.to_key(schema.partition.r#type)?;
	let sort = match &schema.sort {
		Some(sort) => Some(item.get(&sort.name)?.to_key(sort.r#type)?),
		None => None,
	};

	Some(PrimaryKey {
		partition,
		sort,
	})
}

pub(crate) fn type_mismatch(table: &str, definition: &AttributeDefinition, actual: ValueKind) -> Error {
	Error::TypeMismatch {
		table: table.to_string(),
		attribute: definition.name.clone(),
		expected: definition.r#type,
		actual,
	}
}
