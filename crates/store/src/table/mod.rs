// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tabula_type::{Item, KeyValue};

use crate::{index::IndexProjection, key::PrimaryKey, schema::TableDef};

mod get;
mod put;
mod query;

/// Primary storage: partition value, then sort value (`None` when the table
/// has no sort key).
type Partitions = BTreeMap<KeyValue, BTreeMap<Option<KeyValue>, Item>>;

/// A table and its data.
///
/// One lock guards primary storage together with every index projection, so a
/// put is visible in all of them at once or in none.
#[derive(Debug)]
pub(crate) struct Table {
	pub def: TableDef,
	data: RwLock<TableData>,
}

#[derive(Debug)]
struct TableData {
	partitions: Partitions,
	/// In the same order as `TableDef::indexes`.
	indexes: Vec<IndexProjection>,
	len: usize,
}

impl TableData {
	fn lookup(&self, key: &PrimaryKey) -> Option<&Item> {
		self.partitions.get(&key.partition)?.get(&key.sort)
	}
}

impl Table {
	pub fn new(def: TableDef) -> Self {
		let indexes = def.indexes.iter().cloned().map(IndexProjection::new).collect();
		Self {
			def,
			data: RwLock::new(TableData {
				partitions: BTreeMap::new(),
				indexes,
				len: 0,
			}),
		}
	}

	pub fn stats(&self) -> TableStats {
		let data = self.data.read();
		TableStats {
			item_count: data.len,
			indexes: data
				.indexes
				.iter()
				.map(|index| IndexStats {
					name: index.def.name.clone(),
					item_count: index.len(),
				})
				.collect(),
		}
	}
}

/// Point-in-time counters of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
	pub item_count: usize,
	pub indexes: Vec<IndexStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
	pub name: String,
	pub item_count: usize,
}
