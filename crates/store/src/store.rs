// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::sync::{
	Arc,
	atomic::{AtomicU64, Ordering},
};

use crossbeam_skiplist::SkipMap;
use tabula_type::{Error, Item};
use tracing::{debug, instrument};

use crate::{
	config::StoreConfig,
	query::QueryRequest,
	schema::{TableDef, TableToCreate},
	table::{Table, TableStats},
};

/// The table catalog and all table data.
///
/// Cloning is cheap and every clone refers to the same tables.
#[derive(Clone)]
pub struct TableStore {
	inner: Arc<StoreInner>,
}

struct StoreInner {
	config: StoreConfig,
	tables: SkipMap<String, Arc<Table>>,
	sequence: AtomicU64,
}

impl Default for TableStore {
	fn default() -> Self {
		Self::new(StoreConfig::default())
	}
}

impl TableStore {
	pub fn new(config: StoreConfig) -> Self {
		Self {
			inner: Arc::new(StoreInner {
				config,
				tables: SkipMap::new(),
				sequence: AtomicU64::new(1),
			}),
		}
	}

	pub fn config(&self) -> &StoreConfig {
		&self.inner.config
	}

	#[instrument(name = "store::table::create", level = "debug", skip(self, to_create), fields(table = %to_create.name))]
	pub fn create_table(&self, to_create: TableToCreate) -> crate::Result<TableDef> {
		if self.inner.tables.contains_key(&to_create.name) {
			return Err(Error::TableAlreadyExists {
				table: to_create.name,
			});
		}

		let sequence = self.inner.sequence.fetch_add(1, Ordering::Relaxed);
		let def = to_create.validate(&self.inner.config, sequence).inspect_err(|err| {
			debug!(error = %err, "rejected table definition");
		})?;

		let table = Arc::new(Table::new(def.clone()));
		let entry = self.inner.tables.get_or_insert(def.name.clone(), table.clone());
		if !Arc::ptr_eq(entry.value(), &table) {
			return Err(Error::TableAlreadyExists {
				table: def.name,
			});
		}

		debug!(indexes = def.indexes.len(), sequence = def.sequence, "table created");
		Ok(def)
	}

	#[instrument(name = "store::item::put", level = "trace", skip(self, item))]
	pub fn put_item(&self, table: &str, item: Item) -> crate::Result<Option<Item>> {
		self.table(table)?.put(item)
	}

	#[instrument(name = "store::item::get", level = "trace", skip(self, key))]
	pub fn get_item(&self, table: &str, key: &Item) -> crate::Result<Option<Item>> {
		self.table(table)?.get(key)
	}

	#[instrument(name = "store::item::query", level = "trace", skip(self, request))]
	pub fn query(&self, table: &str, request: QueryRequest) -> crate::Result<Vec<Item>> {
		self.table(table)?.query(request, self.inner.config.default_query_limit)
	}

	#[instrument(name = "store::table::describe", level = "trace", skip(self))]
	pub fn describe_table(&self, table: &str) -> crate::Result<TableDef> {
		Ok(self.table(table)?.def.clone())
	}

	/// Names of all tables in ascending order.
	#[instrument(name = "store::table::list", level = "trace", skip(self))]
	pub fn list_tables(&self) -> Vec<String> {
		self.inner.tables.iter().map(|entry| entry.key().clone()).collect()
	}

	#[instrument(name = "store::table::stats", level = "trace", skip(self))]
	pub fn table_stats(&self, table: &str) -> crate::Result<TableStats> {
		Ok(self.table(table)?.stats())
	}

	fn table(&self, name: &str) -> crate::Result<Arc<Table>> {
		self.inner.tables.get(name).map(|entry| entry.value().clone()).ok_or_else(|| Error::TableNotFound {
			table: name.to_string(),
		})
	}
}

#[cfg(test)]
mod tests {
	use tabula_type::{ErrorKind, ScalarType};

	use super::*;

	fn users() -> TableToCreate {
		TableToCreate::new("users", "id").with_attribute("id", ScalarType::String)
	}

	#[test]
	fn test_sequence_increases() {
		let store = TableStore::default();
		let first = store.create_table(users()).unwrap();
		let second = store
			.create_table(TableToCreate::new("orders", "id").with_attribute("id", ScalarType::String))
			.unwrap();
		assert!(second.sequence > first.sequence);
	}

	#[test]
	fn test_clones_share_tables() {
		let store = TableStore::default();
		let other = store.clone();
		store.create_table(users()).unwrap();
		assert_eq!(other.list_tables(), vec!["users".to_string()]);
	}

	#[test]
	fn test_unknown_table() {
		let store = TableStore::default();
		let err = store.put_item("missing", Item::new().with("id", "a")).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::TableNotFound);
		assert_eq!(err.table(), "missing");
	}
}
