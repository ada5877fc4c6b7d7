// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use tabula_type::Item;

use super::Table;
use crate::key::{extract_index_key, extract_primary_key, stored_index_key};

impl Table {
	/// Stores `item`, replacing any item with the same primary key, and returns
	/// the replaced item.
	pub fn put(&self, item: Item) -> crate::Result<Option<Item>> {
		let name = &self.def.name;
		let key = extract_primary_key(name, &self.def.key, &item)?;
		let index_keys = self
			.def
			.indexes
			.iter()
			.map(|index| extract_index_key(name, &index.key, &item))
			.collect::<crate::Result<Vec<_>>>()?;

		let mut guard = self.data.write();
		let data = &mut *guard;

		let previous = data.partitions.entry(key.partition.clone()).or_default().insert(key.sort.clone(), item);
		if previous.is_none() {
			data.len += 1;
		}

		for (index, entry) in data.indexes.iter_mut().zip(index_keys) {
			if let Some(stale) = previous.as_ref().and_then(|old| stored_index_key(&index.def.key, old)) {
				index.remove(&stale, &key);
			}
			if let Some(entry) = entry {
				index.insert(entry, key.clone());
			}
		}

		Ok(previous)
	}
}
