// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use tabula_type::{Error, Item};

use super::Table;
use crate::query::QueryRequest;

impl Table {
	pub fn query(&self, request: QueryRequest, default_limit: Option<usize>) -> crate::Result<Vec<Item>> {
		let QueryRequest {
			condition,
			index,
			limit,
			scan_forward,
		} = request;

		let position = match &index {
			Some(index) => Some(self.def.indexes.iter().position(|def| &def.name == index).ok_or_else(|| {
				Error::IndexNotFound {
					table: self.def.name.clone(),
					index: index.clone(),
				}
			})?),
			None => None,
		};
		let schema = match position {
			Some(position) => &self.def.indexes[position].key,
			None => &self.def.key,
		};
		let condition = condition.resolve(&self.def.name, schema)?;

		let data = self.data.read();
		let matched: Vec<&Item> = match position {
			None => data
				.partitions
				.get(&condition.partition)
				.map(|bucket| condition.select(bucket))
				.unwrap_or_default(),
			Some(position) => data.indexes[position]
				.bucket(&condition.partition)
				.map(|bucket| {
					condition.select(bucket).into_iter().flatten().filter_map(|target| data.lookup(target)).collect()
				})
				.unwrap_or_default(),
		};

		// only the returned page is cloned
		let limit = limit.or(default_limit).unwrap_or(usize::MAX);
		let items: Vec<Item> = if scan_forward {
			matched.into_iter().take(limit).cloned().collect()
		} else {
			matched.into_iter().rev().take(limit).cloned().collect()
		};

		Ok(items)
	}
}
