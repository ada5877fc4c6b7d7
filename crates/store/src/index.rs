// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::collections::{BTreeMap, BTreeSet};

use tabula_type::KeyValue;

use crate::{key::PrimaryKey, schema::IndexDef};

/// The entries of one secondary index.
///
/// Entries hold the primary key of the item they point at; the item itself
/// lives only in the table's primary storage. Several items may share an index
/// key, so each index key maps to a set.
#[derive(Debug)]
pub(crate) struct IndexProjection {
	pub def: IndexDef,
	buckets: BTreeMap<KeyValue, BTreeMap<Option<KeyValue>, BTreeSet<PrimaryKey>>>,
	len: usize,
}

impl IndexProjection {
	pub fn new(def: IndexDef) -> Self {
		Self {
			def,
			buckets: BTreeMap::new(),
			len: 0,
		}
	}

	pub fn insert(&mut self, key: PrimaryKey, target: PrimaryKey) {
		let inserted =
			self.buckets.entry(key.partition).or_default().entry(key.sort).or_default().insert(target);
		if inserted {
			self.len += 1;
		}
	}

	pub fn remove(&mut self, key: &PrimaryKey, target: &PrimaryKey) {
		let Some(bucket) = self.buckets.get_mut(&key.partition) else {
			return;
		};
		let Some(targets) = bucket.get_mut(&key.sort) else {
			return;
		};

		if targets.remove(target) {
			self.len -= 1;
		}
		if targets.is_empty() {
			bucket.remove(&key.sort);
		}
		if bucket.is_empty() {
			self.buckets.remove(&key.partition);
		}
	}

	pub fn bucket(&self, partition: &KeyValue) -> Option<&BTreeMap<Option<KeyValue>, BTreeSet<PrimaryKey>>> {
		self.buckets.get(partition)
	}

	/// Number of entries across all buckets.
	pub fn len(&self) -> usize {
		self.len
	}
}
