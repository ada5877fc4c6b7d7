// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A stored record: attribute name to value, in insertion order.
///
/// Equality ignores attribute order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(IndexMap<String, Value>);

impl Item {
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(name, value);
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(name.into(), value.into())
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.0.iter()
	}

	pub fn into_inner(self) -> IndexMap<String, Value> {
		self.0
	}
}

impl From<IndexMap<String, Value>> for Item {
	fn from(value: IndexMap<String, Value>) -> Self {
		Self(value)
	}
}

impl<K: Into<String>> FromIterator<(K, Value)> for Item {
	fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}
}

impl IntoIterator for Item {
	type Item = (String, Value);
	type IntoIter = indexmap::map::IntoIter<String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a Item {
	type Item = (&'a String, &'a Value);
	type IntoIter = indexmap::map::Iter<'a, String, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
